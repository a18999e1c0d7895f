use serde::Deserialize;

use crate::components::descriptor::CelestialBodyDescriptor;
use crate::error::{OrreryError, Result};

/// Canonical body order. The central body comes first.
pub const CANONICAL_ORDER: [&str; 9] = [
    "sun", "mercury", "venus", "earth", "mars", "jupiter", "saturn", "uranus", "neptune",
];

/// The `{ "bodies": [...] }` envelope the OpenData API returns.
#[derive(Deserialize)]
struct Envelope {
    bodies: Vec<CelestialBodyDescriptor>,
}

/// Validated, canonically ordered body descriptors.
/// Loaded once from the startup fetch; immutable afterwards.
#[derive(Debug, Clone)]
pub struct BodyCatalog {
    bodies: Vec<CelestialBodyDescriptor>,
}

impl BodyCatalog {
    /// Parse a catalog from a JSON string: either a bare array of
    /// descriptors or the `{ "bodies": [...] }` envelope.
    ///
    /// The top-level shape picks the form, so field-level errors inside a
    /// record are reported as-is.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: serde_json::Value = serde_json::from_str(json).map_err(OrreryError::CatalogParse)?;
        let bodies = match doc {
            serde_json::Value::Array(_) => serde_json::from_value::<Vec<CelestialBodyDescriptor>>(doc),
            serde_json::Value::Object(_) => serde_json::from_value::<Envelope>(doc).map(|e| e.bodies),
            _ => Err(serde::de::Error::custom(
                "expected an array of bodies or an object with a `bodies` array",
            )),
        }
        .map_err(OrreryError::CatalogParse)?;
        Self::new(bodies)
    }

    /// Validate and order descriptors.
    ///
    /// Names in `CANONICAL_ORDER` are sorted into place; any others follow in
    /// input order. The first body after sorting must be the central body.
    pub fn new(mut bodies: Vec<CelestialBodyDescriptor>) -> Result<Self> {
        if bodies.is_empty() {
            return Err(OrreryError::EmptyCatalog);
        }
        for (i, desc) in bodies.iter().enumerate() {
            desc.validate()?;
            let duplicate = bodies[..i]
                .iter()
                .any(|other| other.name.trim().eq_ignore_ascii_case(desc.name.trim()));
            if duplicate {
                return Err(OrreryError::DuplicateBody(desc.name.clone()));
            }
        }

        bodies.sort_by_key(|desc| canonical_rank(&desc.name));

        let first = &bodies[0];
        if !first.is_central() {
            return Err(OrreryError::MissingCentralBody(first.name.clone()));
        }
        let extra_central = bodies[1..].iter().filter(|d| d.is_central()).count();
        if extra_central > 0 {
            log::warn!("{extra_central} non-leading bodies have orbital period 0 and stay at the origin");
        }

        log::info!("catalog loaded: {} bodies, central body {}", bodies.len(), first.name);
        Ok(Self { bodies })
    }

    /// The body everything else orbits.
    pub fn central(&self) -> &CelestialBodyDescriptor {
        &self.bodies[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &CelestialBodyDescriptor> {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Always false: an empty catalog is rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

fn canonical_rank(name: &str) -> usize {
    let name = name.trim();
    CANONICAL_ORDER
        .iter()
        .position(|c| c.eq_ignore_ascii_case(name))
        .unwrap_or(CANONICAL_ORDER.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLANETS_JSON: &str = r#"[
        { "name": "Neptune", "rawDistance": 4498396441, "rawRadius": 24622, "orbitalPeriodDays": 60182.0, "rotationPeriodHours": 16.11 },
        { "name": "Earth", "rawDistance": 149598023, "rawRadius": 6371, "orbitalPeriodDays": 365.256, "rotationPeriodHours": 23.9345 },
        { "name": "Sun", "rawDistance": 0, "rawRadius": 695508, "orbitalPeriodDays": 0, "rotationPeriodHours": 609.12 },
        { "name": "Mercury", "rawDistance": 57909227, "rawRadius": 2439.7, "orbitalPeriodDays": 87.97 }
    ]"#;

    #[test]
    fn parses_and_orders_canonically() {
        let catalog = BodyCatalog::from_json(PLANETS_JSON).unwrap();
        let names: Vec<&str> = catalog.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Sun", "Mercury", "Earth", "Neptune"]);
        assert_eq!(catalog.central().raw_radius, 695_508.0);
    }

    #[test]
    fn parses_wrapped_api_envelope() {
        let json = r#"{ "bodies": [
            { "englishName": "Mars", "semimajorAxis": 227939200, "meanRadius": 3389.5, "sideralOrbit": 686.98, "sideralRotation": 24.6229 },
            { "englishName": "Sun", "semimajorAxis": 0, "meanRadius": 695508, "sideralOrbit": 0, "sideralRotation": 0, "moons": null }
        ] }"#;
        let catalog = BodyCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.central().name, "Sun");
        assert_eq!(catalog.central().rotation_period(), None);
    }

    #[test]
    fn unknown_names_follow_in_input_order() {
        let bodies = vec![
            CelestialBodyDescriptor::new("Vulcan", 1.0e7, 1000.0, 20.0, None),
            CelestialBodyDescriptor::new("Earth", 1.5e8, 6371.0, 365.25, None),
            CelestialBodyDescriptor::new("Nibiru", 1.0e10, 9000.0, 1.0e6, None),
            CelestialBodyDescriptor::new("Sun", 0.0, 695_508.0, 0.0, None),
        ];
        let catalog = BodyCatalog::new(bodies).unwrap();
        let names: Vec<&str> = catalog.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Sun", "Earth", "Vulcan", "Nibiru"]);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(BodyCatalog::from_json("{ not json"), Err(OrreryError::CatalogParse(_))));
        assert!(matches!(
            BodyCatalog::from_json(r#"[{ "name": "Sun" }]"#),
            Err(OrreryError::CatalogParse(_))
        ));
    }

    #[test]
    fn parses_real_api_records() {
        let json = r#"{ "bodies": [
            { "id": "terre", "name": "La Terre", "englishName": "Earth", "isPlanet": true,
              "moons": [{ "moon": "La Lune", "rel": "https://api.le-systeme-solaire.net/rest/bodies/lune" }],
              "semimajorAxis": 149598023, "perihelion": 147095000, "aphelion": 152100000,
              "eccentricity": 0.0167, "inclination": 0,
              "mass": { "massValue": 5.97237, "massExponent": 24 },
              "vol": { "volValue": 1.08321, "volExponent": 12 },
              "density": 5.5136, "gravity": 9.8, "escape": 11190, "meanRadius": 6371.0084,
              "equaRadius": 6378.1366, "polarRadius": 6356.8, "flattening": 0.00335,
              "dimension": "", "sideralOrbit": 365.256, "sideralRotation": 23.9345,
              "aroundPlanet": null, "discoveredBy": "", "discoveryDate": "",
              "alternativeName": "", "axialTilt": 23.4392811, "avgTemp": 288,
              "mainAnomaly": 358.617, "argPeriapsis": 85.901, "longAscNode": 18.272,
              "bodyType": "Planet", "rel": "https://api.le-systeme-solaire.net/rest/bodies/terre" },
            { "id": "soleil", "name": "Le Soleil", "englishName": "Sun", "isPlanet": false,
              "moons": null, "semimajorAxis": 0, "meanRadius": 695508, "sideralOrbit": 0,
              "sideralRotation": 609.12, "mass": { "massValue": 1.9891, "massExponent": 30 },
              "aroundPlanet": null, "discoveredBy": "", "discoveryDate": "",
              "avgTemp": 0, "bodyType": "Star" }
        ] }"#;
        let catalog = BodyCatalog::from_json(json).unwrap();
        let names: Vec<&str> = catalog.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Sun", "Earth"]);
        assert_eq!(catalog.central().raw_radius, 695_508.0);
    }

    #[test]
    fn field_errors_are_not_swallowed() {
        let wrapped = r#"{ "bodies": [{ "englishName": "Sun", "semimajorAxis": 0, "meanRadius": 695508 }] }"#;
        let err = BodyCatalog::from_json(wrapped).unwrap_err().to_string();
        assert!(err.contains("orbitalPeriodDays"), "{err}");
        assert!(!err.contains("did not match any variant"), "{err}");

        let bare = r#"[{ "name": "Sun", "rawDistance": "far", "rawRadius": 1, "orbitalPeriodDays": 0 }]"#;
        let err = BodyCatalog::from_json(bare).unwrap_err().to_string();
        assert!(err.contains("invalid type"), "{err}");

        assert!(matches!(BodyCatalog::from_json("42"), Err(OrreryError::CatalogParse(_))));
    }

    #[test]
    fn rejects_empty_catalog() {
        assert!(matches!(BodyCatalog::from_json("[]"), Err(OrreryError::EmptyCatalog)));
    }

    #[test]
    fn rejects_missing_central_body() {
        let bodies = vec![CelestialBodyDescriptor::new("Earth", 1.5e8, 6371.0, 365.25, None)];
        assert!(matches!(BodyCatalog::new(bodies), Err(OrreryError::MissingCentralBody(_))));
    }

    #[test]
    fn rejects_duplicates() {
        let bodies = vec![
            CelestialBodyDescriptor::new("Sun", 0.0, 695_508.0, 0.0, None),
            CelestialBodyDescriptor::new("earth", 1.5e8, 6371.0, 365.25, None),
            CelestialBodyDescriptor::new("Earth", 1.5e8, 6371.0, 365.25, None),
        ];
        assert!(matches!(BodyCatalog::new(bodies), Err(OrreryError::DuplicateBody(_))));
    }
}
