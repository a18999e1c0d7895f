use serde::{Deserialize, Serialize};

use crate::error::{OrreryError, Result};

/// Shown when an optional attribute is missing.
pub const FALLBACK_UNKNOWN: &str = "Unknown";
/// Shown when no atmosphere composition is known.
pub const FALLBACK_ATMOSPHERE: &str = "No atmospheric data";
/// Shown when a body has no known moons.
pub const FALLBACK_NO_MOONS: &str = "None";
/// Orbital period text for the central body.
pub const FALLBACK_NO_ORBIT: &str = "Does not orbit";
/// Rotation period text when the period is unknown or zero.
pub const FALLBACK_NO_ROTATION: &str = "Does not rotate";

/// Immutable physical/orbital parameters of one body, as delivered by the data layer.
///
/// Deserializes through `DescriptorRecord`, so Solar System OpenData API
/// records are accepted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "DescriptorRecord")]
pub struct CelestialBodyDescriptor {
    /// Unique (case-insensitive) identifier.
    pub name: String,
    /// Semi-major axis in km (0 for the central body).
    pub raw_distance: f64,
    /// Mean radius in km.
    pub raw_radius: f64,
    /// Orbital period in days; 0 marks the central body.
    pub orbital_period_days: f64,
    /// Sidereal rotation period in hours (negative = retrograde).
    pub rotation_period_hours: Option<f64>,
    /// Display-only attributes.
    #[serde(flatten)]
    pub details: BodyDetails,
}

/// Wire shape of a descriptor. API records carry both a French `name` and
/// an `englishName`; the English one wins when present.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescriptorRecord {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    english_name: Option<String>,
    #[serde(alias = "semimajorAxis")]
    raw_distance: f64,
    #[serde(alias = "meanRadius")]
    raw_radius: f64,
    #[serde(alias = "sideralOrbit")]
    orbital_period_days: f64,
    #[serde(default, alias = "sideralRotation")]
    rotation_period_hours: Option<f64>,
    #[serde(flatten)]
    details: BodyDetails,
}

impl TryFrom<DescriptorRecord> for CelestialBodyDescriptor {
    type Error = OrreryError;

    fn try_from(record: DescriptorRecord) -> Result<Self> {
        let non_empty = |s: Option<String>| s.filter(|s| !s.trim().is_empty());
        let name = non_empty(record.english_name)
            .or_else(|| non_empty(record.name))
            .ok_or(OrreryError::MissingName)?;
        Ok(Self {
            name,
            raw_distance: record.raw_distance,
            raw_radius: record.raw_radius,
            orbital_period_days: record.orbital_period_days,
            rotation_period_hours: record.rotation_period_hours,
            details: record.details,
        })
    }
}

/// Optional, display-only attributes. None of these affect the simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyDetails {
    #[serde(default)]
    pub mass: Option<Mass>,
    /// Surface gravity in m/s².
    #[serde(default)]
    pub gravity: Option<f64>,
    /// Mean density in g/cm³.
    #[serde(default)]
    pub density: Option<f64>,
    /// Mean temperature in K.
    #[serde(default)]
    pub avg_temp: Option<f64>,
    #[serde(default)]
    pub atmosphere: Option<String>,
    #[serde(default)]
    pub moons: Option<Vec<MoonRef>>,
    #[serde(default)]
    pub discovered_by: Option<String>,
    #[serde(default)]
    pub discovery_date: Option<String>,
}

/// Mass as mantissa and power of ten, in kg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mass {
    pub mass_value: f64,
    pub mass_exponent: i32,
}

/// A moon entry; only the name is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonRef {
    pub moon: String,
}

/// One label/value row of a body's info sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoLine {
    pub label: &'static str,
    pub value: String,
}

impl InfoLine {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self { label, value: value.into() }
    }
}

impl CelestialBodyDescriptor {
    /// Minimal descriptor with no optional data.
    pub fn new(
        name: impl Into<String>,
        raw_distance: f64,
        raw_radius: f64,
        orbital_period_days: f64,
        rotation_period_hours: Option<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            raw_distance,
            raw_radius,
            orbital_period_days,
            rotation_period_hours,
            details: BodyDetails::default(),
        }
    }

    /// True for the body everything else orbits.
    pub fn is_central(&self) -> bool {
        self.orbital_period_days == 0.0
    }

    /// Rotation period if it is known, finite and nonzero.
    pub fn rotation_period(&self) -> Option<f64> {
        self.rotation_period_hours
            .filter(|hours| hours.is_finite() && *hours != 0.0)
    }

    /// Reject descriptors the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(OrreryError::InvalidField {
                name: self.name.clone(),
                field: "name",
                value: f64::NAN,
            });
        }
        let essentials = [
            ("rawDistance", self.raw_distance),
            ("rawRadius", self.raw_radius),
            ("orbitalPeriodDays", self.orbital_period_days),
        ];
        for (field, value) in essentials {
            if !value.is_finite() || value < 0.0 {
                return Err(OrreryError::InvalidField {
                    name: self.name.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }

    /// Info sheet for the selection popup. Missing attributes get fallback text.
    pub fn info(&self) -> Vec<InfoLine> {
        let d = &self.details;
        let mut lines = Vec::with_capacity(10);

        lines.push(InfoLine::new("Name", self.name.clone()));
        lines.push(InfoLine::new("Radius", format!("{} km", self.raw_radius)));
        lines.push(InfoLine::new(
            "Distance from Sun",
            if self.is_central() {
                "0 km".to_string()
            } else {
                format!("{} km", self.raw_distance)
            },
        ));
        lines.push(InfoLine::new(
            "Orbital period",
            if self.is_central() {
                FALLBACK_NO_ORBIT.to_string()
            } else {
                format!("{} days", self.orbital_period_days)
            },
        ));
        lines.push(InfoLine::new(
            "Rotation period",
            self.rotation_period()
                .map(|h| format!("{h} hours"))
                .unwrap_or_else(|| self.fallback("rotation period", FALLBACK_NO_ROTATION)),
        ));
        lines.push(InfoLine::new(
            "Mass",
            d.mass
                .map(|m| format!("{} × 10^{} kg", m.mass_value, m.mass_exponent))
                .unwrap_or_else(|| self.fallback("mass", FALLBACK_UNKNOWN)),
        ));
        lines.push(InfoLine::new(
            "Gravity",
            d.gravity
                .map(|g| format!("{g} m/s²"))
                .unwrap_or_else(|| self.fallback("gravity", FALLBACK_UNKNOWN)),
        ));
        lines.push(InfoLine::new(
            "Density",
            d.density
                .map(|g| format!("{g} g/cm³"))
                .unwrap_or_else(|| self.fallback("density", FALLBACK_UNKNOWN)),
        ));
        lines.push(InfoLine::new(
            "Mean temperature",
            // The data source reports 0 K for "not measured"
            d.avg_temp
                .filter(|t| *t > 0.0)
                .map(|t| format!("{t} K"))
                .unwrap_or_else(|| self.fallback("mean temperature", FALLBACK_UNKNOWN)),
        ));
        lines.push(InfoLine::new(
            "Atmosphere",
            d.atmosphere
                .as_deref()
                .filter(|a| !a.trim().is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| self.fallback("atmosphere", FALLBACK_ATMOSPHERE)),
        ));
        lines.push(InfoLine::new(
            "Moons",
            match d.moons.as_deref() {
                Some(moons) if !moons.is_empty() => moons.len().to_string(),
                _ => FALLBACK_NO_MOONS.to_string(),
            },
        ));
        lines.push(InfoLine::new(
            "Discovered by",
            d.discovered_by
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| self.fallback("discoverer", FALLBACK_UNKNOWN)),
        ));
        lines.push(InfoLine::new(
            "Discovery date",
            d.discovery_date
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| self.fallback("discovery date", FALLBACK_UNKNOWN)),
        ));
        lines
    }

    fn fallback(&self, field: &str, text: &str) -> String {
        log::debug!("{}: no {field}, using \"{text}\"", self.name);
        text.to_string()
    }
}
