use crate::api::types::BodyId;
use crate::assets::catalog::BodyCatalog;
use crate::components::body::Body;
use crate::core::scale::CompressionParameter;
use crate::error::Result;

/// Flat body storage in canonical order (central body first).
/// Bodies are never added or removed after construction.
pub struct Scene {
    bodies: Vec<Body>,
    /// Reference scale R of the compression curve: the central body's raw radius.
    reference_scale: f64,
}

impl Scene {
    /// Build bodies from a validated catalog, sized for compression `k`.
    pub fn from_catalog(catalog: &BodyCatalog, k: CompressionParameter) -> Result<Self> {
        let reference_scale = catalog.central().raw_radius;
        let bodies = catalog
            .iter()
            .enumerate()
            .map(|(i, desc)| Body::new(BodyId(i as u32), desc.clone(), k, reference_scale))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { bodies, reference_scale })
    }

    pub fn reference_scale(&self) -> f64 {
        self.reference_scale
    }

    /// Recompute every body's display radius and distance for `k`.
    pub fn rescale(&mut self, k: CompressionParameter) -> Result<()> {
        let reference = self.reference_scale;
        for body in &mut self.bodies {
            body.rescale(k, reference)?;
        }
        Ok(())
    }

    /// Get a reference to a body by ID.
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0 as usize)
    }

    /// Get a mutable reference to a body by ID.
    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.0 as usize)
    }

    /// Find a body by name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Body> {
        let name = name.trim();
        self.bodies.iter().find(|b| b.name().eq_ignore_ascii_case(name))
    }

    /// Iterate over all bodies.
    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    /// Iterate over all bodies mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.bodies.iter_mut()
    }

    /// Number of bodies in the scene.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
