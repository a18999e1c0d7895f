use std::f64::consts::TAU;

use glam::DVec3;

use crate::api::types::BodyId;
use crate::components::descriptor::CelestialBodyDescriptor;
use crate::core::scale::{compress, CompressionParameter};
use crate::error::Result;

/// Ticks of time factor per period unit: one full orbit takes
/// `orbital_period_days * PERIOD_TICKS` simulated seconds.
pub const PERIOD_TICKS: f64 = 60.0;

/// Angles beyond this magnitude are reduced modulo 2π.
pub const ANGLE_WRAP_LIMIT: f64 = TAU * 1.0e6;

/// Angular velocity (rad per simulated second) for a period, or `None` when
/// the period is zero or non-finite.
pub fn angular_rate(period: f64) -> Option<f64> {
    if period == 0.0 || !period.is_finite() {
        None
    } else {
        Some(TAU / (period * PERIOD_TICKS))
    }
}

/// Mutable per-body simulation record.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BodySimState {
    /// Accumulated orbital phase (radians).
    pub orbit_angle: f64,
    /// Accumulated spin about the body's Y axis (radians).
    pub rotation_angle: f64,
    /// Compressed orbital radius. Always 0 for the central body.
    pub display_distance: f64,
    /// Compressed body radius.
    pub display_radius: f64,
    /// Current display-space position.
    pub position: DVec3,
}

impl BodySimState {
    /// Fresh state at phase 0 with display sizes for `k`.
    pub fn new(desc: &CelestialBodyDescriptor, k: CompressionParameter, reference: f64) -> Result<Self> {
        let mut state = Self::default();
        state.rescale(desc, k, reference)?;
        Ok(state)
    }

    /// Recompute display distance/radius for a new compression parameter and
    /// move the body onto its rescaled orbit.
    pub fn rescale(&mut self, desc: &CelestialBodyDescriptor, k: CompressionParameter, reference: f64) -> Result<()> {
        self.display_radius = compress(desc.raw_radius, k, reference)?;
        self.display_distance = if desc.is_central() {
            0.0
        } else {
            compress(desc.raw_distance, k, reference)?
        };
        self.place(desc);
        Ok(())
    }

    /// Per-frame update rule.
    pub fn advance(&mut self, desc: &CelestialBodyDescriptor, time_factor: f64) {
        if let Some(rate) = angular_rate(desc.orbital_period_days) {
            self.orbit_angle = wrap(self.orbit_angle + rate * time_factor);
        }
        if let Some(rate) = desc.rotation_period().and_then(angular_rate) {
            self.rotation_angle = wrap(self.rotation_angle + rate * time_factor);
        }
        self.place(desc);
    }

    fn place(&mut self, desc: &CelestialBodyDescriptor) {
        self.position = if desc.is_central() {
            DVec3::ZERO
        } else {
            let (sin, cos) = self.orbit_angle.sin_cos();
            DVec3::new(self.display_distance * cos, 0.0, self.display_distance * sin)
        };
    }
}

fn wrap(angle: f64) -> f64 {
    if angle.abs() >= ANGLE_WRAP_LIMIT {
        angle.rem_euclid(TAU)
    } else {
        angle
    }
}

/// A descriptor paired with its simulation state.
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub descriptor: CelestialBodyDescriptor,
    pub state: BodySimState,
}

impl Body {
    pub fn new(
        id: BodyId,
        descriptor: CelestialBodyDescriptor,
        k: CompressionParameter,
        reference: f64,
    ) -> Result<Self> {
        let state = BodySimState::new(&descriptor, k, reference)?;
        Ok(Self { id, descriptor, state })
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn advance(&mut self, time_factor: f64) {
        self.state.advance(&self.descriptor, time_factor);
    }

    pub fn rescale(&mut self, k: CompressionParameter, reference: f64) -> Result<()> {
        self.state.rescale(&self.descriptor, k, reference)
    }
}
