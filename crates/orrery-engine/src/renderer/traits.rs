//! Output seam to the external renderer.
//!
//! The core never draws. Each frame it hands a `FrameData` to a `FrameSink`;
//! the web bridge's sink packs it into the shared float buffer the
//! TypeScript renderer reads.

use super::camera::CameraView;
use super::instance::BodyInstance;
use crate::api::types::BodyId;

/// Everything the renderer and display need for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameData<'a> {
    /// Frames stepped since the simulation started.
    pub frame: u64,
    /// Simulated seconds advanced this frame.
    pub time_factor: f64,
    /// One instance per body, in scene order.
    pub instances: &'a [BodyInstance],
    pub camera: CameraView,
    /// Whether the camera is following `selected`.
    pub following: bool,
    pub selected: Option<BodyId>,
    pub show_orbits: bool,
    pub show_labels: bool,
    /// Formatted simulated date/time for the clock readout.
    pub sim_datetime: &'a str,
}

/// Consumer of finished frames.
pub trait FrameSink {
    fn submit(&mut self, frame: &FrameData<'_>);
}
