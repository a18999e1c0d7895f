use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::api::types::{BodyId, PickId};
use crate::assets::catalog::BodyCatalog;
use crate::core::scale::CompressionParameter;
use crate::core::scene::Scene;
use crate::core::time::SimulationClock;
use crate::error::{OrreryError, Result};
use crate::input::queue::InputEvent;
use crate::renderer::camera::{Camera3D, CameraFollow, CameraMode};
use crate::systems::selection::{PickTable, Selection};

/// Configuration for the simulation, provided by the host.
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Initial speed multiplier (default: 1).
    pub initial_speed: f64,
    /// Largest accepted speed multiplier (default: 1000).
    pub max_speed: f64,
    /// Initial compression exponent k (default: 1, i.e. true scale).
    pub initial_compression: f64,
    /// Optional upper bound on the compression exponent (default: none).
    pub max_compression: Option<f64>,
    /// Follow-cam height above the body, display units.
    pub follow_offset_up: f64,
    /// Follow-cam distance in front of the body (+Z), display units.
    pub follow_offset_forward: f64,
    /// Fraction of the remaining distance the follow-cam covers per frame.
    pub follow_lerp: f64,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f64,
    pub near: f64,
    pub far: f64,
    /// Initial viewport size.
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Initial free-camera eye and target.
    pub camera_position: [f64; 3],
    pub camera_target: [f64; 3],
    pub show_orbits: bool,
    pub show_labels: bool,
    /// Capacity of the shared frame buffer, in bodies (default: 16).
    pub max_bodies: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_speed: 1.0,
            max_speed: 1000.0,
            initial_compression: 1.0,
            max_compression: None,
            follow_offset_up: 5.0e4,
            follow_offset_forward: 3.0e5,
            follow_lerp: 0.05,
            fov_y_degrees: 45.0,
            near: 1.0e3,
            far: 1.0e11,
            viewport_width: 1280.0,
            viewport_height: 720.0,
            camera_position: [0.0, 3.0e9, 9.0e9],
            camera_target: [0.0, 0.0, 0.0],
            show_orbits: true,
            show_labels: true,
            max_bodies: 16,
        }
    }
}

impl SimConfig {
    /// Parse a config from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(OrreryError::ConfigParse)
    }

    fn camera(&self) -> Camera3D {
        let mut camera = Camera3D {
            position: DVec3::from_array(self.camera_position),
            target: DVec3::from_array(self.camera_target),
            fov_y: self.fov_y_degrees.to_radians(),
            aspect: 16.0 / 9.0,
            near: self.near,
            far: self.far,
        };
        camera.resize(self.viewport_width, self.viewport_height);
        camera
    }
}

/// All mutable simulation state, passed explicitly into every frame.
///
/// Setters are for use between frames only; the frame step never calls them.
pub struct SimulationState {
    pub config: SimConfig,
    pub scene: Scene,
    pub clock: SimulationClock,
    pub camera: CameraFollow,
    pub picks: PickTable,
    compression: CompressionParameter,
    selection: Selection,
    show_orbits: bool,
    show_labels: bool,
    frame: u64,
}

impl SimulationState {
    /// Build fresh state from a loaded catalog.
    pub fn new(config: SimConfig, catalog: &BodyCatalog) -> Result<Self> {
        let compression =
            CompressionParameter::clamped(config.initial_compression, config.max_compression);
        let scene = Scene::from_catalog(catalog, compression)?;
        let picks = PickTable::from_scene(&scene);
        let clock = SimulationClock::new(config.initial_speed, config.max_speed);
        let camera = CameraFollow::new(
            config.camera(),
            config.follow_offset_up,
            config.follow_offset_forward,
            config.follow_lerp,
        );
        log::info!(
            "simulation ready: {} bodies, speed {}, compression {}",
            scene.len(),
            clock.speed(),
            compression.get(),
        );
        Ok(Self {
            show_orbits: config.show_orbits,
            show_labels: config.show_labels,
            config,
            scene,
            clock,
            camera,
            picks,
            compression,
            selection: Selection::default(),
            frame: 0,
        })
    }

    // -- Setters (between frames) --

    pub fn set_speed(&mut self, speed: f64) {
        self.clock.set_speed(speed);
    }

    /// Set the compression exponent (clamped) and rescale every body now.
    pub fn set_compression(&mut self, value: f64) -> Result<()> {
        let k = CompressionParameter::clamped(value, self.config.max_compression);
        if k == self.compression {
            return Ok(());
        }
        self.scene.rescale(k)?;
        self.compression = k;
        log::debug!("compression set to {}", k.get());
        Ok(())
    }

    /// Select a body and start following it.
    pub fn select(&mut self, id: BodyId) -> Result<()> {
        let name = self
            .scene
            .get(id)
            .map(|b| b.name().to_string())
            .ok_or_else(|| OrreryError::UnknownBody(format!("#{}", id.0)))?;
        self.selection.select(id);
        self.camera.follow(id);
        log::info!("selected {name}");
        Ok(())
    }

    pub fn select_by_name(&mut self, name: &str) -> Result<BodyId> {
        let id = self
            .scene
            .find_by_name(name)
            .map(|b| b.id)
            .ok_or_else(|| OrreryError::UnknownBody(name.to_string()))?;
        self.select(id)?;
        Ok(id)
    }

    /// Resolve renderer hits through the pick table. Returns the selected
    /// body, or `None` when nothing selectable was hit (selection unchanged).
    pub fn pick(&mut self, hits: &[PickId]) -> Result<Option<BodyId>> {
        match self.picks.resolve(hits) {
            Some(id) => {
                self.select(id)?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    /// Clear the selection and hand the camera back to the user.
    pub fn deselect(&mut self) {
        if let Some(id) = self.selection.clear() {
            log::debug!("deselected #{}", id.0);
        }
        self.camera.release();
    }

    pub fn set_show_orbits(&mut self, show: bool) {
        self.show_orbits = show;
    }

    pub fn set_show_labels(&mut self, show: bool) {
        self.show_labels = show;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.camera.camera.resize(width, height);
    }

    pub fn set_manual_camera(&mut self, position: DVec3, target: DVec3) {
        self.camera.set_manual(position, target);
    }

    /// Apply one queued UI event. Rejected events are logged and dropped.
    pub fn apply(&mut self, event: InputEvent) {
        let result = match event {
            InputEvent::SetSpeed { value } => {
                self.set_speed(value);
                Ok(())
            }
            InputEvent::SetCompression { value } => self.set_compression(value),
            InputEvent::Select { name } => self.select_by_name(&name).map(|_| ()),
            InputEvent::Pick { hits } => self.pick(&hits).map(|_| ()),
            InputEvent::Deselect => {
                self.deselect();
                Ok(())
            }
            InputEvent::ShowOrbits(show) => {
                self.set_show_orbits(show);
                Ok(())
            }
            InputEvent::ShowLabels(show) => {
                self.set_show_labels(show);
                Ok(())
            }
            InputEvent::Resize { width, height } => {
                self.resize(width, height);
                Ok(())
            }
            InputEvent::CameraMoved { position, target } => {
                self.set_manual_camera(DVec3::from_array(position), DVec3::from_array(target));
                Ok(())
            }
        };
        if let Err(e) = result {
            log::warn!("input event rejected: {e}");
        }
    }

    // -- Accessors --

    pub fn compression(&self) -> CompressionParameter {
        self.compression
    }

    pub fn selected(&self) -> Option<BodyId> {
        self.selection.current()
    }

    pub fn camera_mode(&self) -> CameraMode {
        self.camera.mode()
    }

    pub fn show_orbits(&self) -> bool {
        self.show_orbits
    }

    pub fn show_labels(&self) -> bool {
        self.show_labels
    }

    /// Frames stepped so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub(crate) fn bump_frame(&mut self) -> u64 {
        self.frame += 1;
        self.frame
    }
}
