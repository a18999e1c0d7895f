use bytemuck::{Pod, Zeroable};
use glam::{DMat4, DVec3};

use crate::api::types::BodyId;
use crate::core::scene::Scene;

/// Perspective camera in display space (f64 to survive astronomical ranges).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera3D {
    /// Eye position.
    pub position: DVec3,
    /// Point the camera looks at.
    pub target: DVec3,
    /// Vertical field of view in radians.
    pub fov_y: f64,
    /// Viewport width / height.
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

/// Camera data handed to the renderer: eye, target, fov, aspect (8 floats).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct CameraView {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub fov_y: f32,
    pub aspect: f32,
}

impl CameraView {
    pub const FLOATS: usize = 8;
}

impl Camera3D {
    /// Right-handed, Y-up view matrix.
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position, self.target, DVec3::Y)
    }

    /// Right-handed perspective projection, depth in [0, 1].
    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Update the aspect ratio for a new viewport size.
    /// Non-positive or non-finite sizes are ignored.
    pub fn resize(&mut self, width: f64, height: f64) {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            log::warn!("ignoring invalid viewport size {width}x{height}");
            return;
        }
        self.aspect = width / height;
    }

    pub fn view(&self) -> CameraView {
        CameraView {
            eye: self.position.as_vec3().to_array(),
            target: self.target.as_vec3().to_array(),
            fov_y: self.fov_y as f32,
            aspect: self.aspect as f32,
        }
    }
}

/// Camera control state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    /// User-controlled; the core leaves the transform alone.
    Free,
    /// Easing toward the selected body every frame.
    Following(BodyId),
}

/// Follow-cam state machine.
///
/// Easing is a fixed fraction per frame, not per second, so its speed
/// depends on the frame rate.
pub struct CameraFollow {
    pub camera: Camera3D,
    mode: CameraMode,
    /// Offset from the followed body to the ideal eye position (up, forward).
    offset: DVec3,
    /// Fraction of the remaining distance covered each frame (0..=1).
    lerp_factor: f64,
}

impl CameraFollow {
    pub fn new(camera: Camera3D, offset_up: f64, offset_forward: f64, lerp_factor: f64) -> Self {
        Self {
            camera,
            mode: CameraMode::Free,
            offset: DVec3::new(0.0, offset_up, offset_forward),
            lerp_factor: lerp_factor.clamp(0.0, 1.0),
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Free → Following (or retarget while Following).
    pub fn follow(&mut self, id: BodyId) {
        self.mode = CameraMode::Following(id);
    }

    /// Following → Free.
    pub fn release(&mut self) {
        self.mode = CameraMode::Free;
    }

    /// Where the eye wants to be for a body at `body_pos`.
    pub fn ideal_position(&self, body_pos: DVec3) -> DVec3 {
        body_pos + self.offset
    }

    /// Record a user-driven camera move. Ignored while Following.
    pub fn set_manual(&mut self, position: DVec3, target: DVec3) {
        match self.mode {
            CameraMode::Free => {
                self.camera.position = position;
                self.camera.target = target;
            }
            CameraMode::Following(_) => {
                log::debug!("manual camera move ignored while following");
            }
        }
    }

    /// Per-frame update. A no-op while Free.
    pub fn update(&mut self, scene: &Scene) {
        let CameraMode::Following(id) = self.mode else {
            return;
        };
        let Some(body) = scene.get(id) else {
            log::warn!("followed body {:?} missing from scene, releasing camera", id);
            self.release();
            return;
        };
        let body_pos = body.state.position;
        let ideal = self.ideal_position(body_pos);
        self.camera.position = self.camera.position.lerp(ideal, self.lerp_factor);
        self.camera.target = body_pos;
    }
}
