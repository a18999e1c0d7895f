use bytemuck::{Pod, Zeroable};

use crate::components::body::Body;

/// Per-body render data for the external renderer.
/// Wire format: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    /// Display-space position.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Spin about the Y axis in radians, reduced to [0, 2π).
    pub rotation: f32,
    /// Compressed radius.
    pub radius: f32,
    /// Compressed orbit radius (0 for the central body).
    pub orbit_radius: f32,
    /// `PickId` the renderer reports on hit, as f32.
    pub pick_id: f32,
    /// Bit flags, see `FLAG_*`.
    pub flags: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub const FLAG_SELECTED: u32 = 1;
    pub const FLAG_CENTRAL: u32 = 2;

    pub fn from_body(body: &Body, selected: bool) -> Self {
        let s = &body.state;
        let mut flags = 0;
        if selected {
            flags |= Self::FLAG_SELECTED;
        }
        if body.descriptor.is_central() {
            flags |= Self::FLAG_CENTRAL;
        }
        Self {
            x: s.position.x as f32,
            y: s.position.y as f32,
            z: s.position.z as f32,
            rotation: s.rotation_angle.rem_euclid(std::f64::consts::TAU) as f32,
            radius: s.display_radius as f32,
            orbit_radius: s.display_distance as f32,
            pick_id: body.id.0 as f32,
            flags: flags as f32,
        }
    }
}

/// Body instances for one frame, in scene order.
pub struct RenderBuffer {
    pub instances: Vec<BodyInstance>,
}

impl RenderBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: BodyInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Instance data as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::with_capacity(16)
    }
}
