//! Shared frame buffer layout.
//! Must stay in sync with TypeScript `protocol.ts`.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 16 floats]
//! [Instances: max_bodies × 8 floats]
//! ```
//!
//! `max_bodies` is written into the header every frame so the renderer can
//! compute offsets without a separate handshake.

use crate::api::sim::SimConfig;
use crate::renderer::camera::CameraView;
use crate::renderer::instance::BodyInstance;
use crate::renderer::traits::FrameData;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_MAX_BODIES: usize = 1;
pub const HEADER_BODY_COUNT: usize = 2;
pub const HEADER_FLAGS: usize = 3;
/// Selected body id, or -1.
pub const HEADER_SELECTED: usize = 4;
pub const HEADER_PROTOCOL_VERSION: usize = 5;
pub const HEADER_TIME_FACTOR: usize = 6;
/// Start of the 8-float `CameraView` (eye, target, fov, aspect).
/// Index 7 is unused so the camera block starts on an 8-float boundary.
pub const HEADER_CAMERA: usize = 8;

/// Header flag bits.
pub const FLAG_SHOW_ORBITS: u32 = 1;
pub const FLAG_SHOW_LABELS: u32 = 2;
pub const FLAG_FOLLOWING: u32 = 4;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per body instance (wire format, never changes).
pub const INSTANCE_FLOATS: usize = BodyInstance::FLOATS;

#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum bodies per frame.
    pub max_bodies: usize,
    /// Size of instance data section in floats.
    pub instance_data_floats: usize,
    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_bodies: usize) -> Self {
        let instance_data_floats = max_bodies * INSTANCE_FLOATS;
        let instance_data_offset = HEADER_FLOATS;
        let buffer_total_floats = instance_data_offset + instance_data_floats;
        Self {
            max_bodies,
            instance_data_floats,
            instance_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.max_bodies)
    }

    /// Pack a frame into `out`, which must be `buffer_total_floats` long.
    /// Bodies beyond `max_bodies` are dropped. Returns the bodies written.
    pub fn write_frame(&self, out: &mut [f32], frame: &FrameData<'_>) -> usize {
        debug_assert_eq!(out.len(), self.buffer_total_floats);

        let count = frame.instances.len().min(self.max_bodies);
        if count < frame.instances.len() {
            log::warn!(
                "frame has {} bodies, buffer holds {}; extra bodies dropped",
                frame.instances.len(),
                self.max_bodies,
            );
        }

        let mut flags = 0;
        if frame.show_orbits {
            flags |= FLAG_SHOW_ORBITS;
        }
        if frame.show_labels {
            flags |= FLAG_SHOW_LABELS;
        }
        if frame.following {
            flags |= FLAG_FOLLOWING;
        }

        let header = &mut out[..HEADER_FLOATS];
        header.fill(0.0);
        header[HEADER_FRAME_COUNTER] = frame.frame as f32;
        header[HEADER_MAX_BODIES] = self.max_bodies as f32;
        header[HEADER_BODY_COUNT] = count as f32;
        header[HEADER_FLAGS] = flags as f32;
        header[HEADER_SELECTED] = frame.selected.map_or(-1.0, |id| id.0 as f32);
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_TIME_FACTOR] = frame.time_factor as f32;
        header[HEADER_CAMERA..HEADER_CAMERA + CameraView::FLOATS]
            .copy_from_slice(bytemuck::cast_slice(std::slice::from_ref(&frame.camera)));

        let start = self.instance_data_offset;
        let floats: &[f32] = bytemuck::cast_slice(&frame.instances[..count]);
        out[start..start + floats.len()].copy_from_slice(floats);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::BodyId;

    fn frame<'a>(instances: &'a [BodyInstance]) -> FrameData<'a> {
        FrameData {
            frame: 42,
            time_factor: 0.5,
            instances,
            camera: CameraView {
                eye: [1.0, 2.0, 3.0],
                target: [4.0, 5.0, 6.0],
                fov_y: 0.75,
                aspect: 1.5,
            },
            following: true,
            selected: Some(BodyId(3)),
            show_orbits: true,
            show_labels: false,
            sim_datetime: "2000-01-01 12:00:00 UTC",
        }
    }

    #[test]
    fn default_config_layout() {
        let layout = ProtocolLayout::from_config(&SimConfig::default());
        assert_eq!(layout.max_bodies, 16);
        assert_eq!(layout.instance_data_offset, HEADER_FLOATS);
        assert_eq!(layout.buffer_total_floats, 16 + 16 * 8);
        assert_eq!(layout.buffer_total_bytes, (16 + 16 * 8) * 4);
    }

    #[test]
    fn camera_block_fits_header() {
        assert!(HEADER_CAMERA + CameraView::FLOATS <= HEADER_FLOATS);
        assert_eq!(std::mem::size_of::<CameraView>(), CameraView::FLOATS * 4);
    }

    #[test]
    fn header_and_instances_are_packed() {
        let layout = ProtocolLayout::new(4);
        let mut out = vec![9.0; layout.buffer_total_floats];
        let instances = [
            BodyInstance { x: 1.0, ..Default::default() },
            BodyInstance { x: 2.0, pick_id: 1.0, ..Default::default() },
        ];
        let written = layout.write_frame(&mut out, &frame(&instances));

        assert_eq!(written, 2);
        assert_eq!(out[HEADER_FRAME_COUNTER], 42.0);
        assert_eq!(out[HEADER_MAX_BODIES], 4.0);
        assert_eq!(out[HEADER_BODY_COUNT], 2.0);
        assert_eq!(out[HEADER_FLAGS] as u32, FLAG_SHOW_ORBITS | FLAG_FOLLOWING);
        assert_eq!(out[HEADER_SELECTED], 3.0);
        assert_eq!(out[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(out[HEADER_TIME_FACTOR], 0.5);
        assert_eq!(out[7], 0.0);
        assert_eq!(&out[HEADER_CAMERA..HEADER_CAMERA + 8], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 0.75, 1.5]);

        let base = layout.instance_data_offset;
        assert_eq!(out[base], 1.0);
        assert_eq!(out[base + INSTANCE_FLOATS], 2.0);
        assert_eq!(out[base + INSTANCE_FLOATS + 6], 1.0);
    }

    #[test]
    fn no_selection_is_minus_one() {
        let layout = ProtocolLayout::new(2);
        let mut out = vec![0.0; layout.buffer_total_floats];
        let mut f = frame(&[]);
        f.selected = None;
        layout.write_frame(&mut out, &f);
        assert_eq!(out[HEADER_SELECTED], -1.0);
        assert_eq!(out[HEADER_BODY_COUNT], 0.0);
    }

    #[test]
    fn overflow_is_truncated() {
        let layout = ProtocolLayout::new(1);
        let mut out = vec![0.0; layout.buffer_total_floats];
        let instances = [BodyInstance::default(); 3];
        assert_eq!(layout.write_frame(&mut out, &frame(&instances)), 1);
        assert_eq!(out[HEADER_BODY_COUNT], 1.0);
    }
}
