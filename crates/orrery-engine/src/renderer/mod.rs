pub mod camera;
pub mod instance;
pub mod traits;

// Re-export key types for convenient access
pub use camera::{Camera3D, CameraFollow, CameraMode, CameraView};
pub use instance::{BodyInstance, RenderBuffer};
pub use traits::{FrameData, FrameSink};
