pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::sim::{SimConfig, SimulationState};
pub use api::types::{BodyId, PickId};
pub use assets::catalog::{BodyCatalog, CANONICAL_ORDER};
pub use components::body::{Body, BodySimState};
pub use components::descriptor::{CelestialBodyDescriptor, InfoLine};
pub use core::calendar::{format_utc, simulated_datetime};
pub use core::scale::{compress, CompressionParameter};
pub use core::scene::Scene;
pub use core::time::SimulationClock;
pub use renderer::camera::{Camera3D, CameraFollow, CameraMode, CameraView};
pub use renderer::instance::{BodyInstance, RenderBuffer};
pub use renderer::traits::{FrameData, FrameSink};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::ProtocolLayout;
pub use systems::frame::{run_frame, step};
pub use systems::selection::{PickHandler, PickTable, Selection};
pub use error::{OrreryError, Result};
