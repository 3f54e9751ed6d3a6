pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod scenario;

// Re-export key types at crate root for convenience
pub use api::config::SimConfig;
pub use api::error::{Result, SimError};
pub use api::types::BodyId;
pub use components::archetype::{Archetype, ArchetypeDefaults, BodyColor};
pub use components::body::{Body, BodyDesc};
pub use components::trail::{Trail, TRAIL_CAP};
pub use core::session::{RunState, Simulation};
pub use core::time::SimClock;
pub use core::world::World;
pub use systems::merge::MergeEvent;
pub use renderer::camera::{Camera, CameraView};
pub use renderer::instance::{BodyInstance, RenderBuffer, TrailVertex};
pub use renderer::snapshot::{BodyView, WorldSnapshot};
pub use input::queue::{CommandQueue, SimCommand};
pub use bridge::protocol::ProtocolLayout;
pub use scenario::presets::Preset;
