use thiserror::Error;

/// Errors raised at the boundary of the simulation.
///
/// Numeric hazards inside a tick are clamped, never reported here.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("unknown archetype `{0}`")]
    UnknownArchetype(String),

    #[error("unknown preset `{0}`")]
    UnknownPreset(String),

    #[error("invalid body: mass {mass} and radius {radius} must be finite and positive")]
    InvalidBody { mass: f64, radius: f64 },

    #[error("world is full ({0} bodies)")]
    WorldFull(usize),

    #[error("invalid config: {0}")]
    Config(#[source] serde_json::Error),

    #[error("snapshot serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
