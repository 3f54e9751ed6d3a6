use crate::components::archetype::Archetype;
use crate::scenario::presets::Preset;

/// Control commands the session understands.
/// Pointer coordinates are in screen pixels; the session maps them through
/// the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimCommand {
    Play,
    Pause,
    TogglePlay,
    /// Remove every body, restore the default view and stop.
    Reset,
    /// Look at the centroid of all bodies at zoom 1.
    CenterView,
    SetGravity(f64),
    SetSpeed(f64),
    SetTrails(bool),
    /// Drag the view by a screen-space delta.
    Pan { dx: f64, dy: f64 },
    /// Zoom by `factor` around the screen point (x, y).
    ZoomAt { x: f64, y: f64, factor: f64 },
    Resize { width: f64, height: f64 },
    /// Spawn at screen point (x, y) with a world-space velocity.
    Spawn {
        x: f64,
        y: f64,
        archetype: Archetype,
        vx: f64,
        vy: f64,
    },
    LoadPreset(Preset),
}

/// A queue of control commands.
/// JS pushes commands between frames; the runner drains them before each tick.
pub struct CommandQueue {
    commands: Vec<SimCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, command: SimCommand) {
        self.commands.push(command);
    }

    /// Drain all pending commands in arrival order.
    pub fn drain(&mut self) -> Vec<SimCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimCommand> {
        self.commands.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}
