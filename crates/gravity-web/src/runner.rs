use gravity_engine::bridge::protocol::HEADER_FLOATS;
use gravity_engine::{
    CommandQueue, ProtocolLayout, RenderBuffer, Result, SimCommand, SimConfig, Simulation,
};

/// Wires a `Simulation` to the browser frame loop.
///
/// The web crate keeps one runner in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]`; JS pushes commands between frames and
/// reads the flat buffers after each tick.
pub struct SimRunner {
    sim: Simulation,
    commands: CommandQueue,
    render_buffer: RenderBuffer,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    frame: u32,
}

impl SimRunner {
    pub fn new(config: SimConfig) -> Self {
        let layout = ProtocolLayout::for_bodies(config.max_bodies);
        let render_buffer = layout.render_buffer();
        let mut runner = Self {
            sim: Simulation::new(config),
            commands: CommandQueue::new(),
            render_buffer,
            layout,
            header: [0.0; HEADER_FLOATS],
            frame: 0,
        };
        runner.rebuild();
        runner
    }

    /// Queue a command for the next tick.
    pub fn push_command(&mut self, command: SimCommand) {
        self.commands.push(command);
    }

    /// Apply a command right away, outside the frame loop. Commands queued
    /// before it are applied first so arrival order is kept.
    pub fn apply_now(&mut self, command: SimCommand) -> Result<()> {
        self.flush_commands();
        let result = self.sim.apply_command(command);
        self.rebuild();
        result
    }

    fn flush_commands(&mut self) {
        for command in self.commands.drain() {
            if let Err(err) = self.sim.apply_command(command) {
                log::warn!("{command:?} rejected: {err}");
            }
        }
    }

    /// Run one frame: apply queued commands, advance, rebuild buffers.
    pub fn tick(&mut self, frame_dt: f64) {
        self.flush_commands();
        self.sim.advance(frame_dt);
        self.frame = self.frame.wrapping_add(1);
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.render_buffer.rebuild(
            self.sim.world().bodies().iter(),
            self.sim.camera(),
            self.sim.trails_enabled(),
        );
        self.header = self
            .layout
            .pack_header(&self.sim, &self.render_buffer, self.frame);
    }

    pub fn sim(&self) -> &Simulation {
        &self.sim
    }

    pub fn snapshot_json(&self) -> Result<String> {
        self.sim.snapshot().to_json()
    }

    // ---- Buffer accessors for linear-memory reads ----

    pub fn header(&self) -> &[f32] {
        &self.header
    }

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn trail_vertices_ptr(&self) -> *const f32 {
        self.render_buffer.trail_vertices_ptr()
    }

    pub fn trail_vertex_count(&self) -> u32 {
        self.render_buffer.trail_vertex_count()
    }

    // ---- Capacity accessors ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_bodies as u32
    }

    pub fn max_trail_vertices(&self) -> u32 {
        self.layout.max_trail_vertices as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravity_engine::bridge::protocol::{
        HEADER_BODY_COUNT, HEADER_FRAME_COUNTER, HEADER_RUNNING, HEADER_WORLD_BODY_COUNT,
    };
    use gravity_engine::{Archetype, Preset};

    #[test]
    fn tick_applies_queued_commands_in_order() {
        let mut runner = SimRunner::new(SimConfig::default());
        runner.push_command(SimCommand::LoadPreset(Preset::Solar));
        runner.push_command(SimCommand::Pause);
        runner.tick(0.016);

        assert_eq!(runner.sim().world().len(), 6);
        assert!(!runner.sim().is_running());
        assert_eq!(runner.sim().clock().ticks(), 0);
        assert_eq!(runner.header()[HEADER_FRAME_COUNTER], 1.0);
        assert_eq!(runner.header()[HEADER_WORLD_BODY_COUNT], 6.0);
    }

    #[test]
    fn rejected_command_does_not_stop_the_frame() {
        let config = SimConfig { max_bodies: 1, ..SimConfig::default() };
        let mut runner = SimRunner::new(config);
        let spawn = SimCommand::Spawn {
            x: 400.0,
            y: 300.0,
            archetype: Archetype::Rocky,
            vx: 5.0,
            vy: 0.0,
        };
        runner.push_command(spawn);
        runner.push_command(spawn);
        runner.push_command(SimCommand::Play);
        runner.tick(0.016);

        assert_eq!(runner.sim().world().len(), 1);
        assert!(runner.sim().is_running());
        assert_eq!(runner.sim().clock().ticks(), 1);
        assert_eq!(runner.header()[HEADER_RUNNING], 1.0);
        assert_eq!(runner.header()[HEADER_BODY_COUNT], 1.0);
        assert_eq!(runner.instance_count(), 1);
    }

    #[test]
    fn apply_now_refreshes_buffers() {
        let mut runner = SimRunner::new(SimConfig::default());
        runner.apply_now(SimCommand::LoadPreset(Preset::Binary)).unwrap();
        assert_eq!(runner.header()[HEADER_WORLD_BODY_COUNT], 5.0);
        assert!(runner.snapshot_json().unwrap().contains("\"running\":true"));
    }

    #[test]
    fn apply_now_keeps_arrival_order() {
        let mut runner = SimRunner::new(SimConfig::default());
        runner.push_command(SimCommand::Reset);
        runner.apply_now(SimCommand::LoadPreset(Preset::Solar)).unwrap();
        runner.tick(0.016);

        assert_eq!(runner.sim().world().len(), 6);
        assert!(runner.sim().is_running());
        assert_eq!(runner.sim().clock().ticks(), 1);
    }

    #[test]
    fn capacities_follow_config() {
        let config = SimConfig { max_bodies: 10, ..SimConfig::default() };
        let runner = SimRunner::new(config);
        assert_eq!(runner.max_instances(), 10);
        assert_eq!(runner.max_trail_vertices(), 10 * 150);
        assert_eq!(runner.buffer_total_floats(), (16 + 10 * 8 + 1500 * 2) as u32);
    }
}
