//! Frame buffer layout shared with the JS renderer.
//! Must stay in sync with TypeScript `protocol.ts`.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 16 floats]
//! [Bodies: max_bodies × 8 floats]
//! [Trails: max_trail_vertices × 2 floats]
//! ```
//!
//! Capacities are written into the header so the reader can compute
//! offsets without a second source of truth.

use crate::components::trail::TRAIL_CAP;
use crate::core::session::Simulation;
use crate::renderer::instance::{BodyInstance, RenderBuffer, TrailVertex};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_BODIES: usize = 2;
pub const HEADER_BODY_COUNT: usize = 3;
pub const HEADER_MAX_TRAIL_VERTICES: usize = 4;
pub const HEADER_TRAIL_VERTEX_COUNT: usize = 5;
pub const HEADER_ZOOM: usize = 6;
pub const HEADER_PAN_X: usize = 7;
pub const HEADER_PAN_Y: usize = 8;
pub const HEADER_VIEWPORT_W: usize = 9;
pub const HEADER_VIEWPORT_H: usize = 10;
pub const HEADER_RUNNING: usize = 11;
pub const HEADER_TRAILS_ENABLED: usize = 12;
pub const HEADER_ELAPSED: usize = 13;
pub const HEADER_WORLD_BODY_COUNT: usize = 14;
pub const HEADER_MERGE_COUNT: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum body instances per frame.
    pub max_bodies: usize,
    /// Maximum trail vertices per frame.
    pub max_trail_vertices: usize,

    /// Size of the body section in floats.
    pub body_data_floats: usize,
    /// Size of the trail section in floats.
    pub trail_data_floats: usize,

    /// Offset (in floats) where body data begins.
    pub body_data_offset: usize,
    /// Offset (in floats) where trail data begins.
    pub trail_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_bodies: usize, max_trail_vertices: usize) -> Self {
        let body_data_floats = max_bodies * BodyInstance::FLOATS;
        let trail_data_floats = max_trail_vertices * TrailVertex::FLOATS;

        let body_data_offset = HEADER_FLOATS;
        let trail_data_offset = body_data_offset + body_data_floats;

        let buffer_total_floats = trail_data_offset + trail_data_floats;

        Self {
            max_bodies,
            max_trail_vertices,
            body_data_floats,
            trail_data_floats,
            body_data_offset,
            trail_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Room for a full trail on every body.
    pub fn for_bodies(max_bodies: usize) -> Self {
        Self::new(max_bodies, max_bodies * TRAIL_CAP)
    }

    /// Matching render buffer.
    pub fn render_buffer(&self) -> RenderBuffer {
        RenderBuffer::with_capacity(self.max_bodies, self.max_trail_vertices)
    }

    /// Pack the header for the current frame.
    pub fn pack_header(
        &self,
        sim: &Simulation,
        buffer: &RenderBuffer,
        frame: u32,
    ) -> [f32; HEADER_FLOATS] {
        let camera = sim.camera();
        let mut header = [0.0f32; HEADER_FLOATS];
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_FRAME_COUNTER] = frame as f32;
        header[HEADER_MAX_BODIES] = self.max_bodies as f32;
        header[HEADER_BODY_COUNT] = buffer.instance_count() as f32;
        header[HEADER_MAX_TRAIL_VERTICES] = self.max_trail_vertices as f32;
        header[HEADER_TRAIL_VERTEX_COUNT] = buffer.trail_vertex_count() as f32;
        header[HEADER_ZOOM] = camera.zoom() as f32;
        header[HEADER_PAN_X] = camera.pan().x as f32;
        header[HEADER_PAN_Y] = camera.pan().y as f32;
        header[HEADER_VIEWPORT_W] = camera.viewport().x as f32;
        header[HEADER_VIEWPORT_H] = camera.viewport().y as f32;
        header[HEADER_RUNNING] = if sim.is_running() { 1.0 } else { 0.0 };
        header[HEADER_TRAILS_ENABLED] = if sim.trails_enabled() { 1.0 } else { 0.0 };
        header[HEADER_ELAPSED] = sim.clock().elapsed() as f32;
        header[HEADER_WORLD_BODY_COUNT] = sim.world().len() as f32;
        header[HEADER_MERGE_COUNT] = sim.world().merges().len() as f32;
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::SimConfig;
    use crate::components::archetype::Archetype;
    use glam::DVec2;

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(100, 200);
        assert_eq!(layout.body_data_offset, HEADER_FLOATS);
        assert_eq!(layout.trail_data_offset, layout.body_data_offset + 100 * 8);
        assert_eq!(layout.buffer_total_floats, layout.trail_data_offset + 200 * 2);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn for_bodies_reserves_full_trails() {
        let layout = ProtocolLayout::for_bodies(256);
        assert_eq!(layout.max_trail_vertices, 256 * TRAIL_CAP);
        assert_eq!(layout.trail_data_floats, 256 * TRAIL_CAP * 2);
    }

    #[test]
    fn header_reflects_session() {
        let mut sim = Simulation::new(SimConfig::default());
        sim.world_mut()
            .spawn(DVec2::new(400.0, 300.0), Archetype::Star, DVec2::ZERO)
            .unwrap();
        sim.play();
        sim.advance(0.016);

        let layout = ProtocolLayout::for_bodies(8);
        let mut buffer = layout.render_buffer();
        buffer.rebuild(sim.world().bodies().iter(), sim.camera(), sim.trails_enabled());
        let header = layout.pack_header(&sim, &buffer, 7);

        assert_eq!(header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(header[HEADER_FRAME_COUNTER], 7.0);
        assert_eq!(header[HEADER_MAX_BODIES], 8.0);
        assert_eq!(header[HEADER_BODY_COUNT], 1.0);
        assert_eq!(header[HEADER_WORLD_BODY_COUNT], 1.0);
        assert_eq!(header[HEADER_RUNNING], 1.0);
        assert_eq!(header[HEADER_ZOOM], 1.0);
        assert_eq!(header[HEADER_VIEWPORT_W], 800.0);
        assert!((header[HEADER_ELAPSED] - 0.016).abs() < 1e-6);
    }
}
