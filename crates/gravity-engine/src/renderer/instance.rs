use bytemuck::{Pod, Zeroable};

use crate::components::body::Body;
use crate::renderer::camera::Camera;

/// Per-body render data in screen space, read by the JS renderer.
/// Must match the TypeScript protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    /// Screen x in pixels.
    pub x: f32,
    /// Screen y in pixels.
    pub y: f32,
    /// Screen radius in pixels.
    pub radius: f32,
    /// `Archetype::index()`.
    pub archetype: f32,
    /// 1.0 when the archetype draws a glow halo.
    pub glow: f32,
    /// First vertex of this body's trail in the trail section.
    pub trail_start: f32,
    /// Number of trail vertices (0 when trails are off).
    pub trail_len: f32,
    pub _pad: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// One trail sample in screen space.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct TrailVertex {
    pub x: f32,
    pub y: f32,
}

impl TrailVertex {
    pub const FLOATS: usize = 2;
}

/// Flat per-frame render buffers, rebuilt after each tick.
pub struct RenderBuffer {
    instances: Vec<BodyInstance>,
    trail_vertices: Vec<TrailVertex>,
    max_instances: usize,
    max_trail_vertices: usize,
}

impl RenderBuffer {
    pub fn with_capacity(max_instances: usize, max_trail_vertices: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max_instances),
            trail_vertices: Vec::with_capacity(max_trail_vertices),
            max_instances,
            max_trail_vertices,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.trail_vertices.clear();
    }

    /// Project every visible body through the camera.
    /// Off-screen bodies are culled; trails are emitted only when enabled.
    pub fn rebuild<'a>(
        &mut self,
        bodies: impl Iterator<Item = &'a Body>,
        camera: &Camera,
        trails_enabled: bool,
    ) {
        self.clear();

        for body in bodies {
            if self.instances.len() >= self.max_instances {
                log::warn!("render buffer full at {} bodies", self.max_instances);
                break;
            }
            if !camera.is_circle_visible(body.position, body.radius()) {
                continue;
            }

            let trail_start = self.trail_vertices.len();
            if trails_enabled && body.trail().len() > 1 {
                let room = self.max_trail_vertices - self.trail_vertices.len();
                for point in body.trail().iter().take(room) {
                    let s = camera.world_to_screen(*point);
                    self.trail_vertices.push(TrailVertex {
                        x: s.x as f32,
                        y: s.y as f32,
                    });
                }
            }
            let trail_len = self.trail_vertices.len() - trail_start;

            let screen = camera.world_to_screen(body.position);
            let defaults = body.archetype().defaults();
            self.instances.push(BodyInstance {
                x: screen.x as f32,
                y: screen.y as f32,
                radius: camera.scale_length(body.radius()) as f32,
                archetype: body.archetype().index() as f32,
                glow: if defaults.has_glow { 1.0 } else { 0.0 },
                trail_start: trail_start as f32,
                trail_len: trail_len as f32,
                _pad: 0.0,
            });
        }
    }

    pub fn instances(&self) -> &[BodyInstance] {
        &self.instances
    }

    pub fn trail_vertices(&self) -> &[TrailVertex] {
        &self.trail_vertices
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn trail_vertex_count(&self) -> u32 {
        self.trail_vertices.len() as u32
    }

    /// Raw pointer to instance data for linear-memory reads from JS.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn trail_vertices_ptr(&self) -> *const f32 {
        self.trail_vertices.as_ptr() as *const f32
    }

    /// Instance data as plain floats.
    pub fn instance_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn trail_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.trail_vertices)
    }
}
