use glam::DVec2;
use serde::Serialize;

pub const DEFAULT_ZOOM_MIN: f64 = 0.1;
pub const DEFAULT_ZOOM_MAX: f64 = 5.0;
/// Screen-space margin kept around the viewport before a body is culled.
pub const CULL_PADDING: f64 = 100.0;

/// Pan/zoom camera mapping world space to screen pixels.
///
/// `pan` is the world point shown at the viewport centre. Screen space has
/// its origin at the top-left corner of the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pan: DVec2,
    zoom: f64,
    zoom_min: f64,
    zoom_max: f64,
    viewport: DVec2,
}

/// Read-only camera state for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraView {
    pub pan: DVec2,
    pub zoom: f64,
    pub zoom_min: f64,
    pub zoom_max: f64,
    pub viewport: DVec2,
}

impl Camera {
    /// Camera at zoom 1 with the world origin at the top-left corner.
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        let viewport = DVec2::new(viewport_width, viewport_height);
        Self {
            pan: viewport / 2.0,
            zoom: 1.0,
            zoom_min: DEFAULT_ZOOM_MIN,
            zoom_max: DEFAULT_ZOOM_MAX,
            viewport,
        }
    }

    /// Set the zoom bounds. Reversed bounds are swapped; the current zoom is
    /// re-clamped.
    pub fn with_zoom_limits(mut self, zoom_min: f64, zoom_max: f64) -> Self {
        let (lo, hi) = if zoom_min <= zoom_max {
            (zoom_min, zoom_max)
        } else {
            (zoom_max, zoom_min)
        };
        self.zoom_min = lo.max(f64::MIN_POSITIVE);
        self.zoom_max = hi.max(self.zoom_min);
        self.zoom = self.clamp_zoom(self.zoom);
        self
    }

    pub fn pan(&self) -> DVec2 {
        self.pan
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.zoom_min, self.zoom_max)
    }

    pub fn viewport(&self) -> DVec2 {
        self.viewport
    }

    pub fn viewport_center(&self) -> DVec2 {
        self.viewport / 2.0
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.zoom_min, self.zoom_max)
    }

    // -- Transform --

    pub fn world_to_screen(&self, world: DVec2) -> DVec2 {
        (world - self.pan) * self.zoom + self.viewport_center()
    }

    pub fn screen_to_world(&self, screen: DVec2) -> DVec2 {
        (screen - self.viewport_center()) / self.zoom + self.pan
    }

    /// World length to screen length.
    pub fn scale_length(&self, length: f64) -> f64 {
        length * self.zoom
    }

    // -- Controls --

    /// Multiply zoom by `factor` while keeping the world point under
    /// `screen` fixed on screen. Non-finite or non-positive factors are
    /// ignored.
    pub fn zoom_at(&mut self, screen: DVec2, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            log::warn!("ignoring zoom factor {factor}");
            return;
        }
        let anchor = self.screen_to_world(screen);
        self.zoom = self.clamp_zoom(self.zoom * factor);
        self.pan = anchor - (screen - self.viewport_center()) / self.zoom;
    }

    /// Set zoom around the viewport centre.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_nan() {
            return;
        }
        self.zoom = self.clamp_zoom(zoom);
    }

    /// Drag the view by a screen-space delta; content follows the pointer.
    pub fn pan_by(&mut self, delta_screen: DVec2) {
        self.pan -= delta_screen / self.zoom;
    }

    /// Centre the view on a world point.
    pub fn look_at(&mut self, target: DVec2) {
        self.pan = target;
    }

    /// New viewport size. Pan is re-centred on the new viewport so the world
    /// origin sits at the top-left corner again; zoom is kept.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = DVec2::new(width.max(0.0), height.max(0.0));
        self.pan = self.viewport_center();
    }

    /// Back to zoom 1 with the world origin at the top-left corner.
    pub fn reset(&mut self) {
        self.pan = self.viewport_center();
        self.zoom = self.clamp_zoom(1.0);
    }

    // -- Culling --

    /// Whether a world-space disc lands within the padded viewport.
    pub fn is_circle_visible(&self, center: DVec2, radius: f64) -> bool {
        let screen = self.world_to_screen(center);
        let r = self.scale_length(radius) + CULL_PADDING;
        screen.x + r >= 0.0
            && screen.x - r <= self.viewport.x
            && screen.y + r >= 0.0
            && screen.y - r <= self.viewport.y
    }

    pub fn view(&self) -> CameraView {
        CameraView {
            pan: self.pan,
            zoom: self.zoom,
            zoom_min: self.zoom_min,
            zoom_max: self.zoom_max,
            viewport: self.viewport,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}
