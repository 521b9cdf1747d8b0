use planner_core::{BBox, Point};
use serde::{Deserialize, Serialize};

/// Scale change per zoom step.
pub const ZOOM_FACTOR: f64 = 1.25;
/// Furthest zoom-out step.
pub const MIN_ZOOM_STEP: i32 = -12;
/// Furthest zoom-in step.
pub const MAX_ZOOM_STEP: i32 = 5;

/// The visible window onto the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Center X in scene coordinates.
    pub center_x: f64,
    /// Center Y in scene coordinates.
    pub center_y: f64,
    /// Zoom as a whole number of `ZOOM_FACTOR` steps from 1:1.
    pub zoom_step: i32,
    /// Canvas width in pixels.
    pub canvas_width: f64,
    /// Canvas height in pixels.
    pub canvas_height: f64,
}

impl Viewport {
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            center_x: 0.0,
            center_y: 0.0,
            zoom_step: 0,
            canvas_width,
            canvas_height,
        }
    }

    /// Screen pixels per scene pixel.
    pub fn zoom(&self) -> f64 {
        ZOOM_FACTOR.powi(self.zoom_step)
    }

    /// Pan the viewport by a delta in screen pixels.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let zoom = self.zoom();
        self.center_x -= dx / zoom;
        self.center_y -= dy / zoom;
    }

    /// Zoom by `steps` (positive zooms in) keeping the scene point under the
    /// screen position fixed. Returns false when already at the limit.
    pub fn zoom_at(&mut self, screen: Point, steps: i32) -> bool {
        let target = (self.zoom_step + steps).clamp(MIN_ZOOM_STEP, MAX_ZOOM_STEP);
        if target == self.zoom_step {
            return false;
        }

        let before = self.screen_to_scene(screen);
        self.zoom_step = target;
        let after = self.screen_to_scene(screen);
        self.center_x -= after.x - before.x;
        self.center_y -= after.y - before.y;
        log::debug!("Zoom step {}", self.zoom_step);
        true
    }

    /// Center on a box and pick the closest step that shows all of it.
    pub fn fit(&mut self, bounds: &BBox) {
        let center = bounds.center();
        self.center_x = center.x;
        self.center_y = center.y;
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return;
        }

        let wanted = (self.canvas_width / bounds.width()).min(self.canvas_height / bounds.height());
        let step = (wanted.ln() / ZOOM_FACTOR.ln()).floor() as i32;
        self.zoom_step = step.clamp(MIN_ZOOM_STEP, MAX_ZOOM_STEP);
    }

    pub fn screen_to_scene(&self, screen: Point) -> Point {
        let zoom = self.zoom();
        Point::new(
            (screen.x - self.canvas_width / 2.0) / zoom + self.center_x,
            (screen.y - self.canvas_height / 2.0) / zoom + self.center_y,
        )
    }

    pub fn scene_to_screen(&self, scene: Point) -> Point {
        let zoom = self.zoom();
        Point::new(
            (scene.x - self.center_x) * zoom + self.canvas_width / 2.0,
            (scene.y - self.center_y) * zoom + self.canvas_height / 2.0,
        )
    }

    /// The visible area in scene coordinates.
    pub fn visible_bounds(&self) -> BBox {
        let zoom = self.zoom();
        BBox::from_center(
            Point::new(self.center_x, self.center_y),
            self.canvas_width / zoom,
            self.canvas_height / zoom,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn test_screen_scene_conversion() {
        let mut vp = Viewport::new(800.0, 600.0);
        assert!(close(vp.screen_to_scene(Point::new(400.0, 300.0)), Point::new(0.0, 0.0)));

        vp.pan(100.0, -50.0);
        let scene = vp.screen_to_scene(Point::new(400.0, 300.0));
        assert!(close(scene, Point::new(-100.0, 50.0)));
        assert!(close(vp.scene_to_screen(scene), Point::new(400.0, 300.0)));
    }

    #[test]
    fn test_zoom_keeps_point_under_cursor() {
        let mut vp = Viewport::new(800.0, 600.0);
        let cursor = Point::new(650.0, 120.0);
        let before = vp.screen_to_scene(cursor);

        assert!(vp.zoom_at(cursor, 1));
        assert!((vp.zoom() - 1.25).abs() < 1e-12);
        assert!(close(vp.screen_to_scene(cursor), before));

        assert!(vp.zoom_at(cursor, -3));
        assert_eq!(vp.zoom_step, -2);
        assert!(close(vp.screen_to_scene(cursor), before));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut vp = Viewport::new(800.0, 600.0);
        let cursor = Point::new(400.0, 300.0);
        assert!(vp.zoom_at(cursor, 100));
        assert_eq!(vp.zoom_step, MAX_ZOOM_STEP);
        assert!(!vp.zoom_at(cursor, 1));

        assert!(vp.zoom_at(cursor, -100));
        assert_eq!(vp.zoom_step, MIN_ZOOM_STEP);
        assert!(!vp.zoom_at(cursor, -1));
    }

    #[test]
    fn test_visible_bounds_shrink_when_zooming_in() {
        let mut vp = Viewport::new(800.0, 600.0);
        let bounds = vp.visible_bounds();
        assert!((bounds.width() - 800.0).abs() < 1e-9);
        assert!((bounds.height() - 600.0).abs() < 1e-9);

        vp.zoom_at(Point::new(400.0, 300.0), 2);
        let zoomed = vp.visible_bounds();
        assert!((zoomed.width() - 512.0).abs() < 1e-9);
        assert!(close(zoomed.center(), bounds.center()));
    }

    #[test]
    fn test_fit_shows_whole_box() {
        let mut vp = Viewport::new(800.0, 600.0);
        let target = BBox::new(Point::new(1000.0, 1000.0), Point::new(3000.0, 2000.0));
        vp.fit(&target);

        let visible = vp.visible_bounds();
        assert!(visible.min.x <= target.min.x && visible.max.x >= target.max.x);
        assert!(visible.min.y <= target.min.y && visible.max.y >= target.max.y);
        // One step closer would crop it.
        assert!(2000.0 * vp.zoom() * ZOOM_FACTOR > 800.0);
    }
}
