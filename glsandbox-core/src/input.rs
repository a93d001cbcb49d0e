//! Mouse input tracking.
//!
//! The window layer feeds raw cursor and scroll events into a [`MouseInput`]
//! owned by the main loop; consumers read per-frame deltas from it.

use glam::{DVec2, Vec2};

/// Default multiplier applied to scroll offsets.
pub const SCROLL_SPEED: f64 = 2.0;

/// Per-frame mouse state.
#[derive(Clone, Debug, PartialEq)]
pub struct MouseInput {
    position: DVec2,
    last_position: DVec2,
    delta: DVec2,
    scroll: DVec2,
    scroll_delta: DVec2,
    scroll_speed: f64,
    first_move: bool,
}

impl MouseInput {
    /// Creates the state for a window of the given size, with the cursor at its
    /// centre.
    pub fn new(width: u32, height: u32) -> Self {
        let mut input = Self {
            position: DVec2::ZERO,
            last_position: DVec2::ZERO,
            delta: DVec2::ZERO,
            scroll: DVec2::ZERO,
            scroll_delta: DVec2::ZERO,
            scroll_speed: SCROLL_SPEED,
            first_move: true,
        };
        input.reset(width, height);
        input
    }

    /// Re-centres the cursor and arms the first-move latch so the next cursor
    /// event does not produce a jump.
    pub fn reset(&mut self, width: u32, height: u32) {
        self.position = DVec2::new(width as f64 / 2.0, height as f64 / 2.0);
        self.last_position = self.position;
        self.delta = DVec2::ZERO;
        self.scroll = DVec2::ZERO;
        self.scroll_delta = DVec2::ZERO;
        self.scroll_speed = SCROLL_SPEED;
        self.first_move = true;
    }

    /// Records an absolute cursor position.
    ///
    /// The vertical delta is inverted so moving the cursor up is positive.
    pub fn cursor_moved(&mut self, x: f64, y: f64) {
        if self.first_move {
            self.last_position = DVec2::new(x, y);
            self.first_move = false;
            return;
        }

        self.position = DVec2::new(x, y);
        self.delta += DVec2::new(x - self.last_position.x, self.last_position.y - y);
        self.last_position = self.position;
    }

    /// Records a relative motion, as reported while the cursor is captured.
    pub fn cursor_moved_by(&mut self, dx: f64, dy: f64) {
        self.position += DVec2::new(dx, dy);
        self.last_position = self.position;
        self.delta += DVec2::new(dx, -dy);
        self.first_move = false;
    }

    /// Records a scroll offset. Offsets of one frame add up.
    pub fn scrolled(&mut self, x: f64, y: f64) {
        self.scroll_delta += DVec2::new(x, y) * self.scroll_speed;
        self.scroll += DVec2::new(x, y);
    }

    /// Clears the per-frame deltas. Call once at the end of every frame.
    pub fn end_frame(&mut self) {
        self.delta = DVec2::ZERO;
        self.scroll_delta = DVec2::ZERO;
    }

    pub fn set_scroll_speed(&mut self, scroll_speed: f64) {
        self.scroll_speed = scroll_speed;
    }

    pub fn position(&self) -> Vec2 {
        self.position.as_vec2()
    }

    pub fn delta(&self) -> Vec2 {
        self.delta.as_vec2()
    }

    pub fn scroll(&self) -> Vec2 {
        self.scroll.as_vec2()
    }

    pub fn scroll_delta(&self) -> Vec2 {
        self.scroll_delta.as_vec2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_move_only_latches() {
        let mut mouse = MouseInput::new(800, 600);
        assert_eq!(mouse.position(), Vec2::new(400.0, 300.0));

        mouse.cursor_moved(10.0, 10.0);
        assert_eq!(mouse.delta(), Vec2::ZERO);

        mouse.cursor_moved(15.0, 4.0);
        assert_eq!(mouse.delta(), Vec2::new(5.0, 6.0));
        assert_eq!(mouse.position(), Vec2::new(15.0, 4.0));
    }

    #[test]
    fn deltas_accumulate_until_end_of_frame() {
        let mut mouse = MouseInput::new(100, 100);
        mouse.cursor_moved(50.0, 50.0);
        mouse.cursor_moved(52.0, 50.0);
        mouse.cursor_moved(55.0, 49.0);
        assert_eq!(mouse.delta(), Vec2::new(5.0, 1.0));

        mouse.end_frame();
        assert_eq!(mouse.delta(), Vec2::ZERO);
    }

    #[test]
    fn relative_motion_inverts_vertical_axis() {
        let mut mouse = MouseInput::new(100, 100);
        mouse.cursor_moved_by(3.0, 4.0);
        assert_eq!(mouse.delta(), Vec2::new(3.0, -4.0));
        assert_eq!(mouse.position(), Vec2::new(53.0, 54.0));
    }

    #[test]
    fn scroll_is_scaled_and_accumulated_per_frame() {
        let mut mouse = MouseInput::new(100, 100);
        mouse.scrolled(0.0, 1.0);
        mouse.scrolled(0.0, 1.5);
        assert_eq!(mouse.scroll_delta(), Vec2::new(0.0, 5.0));
        assert_eq!(mouse.scroll(), Vec2::new(0.0, 2.5));

        mouse.end_frame();
        assert_eq!(mouse.scroll_delta(), Vec2::ZERO);
        assert_eq!(mouse.scroll(), Vec2::new(0.0, 2.5));
    }

    #[test]
    fn reset_rearms_first_move() {
        let mut mouse = MouseInput::new(100, 100);
        mouse.cursor_moved(1.0, 1.0);
        mouse.cursor_moved(2.0, 2.0);
        mouse.reset(200, 100);
        assert_eq!(mouse.delta(), Vec2::ZERO);
        assert_eq!(mouse.position(), Vec2::new(100.0, 50.0));
        mouse.cursor_moved(500.0, 500.0);
        assert_eq!(mouse.delta(), Vec2::ZERO);
    }
}
