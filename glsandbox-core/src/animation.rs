//! Frame-based sprite animations.

use glam::{UVec2, Vec4};

use crate::sprite::{FULL_UV, SpriteSheet};

type Callback = Box<dyn FnMut()>;

/// Plays a sequence of sprite sheet cells at a fixed frame duration.
pub struct Animation {
    sheet: SpriteSheet,
    frames: Vec<UVec2>,
    frame_duration: f32,
    current_time: f32,
    current_frame: usize,
    looping: bool,
    playing: bool,
    finished: bool,
    on_complete: Option<Callback>,
    on_frame_change: Option<Callback>,
}

impl Animation {
    /// Creates an empty, stopped animation over `sheet`. `frame_duration` is in
    /// seconds.
    pub fn new(sheet: SpriteSheet, frame_duration: f32, looping: bool) -> Self {
        let mut animation = Self {
            sheet,
            frames: Vec::new(),
            frame_duration: 0.0,
            current_time: 0.0,
            current_frame: 0,
            looping,
            playing: false,
            finished: false,
            on_complete: None,
            on_frame_change: None,
        };
        animation.set_frame_duration(frame_duration);
        animation
    }

    /// Appends the cell `(x, y)`. Cells outside the sheet are skipped.
    pub fn add_frame(&mut self, x: u32, y: u32) {
        if !self.sheet.contains(x, y) {
            log::error!(
                "Skipping animation frame ({x}, {y}) outside of {}x{} sheet",
                self.sheet.columns(),
                self.sheet.rows()
            );
            return;
        }
        self.frames.push(UVec2::new(x, y));
    }

    /// Appends every cell from `start` to `end` inclusive, in row-major order.
    pub fn add_frame_range(&mut self, start: UVec2, end: UVec2) {
        let columns = self.sheet.columns();
        if columns == 0 {
            log::error!("Cannot add frames from an empty sprite sheet");
            return;
        }

        let first = start.y as u64 * columns as u64 + start.x as u64;
        let last = end.y as u64 * columns as u64 + end.x as u64;
        for index in first..=last {
            let x = (index % columns as u64) as u32;
            let y = (index / columns as u64) as u32;
            if !self.sheet.contains(x, y) {
                log::error!("Frame range ends outside of the sprite sheet at ({x}, {y})");
                break;
            }
            self.frames.push(UVec2::new(x, y));
        }
    }

    /// Appends every cell of the sheet in row-major order.
    pub fn add_all_frames(&mut self) {
        for y in 0..self.sheet.rows() {
            for x in 0..self.sheet.columns() {
                self.frames.push(UVec2::new(x, y));
            }
        }
    }

    /// Advances the animation by `delta_time` seconds.
    ///
    /// Every frame stepped over counts as a frame change, except that a looping animation
    /// reports at most one full cycle per update. Negative or non-finite deltas are ignored.
    pub fn update(&mut self, delta_time: f32) {
        if !self.playing || self.frames.is_empty() {
            return;
        }
        if !delta_time.is_finite() || delta_time < 0.0 {
            log::warn!("Ignoring animation time step {delta_time}");
            return;
        }

        self.current_time += delta_time;
        if self.current_time < self.frame_duration {
            return;
        }
        let steps = (self.current_time / self.frame_duration).floor() as usize;
        self.current_time %= self.frame_duration;

        let len = self.frames.len();
        let remaining = len - 1 - self.current_frame;
        let changes = if self.looping {
            self.current_frame = (self.current_frame + steps % len) % len;
            steps.min(len)
        } else if steps <= remaining {
            self.current_frame += steps;
            steps
        } else {
            self.current_frame = len - 1;
            remaining
        };

        if let Some(callback) = self.on_frame_change.as_mut() {
            for _ in 0..changes {
                callback();
            }
        }

        if !self.looping && steps > remaining {
            self.playing = false;
            self.finished = true;
            self.current_time = 0.0;
            if let Some(callback) = self.on_complete.as_mut() {
                callback();
            }
        }
    }

    pub fn play(&mut self) {
        if self.is_finished() {
            self.reset();
        }
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Pauses and rewinds to the first frame.
    pub fn stop(&mut self) {
        self.playing = false;
        self.reset();
    }

    /// Rewinds to the first frame without changing the playing state.
    pub fn reset(&mut self) {
        self.current_frame = 0;
        self.current_time = 0.0;
        self.finished = false;
    }

    /// The UV rectangle of the current frame, or the whole texture when the
    /// animation has no frames.
    pub fn current_uv(&self) -> Vec4 {
        match self.frames.get(self.current_frame) {
            Some(frame) => self.sheet.sprite_uv(frame.x, frame.y),
            None => FULL_UV,
        }
    }

    pub fn current_frame_index(&self) -> usize {
        self.current_frame
    }

    pub fn total_frames(&self) -> usize {
        self.frames.len()
    }

    /// Sets the frame duration in seconds. Non-positive durations are raised to
    /// one millisecond.
    pub fn set_frame_duration(&mut self, frame_duration: f32) {
        if frame_duration.is_nan() || frame_duration <= 0.0 {
            log::warn!("Invalid frame duration {frame_duration}, using 0.001");
            self.frame_duration = 0.001;
        } else {
            self.frame_duration = frame_duration;
        }
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn set_on_complete(&mut self, callback: impl FnMut() + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    pub fn set_on_frame_change(&mut self, callback: impl FnMut() + 'static) {
        self.on_frame_change = Some(Box::new(callback));
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Whether a non-looping animation played through its last frame and has not been
    /// rewound since.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn sheet(&self) -> &SpriteSheet {
        &self.sheet
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    fn sheet() -> SpriteSheet {
        SpriteSheet::new(64, 32, 16, 16)
    }

    #[test]
    fn frames_outside_the_sheet_are_skipped() {
        let mut animation = Animation::new(sheet(), 0.1, true);
        animation.add_frame(0, 0);
        animation.add_frame(4, 0);
        animation.add_frame(3, 1);
        assert_eq!(animation.total_frames(), 2);
    }

    #[test]
    fn frame_range_is_row_major() {
        let mut animation = Animation::new(sheet(), 0.1, true);
        animation.add_frame_range(UVec2::new(2, 0), UVec2::new(1, 1));
        assert_eq!(animation.total_frames(), 4);

        animation.play();
        animation.update(0.25);
        assert_eq!(animation.current_frame_index(), 2);
        assert_eq!(animation.current_uv(), sheet().sprite_uv(0, 1));
    }

    #[test]
    fn looping_animation_wraps() {
        let mut animation = Animation::new(sheet(), 0.5, true);
        animation.add_all_frames();
        assert_eq!(animation.total_frames(), 8);

        animation.play();
        animation.update(4.0);
        assert_eq!(animation.current_frame_index(), 0);
        assert!(animation.is_playing());
        animation.update(1.0);
        assert_eq!(animation.current_frame_index(), 2);
    }

    #[test]
    fn one_shot_animation_completes_once() {
        let completed = Rc::new(Cell::new(0));
        let changes = Rc::new(Cell::new(0));

        let mut animation = Animation::new(sheet(), 0.5, false);
        animation.add_frame_range(UVec2::new(0, 0), UVec2::new(2, 0));
        {
            let completed = Rc::clone(&completed);
            animation.set_on_complete(move || completed.set(completed.get() + 1));
            let changes = Rc::clone(&changes);
            animation.set_on_frame_change(move || changes.set(changes.get() + 1));
        }

        animation.play();
        animation.update(10.0);
        animation.update(10.0);

        assert_eq!(completed.get(), 1);
        assert_eq!(changes.get(), 2);
        assert!(!animation.is_playing());
        assert!(animation.is_finished());
        assert_eq!(animation.current_frame_index(), 2);
    }

    #[test]
    fn paused_animation_does_not_advance() {
        let mut animation = Animation::new(sheet(), 0.1, true);
        animation.add_all_frames();
        animation.update(1.0);
        assert_eq!(animation.current_frame_index(), 0);

        animation.play();
        animation.update(0.15);
        animation.pause();
        animation.update(1.0);
        assert_eq!(animation.current_frame_index(), 1);

        animation.stop();
        assert_eq!(animation.current_frame_index(), 0);
        assert!(!animation.is_playing());
    }

    #[test]
    fn huge_time_steps_do_not_stall() {
        let mut animation = Animation::new(sheet(), 0.001, true);
        animation.add_all_frames();
        animation.play();

        animation.update(40_000.0);
        assert!(animation.current_frame_index() < 8);
        assert!(animation.is_playing());

        let frame = animation.current_frame_index();
        animation.update(f32::INFINITY);
        animation.update(f32::NAN);
        animation.update(-1.0);
        assert_eq!(animation.current_frame_index(), frame);
    }

    #[test]
    fn frame_changes_are_reported_per_step_up_to_one_cycle() {
        let changes = Rc::new(Cell::new(0));
        let mut animation = Animation::new(sheet(), 0.1, true);
        animation.add_frame_range(UVec2::new(0, 0), UVec2::new(3, 0));
        {
            let changes = Rc::clone(&changes);
            animation.set_on_frame_change(move || changes.set(changes.get() + 1));
        }
        animation.play();

        animation.update(0.95);
        assert_eq!(animation.current_frame_index(), 1);
        assert_eq!(changes.get(), 4);
    }

    #[test]
    fn single_frame_animation_is_not_finished_before_playing() {
        let mut animation = Animation::new(sheet(), 0.1, false);
        animation.add_frame(0, 0);
        assert!(!animation.is_finished());

        animation.play();
        animation.update(0.1);
        assert!(animation.is_finished());
        assert!(!animation.is_playing());

        animation.play();
        assert!(!animation.is_finished());
        assert!(animation.is_playing());
    }

    #[test]
    fn empty_animation_shows_the_full_texture() {
        let mut animation = Animation::new(sheet(), 0.1, true);
        animation.play();
        animation.update(1.0);
        assert_eq!(animation.current_uv(), FULL_UV);
    }
}
