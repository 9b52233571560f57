use super::CameraState;
use crate::settings::ControlSettings;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Input as seen by one tick: what is held right now and how far the pointer
/// travelled (in screen pixels) since the previous tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    pub primary_held: bool,
    pub secondary_held: bool,
    pub pointer_delta: [f32; 2],
    pub zoom_in_held: bool,
    pub zoom_out_held: bool,
}

impl CameraState {
    /// Runs one tick of the interaction rules. Every rule is independent; all
    /// that fire are applied in the same tick. Returns true when the host
    /// window has to be moved to `window_position`.
    pub fn apply(&mut self, input: &InputFrame, controls: &ControlSettings) -> bool {
        let [dx, dy] = input.pointer_delta;
        let has_delta = dx != 0.0 || dy != 0.0;

        if input.primary_held && has_delta {
            self.rotate_yaw(dx * controls.rotate_sensitivity);
        }

        let mut window_moved = false;
        if input.secondary_held && has_delta {
            let (mx, my) = (dx as i32, dy as i32);
            if mx != 0 || my != 0 {
                self.move_window(mx, my);
                window_moved = true;
            }
        }

        if input.zoom_in_held {
            self.zoom_by(controls.zoom_step, controls.min_zoom, controls.max_zoom);
        }
        if input.zoom_out_held {
            self.zoom_by(-controls.zoom_step, controls.min_zoom, controls.max_zoom);
        }

        window_moved
    }
}

/// Folds winit events into held/delta state and hands out one `InputFrame`
/// per tick.
pub struct CameraController {
    state: CameraState,
    controls: ControlSettings,
    left_mouse_pressed: bool,
    right_mouse_pressed: bool,
    numpad_add_pressed: bool,
    equal_pressed: bool,
    numpad_subtract_pressed: bool,
    minus_pressed: bool,
    last_pointer: Option<(f64, f64)>,
    pending_delta: (f64, f64),
    /// Where the OS last reported the window. Lags `window_position` until a
    /// requested move has been applied.
    window_origin: [i32; 2],
}

impl CameraController {
    pub fn new(state: CameraState, controls: ControlSettings) -> Self {
        let window_origin = state.window_position;
        Self {
            state,
            controls,
            left_mouse_pressed: false,
            right_mouse_pressed: false,
            numpad_add_pressed: false,
            equal_pressed: false,
            numpad_subtract_pressed: false,
            minus_pressed: false,
            last_pointer: None,
            pending_delta: (0.0, 0.0),
            window_origin,
        }
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn on_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.left_mouse_pressed = pressed,
            MouseButton::Right => self.right_mouse_pressed = pressed,
            _ => {}
        }
    }

    /// `position` is relative to the window as the OS currently places it. It is
    /// turned into screen space so that moving the window under a still pointer
    /// does not read as motion.
    pub fn on_cursor_moved(&mut self, position: (f64, f64)) {
        let [wx, wy] = self.window_origin;
        let screen = (position.0 + wx as f64, position.1 + wy as f64);

        if let Some(last) = self.last_pointer {
            self.pending_delta.0 += screen.0 - last.0;
            self.pending_delta.1 += screen.1 - last.1;
        }
        self.last_pointer = Some(screen);
    }

    pub fn on_window_moved(&mut self, position: [i32; 2]) {
        self.window_origin = position;
    }

    pub fn on_cursor_left(&mut self) {
        self.last_pointer = None;
    }

    pub fn on_key(&mut self, key: KeyCode, pressed: bool) {
        match key {
            KeyCode::NumpadAdd => self.numpad_add_pressed = pressed,
            KeyCode::Equal => self.equal_pressed = pressed,
            KeyCode::NumpadSubtract => self.numpad_subtract_pressed = pressed,
            KeyCode::Minus => self.minus_pressed = pressed,
            _ => {}
        }
    }

    /// Snapshot for this tick. Drains the accumulated pointer delta, keeping the
    /// sub-pixel remainder of a window drag for the next tick.
    pub fn take_frame(&mut self) -> InputFrame {
        let (dx, dy) = self.pending_delta;
        self.pending_delta = if self.right_mouse_pressed {
            (dx.fract(), dy.fract())
        } else {
            (0.0, 0.0)
        };

        InputFrame {
            primary_held: self.left_mouse_pressed,
            secondary_held: self.right_mouse_pressed,
            pointer_delta: if self.right_mouse_pressed {
                [dx.trunc() as f32, dy.trunc() as f32]
            } else {
                [dx as f32, dy as f32]
            },
            zoom_in_held: self.numpad_add_pressed || self.equal_pressed,
            zoom_out_held: self.numpad_subtract_pressed || self.minus_pressed,
        }
    }

    /// One interaction tick. Returns the new window position when it changed.
    pub fn tick(&mut self) -> Option<[i32; 2]> {
        let frame = self.take_frame();
        if self.state.apply(&frame, &self.controls) {
            log::debug!("Window moved to {:?}", self.state.window_position);
            Some(self.state.window_position)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls() -> ControlSettings {
        ControlSettings::default()
    }

    #[test]
    fn zoom_in_saturates_at_five() {
        let mut state = CameraState::default();
        let input = InputFrame {
            zoom_in_held: true,
            ..Default::default()
        };
        for _ in 0..300 {
            state.apply(&input, &controls());
        }
        assert_eq!(state.zoom, 5.0);
    }

    #[test]
    fn zoom_stays_in_range_for_mixed_sequences() {
        let mut state = CameraState::default();
        let pattern = [(true, false), (false, true), (true, true), (false, true)];
        for i in 0..2000 {
            let (zoom_in_held, zoom_out_held) = if i % 500 < 250 {
                (true, false)
            } else {
                pattern[i % pattern.len()]
            };
            let input = InputFrame {
                zoom_in_held,
                zoom_out_held,
                ..Default::default()
            };
            state.apply(&input, &controls());
            assert!((1.0..=5.0).contains(&state.zoom), "zoom {}", state.zoom);
        }
    }

    #[test]
    fn both_zoom_keys_cancel_out() {
        let mut state = CameraState::default();
        state.zoom = 2.0;
        let input = InputFrame {
            zoom_in_held: true,
            zoom_out_held: true,
            ..Default::default()
        };
        state.apply(&input, &controls());
        assert!((state.zoom - 2.0).abs() < 1e-6);
    }

    #[test]
    fn primary_drag_spins_yaw_only() {
        let mut state = CameraState::default();
        let input = InputFrame {
            primary_held: true,
            pointer_delta: [25.0, -40.0],
            ..Default::default()
        };
        let moved = state.apply(&input, &controls());
        assert!(!moved);
        assert!((state.rotation.yaw - 0.25).abs() < 1e-6);
        assert_eq!(state.rotation.pitch, 0.0);
        assert_eq!(state.window_position, [0, 0]);
    }

    #[test]
    fn secondary_drag_moves_window_not_globe() {
        let mut state = CameraState::new([100, 100]);
        let input = InputFrame {
            secondary_held: true,
            pointer_delta: [7.0, -3.0],
            ..Default::default()
        };
        assert!(state.apply(&input, &controls()));
        assert_eq!(state.window_position, [107, 97]);
        assert_eq!(state.rotation, Default::default());
    }

    #[test]
    fn idle_frame_changes_nothing() {
        let mut state = CameraState::new([5, 5]);
        state.zoom = 3.0;
        let before = state.clone();
        let held_without_motion = InputFrame {
            primary_held: true,
            secondary_held: true,
            ..Default::default()
        };
        assert!(!state.apply(&InputFrame::default(), &controls()));
        assert!(!state.apply(&held_without_motion, &controls()));
        assert_eq!(state, before);
    }

    #[test]
    fn controller_accumulates_motion_between_ticks() {
        let mut controller = CameraController::new(CameraState::default(), controls());
        controller.on_mouse_button(MouseButton::Left, true);
        controller.on_cursor_moved((10.0, 10.0));
        controller.on_cursor_moved((15.0, 12.0));
        controller.on_cursor_moved((30.0, 8.0));
        assert_eq!(controller.tick(), None);
        assert!((controller.state().rotation.yaw - 0.2).abs() < 1e-6);

        // Delta was drained.
        controller.tick();
        assert!((controller.state().rotation.yaw - 0.2).abs() < 1e-6);
    }

    #[test]
    fn controller_reports_window_moves_in_screen_space() {
        let mut controller = CameraController::new(CameraState::new([100, 100]), controls());
        controller.on_mouse_button(MouseButton::Right, true);
        controller.on_cursor_moved((50.0, 50.0));
        controller.on_cursor_moved((60.0, 45.0));
        assert_eq!(controller.tick(), Some([110, 95]));

        // The window followed a still pointer, so the window-relative position
        // snaps back. That is not new motion.
        controller.on_window_moved([110, 95]);
        controller.on_cursor_moved((50.0, 50.0));
        assert_eq!(controller.tick(), None);
    }

    #[test]
    fn late_window_move_does_not_overshoot() {
        let mut controller = CameraController::new(CameraState::new([100, 100]), controls());
        controller.on_mouse_button(MouseButton::Right, true);
        controller.on_cursor_moved((50.0, 50.0));
        controller.on_cursor_moved((60.0, 50.0));
        assert_eq!(controller.tick(), Some([110, 100]));

        // The OS has not applied the move yet; this event is still relative
        // to the old origin.
        controller.on_cursor_moved((65.0, 50.0));
        assert_eq!(controller.tick(), Some([115, 100]));

        controller.on_window_moved([110, 100]);
        controller.on_cursor_moved((55.0, 50.0));
        assert_eq!(controller.tick(), None);

        controller.on_window_moved([115, 100]);
        controller.on_cursor_moved((50.0, 50.0));
        assert_eq!(controller.tick(), None);
        assert_eq!(controller.state().window_position, [115, 100]);
    }

    #[test]
    fn zoom_keys_are_tracked_until_released() {
        let mut controller = CameraController::new(CameraState::default(), controls());
        controller.on_key(KeyCode::Equal, true);
        controller.tick();
        controller.tick();
        assert!((controller.state().zoom - 1.04).abs() < 1e-6);

        controller.on_key(KeyCode::Equal, false);
        controller.tick();
        assert!((controller.state().zoom - 1.04).abs() < 1e-6);

        controller.on_key(KeyCode::KeyA, true);
        controller.tick();
        assert!((controller.state().zoom - 1.04).abs() < 1e-6);
    }
}
