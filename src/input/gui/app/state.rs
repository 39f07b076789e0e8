use crate::controllers::interactive::PointerButton;
use crate::core::data::point::Point;

/// Controller call decoded from raw window pointer events.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PointerGesture {
    Down { pixel: Point, button: PointerButton },
    Drag { pixel: Point },
    /// Press and release without motion in between.
    Click { pixel: Point, button: PointerButton },
    Release,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Press {
    button: PointerButton,
    pixel: Point,
    moved: bool,
}

pub struct GuiAppState {
    cursor: Option<Point>,
    press: Option<Press>,
    pub redraw_pending: bool,
    /// Cleared when a render fails so a failing view is not re-requested
    /// in a loop; set again by the next user interaction.
    pub retry_stale: bool,
}

impl Default for GuiAppState {
    fn default() -> Self {
        Self {
            cursor: None,
            press: None,
            redraw_pending: true,
            retry_stale: true,
        }
    }
}

impl GuiAppState {
    pub fn cursor_moved(&mut self, pixel: Point) -> Option<PointerGesture> {
        self.cursor = Some(pixel);

        let press = self.press.as_mut()?;
        if !press.moved && press.pixel == pixel {
            return None;
        }

        press.moved = true;
        self.retry_stale = true;

        Some(PointerGesture::Drag { pixel })
    }

    pub fn cursor_left(&mut self) {
        self.cursor = None;
    }

    /// Only one button is tracked at a time; presses of a second button
    /// during a gesture are ignored.
    pub fn button_pressed(&mut self, button: PointerButton) -> Option<PointerGesture> {
        if self.press.is_some() {
            return None;
        }

        let pixel = self.cursor?;
        self.press = Some(Press {
            button,
            pixel,
            moved: false,
        });

        Some(PointerGesture::Down { pixel, button })
    }

    pub fn button_released(&mut self, button: PointerButton) -> Option<PointerGesture> {
        let press = self.press.filter(|press| press.button == button)?;
        self.press = None;
        self.retry_stale = true;

        if press.moved {
            Some(PointerGesture::Release)
        } else {
            Some(PointerGesture::Click {
                pixel: press.pixel,
                button,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_at(x: i32, y: i32) -> GuiAppState {
        let mut state = GuiAppState::default();
        state.cursor_moved(Point::new(x, y));
        state
    }

    #[test]
    fn test_press_without_cursor_is_ignored() {
        let mut state = GuiAppState::default();

        assert_eq!(state.button_pressed(PointerButton::Primary), None);
        assert_eq!(state.button_released(PointerButton::Primary), None);
    }

    #[test]
    fn test_press_and_release_in_place_is_click() {
        let mut state = state_at(12, 34);

        assert_eq!(
            state.button_pressed(PointerButton::Secondary),
            Some(PointerGesture::Down {
                pixel: Point::new(12, 34),
                button: PointerButton::Secondary
            })
        );
        assert_eq!(
            state.button_released(PointerButton::Secondary),
            Some(PointerGesture::Click {
                pixel: Point::new(12, 34),
                button: PointerButton::Secondary
            })
        );
    }

    #[test]
    fn test_motion_while_pressed_is_drag_then_release() {
        let mut state = state_at(0, 0);

        state.button_pressed(PointerButton::Primary);
        assert_eq!(
            state.cursor_moved(Point::new(5, -3)),
            Some(PointerGesture::Drag {
                pixel: Point::new(5, -3)
            })
        );
        // Returning to the press position is still a drag.
        assert_eq!(
            state.cursor_moved(Point::new(0, 0)),
            Some(PointerGesture::Drag {
                pixel: Point::new(0, 0)
            })
        );
        assert_eq!(
            state.button_released(PointerButton::Primary),
            Some(PointerGesture::Release)
        );
    }

    #[test]
    fn test_motion_without_press_only_tracks_cursor() {
        let mut state = GuiAppState::default();

        assert_eq!(state.cursor_moved(Point::new(3, 4)), None);
        assert_eq!(
            state.button_pressed(PointerButton::Primary),
            Some(PointerGesture::Down {
                pixel: Point::new(3, 4),
                button: PointerButton::Primary
            })
        );
        state.button_released(PointerButton::Primary);

        state.cursor_left();
        assert_eq!(state.button_pressed(PointerButton::Primary), None);
    }

    #[test]
    fn test_second_button_during_gesture_is_ignored() {
        let mut state = state_at(1, 1);

        state.button_pressed(PointerButton::Primary);

        assert_eq!(state.button_pressed(PointerButton::Secondary), None);
        assert_eq!(state.button_released(PointerButton::Secondary), None);
        assert!(matches!(
            state.button_released(PointerButton::Primary),
            Some(PointerGesture::Click { .. })
        ));
    }

    #[test]
    fn test_interaction_re_enables_stale_retry() {
        let mut state = state_at(1, 1);
        state.retry_stale = false;

        state.button_pressed(PointerButton::Primary);
        state.button_released(PointerButton::Primary);

        assert!(state.retry_stale);
    }
}
