use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::ui::controls::ControlPad;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit offset of one step in this direction, y growing downwards.
    #[must_use]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level input events consumed by the session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Control {
    Turn(Direction),
    /// Space/Enter: start, pause, resume or restart depending on the phase.
    PauseOrRestart,
    /// Explicit pause key; only toggles between running and paused.
    Pause,
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Maps one terminal key event to a control, ignoring key releases.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<Control> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Control::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Some(Control::Turn(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Some(Control::Turn(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(Control::Turn(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Some(Control::Turn(Direction::Right)),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Control::PauseOrRestart),
        KeyCode::Char('p' | 'P') => Some(Control::Pause),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(Control::Quit),
        _ => None,
    }
}

/// Turns a press-then-drag pointer gesture into a direction.
///
/// The start point is consumed by the first move, so one gesture yields at
/// most one direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeTracker {
    start: Option<(i32, i32)>,
}

impl SwipeTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the point where the gesture began.
    pub fn begin(&mut self, column: u16, row: u16) {
        self.start = Some((i32::from(column), i32::from(row)));
    }

    /// Resolves the gesture against the next pointer position.
    pub fn moved(&mut self, column: u16, row: u16) -> Option<Direction> {
        let (start_x, start_y) = self.start.take()?;
        swipe_direction(i32::from(column) - start_x, i32::from(row) - start_y)
    }

    /// Drops any gesture in progress.
    pub fn cancel(&mut self) {
        self.start = None;
    }

    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }
}

/// Pointer handling: pad buttons first, swipes otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerInput {
    swipe: SwipeTracker,
    detected: bool,
}

impl PointerInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True once any pointer event has been seen; the on-screen pad is only
    /// offered from then on.
    #[must_use]
    pub fn detected(&self) -> bool {
        self.detected
    }

    /// Resolves one mouse event into a direction, if it completes one.
    pub fn handle(&mut self, event: MouseEvent, pad: Option<&ControlPad>) -> Option<Direction> {
        self.detected = true;

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(direction) = pad.and_then(|pad| pad.hit(event.column, event.row)) {
                    self.swipe.cancel();
                    return Some(direction);
                }
                self.swipe.begin(event.column, event.row);
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => self.swipe.moved(event.column, event.row),
            MouseEventKind::Up(_) => {
                self.swipe.cancel();
                None
            }
            _ => None,
        }
    }
}

/// Picks the direction of the dominant displacement axis.
#[must_use]
pub fn swipe_direction(delta_x: i32, delta_y: i32) -> Option<Direction> {
    if delta_x.abs() > delta_y.abs() {
        return Some(if delta_x > 0 {
            Direction::Right
        } else {
            Direction::Left
        });
    }

    match delta_y.signum() {
        1 => Some(Direction::Down),
        -1 => Some(Direction::Up),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{
        KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    };
    use ratatui::layout::Rect;

    use crate::ui::controls::ControlPad;

    use super::{
        Control, Direction, PointerInput, SwipeTracker, direction_change_is_valid, map_key,
        swipe_direction,
    };

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn direction_change_rejects_reverse() {
        assert!(!direction_change_is_valid(Direction::Up, Direction::Down));
        assert!(!direction_change_is_valid(
            Direction::Right,
            Direction::Left
        ));

        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Right, Direction::Up));
        assert!(direction_change_is_valid(
            Direction::Right,
            Direction::Right
        ));
    }

    #[test]
    fn arrows_and_wasd_map_to_turns() {
        assert_eq!(
            map_key(press(KeyCode::Up)),
            Some(Control::Turn(Direction::Up))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('a'))),
            Some(Control::Turn(Direction::Left))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('D'))),
            Some(Control::Turn(Direction::Right))
        );
        assert_eq!(
            map_key(press(KeyCode::Down)),
            Some(Control::Turn(Direction::Down))
        );
    }

    #[test]
    fn space_enter_pause_and_quit_keys() {
        assert_eq!(
            map_key(press(KeyCode::Char(' '))),
            Some(Control::PauseOrRestart)
        );
        assert_eq!(map_key(press(KeyCode::Enter)), Some(Control::PauseOrRestart));
        assert_eq!(map_key(press(KeyCode::Char('p'))), Some(Control::Pause));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(Control::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Control::Quit)
        );
        assert_eq!(map_key(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        assert_eq!(map_key(release), None);
    }

    #[test]
    fn swipe_uses_dominant_axis_and_sign() {
        assert_eq!(swipe_direction(5, 2), Some(Direction::Right));
        assert_eq!(swipe_direction(-5, 4), Some(Direction::Left));
        assert_eq!(swipe_direction(1, 3), Some(Direction::Down));
        assert_eq!(swipe_direction(-2, -3), Some(Direction::Up));
        // Ties go to the vertical axis.
        assert_eq!(swipe_direction(2, -2), Some(Direction::Up));
        assert_eq!(swipe_direction(0, 0), None);
    }

    #[test]
    fn swipe_start_is_consumed_by_first_move() {
        let mut swipe = SwipeTracker::new();

        swipe.begin(0, 0);
        assert!(swipe.is_tracking());
        assert_eq!(swipe.moved(6, 1), Some(Direction::Right));
        assert!(!swipe.is_tracking());
        assert_eq!(swipe.moved(0, 9), None);
    }

    #[test]
    fn cancelled_swipe_yields_nothing() {
        let mut swipe = SwipeTracker::new();

        swipe.begin(10, 10);
        swipe.cancel();

        assert_eq!(swipe.moved(10, 2), None);
    }

    #[test]
    fn pointer_press_and_drag_swipes() {
        let mut pointer = PointerInput::new();
        assert!(!pointer.detected());

        let down = mouse(MouseEventKind::Down(MouseButton::Left), 10, 10);
        assert_eq!(pointer.handle(down, None), None);
        assert!(pointer.detected());

        let drag = mouse(MouseEventKind::Drag(MouseButton::Left), 10, 4);
        assert_eq!(pointer.handle(drag, None), Some(Direction::Up));

        // The gesture is spent; further drags do nothing until a new press.
        let drag = mouse(MouseEventKind::Drag(MouseButton::Left), 20, 4);
        assert_eq!(pointer.handle(drag, None), None);
    }

    #[test]
    fn release_cancels_pending_swipe() {
        let mut pointer = PointerInput::new();

        pointer.handle(mouse(MouseEventKind::Down(MouseButton::Left), 5, 5), None);
        pointer.handle(mouse(MouseEventKind::Up(MouseButton::Left), 5, 5), None);

        let drag = mouse(MouseEventKind::Drag(MouseButton::Left), 15, 5);
        assert_eq!(pointer.handle(drag, None), None);
    }

    #[test]
    fn pad_press_turns_without_starting_a_swipe() {
        let pad = ControlPad::new(Rect::new(0, 20, 40, 3));
        let mut pointer = PointerInput::new();

        let press_right = mouse(MouseEventKind::Down(MouseButton::Left), 26, 21);
        assert_eq!(pointer.handle(press_right, Some(&pad)), Some(Direction::Right));

        let drag = mouse(MouseEventKind::Drag(MouseButton::Left), 26, 2);
        assert_eq!(pointer.handle(drag, Some(&pad)), None);
    }
}
