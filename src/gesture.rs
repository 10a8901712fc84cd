use crate::canvas::ItemId;
use crate::geometry::Point;

/// The press/drag/release gesture currently in progress
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    /// Where the shape starts; for freehand tools, the previous point
    pub anchor: Point,
    pub current: Point,
    /// Uncommitted primitive drawn during the last drag
    pub preview: Option<ItemId>,
}

impl Gesture {
    pub fn new(at: Point) -> Self {
        Self {
            anchor: at,
            current: at,
            preview: None,
        }
    }
}

/// Pointer gesture state machine
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    Active(Gesture),
}

impl GestureState {
    /// Starts a new gesture, returning the previous one if it was never released.
    pub fn press(&mut self, at: Point) -> Option<Gesture> {
        match std::mem::replace(self, Self::Active(Gesture::new(at))) {
            Self::Active(stale) => Some(stale),
            Self::Idle => None,
        }
    }

    /// Ends the gesture and hands it back, if one was active.
    pub fn release(&mut self) -> Option<Gesture> {
        match std::mem::take(self) {
            Self::Active(gesture) => Some(gesture),
            Self::Idle => None,
        }
    }

    pub fn active_mut(&mut self) -> Option<&mut Gesture> {
        match self {
            Self::Active(gesture) => Some(gesture),
            Self::Idle => None,
        }
    }

    pub fn active(&self) -> Option<&Gesture> {
        match self {
            Self::Active(gesture) => Some(gesture),
            Self::Idle => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Active(_) => "Active",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release_cycle() {
        let mut state = GestureState::default();
        assert_eq!(state.name(), "Idle");
        assert!(state.release().is_none());

        assert!(state.press(Point::new(1, 2)).is_none());
        assert!(state.is_active());
        let gesture = state.active().unwrap();
        assert_eq!(gesture.anchor, Point::new(1, 2));
        assert_eq!(gesture.current, Point::new(1, 2));
        assert!(gesture.preview.is_none());

        let released = state.release().unwrap();
        assert_eq!(released.anchor, Point::new(1, 2));
        assert!(!state.is_active());
    }

    #[test]
    fn test_second_press_returns_stale_gesture() {
        let mut state = GestureState::default();
        state.press(Point::new(0, 0));
        state.active_mut().unwrap().preview = Some(ItemId::next());

        let stale = state.press(Point::new(5, 5)).unwrap();
        assert!(stale.preview.is_some());
        assert_eq!(state.active().unwrap().anchor, Point::new(5, 5));
        assert!(state.active().unwrap().preview.is_none());
    }
}
