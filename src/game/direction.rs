use serde::{Deserialize, Serialize};

/// Scancodes of the arrow keys as reported by SDL-style hosts
pub const SCANCODE_RIGHT: u16 = 79;
pub const SCANCODE_LEFT: u16 = 80;
pub const SCANCODE_DOWN: u16 = 81;
pub const SCANCODE_UP: u16 = 82;

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    #[default]
    Right,
    Down,
    Left,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Map a raw arrow-key scancode to a direction.
    ///
    /// Anything that is not an arrow key yields `None` so callers can treat
    /// it as a no-op instead of a turn.
    pub fn from_scancode(code: u16) -> Option<Direction> {
        match code {
            SCANCODE_RIGHT => Some(Direction::Right),
            SCANCODE_LEFT => Some(Direction::Left),
            SCANCODE_DOWN => Some(Direction::Down),
            SCANCODE_UP => Some(Direction::Up),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Right));
    }

    #[test]
    fn test_opposite_is_never_self() {
        for dir in ALL {
            assert!(dir.is_opposite(dir.opposite()));
            assert!(!dir.is_opposite(dir));
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, 1));
        assert_eq!(Direction::Down.delta(), (0, -1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_scancodes() {
        assert_eq!(Direction::from_scancode(79), Some(Direction::Right));
        assert_eq!(Direction::from_scancode(80), Some(Direction::Left));
        assert_eq!(Direction::from_scancode(81), Some(Direction::Down));
        assert_eq!(Direction::from_scancode(82), Some(Direction::Up));
    }

    #[test]
    fn test_unmapped_scancode_is_noop() {
        assert_eq!(Direction::from_scancode(0), None);
        assert_eq!(Direction::from_scancode(40), None);
        assert_eq!(Direction::from_scancode(83), None);
    }
}
