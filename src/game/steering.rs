use std::sync::{Arc, Mutex, MutexGuard};

use log::trace;

use super::direction::Direction;

#[derive(Debug)]
struct SteeringState {
    direction: Direction,
    /// A turn was accepted since the last tick
    turned: bool,
}

/// Heading shared between the input handler and the simulation loop.
///
/// The input side proposes turns, the loop reads the heading once per tick.
/// At most one turn is accepted between two ticks, and never a reversal.
#[derive(Debug, Clone)]
pub struct Steering {
    inner: Arc<Mutex<SteeringState>>,
}

impl Default for Steering {
    fn default() -> Self {
        Self::new(Direction::Right)
    }
}

impl Steering {
    pub fn new(direction: Direction) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SteeringState {
                direction,
                turned: false,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SteeringState> {
        // two plain fields, nothing can be left half-written
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Try to turn towards `candidate`; returns whether the turn was taken
    pub fn propose(&self, candidate: Direction) -> bool {
        let mut state = self.lock();
        if state.turned || state.direction.is_opposite(candidate) {
            trace!("turn to {candidate:?} rejected");
            return false;
        }

        state.direction = candidate;
        state.turned = true;
        true
    }

    /// Heading for the tick about to run; allows one new turn afterwards
    pub fn next_tick(&self) -> Direction {
        let mut state = self.lock();
        state.turned = false;
        state.direction
    }

    pub fn current(&self) -> Direction {
        self.lock().direction
    }

    /// Back to heading right with no pending turn
    pub fn reset(&self) {
        let mut state = self.lock();
        state.direction = Direction::Right;
        state.turned = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_reversal_rejected() {
        let steering = Steering::default();
        assert!(!steering.propose(Direction::Left));
        assert_eq!(steering.current(), Direction::Right);
    }

    #[test]
    fn test_first_turn_per_tick_wins() {
        let steering = Steering::default();
        assert!(steering.propose(Direction::Up));
        assert!(!steering.propose(Direction::Left));
        assert!(!steering.propose(Direction::Down));
        assert_eq!(steering.next_tick(), Direction::Up);

        assert!(steering.propose(Direction::Left));
        assert_eq!(steering.next_tick(), Direction::Left);
    }

    #[test]
    fn test_rejected_turn_does_not_block() {
        let steering = Steering::default();
        assert!(!steering.propose(Direction::Left));
        assert!(steering.propose(Direction::Down));
    }

    #[test]
    fn test_same_direction_counts_as_turn() {
        let steering = Steering::default();
        assert!(steering.propose(Direction::Right));
        assert!(!steering.propose(Direction::Up));
    }

    #[test]
    fn test_reset() {
        let steering = Steering::new(Direction::Up);
        steering.propose(Direction::Left);
        steering.reset();
        assert_eq!(steering.current(), Direction::Right);
        assert!(steering.propose(Direction::Down));
    }

    #[test]
    fn test_clones_share_heading() {
        let steering = Steering::default();
        let input_side = steering.clone();

        thread::spawn(move || {
            input_side.propose(Direction::Down);
        })
        .join()
        .unwrap();

        assert_eq!(steering.next_tick(), Direction::Down);
    }
}
