use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::CELL;
use crate::error::{Result, SnakeError};

/// Heading of the snake. No diagonals.
///
/// Declaration order is the action-index order used by the network outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Left,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Left, Direction::Down];

    /// Decodes the human-mode key code (1 up, 2 right, 3 left, 4 down).
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            1 => Ok(Direction::Up),
            2 => Ok(Direction::Right),
            3 => Ok(Direction::Left),
            4 => Ok(Direction::Down),
            other => Err(SnakeError::InvalidDirection(other)),
        }
    }

    /// Human-mode key code. Opposite directions sum to 5.
    pub fn code(self) -> i64 {
        match self {
            Direction::Up => 1,
            Direction::Right => 2,
            Direction::Left => 3,
            Direction::Down => 4,
        }
    }

    /// Decodes an environment action index (0 up, 1 right, 2 left, 3 down).
    pub fn from_action_index(index: i64) -> Result<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(SnakeError::InvalidActionIndex(index))
    }

    pub fn action_index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Left => 2,
            Direction::Down => 3,
        }
    }

    /// Picks the direction with the largest network output. Ties go to the lowest index.
    pub fn from_logits(logits: &[f32]) -> Result<Self> {
        if logits.len() != Self::ALL.len() {
            return Err(SnakeError::InputLength { expected: Self::ALL.len(), actual: logits.len() });
        }
        let mut best = 0;
        for (i, &v) in logits.iter().enumerate() {
            if v > logits[best] {
                best = i;
            }
        }
        Ok(Self::ALL[best])
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Pixel offset of one cell in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -CELL),
            Direction::Down => (0, CELL),
            Direction::Left => (-CELL, 0),
            Direction::Right => (CELL, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_codes_sum_to_five() {
        for d in Direction::ALL {
            assert_eq!(d.code() + d.opposite().code(), 5);
            assert!(d.is_opposite(d.opposite()));
            assert!(!d.is_opposite(d));
        }
        assert!(!Direction::Up.is_opposite(Direction::Left));
    }

    #[test]
    fn codes_round_trip_and_reject_out_of_range() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_code(d.code()).unwrap(), d);
            assert_eq!(Direction::from_action_index(d.action_index() as i64).unwrap(), d);
        }
        assert!(matches!(Direction::from_code(0), Err(SnakeError::InvalidDirection(0))));
        assert!(matches!(Direction::from_code(5), Err(SnakeError::InvalidDirection(5))));
        assert!(matches!(Direction::from_action_index(4), Err(SnakeError::InvalidActionIndex(4))));
        assert!(matches!(Direction::from_action_index(-1), Err(SnakeError::InvalidActionIndex(-1))));
    }

    #[test]
    fn delta_moves_one_cell() {
        assert_eq!(Direction::Up.delta(), (0, -25));
        assert_eq!(Direction::Down.delta(), (0, 25));
        assert_eq!(Direction::Left.delta(), (-25, 0));
        assert_eq!(Direction::Right.delta(), (25, 0));
    }

    #[test]
    fn logits_argmax() {
        assert_eq!(Direction::from_logits(&[0.1, 0.9, -1.0, 0.3]).unwrap(), Direction::Right);
        assert_eq!(Direction::from_logits(&[0.0, 0.0, 0.0, 0.0]).unwrap(), Direction::Up);
        assert_eq!(Direction::from_logits(&[-3.0, -2.0, -4.0, -1.5]).unwrap(), Direction::Down);
        assert!(Direction::from_logits(&[1.0, 2.0]).is_err());
    }
}
