use rand::Rng;

use super::direction::Direction;

/// Side of one grid cell in pixels.
pub const CELL: i32 = 25;
/// Side of a drawn sprite; one pixel smaller than the cell so grid lines show.
pub const SPRITE: u32 = 24;
/// Board extent in pixels (square).
pub const BOARD: u32 = 501;
/// Largest coordinate still on the board.
pub const MAX_COORD: i32 = 500;
/// Number of cells along one axis.
pub const CELLS_PER_SIDE: i32 = 20;
/// Where the head starts each round.
pub const START: Point = Point::new(226, 226);

/// Top-left pixel coordinate of a sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn moved(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn in_bounds(self) -> bool {
        (0..=MAX_COORD).contains(&self.x) && (0..=MAX_COORD).contains(&self.y)
    }
}

/// Uniform cell coordinate: one of 1, 26, 51, ..., 476.
pub fn random_grid_num<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    rng.gen_range(0..CELLS_PER_SIDE) * CELL + 1
}

pub fn random_cell<R: Rng + ?Sized>(rng: &mut R) -> Point {
    let x = random_grid_num(rng);
    let y = random_grid_num(rng);
    Point::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn grid_numbers_are_cell_aligned() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..500 {
            let n = random_grid_num(&mut rng);
            assert!((1..=476).contains(&n));
            assert_eq!((n - 1) % CELL, 0);
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(Point::new(0, 500).in_bounds());
        assert!(Point::new(476, 1).in_bounds());
        assert!(!Point::new(501, 1).in_bounds());
        assert!(!Point::new(1, -24).in_bounds());
    }
}
