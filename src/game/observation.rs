use super::direction::Direction;
use super::grid::{MAX_COORD, Point};
use super::snake::Body;

/// Width of the observation vector; the first layer of a playback network.
pub const OBSERVATION_LEN: usize = 12;

const CENTER: f32 = 238.5;
const HALF_SPAN: f32 = 237.5;

/// Network input built from the round state.
///
/// Layout: heading one-hot (up, down, left, right), head x/y centred on the
/// board, then food, tail and body-centre offsets from the head. Offsets are
/// scaled by the board extent; missing body parts read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Observation(pub [f32; OBSERVATION_LEN]);

impl Observation {
    pub fn build(head: Point, heading: Direction, food: Point, body: &Body) -> Self {
        let mut v = [0.0; OBSERVATION_LEN];
        let slot = match heading {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        };
        v[slot] = 1.0;
        v[4] = (head.x as f32 - CENTER) / HALF_SPAN;
        v[5] = (head.y as f32 - CENTER) / HALF_SPAN;
        [v[6], v[7]] = offset(head, food);

        let segments = body.segments();
        if let Some(tail) = segments.last() {
            [v[8], v[9]] = offset(head, tail.pos);
            [v[10], v[11]] = offset(head, segments[segments.len() / 2].pos);
        }
        Self(v)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

fn offset(from: Point, to: Point) -> [f32; 2] {
    let scale = MAX_COORD as f32;
    [(to.x - from.x) as f32 / scale, (to.y - from.y) as f32 / scale]
}
