use super::grid::Point;

/// One unit of body length. Remembers the cell it vacated on its last move
/// so the next segment can follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub pos: Point,
    pub last: Point,
    /// Drawn in the "dead" colour after a self-collision.
    pub flagged: bool,
}

impl Segment {
    pub fn at(pos: Point) -> Self {
        Self { pos, last: pos, flagged: false }
    }
}

/// Ordered body, index 0 nearest the head.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    segments: Vec<Segment>,
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn contains(&self, p: Point) -> bool {
        self.segments.iter().any(|s| s.pos == p)
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Appends a segment stacked on the tail, or on `fallback` when the body
    /// is empty. The next `advance` moves it into place.
    pub fn grow(&mut self, fallback: Point) {
        let pos = self.segments.last().map_or(fallback, |s| s.pos);
        self.segments.push(Segment::at(pos));
    }

    /// Follow-the-leader shift. Segment 0 takes `previous_head`, segment i
    /// takes segment i-1's pre-move cell.
    ///
    /// Returns true when `head` sits on a segment (index >= 1) before it
    /// moves. The segment after the hit one is flagged, or the hit one if it
    /// is the tail.
    pub fn advance(&mut self, head: Point, previous_head: Point) -> bool {
        let n = self.segments.len();
        let Some(first) = self.segments.first_mut() else {
            return false;
        };
        let vacated = first.pos;
        first.pos = previous_head;
        // a lone segment records the new head as its last cell
        first.last = if n == 1 { head } else { vacated };

        let mut collided = false;
        for i in 1..n {
            if self.segments[i].pos == head {
                collided = true;
                let flag = if i + 1 >= n { i } else { i + 1 };
                self.segments[flag].flagged = true;
            }
            let vacated = self.segments[i].pos;
            self.segments[i].pos = self.segments[i - 1].last;
            self.segments[i].last = vacated;
        }
        collided
    }

    #[cfg(test)]
    pub(crate) fn from_positions(positions: &[Point]) -> Self {
        let segments = positions.iter().map(|&p| Segment::at(p)).collect();
        Self { segments }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn first_segment_takes_previous_head() {
        let mut body = Body::new();
        body.grow(p(226, 226));
        let hit = body.advance(p(226, 251), p(226, 226));
        assert!(!hit);
        assert_eq!(body.segments()[0].pos, p(226, 226));
        assert_eq!(body.segments()[0].last, p(226, 251));
    }

    #[test]
    fn segments_follow_their_leader() {
        let mut body = Body::from_positions(&[p(201, 226), p(176, 226), p(151, 226)]);
        // head went from (226,226) to (251,226)
        let hit = body.advance(p(251, 226), p(226, 226));
        assert!(!hit);
        let positions: Vec<_> = body.segments().iter().map(|s| s.pos).collect();
        assert_eq!(positions, vec![p(226, 226), p(201, 226), p(176, 226)]);
        assert_eq!(body.segments()[2].last, p(151, 226));
    }

    #[test]
    fn grown_segment_lands_on_old_tail_cell() {
        let mut body = Body::from_positions(&[p(201, 226), p(176, 226)]);
        body.grow(p(0, 0));
        assert_eq!(body.segments()[2].pos, p(176, 226));
        body.advance(p(251, 226), p(226, 226));
        let positions: Vec<_> = body.segments().iter().map(|s| s.pos).collect();
        assert_eq!(positions, vec![p(226, 226), p(201, 226), p(176, 226)]);
    }

    #[test]
    fn collision_flags_following_segment() {
        let mut body = Body::from_positions(&[p(26, 1), p(26, 26), p(1, 26), p(1, 51)]);
        let hit = body.advance(p(26, 26), p(1, 1));
        assert!(hit);
        assert!(body.segments()[2].flagged);
        assert!(!body.segments()[1].flagged);
    }

    #[test]
    fn collision_on_tail_flags_tail() {
        let mut body = Body::from_positions(&[p(26, 1), p(26, 26), p(1, 26)]);
        let hit = body.advance(p(1, 26), p(1, 1));
        assert!(hit);
        assert!(body.segments()[2].flagged);
    }
}
