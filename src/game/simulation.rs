use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::debug;

use super::direction::Direction;
use super::grid::{self, Point, START};
use super::observation::Observation;
use super::snake::{Body, Segment};

/// What a reversal request does once the snake has a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReversalPolicy {
    /// Human mode: turning back on yourself loses the round.
    EndRound,
    /// Environment mode: the request is dropped and the heading is kept.
    Ignore,
}

/// Result of one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub observation: Observation,
    /// 1 when food was eaten this tick.
    pub reward: u32,
    pub lost: bool,
}

/// Something the renderer should draw, in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Food(Point),
    Head { pos: Point, dead: bool },
    Body { pos: Point, flagged: bool },
}

/// Grid snake round. Owns every entity; the renderer only reads it.
pub struct Simulation<R = SmallRng> {
    head: Point,
    direction: Direction,
    body: Body,
    food: Point,
    score: u32,
    lost: bool,
    head_dead: bool,
    previous_head: Point,
    policy: ReversalPolicy,
    rng: R,
}

impl Simulation<SmallRng> {
    pub fn new(policy: ReversalPolicy) -> Self {
        Self::with_rng(policy, SmallRng::from_entropy())
    }

    pub fn seeded(policy: ReversalPolicy, seed: u64) -> Self {
        Self::with_rng(policy, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    pub fn with_rng(policy: ReversalPolicy, mut rng: R) -> Self {
        let direction = Direction::random(&mut rng);
        let food = grid::random_cell(&mut rng);
        Self {
            head: START,
            direction,
            body: Body::new(),
            food,
            score: 0,
            lost: false,
            head_dead: false,
            previous_head: START,
            policy,
            rng,
        }
    }

    /// Starts a new round in place and returns its first observation.
    pub fn reset(&mut self) -> Observation {
        self.lost = false;
        self.score = 0;
        self.head_dead = false;
        self.body.clear();
        self.food = grid::random_cell(&mut self.rng);
        self.head = START;
        self.previous_head = START;
        self.direction = Direction::random(&mut self.rng);
        self.observation()
    }

    pub fn head(&self) -> Point {
        self.head
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn body(&self) -> &[Segment] {
        self.body.segments()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_lost(&self) -> bool {
        self.lost
    }

    pub fn policy(&self) -> ReversalPolicy {
        self.policy
    }

    pub fn previous_head_location(&self) -> Point {
        self.previous_head
    }

    /// Overrides the heading without any reversal check. Round setup only.
    pub fn face(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Moves the food. Used by scripted rounds.
    pub fn place_food(&mut self, at: Point) {
        self.food = at;
    }

    /// Applies a heading change under the round's reversal policy.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.score > 0 && direction.is_opposite(self.direction) {
            match self.policy {
                ReversalPolicy::EndRound => {
                    self.lost = true;
                    self.head_dead = true;
                    debug!(score = self.score, "round lost by reversal");
                }
                ReversalPolicy::Ignore => {}
            }
            return;
        }
        self.direction = direction;
    }

    /// One tick. `None` keeps the current heading.
    pub fn step(&mut self, action: Option<Direction>) -> StepOutcome {
        if self.lost {
            return self.outcome(0);
        }
        if let Some(direction) = action {
            self.set_direction(direction);
        }

        self.head = self.head.moved(self.direction);

        let mut reward = 0;
        if self.head == self.food {
            reward = 1;
            self.score += 1;
            self.body.grow(self.previous_head);
            // may land under the body
            self.food = grid::random_cell(&mut self.rng);
        }

        if !self.head.in_bounds() {
            self.lost = true;
        }

        if self.lost {
            self.head = self.head.moved(self.direction.opposite());
            self.head_dead = true;
            debug!(score = self.score, head = ?self.head, "round lost, head walked back");
        } else {
            if self.body.advance(self.head, self.previous_head) {
                self.lost = true;
                debug!(score = self.score, "round lost by self collision");
            }
            self.previous_head = self.head;
        }

        self.outcome(reward)
    }

    /// `step` for a raw environment action index (0 up, 1 right, 2 left, 3 down).
    pub fn step_index(&mut self, action: i64) -> crate::Result<StepOutcome> {
        let direction = Direction::from_action_index(action)?;
        Ok(self.step(Some(direction)))
    }

    pub fn observation(&self) -> Observation {
        Observation::build(self.head, self.direction, self.food, &self.body)
    }

    /// Entities in draw order: food, head, then body front to back.
    pub fn sprites(&self) -> impl Iterator<Item = Sprite> + '_ {
        let fixed = [
            Sprite::Food(self.food),
            Sprite::Head { pos: self.head, dead: self.head_dead },
        ];
        fixed.into_iter().chain(
            self.body
                .segments()
                .iter()
                .map(|s| Sprite::Body { pos: s.pos, flagged: s.flagged }),
        )
    }

    pub fn sample_action(&mut self) -> Direction {
        Direction::random(&mut self.rng)
    }

    /// Random direction whose next cell is on the board and off the body.
    pub fn sample_safe_action(&mut self) -> Direction {
        let safe: Vec<Direction> =
            Direction::ALL.into_iter().filter(|&d| !self.is_danger(d)).collect();
        if safe.is_empty() {
            return self.sample_action();
        }
        safe[self.rng.gen_range(0..safe.len())]
    }

    pub fn is_danger(&self, direction: Direction) -> bool {
        let next = self.head.moved(direction);
        !next.in_bounds() || self.body.contains(next)
    }

    fn outcome(&self, reward: u32) -> StepOutcome {
        StepOutcome { observation: self.observation(), reward, lost: self.lost }
    }

    #[cfg(test)]
    pub(crate) fn set_body(&mut self, body: Body) {
        self.score = body.len() as u32;
        self.body = body;
    }

    #[cfg(test)]
    pub(crate) fn set_head(&mut self, head: Point) {
        self.head = head;
        self.previous_head = head;
    }
}
