//! Competitor pool
//!
//! A fixed set of computer-controlled cars. Competitors drive toward the
//! camera (their depth decreases), accelerate gradually up to a personal speed
//! cap, and wrap back to the draw distance once they pass the camera plane.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// The two lanes competitors drive in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lane {
    Left,
    Right,
}

impl Lane {
    /// Lateral offset of the lane center (a quarter road width from the middle)
    pub fn offset(self) -> f32 {
        match self {
            Lane::Left => -ROAD_WIDTH / 4.0,
            Lane::Right => ROAD_WIDTH / 4.0,
        }
    }

    fn random(rng: &mut Pcg32) -> Self {
        if rng.random_bool(0.5) {
            Lane::Left
        } else {
            Lane::Right
        }
    }
}

/// A single competitor car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competitor {
    pub lane: Lane,
    /// Distance ahead of the camera
    pub depth: f32,
    pub speed: f32,
    /// Drawn once at creation, kept across resets
    pub max_speed: f32,
    /// Set once the player has overtaken this car; cleared on wrap
    pub passed: bool,
}

impl Competitor {
    /// Lateral offset of this car
    #[inline]
    pub fn x(&self) -> f32 {
        self.lane.offset()
    }
}

/// Starting-grid depth for the competitor at `index`
#[inline]
pub fn grid_depth(index: usize) -> f32 {
    DRAW_DISTANCE + index as f32 * COMPETITOR_GRID_SPACING
}

/// Fixed-size pool of competitors and the RNG that drives their lanes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorPool {
    competitors: Vec<Competitor>,
    rng: Pcg32,
}

impl CompetitorPool {
    /// Create `count` competitors on a staggered starting grid
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let competitors = (0..count)
            .map(|i| Competitor {
                lane: Lane::random(&mut rng),
                depth: grid_depth(i),
                speed: 0.0,
                max_speed: rng.random_range(COMPETITOR_MIN_SPEED..COMPETITOR_MAX_SPEED),
                passed: false,
            })
            .collect();

        Self { competitors, rng }
    }

    pub fn competitors(&self) -> &[Competitor] {
        &self.competitors
    }

    pub fn competitors_mut(&mut self) -> &mut [Competitor] {
        &mut self.competitors
    }

    pub fn len(&self) -> usize {
        self.competitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.competitors.is_empty()
    }

    /// Advance every competitor by one tick
    ///
    /// Nothing moves until the race has started. Returns how many competitors
    /// wrapped back to the draw distance this tick. Speed is carried across a
    /// wrap. The last acceleration step may overshoot the cap by less than
    /// `COMPETITOR_ACCELERATION`.
    pub fn update(&mut self, race_started: bool) -> usize {
        if !race_started {
            return 0;
        }

        let mut wrapped = 0;
        for (i, car) in self.competitors.iter_mut().enumerate() {
            if car.speed < car.max_speed {
                car.speed += COMPETITOR_ACCELERATION;
            }
            car.depth -= car.speed;

            if car.depth < 0.0 {
                car.depth = DRAW_DISTANCE;
                car.lane = Lane::random(&mut self.rng);
                car.passed = false;
                wrapped += 1;
                log::trace!("Competitor {} wrapped into {:?} lane", i, car.lane);
            }
        }
        wrapped
    }

    /// Send a competitor back to the draw distance in a fresh lane
    ///
    /// Used after a collision. Speed and the passed flag are left as they are.
    pub fn relocate(&mut self, index: usize) {
        let lane = Lane::random(&mut self.rng);
        if let Some(car) = self.competitors.get_mut(index) {
            car.depth = DRAW_DISTANCE;
            car.lane = lane;
        }
    }

    /// Put every competitor back on the starting grid, stationary and unpassed
    pub fn reset_all(&mut self) {
        for (i, car) in self.competitors.iter_mut().enumerate() {
            car.depth = grid_depth(i);
            car.speed = 0.0;
            car.passed = false;
        }
    }
}
