// Segmented directional growth, shared by the stem and every root.
//
// A growable extends one fixed-length segment at a time. The direction of
// each new segment blends three influences sampled at the current tip
// (gravity, sun, random jitter) and is clamped against the previous
// direction so growth curves instead of kinking.

use serde::{Deserialize, Serialize};

use crate::random::Mulberry32;
use crate::vec2::Vec2;
use crate::world::Surroundings;

/// Per-axis weight pair for one directional signal.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Influence {
    pub x: f64,
    pub y: f64,
}

/// Construction parameters for a growable; fixed for its whole lifetime.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GrowthHabit {
    pub segment_max: usize,
    pub segment_size: f64,
    pub change_angle_max_deg: f64,
    pub sun_influence: Influence,
    pub gravity_influence: Influence,
    pub jitter_influence: Influence,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

/// Anchor point and direction for a new organ branching off a growable.
#[derive(Clone, Copy, Debug)]
pub struct Bud {
    pub position: Vec2,
    pub direction: Vec2,
}

pub struct Growable {
    start_position: Vec2,
    segment_max: usize,
    segment_size: f64,
    change_angle_max: f64,
    sun_influence: Influence,
    gravity_influence: Influence,
    jitter_influence: Influence,
    segments: Vec<Segment>,
    // Absent until the first segment establishes a direction.
    last_direction: Option<Vec2>,
}

impl Growable {
    pub fn new(start_position: Vec2, habit: &GrowthHabit) -> Self {
        Self {
            start_position,
            segment_max: habit.segment_max,
            segment_size: habit.segment_size,
            change_angle_max: habit.change_angle_max_deg.to_radians(),
            sun_influence: habit.sun_influence,
            gravity_influence: habit.gravity_influence,
            jitter_influence: habit.jitter_influence,
            segments: Vec::new(),
            last_direction: None,
        }
    }

    pub fn is_fully_grown(&self) -> bool {
        self.segments.len() >= self.segment_max
    }

    /// Appends one segment at the tip; permanently a no-op once the segment
    /// budget is spent.
    pub fn grow(&mut self, surroundings: &Surroundings, rng: &mut Mulberry32) {
        if self.is_fully_grown() {
            return;
        }

        let tip = self.end_position();
        let mut direction = Vec2::sum(&[
            self.gravity_component(surroundings),
            self.sun_component(tip, surroundings),
            self.jitter_component(rng),
        ])
        .normalized();

        if let Some(previous) = self.last_direction {
            direction = Vec2::clamp_vector_angle(previous, direction, self.change_angle_max);
        }
        self.last_direction = Some(direction);

        let end = tip + direction.scale(self.segment_size);
        self.segments.push(Segment { start: tip, end });
    }

    /// Candidate anchor for a branching organ: the tip, pointing away from
    /// the growth axis by `angle_deg`. None until a direction exists.
    pub fn auxiliary_bud(&self, angle_deg: f64) -> Option<Bud> {
        let last_direction = self.last_direction?;
        Some(Bud {
            position: self.end_position(),
            direction: Vec2::at_angle(last_direction, angle_deg.to_radians()),
        })
    }

    pub fn end_position(&self) -> Vec2 {
        match self.segments.last() {
            Some(segment) => segment.end,
            None => self.start_position,
        }
    }

    /// Fraction of the segment budget already grown, in [0, 1].
    pub fn normalized_length(&self) -> f64 {
        self.segments.len() as f64 / self.segment_max as f64
    }

    pub fn length(&self) -> f64 {
        self.segments.len() as f64 * self.segment_size
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    fn gravity_component(&self, surroundings: &Surroundings) -> Vec2 {
        Vec2::new(
            surroundings.gravity.x * self.gravity_influence.x,
            surroundings.gravity.y * self.gravity_influence.y,
        )
    }

    fn sun_component(&self, tip: Vec2, surroundings: &Surroundings) -> Vec2 {
        let sun_ray = surroundings.normalized_sun_ray_to(tip);
        Vec2::new(
            sun_ray.x * self.sun_influence.x,
            sun_ray.y * self.sun_influence.y,
        )
    }

    // Random unit vector scaled by the jitter weights. Draw order (x
    // magnitude, x sign, y magnitude, y sign) is part of the replay
    // contract; weights of zero consume no draws at all.
    fn jitter_component(&self, rng: &mut Mulberry32) -> Vec2 {
        if self.jitter_influence.x == 0.0 && self.jitter_influence.y == 0.0 {
            return Vec2::ZERO;
        }

        let x_magnitude = rng.int(1, 100);
        let x_sign = if rng.int(0, 100) >= 50 { -1 } else { 1 };
        let y_magnitude = rng.int(1, 100);
        let y_sign = if rng.int(0, 100) >= 50 { -1 } else { 1 };
        let jitter = Vec2::new(
            (x_sign * x_magnitude) as f64,
            (y_sign * y_magnitude) as f64,
        )
        .normalized();

        Vec2::new(
            jitter.x * self.jitter_influence.x,
            jitter.y * self.jitter_influence.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_habit(segment_max: usize) -> GrowthHabit {
        GrowthHabit {
            segment_max,
            segment_size: 2.0,
            change_angle_max_deg: 90.0,
            sun_influence: Influence { x: 0.0, y: 0.0 },
            gravity_influence: Influence { x: 0.0, y: -1.0 },
            jitter_influence: Influence { x: 0.0, y: 0.0 },
        }
    }

    fn surroundings() -> Surroundings {
        Surroundings {
            sun_position: Vec2::new(400.0, 600.0),
            gravity: Vec2::new(0.0, -1.0),
            ground_y: 150.0,
        }
    }

    #[test]
    fn segment_count_is_capped_and_growth_stops_for_good() {
        let mut growable = Growable::new(Vec2::new(400.0, 150.0), &quiet_habit(3));
        let mut rng = Mulberry32::new(1);
        let surroundings = surroundings();

        for _ in 0..3 {
            assert!(!growable.is_fully_grown());
            growable.grow(&surroundings, &mut rng);
        }
        assert_eq!(growable.segments().len(), 3);
        assert!(growable.is_fully_grown());

        growable.grow(&surroundings, &mut rng);
        assert_eq!(growable.segments().len(), 3);
    }

    #[test]
    fn gravity_weights_steer_the_first_segment() {
        // Gravity (0,-1) against a (0,-1) weight pair pushes straight up.
        let mut growable = Growable::new(Vec2::new(400.0, 150.0), &quiet_habit(10));
        let mut rng = Mulberry32::new(1);

        growable.grow(&surroundings(), &mut rng);
        let segment = growable.segments()[0];
        assert_eq!(segment.start, Vec2::new(400.0, 150.0));
        assert_eq!(segment.end, Vec2::new(400.0, 152.0));
    }

    #[test]
    fn lengths_derive_from_segment_count() {
        let mut growable = Growable::new(Vec2::new(400.0, 150.0), &quiet_habit(4));
        let mut rng = Mulberry32::new(1);
        let surroundings = surroundings();

        growable.grow(&surroundings, &mut rng);
        growable.grow(&surroundings, &mut rng);
        assert_eq!(growable.normalized_length(), 0.5);
        assert_eq!(growable.length(), 4.0);
        assert_eq!(growable.end_position(), Vec2::new(400.0, 154.0));
    }

    #[test]
    fn no_bud_before_a_direction_exists() {
        let growable = Growable::new(Vec2::new(400.0, 150.0), &quiet_habit(3));
        assert!(growable.auxiliary_bud(30.0).is_none());
    }

    #[test]
    fn bud_rotates_off_the_last_direction() {
        let mut growable = Growable::new(Vec2::new(400.0, 150.0), &quiet_habit(3));
        let mut rng = Mulberry32::new(1);
        growable.grow(&surroundings(), &mut rng);

        // Last direction is straight up; a 90 degree bud points left.
        let bud = growable.auxiliary_bud(90.0).expect("direction established");
        assert_eq!(bud.position, growable.end_position());
        assert_eq!(bud.direction, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn jitter_draws_keep_equal_seeds_in_lockstep() {
        let habit = GrowthHabit {
            jitter_influence: Influence { x: 5.0, y: 5.0 },
            ..quiet_habit(50)
        };
        let mut a = Growable::new(Vec2::new(400.0, 150.0), &habit);
        let mut b = Growable::new(Vec2::new(400.0, 150.0), &habit);
        let mut rng_a = Mulberry32::new(99);
        let mut rng_b = Mulberry32::new(99);
        let surroundings = surroundings();

        for _ in 0..50 {
            a.grow(&surroundings, &mut rng_a);
            b.grow(&surroundings, &mut rng_b);
        }
        assert_eq!(a.segments(), b.segments());
    }

    #[test]
    fn tip_below_the_ground_line_sees_no_sun() {
        // Sun weights only; an unexposed tip leaves the blend with no
        // direction, so the appended segment is degenerate.
        let habit = GrowthHabit {
            sun_influence: Influence { x: 5.0, y: 5.0 },
            gravity_influence: Influence { x: 0.0, y: 0.0 },
            ..quiet_habit(3)
        };
        let mut growable = Growable::new(Vec2::new(400.0, 100.0), &habit);
        let mut rng = Mulberry32::new(1);

        growable.grow(&surroundings(), &mut rng);
        let segment = growable.segments()[0];
        assert_eq!(segment.start, segment.end);
    }
}
