// The plant lifecycle state machine. One stem, five roots, a growing list
// of leaves and at most one flower, advanced one probabilistic step per
// tick. The policy prices the tick; this module only rolls the dice and
// applies the outcomes in a fixed order.

use serde::Serialize;

use crate::config::SimulationConfig;
use crate::environment::{Environment, Resources};
use crate::flower::Flower;
use crate::growable::{Growable, Segment};
use crate::leaf::Leaf;
use crate::policy::{GrowthPolicy, PlantSnapshot};
use crate::random::Mulberry32;
use crate::vec2::Vec2;
use crate::world::Surroundings;

pub const ROOT_COUNT: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantState {
    Growing,
    Flowering,
    Dead,
}

pub struct Plant {
    state: PlantState,
    age: u64,
    stem: Growable,
    roots: Vec<Growable>,
    leaves: Vec<Leaf>,
    flower: Option<Flower>,
    policy: Box<dyn GrowthPolicy>,
}

impl Plant {
    pub fn new(anchor: Vec2, config: &SimulationConfig, policy: Box<dyn GrowthPolicy>) -> Self {
        Self {
            state: PlantState::Growing,
            age: 0,
            stem: Growable::new(anchor, &config.stem),
            roots: (0..ROOT_COUNT)
                .map(|_| Growable::new(anchor, &config.root))
                .collect(),
            leaves: Vec::new(),
            flower: None,
            policy,
        }
    }

    /// One tick. Each gated action consumes exactly one draw whether or not
    /// it fires, so the draw sequence depends only on the seed and the tick
    /// count. Dead plants consume nothing.
    pub fn update(
        &mut self,
        surroundings: &Surroundings,
        environment: Environment,
        resources: Resources,
        rng: &mut Mulberry32,
    ) {
        if self.state == PlantState::Dead {
            return;
        }

        self.age += 1;
        let probabilities = self
            .policy
            .probabilities(environment, resources, self.snapshot());

        if rng.int(1, 100) < probabilities.stem_growth as i32 {
            self.stem.grow(surroundings, rng);
        }

        if rng.int(1, 100) < probabilities.roots_growth as i32 {
            for root in &mut self.roots {
                root.grow(surroundings, rng);
            }
        }

        if rng.int(1, 100) < probabilities.leaf_growth as i32 {
            for leaf in &mut self.leaves {
                leaf.grow();
            }
        }

        if rng.int(1, 100) < probabilities.flower_growth as i32 {
            if let Some(flower) = self.flower.as_mut() {
                flower.grow();
            }
        }

        if rng.int(1, 100) < probabilities.leaf_creation as i32 {
            self.sprout_leaf(rng);
        }

        if rng.int(1, 100) < probabilities.to_flowering as i32 && self.flower.is_none() {
            self.state = PlantState::Flowering;
            self.flower = Some(Flower::new(rng, self.stem.end_position()));
            tracing::debug!(age = self.age, "plant started flowering");
        }

        // Checked after flowering: a flower can appear on the dying tick.
        if rng.int(1, 100) < probabilities.to_dead as i32 {
            self.state = PlantState::Dead;
            tracing::info!(age = self.age, leaves = self.leaves.len(), "plant died");
        }
    }

    // New leaves alternate sides of the stem so the silhouette stays
    // balanced; the exact angle off the growth axis is random.
    fn sprout_leaf(&mut self, rng: &mut Mulberry32) {
        let side = if self.leaves.len() % 2 == 0 { 1 } else { -1 };
        let angle = (side * rng.int(20, 60)) as f64;
        if let Some(bud) = self.stem.auxiliary_bud(angle) {
            let stem_size_max = rng.int(25, 50);
            let area_max = rng.int(30, 50);
            self.leaves.push(Leaf::new(bud, stem_size_max, area_max));
        }
    }

    pub fn snapshot(&self) -> PlantSnapshot {
        PlantSnapshot {
            age: self.age,
            state: self.state,
            stem_fill: self.stem.normalized_length(),
            root_fill: self.roots[0].normalized_length(),
            leaf_count: self.leaves.len(),
        }
    }

    pub fn state(&self) -> PlantState {
        self.state
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn stem_segments(&self) -> &[Segment] {
        self.stem.segments()
    }

    pub fn root_segments(&self) -> impl Iterator<Item = &[Segment]> {
        self.roots.iter().map(|root| root.segments())
    }

    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn flower(&self) -> Option<&Flower> {
        self.flower.as_ref()
    }

    /// Stem tip; the seed position until the first stem segment exists.
    pub fn top_position(&self) -> Vec2 {
        self.stem.end_position()
    }

    pub fn stem_length(&self) -> f64 {
        self.stem.length()
    }
}
