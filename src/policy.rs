// Growth policy: turns the current environment, resources and plant
// condition into the per-tick probabilities the state machine samples.
//
// The policy is a trait so the state machine never hard-codes one response
// model; `EnvironmentPolicy` is the shipped implementation.

use crate::environment::{Environment, Resources};
use crate::plant::PlantState;

/// Read-only view of the plant the policy prices a tick for.
#[derive(Clone, Copy, Debug)]
pub struct PlantSnapshot {
    pub age: u64,
    pub state: PlantState,
    /// Stem segments grown over segment budget, in [0, 1].
    pub stem_fill: f64,
    /// Same fraction for the first root.
    pub root_fill: f64,
    pub leaf_count: usize,
}

/// Per-tick chances, each an integer percentage in [0, 100].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GrowthProbabilities {
    pub stem_growth: u8,
    pub roots_growth: u8,
    pub leaf_growth: u8,
    pub flower_growth: u8,
    pub leaf_creation: u8,
    pub to_flowering: u8,
    pub to_dead: u8,
}

pub trait GrowthPolicy: Send + Sync {
    fn probabilities(
        &self,
        environment: Environment,
        resources: Resources,
        snapshot: PlantSnapshot,
    ) -> GrowthProbabilities;
}

const GROWTH_BASELINE: f64 = 100.0;
const LEAF_CREATION_BASELINE: f64 = 4.0;

/// Environmental response model: each factor independently charges a
/// fraction of the optimum baselines and nudges the lifecycle transitions.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvironmentPolicy;

impl GrowthPolicy for EnvironmentPolicy {
    fn probabilities(
        &self,
        environment: Environment,
        resources: Resources,
        snapshot: PlantSnapshot,
    ) -> GrowthProbabilities {
        if snapshot.state == PlantState::Dead {
            return GrowthProbabilities::default();
        }

        let mut working = Working::optimum();
        working.charge_light(environment.light_hours, &snapshot);
        working.charge_temperature(environment.temperature);
        working.charge_carbon_dioxide(resources.carbon_dioxide);
        working.charge_level(resources.water);
        working.charge_level(resources.nutrients);

        // A fully grown stem demands flowering, whatever the climate says.
        if snapshot.stem_fill >= 1.0 {
            working.to_flowering = 99.0;
        }

        if snapshot.state == PlantState::Flowering {
            working.leaf_creation = 0.0;
        } else {
            working.flower = 0.0;
        }

        working.bounded()
    }
}

// Unclamped running probabilities; factors subtract fractions of the
// original baselines, never of each other's remainders.
struct Working {
    stem: f64,
    roots: f64,
    leafs: f64,
    flower: f64,
    leaf_creation: f64,
    to_flowering: f64,
    to_dead: f64,
}

impl Working {
    fn optimum() -> Self {
        Self {
            stem: GROWTH_BASELINE,
            roots: GROWTH_BASELINE,
            leafs: GROWTH_BASELINE,
            flower: GROWTH_BASELINE,
            leaf_creation: LEAF_CREATION_BASELINE,
            to_flowering: 0.0,
            to_dead: 0.0,
        }
    }

    fn charge(&mut self, stem: f64, roots: f64, leafs: f64, flower: f64, creation: f64) {
        self.stem -= stem * GROWTH_BASELINE;
        self.roots -= roots * GROWTH_BASELINE;
        self.leafs -= leafs * GROWTH_BASELINE;
        self.flower -= flower * GROWTH_BASELINE;
        self.leaf_creation -= creation * LEAF_CREATION_BASELINE;
    }

    fn charge_all(&mut self, fraction: f64) {
        self.charge(fraction, fraction, fraction, fraction, fraction);
    }

    fn charge_light(&mut self, hours: i32, snapshot: &PlantSnapshot) {
        if hours <= 0 {
            // Total darkness: foliage stops, and the bigger and older the
            // plant the more likely the dark tick kills it.
            self.charge(0.0, 0.0, 1.0, 0.50, 1.0);
            self.to_dead += snapshot.stem_fill * (snapshot.age as f64 / 1000.0) * 50.0;
            self.to_flowering -= 50.0;
        } else if hours <= 8 {
            self.charge(0.20, 0.0, 0.75, 0.75, 0.50);
            self.to_flowering -= 25.0;
        } else if hours <= 16 {
            // Optimum.
        } else {
            self.charge_all(0.05);
        }
    }

    fn charge_temperature(&mut self, degrees: i32) {
        if degrees < 10 {
            self.charge_all(1.0);
            self.to_dead += if degrees < 5 { 75.0 } else { 50.0 };
            self.to_flowering -= 100.0;
        } else if degrees <= 20 {
            self.charge_all(0.50);
        } else if degrees <= 25 {
            // Optimum.
        } else {
            self.charge_all(0.99);
        }
    }

    fn charge_carbon_dioxide(&mut self, ppm: i32) {
        if ppm <= 100 {
            self.charge_all(1.0);
            self.to_dead += 25.0;
            self.to_flowering -= 25.0;
        } else if ppm <= 300 {
            self.charge_all(0.50);
        } else if ppm <= 600 {
            // Optimum.
        } else {
            self.charge_all(0.05);
        }
    }

    // Water and nutrients share one response curve: both drought and
    // saturation are lethal, level 2 is ideal.
    fn charge_level(&mut self, level: i32) {
        match level {
            2 => {}
            1 | 3 => self.charge_all(0.75),
            _ => {
                self.charge_all(1.0);
                self.to_dead += 25.0;
                self.to_flowering -= 25.0;
            }
        }
    }

    fn bounded(&self) -> GrowthProbabilities {
        fn bound(value: f64) -> u8 {
            value.round().clamp(0.0, 100.0) as u8
        }

        GrowthProbabilities {
            stem_growth: bound(self.stem),
            roots_growth: bound(self.roots),
            leaf_growth: bound(self.leafs),
            flower_growth: bound(self.flower),
            leaf_creation: bound(self.leaf_creation),
            to_flowering: bound(self.to_flowering),
            to_dead: bound(self.to_dead),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn optimal_environment() -> Environment {
        Environment {
            light_hours: 14,
            temperature: 22,
        }
    }

    fn optimal_resources() -> Resources {
        Resources {
            water: 2,
            nutrients: 2,
            carbon_dioxide: 400,
        }
    }

    fn growing_snapshot() -> PlantSnapshot {
        PlantSnapshot {
            age: 10,
            state: PlantState::Growing,
            stem_fill: 0.2,
            root_fill: 0.3,
            leaf_count: 2,
        }
    }

    fn compute(
        environment: Environment,
        resources: Resources,
        snapshot: PlantSnapshot,
    ) -> GrowthProbabilities {
        EnvironmentPolicy.probabilities(environment, resources, snapshot)
    }

    #[test]
    fn dead_plants_get_all_zero_probabilities() {
        let snapshot = PlantSnapshot {
            state: PlantState::Dead,
            ..growing_snapshot()
        };
        let hostile = Environment {
            light_hours: 0,
            temperature: 0,
        };
        assert_eq!(
            compute(hostile, optimal_resources(), snapshot),
            GrowthProbabilities::default()
        );
    }

    #[test]
    fn optimal_conditions_hit_every_baseline() {
        let p = compute(optimal_environment(), optimal_resources(), growing_snapshot());
        assert_eq!(p.stem_growth, 100);
        assert_eq!(p.roots_growth, 100);
        assert_eq!(p.leaf_growth, 100);
        // Flower growth is held at zero until the plant actually flowers.
        assert_eq!(p.flower_growth, 0);
        assert_eq!(p.leaf_creation, 4);
        assert_eq!(p.to_flowering, 0);
        assert_eq!(p.to_dead, 0);
    }

    #[test]
    fn flowering_state_swaps_flower_growth_for_leaf_creation() {
        let snapshot = PlantSnapshot {
            state: PlantState::Flowering,
            ..growing_snapshot()
        };
        let p = compute(optimal_environment(), optimal_resources(), snapshot);
        assert_eq!(p.flower_growth, 100);
        assert_eq!(p.leaf_creation, 0);
    }

    #[test]
    fn full_stem_forces_the_flowering_transition() {
        let snapshot = PlantSnapshot {
            stem_fill: 1.0,
            ..growing_snapshot()
        };
        // Even with transitions dragged negative by a cold snap.
        let cold = Environment {
            light_hours: 14,
            temperature: 0,
        };
        let p = compute(cold, optimal_resources(), snapshot);
        assert_eq!(p.to_flowering, 99);
    }

    #[test]
    fn single_water_step_off_optimum_charges_three_quarters() {
        let resources = Resources {
            water: 1,
            ..optimal_resources()
        };
        let p = compute(optimal_environment(), resources, growing_snapshot());
        assert_eq!(p.stem_growth, 25);
        assert_eq!(p.roots_growth, 25);
        assert_eq!(p.leaf_growth, 25);
        assert_eq!(p.leaf_creation, 1);
        assert_eq!(p.to_dead, 0);
    }

    #[test]
    fn waterlogged_soil_is_as_lethal_as_drought() {
        for level in [0, 4] {
            let resources = Resources {
                water: level,
                ..optimal_resources()
            };
            let p = compute(optimal_environment(), resources, growing_snapshot());
            assert_eq!(p.stem_growth, 0);
            assert_eq!(p.to_dead, 25);
        }
    }

    #[test]
    fn darkness_starves_foliage_and_scales_death_with_age() {
        let dark = Environment {
            light_hours: 0,
            temperature: 22,
        };
        let snapshot = PlantSnapshot {
            age: 1000,
            stem_fill: 0.5,
            ..growing_snapshot()
        };
        let p = compute(dark, optimal_resources(), snapshot);
        assert_eq!(p.stem_growth, 100);
        assert_eq!(p.roots_growth, 100);
        assert_eq!(p.leaf_growth, 0);
        assert_eq!(p.leaf_creation, 0);
        // flower penalty applies but flower growth is forced off anyway
        assert_eq!(p.flower_growth, 0);
        // 0.5 * (1000 / 1000) * 50
        assert_eq!(p.to_dead, 25);
        assert_eq!(p.to_flowering, 0);
    }

    #[test]
    fn short_days_slow_the_stem_and_halve_leaf_creation() {
        let dim = Environment {
            light_hours: 6,
            temperature: 22,
        };
        let p = compute(dim, optimal_resources(), growing_snapshot());
        assert_eq!(p.stem_growth, 80);
        assert_eq!(p.roots_growth, 100);
        assert_eq!(p.leaf_growth, 25);
        assert_eq!(p.leaf_creation, 2);
    }

    #[test]
    fn excess_light_charges_a_token_fraction() {
        let bright = Environment {
            light_hours: 18,
            temperature: 22,
        };
        let p = compute(bright, optimal_resources(), growing_snapshot());
        assert_eq!(p.stem_growth, 95);
        // 4 - 0.05 * 4 = 3.8, rounded back up
        assert_eq!(p.leaf_creation, 4);
    }

    #[test]
    fn deep_cold_nearly_guarantees_death() {
        let frozen = Environment {
            light_hours: 14,
            temperature: 0,
        };
        let p = compute(frozen, optimal_resources(), growing_snapshot());
        assert_eq!(p.stem_growth, 0);
        assert_eq!(p.roots_growth, 0);
        assert_eq!(p.to_dead, 75);
        assert_eq!(p.to_flowering, 0);
    }

    #[test]
    fn mild_cold_halves_growth_without_killing() {
        let cool = Environment {
            light_hours: 14,
            temperature: 15,
        };
        let p = compute(cool, optimal_resources(), growing_snapshot());
        assert_eq!(p.stem_growth, 50);
        assert_eq!(p.to_dead, 0);
    }

    #[test]
    fn heat_leaves_a_sliver_of_growth() {
        let hot = Environment {
            light_hours: 14,
            temperature: 30,
        };
        let p = compute(hot, optimal_resources(), growing_snapshot());
        assert_eq!(p.stem_growth, 1);
    }

    #[test]
    fn carbon_dioxide_bins_match_their_charges() {
        let cases = [(100, 0, 25), (300, 50, 0), (600, 100, 0), (700, 95, 0)];
        for (ppm, stem, dead) in cases {
            let resources = Resources {
                carbon_dioxide: ppm,
                ..optimal_resources()
            };
            let p = compute(optimal_environment(), resources, growing_snapshot());
            assert_eq!(p.stem_growth, stem, "ppm {}", ppm);
            assert_eq!(p.to_dead, dead, "ppm {}", ppm);
        }
    }

    #[test]
    fn penalties_from_separate_factors_accumulate() {
        // Dim light (0.20 on stem) plus mild cold (0.50 on everything).
        let environment = Environment {
            light_hours: 6,
            temperature: 15,
        };
        let p = compute(environment, optimal_resources(), growing_snapshot());
        assert_eq!(p.stem_growth, 30);
        assert_eq!(p.roots_growth, 50);
        assert_eq!(p.leaf_growth, 0);
    }
}
