// Environmental state the plant grows under. Both structs are plain values:
// the world validates all writes, the policy only ever reads them.

use serde::{Deserialize, Serialize};

/// Climate inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    /// Daily light, even hours in [0, 24].
    pub light_hours: i32,
    /// Degrees, multiples of 5 in [0, 40].
    pub temperature: i32,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            light_hours: 12,
            temperature: 25,
        }
    }
}

/// Soil and air resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resources {
    /// Discrete level in [0, 4]; 2 is the sweet spot, both extremes kill.
    pub water: i32,
    /// Discrete level in [0, 4], same shape as water.
    pub nutrients: i32,
    /// Atmospheric ppm, multiples of 100 in [0, 900].
    pub carbon_dioxide: i32,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            water: 2,
            nutrients: 2,
            carbon_dioxide: 400,
        }
    }
}
