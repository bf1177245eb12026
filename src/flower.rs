// The flower sits at the stem tip where it was created and grows radially.
// Petal count and final size are drawn once at creation; afterwards the
// flower only ever gets bigger, one unit per growth step.

use crate::random::Mulberry32;
use crate::vec2::Vec2;

pub struct Flower {
    petal_count: i32,
    size_max: i32,
    position: Vec2,
    size: i32,
}

impl Flower {
    pub fn new(rng: &mut Mulberry32, position: Vec2) -> Self {
        Self {
            petal_count: rng.int(14, 18),
            size_max: rng.int(25, 30),
            position,
            size: 0,
        }
    }

    pub fn is_fully_grown(&self) -> bool {
        self.size >= self.size_max
    }

    pub fn grow(&mut self) {
        if self.is_fully_grown() {
            return;
        }
        self.size += 1;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn petal_count(&self) -> i32 {
        self.petal_count
    }
}
