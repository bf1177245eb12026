// A leaf grows in two strict phases: its stalk elongates to full length
// first, then the blade area expands. One call to `grow` advances exactly
// one step of whichever phase is active.

use crate::growable::{Bud, Segment};
use crate::vec2::Vec2;

pub struct Leaf {
    anchor: Vec2,
    direction: Vec2,
    stem_size_max: i32,
    stem_size: i32,
    stem_end: Vec2,
    area_max: i32,
    area: i32,
}

impl Leaf {
    pub fn new(bud: Bud, stem_size_max: i32, area_max: i32) -> Self {
        Self {
            anchor: bud.position,
            direction: bud.direction,
            stem_size_max,
            stem_size: 0,
            stem_end: bud.position,
            area_max,
            area: 0,
        }
    }

    pub fn is_fully_grown(&self) -> bool {
        self.stem_size >= self.stem_size_max && self.area >= self.area_max
    }

    pub fn grow(&mut self) {
        if self.stem_size < self.stem_size_max {
            self.stem_size += 1;
            self.stem_end = self.anchor + self.direction.scale(self.stem_size as f64);
            return;
        }
        if self.area < self.area_max {
            self.area += 2;
        }
    }

    /// The stalk from anchor to current tip, for rendering.
    pub fn stem_segment(&self) -> Segment {
        Segment {
            start: self.anchor,
            end: self.stem_end,
        }
    }

    pub fn area(&self) -> i32 {
        self.area
    }
}
