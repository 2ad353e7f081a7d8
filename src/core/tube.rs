//! Tubes: bounded stacks of colored balls.
//!
//! A tube holds balls bottom-to-top. Positions are implicit vector
//! indices (0 = bottom), so the "contiguous 0..count-1" invariant holds
//! by construction and never needs repair.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::color::Color;

/// Stable tube identifier.
///
/// Ids are 1-based and assigned in display order when a board is built.
/// Callers address tubes by id, never by array index, so the id must
/// survive any reordering a host UI applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TubeId(pub u32);

impl TubeId {
    /// Create a tube id from its raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TubeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// A ball at a known rank within its tube.
///
/// Balls carry no identity beyond color; this is a positioned view used
/// by callers that need both the color and where it sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    pub color: Color,
    /// Rank within the tube, 0 = bottom.
    pub position: usize,
}

/// A bounded stack of balls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tube {
    id: TubeId,
    capacity: usize,
    /// Bottom-to-top. Most boards cap out at 5 balls per tube.
    balls: SmallVec<[Color; 8]>,
}

impl Tube {
    /// Create an empty tube.
    #[must_use]
    pub fn new(id: TubeId, capacity: usize) -> Self {
        Self {
            id,
            capacity,
            balls: SmallVec::new(),
        }
    }

    /// Create a tube pre-filled bottom-to-top.
    ///
    /// Truncates to capacity if given too many balls; generation code
    /// never does, but parsed input might.
    #[must_use]
    pub fn with_balls(id: TubeId, capacity: usize, balls: impl IntoIterator<Item = Color>) -> Self {
        let mut tube = Self::new(id, capacity);
        for color in balls {
            if tube.is_full() {
                break;
            }
            tube.balls.push(color);
        }
        tube
    }

    #[must_use]
    pub fn id(&self) -> TubeId {
        self.id
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of balls currently in the tube.
    #[must_use]
    pub fn count(&self) -> usize {
        self.balls.len()
    }

    /// Balls bottom-to-top.
    #[must_use]
    pub fn balls(&self) -> &[Color] {
        &self.balls
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.balls.len() >= self.capacity
    }

    /// Full to capacity and monochromatic.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.is_full() && self.is_monochrome()
    }

    /// Non-empty and all one color (not necessarily full).
    #[must_use]
    pub fn is_monochrome(&self) -> bool {
        match self.balls.split_first() {
            Some((first, rest)) => rest.iter().all(|c| c == first),
            None => false,
        }
    }

    /// The topmost ball, if any.
    #[must_use]
    pub fn top_ball(&self) -> Option<Ball> {
        self.balls.last().map(|&color| Ball {
            color,
            position: self.balls.len() - 1,
        })
    }

    /// Shorthand for the color of the topmost ball.
    #[must_use]
    pub fn top_color(&self) -> Option<Color> {
        self.balls.last().copied()
    }

    /// Whether a ball of `color` may legally land here: the tube must
    /// not be full, and must be empty or top-match the color.
    #[must_use]
    pub fn can_receive(&self, color: Color) -> bool {
        if self.is_full() {
            return false;
        }
        match self.top_color() {
            None => true,
            Some(top) => top == color,
        }
    }

    /// Number of distinct colors present.
    #[must_use]
    pub fn distinct_colors(&self) -> usize {
        let mut seen: SmallVec<[Color; 8]> = SmallVec::new();
        for &c in &self.balls {
            if !seen.contains(&c) {
                seen.push(c);
            }
        }
        seen.len()
    }

    /// Whether a ball of the top ball's color sits buried beneath it.
    #[must_use]
    pub fn has_buried_match(&self) -> bool {
        match self.balls.split_last() {
            Some((top, below)) => below.contains(top),
            None => false,
        }
    }

    /// Push a ball on top. Caller checks `can_receive` / fullness first.
    pub(crate) fn push(&mut self, color: Color) {
        debug_assert!(!self.is_full());
        self.balls.push(color);
    }

    /// Pop the top ball.
    pub(crate) fn pop(&mut self) -> Option<Color> {
        self.balls.pop()
    }
}
