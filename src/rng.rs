use std::collections::VecDeque;

use bracket_random::prelude::RandomNumberGenerator;

/// Uniform integer source. Both bounds are inclusive.
pub trait Dice {
    fn randint(&mut self, lo: i32, hi: i32) -> i32;

    fn coin_flip(&mut self) -> bool {
        self.randint(0, 1) == 1
    }
}

impl Dice for RandomNumberGenerator {
    fn randint(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.range(lo, hi + 1)
    }
}

/// Replays a fixed list of rolls, clamped into the requested range.
/// Once the script runs dry every roll returns `lo`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<i32>,
}

impl ScriptedDice {
    pub fn new<I: IntoIterator<Item = i32>>(rolls: I) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Dice for ScriptedDice {
    fn randint(&mut self, lo: i32, hi: i32) -> i32 {
        match self.rolls.pop_front() {
            Some(roll) => roll.clamp(lo, hi.max(lo)),
            None => lo,
        }
    }
}
