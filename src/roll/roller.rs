use crate::common::UInt;
use rand::Rng;

/// Source of die faces.
///
/// Every [`rand::Rng`] is a `Roller`, so `thread_rng()` or a seeded `StdRng`
/// can be handed to the executor directly.
pub trait Roller {
    /// Draws one face uniformly from `1..=sides`.
    fn roll(&mut self, sides: UInt) -> UInt;
}

impl<R: Rng + ?Sized> Roller for R {
    fn roll(&mut self, sides: UInt) -> UInt {
        self.gen_range(1..=sides)
    }
}

#[cfg(test)]
pub(crate) use step::{ScriptedRoller, StepRoller};
