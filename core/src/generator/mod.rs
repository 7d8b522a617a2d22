use crate::*;
pub use random::*;

mod random;

/// Produces a fully generated board (mines placed, numbers derived) for a
/// configuration. Implementations own their randomness, so a fixed seed
/// replays the same placement.
pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Board;
}
