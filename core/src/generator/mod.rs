use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    fn generate(&mut self, config: GameConfig) -> MineLayout;
}

/// Any closure producing a layout works as a generator, handy for fixed boards.
impl<F> MinefieldGenerator for F
where
    F: FnMut(GameConfig) -> MineLayout,
{
    fn generate(&mut self, config: GameConfig) -> MineLayout {
        self(config)
    }
}
