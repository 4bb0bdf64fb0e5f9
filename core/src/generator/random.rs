use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Purely random generation by rejection sampling: pick a cell, keep it if it is not a mine
/// yet, repeat until enough mines are placed.
///
/// Only meant for boards where mines are a small fraction of the cells. With the mine count
/// close to the cell count most samples get rejected.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator {
    rng: SmallRng,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(&mut self, config: GameConfig) -> MineLayout {
        let mut layout = MineLayout::empty(config);
        let total_cells = config.total_cells();

        // never ask for more mines than can fit, the loop would not terminate
        let target = if config.mines >= total_cells {
            log::warn!(
                "Minefield cannot hold {} mines with {} cells, leaving one safe cell",
                config.mines,
                total_cells
            );
            total_cells.saturating_sub(1)
        } else {
            config.mines
        };

        let mut placed: CellCount = 0;
        let mut rejected: u32 = 0;
        while placed < target {
            let row = self.rng.random_range(0..config.rows);
            let col = self.rng.random_range(0..config.cols);
            if layout.place_mine((row, col)) {
                placed += 1;
            } else {
                rejected += 1;
            }
        }

        log::debug!(
            "Generated {}x{} minefield with {} mines ({} samples rejected)",
            config.rows,
            config.cols,
            placed,
            rejected
        );
        layout
    }
}
