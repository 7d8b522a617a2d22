use ndarray::Array2;

use super::*;

/// Uniform-draw placement with row-major linear probing: each mine draws a
/// random coordinate and, when that cell is already occupied, walks forward
/// through the grid (x first, wrapping to the next row and then back to the
/// origin) until a free cell turns up.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LinearProbeGenerator {
    seed: u64,
}

impl LinearProbeGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for LinearProbeGenerator {
    fn generate(self, config: GameConfig) -> Board {
        use rand::prelude::*;

        let (width, height) = config.size;
        let total_cells = config.total_cells();
        let mines = if config.mines > total_cells {
            log::warn!(
                "requested {} mines but the board only fits {}",
                config.mines,
                total_cells
            );
            total_cells
        } else {
            config.mines
        };

        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);

        for _ in 0..mines {
            let mut x: Coord = rng.random_range(0..width);
            let mut y: Coord = rng.random_range(0..height);

            // a free cell exists as long as fewer than `mines` are placed
            while mine_mask[(x, y).to_nd_index()] {
                x += 1;
                if x >= width {
                    x = 0;
                    y += 1;
                    if y >= height {
                        y = 0;
                    }
                }
            }
            mine_mask[(x, y).to_nd_index()] = true;
        }

        Board::from_mine_mask(&mine_mask)
    }
}
