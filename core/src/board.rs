use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::*;

/// Cell grid shared with readers. Mutations go through [`Arc::make_mut`], so a snapshot held
/// elsewhere is never touched.
pub type Grid = Arc<Array2<Cell>>;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Result of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    /// Whether the host has to redraw.
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Result of a reveal request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    /// Safe cells opened, game still running.
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::HitMine | Self::Won)
    }
}

/// A board being played, from generation to a win or loss.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    grid: Grid,
    mine_count: CellCount,
    flag_count: CellCount,
    state: GameState,
}

impl Board {
    pub fn new(layout: &MineLayout) -> Self {
        let grid = Array2::from_shape_fn(layout.size().to_nd_index(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            let is_mine = layout.contains_mine(coords);
            Cell {
                is_mine,
                neighbor_mines: if is_mine {
                    0
                } else {
                    layout.adjacent_mine_count(coords)
                },
                ..Default::default()
            }
        });

        Self {
            grid: Arc::new(grid),
            mine_count: layout.mine_count(),
            flag_count: 0,
            state: GameState::Playing,
        }
    }

    /// Builds a board from `generator`, refusing layouts that do not match `config`.
    pub fn generate(config: GameConfig, generator: &mut dyn MinefieldGenerator) -> Result<Self> {
        let config = GameConfig::new(config.rows, config.cols, config.mines)?;
        let layout = generator.generate(config);
        let actual = layout.game_config();
        if actual != config {
            log::warn!("Generator returned {:?}, requested {:?}", actual, config);
            return Err(GameError::LayoutMismatch);
        }
        Ok(Self::new(&layout))
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.grid)
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_count
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// Mines not accounted for by flags, negative when over-flagged.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.mine_count) - i32::from(self.flag_count)
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        let coords = self.validate_coords(coords).ok()?;
        Some(self.grid[coords.to_nd_index()])
    }

    pub fn grid(&self) -> &Array2<Cell> {
        &self.grid
    }

    /// Cheap handle to the current grid, stays frozen while the board keeps changing.
    pub fn snapshot(&self) -> Grid {
        Arc::clone(&self.grid)
    }

    /// Whether `snapshot` is still the current grid, i.e. nothing changed since it was taken.
    pub fn same_grid(&self, snapshot: &Grid) -> bool {
        Arc::ptr_eq(&self.grid, snapshot)
    }

    pub fn unrevealed_count(&self) -> CellCount {
        self.grid
            .iter()
            .filter(|cell| !cell.is_revealed)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_playing()?;

        if self.grid[coords.to_nd_index()].is_revealed {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = &mut Arc::make_mut(&mut self.grid)[coords.to_nd_index()];
        cell.is_flagged = !cell.is_flagged;
        if cell.is_flagged {
            self.flag_count += 1;
        } else {
            self.flag_count -= 1;
        }
        Ok(MarkOutcome::Changed)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_playing()?;

        let cell = self.grid[coords.to_nd_index()];
        if cell.is_revealed || cell.is_flagged {
            return Ok(RevealOutcome::NoChange);
        }

        if cell.is_mine {
            self.reveal_mines();
            self.state = GameState::Lost;
            log::debug!("Hit mine at {:?}", coords);
            return Ok(RevealOutcome::HitMine);
        }

        let opened = self.flood_reveal(coords);
        log::debug!("Revealed {} cells from {:?}", opened, coords);

        // every safe cell is open exactly when the hidden ones are all mines
        if self.unrevealed_count() == self.mine_count {
            self.state = GameState::Won;
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    fn flood_reveal(&mut self, start: Coord2) -> usize {
        let size = self.size();
        let grid = Arc::make_mut(&mut self.grid);
        let mut to_visit = vec![start];
        let mut opened = 0;

        while let Some(visit_coords) = to_visit.pop() {
            let cell = &mut grid[visit_coords.to_nd_index()];
            if cell.is_revealed || cell.is_flagged {
                continue;
            }

            cell.is_revealed = true;
            opened += 1;
            log::trace!(
                "Flood opened cell at {:?}, mine count: {}",
                visit_coords,
                cell.neighbor_mines
            );

            if cell.neighbor_mines == 0 {
                to_visit.extend(NeighborIter::new(visit_coords, size));
            }
        }

        opened
    }

    fn reveal_mines(&mut self) {
        let grid = Arc::make_mut(&mut self.grid);
        for cell in grid.iter_mut().filter(|cell| cell.is_mine) {
            cell.is_revealed = true;
        }
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_playing() {
            Ok(())
        } else {
            Err(GameError::AlreadyEnded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::new(&MineLayout::from_mine_coords(size, mines).unwrap())
    }

    fn revealed(board: &Board) -> Vec<Coord2> {
        let (rows, cols) = board.size();
        (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .filter(|&pos| board.cell_at(pos).is_some_and(|cell| cell.is_revealed))
            .collect()
    }

    #[test]
    fn generate_rejects_mismatched_layout() {
        let config = Difficulty::Medium.config();
        let mut wrong_size =
            |_: GameConfig| MineLayout::from_mine_coords((9, 9), &[(0, 0)]).unwrap();
        assert_eq!(
            Board::generate(config, &mut wrong_size),
            Err(GameError::LayoutMismatch)
        );

        let mut wrong_count = |config: GameConfig| {
            MineLayout::from_mine_coords(config.size(), &[(0, 0)]).unwrap()
        };
        assert_eq!(
            Board::generate(config, &mut wrong_count),
            Err(GameError::LayoutMismatch)
        );

        let board = Board::generate(config, &mut RandomMinefieldGenerator::new(5)).unwrap();
        assert_eq!(board.size(), (16, 16));
        assert_eq!(board.total_mines(), 40);
    }

    #[test]
    fn generate_rejects_invalid_config() {
        let full = GameConfig::new_unchecked(2, 2, 4);
        assert_eq!(
            Board::generate(full, &mut RandomMinefieldGenerator::new(0)),
            Err(GameError::TooManyMines)
        );
    }

    #[test]
    fn outcome_updates() {
        assert!(!RevealOutcome::NoChange.has_update());
        assert!(RevealOutcome::Revealed.has_update());
        assert!(!RevealOutcome::Revealed.is_terminal());
        assert!(RevealOutcome::HitMine.is_terminal());
        assert!(MarkOutcome::Changed.has_update());
    }

    #[test]
    fn neighbor_counts_are_precomputed() {
        let board = board((3, 3), &[(0, 0), (2, 2)]);
        assert_eq!(board.cell_at((1, 1)).unwrap().neighbor_mines, 2);
        assert_eq!(board.cell_at((0, 1)).unwrap().neighbor_mines, 1);
        assert_eq!(board.cell_at((0, 2)).unwrap().neighbor_mines, 0);
        assert!(board.cell_at((0, 0)).unwrap().is_mine);
        assert_eq!(board.cell_at((3, 0)), None);
    }

    #[test]
    fn reveal_mine_loses_and_shows_only_mines() {
        let mut board = board((3, 3), &[(0, 0), (2, 2)]);

        assert_eq!(board.reveal((1, 1)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::HitMine);

        assert_eq!(board.state(), GameState::Lost);
        assert_eq!(revealed(&board), vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn reveal_flood_fill_opens_zero_region() {
        let mut board = board((3, 3), &[(2, 2)]);

        let outcome = board.reveal((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::Won);
        assert_eq!(board.cell_at((1, 1)).unwrap().neighbor_mines, 1);
        assert!(board.cell_at((1, 1)).unwrap().is_revealed);
        assert!(!board.cell_at((2, 2)).unwrap().is_revealed);
    }

    #[test]
    fn flood_fill_stops_at_numbered_ring() {
        // column 2 is a wall of mines, column 3 and beyond stays closed
        let mut board = board((3, 5), &[(0, 2), (1, 2), (2, 2)]);

        assert_eq!(board.reveal((1, 0)).unwrap(), RevealOutcome::Revealed);

        assert_eq!(
            revealed(&board),
            vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]
        );
    }

    #[test]
    fn numbered_cell_opens_alone() {
        let mut board = board((3, 3), &[(0, 0)]);

        assert_eq!(board.reveal((1, 1)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(revealed(&board), vec![(1, 1)]);
    }

    #[test]
    fn flood_fill_skips_flagged_cells() {
        let mut board = board((1, 4), &[(0, 3)]);

        board.toggle_flag((0, 1)).unwrap();
        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::Revealed);

        assert_eq!(revealed(&board), vec![(0, 0)]);
        assert!(board.cell_at((0, 1)).unwrap().is_flagged);
    }

    #[test]
    fn degenerate_board_wins_immediately() {
        let mut board = board((2, 2), &[(0, 0), (0, 1), (1, 0)]);

        assert_eq!(board.cell_at((1, 1)).unwrap().neighbor_mines, 3);
        assert_eq!(board.reveal((1, 1)).unwrap(), RevealOutcome::Won);
        assert_eq!(board.state(), GameState::Won);
        assert_eq!(board.unrevealed_count(), 3);
    }

    #[test]
    fn flag_toggle_round_trip() {
        let mut board = board((3, 3), &[(0, 0)]);

        assert_eq!(board.toggle_flag((0, 0)).unwrap(), MarkOutcome::Changed);
        assert_eq!(board.flag_count(), 1);
        assert_eq!(board.mines_left(), 0);
        assert_eq!(board.toggle_flag((0, 0)).unwrap(), MarkOutcome::Changed);
        assert_eq!(board.flag_count(), 0);
        assert!(!board.cell_at((0, 0)).unwrap().is_flagged);
    }

    #[test]
    fn flagging_revealed_cell_is_noop() {
        let mut board = board((3, 3), &[(0, 0)]);

        board.reveal((1, 1)).unwrap();
        assert_eq!(board.toggle_flag((1, 1)).unwrap(), MarkOutcome::NoChange);
        assert_eq!(board.flag_count(), 0);
    }

    #[test]
    fn over_flagging_goes_negative() {
        let mut board = board((3, 3), &[(0, 0)]);

        board.toggle_flag((1, 1)).unwrap();
        board.toggle_flag((2, 2)).unwrap();
        board.toggle_flag((0, 2)).unwrap();

        assert_eq!(board.flag_count(), 3);
        assert_eq!(board.mines_left(), -2);
    }

    #[test]
    fn flagged_cell_cannot_be_revealed() {
        let mut board = board((3, 3), &[(0, 0)]);

        board.toggle_flag((0, 0)).unwrap();
        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(board.state(), GameState::Playing);
    }

    #[test]
    fn finished_board_rejects_moves() {
        let mut board = board((2, 2), &[(0, 0)]);

        board.reveal((0, 0)).unwrap();
        assert_eq!(board.reveal((1, 1)), Err(GameError::AlreadyEnded));
        assert_eq!(board.toggle_flag((1, 1)), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let mut board = board((2, 2), &[(0, 0)]);

        assert_eq!(board.reveal((2, 0)), Err(GameError::InvalidCoords));
        assert_eq!(board.toggle_flag((0, 2)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn snapshot_is_not_mutated() {
        let mut board = board((3, 3), &[(0, 0)]);
        let before = board.snapshot();

        board.reveal((2, 2)).unwrap();

        assert!(!board.same_grid(&before));
        assert!(before.iter().all(|cell| !cell.is_revealed));
        assert!(board.cell_at((2, 2)).unwrap().is_revealed);
    }

    #[test]
    fn noop_keeps_the_same_grid() {
        let mut board = board((3, 3), &[(0, 0)]);
        board.reveal((1, 1)).unwrap();
        let before = board.snapshot();

        assert_eq!(board.reveal((1, 1)).unwrap(), RevealOutcome::NoChange);
        assert!(board.same_grid(&before));
    }
}
