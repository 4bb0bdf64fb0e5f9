use serde::{Deserialize, Serialize};

/// One board position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    /// Mines among the up-to-8 neighbors, unused for mine cells.
    pub neighbor_mines: u8,
}

impl Cell {
    pub const fn view(self) -> CellView {
        if self.is_flagged {
            CellView::Flagged
        } else if !self.is_revealed {
            CellView::Hidden
        } else if self.is_mine {
            CellView::Mine
        } else if self.neighbor_mines == 0 {
            CellView::Empty
        } else {
            CellView::Number(self.neighbor_mines)
        }
    }
}

/// What the player gets to see of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Mine,
    Empty,
    Number(u8),
}

const NUMBER_GLYPHS: [&str; 9] = ["", "1", "2", "3", "4", "5", "6", "7", "8"];

impl CellView {
    /// Text for the cell face. Counts outside `0..=8` cannot occur on a real board and get none.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Hidden | Self::Empty => "",
            Self::Flagged => "🚩",
            Self::Mine => "💣",
            Self::Number(n) => NUMBER_GLYPHS.get(usize::from(n)).copied().unwrap_or(""),
        }
    }
}
