pub mod mv;
pub mod piece;
pub mod square;

pub use mv::Move;
pub use piece::{Piece, Side};
pub use square::Square;

use crate::error::{Error, Result};
use square::{CELLS, END, FIRST};
use std::fmt;

/// Central squares weighted by the evaluator; the set is symmetric under `44 - i`.
pub const CENTRAL: [usize; 8] = [15, 16, 19, 20, 24, 25, 28, 29];

pub fn is_central(idx: usize) -> bool { CENTRAL.contains(&idx) }

/// The playing surface: 45 cells, the 13 border cells hold `Piece::OFF`.
/// Small and `Copy`, so search code derives child positions by value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Piece; CELLS],
}

impl Default for Board {
    fn default() -> Self { Self::standard() }
}

impl Board {
    /// Border only, no pieces.
    pub fn empty() -> Self {
        let mut cells = [Piece::OFF; CELLS];
        for i in square::playable() { cells[i] = Piece::EMPTY; }
        Self { cells }
    }

    /// Twelve men each, White on the top three rows, Black to move first.
    pub fn standard() -> Self {
        let mut b = Self::empty();
        for i in square::playable() {
            if i < 18 { b.cells[i] = Piece::WHITE; } else if i >= 27 { b.cells[i] = Piece::BLACK; }
        }
        b
    }

    /// Parse eight rows, row 1 (White's edge) first. `b`/`w` men, `B`/`W` kings,
    /// `.` or space for empty. Light squares must be empty.
    pub fn from_diagram(text: &str) -> Result<Self> {
        // Blank lines around the diagram are ignored; a blank row inside it is an empty row.
        let lines: Vec<&str> = text.lines().collect();
        let start = lines.iter().position(|l| !l.trim().is_empty()).unwrap_or(lines.len());
        let end = lines.iter().rposition(|l| !l.trim().is_empty()).map_or(start, |i| i + 1);
        let rows: Vec<&str> = lines[start..end].iter().map(|l| l.trim_end()).collect();
        if rows.len() != 8 {
            return Err(Error::InvalidDiagram(format!("expected 8 rows, found {}", rows.len())));
        }
        let mut b = Self::empty();
        for (r, line) in rows.iter().enumerate() {
            let chars: Vec<char> = line.trim_start_matches('|').chars().collect();
            if chars.len() > 8 {
                return Err(Error::InvalidDiagram(format!("row {} is wider than 8 cells", r + 1)));
            }
            for (c, ch) in chars.iter().enumerate() {
                let piece = Piece::from_char(*ch)
                    .ok_or_else(|| Error::InvalidDiagram(format!("unknown piece '{ch}' on row {}", r + 1)))?;
                match Square::from_coords(c as u8, r as u8 + 1) {
                    Some(sq) => b.cells[sq.index()] = piece,
                    None if piece.is_empty() => {}
                    None => return Err(Error::InvalidDiagram(format!("piece on light square at row {} column {}", r + 1, c + 1))),
                }
            }
        }
        Ok(b)
    }

    pub fn at(&self, idx: usize) -> Piece {
        self.cells.get(idx).copied().unwrap_or(Piece::OFF)
    }

    /// Signed lookup; anything outside the array reads as border.
    pub fn get(&self, idx: isize) -> Piece {
        if idx < 0 { Piece::OFF } else { self.at(idx as usize) }
    }

    pub fn piece(&self, sq: Square) -> Piece { self.cells[sq.index()] }

    pub fn set(&mut self, idx: usize, piece: Piece) {
        if square::is_playable(idx) { self.cells[idx] = piece; }
    }

    pub fn put(&mut self, sq: Square, piece: Piece) { self.cells[sq.index()] = piece; }

    /// Play a generated move: relocate (crowning if flagged) and clear captured cells.
    pub fn make_move(&mut self, mv: &Move) {
        let (from, to) = (mv.from as usize, mv.to as usize);
        let mut moving = self.at(from);
        if mv.king { moving = moving.crowned(); }
        self.set(to, moving);
        if from != to { self.set(from, Piece::EMPTY); }
        for sq in mv.captured_squares() { self.set(sq, Piece::EMPTY); }
    }

    pub fn occupied(&self, side: Side) -> impl Iterator<Item = usize> + '_ {
        (FIRST..END).filter(move |&i| self.cells[i].belongs_to(side))
    }

    pub fn count(&self, side: Side) -> usize { self.occupied(side).count() }

    pub fn kings(&self, side: Side) -> usize {
        self.occupied(side).filter(|&i| self.cells[i].is_king()).count()
    }

    pub fn cells(&self) -> &[Piece; CELLS] { &self.cells }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  A B C D E F G H")?;
        for row in 1..=8u8 {
            write!(f, "{row}")?;
            for col in 0..8u8 {
                let ch = Square::from_coords(col, row).map_or(' ', |sq| self.piece(sq).to_char());
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "\n{self}") }
}
