use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Cells in the board array, playable squares plus the sentinel border.
pub const CELLS: usize = 45;

/// First and one-past-last playable index.
pub const FIRST: usize = 5;
pub const END: usize = 40;

/// Sentinels sitting at the end of each row pair.
const GAPS: [usize; 3] = [13, 22, 31];

pub fn is_playable(idx: usize) -> bool {
    (FIRST..END).contains(&idx) && !GAPS.contains(&idx)
}

/// Iterator over the 32 playable indices in board order.
pub fn playable() -> impl Iterator<Item = usize> {
    (FIRST..END).filter(|&i| is_playable(i))
}

/// One of the 32 dark squares, named like `B6` (column A-H, row 1 at White's edge).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    pub fn new(idx: usize) -> Option<Square> {
        if is_playable(idx) { Some(Square(idx as u8)) } else { None }
    }

    pub fn index(self) -> usize { self.0 as usize }

    /// Column 0..8 (A..H) and row 1..=8.
    pub fn coords(self) -> (u8, u8) {
        let k = self.0 - FIRST as u8;
        let pair = k / 9;
        let r = k % 9;
        if r < 4 { (2 * r + 1, 2 * pair + 1) } else { (2 * (r - 4), 2 * pair + 2) }
    }

    pub fn from_coords(col: u8, row: u8) -> Option<Square> {
        if col > 7 || !(1..=8).contains(&row) || (col + row) % 2 != 0 { return None; }
        let pair = (row - 1) / 2;
        let r = if row % 2 == 1 { (col - 1) / 2 } else { col / 2 + 4 };
        Square::new(FIRST + (pair * 9 + r) as usize)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (col, row) = self.coords();
        write!(f, "{}{}", (b'A' + col) as char, row)
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        let (Some(c), Some(r), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(Error::InvalidSquare(s.to_string()));
        };
        let col = c.to_ascii_uppercase() as u32;
        let row = r.to_digit(10);
        match (col, row) {
            (c @ 0x41..=0x48, Some(r)) => Square::from_coords((c - 0x41) as u8, r as u8),
            _ => None,
        }
        .ok_or_else(|| Error::InvalidSquare(s.to_string()))
    }
}
