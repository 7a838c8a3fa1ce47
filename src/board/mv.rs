use crate::board::square::Square;
use std::fmt;

/// One ply: origin, destination, squares vacated by captures, crowning flag.
/// A multi-jump keeps the origin of its first hop and the landing square of its last.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: u8,
    pub to: u8,
    /// One bit per board index of each captured piece.
    pub jumps: u64,
    pub king: bool,
}

impl Move {
    pub fn step(from: usize, to: usize, king: bool) -> Move {
        Move { from: from as u8, to: to as u8, jumps: 0, king }
    }

    pub fn is_capture(&self) -> bool { self.jumps != 0 }

    pub fn captures(&self) -> u32 { self.jumps.count_ones() }

    pub fn captured_squares(&self) -> impl Iterator<Item = usize> + '_ {
        (0..64).filter(move |i| self.jumps & (1u64 << i) != 0)
    }

    pub fn from_square(&self) -> Option<Square> { Square::new(self.from as usize) }
    pub fn to_square(&self) -> Option<Square> { Square::new(self.to as usize) }
}

fn name(idx: usize) -> String {
    Square::new(idx).map_or_else(|| format!("#{idx}"), |s| s.to_string())
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture() { 'x' } else { '-' };
        write!(f, "{}{}{}", name(self.from as usize), sep, name(self.to as usize))
    }
}

/// Long form used by the tools, e.g. `jumps from C6 to A4, B5 removed`.
pub fn describe(mv: &Move) -> String {
    let verb = if mv.is_capture() { "jumps" } else { "moves" };
    let mut s = format!("{} from {} to {}", verb, name(mv.from as usize), name(mv.to as usize));
    if mv.is_capture() {
        for sq in mv.captured_squares() { s.push_str(", "); s.push_str(&name(sq)); }
        s.push_str(" removed");
    }
    if mv.king { s.push_str(", crowned"); }
    s
}
