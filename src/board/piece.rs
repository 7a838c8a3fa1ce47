use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Black,
    White,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self { Side::Black => Side::White, Side::White => Side::Black }
    }

    /// Colour bit shared by every piece of this side.
    pub fn bit(self) -> u8 {
        match self { Side::Black => Piece::BLACK.0, Side::White => Piece::WHITE.0 }
    }

    /// True when `to` is on the row where this side's men are crowned.
    pub fn crowns_on(self, to: usize) -> bool {
        match self { Side::Black => to <= 8, Side::White => to >= 36 }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self { Side::Black => "Black", Side::White => "White" })
    }
}

// Men step toward the opponent, kings in all four diagonals.
const BLACK_MAN_DIRS: [isize; 2] = [-5, -4];
const WHITE_MAN_DIRS: [isize; 2] = [4, 5];
const KING_DIRS: [isize; 4] = [4, 5, -4, -5];

/// Cell content. Colours are disjoint bits and KING is an extra bit, so
/// crowning is a bit-or and side tests are a bit-and.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Piece(u8);

impl Piece {
    pub const EMPTY: Piece = Piece(0);
    pub const BLACK: Piece = Piece(1);
    pub const WHITE: Piece = Piece(2);
    pub const KING: Piece = Piece(4);
    pub const BLACK_KING: Piece = Piece(5);
    pub const WHITE_KING: Piece = Piece(6);
    /// Permanent off-board sentinel.
    pub const OFF: Piece = Piece(8);

    pub fn man(side: Side) -> Piece { Piece(side.bit()) }
    pub fn king(side: Side) -> Piece { Piece(side.bit() | Self::KING.0) }

    pub fn bits(self) -> u8 { self.0 }
    pub fn is_empty(self) -> bool { self.0 == 0 }
    pub fn is_king(self) -> bool { self.0 & Self::KING.0 != 0 }

    /// Bit test against a colour (or colour+king) mask, `OFF` never matches.
    pub fn has(self, mask: Piece) -> bool { self.0 & mask.0 & 0b11 != 0 }

    pub fn belongs_to(self, side: Side) -> bool { self.0 & side.bit() != 0 }

    pub fn side(self) -> Option<Side> {
        if self.belongs_to(Side::Black) { Some(Side::Black) }
        else if self.belongs_to(Side::White) { Some(Side::White) }
        else { None }
    }

    /// Both pieces carry a colour and the colours differ.
    pub fn opposes(self, other: Piece) -> bool {
        (self.0 ^ other.0) & 0b11 == 0b11
    }

    pub fn crowned(self) -> Piece { Piece(self.0 | Self::KING.0) }

    /// Strip the king bit, keeping the colour.
    pub fn uncrowned(self) -> Piece { Piece(self.0 & 0b11) }

    /// Colour swap used to look at the board from White's side.
    pub fn flipped(self) -> Piece {
        match self.0 & 0b11 {
            0b01 | 0b10 => Piece(self.0 ^ 0b11),
            _ => self,
        }
    }

    pub fn directions(self) -> &'static [isize] {
        match self {
            Piece::BLACK => &BLACK_MAN_DIRS,
            Piece::WHITE => &WHITE_MAN_DIRS,
            Piece::BLACK_KING | Piece::WHITE_KING => &KING_DIRS,
            _ => &[],
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Piece::BLACK => 'b',
            Piece::WHITE => 'w',
            Piece::BLACK_KING => 'B',
            Piece::WHITE_KING => 'W',
            _ => '.',
        }
    }

    pub fn from_char(c: char) -> Option<Piece> {
        match c {
            'b' => Some(Piece::BLACK),
            'w' => Some(Piece::WHITE),
            'B' => Some(Piece::BLACK_KING),
            'W' => Some(Piece::WHITE_KING),
            '.' | ' ' | '-' => Some(Piece::EMPTY),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crowning_is_a_bit_or() {
        assert_eq!(Piece::BLACK.crowned(), Piece::BLACK_KING);
        assert_eq!(Piece::WHITE.crowned(), Piece::WHITE_KING);
        assert_eq!(Piece::WHITE_KING.uncrowned(), Piece::WHITE);
    }

    #[test]
    fn flip_swaps_colour_only() {
        assert_eq!(Piece::BLACK_KING.flipped(), Piece::WHITE_KING);
        assert_eq!(Piece::WHITE.flipped(), Piece::BLACK);
        assert_eq!(Piece::OFF.flipped(), Piece::OFF);
        assert_eq!(Piece::EMPTY.flipped(), Piece::EMPTY);
    }

    #[test]
    fn kings_have_four_directions() {
        assert_eq!(Piece::BLACK.directions().len(), 2);
        assert_eq!(Piece::WHITE_KING.directions().len(), 4);
        assert!(Piece::OFF.directions().is_empty());
    }

    #[test]
    fn off_board_never_matches_a_side() {
        assert!(!Piece::OFF.has(Piece::BLACK));
        assert!(!Piece::OFF.has(Piece::WHITE));
        assert!(!Piece::OFF.opposes(Piece::BLACK));
        assert!(Piece::BLACK_KING.opposes(Piece::WHITE));
    }
}
