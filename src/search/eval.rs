//! Incremental position evaluator.
//!
//! A child is always scored against its father: most terms are differences
//! between the child's tactical figures and the father's. The weights were
//! tuned against play and are kept exactly as they are.

use crate::board::square::{CELLS, END, FIRST};
use crate::board::{is_central, Board, Piece, Side};
use std::fmt;

const PIECE: i32 = 800;
const KING: i32 = 1200;
/// Scaled by own/enemy piece ratio minus one.
const ADVANTAGE: i32 = 160;
/// Bonus when the enemy has no safe move at all.
const ALL_PINNED: i32 = 80;
const DENY: i32 = 10;
const PIN: i32 = 32;
const THREAT: i32 = -10;
const GRADIENT: i32 = 1;
const BACK: i32 = 10;
const MOC2: i32 = 200;
const MOC3: i32 = -8;
const MOC4: i32 = -80;
const MODE2: i32 = -14;
const MODE3: i32 = -40;
const DEMMO: i32 = -20;
const CENTER: i32 = 10;
const KING_CENTER: i32 = 100;

/// Score of a position whose opponent has no pieces or no moves.
pub const WIN: i32 = 30_000;

// The evaluator always reasons as Black: friend moves toward low indices.
const FRIEND: Piece = Piece::BLACK;
const FRIEND_KING: Piece = Piece::BLACK_KING;
const ENEMY: Piece = Piece::WHITE;
const ENEMY_KING: Piece = Piece::WHITE_KING;

/// Tactical figures cached on each node so children can be scored as deltas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Features {
    /// Enemy moves that cannot be punished.
    pub mobil: i32,
    /// Enemy moves that walk into a jump.
    pub deny: i32,
    /// Enemy pieces whose every move is denied.
    pub pin: i32,
    /// Enemy pieces a friendly piece could jump if they stay put.
    pub threat: i32,
    pub gradient: i32,
    /// Back row held and no enemy kings yet.
    pub back: bool,
    pub moc2: bool,
    pub moc3: bool,
    pub moc4: bool,
    pub mode2: bool,
    pub mode3: bool,
    pub demmo: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Counts {
    friend_pieces: i32,
    enemy_pieces: i32,
    friend_kings: i32,
    enemy_kings: i32,
    friend_cent: i32,
    enemy_cent: i32,
    friend_kcent: i32,
    enemy_kcent: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub features: Features,
    pub value: i32,
}

/// The board as seen by `mover`. White's view mirrors indices (`44 - i`) and
/// swaps colours on the fly, so the real board is never copied or touched.
/// Lifted cells read as empty, standing in for a piece picked up mid-analysis.
#[derive(Clone, Copy)]
struct View<'a> {
    board: &'a Board,
    mirrored: bool,
    lifted: u64,
}

impl<'a> View<'a> {
    fn new(board: &'a Board, mover: Side) -> Self {
        Self { board, mirrored: mover == Side::White, lifted: 0 }
    }

    fn at(&self, i: isize) -> Piece {
        if (0..CELLS as isize).contains(&i) && self.lifted & (1u64 << i) != 0 { return Piece::EMPTY; }
        if self.mirrored { self.board.get(CELLS as isize - 1 - i).flipped() } else { self.board.get(i) }
    }

    fn lift(mut self, i: isize) -> Self {
        if (0..CELLS as isize).contains(&i) { self.lifted |= 1u64 << i; }
        self
    }

    fn friend(&self, i: isize) -> bool { self.at(i).has(FRIEND) }
    fn enemy(&self, i: isize) -> bool { self.at(i).has(ENEMY) }
    fn enemy_king(&self, i: isize) -> bool { self.at(i) == ENEMY_KING }
    fn empty(&self, i: isize) -> bool { self.at(i).is_empty() }
}

// Could a friendly piece beyond `target` jump along `dir` into `target - dir`,
// given the surrounding support? Tuned test, kept literal.
fn can_punish(v: View, target: isize, dir: isize) -> bool {
    let dst = target - dir;
    if !v.empty(dst) { return false; }
    let src = target + dir;
    let s = v.at(src);
    if s != FRIEND_KING && (dir < 0 || s != FRIEND) { return false; }
    let v = v.lift(target).lift(src);
    (v.friend(src - 4) && v.enemy(src - 8))
        || (v.friend(src - 5) && v.enemy(src - 10))
        || (v.enemy(dst - 4) && v.empty(dst + 4))
        || (v.enemy(dst - 5) && v.empty(dst + 5))
        || (v.friend(src + 4) && v.enemy_king(src + 8))
        || (v.friend(src + 5) && v.enemy_king(src + 10))
        || (v.enemy_king(dst + 4) && v.empty(dst - 4))
        || (v.enemy_king(dst + 5) && v.empty(dst - 5))
}

#[derive(Default)]
struct MoveTally {
    denied: i32,
    undenied: i32,
}

// Classify one enemy move from `src` along `dir` as denied or free.
fn analyze_move(v: View, dir: isize, src: isize, tally: &mut MoveTally, protected: &mut u64) {
    let target = src + dir;
    if !v.empty(target) { return; }
    if v.empty(target + dir) { *protected |= 1u64 << target; }
    let v = v.lift(src);
    let denied = can_punish(v, target, 4)
        || can_punish(v, target, 5)
        || can_punish(v, target, -4)
        || can_punish(v, target, -5)
        || (v.enemy(src + 4) && can_punish(v, src + 4, 4))
        || (v.enemy(src + 5) && can_punish(v, src + 5, 5))
        || (v.enemy(src - 4) && can_punish(v, src - 4, -4))
        || (v.enemy(src - 5) && can_punish(v, src - 5, -5));
    if denied { tally.denied += 1; } else { tally.undenied += 1; }
}

fn central(i: usize) -> i32 { is_central(i) as i32 }

fn analyse(board: &Board, mover: Side, parent: &Features) -> (Features, Counts) {
    let v = View::new(board, mover);
    let mut f = Features::default();
    let mut c = Counts::default();
    let mut protected = 0u64;

    for i in FIRST..END {
        let s = i as isize;
        let p = v.at(s);
        if p == ENEMY || p == ENEMY_KING {
            let mut tally = MoveTally::default();
            if p == ENEMY_KING {
                c.enemy_kings += 1;
                c.enemy_kcent += central(i);
                if i > 8 {
                    analyze_move(v, -4, s, &mut tally, &mut protected);
                    analyze_move(v, -5, s, &mut tally, &mut protected);
                }
            }
            c.enemy_pieces += 1;
            c.enemy_cent += central(i);
            if i < 36 {
                analyze_move(v, 4, s, &mut tally, &mut protected);
                analyze_move(v, 5, s, &mut tally, &mut protected);
            }
            if tally.denied > 0 && tally.undenied == 0 { f.pin += 1; }
            f.deny += tally.denied;
            f.mobil += tally.undenied;
        } else if p == FRIEND || p == FRIEND_KING {
            if p == FRIEND_KING {
                c.friend_kings += 1;
                c.friend_kcent += central(i);
                if v.enemy(s + 4) && v.empty(s + 8) && !(v.enemy_king(s + 4) && v.empty(s - 4)) { f.threat += 1; }
                if v.enemy(s + 5) && v.empty(s + 10) && !(v.enemy_king(s + 5) && v.empty(s - 5)) { f.threat += 1; }
            }
            c.friend_pieces += 1;
            c.friend_cent += central(i);
            if v.enemy(s - 4) && v.empty(s - 8) && !v.empty(s + 4) { f.threat += 1; }
            if v.enemy(s - 5) && v.empty(s - 10) && !v.empty(s + 5) { f.threat += 1; }
        }
    }

    // Influence flows forward from the back rank through empty, unprotected cells.
    let mut gradient = [0i32; END];
    for i in FIRST - 1..FIRST + 4 {
        gradient[i] = if v.empty(i as isize) { 32 } else { 0 };
    }
    let mut total = 0;
    for i in FIRST + 4..END {
        let x = (gradient[i - 4] + gradient[i - 5]) / 2;
        let p = v.at(i as isize);
        if p == FRIEND { total += x; }
        let open = p.is_empty() && protected & (1u64 << i) == 0;
        gradient[i] = if p.has(FRIEND) || open { x } else { 0 };
    }
    f.gradient = total;

    f.back = v.at(39) == FRIEND && v.at(37) == FRIEND && c.enemy_kings == 0;

    f.moc2 = parent.mobil > f.mobil && c.friend_cent > c.enemy_cent;
    f.moc3 = parent.mobil <= f.mobil && c.friend_cent < c.enemy_cent;
    f.moc4 = parent.mobil > f.mobil && c.friend_cent < c.enemy_cent;
    f.mode2 = parent.mobil <= f.mobil && f.deny < parent.deny;
    f.mode3 = parent.mobil > f.mobil && f.deny > parent.deny;
    f.demmo = f.deny > parent.deny && parent.deny + parent.mobil > f.deny + f.mobil;

    (f, c)
}

/// One row of the evaluation table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Term {
    pub name: &'static str,
    /// Parent figure, or the enemy's for material-style rows.
    pub before: i32,
    /// Child figure, or the mover's for material-style rows.
    pub after: i32,
    pub score: i32,
}

impl Term {
    fn new(name: &'static str, before: i32, after: i32, score: i32) -> Self { Self { name, before, after, score } }
}

fn delta(name: &'static str, weight: i32, parent: i32, child: i32) -> Term {
    Term::new(name, parent, child, weight * (child - parent))
}

fn flag(name: &'static str, weight: i32, parent: bool, child: bool) -> Term {
    delta(name, weight, parent as i32, child as i32)
}

fn advantage(c: &Counts) -> i32 {
    let (us, them) = (c.friend_pieces.max(1), c.enemy_pieces.max(1));
    if c.friend_pieces > c.enemy_pieces {
        ADVANTAGE * us / them - ADVANTAGE
    } else {
        -(ADVANTAGE * them / us - ADVANTAGE)
    }
}

fn terms(f: &Features, c: &Counts, p: &Features) -> Vec<Term> {
    vec![
        Term::new("pieces", c.enemy_pieces, c.friend_pieces, PIECE * (c.friend_pieces - c.enemy_pieces)),
        Term::new("kings", c.enemy_kings, c.friend_kings, (KING - PIECE) * (c.friend_kings - c.enemy_kings)),
        Term::new("mobil", p.mobil, f.mobil, if f.mobil == 0 { ALL_PINNED } else { 0 }),
        delta("deny", DENY, p.deny, f.deny),
        delta("pin", PIN, p.pin, f.pin),
        delta("threat", THREAT, p.threat, f.threat),
        delta("grad", GRADIENT, p.gradient, f.gradient),
        flag("back", BACK, p.back, f.back),
        flag("moc2", MOC2, p.moc2, f.moc2),
        flag("moc3", MOC3, p.moc3, f.moc3),
        flag("moc4", MOC4, p.moc4, f.moc4),
        flag("mode2", MODE2, p.mode2, f.mode2),
        flag("mode3", MODE3, p.mode3, f.mode3),
        flag("demmo", DEMMO, p.demmo, f.demmo),
        Term::new("cent", c.enemy_cent, c.friend_cent, CENTER * (c.friend_cent - c.enemy_cent)),
        Term::new("kcent", c.enemy_kcent, c.friend_kcent, (KING_CENTER - CENTER) * (c.friend_kcent - c.enemy_kcent)),
        Term::new("advan", c.enemy_pieces, c.friend_pieces, advantage(c)),
    ]
}

fn total(rows: &[Term], c: &Counts) -> i32 {
    if c.enemy_pieces == 0 { WIN } else { rows.iter().map(|t| t.score).sum() }
}

/// Score the position reached by `mover`'s move, relative to the father's figures.
pub fn evaluate(board: &Board, mover: Side, parent: &Features) -> Evaluation {
    let (features, counts) = analyse(board, mover, parent);
    let value = total(&terms(&features, &counts, parent), &counts);
    Evaluation { features, value }
}

/// Per-term table behind `evaluate`, for logging and tools.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Breakdown {
    pub rows: Vec<Term>,
    pub total: i32,
}

pub fn breakdown(board: &Board, mover: Side, parent: &Features) -> Breakdown {
    let (features, counts) = analyse(board, mover, parent);
    let rows = terms(&features, &counts, parent);
    let total = total(&rows, &counts);
    Breakdown { rows, total }
}

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\tParent\tNew\tScore")?;
        for t in &self.rows { writeln!(f, "{}\t{}\t{}\t{}", t.name, t.before, t.after, t.score)?; }
        write!(f, "total:\t\t\t{}", self.total)
    }
}
