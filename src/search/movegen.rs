use crate::board::{Board, Move, Piece, Side};
use crate::search::eval::{evaluate, Features};
use crate::search::tree::{NodeId, Tree};

/// Builds the children of one node: every step and every capture chain for
/// the side to move, each evaluated against the father and inserted sorted.
struct Generator<'t> {
    tree: &'t mut Tree,
    father: NodeId,
    parent: Features,
    mover: Side,
    forced_jumps: bool,
    evaluated: usize,
}

impl Generator<'_> {
    fn first_is_capture(&self) -> Option<bool> {
        self.tree.first_child(self.father).map(|c| self.tree[c].mv.is_capture())
    }

    fn emit(&mut self, after: &Board, mv: Move) {
        let eval = evaluate(after, self.mover, &self.parent);
        let id = self.tree.acquire();
        let node = &mut self.tree[id];
        node.father = Some(self.father);
        node.mover = self.mover;
        node.mv = mv;
        node.features = eval.features;
        node.value = eval.value;
        self.tree.insert(id);
        self.evaluated += 1;
    }

    /// Moves of the piece on `sq`. `chain` carries the capture sequence so far
    /// when called from a landing square. Returns whether any capture was found.
    fn piece_moves(&mut self, board: &Board, sq: usize, chain: Option<Move>) -> bool {
        let piece = board.at(sq);
        let mut captured = false;
        for &dir in piece.directions() {
            let next = sq as isize + dir;
            let target = board.get(next);
            if target.is_empty() {
                if chain.is_some() { continue; }
                if self.forced_jumps && self.first_is_capture() == Some(true) { continue; }
                let to = next as usize;
                let mv = Move::step(sq, to, !piece.is_king() && self.mover.crowns_on(to));
                let mut after = *board;
                after.make_move(&mv);
                self.emit(&after, mv);
            } else if target.opposes(piece) && board.get(next + dir).is_empty() {
                // A capture retracts any quiet moves already listed.
                if self.forced_jumps && self.first_is_capture() == Some(false) {
                    self.tree.release_children(self.father);
                }
                let over = next as usize;
                let to = (next + dir) as usize;
                let crowned = !piece.is_king() && self.mover.crowns_on(to);
                let mut mv = Move { from: sq as u8, to: to as u8, jumps: 1u64 << over, king: crowned };
                if let Some(prev) = chain {
                    mv.from = prev.from;
                    mv.jumps |= prev.jumps;
                    mv.king |= prev.king;
                }
                let mut after = *board;
                after.set(sq, Piece::EMPTY);
                after.set(over, Piece::EMPTY);
                after.set(to, if crowned { piece.crowned() } else { piece });
                let continued = self.piece_moves(&after, to, Some(mv));
                // Under forced jumps a chain may not stop while another jump is available.
                if !(self.forced_jumps && continued) { self.emit(&after, mv); }
                captured = true;
            }
        }
        captured
    }
}

/// Generate, evaluate and insert all children of `father` for the side to move
/// at `board`. Returns the number of positions evaluated.
pub fn generate(tree: &mut Tree, board: &Board, father: NodeId, forced_jumps: bool) -> usize {
    let mover = tree[father].mover.opponent();
    let parent = tree[father].features;
    let mut gen = Generator { tree, father, parent, mover, forced_jumps, evaluated: 0 };
    for sq in board.occupied(mover) {
        gen.piece_moves(board, sq, None);
    }
    gen.evaluated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(tree: &mut Tree, last_mover: Side) -> NodeId {
        let id = tree.acquire();
        tree[id].mover = last_mover;
        id
    }

    #[test]
    fn opening_has_seven_moves() {
        let mut t = Tree::with_seed(5);
        let r = root(&mut t, Side::White);
        let b = Board::standard();
        let n = generate(&mut t, &b, r, true);
        assert_eq!(n, 7);
        assert_eq!(t.child_count(r), 7);
        for c in t.children(r) {
            assert_eq!(t[c].mover, Side::Black);
            assert!(b.at(t[c].mv.from as usize).belongs_to(Side::Black));
            assert!(b.at(t[c].mv.to as usize).is_empty());
        }
    }

    #[test]
    fn double_jump_is_one_node_under_forced_jumps() {
        // Black man on 32 jumps 28 to 24, then 20 to 16.
        let mut b = Board::empty();
        b.set(32, Piece::BLACK);
        b.set(28, Piece::WHITE);
        b.set(20, Piece::WHITE);
        b.set(7, Piece::WHITE);
        let mut t = Tree::with_seed(5);
        let r = root(&mut t, Side::White);
        generate(&mut t, &b, r, true);
        let kids: Vec<NodeId> = t.children(r).collect();
        assert_eq!(kids.len(), 1);
        let mv = t[kids[0]].mv;
        assert_eq!((mv.from, mv.to), (32, 16));
        assert_eq!(mv.jumps, (1 << 28) | (1 << 20));
    }

    #[test]
    fn partial_chains_allowed_without_forced_jumps() {
        let mut b = Board::empty();
        b.set(32, Piece::BLACK);
        b.set(28, Piece::WHITE);
        b.set(20, Piece::WHITE);
        let mut t = Tree::with_seed(5);
        let r = root(&mut t, Side::White);
        generate(&mut t, &b, r, false);
        let captures: Vec<Move> = t.children(r).map(|c| t[c].mv).filter(|m| m.is_capture()).collect();
        assert_eq!(captures.len(), 2);
        assert!(captures.iter().any(|m| m.to == 24 && m.captures() == 1));
        assert!(captures.iter().any(|m| m.to == 16 && m.captures() == 2));
        // Quiet moves stay on offer as well.
        assert!(t.children(r).any(|c| !t[c].mv.is_capture()));
    }

    #[test]
    fn crowning_mid_chain_is_flagged() {
        // White man on 27 jumps 32 to 37 and is crowned; as a king it continues over 33 to 29.
        let mut b = Board::empty();
        b.set(27, Piece::WHITE);
        b.set(32, Piece::BLACK);
        b.set(33, Piece::BLACK);
        b.set(39, Piece::BLACK);
        let mut t = Tree::with_seed(5);
        let r = root(&mut t, Side::Black);
        generate(&mut t, &b, r, true);
        let kids: Vec<Move> = t.children(r).map(|c| t[c].mv).collect();
        assert_eq!(kids.len(), 1);
        let mv = kids[0];
        assert_eq!((mv.from, mv.to), (27, 29));
        assert!(mv.king);
        assert_eq!(mv.captures(), 2);
    }
}
