use crate::board::mv::describe;
use crate::board::{Board, Move, Piece, Side, Square};
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::search::{breakdown, Breakdown, Node, NodeId, SearchStats, Searcher, TieBreak, Tree, WIN};
use log::{debug, info};
use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Boards saved before committed captures; captures are undone from these.
pub const JUMP_SNAPSHOTS: usize = 24;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// The other side has no legal move.
    Won(Side),
}

/// Owns the board and the move tree. The current position is a node in the
/// tree; the line played since the undo anchor is kept so it can be taken back.
pub struct Game {
    config: EngineConfig,
    board: Board,
    tree: Tree,
    searcher: Searcher,
    root: NodeId,
    anchor: NodeId,
    snapshots: VecDeque<Board>,
}

impl Default for Game {
    fn default() -> Self { Self::new(EngineConfig::default()) }
}

impl Game {
    /// Standard opening, Black to move.
    pub fn new(config: EngineConfig) -> Self {
        Self::from_board(config, Board::standard(), Side::Black)
    }

    /// Arbitrary starting position.
    pub fn from_board(config: EngineConfig, board: Board, to_move: Side) -> Self {
        let mut tree = Tree::new(TieBreak::new(config.seed));
        let root = tree.acquire();
        tree[root].mover = to_move.opponent();
        let searcher = Searcher::new(&config);
        Self { config, board, tree, searcher, root, anchor: root, snapshots: VecDeque::with_capacity(JUMP_SNAPSHOTS) }
    }

    /// Throw the whole game away and set up the opening again.
    pub fn new_game(&mut self) {
        self.tree.release_subtree(self.anchor);
        self.board = Board::standard();
        self.snapshots.clear();
        let root = self.tree.acquire();
        self.tree[root].mover = Side::White;
        self.root = root;
        self.anchor = root;
        info!("new game, {} nodes still live", self.tree.live());
    }

    pub fn board(&self) -> &Board { &self.board }
    pub fn config(&self) -> &EngineConfig { &self.config }
    pub fn tree(&self) -> &Tree { &self.tree }
    pub fn current(&self) -> NodeId { self.root }
    pub fn anchor(&self) -> NodeId { self.anchor }
    pub fn node(&self, id: NodeId) -> Option<&Node> { self.tree.get(id) }
    pub fn side_to_move(&self) -> Side { self.tree[self.root].mover.opponent() }
    pub fn last_stats(&self) -> SearchStats { self.searcher.stats() }

    pub fn set_config(&mut self, config: EngineConfig) {
        let rule_changed = config.forced_jumps != self.config.forced_jumps;
        self.searcher.configure(&config);
        self.config = config;
        if rule_changed {
            self.tree.release_children(self.root);
            // A decided value would stop the moves being generated again.
            self.tree[self.root].value = 0;
        }
    }

    /// Switch the forced-jump rule; the current moves are regenerated under it.
    pub fn set_forced_jumps(&mut self, on: bool) {
        let config = EngineConfig { forced_jumps: on, ..self.config.clone() };
        self.set_config(config);
        info!("forced jumps {}", if on { "on" } else { "off" });
    }

    pub fn smarter(&mut self) {
        let mut config = self.config.clone();
        config.smarter();
        self.set_config(config);
    }

    pub fn dumber(&mut self) {
        let mut config = self.config.clone();
        config.dumber();
        self.set_config(config);
    }

    pub fn set_abort(&mut self, flag: Arc<AtomicBool>) { self.searcher.set_abort(flag); }

    /// Children of the current position, best first.
    pub fn legal_moves(&mut self) -> Vec<NodeId> {
        self.searcher.expand(&mut self.tree, &self.board, self.root);
        self.tree.children(self.root).collect()
    }

    pub fn find_move(&mut self, from: Square, to: Square) -> Option<NodeId> {
        let (from, to) = (from.index() as u8, to.index() as u8);
        self.legal_moves().into_iter().find(|&id| self.tree[id].mv.from == from && self.tree[id].mv.to == to)
    }

    pub fn status(&mut self) -> GameStatus {
        if self.legal_moves().is_empty() { GameStatus::Won(self.side_to_move().opponent()) } else { GameStatus::Playing }
    }

    /// Search from the current position and return the recommended child.
    pub fn choose_move(&mut self) -> Option<NodeId> {
        self.searcher.choose_move(&mut self.tree, &self.board, self.root)
    }

    /// A recommendation this bad means the engine sees a forced loss.
    pub fn is_resignation(&self, id: NodeId) -> bool {
        self.tree.get(id).map_or(false, |n| n.value <= -WIN)
    }

    /// Play child `id` of the current position. The alternatives are released;
    /// the chosen node keeps whatever subtree the search built under it.
    pub fn commit(&mut self, id: NodeId) -> Result<()> {
        if !self.tree.is_live(id) || self.tree[id].father() != Some(self.root) {
            return Err(Error::UnknownMove);
        }
        let mv = self.tree[id].mv;
        if mv.is_capture() {
            if self.snapshots.len() == JUMP_SNAPSHOTS { self.drop_oldest_snapshot(); }
            self.snapshots.push_back(self.board);
        }
        self.board.make_move(&mv);
        self.tree.extract(id);
        self.tree.release_children(self.root);
        self.tree.insert(id);
        self.root = id;
        info!("{} {} ({:+})", self.tree[id].mover, describe(&mv), self.tree[id].value);
        Ok(())
    }

    /// Take back the last committed move. Returns `None` at the undo anchor.
    pub fn undo(&mut self) -> Option<Move> {
        if self.root == self.anchor { return None; }
        let id = self.root;
        let mv = self.tree[id].mv;
        let father = self.tree[id].father()?;
        if mv.is_capture() {
            self.board = self.snapshots.pop_back()?;
        } else {
            let (from, to) = (mv.from as usize, mv.to as usize);
            let p = self.board.at(to);
            self.board.set(from, if mv.king { p.uncrowned() } else { p });
            self.board.set(to, Piece::EMPTY);
        }
        self.tree.release_subtree(id);
        self.root = father;
        // Forget any stale "game over" value on the restored position.
        self.tree[father].value = 0;
        info!("undo {}", describe(&mv));
        Some(mv)
    }

    /// Expected continuation: the best-child chain below the current position.
    pub fn principal_variation(&self) -> Vec<NodeId> {
        let mut line = Vec::new();
        let mut cur = self.tree.first_child(self.root);
        while let Some(id) = cur {
            line.push(id);
            cur = self.tree.first_child(id);
        }
        line
    }

    /// Evaluation table for the move that produced the current position.
    pub fn explain_last(&self) -> Option<Breakdown> {
        if self.root == self.anchor { return None; }
        let node = &self.tree[self.root];
        let father = node.father()?;
        let table = breakdown(&self.board, node.mover, &self.tree[father].features);
        debug!("{} {}\n{}", node.mover, describe(&node.mv), table);
        Some(table)
    }

    /// One-line description such as `Black jumps from C6 to A4, B5 removed (+12)`.
    pub fn describe(&self, id: NodeId) -> Option<String> {
        self.tree.get(id).map(|n| format!("{} {} ({:+})", n.mover, describe(&n.mv), n.value))
    }

    // Played line after the anchor, oldest first.
    fn played_line(&self) -> Vec<NodeId> {
        let mut line = Vec::new();
        let mut cur = self.root;
        while cur != self.anchor {
            line.push(cur);
            match self.tree[cur].father() { Some(f) => cur = f, None => break }
        }
        line.reverse();
        line
    }

    // The oldest capture loses its snapshot, so undo must stop short of it.
    fn drop_oldest_snapshot(&mut self) {
        self.snapshots.pop_front();
        let Some(jump) = self.played_line().into_iter().find(|&id| self.tree[id].mv.is_capture()) else { return };
        let old = self.anchor;
        self.tree.detach(jump);
        self.tree.release_subtree(old);
        self.anchor = jump;
        info!("undo history trimmed, {} nodes live", self.tree.live());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_advances_when_snapshots_overflow() {
        let mut game = Game::new(EngineConfig::default().with_seed(3));
        for _ in 0..JUMP_SNAPSHOTS { game.snapshots.push_back(Board::empty()); }
        let anchor = game.anchor();
        // Mark a played move as a capture (over a border cell, so the board is untouched).
        let id = game.legal_moves()[0];
        game.tree[id].mv.jumps = 1 << 22;
        game.commit(id).unwrap();
        assert_eq!(game.snapshots.len(), JUMP_SNAPSHOTS);
        // The next capture pushes out the oldest snapshot.
        let next = game.legal_moves()[0];
        game.tree[next].mv.jumps = 1 << 13;
        game.commit(next).unwrap();
        assert_ne!(game.anchor(), anchor);
        assert_eq!(game.anchor(), id);
        assert!(game.tree.get(anchor).is_none());
        assert_eq!(game.snapshots.len(), JUMP_SNAPSHOTS);
    }
}
