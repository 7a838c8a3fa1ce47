use crate::board::Board;
use crate::config::EngineConfig;
use crate::search::eval::WIN;
use crate::search::movegen::generate;
use crate::search::tree::{NodeId, Tree};
use log::{debug, trace};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Root values at or beyond this magnitude are decided games.
pub const DECIDED: i32 = 28_000;

/// Subtracted when backing up a node that has a real choice.
pub const DEPTH_PENALTY: i32 = 4;

/// Nodes kept in reserve for best-line descent after full-width search stops.
const DESCENT_RESERVE_PER_PLY: usize = 10;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions evaluated during deepening.
    pub evaluated: usize,
    /// Live tree nodes when the search finished.
    pub nodes: usize,
    /// Last full-width level that completed.
    pub depth: usize,
    /// Root value from the side that made the root move.
    pub value: i32,
}

/// Negamax value of `node` from its best (first) child.
pub fn back_up(tree: &mut Tree, node: NodeId) {
    if let Some(best) = tree.first_child(node) {
        let penalty = if tree[best].next_sibling().is_some() { DEPTH_PENALTY } else { 0 };
        tree[node].value = -tree[best].value - penalty;
    }
}

/// Anytime tree search: full-width iterative deepening, then best-line descent,
/// bounded by a live-node budget, an evaluation budget and an abort flag.
pub struct Searcher {
    max_evaluate: usize,
    max_nodes: usize,
    max_ply: usize,
    forced_jumps: bool,
    evaluated: usize,
    abort: Option<Arc<AtomicBool>>,
    stats: SearchStats,
}

impl Default for Searcher {
    fn default() -> Self { Self::new(&EngineConfig::default()) }
}

impl Searcher {
    pub fn new(config: &EngineConfig) -> Self {
        let mut s = Self {
            max_evaluate: 0,
            max_nodes: 0,
            max_ply: 0,
            forced_jumps: true,
            evaluated: 0,
            abort: None,
            stats: SearchStats::default(),
        };
        s.configure(config);
        s
    }

    pub fn configure(&mut self, config: &EngineConfig) {
        self.max_evaluate = config.max_evaluate;
        self.max_nodes = config.max_nodes;
        self.max_ply = config.max_ply;
        self.forced_jumps = config.forced_jumps;
    }

    pub fn set_abort(&mut self, flag: Arc<AtomicBool>) { self.abort = Some(flag); }
    pub fn set_forced_jumps(&mut self, on: bool) { self.forced_jumps = on; }
    pub fn forced_jumps(&self) -> bool { self.forced_jumps }
    pub fn stats(&self) -> SearchStats { self.stats }

    fn aborted(&self) -> bool {
        self.abort.as_ref().map_or(false, |f| f.load(Ordering::Relaxed))
    }

    /// Generate and score the children of `node` unless it already has some or
    /// is a won position. A node with no moves becomes a win for its mover.
    pub fn expand(&mut self, tree: &mut Tree, board: &Board, node: NodeId) {
        if tree[node].is_expanded() || tree[node].value > DECIDED { return; }
        self.evaluated += generate(tree, board, node, self.forced_jumps);
        if tree[node].is_expanded() { back_up(tree, node); } else { tree[node].value = WIN; }
    }

    /// Expand everything under `node` down to `level` plies. Captures and forced
    /// replies do not use up a level. Returns false once a budget runs out or
    /// the search is aborted.
    pub fn full_width(&mut self, tree: &mut Tree, board: &Board, node: NodeId, mut level: usize) -> bool {
        let reserve = self.max_ply.saturating_mul(DESCENT_RESERVE_PER_PLY);
        if self.aborted() || tree.live() > self.max_nodes.saturating_sub(reserve) || self.evaluated > self.max_evaluate {
            return false;
        }
        self.expand(tree, board, node);
        let Some(first) = tree.first_child(node) else { return true };
        if !tree[first].mv.is_capture() && tree[first].next_sibling().is_some() {
            if level < 1 { return true; }
            level -= 1;
        }
        // Snapshot: re-insertion reorders the list while we walk it.
        let sons: Vec<NodeId> = tree.children(node).collect();
        let mut ok = true;
        for son in sons {
            if !ok { break; }
            let mut child = *board;
            child.make_move(&tree[son].mv);
            ok = self.full_width(tree, &child, son, level);
            tree.extract(son);
            tree.insert(son);
        }
        back_up(tree, node);
        ok
    }

    /// Follow the current best line one ply deeper and re-sort on the way back.
    pub fn descend(&mut self, tree: &mut Tree, board: &Board, node: NodeId, depth: usize) -> bool {
        if self.aborted() || tree.live() > self.max_nodes || depth >= self.max_ply { return false; }
        match tree.first_child(node) {
            Some(best) => {
                let mut child = *board;
                child.make_move(&tree[best].mv);
                let ok = self.descend(tree, &child, best, depth + 1);
                tree.extract(best);
                tree.insert(best);
                back_up(tree, node);
                ok
            }
            None => {
                // A finished game at the end of the best line gives nothing more to descend into.
                self.expand(tree, board, node);
                tree[node].is_expanded()
            }
        }
    }

    /// Recommend a child of `root`, or `None` when the side to move has lost.
    /// The tree is left searched; committing the move is up to the caller.
    pub fn choose_move(&mut self, tree: &mut Tree, board: &Board, root: NodeId) -> Option<NodeId> {
        self.expand(tree, board, root);
        let first = tree.first_child(root)?;
        self.evaluated = 0;
        let mut depth = 0;
        if tree[first].next_sibling().is_some() {
            let mut level = 1;
            while tree[root].value.abs() < DECIDED && self.full_width(tree, board, root, level) {
                trace!("level {} done: value {} evaluated {} nodes {}", level, tree[root].value, self.evaluated, tree.live());
                depth = level;
                level += 1;
            }
            while tree[root].value.abs() < DECIDED {
                if !self.descend(tree, board, root, 0) { break; }
            }
        }
        self.stats = SearchStats { evaluated: self.evaluated, nodes: tree.live(), depth, value: tree[root].value };
        debug!("search: depth {} evaluated {} nodes {} value {}", depth, self.evaluated, tree.live(), tree[root].value);
        tree.first_child(root)
    }
}
