//! Node pool and move tree.
//!
//! Nodes live in an arena and link to each other by index: father, eldest
//! child, next sibling. Siblings stay sorted by descending value.
//! `acquire`, `release_subtree`, `extract` and `insert` are the only
//! operations that change the shape of the tree.

use crate::board::{Move, Side};
use crate::search::eval::Features;
use crate::search::noise::{is_tie, TieBreak};
use std::ops::{Index, IndexMut};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize { self.0 as usize }
}

/// One candidate ply and the position it leads to.
#[derive(Clone, Debug)]
pub struct Node {
    pub(crate) father: Option<NodeId>,
    pub(crate) son: Option<NodeId>,
    pub(crate) brother: Option<NodeId>,
    /// Worth of the position to the side that made `mv`.
    pub value: i32,
    pub mv: Move,
    pub mover: Side,
    pub features: Features,
    live: bool,
}

impl Node {
    fn blank() -> Self {
        Self {
            father: None,
            son: None,
            brother: None,
            value: 0,
            mv: Move::default(),
            mover: Side::White,
            features: Features::default(),
            live: true,
        }
    }

    pub fn father(&self) -> Option<NodeId> { self.father }
    pub fn first_child(&self) -> Option<NodeId> { self.son }
    pub fn next_sibling(&self) -> Option<NodeId> { self.brother }
    pub fn is_expanded(&self) -> bool { self.son.is_some() }
}

pub struct Tree {
    nodes: Vec<Node>,
    free: Vec<NodeId>,
    live: usize,
    tie: TieBreak,
}

impl Tree {
    pub fn new(tie: TieBreak) -> Self {
        Self { nodes: Vec::with_capacity(1024), free: Vec::new(), live: 0, tie }
    }

    pub fn with_seed(seed: u64) -> Self { Self::new(TieBreak::seeded(seed)) }

    /// Nodes handed out and not yet released. The search budget counts these,
    /// regardless of how many slots the arena has recycled.
    pub fn live(&self) -> usize { self.live }

    /// Released slots waiting for reuse.
    pub fn pooled(&self) -> usize { self.free.len() }

    pub fn is_live(&self, id: NodeId) -> bool {
        self.nodes.get(id.index()).map_or(false, |n| n.live)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).filter(|n| n.live)
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> { self[id].son }

    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children { tree: self, next: self[id].son }
    }

    pub fn child_count(&self, id: NodeId) -> usize { self.children(id).count() }

    /// Fresh zeroed node, recycled from the free list when possible.
    pub fn acquire(&mut self) -> NodeId {
        self.live += 1;
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.index()] = Node::blank();
                id
            }
            None => {
                self.nodes.push(Node::blank());
                NodeId((self.nodes.len() - 1) as u32)
            }
        }
    }

    /// Unlink `id` and return it together with all its descendants to the pool.
    pub fn release_subtree(&mut self, id: NodeId) {
        if !self.is_live(id) { return; }
        self.extract(id);
        self.release_chain(Some(id));
    }

    /// Return every child of `id` (with their subtrees) to the pool.
    pub fn release_children(&mut self, id: NodeId) {
        let first = self[id].son.take();
        self.release_chain(first);
    }

    // Releases a sibling chain, each child before its next sibling.
    fn release_chain(&mut self, first: Option<NodeId>) {
        let mut stack: Vec<NodeId> = first.into_iter().collect();
        while let Some(id) = stack.pop() {
            let node = &mut self.nodes[id.index()];
            if let Some(b) = node.brother.take() { stack.push(b); }
            if let Some(s) = node.son.take() { stack.push(s); }
            node.father = None;
            node.live = false;
            self.free.push(id);
            self.live -= 1;
        }
    }

    /// Unlink `id` from its father's sibling chain. The father link survives so
    /// the node can be re-inserted.
    pub fn extract(&mut self, id: NodeId) {
        if let Some(father) = self[id].father {
            let next = self[id].brother;
            if self[father].son == Some(id) {
                self[father].son = next;
            } else {
                let mut cur = self[father].son;
                while let Some(c) = cur {
                    if self[c].brother == Some(id) {
                        self[c].brother = next;
                        break;
                    }
                    cur = self[c].brother;
                }
            }
        }
        self[id].brother = None;
    }

    /// Cut `id` loose from its father entirely, making it a root.
    pub fn detach(&mut self, id: NodeId) {
        self.extract(id);
        self[id].father = None;
    }

    /// Link `id` into its father's children, keeping descending value order.
    /// Near-ties are broken by the seeded coin.
    pub fn insert(&mut self, id: NodeId) {
        let Some(father) = self[id].father else { return };
        let val = self[id].value;
        let mut prev: Option<NodeId> = None;
        let mut cur = self[father].son;
        while let Some(c) = cur {
            let other = self[c].value;
            if is_tie(val, other) {
                if self.tie.ahead_of_tie() { break; }
            } else if val > other {
                break;
            }
            prev = Some(c);
            cur = self[c].brother;
        }
        self[id].brother = cur;
        match prev {
            None => self[father].son = Some(id),
            Some(p) => self[p].brother = Some(id),
        }
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;
    fn index(&self, id: NodeId) -> &Node { &self.nodes[id.index()] }
}

impl IndexMut<NodeId> for Tree {
    fn index_mut(&mut self, id: NodeId) -> &mut Node { &mut self.nodes[id.index()] }
}

pub struct Children<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;
    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree[id].brother;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child(tree: &mut Tree, father: NodeId, value: i32) -> NodeId {
        let id = tree.acquire();
        tree[id].father = Some(father);
        tree[id].value = value;
        tree.insert(id);
        id
    }

    fn values(tree: &Tree, id: NodeId) -> Vec<i32> {
        tree.children(id).map(|c| tree[c].value).collect()
    }

    #[test]
    fn insert_keeps_descending_order() {
        let mut t = Tree::with_seed(1);
        let root = t.acquire();
        for v in [10, 50, -20, 30, 100] { child(&mut t, root, v); }
        assert_eq!(values(&t, root), vec![100, 50, 30, 10, -20]);
    }

    #[test]
    fn extract_and_reinsert_moves_node() {
        let mut t = Tree::with_seed(1);
        let root = t.acquire();
        let a = child(&mut t, root, 10);
        child(&mut t, root, 50);
        child(&mut t, root, 30);
        t.extract(a);
        assert_eq!(values(&t, root), vec![50, 30]);
        t[a].value = 90;
        t.insert(a);
        assert_eq!(values(&t, root), vec![90, 50, 30]);
    }

    #[test]
    fn release_recycles_whole_subtree() {
        let mut t = Tree::with_seed(1);
        let root = t.acquire();
        let a = child(&mut t, root, 10);
        let b = child(&mut t, root, 5);
        child(&mut t, a, 1);
        child(&mut t, a, 2);
        assert_eq!(t.live(), 5);
        t.release_subtree(a);
        assert_eq!(t.live(), 2);
        assert_eq!(t.pooled(), 3);
        assert!(!t.is_live(a));
        assert_eq!(t.children(root).collect::<Vec<_>>(), vec![b]);
        // Recycled slots come back zeroed.
        let c = t.acquire();
        assert_eq!(t[c].value, 0);
        assert!(t[c].first_child().is_none());
        assert_eq!(t.pooled(), 2);
    }

    #[test]
    fn release_children_empties_the_list() {
        let mut t = Tree::with_seed(3);
        let root = t.acquire();
        for v in 0..6 { child(&mut t, root, v * 10); }
        t.release_children(root);
        assert_eq!(t.live(), 1);
        assert!(t.first_child(root).is_none());
    }

    #[test]
    fn ties_are_shuffled_but_reproducible() {
        let order = |seed: u64| {
            let mut t = Tree::with_seed(seed);
            let root = t.acquire();
            let ids: Vec<NodeId> = (0..8).map(|_| child(&mut t, root, 7)).collect();
            t.children(root).map(|c| ids.iter().position(|&i| i == c).unwrap()).collect::<Vec<_>>()
        };
        assert_eq!(order(99), order(99));
        let mut shuffled = false;
        for seed in 0..16 { if order(seed) != (0..8).collect::<Vec<_>>() { shuffled = true; } }
        assert!(shuffled);
    }
}
