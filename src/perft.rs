// Move-path counts through the real generator, for validating move generation
use crate::board::{Board, Side};
use crate::search::movegen::generate;
use crate::search::{NodeId, Tree};

fn walk(tree: &mut Tree, board: &Board, node: NodeId, depth: u32, forced_jumps: bool) -> u64 {
    if depth == 0 { return 1; }
    generate(tree, board, node, forced_jumps);
    let kids: Vec<NodeId> = tree.children(node).collect();
    let mut nodes = 0u64;
    for id in kids {
        let mut child = *board;
        child.make_move(&tree[id].mv);
        nodes += walk(tree, &child, id, depth - 1, forced_jumps);
    }
    tree.release_children(node);
    nodes
}

pub fn perft(board: &Board, to_move: Side, depth: u32, forced_jumps: bool) -> u64 {
    let mut tree = Tree::with_seed(0);
    let root = tree.acquire();
    tree[root].mover = to_move.opponent();
    walk(&mut tree, board, root, depth, forced_jumps)
}
