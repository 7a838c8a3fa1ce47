use checkers::search::{DEPTH_PENALTY, DECIDED};
use checkers::{Board, EngineConfig, Game, NodeId, Side};
use pretty_assertions::assert_eq;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

fn small(seed: u64) -> EngineConfig {
    EngineConfig { max_evaluate: 600, max_nodes: 1200, ..EngineConfig::default().with_seed(seed) }
}

#[test]
fn opening_move_is_a_quiet_black_step() {
    let mut game = Game::new(EngineConfig::default().with_seed(7));
    let id = game.choose_move().expect("a move");
    let node = game.node(id).expect("live");
    assert_eq!(node.father(), Some(game.current()));
    assert_eq!(node.mover, Side::Black);
    let mv = node.mv;
    assert!(!mv.is_capture());
    assert!(game.board().at(mv.from as usize).belongs_to(Side::Black));
    assert!(game.board().at(mv.to as usize).is_empty());
    assert!(matches!(mv.from - mv.to, 4 | 5), "{mv} is not a forward step");
    // Nothing is won or lost yet.
    assert!(node.value.abs() < 1200, "opening value {}", node.value);
    assert!(game.last_stats().depth >= 1);
}

#[test]
fn tiny_node_budget_still_answers() {
    let config = EngineConfig { max_nodes: 10, ..EngineConfig::default().with_seed(2) };
    let mut game = Game::new(config);
    let id = game.choose_move().expect("a move");
    assert_eq!(game.node(id).and_then(|n| n.father()), Some(game.current()));
}

#[test]
fn backed_up_values_follow_the_best_child() {
    let mut game = Game::new(small(5));
    game.choose_move().expect("a move");
    let tree = game.tree();
    let mut stack: Vec<NodeId> = vec![game.current()];
    let mut checked = 0;
    while let Some(id) = stack.pop() {
        let kids: Vec<NodeId> = tree.children(id).collect();
        if let Some(&best) = kids.first() {
            let penalty = if kids.len() >= 2 { DEPTH_PENALTY } else { 0 };
            assert_eq!(tree[id].value, -tree[best].value - penalty);
            checked += 1;
        }
        stack.extend(kids);
    }
    assert!(checked > 1);
}

#[test]
fn same_seed_same_choice() {
    let mut a = Game::new(small(21));
    let mut b = Game::new(small(21));
    let (x, y) = (a.choose_move().expect("move"), b.choose_move().expect("move"));
    assert_eq!(a.tree()[x].mv, b.tree()[y].mv);
    assert_eq!(a.tree()[x].value, b.tree()[y].value);
    assert_eq!(a.last_stats(), b.last_stats());
}

#[test]
fn budgets_are_respected() {
    let config = small(4);
    let mut game = Game::new(config.clone());
    game.choose_move().expect("a move");
    let stats = game.last_stats();
    // The live-node check runs before each expansion, so one expansion may overshoot it.
    assert!(stats.nodes <= config.max_nodes + 64, "nodes {}", stats.nodes);
    assert!(stats.evaluated > 0);
}

#[test]
fn capture_is_chosen_when_forced() {
    let board = Board::from_diagram(
        "
.....w..
........
........
........
...w....
..b.....
........
b.......
",
    )
    .expect("diagram");
    let mut game = Game::from_board(small(3), board, Side::Black);
    let id = game.choose_move().expect("a move");
    assert_eq!(game.tree()[id].mv.to_string(), "C6xE4");
}

#[test]
fn lost_position_has_no_move() {
    let mut b = Board::empty();
    b.set(20, checkers::Piece::WHITE);
    let mut game = Game::from_board(small(1), b, Side::Black);
    assert!(game.choose_move().is_none());
    assert!(game.tree()[game.current()].value.abs() >= DECIDED);
}

#[test]
fn raised_abort_flag_stops_deepening() {
    let mut game = Game::new(small(8));
    game.set_abort(Arc::new(AtomicBool::new(true)));
    assert!(game.choose_move().is_some());
    assert_eq!(game.last_stats().depth, 0);
}
