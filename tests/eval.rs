use checkers::search::{evaluate, Features};
use checkers::{Board, EngineConfig, Game, Move, Piece, Side};
use pretty_assertions::assert_eq;

// Cells given as `index` + piece letter, e.g. "14B 24b 8w".
fn board(cells: &str) -> Board {
    let mut b = Board::empty();
    for cell in cells.split_whitespace() {
        let (idx, kind) = cell.split_at(cell.len() - 1);
        let piece = kind.chars().next().and_then(Piece::from_char).expect("piece letter");
        b.set(idx.parse().expect("index"), piece);
    }
    b
}

fn scored_moves(game: &mut Game) -> Vec<(u8, u8, i32)> {
    let mut moves: Vec<(u8, u8, i32)> = game
        .legal_moves()
        .into_iter()
        .map(|id| {
            let n = &game.tree()[id];
            (n.mv.from, n.mv.to, n.value)
        })
        .collect();
    moves.sort_unstable();
    moves
}

fn play(game: &mut Game, from: u8, to: u8) {
    let id = game
        .legal_moves()
        .into_iter()
        .find(|&id| game.tree()[id].mv.from == from && game.tree()[id].mv.to == to)
        .expect("move is legal");
    game.commit(id).expect("commit");
}

#[test]
fn opening_moves_score_as_tuned() {
    let start = Board::standard();
    let expected = [(27, 23, 20), (28, 23, 2), (28, 24, 30), (29, 24, 30), (29, 25, 20), (30, 25, 30), (30, 26, 20)];
    for (from, to, value) in expected {
        let mut b = start;
        b.make_move(&Move::step(from, to, false));
        assert_eq!(evaluate(&b, Side::Black, &Features::default()).value, value, "{from}-{to}");
    }
}

#[test]
fn opening_features_count_denied_moves() {
    let mut b = Board::standard();
    b.make_move(&Move::step(29, 24, false));
    let f = evaluate(&b, Side::Black, &Features::default()).features;
    assert_eq!((f.mobil, f.deny, f.pin, f.threat, f.gradient), (5, 2, 0, 0, 0));
}

#[test]
fn king_jumps_and_replies_score_as_tuned() {
    let b = board("14B 24b 30b 34b 38b 8w 9w 12w 20W 21w 26w");
    let mut game = Game::from_board(EngineConfig::default().with_seed(1), b, Side::White);
    // A triple jump that crowns, and a king capture that pins two men.
    assert_eq!(scored_moves(&mut game), vec![(9, 39, 4411), (20, 28, 1855)]);
    play(&mut game, 20, 28);
    let f = game.tree()[game.current()].features;
    assert_eq!((f.mobil, f.deny, f.pin, f.threat, f.gradient), (4, 2, 2, 1, 1));
    assert_eq!(
        scored_moves(&mut game),
        vec![(14, 10, -1877), (14, 18, -1877), (14, 19, -1769), (30, 25, -1844), (34, 29, -1848), (38, 33, -1877)]
    );
}

#[test]
fn pinned_exchange_scores_as_tuned() {
    let b = board("19B 28b 29b 33b 37b 39b 6w 10w 11w 16w 17w 25W");
    let mut game = Game::from_board(EngineConfig::default().with_seed(1), b, Side::Black);
    assert_eq!(scored_moves(&mut game), vec![(29, 21, 1384)]);
    play(&mut game, 29, 21);
    let f = game.tree()[game.current()].features;
    assert_eq!((f.mobil, f.deny, f.pin), (3, 1, 1));
    assert_eq!(scored_moves(&mut game), vec![(16, 26, -584), (17, 25, -500)]);
}

#[test]
fn king_capture_and_double_recapture_score_as_tuned() {
    let b = board("11B 27b 29b 34b 38b 39b 5w 7w 16w 17w 26W");
    let mut game = Game::from_board(EngineConfig::default().with_seed(1), b, Side::Black);
    assert_eq!(scored_moves(&mut game), vec![(11, 21, 1698)]);
    play(&mut game, 11, 21);
    assert_eq!(scored_moves(&mut game), vec![(16, 26, -348), (17, 33, 372)]);
}
