use crate::board::Side;
use crate::config::EngineConfig;
use crate::game::{Game, GameStatus};
use log::{debug, info};

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub max_plies: usize,
    /// Game `i` is seeded with `seed + i`.
    pub seed: u64,
    pub config: EngineConfig,
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self { games: 10, max_plies: 200, seed: 42, config: EngineConfig::default() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Opponent had no move.
    Won(Side),
    /// Opponent's best line was a forced loss.
    Resigned(Side),
    Unfinished,
}

impl Outcome {
    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::Won(s) => Some(s),
            Outcome::Resigned(loser) => Some(loser.opponent()),
            Outcome::Unfinished => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GameRecord {
    pub moves: Vec<String>,
    pub outcome: Outcome,
}

/// Engine against itself from the opening until a result or `max_plies`.
pub fn play_game(params: &SelfPlayParams, index: usize) -> GameRecord {
    let config = params.config.clone().with_seed(params.seed.wrapping_add(index as u64));
    let mut game = Game::new(config);
    let mut moves = Vec::new();
    let outcome = loop {
        if moves.len() >= params.max_plies { break Outcome::Unfinished; }
        if let GameStatus::Won(side) = game.status() { break Outcome::Won(side); }
        let Some(best) = game.choose_move() else { break Outcome::Won(game.side_to_move().opponent()) };
        if game.is_resignation(best) { break Outcome::Resigned(game.side_to_move()); }
        let mv = game.node(best).map(|n| n.mv.to_string()).unwrap_or_default();
        if let Some(text) = game.describe(best) { debug!("{}: {}", moves.len() + 1, text); }
        if game.commit(best).is_err() { break Outcome::Unfinished; }
        moves.push(mv);
    };
    info!("game {} finished after {} plies: {:?}", index, moves.len(), outcome);
    GameRecord { moves, outcome }
}

pub fn generate_games(params: &SelfPlayParams, mut on_game: impl FnMut(&GameRecord)) -> Vec<GameRecord> {
    let mut games = Vec::with_capacity(params.games);
    for i in 0..params.games {
        let record = play_game(params, i);
        on_game(&record);
        games.push(record);
    }
    games
}
