use anyhow::Result;
use checkers::selfplay::{generate_games, SelfPlayParams};
use checkers::{EngineConfig, Side};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "checkers-selfplay", about = "Play the engine against itself and tally results")]
struct Args {
    #[arg(long, default_value_t = 10)]
    games: usize,
    #[arg(long, default_value_t = 200)]
    max_plies: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// JSON engine config; the flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    max_nodes: Option<usize>,
    #[arg(long)]
    max_evaluate: Option<usize>,
    #[arg(long)]
    max_ply: Option<usize>,
    #[arg(long)]
    no_forced_jumps: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let a = Args::parse();
    let mut config = match &a.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(n) = a.max_nodes { config.max_nodes = n; }
    if let Some(n) = a.max_evaluate { config.max_evaluate = n; }
    if let Some(n) = a.max_ply { config.max_ply = n; }
    if a.no_forced_jumps { config.forced_jumps = false; }

    let params = SelfPlayParams { games: a.games, max_plies: a.max_plies, seed: a.seed, config };
    eprintln!("Playing {} games (max_nodes={}, max_evaluate={}, max_ply={}, forced_jumps={})",
        params.games, params.config.max_nodes, params.config.max_evaluate, params.config.max_ply, params.config.forced_jumps);

    let bar = ProgressBar::new(params.games as u64);
    bar.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games {msg}")?);
    let games = generate_games(&params, |g| {
        bar.set_message(format!("last: {} plies", g.moves.len()));
        bar.inc(1);
    });
    bar.finish();

    let black = games.iter().filter(|g| g.outcome.winner() == Some(Side::Black)).count();
    let white = games.iter().filter(|g| g.outcome.winner() == Some(Side::White)).count();
    let open = games.len() - black - white;
    let plies: usize = games.iter().map(|g| g.moves.len()).sum();
    println!("Black {black}  White {white}  unfinished {open}  avg plies {:.1}", plies as f64 / games.len().max(1) as f64);
    Ok(())
}
