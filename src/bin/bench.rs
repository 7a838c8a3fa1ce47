use checkers::{EngineConfig, Game};
use clap::Parser;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "checkers-bench", about = "Time choose_move from the opening")]
struct Args {
    #[arg(long, default_value_t = 5)]
    runs: usize,
    #[arg(long, default_value_t = 2500)]
    max_nodes: usize,
    #[arg(long, default_value_t = 2500)]
    max_evaluate: usize,
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let config = EngineConfig { max_nodes: a.max_nodes, max_evaluate: a.max_evaluate, ..EngineConfig::default() }.with_seed(a.seed);
    let mut total_ms = 0.0;
    for run in 0..a.runs {
        let mut game = Game::new(config.clone());
        let t0 = Instant::now();
        let best = game.choose_move();
        let ms = t0.elapsed().as_secs_f64() * 1000.0;
        total_ms += ms;
        let stats = game.last_stats();
        let text = best.and_then(|id| game.describe(id)).unwrap_or_else(|| "no move".to_string());
        println!("run {run}: {text} depth {} evaluated {} nodes {} in {ms:.1} ms", stats.depth, stats.evaluated, stats.nodes);
    }
    println!("avg {:.1} ms", total_ms / a.runs.max(1) as f64);
    Ok(())
}
