use chess_vs_ai::uci::UciEngine;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let mut engine = UciEngine::new();
    engine.run_loop()?;
    Ok(())
}
