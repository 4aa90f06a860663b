use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use chess_vs_ai::board::cozy::Position;
use chess_vs_ai::board::RulesEngine;
use chess_vs_ai::game::{GameSession, GameSettings, PlayerColor};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play chess against a minimax engine", long_about = None)]
struct Args {
    /// Search depth in plies (1-5)
    #[arg(long)]
    depth: Option<u32>,

    /// Your color: 'w' for white, 'b' for black
    #[arg(long)]
    color: Option<String>,

    /// Starting FEN position
    #[arg(long)]
    fen: Option<String>,

    /// JSON settings file; command line flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// List legal moves before each of your turns
    #[arg(long)]
    show_legal_moves: Option<bool>,

    /// Print search statistics
    #[arg(long)]
    verbose: bool,
}

fn parse_color(color_str: &str) -> Result<PlayerColor> {
    match color_str.to_lowercase().as_str() {
        "w" | "white" => Ok(PlayerColor::White),
        "b" | "black" => Ok(PlayerColor::Black),
        _ => anyhow::bail!("Invalid color: use 'w' or 'b'"),
    }
}

fn settings_from_args(args: &Args) -> Result<GameSettings> {
    let mut settings = match &args.config {
        Some(path) => GameSettings::load(path)?,
        None => GameSettings::default(),
    };
    if let Some(d) = args.depth { settings.difficulty = d; }
    if let Some(c) = args.color.as_deref() { settings.player_color = parse_color(c)?; }
    if let Some(show) = args.show_legal_moves { settings.show_legal_moves = show; }
    settings.validate()?;
    Ok(settings)
}

fn legal_moves_text(pos: &Position) -> String {
    let moves: Vec<String> = pos.legal_moves().into_iter().map(|m| pos.move_to_uci(m)).collect();
    moves.join(" ")
}

fn print_help() {
    println!("Commands: <move> (e.g. e2e4), moves, history, new, resign, quit");
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let settings = settings_from_args(&args)?;

    let position = match args.fen.as_deref() {
        Some(fen) => Position::from_fen(fen)?,
        None => Position::startpos(),
    };
    let mut game = GameSession::with_position(settings, position)?;
    print_help();

    let stdin = io::stdin();
    loop {
        println!("\n{}", game.render());
        if let Some(last) = game.history().last() { println!("Last move: {last}"); }
        println!("{}", game.status_text());

        if game.is_ai_turn() {
            println!("AI is thinking...");
            let start = Instant::now();
            let res = game.play_ai()?;
            match res.best_move {
                Some(_) => {
                    let played = game.history().last().cloned().unwrap_or_default();
                    println!("Computer plays: {played}");
                    if args.verbose {
                        println!("score {} nodes {} elapsed {:.2}s", res.score, res.nodes, start.elapsed().as_secs_f32());
                    }
                }
                None => println!("No move available."),
            }
            continue;
        }

        if game.in_progress() && game.settings().show_legal_moves {
            println!("Legal moves: {}", legal_moves_text(game.position()));
        }
        print!("> ");
        io::stdout().flush()?;
        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 { break; }
        match input.trim() {
            "" => {}
            "quit" | "exit" => break,
            "help" => print_help(),
            "new" => game.new_game(),
            "history" => println!("{}", game.move_history_text()),
            "moves" => println!("{}", legal_moves_text(game.position())),
            "resign" => match game.resign() {
                Ok(outcome) => println!("{outcome}"),
                Err(e) => println!("{e}"),
            },
            text => {
                if let Err(e) = game.play_human(text) { println!("{e}"); }
            }
        }
    }
    Ok(())
}
