use std::io::{self, BufRead, Write};

use log::{debug, warn};

use crate::board::cozy::Position;
use crate::error::Result;
use crate::game::DEFAULT_DIFFICULTY;
use crate::search::alphabeta::Searcher;

pub struct UciEngine {
    pos: Position,
    searcher: Searcher,
}

impl Default for UciEngine {
    fn default() -> Self { Self::new() }
}

impl UciEngine {
    pub fn new() -> Self { Self { pos: Position::startpos(), searcher: Searcher::default() } }

    pub fn position(&self) -> &Position { &self.pos }

    fn cmd_uci(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "id name chess-vs-ai")?;
        writeln!(out, "id author chess-vs-ai contributors")?;
        writeln!(out, "uciok")
    }

    fn cmd_position(&mut self, args: &str) -> Result<()> {
        // position startpos [moves ...] | position fen <6 fields> [moves ...]
        let mut tokens = args.split_whitespace();
        let mut pos = match tokens.next() {
            Some("startpos") => Position::startpos(),
            Some("fen") => {
                let fen_fields: Vec<&str> = tokens.by_ref().take(6).collect();
                Position::from_fen(&fen_fields.join(" "))?
            }
            _ => return Ok(()),
        };
        if let Some("moves") = tokens.next() {
            for m in tokens { pos.make_move_uci(m)?; }
        }
        self.pos = pos;
        Ok(())
    }

    fn cmd_go(&mut self, args: &str, out: &mut impl Write) -> io::Result<()> {
        let mut depth = DEFAULT_DIFFICULTY;
        let mut tokens = args.split_whitespace();
        while let Some(tok) = tokens.next() {
            if tok == "depth" {
                if let Some(d) = tokens.next().and_then(|s| s.parse::<u32>().ok()) { depth = d; }
            }
        }
        let res = match self.searcher.search_depth(&mut self.pos, depth) {
            Ok(res) => res,
            Err(e) => {
                warn!("go depth {depth}: {e}");
                return Ok(());
            }
        };
        let best = res.best_move.map_or_else(|| "0000".to_string(), |m| self.pos.move_to_uci(m));
        writeln!(out, "info depth {} score cp {} nodes {}", depth, res.score, res.nodes)?;
        writeln!(out, "bestmove {}", best)
    }

    /// Handles one command line; returns false on `quit`.
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let line = line.trim();
        debug!("uci <- {line}");
        let res = match line {
            "" => Ok(()),
            "uci" => { self.cmd_uci(out)?; Ok(()) }
            "isready" => { writeln!(out, "readyok")?; Ok(()) }
            "ucinewgame" => { self.pos = Position::startpos(); Ok(()) }
            "quit" => return Ok(false),
            "go" => { self.cmd_go("", out)?; Ok(()) }
            _ => {
                if let Some(rest) = line.strip_prefix("position ") {
                    self.cmd_position(rest)
                } else if let Some(rest) = line.strip_prefix("go ") {
                    self.cmd_go(rest, out)?;
                    Ok(())
                } else {
                    Ok(())
                }
            }
        };
        if let Err(e) = res { warn!("{line}: {e}"); }
        out.flush()?;
        Ok(true)
    }

    pub fn run_loop(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for line in stdin.lock().lines() {
            if !self.handle_line(&line?, &mut out)? { break; }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(engine: &mut UciEngine, line: &str) -> String {
        let mut out = Vec::new();
        engine.handle_line(line, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn handshake() {
        let mut e = UciEngine::new();
        assert!(run(&mut e, "uci").ends_with("uciok\n"));
        assert_eq!(run(&mut e, "isready"), "readyok\n");
        let mut sink = Vec::new();
        assert!(!e.handle_line("quit", &mut sink).unwrap());
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> { Err(io::ErrorKind::BrokenPipe.into()) }
        fn flush(&mut self) -> io::Result<()> { Ok(()) }
    }

    #[test]
    fn go_reports_write_errors() {
        let mut e = UciEngine::new();
        let err = e.handle_line("go depth 1", &mut ClosedPipe).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn bad_position_keeps_previous() {
        let mut e = UciEngine::new();
        run(&mut e, "position startpos moves e2e4");
        let fen = e.position().fen();
        run(&mut e, "position startpos moves e2e4 e2e4");
        assert_eq!(e.position().fen(), fen);
    }
}
