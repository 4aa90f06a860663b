use chess_vs_ai::board::cozy::Position;
use chess_vs_ai::board::RulesEngine;
use chess_vs_ai::uci::UciEngine;
use cozy_chess::Color;

fn send(engine: &mut UciEngine, line: &str) -> String {
    let mut out = Vec::new();
    engine.handle_line(line, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn apply_startpos_moves_sequence() {
    let moves = vec!["e2e4".to_string(), "e7e5".to_string(), "g1f3".to_string()];
    let pos = Position::set_from_start_and_moves(&moves).expect("legal move sequence");
    assert_eq!(pos.side_to_move(), Color::Black, "expected black to move after 3 plies");
}

#[test]
fn go_depth_reports_legal_bestmove() {
    let mut e = UciEngine::new();
    send(&mut e, "position startpos moves e2e4");
    let out = send(&mut e, "go depth 2");
    let best = out.lines().find_map(|l| l.strip_prefix("bestmove ")).expect("bestmove line").to_string();
    assert!(e.position().parse_move(&best).is_ok(), "illegal bestmove {best}");
    assert_eq!(e.position().ply(), 1, "search must leave the position untouched");
}

#[test]
fn go_depth_zero_and_mated_positions_have_no_move() {
    let mut e = UciEngine::new();
    send(&mut e, "position startpos");
    assert!(send(&mut e, "go depth 0").contains("bestmove 0000"));
    send(&mut e, "position fen rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    assert!(send(&mut e, "go depth 3").contains("bestmove 0000"));
}

#[test]
fn fen_with_moves() {
    let mut e = UciEngine::new();
    send(&mut e, "position fen 6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1 moves a1a8");
    assert!(e.position().is_checkmate());
    send(&mut e, "ucinewgame");
    assert_eq!(e.position().fen(), Position::startpos().fen());
}
