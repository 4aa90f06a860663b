use chess_vs_ai::board::cozy::Position;
use chess_vs_ai::board::RulesEngine;
use chess_vs_ai::search::alphabeta::Searcher;
use chess_vs_ai::search::eval::{eval_cp, evaluate, SCORE_BOUND};

#[test]
fn search_returns_legal_move_startpos() {
    let mut p = Position::startpos();
    let legal = p.legal_moves();
    assert_eq!(legal.len(), 20);
    let mut searcher = Searcher::default();
    let res = searcher.search_depth(&mut p, 1).unwrap();
    let bm = res.best_move.expect("no move found at depth 1");
    assert!(legal.contains(&bm), "{bm} is not an opening move");
    assert!(res.score.abs() < SCORE_BOUND);
    let again = searcher.search_depth(&mut p, 1).unwrap();
    assert_eq!(again.best_move, res.best_move);
}

#[test]
fn search_prefers_winning_queen_capture() {
    let mut p = Position::from_fen("k7/8/8/8/8/8/3qQ3/7K w - - 0 1").expect("valid fen");
    let res = Searcher::default().search_depth(&mut p, 1).unwrap();
    let bm = res.best_move.expect("expected a best move");
    assert_eq!(p.move_to_uci(bm), "e2d2", "expected Qe2xd2 as best move, got {bm}");
}

#[test]
fn depth_zero_matches_static_eval() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "k7/8/8/8/8/8/3qQ3/7K w - - 0 1",
        "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
    ];
    for fen in fens {
        let mut p = Position::from_fen(fen).expect("valid fen");
        for maximizing in [true, false] {
            let res = Searcher::default().search(&mut p, 0, maximizing).unwrap();
            assert_eq!((res.score, res.best_move), (evaluate(&p), None), "FEN {fen}");
        }
    }
}

#[test]
fn stalemate_has_no_move() {
    let mut p = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("valid fen");
    for depth in [0, 1, 3] {
        let res = Searcher::default().search_depth(&mut p, depth).unwrap();
        assert_eq!((res.score, res.best_move), (0, None), "depth {depth}");
    }
}

#[test]
fn terminal_root_returns_evaluation() {
    let mut p = Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").expect("valid fen");
    let res = Searcher::default().search_depth(&mut p, 3).unwrap();
    assert_eq!(res.best_move, None);
    assert_eq!(res.score, -10_000);
    assert_eq!(res.nodes, 1);
}

#[test]
fn insufficient_material_root_is_a_draw() {
    let mut p = Position::from_fen("8/8/8/4k3/8/8/8/4KB2 w - - 0 1").expect("valid fen");
    let res = Searcher::default().search_depth(&mut p, 3).unwrap();
    assert_eq!((res.score, res.best_move, res.nodes), (0, None, 1));
}

#[test]
fn fivefold_repetition_root_has_no_move() {
    let mut p = Position::startpos();
    for _ in 0..4 {
        for m in ["g1f3", "g8f6", "f3g1", "f6g8"] { p.make_move_uci(m).unwrap(); }
    }
    assert!(p.is_game_over());
    let res = Searcher::default().search_depth(&mut p, 3).unwrap();
    assert_eq!((res.score, res.best_move, res.nodes), (0, None, 1));
}

// King walks ranks 1-4 and back while the rook steps a6-b6-a6, so no position
// comes close to repeating five times before the 150th reversible ply.
fn seventyfive_move_walk() -> Vec<String> {
    let snake: Vec<String> = (0..4)
        .flat_map(|r| {
            let files: Vec<char> = if r % 2 == 0 { "abcdefgh".chars().collect() } else { "hgfedcba".chars().collect() };
            files.into_iter().map(move |f| format!("{f}{}", r + 1))
        })
        .collect();
    let mut white: Vec<String> = (0..31).map(|i| format!("{}{}", snake[i], snake[i + 1])).collect();
    white.push("a6b6".to_string());
    white.extend((1..32).rev().map(|i| format!("{}{}", snake[i], snake[i - 1])));
    white.push("b6a6".to_string());
    white.extend((0..11).map(|i| format!("{}{}", snake[i], snake[i + 1])));

    let mut plies = Vec::new();
    for (i, m) in white.into_iter().enumerate() {
        plies.push(m);
        plies.push(if i % 2 == 0 { "e8d8" } else { "d8e8" }.to_string());
    }
    plies
}

#[test]
fn seventyfive_move_root_has_no_move() {
    let mut p = Position::from_fen("4k3/8/R7/8/8/8/8/K7 w - - 0 1").expect("valid fen");
    let plies = seventyfive_move_walk();
    assert_eq!(plies.len(), 150);
    for m in &plies[..149] { p.make_move_uci(m).unwrap(); }
    assert!(!p.is_game_over());
    p.make_move_uci(&plies[149]).unwrap();
    assert!(p.is_game_over());
    assert!(!p.is_fivefold_repetition());

    let res = Searcher::default().search_depth(&mut p, 3).unwrap();
    assert_eq!((res.best_move, res.nodes), (None, 1));
    // Only stalemate and dead positions score as draws; the rook still counts.
    assert_eq!(res.score, eval_cp(&p));
    assert!(res.score > 0);
}
