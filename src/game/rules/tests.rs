//! Test suite for the bundled rules engine
//!
//! Verifies move generation, legality filtering and game-end detection through
//! the [`RulesEngine`] trait, the same surface the interaction layer uses.
//!
//! # Test Organization
//!
//! - `test_start_*` - Starting position queries
//! - `test_promotion_*` - Promotion flagging and explicit choice
//! - `test_special_*` - En passant and castling metadata
//! - `test_end_*` - Checkmate, stalemate and draw rules
//! - `test_fen_*` - FEN import/export

use super::*;
use crate::game::error::GameError;
use crate::game::types::{PieceKind, Position, PromotionChoice, Side};

fn sq(name: &str) -> Position {
    Position::from_name(name).expect("valid square in test")
}

fn request(from: &str, to: &str) -> MoveRequest {
    MoveRequest {
        from: sq(from),
        to: sq(to),
        choice: None,
    }
}

fn play_all(rules: &mut StandardRules, moves: &[(&str, &str)]) {
    for (from, to) in moves {
        rules
            .apply_move(request(from, to))
            .unwrap_or_else(|e| panic!("{from}{to} should be legal: {e}"));
    }
}

// ============================================================================
// Starting Position Tests
// ============================================================================

#[test]
fn test_start_has_twenty_moves() {
    //! White has 16 pawn moves and 4 knight moves at the start
    let rules = StandardRules::new();
    assert_eq!(rules.current_turn(), Side::White);
    assert_eq!(rules.legal_moves(None).len(), 20);
    assert_eq!(rules.occupants().len(), 32);
}

#[test]
fn test_start_pawn_targets() {
    let rules = StandardRules::new();
    let mut targets: Vec<Position> = rules
        .legal_moves(Some(sq("e2")))
        .iter()
        .map(|m| m.to)
        .collect();
    targets.sort();
    assert_eq!(targets, vec![sq("e3"), sq("e4")]);
}

#[test]
fn test_start_opponent_pieces_have_no_moves() {
    //! Only the side to move reports legal moves
    let rules = StandardRules::new();
    assert!(rules.legal_moves(Some(sq("e7"))).is_empty());
}

#[test]
fn test_apply_quiet_move_switches_turn() {
    let mut rules = StandardRules::new();
    let committed = rules.apply_move(request("e2", "e4")).expect("legal");

    assert_eq!(committed.from, sq("e2"));
    assert_eq!(committed.to, sq("e4"));
    assert_eq!(committed.side, Side::White);
    assert_eq!(committed.kind, PieceKind::Pawn);
    assert!(!committed.is_capture);
    assert!(!committed.is_promotion);
    assert_eq!(rules.current_turn(), Side::Black);
}

#[test]
fn test_apply_illegal_move_leaves_position() {
    let mut rules = StandardRules::new();
    let before = rules.fen();
    let result = rules.apply_move(request("e2", "e5"));
    assert_eq!(
        result,
        Err(IllegalMove::NotLegal {
            from: sq("e2"),
            to: sq("e5")
        })
    );
    assert_eq!(rules.fen(), before, "rejected move must not mutate the engine");
}

#[test]
fn test_capture_reports_victim() {
    let mut rules = StandardRules::new();
    play_all(&mut rules, &[("e2", "e4"), ("d7", "d5")]);

    let capture = rules
        .legal_moves(Some(sq("e4")))
        .into_iter()
        .find(|m| m.to == sq("d5"))
        .expect("exd5 is legal");
    assert_eq!(capture.captures_at, Some(sq("d5")));

    let committed = rules.apply_move(request("e4", "d5")).expect("legal");
    assert!(committed.is_capture);
    assert_eq!(committed.captured_kind, Some(PieceKind::Pawn));
    assert_eq!(committed.captured_at, Some(sq("d5")));
    assert_eq!(rules.occupants().len(), 31);
}

// ============================================================================
// Promotion Tests
// ============================================================================

#[test]
fn test_promotion_move_requires_choice() {
    let rules = StandardRules::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").expect("fen");
    let moves = rules.legal_moves(Some(sq("a7")));
    assert_eq!(moves.len(), 1, "one entry per destination, not per piece choice");
    assert!(moves[0].requires_choice);
}

#[test]
fn test_promotion_without_choice_is_rejected() {
    //! There is no implicit queen: the engine refuses an unspecified promotion
    let mut rules = StandardRules::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").expect("fen");
    let result = rules.apply_move(request("a7", "a8"));
    assert_eq!(
        result,
        Err(IllegalMove::ChoiceRequired {
            from: sq("a7"),
            to: sq("a8")
        })
    );
    assert_eq!(rules.current_turn(), Side::White);
}

#[test]
fn test_promotion_with_choice() {
    let mut rules = StandardRules::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").expect("fen");
    let committed = rules
        .apply_move(MoveRequest {
            choice: Some(PromotionChoice::Knight),
            ..request("a7", "a8")
        })
        .expect("legal");
    assert!(committed.is_promotion);
    assert_eq!(committed.promotion_kind, Some(PieceKind::Knight));
    assert_eq!(
        rules.board().piece_at(sq("a8")),
        Some(Piece::new(PieceKind::Knight, Side::White))
    );
}

#[test]
fn test_choice_ignored_for_regular_move() {
    let mut rules = StandardRules::new();
    let committed = rules
        .apply_move(MoveRequest {
            choice: Some(PromotionChoice::Queen),
            ..request("g1", "f3")
        })
        .expect("legal");
    assert_eq!(committed.promotion_kind, None);
    assert_eq!(committed.kind, PieceKind::Knight);
}

// ============================================================================
// En Passant & Castling Tests
// ============================================================================

#[test]
fn test_special_en_passant_captures_beside() {
    let mut rules = StandardRules::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("fen");
    let ep = rules
        .legal_moves(Some(sq("e5")))
        .into_iter()
        .find(|m| m.to == sq("d6"))
        .expect("en passant available");
    assert_eq!(ep.captures_at, Some(sq("d5")));

    let committed = rules.apply_move(request("e5", "d6")).expect("legal");
    assert_eq!(committed.captured_at, Some(sq("d5")));
    assert!(rules.board().is_empty(sq("d5")));
}

#[test]
fn test_special_double_push_sets_en_passant() {
    let mut rules = StandardRules::new();
    play_all(&mut rules, &[("e2", "e4")]);
    assert_eq!(rules.board().en_passant, Some(sq("e3")));
    play_all(&mut rules, &[("g8", "f6")]);
    assert_eq!(rules.board().en_passant, None);
}

#[test]
fn test_special_castling_moves_rook() {
    let mut rules = StandardRules::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("fen");
    let king_targets: Vec<Position> = rules
        .legal_moves(Some(sq("e1")))
        .iter()
        .map(|m| m.to)
        .collect();
    assert!(king_targets.contains(&sq("g1")));
    assert!(king_targets.contains(&sq("c1")));

    let committed = rules.apply_move(request("e1", "g1")).expect("legal");
    assert_eq!(committed.rook_transfer, Some((sq("h1"), sq("f1"))));
    assert_eq!(
        rules.board().piece_at(sq("f1")),
        Some(Piece::new(PieceKind::Rook, Side::White))
    );
    assert!(!rules.board().castling.allows(Side::White, Wing::Queen));
}

#[test]
fn test_special_rook_corners_revoke_one_wing() {
    let mut rules = StandardRules::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("fen");
    play_all(&mut rules, &[("h1", "h7"), ("a8", "a1")]);

    let castling = rules.board().castling;
    assert!(!castling.allows(Side::White, Wing::King), "h1 rook moved");
    assert!(!castling.allows(Side::White, Wing::Queen), "a1 rook captured");
    assert!(!castling.allows(Side::Black, Wing::Queen), "a8 rook moved");
    assert!(castling.allows(Side::Black, Wing::King));
}

#[test]
fn test_special_no_castling_through_attack() {
    //! A black rook on f8 covers f1, so white may not castle king side
    let rules = StandardRules::from_fen("r3kr2/8/8/8/8/8/8/R3K2R w KQq - 0 1").expect("fen");
    let king_targets: Vec<Position> = rules
        .legal_moves(Some(sq("e1")))
        .iter()
        .map(|m| m.to)
        .collect();
    assert!(!king_targets.contains(&sq("g1")));
    assert!(king_targets.contains(&sq("c1")));
}

#[test]
fn test_pinned_piece_cannot_leave_line() {
    let rules = StandardRules::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").expect("fen");
    assert!(
        rules.legal_moves(Some(sq("e2"))).is_empty(),
        "knight is pinned against the king"
    );
}

// ============================================================================
// Game End Tests
// ============================================================================

#[test]
fn test_end_fools_mate() {
    let mut rules = StandardRules::new();
    play_all(
        &mut rules,
        &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")],
    );
    assert!(rules.is_checkmate());
    assert!(!rules.is_draw());
    assert_eq!(rules.current_turn(), Side::White, "the mated side is to move");
}

#[test]
fn test_end_stalemate_is_draw() {
    let rules = StandardRules::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("fen");
    assert!(!rules.is_checkmate());
    assert!(rules.is_stalemate());
    assert!(rules.is_draw());
}

#[test]
fn test_end_insufficient_material() {
    let bare = StandardRules::from_fen("8/8/8/8/8/8/8/k6K w - - 0 1").expect("fen");
    assert!(bare.is_draw());

    let bishop = StandardRules::from_fen("8/8/8/8/8/8/8/kb5K w - - 0 1").expect("fen");
    assert!(bishop.is_draw());

    let rook = StandardRules::from_fen("8/8/8/8/8/8/8/kr5K w - - 0 1").expect("fen");
    assert!(!rook.is_draw());
}

#[test]
fn test_end_threefold_repetition() {
    let mut rules = StandardRules::new();
    let shuffle = [("g1", "f3"), ("g8", "f6"), ("f3", "g1"), ("f6", "g8")];
    play_all(&mut rules, &shuffle);
    assert!(!rules.is_draw(), "two occurrences are not enough");
    play_all(&mut rules, &shuffle);
    assert!(rules.is_threefold_repetition());
    assert!(rules.is_draw());
}

#[test]
fn test_end_repetition_after_double_push() {
    //! The position after 1. e4 recurs with no pawn able to take on e3, so
    //! its en passant square does not keep it distinct
    let mut rules = StandardRules::new();
    play_all(&mut rules, &[("e2", "e4")]);
    let shuffle = [("g8", "f6"), ("g1", "f3"), ("f6", "g8"), ("f3", "g1")];
    play_all(&mut rules, &shuffle);
    assert!(!rules.is_threefold_repetition(), "two occurrences are not enough");
    play_all(&mut rules, &shuffle);
    assert!(rules.is_threefold_repetition());
    assert!(rules.is_draw());
}

#[test]
fn test_special_live_en_passant_keeps_position_distinct() {
    let rules = StandardRules::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("fen");
    let stale = StandardRules::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1").expect("fen");
    assert_eq!(rules.board().capturable_en_passant(), Some(sq("d6")));
    assert_ne!(rules.board().repetition_key(), stale.board().repetition_key());

    let idle = StandardRules::from_fen("4k3/8/8/3p4/8/8/8/4K3 w - d6 0 1").expect("fen");
    assert_eq!(idle.board().capturable_en_passant(), None);
}

#[test]
fn test_end_fifty_move_rule() {
    let rules = StandardRules::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 100 80").expect("fen");
    assert!(rules.is_draw());
}

#[test]
fn test_reset_restores_start() {
    let mut rules = StandardRules::from_fen("8/8/8/8/8/8/8/k6K w - - 0 1").expect("fen");
    rules.reset();
    assert_eq!(rules.fen(), StandardRules::new().fen());
    assert_eq!(rules.occupants().len(), 32);
}

// ============================================================================
// FEN Tests
// ============================================================================

#[test]
fn test_fen_start_position() {
    assert_eq!(
        StandardRules::new().fen(),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    );
}

#[test]
fn test_fen_rejects_garbage() {
    assert!(StandardRules::from_fen("").is_err());
    assert!(StandardRules::from_fen("8/8/8 w - - 0 1").is_err());
    assert!(StandardRules::from_fen("8/8/8/8/8/8/8/k6X w - - 0 1").is_err());
    assert!(StandardRules::from_fen("8/8/8/8/8/8/8/k6K x - - 0 1").is_err());
}

#[test]
fn test_fen_rejects_overlong_rank() {
    let overlong = format!("{}/8/8/8/8/8/8/8 w - - 0 1", "9".repeat(30));
    assert!(matches!(StandardRules::from_fen(&overlong), Err(GameError::Fen { .. })));
    assert!(StandardRules::from_fen("44k3/8/8/8/8/8/8/4K3 w - - 0 1").is_err());
    assert!(StandardRules::from_fen("0rnbqkbnr/8/8/8/8/8/8/4K3 w - - 0 1").is_err());
}
