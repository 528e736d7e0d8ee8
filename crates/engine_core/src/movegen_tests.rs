use super::*;

#[test]
fn test_startpos_moves() {
    let pos = Position::startpos();
    let moves = legal_moves(&pos);
    // Starting position has 20 legal moves
    assert_eq!(moves.len(), 20);
}

#[test]
fn test_kiwipete_moves() {
    // Kiwipete position - complex with many move types
    let pos = Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
        .unwrap();
    let moves = legal_moves(&pos);
    assert_eq!(moves.len(), 48);
}

#[test]
fn test_legal_equals_filtered_pseudo_legal() {
    for fen in [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ] {
        let mut pos = Position::from_fen(fen).unwrap();
        let pseudo = pseudo_legal_moves(&pos);
        let survivors = pseudo
            .iter()
            .filter(|&&mv| {
                let ok = pos.make(mv);
                if ok {
                    pos.unmake();
                }
                ok
            })
            .count();
        assert_eq!(
            legal_moves(&pos).len(),
            survivors,
            "legal move count must equal make-filtered pseudo-legal count for {fen}"
        );
    }
}

#[test]
fn test_promotions_expand_in_stable_order() {
    let pos = Position::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let moves = pseudo_legal_moves(&pos);
    let promos: Vec<PieceKind> = moves
        .iter()
        .filter(|m| m.flag() == MoveFlag::Promotion)
        .map(|m| m.promo())
        .collect();
    assert_eq!(
        promos,
        vec![
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen
        ],
        "under-promotions must come out in enum order"
    );
}

#[test]
fn test_capture_promotions_in_capture_list() {
    // Pawn on a7 may push to a8 or take the knight on b8; only the
    // capture belongs in the quiescence list, in all four kinds.
    let pos = Position::from_fen("1n5k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let caps = capture_moves(&pos);
    assert_eq!(caps.len(), 4);
    assert!(caps.iter().all(|m| m.to() == 57));
    assert!(caps.iter().all(|m| m.flag() == MoveFlag::Promotion));

    let all = pseudo_legal_moves(&pos);
    let pushes = all.iter().filter(|m| m.to() == 56).count();
    assert_eq!(pushes, 4, "the quiet promotion push stays in the full list");
}

#[test]
fn test_captures_are_captures() {
    let pos = Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
        .unwrap();
    let caps = capture_moves(&pos);
    assert!(!caps.is_empty());
    for m in caps {
        let takes_piece = pos.piece_at(m.to()).is_some();
        assert!(
            takes_piece || m.flag() == MoveFlag::EnPassant,
            "{m:?} in the capture list must take a piece"
        );
    }
}

#[test]
fn test_double_push_requires_both_squares_empty() {
    // A blocker on e3 forbids both e3 and e4.
    let pos = Position::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").unwrap();
    let moves = pseudo_legal_moves(&pos);
    assert!(!moves.iter().any(|m| m.from() == 12 && m.to() == 20));
    assert!(!moves.iter().any(|m| m.from() == 12 && m.to() == 28));

    // A blocker on e4 still allows the single push.
    let pos = Position::from_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").unwrap();
    let moves = pseudo_legal_moves(&pos);
    assert!(moves.iter().any(|m| m.from() == 12 && m.to() == 20));
    assert!(!moves.iter().any(|m| m.from() == 12 && m.to() == 28));
}

#[test]
fn test_knight_moves_do_not_wrap() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").unwrap();
    let moves = pseudo_legal_moves(&pos);
    let knight_targets: Vec<u8> = moves
        .iter()
        .filter(|m| m.from() == 0)
        .map(|m| m.to())
        .collect();
    // a1 knight reaches only b3 and c2.
    assert_eq!(knight_targets.len(), 2);
    assert!(knight_targets.contains(&17));
    assert!(knight_targets.contains(&10));
}

#[test]
fn test_en_passant_is_generated() {
    let pos =
        Position::from_fen("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 2")
            .unwrap();
    let moves = legal_moves(&pos);
    let ep: Vec<&Move> = moves
        .iter()
        .filter(|m| m.flag() == MoveFlag::EnPassant)
        .collect();
    assert_eq!(ep.len(), 1);
    assert_eq!(ep[0].from(), 27);
    assert_eq!(ep[0].to(), 20);
}

#[test]
fn test_castling_both_sides_available() {
    let pos =
        Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
    let moves = legal_moves(&pos);
    assert!(moves.contains(&Move::castle(4, 6)));
    assert!(moves.contains(&Move::castle(4, 2)));
}

#[test]
fn test_castling_blocked_by_attacked_transit() {
    // Black rook on f8 covers f1: kingside is off, queenside stays on.
    let pos = Position::from_fen("5r2/4k3/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    let moves = legal_moves(&pos);
    assert!(!moves.contains(&Move::castle(4, 6)));
    assert!(moves.contains(&Move::castle(4, 2)));
}

#[test]
fn test_no_castling_out_of_check() {
    let pos = Position::from_fen("2k1r3/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    assert!(pos.in_check(Color::White));
    let moves = legal_moves(&pos);
    assert!(!moves.iter().any(|m| m.flag() == MoveFlag::Castle));
}

#[test]
fn test_castling_requires_empty_path() {
    let pos = Position::startpos();
    let moves = legal_moves(&pos);
    assert!(!moves.iter().any(|m| m.flag() == MoveFlag::Castle));
}

#[test]
fn test_castling_needs_right_bit() {
    // Same squares as the two-sided case, but only the kingside right.
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K2R w K - 0 1").unwrap();
    let moves = legal_moves(&pos);
    assert!(moves.contains(&Move::castle(4, 6)));
    assert!(!moves.contains(&Move::castle(4, 2)));
}

#[test]
fn test_stalemate_has_no_moves() {
    let pos = Position::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(legal_moves(&pos).is_empty());
    assert!(!pos.in_check(Color::Black));
}

#[test]
fn test_checkmate_has_no_moves() {
    // Back-rank mate: rook on e8, escape squares smothered by own pawns.
    let mated = Position::from_fen("4R1k1/5ppp/8/8/8/8/8/7K b - - 0 1").unwrap();
    assert!(legal_moves(&mated).is_empty());
    assert!(mated.in_check(Color::Black));

    // One rank earlier the rook check can still be met.
    let checked = Position::from_fen("6k1/4Rppp/8/8/8/8/8/7K b - - 0 1").unwrap();
    assert!(!legal_moves(&checked).is_empty());
}
