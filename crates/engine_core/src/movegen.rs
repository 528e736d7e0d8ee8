//! Mailbox move generation.
//!
//! Pseudo-legal moves follow piece-movement rules only; legality (not
//! leaving the mover's king attacked) is settled by playing each move on
//! the position, since `Position::make` already rejects self-checks.

use crate::board::{CASTLE_BK, CASTLE_BQ, CASTLE_WK, CASTLE_WQ, Position};
use crate::types::*;

/// Generate all legal moves, returning a freshly allocated vector.
/// Internally delegates to `legal_moves_into`, cloning the position once.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across
/// calls. A pseudo-legal move is legal iff `make` accepts it.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    pseudo_legal_into(pos, out);
    out.retain(|&mv| {
        let ok = pos.make(mv);
        if ok {
            pos.unmake();
        }
        ok
    });
}

/// Every move that follows piece-movement rules, including moves that
/// would leave the mover in check.
pub fn pseudo_legal_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    pseudo_legal_into(pos, &mut out);
    out
}

pub fn pseudo_legal_into(pos: &Position, out: &mut Vec<Move>) {
    out.clear();
    gen_pawn_moves(pos, out, false);
    gen_knight_moves(pos, out, false);
    gen_slider_moves(pos, out, false);
    gen_king_moves(pos, out, false);
}

/// Capture-producing subset for quiescence: destinations occupied by an
/// enemy piece, en passant, and capture-promotions in all four kinds.
pub fn capture_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(16);
    captures_into(pos, &mut out);
    out
}

pub fn captures_into(pos: &Position, out: &mut Vec<Move>) {
    out.clear();
    gen_pawn_moves(pos, out, true);
    gen_knight_moves(pos, out, true);
    gen_slider_moves(pos, out, true);
    gen_king_moves(pos, out, true);
}

/// Promotions expand in enum order so under-promotions stay visible to
/// capture-only consumers.
#[inline]
fn push_promotions(from: u8, to: u8, out: &mut Vec<Move>) {
    for kind in [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ] {
        out.push(Move::promotion(from, to, kind));
    }
}

fn gen_pawn_moves(pos: &Position, out: &mut Vec<Move>, captures_only: bool) {
    let us = pos.side_to_move();
    let (dr, start_rank, promo_rank): (i8, i8, i8) = match us {
        Color::White => (1, 1, 7),
        Color::Black => (-1, 6, 0),
    };

    for s in 0..64u8 {
        let Some(pc) = pos.piece_at(s) else { continue };
        if pc.color != us || pc.kind != PieceKind::Pawn {
            continue;
        }
        let f = file_of(s);
        let r = rank_of(s);

        // Diagonal captures, including en passant onto the marker square.
        for df in [-1i8, 1] {
            let Some(t) = sq(f + df, r + dr) else { continue };
            if pos.ep_square() == Some(t) {
                out.push(Move::en_passant(s, t));
                continue;
            }
            if let Some(cap) = pos.piece_at(t)
                && cap.color != us
            {
                if rank_of(t) == promo_rank {
                    push_promotions(s, t, out);
                } else {
                    out.push(Move::new(s, t));
                }
            }
        }

        if captures_only {
            continue;
        }

        // Single push, expanding into promotions on the last rank; a
        // double push additionally needs the landing square clear.
        if let Some(fwd) = sq(f, r + dr)
            && pos.piece_at(fwd).is_none()
        {
            if rank_of(fwd) == promo_rank {
                push_promotions(s, fwd, out);
            } else {
                out.push(Move::new(s, fwd));
                if r == start_rank
                    && let Some(dbl) = sq(f, r + 2 * dr)
                    && pos.piece_at(dbl).is_none()
                {
                    out.push(Move::new(s, dbl));
                }
            }
        }
    }
}

fn gen_knight_moves(pos: &Position, out: &mut Vec<Move>, captures_only: bool) {
    let us = pos.side_to_move();
    for s in 0..64u8 {
        let Some(pc) = pos.piece_at(s) else { continue };
        if pc.color != us || pc.kind != PieceKind::Knight {
            continue;
        }
        let f = file_of(s);
        let r = rank_of(s);
        for (df, dr) in KNIGHT_OFFSETS {
            let Some(t) = sq(f + df, r + dr) else { continue };
            match pos.piece_at(t) {
                Some(cap) if cap.color == us => {}
                Some(_) => out.push(Move::new(s, t)),
                None if !captures_only => out.push(Move::new(s, t)),
                None => {}
            }
        }
    }
}

fn gen_slider_moves(pos: &Position, out: &mut Vec<Move>, captures_only: bool) {
    let us = pos.side_to_move();
    for s in 0..64u8 {
        let Some(pc) = pos.piece_at(s) else { continue };
        if pc.color != us {
            continue;
        }
        let (diag, ortho) = match pc.kind {
            PieceKind::Bishop => (true, false),
            PieceKind::Rook => (false, true),
            PieceKind::Queen => (true, true),
            _ => continue,
        };
        let f = file_of(s);
        let r = rank_of(s);

        let walk = |dirs: [(i8, i8); 4], out: &mut Vec<Move>| {
            for (df, dr) in dirs {
                let mut tf = f + df;
                let mut tr = r + dr;
                while let Some(t) = sq(tf, tr) {
                    match pos.piece_at(t) {
                        None => {
                            if !captures_only {
                                out.push(Move::new(s, t));
                            }
                        }
                        Some(cap) => {
                            if cap.color != us {
                                out.push(Move::new(s, t));
                            }
                            break;
                        }
                    }
                    tf += df;
                    tr += dr;
                }
            }
        };

        if diag {
            walk(DIAG_DIRS, out);
        }
        if ortho {
            walk(ORTHO_DIRS, out);
        }
    }
}

fn gen_king_moves(pos: &Position, out: &mut Vec<Move>, captures_only: bool) {
    let us = pos.side_to_move();
    for s in 0..64u8 {
        let Some(pc) = pos.piece_at(s) else { continue };
        if pc.color != us || pc.kind != PieceKind::King {
            continue;
        }
        let f = file_of(s);
        let r = rank_of(s);
        for (df, dr) in KING_OFFSETS {
            let Some(t) = sq(f + df, r + dr) else { continue };
            match pos.piece_at(t) {
                Some(cap) if cap.color == us => {}
                Some(_) => out.push(Move::new(s, t)),
                None if !captures_only => out.push(Move::new(s, t)),
                None => {}
            }
        }

        if !captures_only {
            gen_castling_moves(pos, s, out);
        }
    }
}

/// Castling needs the right bit, a clear path between king and rook, the
/// rook still on its home square, and a king path (current, transit and
/// landing squares) free of enemy attack. The rook's own square may be
/// attacked.
fn gen_castling_moves(pos: &Position, king_sq: u8, out: &mut Vec<Move>) {
    let us = pos.side_to_move();
    let them = us.other();
    let rights = pos.castling();
    let rook = Piece::new(us, PieceKind::Rook);

    let empty = |s: u8| pos.piece_at(s).is_none();
    let safe = |s: u8| !pos.is_square_attacked(s, them);

    match us {
        Color::White => {
            if king_sq != 4 {
                return;
            }
            if rights & CASTLE_WK != 0
                && pos.piece_at(7) == Some(rook)
                && empty(5)
                && empty(6)
                && safe(4)
                && safe(5)
                && safe(6)
            {
                out.push(Move::castle(4, 6));
            }
            if rights & CASTLE_WQ != 0
                && pos.piece_at(0) == Some(rook)
                && empty(1)
                && empty(2)
                && empty(3)
                && safe(4)
                && safe(3)
                && safe(2)
            {
                out.push(Move::castle(4, 2));
            }
        }
        Color::Black => {
            if king_sq != 60 {
                return;
            }
            if rights & CASTLE_BK != 0
                && pos.piece_at(63) == Some(rook)
                && empty(61)
                && empty(62)
                && safe(60)
                && safe(61)
                && safe(62)
            {
                out.push(Move::castle(60, 62));
            }
            if rights & CASTLE_BQ != 0
                && pos.piece_at(56) == Some(rook)
                && empty(57)
                && empty(58)
                && empty(59)
                && safe(60)
                && safe(59)
                && safe(58)
            {
                out.push(Move::castle(60, 58));
            }
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
