//! Static evaluation: centipawns from White's perspective. Negate for
//! the side to move before comparing in a negamax frame.
//!
//! Summed terms: material, tapered piece-square tables, pawn structure,
//! rook files, bishop pair, mobility, and phase-scaled king safety. The
//! function is pure; it reads the position and touches nothing.

use engine_core::{
    Color, DIAG_DIRS, KNIGHT_OFFSETS, ORTHO_DIRS, Piece, PieceKind, Position, file_of, rank_of, sq,
};

use crate::pst;

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
pub const KING_VALUE: i32 = 20_000;

pub const CHECKMATE: i32 = 100_000;
pub const DRAW: i32 = 0;

/// Material value of a piece kind in centipawns.
#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
    }
}

/// Game phase 0..24: 24 with full material, 0 with bare kings and pawns.
/// Minors count 1, rooks 2, queens 4, across both colors.
pub fn game_phase(pos: &Position) -> i32 {
    let mut phase = 0;
    for s in 0..64u8 {
        if let Some(pc) = pos.piece_at(s) {
            phase += match pc.kind {
                PieceKind::Knight | PieceKind::Bishop => 1,
                PieceKind::Rook => 2,
                PieceKind::Queen => 4,
                _ => 0,
            };
        }
    }
    phase.min(24)
}

pub fn evaluate(pos: &Position) -> i32 {
    let phase = game_phase(pos);
    let mut score = 0i32;

    // Material plus tapered piece-square contribution.
    for s in 0..64u8 {
        let Some(pc) = pos.piece_at(s) else { continue };
        let mg = pst::middlegame(pc.kind, pc.color, s);
        let eg = pst::endgame(pc.kind, pc.color, s);
        let total = piece_value(pc.kind) + (mg * phase + eg * (24 - phase)) / 24;
        if pc.color == Color::White {
            score += total;
        } else {
            score -= total;
        }
    }

    score += pawn_structure(pos, Color::White);
    score -= pawn_structure(pos, Color::Black);

    score += rooks(pos, Color::White);
    score -= rooks(pos, Color::Black);

    if pos.count_piece(Color::White, PieceKind::Bishop) >= 2 {
        score += 30;
    }
    if pos.count_piece(Color::Black, PieceKind::Bishop) >= 2 {
        score -= 30;
    }

    score += mobility(pos, Color::White);
    score -= mobility(pos, Color::Black);

    // King safety fades out as material leaves the board.
    let wks = king_safety(pos, Color::White, phase);
    let bks = king_safety(pos, Color::Black, phase);
    score += wks * phase / 24;
    score -= bks * phase / 24;

    score
}

fn pawn_structure(pos: &Position, us: Color) -> i32 {
    let my_pawn = Piece::new(us, PieceKind::Pawn);
    let their_pawn = Piece::new(us.other(), PieceKind::Pawn);
    let dr: i8 = match us {
        Color::White => 1,
        Color::Black => -1,
    };

    let mut my_files = [0i32; 8];
    let mut their_files = [0i32; 8];
    for s in 0..64u8 {
        let at = pos.piece_at(s);
        if at == Some(my_pawn) {
            my_files[(s % 8) as usize] += 1;
        } else if at == Some(their_pawn) {
            their_files[(s % 8) as usize] += 1;
        }
    }

    let mut score = 0;

    for count in my_files {
        if count > 1 {
            score -= 15 * (count - 1);
        }
    }

    for s in 0..64u8 {
        if pos.piece_at(s) != Some(my_pawn) {
            continue;
        }
        let f = file_of(s);
        let r = rank_of(s);

        let supported_file = (f > 0 && my_files[(f - 1) as usize] > 0)
            || (f < 7 && my_files[(f + 1) as usize] > 0);
        if !supported_file {
            score -= 20;
        }

        // Passed: no enemy pawn ahead on this or an adjacent file.
        let mut passed = true;
        let mut rr = r + dr;
        while (0..8).contains(&rr) && passed {
            for df in [-1i8, 0, 1] {
                if let Some(t) = sq(f + df, rr)
                    && pos.piece_at(t) == Some(their_pawn)
                {
                    passed = false;
                }
            }
            rr += dr;
        }
        if passed {
            let advancement = match us {
                Color::White => r as i32,
                Color::Black => 7 - r as i32,
            };
            score += 20 + 10 * advancement;
        }

        // Backward: the stop square is covered by an enemy pawn and no
        // friendly pawn on an adjacent file can ever support us.
        if let Some(stop) = sq(f, r + dr) {
            let mut stop_attacked = false;
            for df in [-1i8, 1] {
                if let Some(a) = sq(f + df, rank_of(stop) + dr)
                    && pos.piece_at(a) == Some(their_pawn)
                {
                    stop_attacked = true;
                }
            }
            if stop_attacked && !supported_file {
                score -= 10;
            }
        }
    }

    score
}

fn rooks(pos: &Position, us: Color) -> i32 {
    let my_rook = Piece::new(us, PieceKind::Rook);
    let my_pawn = Piece::new(us, PieceKind::Pawn);
    let their_pawn = Piece::new(us.other(), PieceKind::Pawn);
    let seventh: i8 = match us {
        Color::White => 6,
        Color::Black => 1,
    };

    let mut my_pawn_on = [false; 8];
    let mut their_pawn_on = [false; 8];
    for s in 0..64u8 {
        let at = pos.piece_at(s);
        if at == Some(my_pawn) {
            my_pawn_on[(s % 8) as usize] = true;
        } else if at == Some(their_pawn) {
            their_pawn_on[(s % 8) as usize] = true;
        }
    }

    let mut score = 0;
    for s in 0..64u8 {
        if pos.piece_at(s) != Some(my_rook) {
            continue;
        }
        let f = (s % 8) as usize;
        if !my_pawn_on[f] {
            score += if !their_pawn_on[f] { 20 } else { 10 };
        }
        if rank_of(s) == seventh {
            score += 25;
        }
    }
    score
}

/// Reachable-square counts: knights and bishops weigh double, rooks and
/// queens single (a queen adds its diagonal and orthogonal reach
/// together). Pawns and kings contribute nothing.
fn mobility(pos: &Position, us: Color) -> i32 {
    let mut score = 0;

    for s in 0..64u8 {
        let Some(pc) = pos.piece_at(s) else { continue };
        if pc.color != us {
            continue;
        }
        let f = file_of(s);
        let r = rank_of(s);

        match pc.kind {
            PieceKind::Knight => {
                let mut moves = 0;
                for (df, dr) in KNIGHT_OFFSETS {
                    if let Some(t) = sq(f + df, r + dr)
                        && pos.piece_at(t).is_none_or(|cap| cap.color != us)
                    {
                        moves += 1;
                    }
                }
                score += moves * 2;
            }
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                let mut moves = 0;
                if pc.kind != PieceKind::Rook {
                    moves += ray_reach(pos, us, f, r, DIAG_DIRS);
                }
                if pc.kind != PieceKind::Bishop {
                    moves += ray_reach(pos, us, f, r, ORTHO_DIRS);
                }
                score += if pc.kind == PieceKind::Bishop {
                    moves * 2
                } else {
                    moves
                };
            }
            _ => {}
        }
    }
    score
}

fn ray_reach(pos: &Position, us: Color, f: i8, r: i8, dirs: [(i8, i8); 4]) -> i32 {
    let mut moves = 0;
    for (df, dr) in dirs {
        let mut tf = f + df;
        let mut tr = r + dr;
        while let Some(t) = sq(tf, tr) {
            match pos.piece_at(t) {
                None => moves += 1,
                Some(cap) => {
                    if cap.color != us {
                        moves += 1;
                    }
                    break;
                }
            }
            tf += df;
            tr += dr;
        }
    }
    moves
}

/// Raw king-safety term; the caller scales it by phase/24. The pawn
/// shield and exposed-center penalty only apply while real middlegame
/// material remains (phase > 8).
fn king_safety(pos: &Position, us: Color, phase: i32) -> i32 {
    let Some(ks) = pos.king_sq(us) else { return 0 };
    let them = us.other();
    let kf = file_of(ks);
    let kr = rank_of(ks);
    let my_pawn = Piece::new(us, PieceKind::Pawn);

    let mut score = 0;

    if phase > 8 {
        let shield_rank = kr
            + match us {
                Color::White => 1,
                Color::Black => -1,
            };
        let mut shields = 0;
        for df in [-1i8, 0, 1] {
            if let Some(s) = sq(kf + df, shield_rank)
                && pos.piece_at(s) == Some(my_pawn)
            {
                shields += 1;
            }
        }
        score += shields * 10;

        if (2..=5).contains(&kf) {
            score -= 20;
        }
    }

    let mut attackers = 0;
    for dr in -2i8..=2 {
        for df in -2i8..=2 {
            if let Some(t) = sq(kf + df, kr + dr)
                && let Some(pc) = pos.piece_at(t)
                && pc.color == them
                && pc.kind != PieceKind::Pawn
            {
                attackers += 1;
            }
        }
    }
    score -= attackers * 8;

    score
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
