//! Mailbox board representation with snapshot-based make/unmake.
//!
//! The position keeps a plain 64-byte mailbox of packed piece codes plus
//! the usual FEN state (side, castling, en passant, clocks) and an
//! incrementally maintained Zobrist key. Every `make` pushes a full
//! snapshot of the pre-move state, so `unmake` is a verbatim restore and
//! the search tree walk can rely on bit-for-bit round trips.

use crate::error::FenError;
use crate::types::*;
use crate::zobrist::ZOBRIST;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

// Castling-right bits, low nibble of the mask.
pub const CASTLE_WK: u8 = 1;
pub const CASTLE_WQ: u8 = 2;
pub const CASTLE_BK: u8 = 4;
pub const CASTLE_BQ: u8 = 8;

/// Full board state, cheap to copy; one snapshot is pushed per `make`.
#[derive(Clone, Copy, Debug)]
pub struct BoardState {
    /// Packed piece code per square (0 = empty, 1-6 White, 7-12 Black).
    pub squares: [u8; 64],
    pub side_to_move: Color,
    pub castling: u8,
    /// Square a pawn would land on when capturing en passant.
    pub ep_square: Option<u8>,
    /// Plies since the last pawn move or capture (fifty-move rule).
    pub halfmove: u32,
    /// Incremented after each Black move; starts at 1.
    pub fullmove: u32,
    pub zobrist: u64,
}

impl BoardState {
    const fn empty() -> Self {
        BoardState {
            squares: [0; 64],
            side_to_move: Color::White,
            castling: 0,
            ep_square: None,
            halfmove: 0,
            fullmove: 1,
            zobrist: 0,
        }
    }
}

/// The live position plus its owned undo stack and move history.
#[derive(Clone, Debug)]
pub struct Position {
    state: BoardState,
    state_history: Vec<BoardState>,
    move_history: Vec<Move>,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        Self::from_fen(START_FEN).expect("start position FEN is valid")
    }

    /// Parse a six-field FEN string. The halfmove and fullmove fields are
    /// optional and default to 0 and 1. History is cleared and the Zobrist
    /// key recomputed from scratch.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields(parts.len()));
        }

        let mut state = BoardState::empty();

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::BadRankCount);
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 first
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind = match ch.to_ascii_lowercase() {
                        'p' => PieceKind::Pawn,
                        'n' => PieceKind::Knight,
                        'b' => PieceKind::Bishop,
                        'r' => PieceKind::Rook,
                        'q' => PieceKind::Queen,
                        'k' => PieceKind::King,
                        _ => return Err(FenError::BadPiece(ch)),
                    };
                    let Some(s) = sq(file, rank) else {
                        return Err(FenError::BadRankWidth(rank_str.to_string()));
                    };
                    state.squares[s as usize] = Piece::new(color, kind).code();
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::BadRankWidth(rank_str.to_string()));
                }
            }
            if file != 8 {
                return Err(FenError::BadRankWidth(rank_str.to_string()));
            }
        }

        state.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::BadSideToMove(other.to_string())),
        };

        if parts[2] != "-" {
            for c in parts[2].chars() {
                state.castling |= match c {
                    'K' => CASTLE_WK,
                    'Q' => CASTLE_WQ,
                    'k' => CASTLE_BK,
                    'q' => CASTLE_BQ,
                    _ => return Err(FenError::BadCastling(c)),
                };
            }
        }

        if parts[3] != "-" {
            state.ep_square = Some(
                coord_to_sq(parts[3]).ok_or_else(|| FenError::BadEnPassant(parts[3].to_string()))?,
            );
        }

        if let Some(hm) = parts.get(4) {
            state.halfmove = hm
                .parse()
                .map_err(|_| FenError::BadCounter(hm.to_string()))?;
        }
        if let Some(fm) = parts.get(5) {
            state.fullmove = fm
                .parse()
                .map_err(|_| FenError::BadCounter(fm.to_string()))?;
        }

        let mut pos = Position {
            state,
            state_history: Vec::new(),
            move_history: Vec::new(),
        };

        let wk = Piece::new(Color::White, PieceKind::King).code();
        let bk = Piece::new(Color::Black, PieceKind::King).code();
        let wk_count = pos.state.squares.iter().filter(|&&c| c == wk).count();
        let bk_count = pos.state.squares.iter().filter(|&&c| c == bk).count();
        if wk_count != 1 || bk_count != 1 {
            return Err(FenError::BadKingCount);
        }

        pos.recompute_zobrist();
        Ok(pos)
    }

    /// Serialize to FEN; lossless inverse of [`Position::from_fen`].
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for r in (0..8).rev() {
            let mut empty = 0;
            for f in 0..8 {
                let code = self.state.squares[r * 8 + f];
                match Piece::from_code(code) {
                    None => empty += 1,
                    Some(pc) => {
                        if empty > 0 {
                            fen.push((b'0' + empty) as char);
                            empty = 0;
                        }
                        let ch = match pc.kind {
                            PieceKind::Pawn => 'p',
                            PieceKind::Knight => 'n',
                            PieceKind::Bishop => 'b',
                            PieceKind::Rook => 'r',
                            PieceKind::Queen => 'q',
                            PieceKind::King => 'k',
                        };
                        fen.push(if pc.color == Color::White {
                            ch.to_ascii_uppercase()
                        } else {
                            ch
                        });
                    }
                }
            }
            if empty > 0 {
                fen.push((b'0' + empty) as char);
            }
            if r > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.state.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        if self.state.castling == 0 {
            fen.push('-');
        } else {
            if self.state.castling & CASTLE_WK != 0 {
                fen.push('K');
            }
            if self.state.castling & CASTLE_WQ != 0 {
                fen.push('Q');
            }
            if self.state.castling & CASTLE_BK != 0 {
                fen.push('k');
            }
            if self.state.castling & CASTLE_BQ != 0 {
                fen.push('q');
            }
        }

        fen.push(' ');
        match self.state.ep_square {
            None => fen.push('-'),
            Some(ep) => fen.push_str(&sq_to_coord(ep)),
        }

        fen.push_str(&format!(
            " {} {}",
            self.state.halfmove, self.state.fullmove
        ));
        fen
    }

    // Read accessors.

    #[inline(always)]
    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        Piece::from_code(self.state.squares[sq as usize])
    }

    #[inline(always)]
    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    #[inline(always)]
    pub fn castling(&self) -> u8 {
        self.state.castling
    }

    #[inline(always)]
    pub fn ep_square(&self) -> Option<u8> {
        self.state.ep_square
    }

    #[inline(always)]
    pub fn halfmove(&self) -> u32 {
        self.state.halfmove
    }

    #[inline(always)]
    pub fn fullmove(&self) -> u32 {
        self.state.fullmove
    }

    #[inline(always)]
    pub fn zobrist(&self) -> u64 {
        self.state.zobrist
    }

    /// Number of committed makes (equals the move history length).
    #[inline(always)]
    pub fn ply(&self) -> usize {
        self.move_history.len()
    }

    pub fn last_move(&self) -> Option<Move> {
        self.move_history.last().copied()
    }

    pub fn count_piece(&self, color: Color, kind: PieceKind) -> u32 {
        let code = Piece::new(color, kind).code();
        self.state.squares.iter().filter(|&&c| c == code).count() as u32
    }

    /// Bitboard of one piece's locations, derived by linear scan.
    /// Not for hot loops; callers that need set-wise views build them
    /// on demand from the mailbox.
    pub fn piece_bb(&self, color: Color, kind: PieceKind) -> u64 {
        let code = Piece::new(color, kind).code();
        let mut bb = 0u64;
        for s in 0..64 {
            if self.state.squares[s] == code {
                bb |= 1u64 << s;
            }
        }
        bb
    }

    pub fn king_sq(&self, color: Color) -> Option<u8> {
        let code = Piece::new(color, PieceKind::King).code();
        (0..64u8).find(|&s| self.state.squares[s as usize] == code)
    }

    pub fn in_check(&self, color: Color) -> bool {
        match self.king_sq(color) {
            Some(ksq) => self.is_square_attacked(ksq, color.other()),
            None => false,
        }
    }

    /// Whether any piece of `by` attacks `target` in the current position.
    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        let tf = file_of(target);
        let tr = rank_of(target);

        // Pawns attack one rank toward the enemy, so look one rank back.
        let pawn_dr: i8 = match by {
            Color::White => -1,
            Color::Black => 1,
        };
        let pawn = Piece::new(by, PieceKind::Pawn).code();
        for df in [-1i8, 1] {
            if let Some(s) = sq(tf + df, tr + pawn_dr)
                && self.state.squares[s as usize] == pawn
            {
                return true;
            }
        }

        let knight = Piece::new(by, PieceKind::Knight).code();
        for (df, dr) in KNIGHT_OFFSETS {
            if let Some(s) = sq(tf + df, tr + dr)
                && self.state.squares[s as usize] == knight
            {
                return true;
            }
        }

        let king = Piece::new(by, PieceKind::King).code();
        for (df, dr) in KING_OFFSETS {
            if let Some(s) = sq(tf + df, tr + dr)
                && self.state.squares[s as usize] == king
            {
                return true;
            }
        }

        let queen = Piece::new(by, PieceKind::Queen).code();
        let bishop = Piece::new(by, PieceKind::Bishop).code();
        for (df, dr) in DIAG_DIRS {
            let mut f = tf + df;
            let mut r = tr + dr;
            while let Some(s) = sq(f, r) {
                let code = self.state.squares[s as usize];
                if code != 0 {
                    if code == bishop || code == queen {
                        return true;
                    }
                    break;
                }
                f += df;
                r += dr;
            }
        }

        let rook = Piece::new(by, PieceKind::Rook).code();
        for (df, dr) in ORTHO_DIRS {
            let mut f = tf + df;
            let mut r = tr + dr;
            while let Some(s) = sq(f, r) {
                let code = self.state.squares[s as usize];
                if code != 0 {
                    if code == rook || code == queen {
                        return true;
                    }
                    break;
                }
                f += df;
                r += dr;
            }
        }

        false
    }

    /// Place `code` on `s`, keeping the Zobrist key in sync. The empty
    /// code's key row is zero, so this handles clears and empty sources
    /// without branching.
    #[inline(always)]
    fn set_piece(&mut self, s: usize, code: u8) {
        self.state.zobrist ^= ZOBRIST.piece_key(self.state.squares[s], s as u8);
        self.state.squares[s] = code;
        self.state.zobrist ^= ZOBRIST.piece_key(code, s as u8);
    }

    fn recompute_zobrist(&mut self) {
        let mut z = 0u64;
        for s in 0..64u8 {
            z ^= ZOBRIST.piece_key(self.state.squares[s as usize], s);
        }
        if self.state.side_to_move == Color::Black {
            z ^= ZOBRIST.side;
        }
        z ^= ZOBRIST.castle_key(self.state.castling);
        if let Some(ep) = self.state.ep_square {
            z ^= ZOBRIST.ep_key(ep);
        }
        self.state.zobrist = z;
    }

    /// Play a move assumed to be well-formed (produced by the generator or
    /// the notation parser). Returns `false` and leaves the position
    /// unchanged iff the move would leave the mover's own king attacked.
    pub fn make(&mut self, mv: Move) -> bool {
        self.state_history.push(self.state);
        self.move_history.push(mv);

        let from = mv.from() as usize;
        let to = mv.to() as usize;
        let us = self.state.side_to_move;

        // The old ep/castling components leave the hash before they change.
        if let Some(ep) = self.state.ep_square {
            self.state.zobrist ^= ZOBRIST.ep_key(ep);
        }
        self.state.zobrist ^= ZOBRIST.castle_key(self.state.castling);

        let moving = self.state.squares[from];
        let Some(moved) = Piece::from_code(moving) else {
            // Nothing to move; reject without disturbing the stacks' lockstep.
            self.unmake();
            return false;
        };
        let captured = self.state.squares[to];

        if captured != 0 || moved.kind == PieceKind::Pawn {
            self.state.halfmove = 0;
        } else {
            self.state.halfmove += 1;
        }

        self.state.ep_square = None;

        match mv.flag() {
            MoveFlag::EnPassant => {
                // The victim pawn sits behind the landing square.
                let cap_sq = match us {
                    Color::White => to - 8,
                    Color::Black => to + 8,
                };
                self.set_piece(cap_sq, 0);
            }
            MoveFlag::Castle => {
                // Rook relocation; the king destinations are fixed.
                let (rf, rt) = match to {
                    6 => (7, 5),
                    2 => (0, 3),
                    62 => (63, 61),
                    _ => (56, 59),
                };
                let rook = self.state.squares[rf];
                self.set_piece(rf, 0);
                self.set_piece(rt, rook);
            }
            _ => {}
        }

        self.set_piece(from, 0);
        if mv.flag() == MoveFlag::Promotion {
            self.set_piece(to, Piece::new(us, mv.promo()).code());
        } else {
            self.set_piece(to, moving);
        }

        // A double pawn push creates the en-passant square behind it.
        if moved.kind == PieceKind::Pawn && (to as i8 - from as i8).abs() == 16 {
            let ep = ((from + to) / 2) as u8;
            self.state.ep_square = Some(ep);
            self.state.zobrist ^= ZOBRIST.ep_key(ep);
        }

        // Any move touching a king or rook home square clears the
        // corresponding rights, including rook captures.
        if from == 4 || to == 4 {
            self.state.castling &= !(CASTLE_WK | CASTLE_WQ);
        }
        if from == 60 || to == 60 {
            self.state.castling &= !(CASTLE_BK | CASTLE_BQ);
        }
        if from == 0 || to == 0 {
            self.state.castling &= !CASTLE_WQ;
        }
        if from == 7 || to == 7 {
            self.state.castling &= !CASTLE_WK;
        }
        if from == 56 || to == 56 {
            self.state.castling &= !CASTLE_BQ;
        }
        if from == 63 || to == 63 {
            self.state.castling &= !CASTLE_BK;
        }
        self.state.zobrist ^= ZOBRIST.castle_key(self.state.castling);

        self.state.side_to_move = us.other();
        self.state.zobrist ^= ZOBRIST.side;
        if self.state.side_to_move == Color::White {
            self.state.fullmove += 1;
        }

        if self.in_check(us) {
            self.unmake();
            return false;
        }
        true
    }

    /// Pass the move: toggle the side to move without touching a piece.
    /// Recorded as the null move so the history stacks stay in lockstep.
    pub fn make_null(&mut self) {
        self.state_history.push(self.state);
        self.move_history.push(Move::NULL);

        if let Some(ep) = self.state.ep_square {
            self.state.zobrist ^= ZOBRIST.ep_key(ep);
            self.state.ep_square = None;
        }
        self.state.halfmove += 1;
        self.state.side_to_move = self.state.side_to_move.other();
        self.state.zobrist ^= ZOBRIST.side;
        if self.state.side_to_move == Color::White {
            self.state.fullmove += 1;
        }
    }

    /// Restore the previous snapshot verbatim. No-op on an empty stack.
    pub fn unmake(&mut self) {
        if let Some(prev) = self.state_history.pop() {
            self.state = prev;
            self.move_history.pop();
        }
    }

    // Draw rules.

    pub fn is_fifty_move_draw(&self) -> bool {
        self.state.halfmove >= 100
    }

    pub fn is_repetition_draw(&self) -> bool {
        self.repetition_count() >= 3
    }

    /// Occurrences of the current position in the game so far, counting
    /// the current one. The backward scan stops at an irreversible move
    /// (snapshot halfmove of zero) past which no repetition is possible.
    fn repetition_count(&self) -> u32 {
        let mut count = 1u32;
        let z = self.state.zobrist;
        let last = self.state_history.len().wrapping_sub(1);
        for (i, st) in self.state_history.iter().enumerate().rev() {
            if st.zobrist == z {
                count += 1;
            }
            if st.halfmove == 0 && i != last {
                break;
            }
        }
        count
    }

    /// No pawns, rooks or queens, and at most one minor piece in total:
    /// K vs K, K+B vs K, K+N vs K.
    pub fn is_insufficient_material(&self) -> bool {
        for color in [Color::White, Color::Black] {
            for kind in [PieceKind::Pawn, PieceKind::Rook, PieceKind::Queen] {
                if self.count_piece(color, kind) > 0 {
                    return false;
                }
            }
        }
        let minors = self.count_piece(Color::White, PieceKind::Knight)
            + self.count_piece(Color::White, PieceKind::Bishop)
            + self.count_piece(Color::Black, PieceKind::Knight)
            + self.count_piece(Color::Black, PieceKind::Bishop);
        minors <= 1
    }

    pub fn is_draw(&self) -> bool {
        self.is_fifty_move_draw() || self.is_repetition_draw() || self.is_insufficient_material()
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
