//! Error types for position parsing.

use thiserror::Error;

/// Errors rejected at the FEN parse boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Fewer than the four mandatory fields (board, side, castling, ep).
    #[error("expected at least 4 FEN fields, found {0}")]
    MissingFields(usize),

    /// Board section does not describe exactly 8 ranks.
    #[error("FEN board section must have 8 ranks")]
    BadRankCount,

    /// A rank does not add up to exactly 8 files.
    #[error("FEN rank '{0}' does not describe exactly 8 files")]
    BadRankWidth(String),

    /// Unknown piece letter in the board section.
    #[error("invalid piece character '{0}' in FEN")]
    BadPiece(char),

    /// Side-to-move field is not `w` or `b`.
    #[error("invalid side to move '{0}' in FEN")]
    BadSideToMove(String),

    /// Castling field contains a letter outside `KQkq`.
    #[error("invalid castling character '{0}' in FEN")]
    BadCastling(char),

    /// En-passant field is neither `-` nor a square name.
    #[error("invalid en passant square '{0}' in FEN")]
    BadEnPassant(String),

    /// Halfmove or fullmove field is not a decimal integer.
    #[error("invalid move counter '{0}' in FEN")]
    BadCounter(String),

    /// Every position must carry exactly one king per side.
    #[error("position must have exactly one king per side")]
    BadKingCount,
}
