use crate::{board::Position, movegen::pseudo_legal_into, types::Move};

/// Pure perft node count: leaves at exactly `depth` plies.
///
/// Expands pseudo-legal moves and lets `make` filter illegality, which is
/// the canonical exerciser of the make/unmake round-trip invariant.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    fn inner(pos: &mut Position, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        if depth == 0 {
            return 1;
        }

        let (buf, rest) = layers
            .split_first_mut()
            .expect("perft requires one buffer per remaining ply");

        pseudo_legal_into(pos, buf);

        let mut nodes = 0u64;
        for mv in buf.iter().copied() {
            if pos.make(mv) {
                nodes += inner(pos, depth - 1, rest);
                pos.unmake();
            }
        }
        nodes
    }

    // One reusable move buffer per ply keeps the hot loop allocation-free.
    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    inner(pos, depth, &mut layers[..])
}
