//! Perft benchmark for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo run --release --example perft_bench -p engine_core -- [depth] [fen]
//!
//! With no FEN, runs the whole standard suite at the given depth
//! (default 4).

use engine_core::{board::Position, perft::perft};
use std::env;
use std::time::Instant;

const TEST_POSITIONS: &[(&str, &str)] = &[
    (
        "Starting position",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "Kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
    ),
    ("Position 3", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -"),
    (
        "Position 4",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq -",
    ),
    (
        "Position 5",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ -",
    ),
];

fn main() {
    let args: Vec<String> = env::args().collect();
    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4);

    if let Some(fen) = args.get(2) {
        run_position(fen, fen, depth);
        return;
    }

    let mut total_nodes = 0u64;
    let mut total_time = std::time::Duration::ZERO;
    for (name, fen) in TEST_POSITIONS {
        let (nodes, elapsed) = run_position(name, fen, depth);
        total_nodes += nodes;
        total_time += elapsed;
    }

    let nps = total_nodes as f64 / total_time.as_secs_f64().max(f64::EPSILON);
    println!("TOTAL: {total_nodes} nodes in {total_time:.3?} ({nps:.0} nps)");
}

fn run_position(name: &str, fen: &str, depth: u8) -> (u64, std::time::Duration) {
    let mut pos = Position::from_fen(fen).expect("bench FEN parses");

    let start = Instant::now();
    let nodes = perft(&mut pos, depth);
    let elapsed = start.elapsed();

    let nps = nodes as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
    println!("{name:.<30} {nodes:>12} nodes in {elapsed:>8.3?} ({nps:>10.0} nps)");
    (nodes, elapsed)
}
