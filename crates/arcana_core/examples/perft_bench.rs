//! Perft benchmark for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo run --release --example perft_bench -p arcana_core -- [depth] [fen] [--divide] [--setup file.toml]
//!
//! Examples:
//!   # Default: depth 4 over the reference positions
//!   cargo flamegraph --example perft_bench -p arcana_core
//!
//!   # Per-move split of Kiwipete
//!   cargo run --example perft_bench -p arcana_core -- 3 "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -" --divide
//!
//!   # Arcana-enabled tree from a game setup
//!   cargo run --example perft_bench -p arcana_core -- 3 --setup setup.toml
//!
//! Set `RUST_LOG=arcana_core=debug` to see ledger activity.

use std::env;
use std::error::Error;
use std::time::{Duration, Instant};

use arcana_core::{GameSetup, Position, divide, perft, render};
use tracing_subscriber::EnvFilter;

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
        "Variant pieces",
        "r1bqk1nr/pppp1ppp/2g5/4h3/4H3/2G5/PPPP1PPP/R1BQK1NR w KQkq -",
    ),
];

struct Args {
    depth: u8,
    fen: Option<String>,
    setup: Option<String>,
    divide: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        depth: 4,
        fen: None,
        setup: None,
        divide: false,
    };
    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--divide" => args.divide = true,
            "--setup" => args.setup = iter.next(),
            _ => {
                if let Ok(depth) = arg.parse() {
                    args.depth = depth;
                } else {
                    args.fen = Some(arg);
                }
            }
        }
    }
    args
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = parse_args();
    let single = if let Some(path) = &args.setup {
        let text = std::fs::read_to_string(path)?;
        Some((path.clone(), GameSetup::from_toml(&text)?.build()?))
    } else if let Some(fen) = &args.fen {
        Some((fen.clone(), Position::from_fen(fen)?))
    } else {
        None
    };

    match single {
        Some((label, mut pos)) => run_single_position(&label, &mut pos, args.depth, args.divide),
        None => run_all_positions(args.depth)?,
    }
    Ok(())
}

fn nps(nodes: u64, elapsed: Duration) -> f64 {
    if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    }
}

fn run_single_position(label: &str, pos: &mut Position, depth: u8, split: bool) {
    println!("Position: {label}");
    println!("Depth: {depth}");
    println!();

    if split {
        let start = Instant::now();
        let counts = divide(pos, depth);
        let elapsed = start.elapsed();
        let mut total = 0u64;
        for (mv, nodes) in &counts {
            println!("{:<16} {nodes}", render(pos, *mv));
            total += nodes;
        }
        println!();
        println!("Moves: {}", counts.len());
        println!("Nodes: {total}");
        println!("Time: {elapsed:.3?}");
        return;
    }

    // Warm-up run at lower depth
    if depth > 2 {
        let _ = perft(pos, depth.saturating_sub(2));
    }

    let start = Instant::now();
    let nodes = perft(pos, depth);
    let elapsed = start.elapsed();

    println!("Nodes: {nodes}");
    println!("Time: {elapsed:.3?}");
    println!("NPS: {:.0}", nps(nodes, elapsed));
}

fn run_all_positions(depth: u8) -> Result<(), Box<dyn Error>> {
    println!("=== Perft Benchmark Suite ===");
    println!("Depth: {depth}");
    println!();

    let mut total_nodes = 0u64;
    let mut total_time = Duration::ZERO;

    for (name, fen) in TEST_POSITIONS {
        let mut pos = Position::from_fen(fen)?;

        print!("{name:.<30}");

        let start = Instant::now();
        let nodes = perft(&mut pos, depth);
        let elapsed = start.elapsed();

        total_nodes += nodes;
        total_time += elapsed;

        println!(
            " {nodes:>12} nodes in {elapsed:>8.3?} ({:>10.0} nps)",
            nps(nodes, elapsed)
        );
    }

    println!();
    println!("{:=<70}", "");
    println!(
        "TOTAL: {total_nodes} nodes in {total_time:.3?} ({:.0} nps)",
        nps(total_nodes, total_time)
    );
    Ok(())
}
