//! Driving a running-total machine and replaying its transcript.
//!
//! Run with: cargo run -p coalgebra-machines --example accumulator
//!
//! Set RUST_LOG=trace to watch the driver's per-step events.

use coalgebra_machines::{drive, replay, Mealy};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Accumulator: drive, compose, replay ===\n");

    // -------------------------------------------------------------------------
    // 1. A stateful machine: output and state are the running total
    // -------------------------------------------------------------------------
    let totals = Mealy::unfold(0, |acc, input: i32| (acc + input, acc + input));
    let (transcript, rest) = drive(&totals, [1, 2, 3]);
    println!("{transcript}");

    let (next, _) = rest.step(4);
    println!("one more input (4) continues from the final state: {next}\n");

    // -------------------------------------------------------------------------
    // 2. Composition: totals, then a stateless formatter
    // -------------------------------------------------------------------------
    let labeled = totals.then(&Mealy::arr(|n: i32| format!("total={n}")));
    let (composed, _) = drive(&labeled, [10, 20, 30]);
    println!("{composed}");

    // -------------------------------------------------------------------------
    // 3. Replay: the recorded run checks out against a fresh machine
    // -------------------------------------------------------------------------
    match replay(&transcript, &Mealy::unfold(0, |acc, input: i32| (acc + input, acc + input))) {
        Ok(_) => println!("replay: transcript verified against a fresh machine"),
        Err(err) => println!("replay: {err}"),
    }
}
