//! Pairing a program against an infinite environment.
//!
//! Run with: cargo run -p coalgebra-core --example pairing
//!
//! Builds a small two-level program, an infinite environment of counters,
//! resolves one against the other, and prints the consumed-layer trace plus
//! a DOT rendering of the program.

use coalgebra_core::{viz, ExactAlign, Free, LazyCofree, Pairing, VecF};

fn main() {
    println!("=== Pairing: Free program vs. Cofree environment ===\n");

    // -------------------------------------------------------------------------
    // 1. A program: depth 3, branching factor 2, known leaves
    // -------------------------------------------------------------------------
    let program: Free<VecF, i32> = Free::roll(vec![
        Free::roll(vec![Free::pure(1), Free::pure(2)]),
        Free::roll(vec![Free::pure(3), Free::pure(4)]),
    ]);
    println!("program:\n{}", viz::dot(&viz::free_graph(&program)));

    // -------------------------------------------------------------------------
    // 2. An environment: infinite counter tree, forced on demand only
    // -------------------------------------------------------------------------
    let env: LazyCofree<VecF, i32> = LazyCofree::coiter(10, |n| vec![n + 1, n + 2]);
    println!(
        "environment (first two layers):\n{}",
        viz::dot(&viz::lazy_graph(&env, 2))
    );

    // -------------------------------------------------------------------------
    // 3. Resolve: each layer collapses to env head + sum of children
    // -------------------------------------------------------------------------
    let pairing = Pairing::new(ExactAlign);
    let (result, trace) = pairing
        .run_traced(program, &env, |head, children: Vec<i32>| {
            head + children.into_iter().sum::<i32>()
        })
        .expect("shapes align by construction");

    println!("result: {result}");
    println!("layers consumed:\n{trace}");
}
