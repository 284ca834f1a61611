//! # Core - Programs, Environments, and Pairing
//!
//! This crate provides the recursive data structures behind the coalgebra
//! toolkit:
//!
//! - **Functors**: shape brands describing how trees branch
//! - **Free**: program trees of suspended instructions
//! - **Cofree**: annotated environment trees, strict and lazy
//! - **Transform**: rehosting, layer interleaving, and snapshot supply
//! - **Pairing**: the interpreter that resolves a program against an
//!   environment, child-for-child
//! - **CoKleisli**: arrows out of environments, with the `ArrowChoice`
//!   distributive law
//! - **Trace / Viz**: trace trees and petgraph rendering for inspection
//!
//! ## Design Philosophy
//!
//! "Pairing-first" means a program never interprets itself: what to do
//! (a [`Free`] tree) and what is available (a [`Cofree`] tree) stay separate
//! values that are only combined — layer by layer, lazily — by an explicit
//! interpreter with an explicit shape-alignment policy. Everything is an
//! immutable value; every transformation allocates, nothing mutates.

pub mod cofree;
pub mod cokleisli;
pub mod error;
pub mod free;
pub mod functor;
pub mod lazy;
pub mod pair;
pub mod trace;
pub mod transform;
pub mod viz;

// Re-export key types at crate root for convenience
pub use cofree::Cofree;
pub use cokleisli::{select_left, CoKleisli};
pub use error::CoreError;
pub use free::Free;
pub use functor::{Applicative, ComposeF, Coproduct, Functor, Natural, OptionF, PairF, VecF};
pub use lazy::LazyCofree;
pub use pair::{Align, ExactAlign, Pairing, TruncateAlign};
pub use trace::TraceNode;
pub use transform::{hoist, interleave, interleave_lazy, supply_snapshot};
