//! # Machines - Stream Processors
//!
//! This crate implements pure stream processors in two equivalent guises:
//!
//! - [`Mealy`]: input in, output out — `In -> (Out, next machine)`
//! - [`SF`]: output always readable, advanced by inputs — the annotated-tree
//!   view of the same idea, carrying comonad structure
//!
//! ## Core Components
//!
//! - [`Mealy::unfold`]: build a machine from an accumulator and a step rule
//! - [`Mealy::then`] / [`Mealy::first`] / [`Mealy::left`]: Category, Arrow,
//!   and ArrowChoice composition
//! - [`SfArrow`]: CoKleisli arrows over streams (`identity` = extract,
//!   composition via `extend`)
//! - [`drive`] / [`replay`]: record a run as a [`Transcript`], play it back
//!   against another machine, and catch the first divergence
//!
//! ## Example
//!
//! ```rust
//! use coalgebra_machines::{drive, Mealy};
//!
//! // running totals: state and output are the accumulated sum
//! let totals = Mealy::unfold(0, |acc, input: i32| (acc + input, acc + input));
//!
//! let (transcript, _rest) = drive(&totals, [1, 2, 3]);
//! assert_eq!(transcript.outputs(), vec![1, 3, 6]);
//! ```
//!
//! ## Compositional Design
//!
//! Machines are values, and every combinator returns a new machine:
//!
//! ```text
//!          ┌──────────┐      ┌──────────┐
//!   In ───▶│    f     │─────▶│    g     │───▶ Out      f.then(&g)
//!          └──────────┘      └──────────┘
//! ```
//!
//! Stepping never mutates: the machine you hold is reusable from its exact
//! state, which is what makes transcript replay and the law tests possible.

pub mod error;
pub mod mealy;
pub mod sf;
pub mod transcript;

pub use error::MachineError;
pub use mealy::Mealy;
pub use sf::{SfArrow, SF};
pub use transcript::{drive, replay, Transcript, TranscriptStep};
