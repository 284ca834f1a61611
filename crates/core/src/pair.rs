//! # Pairing - Programs Against Environments
//!
//! The central interpreter of this crate: resolve a [`Free`] program using a
//! [`LazyCofree`] environment as its evaluation context.
//!
//! ```text
//!    program (Free)            environment (LazyCofree)
//!    ──────────────            ────────────────────────
//!        Impure ◀───── align ─────▶ tail
//!       ╱      ╲                   ╱    ╲
//!   child₀   child₁            env₀      env₁        (recurse pairwise)
//!
//!    algebra(env head, resolved children) -> result
//! ```
//!
//! `Pure` leaves return their value directly and ignore the environment; an
//! `Impure` layer is paired child-for-child with the environment's next
//! layer, every pair is resolved recursively, and the supplied algebra
//! collapses the layer using the environment's *current* head.
//!
//! The environment may be infinite: only as much of it is forced as the
//! program's shape demands. Termination is therefore the program's
//! obligation — a finite program always terminates, and
//! [`Pairing::with_depth_limit`] offers an optional defensive bound.
//!
//! ## Shape Mismatch
//!
//! Nothing guarantees that a program layer and an environment layer have the
//! same branching. The [`Align`] policy decides what happens when they do
//! not; the shipped default ([`ExactAlign`]) fails loudly on any arity
//! mismatch, and [`TruncateAlign`] zips and drops the excess. Pick one
//! explicitly — a silently permissive default invites corrupted pairings.

use crate::error::CoreError;
use crate::free::Free;
use crate::functor::{Functor, OptionF, PairF, VecF};
use crate::lazy::LazyCofree;
use crate::trace::TraceNode;

// ============================================================================
// Align
// ============================================================================

/// A policy for pairing two `F`-shaped layers child-for-child.
pub trait Align<F: Functor> {
    /// Pair two layers, combining matched children with `f`.
    fn align_with<X: 'static, Y: 'static, Z: 'static>(
        &self,
        left: F::Layer<X>,
        right: F::Layer<Y>,
        f: impl FnMut(X, Y) -> Z,
    ) -> Result<F::Layer<Z>, CoreError>;

    /// Pair two layers into tuples.
    fn align<X: 'static, Y: 'static>(
        &self,
        left: F::Layer<X>,
        right: F::Layer<Y>,
    ) -> Result<F::Layer<(X, Y)>, CoreError> {
        self.align_with(left, right, |x, y| (x, y))
    }
}

/// Fail loudly on any arity mismatch. The recommended default.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactAlign;

impl Align<VecF> for ExactAlign {
    fn align_with<X: 'static, Y: 'static, Z: 'static>(
        &self,
        left: Vec<X>,
        right: Vec<Y>,
        mut f: impl FnMut(X, Y) -> Z,
    ) -> Result<Vec<Z>, CoreError> {
        if left.len() != right.len() {
            return Err(CoreError::AlignMismatch {
                left: left.len(),
                right: right.len(),
            });
        }
        Ok(left
            .into_iter()
            .zip(right)
            .map(|(x, y)| f(x, y))
            .collect())
    }
}

impl Align<PairF> for ExactAlign {
    fn align_with<X: 'static, Y: 'static, Z: 'static>(
        &self,
        (l0, l1): (X, X),
        (r0, r1): (Y, Y),
        mut f: impl FnMut(X, Y) -> Z,
    ) -> Result<(Z, Z), CoreError> {
        Ok((f(l0, r0), f(l1, r1)))
    }
}

impl Align<OptionF> for ExactAlign {
    fn align_with<X: 'static, Y: 'static, Z: 'static>(
        &self,
        left: Option<X>,
        right: Option<Y>,
        mut f: impl FnMut(X, Y) -> Z,
    ) -> Result<Option<Z>, CoreError> {
        match (left, right) {
            (Some(x), Some(y)) => Ok(Some(f(x, y))),
            (None, None) => Ok(None),
            (left, right) => Err(CoreError::AlignMismatch {
                left: left.is_some() as usize,
                right: right.is_some() as usize,
            }),
        }
    }
}

/// Zip to the shorter layer, silently dropping the excess.
#[derive(Debug, Clone, Copy, Default)]
pub struct TruncateAlign;

impl Align<VecF> for TruncateAlign {
    fn align_with<X: 'static, Y: 'static, Z: 'static>(
        &self,
        left: Vec<X>,
        right: Vec<Y>,
        mut f: impl FnMut(X, Y) -> Z,
    ) -> Result<Vec<Z>, CoreError> {
        Ok(left
            .into_iter()
            .zip(right)
            .map(|(x, y)| f(x, y))
            .collect())
    }
}

// ============================================================================
// Pairing
// ============================================================================

/// The pairing interpreter, configured with an alignment policy and an
/// optional depth limit.
#[derive(Debug, Clone)]
pub struct Pairing<AL> {
    align: AL,
    depth_limit: Option<usize>,
}

impl<AL> Pairing<AL> {
    /// Create an interpreter with the given alignment policy.
    pub fn new(align: AL) -> Self {
        Self {
            align,
            depth_limit: None,
        }
    }

    /// Refuse to descend more than `limit` layers. Off by default; turn it
    /// on when the program's finiteness is not under your control.
    pub fn with_depth_limit(mut self, limit: usize) -> Self {
        self.depth_limit = Some(limit);
        self
    }

    /// Fully resolve a program against an environment.
    ///
    /// `algebra` collapses one layer: it receives the environment head at
    /// that layer and the already-resolved children. Terminates iff the
    /// program is finite; the environment may be infinite.
    pub fn run<F, A, S>(
        &self,
        program: Free<F, A>,
        env: &LazyCofree<F, S>,
        mut algebra: impl FnMut(&S, F::Layer<A>) -> A,
    ) -> Result<A, CoreError>
    where
        F: Functor,
        AL: Align<F>,
        A: 'static,
        S: Clone + 'static,
    {
        self.run_at(program, env, &mut algebra, 0)
    }

    fn run_at<F, A, S, M>(
        &self,
        program: Free<F, A>,
        env: &LazyCofree<F, S>,
        algebra: &mut M,
        depth: usize,
    ) -> Result<A, CoreError>
    where
        F: Functor,
        AL: Align<F>,
        A: 'static,
        S: Clone + 'static,
        M: FnMut(&S, F::Layer<A>) -> A,
    {
        match program {
            Free::Pure(value) => Ok(value),
            Free::Impure(layer) => {
                self.check_depth(depth)?;
                tracing::trace!(depth, "aligning program layer with environment layer");
                let paired = self.align.align(*layer, env.force_tail())?;
                let resolved =
                    F::try_map(paired, |(child, child_env)| {
                        self.run_at(child, &child_env, algebra, depth + 1)
                    })?;
                Ok(algebra(env.extract(), resolved))
            }
        }
    }

    /// Resolve one layer only.
    ///
    /// Children are fully resolved (via [`Pairing::run`] semantics), but the
    /// current layer is re-wrapped as a fresh `Impure` node whose children
    /// are now `Pure` — so a caller can observe or interleave effects
    /// between layers instead of collapsing everything in one call.
    pub fn step<F, A, S>(
        &self,
        program: Free<F, A>,
        env: &LazyCofree<F, S>,
        mut algebra: impl FnMut(&S, F::Layer<A>) -> A,
    ) -> Result<Free<F, A>, CoreError>
    where
        F: Functor,
        AL: Align<F>,
        A: 'static,
        S: Clone + 'static,
    {
        match program {
            done @ Free::Pure(_) => Ok(done),
            Free::Impure(layer) => {
                self.check_depth(0)?;
                let paired = self.align.align(*layer, env.force_tail())?;
                let resolved =
                    F::try_map(paired, |(child, child_env)| {
                        self.run_at(child, &child_env, &mut algebra, 1)
                    })?;
                Ok(Free::roll(F::map(resolved, Free::Pure)))
            }
        }
    }

    /// Like [`Pairing::run`], additionally recording a [`TraceNode`] per
    /// environment layer consumed (labeled with its head).
    pub fn run_traced<F, A, S>(
        &self,
        program: Free<F, A>,
        env: &LazyCofree<F, S>,
        mut algebra: impl FnMut(&S, F::Layer<A>) -> A,
    ) -> Result<(A, TraceNode), CoreError>
    where
        F: Functor,
        AL: Align<F>,
        A: 'static,
        S: Clone + std::fmt::Display + 'static,
    {
        self.run_traced_at(program, env, &mut algebra, 0)
    }

    fn run_traced_at<F, A, S, M>(
        &self,
        program: Free<F, A>,
        env: &LazyCofree<F, S>,
        algebra: &mut M,
        depth: usize,
    ) -> Result<(A, TraceNode), CoreError>
    where
        F: Functor,
        AL: Align<F>,
        A: 'static,
        S: Clone + std::fmt::Display + 'static,
        M: FnMut(&S, F::Layer<A>) -> A,
    {
        match program {
            Free::Pure(value) => Ok((value, TraceNode::new("pure"))),
            Free::Impure(layer) => {
                self.check_depth(depth)?;
                let paired = self.align.align(*layer, env.force_tail())?;
                let mut traces = Vec::new();
                let resolved = F::try_map(paired, |(child, child_env)| {
                    let (value, trace) =
                        self.run_traced_at(child, &child_env, algebra, depth + 1)?;
                    traces.push(trace);
                    Ok(value)
                })?;
                let node = TraceNode::new(env.extract().to_string()).with_children(traces);
                Ok((algebra(env.extract(), resolved), node))
            }
        }
    }

    fn check_depth(&self, depth: usize) -> Result<(), CoreError> {
        match self.depth_limit {
            Some(limit) if depth >= limit => Err(CoreError::DepthLimit { limit }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Environment: head `n`, children `n + 1` and `n + 2`, forever.
    fn counting_env() -> LazyCofree<VecF, i32> {
        LazyCofree::coiter(10, |n| vec![n + 1, n + 2])
    }

    /// Depth 3, branching factor 2, all leaves known.
    fn program() -> Free<VecF, i32> {
        Free::roll(vec![
            Free::roll(vec![Free::pure(1), Free::pure(2)]),
            Free::roll(vec![Free::pure(3), Free::pure(4)]),
        ])
    }

    fn sum_algebra(head: &i32, children: Vec<i32>) -> i32 {
        head + children.into_iter().sum::<i32>()
    }

    #[test]
    fn test_run_matches_manual_collapse() {
        // manual bottom-up collapse:
        //   left layer:  env head 11 + (1 + 2) = 14
        //   right layer: env head 12 + (3 + 4) = 19
        //   root layer:  env head 10 + (14 + 19) = 43
        let pairing = Pairing::new(ExactAlign);
        let result = pairing.run(program(), &counting_env(), sum_algebra);
        assert_eq!(result, Ok(43));
    }

    #[test]
    fn test_run_pure_ignores_environment() {
        let pairing = Pairing::new(ExactAlign);
        let result = pairing.run(Free::pure(5), &counting_env(), sum_algebra);
        assert_eq!(result, Ok(5));
    }

    #[test]
    fn test_exact_align_rejects_arity_mismatch() {
        // three children where the environment always offers two
        let wide: Free<VecF, i32> = Free::roll(vec![Free::pure(1), Free::pure(2), Free::pure(3)]);
        let pairing = Pairing::new(ExactAlign);
        let result = pairing.run(wide, &counting_env(), sum_algebra);
        assert_eq!(result, Err(CoreError::AlignMismatch { left: 3, right: 2 }));
    }

    #[test]
    fn test_truncate_align_drops_excess() {
        let wide: Free<VecF, i32> = Free::roll(vec![Free::pure(1), Free::pure(2), Free::pure(3)]);
        let pairing = Pairing::new(TruncateAlign);
        // env head 10 + (1 + 2); the third child is dropped
        let result = pairing.run(wide, &counting_env(), sum_algebra);
        assert_eq!(result, Ok(13));
    }

    #[test]
    fn test_depth_limit_fires() {
        let pairing = Pairing::new(ExactAlign).with_depth_limit(1);
        let result = pairing.run(program(), &counting_env(), sum_algebra);
        assert_eq!(result, Err(CoreError::DepthLimit { limit: 1 }));
    }

    #[test]
    fn test_depth_limit_allows_shallow_programs() {
        let shallow: Free<VecF, i32> = Free::roll(vec![Free::pure(1), Free::pure(2)]);
        let pairing = Pairing::new(ExactAlign).with_depth_limit(1);
        assert_eq!(pairing.run(shallow, &counting_env(), sum_algebra), Ok(13));
    }

    #[test]
    fn test_step_resolves_children_but_keeps_top_layer() {
        let pairing = Pairing::new(ExactAlign);
        let stepped = pairing.step(program(), &counting_env(), sum_algebra).unwrap();
        let expected: Free<VecF, i32> = Free::roll(vec![Free::pure(14), Free::pure(19)]);
        assert_eq!(stepped, expected);

        // a second application of the algebra by hand finishes the job
        let finished = stepped.fold(|children| children.into_iter().sum());
        assert_eq!(finished + 10, 43);
    }

    #[test]
    fn test_step_on_pure_is_identity() {
        let pairing = Pairing::new(ExactAlign);
        let stepped = pairing
            .step(Free::<VecF, i32>::pure(8), &counting_env(), sum_algebra)
            .unwrap();
        assert_eq!(stepped, Free::pure(8));
    }

    #[test]
    fn test_exact_align_on_pairs() {
        let aligned =
            Align::<PairF>::align_with(&ExactAlign, (1, 2), ("a", "b"), |n, s| format!("{s}{n}"));
        assert_eq!(aligned, Ok(("a1".to_string(), "b2".to_string())));
    }

    #[test]
    fn test_exact_align_on_options() {
        let both = Align::<OptionF>::align_with(&ExactAlign, Some(1), Some(2), |x, y| x + y);
        assert_eq!(both, Ok(Some(3)));
        let neither =
            Align::<OptionF>::align_with(&ExactAlign, None::<i32>, None::<i32>, |x, y| x + y);
        assert_eq!(neither, Ok(None));
        let mismatch =
            Align::<OptionF>::align_with(&ExactAlign, Some(1), None::<i32>, |x, y| x + y);
        assert_eq!(mismatch, Err(CoreError::AlignMismatch { left: 1, right: 0 }));
    }

    #[test]
    fn test_run_traced_records_consumed_layers() {
        let pairing = Pairing::new(ExactAlign);
        let (value, trace) = pairing
            .run_traced(program(), &counting_env(), sum_algebra)
            .unwrap();
        assert_eq!(value, 43);
        assert_eq!(trace.label, "10");
        assert_eq!(trace.children.len(), 2);
        assert_eq!(trace.children[0].label, "11");
        assert_eq!(trace.children[1].label, "12");
        // leaves show up as "pure"
        assert_eq!(trace.children[0].children[0].label, "pure");
    }
}
