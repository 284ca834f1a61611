//! # CoKleisli Arrows
//!
//! A CoKleisli arrow is a function *out of* a context: `&LazyCofree<F, A> -> B`.
//! Where an ordinary function sees one value, a CoKleisli arrow sees the
//! value *and everything below it* — which is exactly what stream processors
//! and context-dependent rewrites need.
//!
//! Composition is the standard comonad-to-arrow construction:
//!
//! ```text
//!   identity      =  extract
//!   f.then(g)     =  g ∘ extend(f)
//! ```
//!
//! which satisfies the Category laws because `extend` satisfies the comonad
//! laws.
//!
//! [`select_left`] is the `ArrowChoice` distributive law over these
//! environments: it pushes a `Coproduct` annotation outward, short-circuiting
//! on `Right` and — crucially — *not advancing* past children that resolve
//! to `Right`. That asymmetry matches the Mealy `left` policy in the
//! machines crate and is part of the contract, not an accident.

use std::rc::Rc;

use crate::functor::{Coproduct, Functor};
use crate::lazy::LazyCofree;

/// A function out of an environment: `&LazyCofree<F, A> -> B`.
pub struct CoKleisli<F: Functor, A: 'static, B: 'static> {
    run: Rc<dyn Fn(&LazyCofree<F, A>) -> B>,
}

impl<F: Functor, A: 'static, B: 'static> Clone for CoKleisli<F, A, B> {
    fn clone(&self) -> Self {
        CoKleisli {
            run: Rc::clone(&self.run),
        }
    }
}

impl<F: Functor, A: 'static, B: 'static> CoKleisli<F, A, B> {
    /// Wrap a context-consuming function.
    pub fn new(f: impl Fn(&LazyCofree<F, A>) -> B + 'static) -> Self {
        CoKleisli { run: Rc::new(f) }
    }

    /// Lift a head-only function: the context below is ignored.
    pub fn arr(f: impl Fn(&A) -> B + 'static) -> Self {
        CoKleisli::new(move |env| f(env.extract()))
    }

    /// Apply the arrow to an environment.
    pub fn apply(&self, env: &LazyCofree<F, A>) -> B {
        (*self.run)(env)
    }

    /// Sequential composition: observe `self` at every position (via
    /// `extend`), then run `next` on the re-annotated environment.
    pub fn then<C: 'static>(&self, next: &CoKleisli<F, B, C>) -> CoKleisli<F, A, C>
    where
        A: Clone,
        B: Clone,
    {
        let f = Rc::clone(&self.run);
        let g = next.clone();
        CoKleisli::new(move |env| g.apply(&env.extend_rc(Rc::clone(&f))))
    }

    /// Route the arrow through the first component of a paired annotation;
    /// the second component passes through from the current head untouched.
    pub fn first<X: Clone + 'static>(&self) -> CoKleisli<F, (A, X), (B, X)>
    where
        A: Clone,
    {
        let f = self.clone();
        CoKleisli::new(move |env: &LazyCofree<F, (A, X)>| {
            let left = env.map(|(a, _)| a.clone());
            let passthrough = env.extract().1.clone();
            (f.apply(&left), passthrough)
        })
    }
}

impl<F: Functor, A: Clone + 'static> CoKleisli<F, A, A> {
    /// The identity arrow: `extract`.
    pub fn identity() -> Self {
        CoKleisli::new(|env: &LazyCofree<F, A>| env.extract().clone())
    }
}

// ============================================================================
// ArrowChoice distributive law
// ============================================================================

/// Push a `Coproduct` annotation out of an environment:
/// `LazyCofree<F, Coproduct<A, C>> -> Coproduct<LazyCofree<F, A>, C>`.
///
/// - A `Right` head short-circuits immediately.
/// - A `Left` head becomes a node whose children are resolved lazily: a
///   child that resolves `Left` is descended into, while a child that
///   resolves `Right` is replaced by the current node's own resolution —
///   the environment does not advance along that branch.
pub fn select_left<F, A, C>(
    env: &LazyCofree<F, Coproduct<A, C>>,
) -> Coproduct<LazyCofree<F, A>, C>
where
    F: Functor,
    A: Clone + 'static,
    C: Clone + 'static,
{
    match env.extract() {
        Coproduct::Right(c) => Coproduct::Right(c.clone()),
        Coproduct::Left(a) => Coproduct::Left(resolve_left(a, env)),
    }
}

/// Build the `Left` resolution of a node already known to have a `Left` head.
fn resolve_left<F, A, C>(
    head: &A,
    node: &LazyCofree<F, Coproduct<A, C>>,
) -> LazyCofree<F, A>
where
    F: Functor,
    A: Clone + 'static,
    C: Clone + 'static,
{
    let here = head.clone();
    let stay_head = head.clone();
    let source = node.clone();
    LazyCofree::new(here, move || {
        F::map(source.force_tail(), |child| match select_left(&child) {
            Coproduct::Left(resolved) => resolved,
            // the child refused: hold position at this node
            Coproduct::Right(_) => resolve_left(&stay_head, &source),
        })
    })
}
