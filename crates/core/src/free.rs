//! # Free Programs
//!
//! A [`Free`] value is a program: a tree of suspended instructions whose
//! branching is some shape functor `F`, terminated by `Pure` result values.
//! What the instructions *mean* is decided later, by whoever folds the tree —
//! the same program can be collapsed by [`Free::fold`], resolved against an
//! environment by [`crate::pair::Pairing`], or just rendered.
//!
//! ```text
//!        Impure ───┬── Impure ──┬── Pure(1)
//!                  │            └── Pure(2)
//!                  └── Pure(3)
//! ```
//!
//! Programs are immutable: every operation allocates new nodes and the
//! originals are never touched.

use std::fmt;

use crate::functor::Functor;

/// A program tree over the shape functor `F` with results of type `A`.
pub enum Free<F: Functor, A: 'static> {
    /// A finished computation carrying its result.
    Pure(A),
    /// One layer of suspended structure whose children are programs.
    Impure(Box<F::Layer<Free<F, A>>>),
}

impl<F: Functor, A: 'static> Free<F, A> {
    /// Lift a result value into a trivial program.
    pub fn pure(value: A) -> Self {
        Free::Pure(value)
    }

    /// Wrap one layer of structure into a program node.
    pub fn roll(layer: F::Layer<Free<F, A>>) -> Self {
        Free::Impure(Box::new(layer))
    }

    /// Is this program a bare result?
    pub fn is_pure(&self) -> bool {
        matches!(self, Free::Pure(_))
    }

    /// Rewrite every `Pure` leaf through `f`, leaving the branching shape of
    /// every `Impure` layer untouched.
    pub fn map<B: 'static>(self, mut f: impl FnMut(A) -> B) -> Free<F, B> {
        self.map_leaves(&mut f)
    }

    fn map_leaves<B: 'static, M: FnMut(A) -> B>(self, f: &mut M) -> Free<F, B> {
        match self {
            Free::Pure(value) => Free::Pure(f(value)),
            Free::Impure(layer) => {
                Free::Impure(Box::new(F::map(*layer, |child| child.map_leaves(f))))
            }
        }
    }

    /// Collapse the program bottom-up with an algebra `F::Layer<A> -> A`.
    ///
    /// This is the universal consumer of programs: any interpretation that
    /// does not need an environment is an instance of `fold`. The result
    /// depends only on the tree's shape and leaf values, never on evaluation
    /// order beyond what the shape's `map` order implies.
    pub fn fold(self, mut algebra: impl FnMut(F::Layer<A>) -> A) -> A {
        self.fold_with(&mut algebra)
    }

    fn fold_with<M: FnMut(F::Layer<A>) -> A>(self, algebra: &mut M) -> A {
        match self {
            Free::Pure(value) => value,
            Free::Impure(layer) => {
                let collapsed = F::map(*layer, |child| child.fold_with(algebra));
                algebra(collapsed)
            }
        }
    }

    /// Monadic bind: substitute a whole program for every `Pure` leaf.
    pub fn and_then<B: 'static>(self, mut k: impl FnMut(A) -> Free<F, B>) -> Free<F, B> {
        self.bind_with(&mut k)
    }

    fn bind_with<B: 'static, M: FnMut(A) -> Free<F, B>>(self, k: &mut M) -> Free<F, B> {
        match self {
            Free::Pure(value) => k(value),
            Free::Impure(layer) => {
                Free::Impure(Box::new(F::map(*layer, |child| child.bind_with(k))))
            }
        }
    }
}

impl<F: Functor, A: Clone + 'static> Clone for Free<F, A>
where
    F::Layer<Free<F, A>>: Clone,
{
    fn clone(&self) -> Self {
        match self {
            Free::Pure(value) => Free::Pure(value.clone()),
            Free::Impure(layer) => Free::Impure(layer.clone()),
        }
    }
}

impl<F: Functor, A: fmt::Debug + 'static> fmt::Debug for Free<F, A>
where
    F::Layer<Free<F, A>>: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Free::Pure(value) => f.debug_tuple("Pure").field(value).finish(),
            Free::Impure(layer) => f.debug_tuple("Impure").field(layer).finish(),
        }
    }
}

impl<F: Functor, A: PartialEq + 'static> PartialEq for Free<F, A>
where
    F::Layer<Free<F, A>>: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Free::Pure(a), Free::Pure(b)) => a == b,
            (Free::Impure(a), Free::Impure(b)) => a == b,
            _ => false,
        }
    }
}
