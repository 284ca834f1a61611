//! # Shape Functors - The Branching Seam
//!
//! Every tree in this crate (programs, environments, machines) is generic
//! over its branching structure. Rust has no higher-kinded types, so the
//! "type constructor" slot is filled by a zero-sized *brand* type whose
//! [`Functor`] impl names the concrete container via a generic associated
//! type:
//!
//! ```text
//!   brand        one layer of branching
//!   ─────        ──────────────────────
//!   VecF    ──▶  Vec<T>        (n children)
//!   PairF   ──▶  (T, T)        (exactly two children)
//!   OptionF ──▶  Option<T>     (zero or one child)
//! ```
//!
//! ## Laws
//!
//! `map` must preserve identity (`map(fa, |x| x) == fa`) and composition
//! (`map(map(fa, f), g) == map(fa, |x| g(f(x)))`). Nothing checks this at
//! runtime; a law-breaking impl produces silently wrong trees, not panics.
//!
//! ## Design Choices
//!
//! Layers are required to be `'static`. This trades away borrowed data in
//! tree nodes for clean interaction with the thunked trees in
//! [`crate::lazy`], whose closures must own their captures. Function-shaped
//! branching (`Input -> Next`) is deliberately *not* expressed through this
//! trait; the machines crate monomorphizes those shapes instead.

use std::marker::PhantomData;

/// A branching shape: one layer of a tree, with a hole for the children.
///
/// Implemented on a brand type (usually a unit struct); the actual container
/// is `Self::Layer<T>`.
pub trait Functor: 'static {
    /// One layer of branching with children of type `T`.
    type Layer<T: 'static>: 'static;

    /// Rewrite every child through `f`, preserving the layer's shape.
    fn map<A: 'static, B: 'static>(
        layer: Self::Layer<A>,
        f: impl FnMut(A) -> B,
    ) -> Self::Layer<B>;

    /// Borrowing variant of [`Functor::map`].
    ///
    /// The closure receives references tied to the input layer, so callers
    /// can collect child references or clone selectively.
    fn map_ref<'a, A: 'static, B: 'static>(
        layer: &'a Self::Layer<A>,
        f: impl FnMut(&'a A) -> B,
    ) -> Self::Layer<B>;

    /// Short-circuiting variant of [`Functor::map`]: the first `Err` aborts
    /// the rewrite.
    fn try_map<A: 'static, B: 'static, E>(
        layer: Self::Layer<A>,
        f: impl FnMut(A) -> Result<B, E>,
    ) -> Result<Self::Layer<B>, E>;
}

/// A functor that can wrap a single value in a trivial layer.
///
/// Only the compose-lift transformer needs this (`of` supplies the inserted
/// layer); there is no `ap`/`lift2` because nothing here uses them.
pub trait Applicative: Functor {
    /// Wrap one value in a minimal layer.
    fn of<T: 'static>(value: T) -> Self::Layer<T>;
}

/// A shape-changing conversion `F::Layer<T> -> H::Layer<T>` that works for
/// every `T` and commutes with both functors' `map`.
pub trait Natural<F: Functor, H: Functor> {
    /// Convert one layer, preserving the children.
    fn transform<T: 'static>(&self, layer: F::Layer<T>) -> H::Layer<T>;
}

// ============================================================================
// Coproduct
// ============================================================================

/// A choice between two values.
///
/// Used by the `ArrowChoice`-style operations ([`crate::cokleisli::select_left`]
/// and the machines crate's `left`) to route inputs down one of two branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coproduct<A, B> {
    /// The branch the machinery advances on.
    Left(A),
    /// The pass-through branch.
    Right(B),
}

impl<A, B> Coproduct<A, B> {
    /// Is this the left branch?
    pub fn is_left(&self) -> bool {
        matches!(self, Coproduct::Left(_))
    }

    /// Extract the left value, if present.
    pub fn left(self) -> Option<A> {
        match self {
            Coproduct::Left(a) => Some(a),
            Coproduct::Right(_) => None,
        }
    }

    /// Extract the right value, if present.
    pub fn right(self) -> Option<B> {
        match self {
            Coproduct::Left(_) => None,
            Coproduct::Right(b) => Some(b),
        }
    }
}

// ============================================================================
// Concrete brands
// ============================================================================

/// N-ary branching: a layer is a `Vec` of children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VecF;

impl Functor for VecF {
    type Layer<T: 'static> = Vec<T>;

    fn map<A: 'static, B: 'static>(layer: Vec<A>, f: impl FnMut(A) -> B) -> Vec<B> {
        layer.into_iter().map(f).collect()
    }

    fn map_ref<'a, A: 'static, B: 'static>(
        layer: &'a Vec<A>,
        f: impl FnMut(&'a A) -> B,
    ) -> Vec<B> {
        layer.iter().map(f).collect()
    }

    fn try_map<A: 'static, B: 'static, E>(
        layer: Vec<A>,
        f: impl FnMut(A) -> Result<B, E>,
    ) -> Result<Vec<B>, E> {
        layer.into_iter().map(f).collect()
    }
}

/// Exactly-two branching: a layer is a pair of children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairF;

impl Functor for PairF {
    type Layer<T: 'static> = (T, T);

    fn map<A: 'static, B: 'static>((l, r): (A, A), mut f: impl FnMut(A) -> B) -> (B, B) {
        let fl = f(l);
        let fr = f(r);
        (fl, fr)
    }

    fn map_ref<'a, A: 'static, B: 'static>(
        (l, r): &'a (A, A),
        mut f: impl FnMut(&'a A) -> B,
    ) -> (B, B) {
        let fl = f(l);
        let fr = f(r);
        (fl, fr)
    }

    fn try_map<A: 'static, B: 'static, E>(
        (l, r): (A, A),
        mut f: impl FnMut(A) -> Result<B, E>,
    ) -> Result<(B, B), E> {
        Ok((f(l)?, f(r)?))
    }
}

/// Zero-or-one branching: a layer is an optional child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionF;

impl Functor for OptionF {
    type Layer<T: 'static> = Option<T>;

    fn map<A: 'static, B: 'static>(layer: Option<A>, f: impl FnMut(A) -> B) -> Option<B> {
        layer.map(f)
    }

    fn map_ref<'a, A: 'static, B: 'static>(
        layer: &'a Option<A>,
        f: impl FnMut(&'a A) -> B,
    ) -> Option<B> {
        layer.as_ref().map(f)
    }

    fn try_map<A: 'static, B: 'static, E>(
        layer: Option<A>,
        f: impl FnMut(A) -> Result<B, E>,
    ) -> Result<Option<B>, E> {
        layer.map(f).transpose()
    }
}

impl Applicative for OptionF {
    fn of<T: 'static>(value: T) -> Option<T> {
        Some(value)
    }
}

impl Applicative for VecF {
    fn of<T: 'static>(value: T) -> Vec<T> {
        vec![value]
    }
}

// ============================================================================
// Composition of brands
// ============================================================================

/// Nested branching `G` outside `H`: a layer is `G::Layer<H::Layer<T>>`.
///
/// Produced by the compose-lift transformer, which threads a trivial
/// `H`-layer between every step of a `G`-shaped tree.
pub struct ComposeF<G, H>(PhantomData<(G, H)>);

impl<G: Functor, H: Functor> Functor for ComposeF<G, H> {
    type Layer<T: 'static> = G::Layer<H::Layer<T>>;

    fn map<A: 'static, B: 'static>(
        layer: Self::Layer<A>,
        mut f: impl FnMut(A) -> B,
    ) -> Self::Layer<B> {
        G::map(layer, |inner| H::map(inner, &mut f))
    }

    fn map_ref<'a, A: 'static, B: 'static>(
        layer: &'a Self::Layer<A>,
        mut f: impl FnMut(&'a A) -> B,
    ) -> Self::Layer<B> {
        G::map_ref(layer, |inner| H::map_ref(inner, &mut f))
    }

    fn try_map<A: 'static, B: 'static, E>(
        layer: Self::Layer<A>,
        mut f: impl FnMut(A) -> Result<B, E>,
    ) -> Result<Self::Layer<B>, E> {
        G::try_map(layer, |inner| H::try_map(inner, &mut f))
    }
}

// ============================================================================
// Shipped natural transformations
// ============================================================================

/// `PairF ~> VecF`: a pair of children becomes a two-element vector.
pub struct PairToVec;

impl Natural<PairF, VecF> for PairToVec {
    fn transform<T: 'static>(&self, (l, r): (T, T)) -> Vec<T> {
        vec![l, r]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vecf_map_identity() {
        let layer = vec![1, 2, 3];
        assert_eq!(VecF::map(layer.clone(), |x| x), layer);
    }

    #[test]
    fn test_vecf_map_composition() {
        let layer = vec![1, 2, 3];
        let lhs = VecF::map(VecF::map(layer.clone(), |x| x + 1), |x| x * 2);
        let rhs = VecF::map(layer, |x| (x + 1) * 2);
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_vecf_try_map_short_circuits() {
        let mut visited = 0;
        let result: Result<Vec<i32>, &str> = VecF::try_map(vec![1, 2, 3], |x| {
            visited += 1;
            if x == 2 {
                Err("boom")
            } else {
                Ok(x)
            }
        });
        assert_eq!(result, Err("boom"));
        assert_eq!(visited, 2);
    }

    #[test]
    fn test_pairf_map() {
        assert_eq!(PairF::map((1, 2), |x| x * 10), (10, 20));
    }

    #[test]
    fn test_optionf_try_map() {
        let ok: Result<Option<i32>, ()> = OptionF::try_map(Some(1), Ok);
        assert_eq!(ok, Ok(Some(1)));
        let none: Result<Option<i32>, ()> = OptionF::try_map(None, Ok);
        assert_eq!(none, Ok(None));
    }

    #[test]
    fn test_compose_map_reaches_inner_children() {
        // ComposeF<VecF, OptionF>: Vec<Option<T>>
        let layer: Vec<Option<i32>> = vec![Some(1), None, Some(3)];
        let mapped = ComposeF::<VecF, OptionF>::map(layer, |x| x + 1);
        assert_eq!(mapped, vec![Some(2), None, Some(4)]);
    }

    #[test]
    fn test_pair_to_vec_commutes_with_map() {
        let nat = PairToVec;
        let layer = (1, 2);
        let lhs = VecF::map(nat.transform(layer), |x| x + 1);
        let rhs = nat.transform(PairF::map(layer, |x| x + 1));
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_coproduct_accessors() {
        let l: Coproduct<i32, &str> = Coproduct::Left(1);
        assert!(l.is_left());
        assert_eq!(l.left(), Some(1));
        let r: Coproduct<i32, &str> = Coproduct::Right("x");
        assert_eq!(r.right(), Some("x"));
    }
}
