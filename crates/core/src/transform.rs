//! # Structural Transformers
//!
//! Operations that change a tree's branching structure without touching the
//! annotation sequence a consumer observes:
//!
//! - [`hoist`]: rehost a tree onto a different shape functor through a
//!   natural transformation.
//! - [`interleave`] / [`interleave_lazy`]: thread a trivial applicative
//!   layer between every step of a tree.
//! - [`supply_snapshot`]: attach one level of environment lookahead to every
//!   layer of a program, with no shape alignment required.
//!
//! All three preserve `extract` at every position: only the shape around the
//! annotations changes.

use crate::cofree::Cofree;
use crate::free::Free;
use crate::functor::{Applicative, ComposeF, Functor, Natural};
use crate::lazy::LazyCofree;

/// Rehost a tree onto the shape functor `H` via a natural transformation.
///
/// Children are converted recursively first; the resulting layer is then
/// itself converted through `nat`. Every head is preserved exactly.
pub fn hoist<F, H, A, N>(nat: &N, tree: Cofree<F, A>) -> Cofree<H, A>
where
    F: Functor,
    H: Functor,
    N: Natural<F, H>,
    A: 'static,
{
    let (head, tail) = tree.into_parts();
    let converted = F::map(tail, |child| hoist(nat, child));
    Cofree::new(head, nat.transform(converted))
}

/// Insert a trivial `H`-layer (via [`Applicative::of`]) at every step of a
/// strict tree, producing a tree over [`ComposeF<G, H>`].
///
/// Fully recursive: every node is visited eagerly. For layer-at-a-time
/// insertion on unbounded trees use [`interleave_lazy`].
pub fn interleave<G, H, A>(tree: Cofree<G, A>) -> Cofree<ComposeF<G, H>, A>
where
    G: Functor,
    H: Applicative,
    A: 'static,
{
    let (head, tail) = tree.into_parts();
    Cofree::new(head, G::map(tail, |child| H::of(interleave::<G, H, A>(child))))
}

/// Lazy companion of [`interleave`]: each layer is wrapped only when forced,
/// so the source may be infinite.
pub fn interleave_lazy<G, H, A>(tree: &LazyCofree<G, A>) -> LazyCofree<ComposeF<G, H>, A>
where
    G: Functor,
    H: Applicative,
    A: Clone + 'static,
{
    let node = tree.clone();
    LazyCofree::new(tree.extract().clone(), move || {
        G::map(node.force_tail(), |child| {
            H::of(interleave_lazy::<G, H, A>(&child))
        })
    })
}

// ============================================================================
// Snapshot supply
// ============================================================================

/// One layer of a snapshot-annotated program: the environment's immediate
/// children's heads, carried alongside an unmodified program layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshotted<C, L> {
    /// Heads of the environment's children at the time of the snapshot.
    pub context: C,
    /// The original program layer.
    pub inner: L,
}

/// Brand for programs annotated with environment snapshots: a layer is a
/// [`Snapshotted`] pairing of a `G::Layer<S>` context with an `F` layer.
pub struct SnapF<F, G, S>(std::marker::PhantomData<(F, G, S)>);

impl<F, G, S> Functor for SnapF<F, G, S>
where
    F: Functor,
    G: Functor,
    S: 'static,
    G::Layer<S>: Clone,
{
    type Layer<T: 'static> = Snapshotted<G::Layer<S>, F::Layer<T>>;

    fn map<A: 'static, B: 'static>(
        layer: Self::Layer<A>,
        f: impl FnMut(A) -> B,
    ) -> Self::Layer<B> {
        Snapshotted {
            context: layer.context,
            inner: F::map(layer.inner, f),
        }
    }

    fn map_ref<'a, A: 'static, B: 'static>(
        layer: &'a Self::Layer<A>,
        f: impl FnMut(&'a A) -> B,
    ) -> Self::Layer<B> {
        Snapshotted {
            context: layer.context.clone(),
            inner: F::map_ref(&layer.inner, f),
        }
    }

    fn try_map<A: 'static, B: 'static, E>(
        layer: Self::Layer<A>,
        f: impl FnMut(A) -> Result<B, E>,
    ) -> Result<Self::Layer<B>, E> {
        Ok(Snapshotted {
            context: layer.context,
            inner: F::try_map(layer.inner, f)?,
        })
    }
}

/// Pair a program with an environment **without** shape alignment.
///
/// Every `Impure` layer is annotated with a snapshot of the environment's
/// immediate children's heads — one level of lookahead. The environment does
/// not descend with the program: it is consulted exactly one layer deep at
/// each call, so a program's choice of branch never influences which
/// environment branch is seen. Strictly weaker than full pairing
/// ([`crate::pair::Pairing`]); use it when no [`crate::pair::Align`] policy
/// is available or wanted.
pub fn supply_snapshot<F, G, A, S>(
    program: Free<F, A>,
    env: &Cofree<G, S>,
) -> Free<SnapF<F, G, S>, A>
where
    F: Functor,
    G: Functor,
    A: 'static,
    S: Clone + 'static,
    G::Layer<S>: Clone,
{
    match program {
        Free::Pure(value) => Free::Pure(value),
        Free::Impure(layer) => {
            let context = G::map_ref(env.tail(), |child| child.extract().clone());
            let inner = F::map(*layer, |child| supply_snapshot(child, env));
            Free::roll(Snapshotted { context, inner })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functor::{OptionF, VecF};

    /// `OptionF ~> VecF`: zero-or-one children become a vector of the same.
    struct OptionToVec;

    impl Natural<OptionF, VecF> for OptionToVec {
        fn transform<T: 'static>(&self, layer: Option<T>) -> Vec<T> {
            layer.into_iter().collect()
        }
    }

    /// A finite chain 1 -> 2 -> 3 over OptionF.
    fn chain() -> Cofree<OptionF, i32> {
        Cofree::new(1, Some(Cofree::new(2, Some(Cofree::new(3, None)))))
    }

    #[test]
    fn test_hoist_preserves_heads() {
        let hoisted: Cofree<VecF, i32> = hoist(&OptionToVec, chain());
        assert_eq!(*hoisted.extract(), 1);
        assert_eq!(hoisted.tail().len(), 1);
        assert_eq!(*hoisted.tail()[0].extract(), 2);
        assert_eq!(*hoisted.tail()[0].tail()[0].extract(), 3);
        assert!(hoisted.tail()[0].tail()[0].tail().is_empty());
    }

    #[test]
    fn test_interleave_wraps_every_child() {
        let tree: Cofree<VecF, i32> =
            Cofree::new(1, vec![Cofree::new(2, vec![]), Cofree::new(3, vec![])]);
        let wrapped: Cofree<ComposeF<VecF, OptionF>, i32> = interleave::<VecF, OptionF, i32>(tree);
        assert_eq!(*wrapped.extract(), 1);
        let tail = wrapped.tail();
        assert_eq!(tail.len(), 2);
        assert_eq!(*tail[0].as_ref().unwrap().extract(), 2);
        assert_eq!(*tail[1].as_ref().unwrap().extract(), 3);
    }

    #[test]
    fn test_interleave_lazy_converts_on_demand() {
        let tree: LazyCofree<VecF, i32> = LazyCofree::coiter(0, |n| vec![n + 1]);
        let wrapped = interleave_lazy::<VecF, OptionF, i32>(&tree);
        assert_eq!(*wrapped.extract(), 0);
        let layer = wrapped.force_tail();
        assert_eq!(layer.len(), 1);
        let child = layer[0].as_ref().unwrap();
        assert_eq!(*child.extract(), 1);
        // still streams: grandchildren force fine
        let grand = child.force_tail();
        assert_eq!(*grand[0].as_ref().unwrap().extract(), 2);
    }

    #[test]
    fn test_supply_snapshot_annotates_every_layer() {
        let program: Free<VecF, i32> =
            Free::roll(vec![Free::roll(vec![Free::pure(1)]), Free::pure(2)]);
        let env: Cofree<VecF, &'static str> = Cofree::new(
            "root",
            vec![Cofree::new("a", vec![]), Cofree::new("b", vec![])],
        );

        let supplied = supply_snapshot(program, &env);
        match supplied {
            Free::Impure(layer) => {
                assert_eq!(layer.context, vec!["a", "b"]);
                // the nested layer carries the same one-level snapshot
                match &layer.inner[0] {
                    Free::Impure(nested) => assert_eq!(nested.context, vec!["a", "b"]),
                    Free::Pure(_) => panic!("expected nested layer"),
                }
            }
            Free::Pure(_) => panic!("expected an annotated layer"),
        }
    }

    #[test]
    fn test_supplied_programs_still_fold() {
        let program: Free<VecF, i32> = Free::roll(vec![Free::pure(1), Free::pure(2)]);
        let env: Cofree<VecF, i32> = Cofree::new(0, vec![Cofree::new(7, vec![])]);
        let supplied = supply_snapshot(program, &env);
        // collapse: every layer contributes its snapshot total plus its children
        let total = supplied.fold(|layer| {
            layer.context.iter().sum::<i32>() + layer.inner.iter().sum::<i32>()
        });
        assert_eq!(total, 10); // 7 from the snapshot, 1 + 2 from the leaves
    }

    #[test]
    fn test_supply_snapshot_leaves_pure_untouched() {
        let env: Cofree<VecF, i32> = Cofree::new(0, vec![]);
        let supplied = supply_snapshot(Free::<VecF, i32>::pure(9), &env);
        assert!(supplied.is_pure());
    }
}
