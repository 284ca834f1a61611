//! # Strict Cofree Environments
//!
//! A [`Cofree`] value is an annotated tree: every node carries a value of
//! type `A` (its *head*) plus one `F`-shaped layer of child trees (its
//! *tail*). Where a [`crate::free::Free`] program says "what to do", a
//! `Cofree` environment says "what is available at every position".
//!
//! The strict variant here is fully materialized, so it must be finite. For
//! conceptually infinite environments (all future states of a machine, say)
//! use [`crate::lazy::LazyCofree`] and force layers on demand.
//!
//! ## Comonad Operations
//!
//! - [`Cofree::extract`] reads the head.
//! - [`Cofree::duplicate`] re-annotates every node with the subtree rooted
//!   there, so a later `map` can look at whole contexts instead of values.
//! - [`Cofree::extend`] fuses the two.
//!
//! The laws (`extract(duplicate(w)) == w`, `duplicate(w).map(extract) == w`,
//! and coassociativity of `duplicate`) hold for any lawful `Functor` impl
//! and are exercised by this crate's test suite.

use std::fmt;

use crate::functor::Functor;
use crate::lazy::LazyCofree;

/// A finite annotated tree over the shape functor `F`.
pub struct Cofree<F: Functor, A: 'static> {
    head: A,
    tail: Box<F::Layer<Cofree<F, A>>>,
}

impl<F: Functor, A: 'static> Cofree<F, A> {
    /// Build a node from its annotation and one layer of children.
    pub fn new(head: A, tail: F::Layer<Cofree<F, A>>) -> Self {
        Cofree {
            head,
            tail: Box::new(tail),
        }
    }

    /// The annotation at this node. O(1), total.
    pub fn extract(&self) -> &A {
        &self.head
    }

    /// The layer of child trees.
    pub fn tail(&self) -> &F::Layer<Cofree<F, A>> {
        &self.tail
    }

    /// Split the node into its annotation and children.
    pub fn into_parts(self) -> (A, F::Layer<Cofree<F, A>>) {
        (self.head, *self.tail)
    }

    /// Re-annotate every node through `f`, preserving the branching shape.
    pub fn map<B: 'static>(self, mut f: impl FnMut(A) -> B) -> Cofree<F, B> {
        self.map_heads(&mut f)
    }

    fn map_heads<B: 'static, M: FnMut(A) -> B>(self, f: &mut M) -> Cofree<F, B> {
        let head = f(self.head);
        let tail = F::map(*self.tail, |child| child.map_heads(f));
        Cofree::new(head, tail)
    }

    /// Re-annotate every node with the subtree rooted at it.
    pub fn duplicate(&self) -> Cofree<F, Cofree<F, A>>
    where
        Self: Clone,
    {
        Cofree::new(
            self.clone(),
            F::map_ref(&self.tail, |child| child.duplicate()),
        )
    }

    /// Context-dependent re-annotation: every node's new head is `k` applied
    /// to the subtree rooted at that node.
    pub fn extend<B: 'static>(&self, mut k: impl FnMut(&Cofree<F, A>) -> B) -> Cofree<F, B> {
        self.extend_with(&mut k)
    }

    fn extend_with<B: 'static, M: FnMut(&Cofree<F, A>) -> B>(&self, k: &mut M) -> Cofree<F, B> {
        let head = k(self);
        let tail = F::map_ref(&self.tail, |child| child.extend_with(k));
        Cofree::new(head, tail)
    }

    /// Convert into the thunked representation. Total: the source is finite,
    /// so every produced thunk regenerates its layer from a clone.
    pub fn to_lazy(&self) -> LazyCofree<F, A>
    where
        A: Clone,
        F::Layer<Cofree<F, A>>: Clone,
    {
        let tail = (*self.tail).clone();
        LazyCofree::new(self.head.clone(), move || {
            F::map_ref(&tail, |child| child.to_lazy())
        })
    }
}

impl<F: Functor, A: Clone + 'static> Clone for Cofree<F, A>
where
    F::Layer<Cofree<F, A>>: Clone,
{
    fn clone(&self) -> Self {
        Cofree {
            head: self.head.clone(),
            tail: self.tail.clone(),
        }
    }
}

impl<F: Functor, A: fmt::Debug + 'static> fmt::Debug for Cofree<F, A>
where
    F::Layer<Cofree<F, A>>: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cofree")
            .field("head", &self.head)
            .field("tail", &self.tail)
            .finish()
    }
}

impl<F: Functor, A: PartialEq + 'static> PartialEq for Cofree<F, A>
where
    F::Layer<Cofree<F, A>>: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.head == other.head && self.tail == other.tail
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functor::VecF;

    fn sample_tree() -> Cofree<VecF, i32> {
        Cofree::new(
            1,
            vec![
                Cofree::new(2, vec![Cofree::new(4, vec![])]),
                Cofree::new(3, vec![]),
            ],
        )
    }

    #[test]
    fn test_extract_reads_head() {
        assert_eq!(*sample_tree().extract(), 1);
    }

    #[test]
    fn test_map_preserves_shape() {
        let mapped = sample_tree().map(|x| x * 10);
        assert_eq!(*mapped.extract(), 10);
        assert_eq!(mapped.tail().len(), 2);
        assert_eq!(*mapped.tail()[0].extract(), 20);
        assert_eq!(*mapped.tail()[0].tail()[0].extract(), 40);
    }

    #[test]
    fn test_extract_after_duplicate_is_identity() {
        let tree = sample_tree();
        assert_eq!(tree.duplicate().into_parts().0, tree);
    }

    #[test]
    fn test_map_extract_after_duplicate_is_identity() {
        let tree = sample_tree();
        let rebuilt = tree.duplicate().map(|subtree| subtree.into_parts().0);
        assert_eq!(rebuilt, tree);
    }

    #[test]
    fn test_duplicate_is_coassociative() {
        let tree = sample_tree();
        let lhs = tree.duplicate().duplicate();
        let rhs = tree.duplicate().map(|subtree| subtree.duplicate());
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_extend_sees_whole_subtrees() {
        // annotate each node with the number of immediate children
        let counted = sample_tree().extend(|subtree| subtree.tail().len());
        assert_eq!(*counted.extract(), 2);
        assert_eq!(*counted.tail()[0].extract(), 1);
        assert_eq!(*counted.tail()[1].extract(), 0);
    }

    #[test]
    fn test_to_lazy_round_trip() {
        let tree = sample_tree();
        assert_eq!(tree.to_lazy().to_strict(), tree);
    }
}
