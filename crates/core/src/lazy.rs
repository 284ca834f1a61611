//! # Lazy Cofree Environments
//!
//! A [`LazyCofree`] is an annotated tree whose children are computed on
//! demand: the head is always available, the tail is a thunk. This is what
//! makes genuinely unbounded environments representable — an infinite stream
//! of future states costs nothing until somebody forces a layer.
//!
//! ```text
//!   head ──▶ 0
//!   tail ──▶ ⟨thunk⟩ ──force──▶ [ LazyCofree(1, ⟨thunk⟩), ... ]
//! ```
//!
//! ## Re-execution, Not Memoization
//!
//! Forcing the same tail twice runs the thunk twice. This is observable (a
//! thunk with side effects fires once per force) and deliberate: nodes stay
//! plain immutable values with no interior cache, and consumers that care
//! about the cost keep the forced layer themselves. The test suite pins this
//! behavior down so it is not "fixed" into memoization by accident.

use std::rc::Rc;

use crate::cofree::Cofree;
use crate::functor::Functor;

/// An annotated tree whose children are produced by a thunk.
pub struct LazyCofree<F: Functor, A: 'static> {
    head: A,
    tail: Rc<dyn Fn() -> F::Layer<LazyCofree<F, A>>>,
}

impl<F: Functor, A: Clone + 'static> Clone for LazyCofree<F, A> {
    fn clone(&self) -> Self {
        LazyCofree {
            head: self.head.clone(),
            tail: Rc::clone(&self.tail),
        }
    }
}

impl<F: Functor, A: 'static> LazyCofree<F, A> {
    /// Build a node; `tail` is not invoked until the node is forced.
    pub fn new(head: A, tail: impl Fn() -> F::Layer<LazyCofree<F, A>> + 'static) -> Self {
        LazyCofree {
            head,
            tail: Rc::new(tail),
        }
    }

    /// The annotation at this node. Never forces anything.
    pub fn extract(&self) -> &A {
        &self.head
    }

    /// Force exactly one layer, returning the `F`-shaped children (which are
    /// themselves still lazy). Runs the thunk every time it is called.
    pub fn force_tail(&self) -> F::Layer<LazyCofree<F, A>> {
        (*self.tail)()
    }

    /// Head plus one forced layer: the streaming entry point.
    pub fn uncons(&self) -> (&A, F::Layer<LazyCofree<F, A>>) {
        (&self.head, self.force_tail())
    }

    /// Materialize the whole tree.
    ///
    /// Total only for finite trees: on an infinite environment this will not
    /// terminate (or will exhaust memory). That is a caller obligation, not a
    /// checked error.
    pub fn to_strict(&self) -> Cofree<F, A>
    where
        A: Clone,
    {
        Cofree::new(
            self.head.clone(),
            F::map(self.force_tail(), |child| child.to_strict()),
        )
    }
}

impl<F: Functor, A: Clone + 'static> LazyCofree<F, A> {
    /// Grow a tree from a coalgebra whose seeds *are* the annotations.
    ///
    /// `branch` is only consulted when a layer is forced, so the tree may be
    /// infinite.
    pub fn coiter(seed: A, branch: impl Fn(&A) -> F::Layer<A> + 'static) -> Self {
        Self::coiter_rc(seed, Rc::new(branch))
    }

    fn coiter_rc(seed: A, branch: Rc<dyn Fn(&A) -> F::Layer<A>>) -> Self {
        let head = seed.clone();
        LazyCofree {
            head,
            tail: Rc::new(move || {
                F::map((*branch)(&seed), |next| {
                    Self::coiter_rc(next, Rc::clone(&branch))
                })
            }),
        }
    }

    /// Grow a tree from a coalgebra with a separate seed type.
    ///
    /// `step` is invoked once to produce this node's annotation and again
    /// whenever the tail is forced — consistent with the thunk re-execution
    /// semantics above, so `step` should be pure.
    pub fn unfold<S: Clone + 'static>(
        seed: S,
        step: impl Fn(&S) -> (A, F::Layer<S>) + 'static,
    ) -> Self {
        Self::unfold_rc(seed, Rc::new(step))
    }

    fn unfold_rc<S: Clone + 'static>(seed: S, step: Rc<dyn Fn(&S) -> (A, F::Layer<S>)>) -> Self {
        let (head, _) = (*step)(&seed);
        LazyCofree {
            head,
            tail: Rc::new(move || {
                let (_, seeds) = (*step)(&seed);
                F::map(seeds, |next| Self::unfold_rc(next, Rc::clone(&step)))
            }),
        }
    }

    /// Re-annotate every node through `f`, lazily: children are only
    /// converted when forced.
    pub fn map<B: 'static>(&self, f: impl Fn(&A) -> B + 'static) -> LazyCofree<F, B> {
        self.map_rc(Rc::new(f))
    }

    fn map_rc<B: 'static>(&self, f: Rc<dyn Fn(&A) -> B>) -> LazyCofree<F, B> {
        let head = (*f)(&self.head);
        let tail = Rc::clone(&self.tail);
        LazyCofree {
            head,
            tail: Rc::new(move || F::map((*tail)(), |child| child.map_rc(Rc::clone(&f)))),
        }
    }

    /// Context-dependent re-annotation; the lazy counterpart of
    /// [`Cofree::extend`].
    pub fn extend<B: 'static>(&self, k: impl Fn(&LazyCofree<F, A>) -> B + 'static) -> LazyCofree<F, B> {
        self.extend_rc(Rc::new(k))
    }

    pub(crate) fn extend_rc<B: 'static>(
        &self,
        k: Rc<dyn Fn(&LazyCofree<F, A>) -> B>,
    ) -> LazyCofree<F, B> {
        let head = (*k)(self);
        let node = self.clone();
        LazyCofree {
            head,
            tail: Rc::new(move || {
                F::map(node.force_tail(), |child| child.extend_rc(Rc::clone(&k)))
            }),
        }
    }

    /// Re-annotate every node with the subtree rooted at it.
    pub fn duplicate(&self) -> LazyCofree<F, LazyCofree<F, A>> {
        self.extend(|node| node.clone())
    }
}
