//! # Stream Functions
//!
//! An [`SF`] is the Moore-style dual of a Mealy machine: the current output
//! is always readable (the *head*), and feeding an input advances to the
//! next tree of future outputs. Structurally it is an annotated tree with
//! one lazy child per possible input — the function-shaped branching the
//! core crate deliberately leaves monomorphic.
//!
//! ```text
//!   head ──▶ current A
//!   step ──▶ In ──▶ SF (next head, next step)
//! ```
//!
//! ## Comonad, Then Arrows
//!
//! `SF` carries the comonad operations ([`SF::extract`], [`SF::extend`],
//! [`SF::duplicate`]), and [`SfArrow`] builds Category/Arrow structure on
//! top of them the standard way: identity is `extract`, composition is
//! `g ∘ extend(f)`. [`SF::select_left`] is the `ArrowChoice` distributive
//! law with the same advance-on-`Left`-only policy as [`Mealy::left`].
//!
//! [`Mealy::left`]: crate::mealy::Mealy::left

use std::rc::Rc;

use coalgebra_core::Coproduct;

use crate::mealy::Mealy;

/// A stream of outputs that advances one input at a time.
pub struct SF<I, A> {
    head: A,
    step: Rc<dyn Fn(I) -> SF<I, A>>,
}

impl<I, A: Clone> Clone for SF<I, A> {
    fn clone(&self) -> Self {
        SF {
            head: self.head.clone(),
            step: Rc::clone(&self.step),
        }
    }
}

impl<I: 'static, A: 'static> SF<I, A> {
    /// Build a stream from its current output and transition.
    pub fn new(head: A, step: impl Fn(I) -> SF<I, A> + 'static) -> Self {
        SF {
            head,
            step: Rc::new(step),
        }
    }

    /// The current output. Never advances anything.
    pub fn extract(&self) -> &A {
        &self.head
    }

    /// Feed one input, producing the next stream.
    pub fn advance(&self, input: I) -> SF<I, A> {
        (*self.step)(input)
    }
}

impl<I: 'static, A: Clone + 'static> SF<I, A> {
    /// Build a stream from observation and transition functions over an
    /// explicit state — no self-referential closures required.
    pub fn unfold<S: Clone + 'static>(
        state: S,
        observe: impl Fn(&S) -> A + 'static,
        next: impl Fn(&S, I) -> S + 'static,
    ) -> Self {
        Self::unfold_rc(state, Rc::new(observe), Rc::new(next))
    }

    fn unfold_rc<S: Clone + 'static>(
        state: S,
        observe: Rc<dyn Fn(&S) -> A>,
        next: Rc<dyn Fn(&S, I) -> S>,
    ) -> Self {
        let head = (*observe)(&state);
        SF {
            head,
            step: Rc::new(move |input| {
                Self::unfold_rc((*next)(&state, input), Rc::clone(&observe), Rc::clone(&next))
            }),
        }
    }

    /// A stream that outputs the same value forever.
    pub fn constant(value: A) -> Self {
        Self::unfold(value, |v| v.clone(), |v, _| v.clone())
    }

    /// Re-annotate every future output through `f`, lazily.
    pub fn map<B: 'static>(&self, f: impl Fn(&A) -> B + 'static) -> SF<I, B> {
        self.map_rc(Rc::new(f))
    }

    fn map_rc<B: 'static>(&self, f: Rc<dyn Fn(&A) -> B>) -> SF<I, B> {
        let head = (*f)(&self.head);
        let step = Rc::clone(&self.step);
        SF {
            head,
            step: Rc::new(move |input| (*step)(input).map_rc(Rc::clone(&f))),
        }
    }

    /// Context-dependent re-annotation: every position's new output is `k`
    /// applied to the whole stream from that position on.
    pub fn extend<B: 'static>(&self, k: impl Fn(&SF<I, A>) -> B + 'static) -> SF<I, B> {
        self.extend_rc(Rc::new(k))
    }

    fn extend_rc<B: 'static>(&self, k: Rc<dyn Fn(&SF<I, A>) -> B>) -> SF<I, B> {
        let head = (*k)(self);
        let source = self.clone();
        SF {
            head,
            step: Rc::new(move |input| source.advance(input).extend_rc(Rc::clone(&k))),
        }
    }

    /// Re-annotate every position with the stream rooted there.
    pub fn duplicate(&self) -> SF<I, SF<I, A>> {
        self.extend(|stream| stream.clone())
    }

    /// Outputs observed after each input in turn.
    pub fn outputs(&self, inputs: impl IntoIterator<Item = I>) -> Vec<A> {
        let mut current = self.clone();
        let mut seen = Vec::new();
        for input in inputs {
            current = current.advance(input);
            seen.push(current.extract().clone());
        }
        seen
    }

    /// View a Mealy machine as a stream, given the output to show before the
    /// first input arrives.
    pub fn from_mealy(machine: &Mealy<I, A>, initial: A) -> SF<I, A> {
        let machine = machine.clone();
        SF::new(initial, move |input| {
            let (output, next) = machine.step(input);
            SF::from_mealy(&next, output)
        })
    }

    /// Collapse back to a Mealy machine; the current head is dropped (a
    /// Mealy output only exists in response to an input).
    pub fn into_mealy(&self) -> Mealy<I, A> {
        let stream = self.clone();
        Mealy::new(move |input| {
            let next = stream.advance(input);
            (next.extract().clone(), next.into_mealy())
        })
    }
}

// ============================================================================
// ArrowChoice distributive law
// ============================================================================

impl<I: 'static, A: Clone + 'static, C: Clone + 'static> SF<I, Coproduct<A, C>> {
    /// Push a `Coproduct` annotation out of the stream.
    ///
    /// A `Right` head short-circuits immediately. A `Left` head yields a
    /// stream that advances only while successors stay `Left`; an input
    /// whose successor resolves `Right` leaves the stream where it was.
    pub fn select_left(&self) -> Coproduct<SF<I, A>, C> {
        match self.extract() {
            Coproduct::Right(c) => Coproduct::Right(c.clone()),
            Coproduct::Left(a) => Coproduct::Left(self.resolve_left(a)),
        }
    }

    fn resolve_left(&self, head: &A) -> SF<I, A> {
        let here = head.clone();
        let stay = head.clone();
        let source = self.clone();
        SF::new(here, move |input| {
            let next = source.advance(input);
            match next.select_left() {
                Coproduct::Left(resolved) => resolved,
                // successor refused: hold position
                Coproduct::Right(_) => source.resolve_left(&stay),
            }
        })
    }
}

// ============================================================================
// CoKleisli arrows over streams
// ============================================================================

/// A function out of a stream context: `&SF<I, A> -> B`.
pub struct SfArrow<I, A, B> {
    run: Rc<dyn Fn(&SF<I, A>) -> B>,
}

impl<I, A, B> Clone for SfArrow<I, A, B> {
    fn clone(&self) -> Self {
        SfArrow {
            run: Rc::clone(&self.run),
        }
    }
}

impl<I: 'static, A: 'static, B: 'static> SfArrow<I, A, B> {
    /// Wrap a stream-consuming function.
    pub fn new(f: impl Fn(&SF<I, A>) -> B + 'static) -> Self {
        SfArrow { run: Rc::new(f) }
    }

    /// Lift a function on current outputs.
    pub fn arr(f: impl Fn(&A) -> B + 'static) -> Self {
        SfArrow::new(move |stream| f(stream.extract()))
    }

    /// Apply to a stream.
    pub fn apply(&self, stream: &SF<I, A>) -> B {
        (*self.run)(stream)
    }

    /// Sequential composition via `extend`.
    pub fn then<C: 'static>(&self, next: &SfArrow<I, B, C>) -> SfArrow<I, A, C>
    where
        A: Clone,
        B: Clone,
    {
        let f = Rc::clone(&self.run);
        let g = next.clone();
        SfArrow::new(move |stream| g.apply(&stream.extend_rc(Rc::clone(&f))))
    }

    /// Route through the first component of paired outputs; the second
    /// component of the current head passes through.
    pub fn first<X: Clone + 'static>(&self) -> SfArrow<I, (A, X), (B, X)>
    where
        A: Clone,
    {
        let f = self.clone();
        SfArrow::new(move |stream: &SF<I, (A, X)>| {
            let left = stream.map(|(a, _)| a.clone());
            let passthrough = stream.extract().1.clone();
            (f.apply(&left), passthrough)
        })
    }
}

impl<I: 'static, A: Clone + 'static> SfArrow<I, A, A> {
    /// The identity arrow: `extract`.
    pub fn identity() -> Self {
        SfArrow::new(|stream: &SF<I, A>| stream.extract().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Running totals as a stream: head is the total so far.
    fn totals() -> SF<i32, i32> {
        SF::unfold(0, |acc| *acc, |acc, input| acc + input)
    }

    #[test]
    fn test_extract_and_advance() {
        let stream = totals();
        assert_eq!(*stream.extract(), 0);
        let next = stream.advance(4);
        assert_eq!(*next.extract(), 4);
        // the original stream is unchanged
        assert_eq!(*stream.extract(), 0);
    }

    #[test]
    fn test_outputs_scenario() {
        assert_eq!(totals().outputs([1, 2, 3]), vec![1, 3, 6]);
    }

    #[test]
    fn test_constant_never_changes() {
        assert_eq!(SF::<i32, _>::constant(9).outputs([1, 2, 3]), vec![9, 9, 9]);
    }

    #[test]
    fn test_map_is_lazy_and_total() {
        let doubled = totals().map(|n| n * 2);
        assert_eq!(doubled.outputs([1, 2, 3]), vec![2, 6, 12]);
    }

    #[test]
    fn test_extend_sees_the_future() {
        // new output = current total plus the total after feeding a 1
        let peek = totals().extend(|stream| *stream.extract() + stream.advance(1).extract());
        assert_eq!(*peek.extract(), 1); // 0 + (0 + 1)
        assert_eq!(*peek.advance(4).extract(), 9); // 4 + (4 + 1)
    }

    #[test]
    fn test_duplicate_heads_are_streams() {
        let dup = totals().duplicate();
        assert_eq!(*dup.extract().extract(), 0);
        assert_eq!(*dup.advance(3).extract().extract(), 3);
    }

    #[test]
    fn test_mealy_round_trip() {
        let machine = Mealy::unfold(0, |acc, input: i32| (acc + input, acc + input));
        let stream = SF::from_mealy(&machine, 0);
        assert_eq!(stream.outputs([1, 2, 3]), vec![1, 3, 6]);

        let back = stream.into_mealy();
        let (out, _) = back.step(7);
        assert_eq!(out, 7);
    }

    #[test]
    fn test_arrow_identity_laws() {
        let f = SfArrow::<i32, i32, i32>::new(|s| s.extract() + s.advance(2).extract());
        let stream = totals();
        let expected = f.apply(&stream);
        assert_eq!(f.then(&SfArrow::identity()).apply(&stream), expected);
        assert_eq!(SfArrow::identity().then(&f).apply(&stream), expected);
    }

    #[test]
    fn test_arrow_associativity_over_inputs() {
        let f = SfArrow::<i32, i32, i32>::new(|s| s.extract() + s.advance(1).extract());
        let g = SfArrow::<i32, i32, i32>::arr(|x| x * 3);
        let h = SfArrow::<i32, i32, i32>::new(|s| *s.advance(2).extract());

        let lhs = f.then(&g).then(&h);
        let rhs = f.then(&g.then(&h));

        // compare along several positions of the stream
        let mut stream = totals();
        for input in [5, -1, 2, 8] {
            assert_eq!(lhs.apply(&stream), rhs.apply(&stream));
            stream = stream.advance(input);
        }
        assert_eq!(lhs.apply(&stream), rhs.apply(&stream));
    }

    #[test]
    fn test_arrow_first() {
        let paired = totals().map(|n| (*n, 'k'));
        let arrow = SfArrow::<i32, i32, i32>::arr(|x| x * 2).first::<char>();
        assert_eq!(arrow.apply(&paired), (0, 'k'));
        assert_eq!(arrow.apply(&paired.advance(3)), (6, 'k'));
    }

    #[test]
    fn test_select_left_short_circuit() {
        let stream: SF<i32, Coproduct<i32, String>> =
            SF::constant(Coproduct::Right("halt".to_string()));
        match stream.select_left() {
            Coproduct::Right(c) => assert_eq!(c, "halt"),
            Coproduct::Left(_) => panic!("expected Right"),
        }
    }

    #[test]
    fn test_select_left_holds_position_on_right() {
        // totals tagged: even totals are Left, odd totals are Right
        let tagged: SF<i32, Coproduct<i32, String>> = SF::unfold(
            0,
            |acc| {
                if acc % 2 == 0 {
                    Coproduct::Left(*acc)
                } else {
                    Coproduct::Right(format!("odd {acc}"))
                }
            },
            |acc, input| acc + input,
        );

        let resolved = match tagged.select_left() {
            Coproduct::Left(stream) => stream,
            Coproduct::Right(_) => panic!("0 is even"),
        };
        assert_eq!(*resolved.extract(), 0);

        // +2 keeps the total even: advance
        let advanced = resolved.advance(2);
        assert_eq!(*advanced.extract(), 2);

        // +1 would make it odd: hold position instead
        let held = advanced.advance(1);
        assert_eq!(*held.extract(), 2);

        // holding really kept the underlying state: +2 still lands on 4
        assert_eq!(*held.advance(2).extract(), 4);
    }
}
