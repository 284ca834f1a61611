//! # Mealy Machines
//!
//! A Mealy machine consumes one input and produces an output together with
//! the machine to use next:
//!
//! ```text
//!          ┌──────────┐
//!   In ───▶│  Mealy   │───▶ (Out, next Mealy)
//!          └──────────┘
//! ```
//!
//! Every step is a pure transition: the old machine is untouched and can be
//! stepped again with a different input. There is no distinguished terminal
//! state and no canonical start — a machine value *is* a state.
//!
//! ## Composition
//!
//! Machines compose like functions ([`Mealy::then`]), route through pairs
//! ([`Mealy::first`]) and choices ([`Mealy::left`]). Composition satisfies
//! the Category laws exactly — associativity and identity at
//! [`Mealy::arr`]`(|x| x)` — which the test suite checks over input
//! sequences, because the choice/pair combinators assume them.
//!
//! Transition functions must be referentially transparent: stepping the same
//! machine twice with the same input must yield equivalent machines.
//! Breaking that breaks every law above.

use std::rc::Rc;

use coalgebra_core::Coproduct;

/// A stream transducer `In -> (Out, next machine)`.
pub struct Mealy<I, O> {
    transition: Rc<dyn Fn(I) -> (O, Mealy<I, O>)>,
}

impl<I, O> Clone for Mealy<I, O> {
    fn clone(&self) -> Self {
        Mealy {
            transition: Rc::clone(&self.transition),
        }
    }
}

impl<I, O> core::fmt::Debug for Mealy<I, O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Mealy").finish_non_exhaustive()
    }
}

impl<I: 'static, O: 'static> Mealy<I, O> {
    /// Wrap a raw transition function.
    pub fn new(transition: impl Fn(I) -> (O, Mealy<I, O>) + 'static) -> Self {
        Mealy {
            transition: Rc::new(transition),
        }
    }

    /// Build a machine from an accumulator seed and a step function.
    ///
    /// The seed is threaded through explicitly, so no self-referential
    /// closure is ever needed:
    ///
    /// ```
    /// use coalgebra_machines::Mealy;
    ///
    /// let totals = Mealy::unfold(0, |acc, input: i32| (acc + input, acc + input));
    /// let (out, next) = totals.step(5);
    /// assert_eq!(out, 5);
    /// assert_eq!(next.step(3).0, 8);
    /// ```
    pub fn unfold<S: Clone + 'static>(seed: S, step: impl Fn(&S, I) -> (O, S) + 'static) -> Self {
        Self::unfold_rc(seed, Rc::new(step))
    }

    fn unfold_rc<S: Clone + 'static>(seed: S, step: Rc<dyn Fn(&S, I) -> (O, S)>) -> Self {
        Mealy {
            transition: Rc::new(move |input| {
                let (output, next) = (*step)(&seed, input);
                (output, Self::unfold_rc(next, Rc::clone(&step)))
            }),
        }
    }

    /// Lift a stateless function: the machine never changes behavior.
    pub fn arr(f: impl Fn(I) -> O + 'static) -> Self {
        Self::unfold((), move |_, input| (f(input), ()))
    }

    /// Consume one input.
    pub fn step(&self, input: I) -> (O, Mealy<I, O>) {
        (*self.transition)(input)
    }

    /// Sequential composition: feed this machine's output into `next`,
    /// pairing the two continuations into one machine.
    pub fn then<P: 'static>(&self, next: &Mealy<O, P>) -> Mealy<I, P> {
        let f = self.clone();
        let g = next.clone();
        Mealy::new(move |input| {
            let (mid, f_next) = f.step(input);
            let (out, g_next) = g.step(mid);
            (out, f_next.then(&g_next))
        })
    }

    /// Route the first component of a pair through the machine; the second
    /// component passes through unconsumed.
    pub fn first<X: 'static>(&self) -> Mealy<(I, X), (O, X)> {
        let machine = self.clone();
        Mealy::new(move |(input, passthrough)| {
            let (output, next) = machine.step(input);
            ((output, passthrough), next.first())
        })
    }

    /// Choice routing: a `Left` input steps the machine and re-wraps the
    /// output as `Left`; a `Right` input passes through untouched and the
    /// machine **does not advance** — its state on the next `Left` is
    /// whatever it was before the `Right` arrived. The asymmetry is part of
    /// the contract (and what makes `left` lawful for stateful machines).
    pub fn left<X: 'static>(&self) -> Mealy<Coproduct<I, X>, Coproduct<O, X>> {
        let machine = self.clone();
        Mealy::new(move |input| match input {
            Coproduct::Left(value) => {
                let (output, next) = machine.step(value);
                (Coproduct::Left(output), next.left())
            }
            Coproduct::Right(passthrough) => (Coproduct::Right(passthrough), machine.left()),
        })
    }
}
