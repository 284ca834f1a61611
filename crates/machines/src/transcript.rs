//! # Transcripts - Recorded Runs
//!
//! Driving a machine over an input sequence produces a [`Transcript`]: the
//! inputs and outputs, step by step. Transcripts are plain serializable
//! data, so a run can be stored, diffed, or — the interesting part —
//! [`replay`]ed against another machine to check that the two behave
//! identically over that sequence. Replay is how the law tests compare
//! machines without any notion of state equality.

use serde::{Deserialize, Serialize};

use crate::error::MachineError;
use crate::mealy::Mealy;

/// One input/output exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptStep<I, O> {
    /// The input fed to the machine.
    pub input: I,
    /// The output it produced.
    pub output: O,
}

/// A recorded run of a machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript<I, O> {
    /// The steps, in the order they happened.
    pub steps: Vec<TranscriptStep<I, O>>,
}

impl<I, O> Transcript<I, O> {
    /// An empty transcript.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Record one exchange.
    pub fn push(&mut self, input: I, output: O) {
        self.steps.push(TranscriptStep { input, output });
    }

    /// Number of steps recorded.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Is the transcript empty?
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The recorded outputs, in order.
    pub fn outputs(&self) -> Vec<O>
    where
        O: Clone,
    {
        self.steps.iter().map(|step| step.output.clone()).collect()
    }
}

impl<I, O> Default for Transcript<I, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: std::fmt::Display, O: std::fmt::Display> std::fmt::Display for Transcript<I, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Transcript ({} steps):", self.len())?;
        for (index, step) in self.steps.iter().enumerate() {
            writeln!(f, "  {:>3}: {} -> {}", index, step.input, step.output)?;
        }
        Ok(())
    }
}

/// Drive a machine over an input sequence, recording every exchange.
///
/// Returns the transcript together with the machine as it stands after the
/// final input.
pub fn drive<I, O>(
    machine: &Mealy<I, O>,
    inputs: impl IntoIterator<Item = I>,
) -> (Transcript<I, O>, Mealy<I, O>)
where
    I: Clone + 'static,
    O: 'static,
{
    let mut transcript = Transcript::new();
    let mut current = machine.clone();
    for input in inputs {
        let (output, next) = current.step(input.clone());
        tracing::trace!(step = transcript.len(), "machine step");
        transcript.push(input, output);
        current = next;
    }
    tracing::debug!(steps = transcript.len(), "drive complete");
    (transcript, current)
}

/// Re-run a transcript's inputs against a machine and verify the outputs
/// match what was recorded.
///
/// Returns the machine as it stands after the final input, or the index of
/// the first divergence.
pub fn replay<I, O>(
    transcript: &Transcript<I, O>,
    machine: &Mealy<I, O>,
) -> Result<Mealy<I, O>, MachineError>
where
    I: Clone + 'static,
    O: PartialEq + 'static,
{
    let mut current = machine.clone();
    for (step, recorded) in transcript.steps.iter().enumerate() {
        let (output, next) = current.step(recorded.input.clone());
        if output != recorded.output {
            return Err(MachineError::ReplayMismatch { step });
        }
        current = next;
    }
    Ok(current)
}
