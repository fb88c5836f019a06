//! Per-record decisions made by the deduplicator and the hook that observes them.
//!
//! [`crate::dedup::clean_with_observer`] reports every input record to a
//! [`DecisionObserver`]. Observers never influence the result.

use serde::Serialize;

use crate::status::StatusClass;

/// The rule that decided between the kept record and an incoming one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Incoming permanent over existing valid-temporary.
    PermanentOverTemporary,
    /// Incoming valid (either kind) over existing invalid.
    ValidOverInvalid,
    /// Both permanent: newer timestamp wins.
    PermanentRecency,
    /// Both valid-temporary: newer timestamp wins.
    TemporaryRecency,
    /// No rule applies; the kept record stays.
    KeepExisting,
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PermanentOverTemporary => "permanent_over_temporary",
            Self::ValidOverInvalid => "valid_over_invalid",
            Self::PermanentRecency => "permanent_recency",
            Self::TemporaryRecency => "temporary_recency",
            Self::KeepExisting => "keep_existing",
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to one input record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "rule", rename_all = "snake_case")]
pub enum Outcome {
    /// First record seen for its plate.
    Inserted,
    /// Became the kept record for its plate.
    Replaced(Rule),
    /// Discarded in favour of the already kept record.
    Kept(Rule),
    /// Excluded because the plate is blank.
    Skipped,
}

/// A decision point, borrowed from the records being folded.
#[derive(Debug, Clone, Copy)]
pub struct DecisionEvent<'a> {
    /// Trimmed plate; empty for skipped records.
    pub plate: &'a str,
    /// Position of the incoming record in the input.
    pub index: usize,
    pub incoming: StatusClass,
    /// Class of the kept record before this decision, if any.
    pub existing: Option<StatusClass>,
    pub outcome: Outcome,
}

/// Hook called once per input record by the deduplicator.
pub trait DecisionObserver {
    fn on_decision(&mut self, event: &DecisionEvent<'_>);
}

/// Ignores every decision.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl DecisionObserver for NoopObserver {
    fn on_decision(&mut self, _event: &DecisionEvent<'_>) {}
}

/// Emits each decision as a `tracing` debug event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl DecisionObserver for TracingObserver {
    fn on_decision(&mut self, event: &DecisionEvent<'_>) {
        match event.outcome {
            Outcome::Inserted => tracing::debug!(
                plate = event.plate,
                index = event.index,
                class = %event.incoming,
                "Keeping first record for plate"
            ),
            Outcome::Replaced(rule) => tracing::debug!(
                plate = event.plate,
                index = event.index,
                class = %event.incoming,
                existing = ?event.existing,
                %rule,
                "Replacing kept record"
            ),
            Outcome::Kept(rule) => tracing::debug!(
                plate = event.plate,
                index = event.index,
                class = %event.incoming,
                existing = ?event.existing,
                %rule,
                "Discarding incoming record"
            ),
            Outcome::Skipped => {
                tracing::debug!(index = event.index, "Skipping record without license plate")
            }
        }
    }
}

/// Owned copy of a [`DecisionEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordedDecision {
    pub plate: String,
    pub index: usize,
    pub incoming: StatusClass,
    pub existing: Option<StatusClass>,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Collects every decision, in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub decisions: Vec<RecordedDecision>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the decisions that discarded or replaced a record.
    pub fn changes(&self) -> impl Iterator<Item = &RecordedDecision> {
        self.decisions
            .iter()
            .filter(|d| matches!(d.outcome, Outcome::Replaced(_) | Outcome::Kept(_)))
    }
}

impl DecisionObserver for RecordingObserver {
    fn on_decision(&mut self, event: &DecisionEvent<'_>) {
        self.decisions.push(RecordedDecision {
            plate: event.plate.to_string(),
            index: event.index,
            incoming: event.incoming,
            existing: event.existing,
            outcome: event.outcome,
        });
    }
}

impl<T: DecisionObserver + ?Sized> DecisionObserver for &mut T {
    fn on_decision(&mut self, event: &DecisionEvent<'_>) {
        (**self).on_decision(event);
    }
}
