//! Plate-keyed deduplication of validation records.
//!
//! [`clean`] keeps exactly one record per license plate. Records are folded
//! left to right; for every record whose plate is already kept, [`resolve`]
//! applies the first matching rule:
//!
//! 1. incoming permanent, kept valid-temporary: replace
//! 2. incoming valid (either kind), kept invalid: replace
//! 3. both permanent: replace only if incoming is strictly newer
//! 4. both valid-temporary: replace only if incoming is strictly newer
//! 5. otherwise keep
//!
//! Unparseable timestamps count as the earliest possible instant. The result
//! keeps each plate at the position of its first appearance, with the plate
//! trimmed. No I/O, no errors.

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::decision::{DecisionEvent, DecisionObserver, NoopObserver, Outcome, Rule};
use crate::status::{StatusClass, StatusVocabulary};
use crate::types::ValidationRecord;

/// Result of comparing the kept record with an incoming one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub rule: Rule,
    pub replace: bool,
}

/// Keep one record per distinct non-blank plate, stored under its trimmed plate.
pub fn clean(records: &[ValidationRecord], vocab: &StatusVocabulary) -> Vec<ValidationRecord> {
    clean_with_observer(records, vocab, NoopObserver)
}

/// [`clean`], reporting every decision to `observer`.
pub fn clean_with_observer<O: DecisionObserver>(
    records: &[ValidationRecord],
    vocab: &StatusVocabulary,
    mut observer: O,
) -> Vec<ValidationRecord> {
    let mut kept: IndexMap<&str, (&ValidationRecord, StatusClass)> =
        IndexMap::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let incoming = vocab.classify(&record.status);

        let Some(plate) = record.plate_key() else {
            observer.on_decision(&DecisionEvent {
                plate: "",
                index,
                incoming,
                existing: None,
                outcome: Outcome::Skipped,
            });
            continue;
        };

        let (existing, outcome) = match kept.entry(plate) {
            Entry::Vacant(slot) => {
                slot.insert((record, incoming));
                (None, Outcome::Inserted)
            }
            Entry::Occupied(mut slot) => {
                let (current, current_class) = *slot.get();
                let resolution = resolve(current, current_class, record, incoming);
                let outcome = if resolution.replace {
                    slot.insert((record, incoming));
                    Outcome::Replaced(resolution.rule)
                } else {
                    Outcome::Kept(resolution.rule)
                };
                (Some(current_class), outcome)
            }
        };

        observer.on_decision(&DecisionEvent {
            plate,
            index,
            incoming,
            existing,
            outcome,
        });
    }

    kept.into_iter()
        .map(|(plate, (record, _))| ValidationRecord {
            license_plate: plate.to_string(),
            ..record.clone()
        })
        .collect()
}

/// Decide whether `incoming` replaces `existing` for the same plate.
pub fn resolve(
    existing: &ValidationRecord,
    existing_class: StatusClass,
    incoming: &ValidationRecord,
    incoming_class: StatusClass,
) -> Resolution {
    use StatusClass::{Invalid, Permanent, ValidTemporary};

    let (rule, replace) = match (existing_class, incoming_class) {
        (ValidTemporary, Permanent) => (Rule::PermanentOverTemporary, true),
        (Invalid, class) if class.is_valid() => (Rule::ValidOverInvalid, true),
        (Permanent, Permanent) => (Rule::PermanentRecency, is_newer(incoming, existing)),
        (ValidTemporary, ValidTemporary) => (Rule::TemporaryRecency, is_newer(incoming, existing)),
        _ => (Rule::KeepExisting, false),
    };

    Resolution { rule, replace }
}

/// `true` when `candidate` was updated strictly after `current`.
///
/// A timestamp that fails to parse is the earliest possible instant, so an
/// unparseable candidate is never newer and any parseable candidate is newer
/// than an unparseable current.
pub fn is_newer(candidate: &ValidationRecord, current: &ValidationRecord) -> bool {
    match (candidate.updated_at(), current.updated_at()) {
        (Some(candidate), Some(current)) => candidate > current,
        (Some(_), None) => true,
        (None, _) => false,
    }
}
