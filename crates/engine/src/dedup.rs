//! Duplicate detection against the committed ledger.
//!
//! The rule is a deliberate exact-match heuristic: a candidate duplicates a
//! ledger entry iff the target month, the amount in minor units, the trimmed
//! title, and the source label (both-missing counts as equal) all match.
//! First match wins; ties are not scored. Near-duplicates (off-by-one-øre
//! amounts, reworded titles) stage as new rows, and candidates are never
//! compared against other staged rows — only against the ledger.

use crate::{LedgerEntry, RawTransaction, YearMonth};

/// Returns the first ledger entry the candidate duplicates, if any.
pub fn find_duplicate<'a>(
    target: YearMonth,
    candidate: &RawTransaction,
    ledger: &'a [LedgerEntry],
) -> Option<&'a LedgerEntry> {
    ledger.iter().find(|entry| {
        entry.year_month == target
            && entry.amount == candidate.amount
            && entry.title.trim() == candidate.title.trim()
            && entry.source.as_deref() == candidate.source.as_deref()
    })
}
