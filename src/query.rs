//! Query operations over the rows the store hands back, plus the
//! [`Gradebook`] service that binds them to a [`RecordStore`].
//!
//! Nothing here caches: every call to a `Gradebook` query re-reads the whole
//! store so the result always reflects the latest durable state.

use std::fmt;

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use tracing::debug;

use crate::error::{AddError, StoreError};
use crate::models::{parse_mark, StudentRecord, StudentRow, Subject};
use crate::store::RecordStore;
use crate::validation::RecordInput;

/// Keep rows whose id or name contains `keyword`, ignoring case. Marks are
/// never matched. An empty keyword keeps every row. File order is preserved.
pub fn search(rows: Vec<StudentRow>, keyword: &str) -> Vec<StudentRow> {
    let needle = keyword.to_lowercase();
    rows.into_iter()
        .filter(|row| matches_keyword(row, &needle))
        .collect()
}

fn matches_keyword(row: &StudentRow, needle: &str) -> bool {
    row.id.to_lowercase().contains(needle) || row.name.to_lowercase().contains(needle)
}

/// Aggregate marks for one subject. Only the average is lossy.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectStats {
    pub average: f64,
    pub high: BigInt,
    pub low: BigInt,
}

impl fmt::Display for SubjectStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Avg: {:.2}, High: {}, Low: {}",
            self.average, self.high, self.low
        )
    }
}

/// Per-subject statistics over every stored record.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeSummary {
    pub records: usize,
    pub math: SubjectStats,
    pub english: SubjectStats,
    pub science: SubjectStats,
}

impl GradeSummary {
    pub fn subject(&self, subject: Subject) -> &SubjectStats {
        match subject {
            Subject::Math => &self.math,
            Subject::English => &self.english,
            Subject::Science => &self.science,
        }
    }

    /// Subjects paired with their statistics, in column order.
    pub fn iter(&self) -> impl Iterator<Item = (Subject, &SubjectStats)> + '_ {
        Subject::ALL
            .into_iter()
            .map(move |subject| (subject, self.subject(subject)))
    }
}

/// Compute statistics for all rows. `Ok(None)` means there is no data, which
/// is a normal state rather than a failure.
pub fn statistics(rows: &[StudentRow]) -> Result<Option<GradeSummary>, StoreError> {
    if rows.is_empty() {
        return Ok(None);
    }

    Ok(Some(GradeSummary {
        records: rows.len(),
        math: subject_stats(rows, Subject::Math)?,
        english: subject_stats(rows, Subject::English)?,
        science: subject_stats(rows, Subject::Science)?,
    }))
}

/// `rows` must be non-empty.
fn subject_stats(rows: &[StudentRow], subject: Subject) -> Result<SubjectStats, StoreError> {
    let mut sum = BigInt::zero();
    let mut extremes: Option<(BigInt, BigInt)> = None;

    for (index, row) in rows.iter().enumerate() {
        let raw = row.mark(subject);
        let mark = parse_mark(raw).ok_or_else(|| StoreError::InvalidMark {
            record: index + 1,
            subject,
            value: raw.to_string(),
        })?;
        sum += &mark;
        extremes = Some(match extremes {
            None => (mark.clone(), mark),
            Some((high, low)) => (high.max(mark.clone()), low.min(mark)),
        });
    }

    let (high, low) = extremes.unwrap_or_default();
    Ok(SubjectStats {
        average: sum.to_f64().unwrap_or(f64::NAN) / rows.len() as f64,
        high,
        low,
    })
}

/// Add, list, search, and summarize student records against a store.
pub struct Gradebook<S> {
    store: S,
}

impl<S: RecordStore> Gradebook<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate the raw form input and append the resulting record. Nothing is
    /// written when validation fails.
    pub fn add(&self, input: &RecordInput) -> Result<StudentRecord, AddError> {
        let record = input.validate().inspect_err(|err| {
            debug!(error = %err, "rejected student input");
        })?;
        self.store.append(&record)?;
        Ok(record)
    }

    pub fn load_all(&self) -> Result<Vec<StudentRow>, StoreError> {
        self.store.load_all()
    }

    pub fn search(&self, keyword: &str) -> Result<Vec<StudentRow>, StoreError> {
        let matches = search(self.store.load_all()?, keyword);
        debug!(matches = matches.len(), "search finished");
        Ok(matches)
    }

    /// Statistics over the whole store, regardless of what the UI is showing.
    pub fn statistics(&self) -> Result<Option<GradeSummary>, StoreError> {
        statistics(&self.store.load_all()?)
    }
}
