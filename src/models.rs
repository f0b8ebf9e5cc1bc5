//! Domain models that mirror the rows of the student CSV file and get passed
//! throughout the TUI. These types stay light-weight data holders so other
//! layers can focus on presentation and persistence logic.

use std::fmt;

use num_bigint::BigInt;

/// A validated student record. Marks are integers with no declared range, and
/// nothing guarantees that `id` is unique across the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    /// User-supplied identifier, trimmed and non-empty.
    pub id: String,
    /// Student name, trimmed and non-empty.
    pub name: String,
    pub math: BigInt,
    pub english: BigInt,
    pub science: BigInt,
}

impl StudentRecord {
    /// Mark for a single subject.
    pub fn mark(&self, subject: Subject) -> &BigInt {
        match subject {
            Subject::Math => &self.math,
            Subject::English => &self.english,
            Subject::Science => &self.science,
        }
    }

    /// Row representation exactly as it is written to disk.
    pub fn to_row(&self) -> StudentRow {
        StudentRow {
            id: self.id.clone(),
            name: self.name.clone(),
            math: self.math.to_string(),
            english: self.english.to_string(),
            science: self.science.to_string(),
        }
    }
}

/// Raw five-field row as stored in the file. Marks are kept as text; callers
/// that need integers parse them themselves.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StudentRow {
    pub id: String,
    pub name: String,
    pub math: String,
    pub english: String,
    pub science: String,
}

impl StudentRow {
    /// Number of fields every persisted row carries.
    pub const FIELD_COUNT: usize = 5;

    /// Fields in file order: id, name, math, english, science.
    pub fn fields(&self) -> [&str; Self::FIELD_COUNT] {
        [
            self.id.as_str(),
            self.name.as_str(),
            self.math.as_str(),
            self.english.as_str(),
            self.science.as_str(),
        ]
    }

    /// Raw text of a single subject column.
    pub fn mark(&self, subject: Subject) -> &str {
        match subject {
            Subject::Math => &self.math,
            Subject::English => &self.english,
            Subject::Science => &self.science,
        }
    }
}

/// Parse a mark written as an optional sign followed by ASCII digits,
/// ignoring surrounding whitespace. There is no upper or lower bound.
pub fn parse_mark(text: &str) -> Option<BigInt> {
    let text = text.trim();
    let digits = text.strip_prefix(&['+', '-'][..]).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// The three graded subjects, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Math,
    English,
    Science,
}

impl Subject {
    pub const ALL: [Subject; 3] = [Subject::Math, Subject::English, Subject::Science];

    /// Short label used for table headers and form fields.
    pub fn short_label(self) -> &'static str {
        match self {
            Subject::Math => "Math",
            Subject::English => "English",
            Subject::Science => "Science",
        }
    }
}

impl fmt::Display for Subject {
    /// Long label shown in the statistics summary.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Subject::Math => "Mathematics",
            Subject::English => "English",
            Subject::Science => "Science",
        };
        f.pad(label)
    }
}

/// Every input field of the add form, in the order the form presents them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Name,
    Mark(Subject),
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Id,
        Field::Name,
        Field::Mark(Subject::Math),
        Field::Mark(Subject::English),
        Field::Mark(Subject::Science),
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Id => "ID",
            Field::Name => "Name",
            Field::Mark(subject) => subject.short_label(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}
