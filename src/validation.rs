//! Turns the five raw strings typed into the add form into a
//! [`StudentRecord`].

use crate::error::ValidationError;
use crate::models::{parse_mark, Field, StudentRecord, Subject};

/// Unvalidated form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordInput {
    pub id: String,
    pub name: String,
    pub math: String,
    pub english: String,
    pub science: String,
}

impl RecordInput {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        math: impl Into<String>,
        english: impl Into<String>,
        science: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            math: math.into(),
            english: english.into(),
            science: science.into(),
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Id => &self.id,
            Field::Name => &self.name,
            Field::Mark(Subject::Math) => &self.math,
            Field::Mark(Subject::English) => &self.english,
            Field::Mark(Subject::Science) => &self.science,
        }
    }

    pub fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Id => &mut self.id,
            Field::Name => &mut self.name,
            Field::Mark(Subject::Math) => &mut self.math,
            Field::Mark(Subject::English) => &mut self.english,
            Field::Mark(Subject::Science) => &mut self.science,
        }
    }

    /// Check presence first, then numeric marks. The first offending field in
    /// form order is reported.
    pub fn validate(&self) -> Result<StudentRecord, ValidationError> {
        if let Some(missing) = Field::ALL
            .into_iter()
            .find(|field| self.value(*field).trim().is_empty())
        {
            return Err(ValidationError::MissingField(missing));
        }

        let parse = |subject: Subject| {
            parse_mark(self.value(Field::Mark(subject)))
                .ok_or(ValidationError::NonNumericMarks(subject))
        };

        Ok(StudentRecord {
            id: self.id.trim().to_string(),
            name: self.name.trim().to_string(),
            math: parse(Subject::Math)?,
            english: parse(Subject::English)?,
            science: parse(Subject::Science)?,
        })
    }
}
