use std::fmt::Formatter;

use error_stack::{report, ResultExt};
use serde::Deserialize;
use thiserror::Error;

/// A range reference such as `Sheet1!A:C` or `'Order Log'!A1:D200`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct A1Notation(pub String);

impl std::fmt::Display for A1Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<A1Notation> for String {
    fn from(a1_notation: A1Notation) -> Self {
        a1_notation.0
    }
}

impl From<String> for A1Notation {
    fn from(s: String) -> Self {
        A1Notation(s)
    }
}

impl From<&str> for A1Notation {
    fn from(s: &str) -> Self {
        A1Notation(s.to_owned())
    }
}

impl AsRef<str> for A1Notation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum A1NotationParseError {
    #[error("Range has no sheet title")]
    MissingSheetTitle,
    #[error("Range has no cell reference")]
    MissingCells,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1NotationParts {
    pub start: String,
    pub end: String,
    pub sheet_title: Option<String>,
}

pub fn generic_a1_notation_split(a1_notation: &A1Notation) -> A1NotationParts {
    let (sheet_title, local_a1_notation) = match a1_notation.0.rfind('!') {
        Some(index) => {
            let (sheet_title, local_a1_notation) = a1_notation.0.split_at(index);
            (
                Some(
                    sheet_title
                        .trim_start_matches('\'')
                        .trim_end_matches('\'')
                        .to_owned(),
                ),
                local_a1_notation.trim_start_matches('!').to_owned(),
            )
        }
        None => (None, a1_notation.0.clone()),
    };

    let (start, end) = match local_a1_notation.find(':') {
        Some(index) => {
            let (start, end) = local_a1_notation.split_at(index);
            (start.to_owned(), end.trim_start_matches(':').to_owned())
        }
        None => (local_a1_notation.clone(), local_a1_notation),
    };

    A1NotationParts {
        sheet_title,
        start,
        end,
    }
}

impl A1Notation {
    /// Checks that the range names a sheet tab and at least one cell reference.
    pub fn validate_sheet_range(&self) -> error_stack::Result<A1NotationParts, A1NotationParseError> {
        let parts = generic_a1_notation_split(self);

        if !matches!(parts.sheet_title.as_deref(), Some(title) if !title.is_empty()) {
            return Err(report!(A1NotationParseError::MissingSheetTitle))
                .attach_printable_lazy(|| format!("range: {}", self));
        }
        if parts.start.is_empty() || parts.end.is_empty() {
            return Err(report!(A1NotationParseError::MissingCells))
                .attach_printable_lazy(|| format!("range: {}", self));
        }

        Ok(parts)
    }
}
