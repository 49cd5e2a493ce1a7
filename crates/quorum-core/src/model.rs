//! Relationship records and entity identifiers.
//!
//! A [`Relationship`] is a directed, labeled edge: `source` acts on `target`
//! (for example "A controls B"). The `kind` label is carried for presentation
//! only and never influences ranking.
//!
//! Untrusted input arrives as [`RelationshipRecord`], whose fields are all
//! optional so that a missing field surfaces as a typed
//! [`AnalysisError::DataFormat`] instead of a serde failure.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, RecordField};

// ---------------------------------------------------------------------------
// EntityId
// ---------------------------------------------------------------------------

/// Identifier of a node in the relationship graph.
///
/// Always non-empty. Ordering is lexicographic and is used to give every
/// graph a canonical node order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Build an identifier, returning `None` for an empty or blank string.
    ///
    /// Surrounding whitespace is trimmed.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Relationship
// ---------------------------------------------------------------------------

/// A validated directed relationship `source → target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    pub source: EntityId,
    pub target: EntityId,
    /// Informational label (e.g. "control", "oversight").
    #[serde(default)]
    pub kind: String,
}

impl Relationship {
    /// Build a relationship from string parts.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::DataFormat`] (with index 0) when `source` or
    /// `target` is empty.
    pub fn new(source: &str, target: &str, kind: impl Into<String>) -> Result<Self, AnalysisError> {
        RelationshipRecord {
            source: Some(source.to_string()),
            target: Some(target.to_string()),
            kind: Some(kind.into()),
        }
        .validate(0)
    }

    /// Return `true` when the relationship points from an entity to itself.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Raw, unvalidated shape of a relationship as it arrives from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipRecord {
    #[serde(default, alias = "Source")]
    pub source: Option<String>,
    #[serde(default, alias = "Target")]
    pub target: Option<String>,
    #[serde(default, alias = "Type", alias = "type")]
    pub kind: Option<String>,
}

impl RelationshipRecord {
    /// Shape-check this record.
    ///
    /// `index` is the record's position in its input sequence and is echoed
    /// back in the error.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::DataFormat`] when `source` or `target` is
    /// missing or blank.
    pub fn validate(&self, index: usize) -> Result<Relationship, AnalysisError> {
        let source = self
            .source
            .as_deref()
            .and_then(EntityId::parse)
            .ok_or(AnalysisError::DataFormat {
                index,
                field: RecordField::Source,
            })?;
        let target = self
            .target
            .as_deref()
            .and_then(EntityId::parse)
            .ok_or(AnalysisError::DataFormat {
                index,
                field: RecordField::Target,
            })?;

        Ok(Relationship {
            source,
            target,
            kind: self.kind.clone().unwrap_or_default(),
        })
    }
}

/// Validate a whole sequence of records, failing on the first malformed one.
///
/// # Errors
///
/// Returns the [`AnalysisError::DataFormat`] of the first malformed record.
pub fn validate_records(records: &[RelationshipRecord]) -> Result<Vec<Relationship>, AnalysisError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| record.validate(index))
        .collect()
}
