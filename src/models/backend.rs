// src/models/backend.rs

use std::collections::HashSet;

use serde::Serialize;
use validator::{Validate, ValidationError};

use crate::error::AppError;

/// One configured model the player has to recognise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct Backend {
    /// Human-readable name shown to the player. Unique within a roster.
    #[validate(length(min = 1, max = 64))]
    pub label: String,

    /// Opaque identifier handed to the backend client.
    #[validate(length(min = 1, max = 200))]
    pub model_id: String,
}

impl Backend {
    pub fn new(label: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            model_id: model_id.into(),
        }
    }
}

/// The ordered list of backends queried each round.
///
/// Order only matters for the "Available models" listing and the numeric
/// shortcuts players type; answers are presented shuffled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct Roster {
    #[validate(
        length(min = 1, message = "The model roster must not be empty."),
        custom(function = validate_backends)
    )]
    backends: Vec<Backend>,
}

fn validate_backends(backends: &[Backend]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for backend in backends {
        if backend.validate().is_err() {
            return Err(ValidationError::new("invalid_backend_entry"));
        }
        if !seen.insert(backend.label.as_str()) {
            return Err(ValidationError::new("duplicate_backend_label"));
        }
    }
    Ok(())
}

impl Roster {
    /// Builds a roster, rejecting empty lists, bad entries and duplicate labels.
    pub fn new(backends: Vec<Backend>) -> Result<Self, AppError> {
        let roster = Self { backends };
        roster.validate()?;
        Ok(roster)
    }

    /// Parses `label=model_id` pairs separated by commas.
    /// A bare entry without `=` uses the same string for label and model id.
    pub fn parse(spec: &str) -> Result<Self, AppError> {
        let backends = spec
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| match entry.split_once('=') {
                Some((label, model_id)) => Backend::new(label.trim(), model_id.trim()),
                None => Backend::new(entry, entry),
            })
            .collect();

        Self::new(backends)
    }

    pub fn backends(&self) -> &[Backend] {
        &self.backends
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.backends.iter().map(|b| b.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Maps a player's choice onto a roster label.
    ///
    /// * An exact (case-sensitive) label selects that backend.
    /// * Otherwise `"2"` selects the second backend in roster order.
    ///
    /// Labels win over indices, so a roster labelled `"2"` and `"1"` still
    /// resolves `"1"` to the backend labelled `"1"`.
    pub fn resolve(&self, choice: &str) -> Option<&str> {
        let choice = choice.trim();
        if let Some(label) = self.labels().find(|label| *label == choice) {
            return Some(label);
        }
        choice
            .parse::<usize>()
            .ok()
            .and_then(|index| index.checked_sub(1))
            .and_then(|i| self.backends.get(i))
            .map(|b| b.label.as_str())
    }

    /// The numeric shortcuts accepted by `resolve`, e.g. `"1, 2, 3, 4"`.
    pub fn choices_hint(&self) -> String {
        (1..=self.backends.len())
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
