//! Error types for note and notifier validation.
//!
//! Every fallible operation in the notification widget reports a single
//! error kind, [`NotifyError::InvalidOptions`], which carries the complete
//! list of constraints the input violated.

use std::fmt;

use thiserror::Error;

// ============================================================================
// Violations
// ============================================================================

/// A single constraint violated by note or notifier options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// No options were supplied at all.
    MissingOptions,
    /// The note has no kind.
    MissingKind,
    /// The kind name is not one of success, info, warning or danger.
    UnknownKind(String),
    /// The note was never assigned an id.
    MissingId,
    /// Neither a caption nor a message was supplied.
    MissingContent,
    /// A fade-out was requested without a delay.
    MissingFadeoutDelay,
    /// The corner name is not one of the four supported corners.
    UnknownCorner(String),
    /// A padding is negative. Carries the option name and its value.
    NegativePadding { name: &'static str, value: i32 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingOptions => write!(f, "options are missing"),
            Self::MissingKind => write!(f, "note kind is missing"),
            Self::UnknownKind(name) => write!(f, "unknown note kind '{name}'"),
            Self::MissingId => write!(f, "note id is missing"),
            Self::MissingContent => write!(f, "either a caption or a message is required"),
            Self::MissingFadeoutDelay => write!(f, "fade-out delay is missing"),
            Self::UnknownCorner(name) => write!(f, "unknown corner '{name}'"),
            Self::NegativePadding { name, value } => {
                write!(f, "{name} must not be negative, got {value}")
            }
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Error returned by note creation and notifier construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    /// The supplied options violate one or more constraints.
    #[error("invalid options: {}", join(.violations))]
    InvalidOptions {
        /// Every violated constraint, in the order they were checked.
        violations: Vec<Violation>,
    },
}

impl NotifyError {
    /// Creates an error for a single violation.
    #[must_use]
    pub fn invalid(violation: Violation) -> Self {
        Self::InvalidOptions {
            violations: vec![violation],
        }
    }

    /// Returns the violated constraints.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::InvalidOptions { violations } => violations,
        }
    }

    /// Returns `true` if the error lists the given violation.
    #[must_use]
    pub fn contains(&self, violation: &Violation) -> bool {
        self.violations().contains(violation)
    }
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// ============================================================================
// Tests
// ============================================================================
