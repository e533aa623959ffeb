//! Centralized error types for the scheduler.
//!
//! This module provides a typed error hierarchy that:
//! - Separates recoverable validation failures from storage failures
//! - Provides user-friendly messages suitable for UI display
//! - Preserves full error context for debugging/logging
//!
//! Nothing in here is fatal: every variant is either recovered locally or
//! surfaced to the user as a non-blocking notice.

use thiserror::Error;

/// Top-level application error type.
///
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Another import/export is still pending against the event store.
    #[error("Operation refused: {0} in progress")]
    Busy(&'static str),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Validation(e) => e.user_message(),
            AppError::Storage(e) => e.user_message(),
            AppError::Import(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Busy(_) => "Please wait for the current import or export to finish.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }

    /// True for errors that leave the event store untouched by construction.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_) | AppError::Import(ImportError::Validation(_))
        )
    }
}

/// Rejected input: form submissions, date arithmetic arguments, import payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Event title is required")]
    MissingTitle,

    #[error("Event date is required")]
    MissingDate,

    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Month index out of range (expected 0-11): {0}")]
    InvalidMonth(u32),

    #[error("Event id is required")]
    MissingId,

    #[error("Duplicate event id: {0}")]
    DuplicateId(String),

    #[error("Expected a list of events")]
    NotAList,

    #[error("Malformed event record: {0}")]
    MalformedRecord(String),
}

impl ValidationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::MissingTitle => "Please enter a title for the event.",
            ValidationError::MissingDate => "Please pick a date for the event.",
            ValidationError::InvalidDate(_) => "The date must look like 2024-05-01.",
            ValidationError::InvalidMonth(_) => "That month does not exist.",
            ValidationError::MissingId | ValidationError::DuplicateId(_) => {
                "The imported file contains invalid event ids."
            }
            ValidationError::NotAList => "Invalid file format: expected a list of events.",
            ValidationError::MalformedRecord(_) => {
                "The imported file contains an event that could not be read."
            }
        }
    }
}

/// Durable storage errors (local event file, export target).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read storage: {0}")]
    Read(String),

    #[error("Failed to write storage: {0}")]
    Write(String),

    #[error("Failed to serialize events: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Stored data is corrupt: {0}")]
    Corrupt(String),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::Read(_) => "Saved events could not be read. Starting empty.",
            StorageError::Write(_) => "Your changes could not be saved. They are kept until you close the app.",
            StorageError::Serialize(_) => "Your events could not be saved. Please try again.",
            StorageError::Corrupt(_) => "Saved events were unreadable and have been ignored.",
        }
    }
}

/// Errors from reading and validating a user-supplied import file.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read import file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Import file is not valid JSON: {0}")]
    Parse(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ImportError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ImportError::FileRead(_) => "The selected file could not be read.",
            ImportError::Parse(_) => "Invalid file format: the file is not valid JSON.",
            ImportError::Validation(e) => e.user_message(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}
