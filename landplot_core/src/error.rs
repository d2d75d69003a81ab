//! Error taxonomy shared by every landplot crate.
//!
//! Four failure classes cross the API boundary: structural validation
//! failures (field-scoped, reported immediately), geometric validity
//! failures (engine diagnostic folded in), unknown-record lookups, and
//! uniform metrics-computation failures. Database errors stay internal.

use thiserror::Error;

/// Errors produced by validation, metrics derivation and record storage.
#[derive(Debug, Error)]
pub enum Error {
	/// Payload shape or range rule violated. Always scoped to the field that
	/// failed, with the violated rule in the message.
	#[error("{field}: {message}")]
	Validation { field: String, message: String },

	/// Structurally sound input that does not form a usable polygon.
	#[error("{0}")]
	Geometry(String),

	/// Operation referenced a record id that does not exist.
	#[error("not found: {0}")]
	NotFound(String),

	/// Unexpected failure inside metrics calculation. Callers never see the
	/// underlying engine error type, only its message.
	#[error("{0}")]
	Computation(String),

	/// Backing-store failure.
	#[error("database error: {0}")]
	Database(String),
}

impl Error {
	pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Validation {
			field: field.into(),
			message: message.into(),
		}
	}

	pub fn geometry(message: impl Into<String>) -> Self {
		Self::Geometry(message.into())
	}

	pub fn not_found(message: impl Into<String>) -> Self {
		Self::NotFound(message.into())
	}

	pub fn computation(message: impl Into<String>) -> Self {
		Self::Computation(message.into())
	}

	pub fn database(error: impl std::fmt::Display) -> Self {
		Self::Database(error.to_string())
	}

	/// The payload field this error is scoped to, if any. Geometry failures
	/// always concern the submitted ring.
	pub fn field(&self) -> Option<&str> {
		match self {
			Self::Validation { field, .. } => Some(field),
			Self::Geometry(_) => Some("coordinates"),
			_ => None,
		}
	}

	/// The message without the field prefix.
	pub fn message(&self) -> String {
		match self {
			Self::Validation { message, .. } => message.clone(),
			Self::Geometry(msg) | Self::Computation(msg) | Self::Database(msg) => msg.clone(),
			Self::NotFound(msg) => msg.clone(),
		}
	}
}

pub type Result<T> = std::result::Result<T, Error>;
