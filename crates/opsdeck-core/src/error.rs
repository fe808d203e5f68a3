//! Error types module
//!
//! This module provides the core error types used throughout the opsdeck
//! application. All errors are unified under the `AppError` enum, which
//! covers tenancy violations, persistence failures, validation problems,
//! and plan/billing conditions.
//!
//! Scoping and entitlement deliberately have no error surface: both are
//! total functions over their inputs (a denial from the entitlement gate is
//! a returned value, not an error).

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like persistence failures
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No active tenant: the current identity does not resolve to a company")]
    NoActiveTenant,

    #[error("Tenant reassignment forbidden: a record's company cannot change after creation")]
    TenantReassignmentForbidden,

    #[error("Cross-tenant mutation denied: the record belongs to another company")]
    CrossTenantDenied,

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Unknown plan: {0}")]
    UnknownPlan(String),

    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Machine-readable error code (e.g., "NO_ACTIVE_TENANT")
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NoActiveTenant => "NO_ACTIVE_TENANT",
            AppError::TenantReassignmentForbidden => "TENANT_REASSIGNMENT_FORBIDDEN",
            AppError::CrossTenantDenied => "CROSS_TENANT_DENIED",
            AppError::Persistence(_) => "PERSISTENCE_ERROR",
            AppError::UnknownPlan(_) => "UNKNOWN_PLAN",
            AppError::EmailTaken(_) => "EMAIL_TAKEN",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "INTERNAL_ERROR",
        }
    }

    /// Whether this error is recoverable (the caller may retry the operation).
    ///
    /// Persistence failures leave the entity store unchanged, so a user
    /// retry is always safe for them.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Persistence(_) | AppError::InvalidInput(_) | AppError::EmailTaken(_)
        )
    }

    /// Log level for this error
    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::InvalidInput(_) | AppError::EmailTaken(_) | AppError::NotFound(_) => {
                LogLevel::Debug
            }
            AppError::NoActiveTenant
            | AppError::Persistence(_)
            | AppError::UnknownPlan(_)
            | AppError::Config(_) => LogLevel::Warn,
            AppError::TenantReassignmentForbidden
            | AppError::CrossTenantDenied
            | AppError::Serialization(_)
            | AppError::Internal(_)
            | AppError::InternalWithSource { .. } => LogLevel::Error,
        }
    }

    /// Client-facing message (safe to surface to the actor)
    pub fn client_message(&self) -> String {
        match self {
            AppError::Persistence(_) => {
                "Saving failed. Your changes were not applied - please try again.".to_string()
            }
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        }
    }
}
