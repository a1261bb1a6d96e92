//! # Error Types
//!
//! Domain-specific error types for inventa-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  inventa-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                        │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  inventa-store errors (separate crate)                                  │
//! │  └── StoreError       - File I/O, decode and commit failures            │
//! │                                                                         │
//! │  HTTP errors (in app)                                                   │
//! │  └── ApiError         - What clients see (serialized)                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → Client     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Classification
//! Every error reduces to one [`ErrorKind`], which the HTTP layer maps to a
//! status code:
//!
//! | Kind              | Status | Examples                                   |
//! |-------------------|--------|--------------------------------------------|
//! | `NotFound`        | 404    | unknown company or product                 |
//! | `Conflict`        | 409    | duplicate tax id, insufficient stock       |
//! | `InvalidArgument` | 400    | quantity ≤ 0, empty purchase, bad dates    |
//! | `Internal`        | 500    | malformed stored record                    |

use thiserror::Error;

// =============================================================================
// Error Kind
// =============================================================================

/// Coarse classification shared by every layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    InvalidArgument,
    Internal,
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent business rule violations detected while planning a
/// mutation or aggregating data. Nothing has been written when one of these
/// is returned.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Company cannot be found.
    ///
    /// ## When This Occurs
    /// - Sale or purchase references an unknown `empresa_id`
    /// - History requested for an unknown company
    /// - Get/update/delete of a missing company
    #[error("Company not found: {0}")]
    CompanyNotFound(i64),

    /// Product cannot be found.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// The company exists but has never bought anything.
    #[error("Company {0} has no sales")]
    NoSalesForCompany(i64),

    /// Another company already uses this tax id.
    #[error("A company with RUT '{0}' already exists")]
    DuplicateTaxId(String),

    /// Insufficient stock to complete the sale.
    ///
    /// ## When This Occurs
    /// - Selling more units than the product has
    /// - A purchase whose lines for one product add up to more than its stock
    ///
    /// ## User Workflow
    /// ```text
    /// POST /ventas/compra  [{producto_id: 1, cantidad: 10}]
    ///      │
    ///      ▼
    /// Check stock: available=5
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: 1, available: 5, requested: 10 }
    ///      │
    ///      ▼
    /// 409, nothing written
    /// ```
    #[error(
        "Insufficient stock for product {product_id}: available {available}, requested {requested}"
    )]
    InsufficientStock {
        product_id: i64,
        available: i64,
        requested: i64,
    },

    /// Purchase request without items.
    #[error("A purchase needs at least one item")]
    EmptyPurchase,

    /// A line total, purchase total or item count does not fit its range.
    ///
    /// ## When This Occurs
    /// - `precio × cantidad` overflows
    /// - The lines of one purchase add up past the range
    #[error("Totals out of range at product {product_id}")]
    AmountOutOfRange { product_id: i64 },

    /// Report range ends before it starts.
    #[error("Invalid date range: {to} is before {from}")]
    InvalidDateRange { from: String, to: String },

    /// A naive timestamp was compared with an offset-aware one.
    #[error("Cannot compare '{left}' with '{right}': only one of them has a UTC offset")]
    IncomparableTimestamps { left: String, right: String },

    /// A stored record does not have the expected shape.
    ///
    /// ## When This Occurs
    /// - A sale's `fecha` cannot be parsed while filtering by date
    /// - Stored totals or quantities overflow when aggregated
    #[error("Malformed {entity} record {id}: {reason}")]
    MalformedRecord {
        entity: &'static str,
        id: i64,
        reason: String,
    },

    /// Uploaded workbook cannot be imported at all.
    ///
    /// ## When This Occurs
    /// - File name does not end in `.xlsx`
    /// - No `productos` sheet
    /// - Missing required header columns
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Classifies the error for status mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::CompanyNotFound(_)
            | CoreError::ProductNotFound(_)
            | CoreError::NoSalesForCompany(_) => ErrorKind::NotFound,
            CoreError::DuplicateTaxId(_) | CoreError::InsufficientStock { .. } => {
                ErrorKind::Conflict
            }
            CoreError::EmptyPurchase
            | CoreError::AmountOutOfRange { .. }
            | CoreError::InvalidDateRange { .. }
            | CoreError::IncomparableTimestamps { .. }
            | CoreError::InvalidUpload(_)
            | CoreError::Validation(_) => ErrorKind::InvalidArgument,
            CoreError::MalformedRecord { .. } => ErrorKind::Internal,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., invalid email, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product_id: 1,
            available: 5,
            requested: 10,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 1: available 5, requested 10"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "nombre".to_string(),
        };
        assert_eq!(err.to_string(), "nombre is required");

        let err = ValidationError::MustNotBeNegative {
            field: "precio".to_string(),
        };
        assert_eq!(err.to_string(), "precio must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "cantidad".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(CoreError::CompanyNotFound(3).kind(), ErrorKind::NotFound);
        assert_eq!(CoreError::NoSalesForCompany(3).kind(), ErrorKind::NotFound);
        assert_eq!(
            CoreError::DuplicateTaxId("1-9".into()).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(CoreError::EmptyPurchase.kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            CoreError::AmountOutOfRange { product_id: 2 }.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            CoreError::MalformedRecord {
                entity: "sale",
                id: 4,
                reason: "bad date".into(),
            }
            .kind(),
            ErrorKind::Internal
        );
    }
}
