//! # Validation Module
//!
//! Input validation utilities for Inventa.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler (apps/api)                                       │
//! │  ├── Type validation (serde deserialization)                            │
//! │  └── THIS MODULE: input.validate() before touching the store            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Planning (sales, import)                                      │
//! │  ├── Quantities > 0                                                     │
//! │  └── Existence and stock checks against the loaded snapshot             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Repository                                                    │
//! │  └── Tax id uniqueness on create                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use inventa_core::validation::{validate_name, validate_quantity};
//!
//! validate_name("nombre", "Ferretería Sur").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CompanyInput, ProductInput};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted name or category.
pub const MAX_NAME_LEN: usize = 200;

/// Longest accepted tax id.
pub const MAX_TAX_ID_LEN: usize = 20;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (company name, product name, category).
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use inventa_core::validation::validate_name;
///
/// assert!(validate_name("nombre", "Martillo").is_ok());
/// assert!(validate_name("nombre", "   ").is_err());
/// ```
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a tax id (RUT).
///
/// Only presence and length are enforced; the check digit is left to the
/// client because many existing records were entered without one.
pub fn validate_tax_id(tax_id: &str) -> ValidationResult<()> {
    let tax_id = tax_id.trim();

    if tax_id.is_empty() {
        return Err(ValidationError::Required {
            field: "rut".to_string(),
        });
    }

    if tax_id.chars().count() > MAX_TAX_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "rut".to_string(),
            max: MAX_TAX_ID_LEN,
        });
    }

    Ok(())
}

/// Validates an email address shape: `local@domain.tld`, no whitespace.
///
/// ## Example
/// ```rust
/// use inventa_core::validation::validate_email;
///
/// assert!(validate_email("ventas@ferreteria.cl").is_ok());
/// assert!(validate_email("ventas@ferreteria").is_err());
/// assert!(validate_email("ventas ferreteria.cl").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("missing '@'"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must look like name@domain.tld"));
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid("must look like name@domain.tld")),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale or purchase quantity.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "cantidad".to_string(),
        });
    }

    Ok(())
}

/// Validates a price or cost. Zero is allowed.
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a stock level. Zero is allowed.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Input Validation
// =============================================================================

impl CompanyInput {
    /// Validates the payload before it reaches the repository.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name("nombre", &self.name)?;
        validate_tax_id(&self.tax_id)?;
        if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            validate_email(email)?;
        }
        Ok(())
    }
}

impl ProductInput {
    /// Validates the payload before it reaches the repository.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name("nombre", &self.name)?;
        validate_name("categoria", &self.category)?;
        validate_amount("precio", self.price)?;
        validate_amount("costo", self.cost)?;
        validate_stock(self.stock)?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product_input() -> ProductInput {
        ProductInput {
            name: "Martillo".to_string(),
            price: Money::from_cents(1000),
            stock: 5,
            cost: Money::from_cents(600),
            category: "Herramientas".to_string(),
        }
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("nombre", "Martillo").is_ok());
        assert!(validate_name("nombre", "").is_err());
        assert!(validate_name("nombre", "   ").is_err());
        assert!(validate_name("nombre", &"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_tax_id() {
        assert!(validate_tax_id("76.123.456-7").is_ok());
        assert!(validate_tax_id(" ").is_err());
        assert!(validate_tax_id(&"9".repeat(30)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.cl").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("@b.cl").is_err());
        assert!(validate_email("a@@b.cl").is_err());
        assert!(validate_email("a@.cl").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn test_product_input_rules() {
        assert!(product_input().validate().is_ok());

        let mut free = product_input();
        free.price = Money::zero();
        assert!(free.validate().is_ok());

        let mut negative = product_input();
        negative.cost = Money::from_cents(-1);
        assert_eq!(
            negative.validate().unwrap_err(),
            ValidationError::MustNotBeNegative {
                field: "costo".to_string()
            }
        );

        let mut no_stock = product_input();
        no_stock.stock = -1;
        assert!(no_stock.validate().is_err());

        let mut unnamed = product_input();
        unnamed.category = " ".to_string();
        assert!(unnamed.validate().is_err());
    }

    #[test]
    fn test_company_input_rules() {
        let mut input = CompanyInput {
            name: "Acme".to_string(),
            tax_id: "1-9".to_string(),
            sector: None,
            phone: None,
            email: Some(String::new()),
            address: None,
        };
        assert!(input.validate().is_ok());

        input.email = Some("no-es-email".to_string());
        assert!(input.validate().is_err());

        input.email = None;
        input.tax_id = String::new();
        assert!(input.validate().is_err());
    }
}
