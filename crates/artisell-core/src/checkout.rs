//! # Checkout Form Validation
//!
//! Validates the checkout submission before the Order Writer runs.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (Rust)                                           │
//! │  ├── Every required field checked, ALL violations collected            │
//! │  └── Payment method restricted to the allowed set                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints (order_number, users.email)                    │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors are collected per-field (not fail-fast) so the checkout page can
//! re-render every invalid input with its own inline message in one pass.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::PaymentMethod;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, Vec<ValidationError>>;

// =============================================================================
// Checkout Form
// =============================================================================

/// The checkout submission: shipping details, payment method, and optional
/// order notes. Field names mirror the form inputs so per-field errors map
/// straight back to the UI.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    /// Wire value: one of `credit_card`, `gcash`, `bank_transfer`, `cod`.
    pub payment_method: String,
    /// Optional order notes (delivery instructions etc.).
    pub notes: Option<String>,
}

impl CheckoutForm {
    /// Validates the form, collecting every violation.
    ///
    /// ## Rules
    /// - fullName, email, phone, address, city, region, postalCode must be
    ///   non-empty after trimming
    /// - paymentMethod must parse to one of the accepted methods
    ///
    /// ## Returns
    /// The parsed [`PaymentMethod`] on success, or the complete list of
    /// per-field errors (never a partial report).
    ///
    /// ## Example
    /// ```rust
    /// use artisell_core::checkout::CheckoutForm;
    ///
    /// let form = CheckoutForm {
    ///     payment_method: "gcash".to_string(),
    ///     ..Default::default()
    /// };
    ///
    /// // Every empty required field is reported, in form order
    /// let errors = form.validate().unwrap_err();
    /// assert_eq!(errors.len(), 7);
    /// ```
    pub fn validate(&self) -> ValidationResult<PaymentMethod> {
        let mut errors = Vec::new();

        // Required text fields, in the order they appear on the form
        let required: [(&str, &str); 7] = [
            ("fullName", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
            ("region", &self.region),
            ("postalCode", &self.postal_code),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                errors.push(ValidationError::Required {
                    field: field.to_string(),
                });
            }
        }

        let method = if self.payment_method.trim().is_empty() {
            errors.push(ValidationError::Required {
                field: "paymentMethod".to_string(),
            });
            None
        } else {
            match PaymentMethod::parse(self.payment_method.trim()) {
                Some(m) => Some(m),
                None => {
                    errors.push(ValidationError::NotAllowed {
                        field: "paymentMethod".to_string(),
                        allowed: PaymentMethod::ALL
                            .iter()
                            .map(|m| m.as_str().to_string())
                            .collect(),
                    });
                    None
                }
            }
        };

        match (errors.is_empty(), method) {
            (true, Some(m)) => Ok(m),
            _ => Err(errors),
        }
    }

    /// The notes field normalized: trimmed, `None` if blank.
    pub fn normalized_notes(&self) -> Option<String> {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            full_name: "Juan Dela Cruz".to_string(),
            email: "juan@example.com".to_string(),
            phone: "+63 912 345 6789".to_string(),
            address: "123 Filipino Art Street".to_string(),
            city: "Makati City".to_string(),
            region: "Metro Manila".to_string(),
            postal_code: "1200".to_string(),
            payment_method: "gcash".to_string(),
            notes: None,
        }
    }

    #[test]
    fn test_valid_form_passes() {
        let method = valid_form().validate().unwrap();
        assert_eq!(method, PaymentMethod::Gcash);
    }

    #[test]
    fn test_missing_field_reported_by_name() {
        let mut form = valid_form();
        form.phone = "   ".to_string();

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field(), "phone");
    }

    #[test]
    fn test_all_violations_collected() {
        let mut form = valid_form();
        form.full_name = String::new();
        form.city = String::new();
        form.payment_method = String::new();

        let errors = form.validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["fullName", "city", "paymentMethod"]);
    }

    #[test]
    fn test_invalid_payment_method_rejected() {
        let mut form = valid_form();
        form.payment_method = "invalid_method".to_string();

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field(), "paymentMethod");
        assert!(matches!(errors[0], ValidationError::NotAllowed { .. }));
    }

    #[test]
    fn test_all_payment_methods_accepted() {
        for wire in ["credit_card", "gcash", "bank_transfer", "cod"] {
            let mut form = valid_form();
            form.payment_method = wire.to_string();
            assert!(form.validate().is_ok(), "{wire} should be accepted");
        }
    }

    #[test]
    fn test_normalized_notes() {
        let mut form = valid_form();
        assert_eq!(form.normalized_notes(), None);

        form.notes = Some("   ".to_string());
        assert_eq!(form.normalized_notes(), None);

        form.notes = Some("  leave at the gate  ".to_string());
        assert_eq!(form.normalized_notes(), Some("leave at the gate".to_string()));
    }
}
