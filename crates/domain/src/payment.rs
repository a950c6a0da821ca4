//! Stored payment methods with an exclusive default.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored payment method.
///
/// The card number is held in full but only ever displayed masked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: Uuid,
    pub card_number: String,
    pub cardholder_name: String,
    /// Expiry in `MM/YY` form.
    pub expiry_date: String,
    pub is_default: bool,
}

impl PaymentMethod {
    /// Creates a payment method with a fresh id.
    pub fn new(
        card_number: impl Into<String>,
        cardholder_name: impl Into<String>,
        expiry_date: impl Into<String>,
        is_default: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            card_number: card_number.into(),
            cardholder_name: cardholder_name.into(),
            expiry_date: expiry_date.into(),
            is_default,
        }
    }

    /// Returns the card number masked to its last four digits.
    pub fn masked_card_number(&self) -> String {
        let start = self.card_number.len().saturating_sub(4);
        let last_four = self.card_number.get(start..).unwrap_or("");
        format!("**** **** **** {last_four}")
    }
}

/// Registry of stored payment methods.
///
/// Invariant: at most one method has `is_default == true` at any time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethods {
    methods: Vec<PaymentMethod>,
}

impl PaymentMethods {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a method.
    ///
    /// An incoming default unsets every existing default first. A
    /// non-default incoming method never auto-promotes, even when the
    /// registry has no default yet.
    pub fn add(&mut self, method: PaymentMethod) {
        if method.is_default {
            for existing in &mut self.methods {
                existing.is_default = false;
            }
        }
        self.methods.push(method);
    }

    /// Removes the method at `index`; out-of-range is a no-op.
    pub fn remove(&mut self, index: usize) {
        if index < self.methods.len() {
            self.methods.remove(index);
        }
    }

    /// Makes the method at `index` the sole default; out-of-range is a
    /// no-op.
    pub fn set_default(&mut self, index: usize) {
        if index >= self.methods.len() {
            return;
        }
        for method in &mut self.methods {
            method.is_default = false;
        }
        self.methods[index].is_default = true;
    }

    /// Returns the current default method, if any.
    pub fn default_method(&self) -> Option<&PaymentMethod> {
        self.methods.iter().find(|m| m.is_default)
    }

    /// Returns the method at `index`.
    pub fn get(&self, index: usize) -> Option<&PaymentMethod> {
        self.methods.get(index)
    }

    /// Returns the number of stored methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns true if no methods are stored.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Iterates over the methods in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PaymentMethod> {
        self.methods.iter()
    }
}
