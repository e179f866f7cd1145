//! Product, variant and snapshot types shared by the client, monitor and notifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Count the remote service reports when a size has this many units or more.
pub const STOCK_CAP: u32 = 15;

/// Externally supplied product identifier (the storefront SKU).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stock level of a single size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantAvailability {
    pub size: String,
    pub availability: u32,
}

impl VariantAvailability {
    pub fn new<S: Into<String>>(size: S, availability: u32) -> Self {
        Self {
            size: size.into(),
            availability,
        }
    }

    pub fn is_in_stock(&self) -> bool {
        self.availability > 0
    }

    /// Stock string shown to users ("15+" at the cap, exact count otherwise)
    pub fn stock_display(&self) -> String {
        format_stock(self.availability)
    }
}

/// Render a stock count, treating [`STOCK_CAP`] as "at least".
pub fn format_stock(count: u32) -> String {
    if count == STOCK_CAP {
        format!("{}+", STOCK_CAP)
    } else {
        count.to_string()
    }
}

/// All variants of a product as returned by one poll.
///
/// Equality compares the raw sequence, so the same sizes in a different
/// order count as a change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantSnapshot(Vec<VariantAvailability>);

impl VariantSnapshot {
    pub fn new(variants: Vec<VariantAvailability>) -> Self {
        Self(variants)
    }

    pub fn variants(&self) -> &[VariantAvailability] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Variants with a positive count, in snapshot order
    pub fn in_stock(&self) -> Vec<VariantAvailability> {
        self.0.iter().filter(|v| v.is_in_stock()).cloned().collect()
    }
}

impl From<Vec<VariantAvailability>> for VariantSnapshot {
    fn from(variants: Vec<VariantAvailability>) -> Self {
        Self(variants)
    }
}

/// Descriptive product data used when rendering notifications
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMetadata {
    pub title: String,
    pub image_url: Option<String>,
    pub price: String,
    pub color: String,
}
