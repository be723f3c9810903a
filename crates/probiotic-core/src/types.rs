//! # Domain Types
//!
//! Product boundary types and the tax rate.
//!
//! ## Two Product Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ProductRecord (what pages hand over)     ProductSummary (what the      │
//! │  ─────────────────────────────────────    cart accepts)                 │
//! │  id?        "gut-balance-pro" | 7         ─────────────────────         │
//! │  name?      "Gut Balance Pro"             id        String (trimmed)    │
//! │  price?     29.99 | "29.99"      ──────►  name      String (trimmed)    │
//! │  image?     "/img/gbp.png"      try_from  price     Money (cents)       │
//! │  category?  "digestive"                   image     String              │
//! │  inStock?   false → rejected              category  String              │
//! │  rating, badge, reviews, ... (kept aside, never read)                   │
//! │                                                                         │
//! │  Loose: any page, the wishlist API and the recommendations API all      │
//! │  produce slightly different objects. The cart only ever sees the        │
//! │  right-hand side.                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use ts_rs::TS;

use crate::error::{CoreError, ValidationError};
use crate::money::Money;
use crate::validation::{validate_product_id, validate_product_name};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 800 bps = 8%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for config convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Product Record
// =============================================================================

/// A product object exactly as a page component or the backend supplies it.
///
/// Every field is optional and unknown fields are kept aside, so that any
/// catalog, wishlist or recommendation payload deserializes. Nothing here is
/// trusted; convert with [`ProductSummary::try_from`] before it reaches the
/// cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// String ids in the catalog, numeric ids on some promo pages.
    #[serde(default)]
    pub id: Option<Value>,

    #[serde(default)]
    pub name: Option<String>,

    /// Major units. Numbers and numeric strings are both accepted.
    #[serde(default)]
    pub price: Option<Value>,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    /// Only an explicit `false` blocks the add; any other value is ignored.
    #[serde(default)]
    pub in_stock: Option<Value>,

    /// Everything else (rating, badge, description, reviews, ...), whatever
    /// its type. Ignored by the cart.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProductRecord {
    /// Best-effort id for error messages, before validation.
    fn display_id(&self) -> String {
        match &self.id {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => "<missing>".to_string(),
        }
    }

    fn normalized_id(&self) -> Result<String, ValidationError> {
        let id = match &self.id {
            None | Some(Value::Null) => {
                return Err(ValidationError::Required {
                    field: "id".to_string(),
                })
            }
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => {
                return Err(ValidationError::InvalidFormat {
                    field: "id".to_string(),
                    reason: format!("expected string or number, got {}", json_kind(other)),
                })
            }
        };
        validate_product_id(&id)?;
        Ok(id)
    }

    fn normalized_price(&self) -> Result<Money, ValidationError> {
        let major = match &self.price {
            None | Some(Value::Null) => {
                return Err(ValidationError::Required {
                    field: "price".to_string(),
                })
            }
            Some(Value::Number(n)) => n.as_f64().ok_or_else(|| ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: "not representable as a number".to_string(),
            })?,
            Some(Value::String(s)) => {
                s.trim()
                    .parse::<f64>()
                    .map_err(|_| ValidationError::InvalidFormat {
                        field: "price".to_string(),
                        reason: format!("'{}' is not a number", s),
                    })?
            }
            Some(other) => {
                return Err(ValidationError::InvalidFormat {
                    field: "price".to_string(),
                    reason: format!("expected number, got {}", json_kind(other)),
                })
            }
        };
        Money::try_from_major(major)
    }

    fn is_out_of_stock(&self) -> bool {
        matches!(self.in_stock, Some(Value::Bool(false)))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Product Summary
// =============================================================================

/// The canonical product accepted by `ADD_TO_CART`.
///
/// Fields are copied into the cart line at add time and never re-fetched.
///
/// On the wire it has the catalog shape: it deserializes through
/// [`ProductRecord`] and the rules below, and its price is written in major
/// units so a serialized action reads back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", try_from = "ProductRecord")]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    #[serde(serialize_with = "serialize_major")]
    #[ts(type = "number")]
    pub price: Money,
    pub image: String,
    pub category: String,
}

impl ProductSummary {
    /// Builds a summary from already-trusted values (catalog code, tests).
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        image: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        ProductSummary {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
            category: category.into(),
        }
    }
}

fn serialize_major<S: Serializer>(price: &Money, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(price.to_major())
}

/// Validates and normalizes a loose product payload.
///
/// ## Rules
/// - `id`: required; strings are trimmed, numbers are stringified
/// - `name`: required, trimmed
/// - `price`: required, finite, non-negative; rounded to cents
/// - `inStock: false`: rejected as out of stock
/// - `image`, `category`: missing values become empty strings
impl TryFrom<ProductRecord> for ProductSummary {
    type Error = CoreError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let invalid = |source: ValidationError| CoreError::InvalidProduct {
            product_id: record.display_id(),
            source,
        };

        let id = record.normalized_id().map_err(invalid)?;

        if record.is_out_of_stock() {
            return Err(CoreError::OutOfStock { product_id: id });
        }

        let name = record.name.as_deref().unwrap_or_default().trim().to_string();
        validate_product_name(&name).map_err(invalid)?;

        let price = record.normalized_price().map_err(invalid)?;

        Ok(ProductSummary {
            id,
            name,
            price,
            image: record.image.clone().unwrap_or_default(),
            category: record.category.clone().unwrap_or_default(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> ProductRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(800);
        assert_eq!(rate.bps(), 800);
        assert!((rate.percentage() - 8.0).abs() < 0.001);
        assert_eq!(TaxRate::from_percentage(8.25).bps(), 825);
        assert_eq!(TaxRate::default(), TaxRate::zero());
    }

    #[test]
    fn test_full_catalog_record_converts() {
        let rec = record(json!({
            "id": "gut-balance-pro",
            "name": "Gut Balance Pro",
            "price": 29.99,
            "originalPrice": 39.99,
            "image": "/img/gbp.png",
            "category": "digestive",
            "description": "50 billion CFU",
            "rating": 4.8,
            "reviews": 1247,
            "badge": "Best Seller",
            "inStock": true
        }));
        assert_eq!(rec.in_stock, Some(Value::Bool(true)));
        assert!(rec.extra.contains_key("reviews"));
        assert!(rec.extra.contains_key("originalPrice"));

        let summary = ProductSummary::try_from(rec).unwrap();
        assert_eq!(
            summary,
            ProductSummary::new(
                "gut-balance-pro",
                "Gut Balance Pro",
                Money::from_cents(2999),
                "/img/gbp.png",
                "digestive"
            )
        );
    }

    #[test]
    fn test_numeric_id_and_string_price_are_normalized() {
        let summary = ProductSummary::try_from(record(json!({
            "id": 7,
            "name": "  Immune Support  ",
            "price": "19.50"
        })))
        .unwrap();

        assert_eq!(summary.id, "7");
        assert_eq!(summary.name, "Immune Support");
        assert_eq!(summary.price.cents(), 1950);
        assert_eq!(summary.image, "");
        assert_eq!(summary.category, "");
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let err = ProductSummary::try_from(record(json!({"name": "A", "price": 10}))).unwrap_err();
        match err {
            CoreError::InvalidProduct { product_id, source } => {
                assert_eq!(product_id, "<missing>");
                assert_eq!(source.field(), "id");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_or_bad_price_is_rejected() {
        let missing = ProductSummary::try_from(record(json!({"id": "p1", "name": "A"})));
        assert!(matches!(
            missing,
            Err(CoreError::InvalidProduct { source: ValidationError::Required { .. }, .. })
        ));

        let negative = ProductSummary::try_from(record(json!({"id": "p1", "name": "A", "price": -3})));
        assert!(matches!(
            negative,
            Err(CoreError::InvalidProduct { source: ValidationError::OutOfRange { .. }, .. })
        ));

        let text = ProductSummary::try_from(record(json!({"id": "p1", "name": "A", "price": "free"})));
        assert!(matches!(
            text,
            Err(CoreError::InvalidProduct { source: ValidationError::InvalidFormat { .. }, .. })
        ));

        let boolean = ProductSummary::try_from(record(json!({"id": "p1", "name": "A", "price": true})));
        assert!(boolean.is_err());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let err = ProductSummary::try_from(record(json!({"id": "p1", "name": "   ", "price": 1})))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid product p1: name is required");
    }

    #[test]
    fn test_object_id_is_rejected() {
        let err = ProductSummary::try_from(record(json!({"id": {"x": 1}, "name": "A", "price": 1})))
            .unwrap_err();
        assert!(err.to_string().contains("expected string or number, got object"));
    }

    #[test]
    fn test_ignored_fields_of_any_type_are_accepted() {
        let rec = record(json!({
            "id": "p1",
            "name": "Kids Chewable",
            "price": 12,
            "rating": "4.5",
            "badge": 5,
            "description": ["two", "lines"],
            "originalPrice": "n/a"
        }));
        assert_eq!(rec.extra.get("rating"), Some(&json!("4.5")));
        assert_eq!(rec.extra.get("badge"), Some(&json!(5)));

        let summary = ProductSummary::try_from(rec).unwrap();
        assert_eq!(summary.price, Money::from_cents(1200));
    }

    #[test]
    fn test_out_of_stock_is_rejected() {
        let err = ProductSummary::try_from(record(json!({
            "id": "p3",
            "name": "Sold Out Flora",
            "price": 20,
            "inStock": false
        })))
        .unwrap_err();
        assert!(matches!(err, CoreError::OutOfStock { ref product_id } if product_id == "p3"));
        assert_eq!(err.to_string(), "Product p3 is out of stock");

        // only an explicit false counts
        for in_stock in [json!(true), json!("no"), json!(null)] {
            let rec = record(json!({"id": "p3", "name": "A", "price": 1, "inStock": in_stock}));
            assert!(ProductSummary::try_from(rec).is_ok());
        }
    }

    #[test]
    fn test_deserializing_a_summary_applies_the_rules() {
        let summary: ProductSummary =
            serde_json::from_value(json!({"id": " p1 ", "name": "A", "price": 29.99})).unwrap();
        assert_eq!(summary.id, "p1");
        assert_eq!(summary.price.cents(), 2999);

        assert!(serde_json::from_value::<ProductSummary>(json!({"id": "", "name": "A", "price": 1})).is_err());
        assert!(serde_json::from_value::<ProductSummary>(json!({"id": "p1", "name": "A", "price": -5})).is_err());
        assert!(serde_json::from_value::<ProductSummary>(json!({"id": "p1", "name": "", "price": 1})).is_err());
    }

    #[test]
    fn test_summary_serializes_price_in_major_units() {
        let summary = ProductSummary::new("p1", "A", Money::from_cents(2999), "", "");
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["price"], json!(29.99));

        let back: ProductSummary = serde_json::from_value(json).unwrap();
        assert_eq!(back, summary);
    }
}
