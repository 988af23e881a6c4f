use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Longest accepted product name, counted in characters after trimming
pub const NAME_MAX_LEN: usize = 255;

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier, assigned by the store
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Widget")]
    pub name: String,
    /// Unit price, rounded to 2 decimal places
    #[schema(example = 19.99)]
    pub price: f64,
    /// Units in stock
    #[schema(example = 10)]
    pub quantity: i64,
}

/// DTO for creating a new product
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(custom(function = "validate_name"))]
    #[schema(example = "Widget")]
    pub name: String,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    #[schema(example = 19.99)]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0))]
    #[schema(example = 10)]
    pub quantity: i64,
}

/// DTO for updating an existing product. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[serde(default)]
    #[validate(custom(function = "validate_name"))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub quantity: Option<i64>,
}

/// Inventory value across all products
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BalanceResponse {
    /// Sum of `price * quantity`, rounded to 2 decimal places
    #[schema(example = 199.9)]
    pub total_balance: f64,
}

impl CreateProduct {
    /// Trimmed name and price rounded to cents, as stored.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            price: round_price(self.price),
            quantity: self.quantity,
        }
    }
}

impl UpdateProduct {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.map(|name| name.trim().to_string()),
            price: self.price.map(round_price),
            quantity: self.quantity,
        }
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.quantity.is_none()
    }
}

impl Product {
    pub fn new(id: i64, input: CreateProduct) -> Self {
        Self {
            id,
            name: input.name,
            price: input.price,
            quantity: input.quantity,
        }
    }

    /// Apply the fields present in `update`
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
    }

    /// Stock value of this product (`price * quantity`)
    pub fn value(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// Round a monetary amount to 2 decimal places, ties to even.
///
/// Amounts too large to scale by 100 are already beyond cent precision and
/// are returned unchanged.
pub fn round_price(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round_ties_even() / 100.0
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("blank").with_message("name must not be blank".into()));
    }
    if trimmed.chars().count() > NAME_MAX_LEN {
        return Err(ValidationError::new("length")
            .with_message(format!("name must be at most {} characters", NAME_MAX_LEN).into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, price: f64, quantity: i64) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            price,
            quantity,
        }
    }

    #[test]
    fn test_create_defaults_price_and_quantity_to_zero() {
        let input: CreateProduct = serde_json::from_str(r#"{"name":"Widget"}"#).unwrap();
        assert_eq!(input, create("Widget", 0.0, 0));
    }

    #[test]
    fn test_create_requires_name() {
        assert!(serde_json::from_str::<CreateProduct>(r#"{"price":1.0}"#).is_err());
    }

    #[test]
    fn test_quantity_must_be_an_integer() {
        assert!(serde_json::from_str::<CreateProduct>(r#"{"name":"a","quantity":1.5}"#).is_err());
    }

    #[test]
    fn test_validation_rules() {
        assert!(create("Widget", 19.99, 10).validate().is_ok());
        assert!(create("Widget", 0.0, 0).validate().is_ok());
        assert!(create("", 1.0, 1).validate().is_err());
        assert!(create("   ", 1.0, 1).validate().is_err());
        assert!(create("Widget", -1.0, 1).validate().is_err());
        assert!(create("Widget", 1.0, -1).validate().is_err());
        assert!(create(&"x".repeat(NAME_MAX_LEN), 1.0, 1).validate().is_ok());
        assert!(create(&"x".repeat(NAME_MAX_LEN + 1), 1.0, 1).validate().is_err());
    }

    #[test]
    fn test_update_validates_only_present_fields() {
        assert!(UpdateProduct::default().validate().is_ok());

        let blank = UpdateProduct {
            name: Some(" ".into()),
            ..Default::default()
        };
        let negative = UpdateProduct {
            price: Some(-0.01),
            ..Default::default()
        };
        assert!(blank.validate().is_err());
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_normalized_trims_and_rounds() {
        let input = create("  Widget  ", 19.999, 3).normalized();
        assert_eq!(input, create("Widget", 20.0, 3));

        let update = UpdateProduct {
            name: Some(" Gadget ".into()),
            price: Some(2.346),
            quantity: None,
        }
        .normalized();
        assert_eq!(update.name.as_deref(), Some("Gadget"));
        assert_eq!(update.price, Some(2.35));
    }

    #[test]
    fn test_apply_update_keeps_absent_fields() {
        let mut product = Product::new(1, create("Widget", 19.99, 10));
        product.apply_update(UpdateProduct {
            price: Some(24.99),
            ..Default::default()
        });

        assert_eq!(
            product,
            Product {
                id: 1,
                name: "Widget".into(),
                price: 24.99,
                quantity: 10
            }
        );
    }

    #[test]
    fn test_round_price() {
        assert_eq!(round_price(19.99), 19.99);
        assert_eq!(round_price(0.125), 0.12);
        assert_eq!(round_price(0.375), 0.38);
        assert_eq!(round_price(199.900000001), 199.9);
    }

    #[test]
    fn test_round_price_keeps_huge_amounts() {
        assert_eq!(round_price(1e307), 1e307);
        assert_eq!(round_price(f64::MAX), f64::MAX);
    }
}
