use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use catalog_core::SellerId;
use catalog_infra::ProductRecord;
use catalog_products::{
    Dimensions, ListingType, Product, ProductBuilder, ProductCondition, ProductStatus,
};

pub const MAX_TITLE_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 2000;
pub const MAX_PRICE_INTEGER_DIGITS: u32 = 10;
pub const MAX_PRICE_FRACTION_DIGITS: u32 = 2;
pub const SUPPORTED_CURRENCIES: [&str; 8] = ["ARS", "USD", "BRL", "MXN", "COP", "CLP", "UYU", "PEN"];

// -------------------------
// Request DTOs
// -------------------------

/// Create/update payload for a product.
///
/// Everything is optional at the wire level so that [`ProductRequest::validate`]
/// can report every missing field at once instead of failing on the first one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub currency: Option<String>,
    pub available_quantity: Option<i64>,
    pub status: Option<ProductStatus>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub seller_id: Option<SellerId>,
    pub seller_name: Option<String>,
    pub listing_type: Option<ListingType>,
    pub free_shipping: Option<bool>,
    pub shipping_cost: Option<Decimal>,
    pub weight: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub length: Option<f64>,
    pub images: Vec<String>,
    pub attributes: Vec<String>,
    pub condition: Option<ProductCondition>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub tags: Vec<String>,
    pub warranty: Option<String>,
    pub return_policy: Option<String>,
}

/// One rejected request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
    pub rejected_value: Option<String>,
}

impl FieldViolation {
    fn new(field: &str, message: impl Into<String>, rejected_value: Option<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
            rejected_value,
        }
    }
}

impl core::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ProductRequest {
    /// Every violated rule, in field order. Empty means the request is acceptable.
    pub fn validate(&self) -> Vec<FieldViolation> {
        let mut out = Vec::new();

        check_text(&mut out, "title", self.title.as_deref(), Some(MAX_TITLE_CHARS));
        check_text(
            &mut out,
            "description",
            self.description.as_deref(),
            Some(MAX_DESCRIPTION_CHARS),
        );
        check_price(&mut out, self.price);

        match self.currency.as_deref() {
            None => out.push(FieldViolation::new("currency", "Currency is required", None)),
            Some(c) if !SUPPORTED_CURRENCIES.contains(&c) => out.push(FieldViolation::new(
                "currency",
                format!("Currency must be one of {}", SUPPORTED_CURRENCIES.join(", ")),
                Some(c.to_string()),
            )),
            Some(_) => {}
        }

        match self.available_quantity {
            None => out.push(FieldViolation::new(
                "available_quantity",
                "Available quantity is required",
                None,
            )),
            Some(q) if q < 0 => out.push(FieldViolation::new(
                "available_quantity",
                "Available quantity must not be negative",
                Some(q.to_string()),
            )),
            Some(q) if q > i64::from(u32::MAX) => out.push(FieldViolation::new(
                "available_quantity",
                format!("Available quantity must be at most {}", u32::MAX),
                Some(q.to_string()),
            )),
            Some(_) => {}
        }

        if self.status.is_none() {
            out.push(FieldViolation::new("status", "Status is required", None));
        }

        check_text(&mut out, "category", self.category.as_deref(), None);
        check_text(&mut out, "subcategory", self.subcategory.as_deref(), None);

        if self.seller_id.is_none() {
            out.push(FieldViolation::new("seller_id", "Seller ID is required", None));
        }
        check_text(&mut out, "seller_name", self.seller_name.as_deref(), None);

        if self.free_shipping.is_none() {
            out.push(FieldViolation::new(
                "free_shipping",
                "Free shipping flag is required",
                None,
            ));
        }

        if let Some(cost) = self.shipping_cost {
            if cost < Decimal::ZERO {
                out.push(FieldViolation::new(
                    "shipping_cost",
                    "Shipping cost must not be negative",
                    Some(cost.to_string()),
                ));
            }
        }

        for (field, value) in [
            ("weight", self.weight),
            ("width", self.width),
            ("height", self.height),
            ("length", self.length),
        ] {
            if let Some(v) = value {
                if v.is_nan() || v < 0.0 {
                    out.push(FieldViolation::new(
                        field,
                        format!("{} must not be negative", capitalize(field)),
                        Some(v.to_string()),
                    ));
                }
            }
        }

        out
    }

    /// Copy every request-owned field onto `builder`.
    ///
    /// Fields the request does not own (id, counters, rating, timestamps) keep
    /// whatever value the builder already carries.
    pub fn apply_to(self, builder: ProductBuilder) -> ProductBuilder {
        builder
            .basic_info(
                self.title.unwrap_or_default(),
                self.description,
                self.price.unwrap_or(Decimal::ZERO),
                self.currency,
            )
            .stock(self.available_quantity.unwrap_or(0))
            .status(self.status)
            .categorization(self.category, self.subcategory)
            .seller(self.seller_id, self.seller_name)
            .listing(self.listing_type, self.free_shipping)
            .shipping(self.shipping_cost)
            .dimensions(Dimensions::new(self.weight, self.width, self.height, self.length))
            .media(self.images, self.attributes)
            .condition(self.condition)
            .identification(self.sku, self.barcode, self.brand, self.model)
            .policies(self.warranty, self.return_policy, self.tags)
    }
}

fn check_text(out: &mut Vec<FieldViolation>, field: &str, value: Option<&str>, max_chars: Option<usize>) {
    let label = capitalize(field);
    match value {
        None => out.push(FieldViolation::new(field, format!("{label} is required"), None)),
        Some(v) if v.trim().is_empty() => out.push(FieldViolation::new(
            field,
            format!("{label} must not be blank"),
            Some(v.to_string()),
        )),
        Some(v) => {
            if let Some(max) = max_chars {
                if v.chars().count() > max {
                    out.push(FieldViolation::new(
                        field,
                        format!("{label} must be at most {max} characters"),
                        Some(v.to_string()),
                    ));
                }
            }
        }
    }
}

fn check_price(out: &mut Vec<FieldViolation>, price: Option<Decimal>) {
    let Some(price) = price else {
        out.push(FieldViolation::new("price", "Price is required", None));
        return;
    };

    if price <= Decimal::ZERO {
        out.push(FieldViolation::new(
            "price",
            "Price must be greater than zero",
            Some(price.to_string()),
        ));
        return;
    }

    let integer_limit = Decimal::from(10_i64.pow(MAX_PRICE_INTEGER_DIGITS));
    if price.trunc() >= integer_limit || price.normalize().scale() > MAX_PRICE_FRACTION_DIGITS {
        out.push(FieldViolation::new(
            "price",
            format!(
                "Price must have at most {MAX_PRICE_INTEGER_DIGITS} integer digits and \
                 {MAX_PRICE_FRACTION_DIGITS} decimals"
            ),
            Some(price.to_string()),
        ));
    }
}

// "seller_name" -> "Seller name"
fn capitalize(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// -------------------------
// Response DTOs
// -------------------------

/// Outbound view of a product: the flat record plus derived flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductResponse {
    #[serde(flatten)]
    pub product: ProductRecord,
    pub is_available: bool,
    pub has_stock: bool,
    pub is_free_shipping: bool,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            product: ProductRecord::from(product),
            is_available: product.is_available(),
            has_stock: product.has_stock(),
            is_free_shipping: product.is_free_shipping(),
        }
    }
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self::from(&product)
    }
}
