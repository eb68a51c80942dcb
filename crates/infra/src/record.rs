//! Flat, serializable form of a `Product` (storage and translation boundary).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use catalog_core::{DomainError, ProductId, SellerId};
use catalog_products::{
    Dimensions, ListingType, Product, ProductCondition, ProductStatus, Rating,
};

/// One product as a flat field set.
///
/// Every aggregate attribute has a field here; the owned value objects are
/// flattened (`available_quantity`/`available` for stock, `rating`/`rating_count`
/// for the rating). Converting a `Product` to a record and back loses nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default)]
    pub id: Option<ProductId>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub available_quantity: u32,
    /// Derived from the stock; ignored when rebuilding the product.
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub status: Option<ProductStatus>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub seller_id: Option<SellerId>,
    #[serde(default)]
    pub seller_name: Option<String>,
    #[serde(default)]
    pub listing_type: Option<ListingType>,
    #[serde(default)]
    pub free_shipping: Option<bool>,
    #[serde(default)]
    pub shipping_cost: Option<Decimal>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub views: Option<u32>,
    #[serde(default)]
    pub sales: Option<u32>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub rating_count: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_sold_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub condition: Option<ProductCondition>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub warranty: Option<String>,
    #[serde(default)]
    pub return_policy: Option<String>,
}

impl From<&Product> for ProductRecord {
    fn from(p: &Product) -> Self {
        let dims = p.dimensions();
        Self {
            id: p.id_typed(),
            title: p.title().to_string(),
            description: p.description().map(str::to_string),
            price: p.price(),
            currency: p.currency().map(str::to_string),
            available_quantity: p.available_quantity(),
            available: p.stock().is_available(),
            status: p.status(),
            category: p.category().map(str::to_string),
            subcategory: p.subcategory().map(str::to_string),
            seller_id: Some(p.seller_id()),
            seller_name: p.seller_name().map(str::to_string),
            listing_type: p.listing_type(),
            free_shipping: p.free_shipping(),
            shipping_cost: p.shipping_cost(),
            weight: dims.weight,
            width: dims.width,
            height: dims.height,
            length: dims.length,
            images: p.images().to_vec(),
            attributes: p.attributes().to_vec(),
            views: p.views(),
            sales: p.sales(),
            rating: p.rating().value(),
            rating_count: p.rating().count(),
            created_at: p.created_at(),
            updated_at: p.updated_at(),
            last_sold_at: p.last_sold_at(),
            condition: p.condition(),
            brand: p.brand().map(str::to_string),
            model: p.model().map(str::to_string),
            sku: p.sku().map(str::to_string),
            barcode: p.barcode().map(str::to_string),
            tags: p.tags().to_vec(),
            warranty: p.warranty().map(str::to_string),
            return_policy: p.return_policy().map(str::to_string),
        }
    }
}

impl From<Product> for ProductRecord {
    fn from(p: Product) -> Self {
        Self::from(&p)
    }
}

impl TryFrom<ProductRecord> for Product {
    type Error = DomainError;

    /// Rebuilds the aggregate, re-running every builder and value-object check.
    fn try_from(r: ProductRecord) -> Result<Self, Self::Error> {
        let rating = Rating::of(r.rating, i64::from(r.rating_count))?;

        let mut builder = match r.id {
            Some(id) => Product::builder_with_id(id),
            None => Product::builder(),
        };
        builder = builder
            .basic_info(r.title, r.description, r.price, r.currency)
            .categorization(r.category, r.subcategory)
            .seller(r.seller_id, r.seller_name)
            .listing(r.listing_type, r.free_shipping)
            .condition(r.condition)
            .stock(i64::from(r.available_quantity))
            .status(r.status)
            .shipping(r.shipping_cost)
            .dimensions(Dimensions::new(r.weight, r.width, r.height, r.length))
            .media(r.images, r.attributes)
            .identification(r.sku, r.barcode, r.brand, r.model)
            .policies(r.warranty, r.return_policy, r.tags)
            .counters(r.views, r.sales)
            .rating(rating)
            .timestamps(r.created_at, r.updated_at, r.last_sold_at);

        builder.build()
    }
}
