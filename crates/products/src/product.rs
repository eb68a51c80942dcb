//! Product aggregate root and its builder.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use catalog_core::{AggregateRoot, DomainError, DomainResult, Entity, ProductId, SellerId, ValueObject};

use crate::listing::{ListingType, ProductCondition, ProductStatus};
use crate::rating::Rating;
use crate::stock::Stock;

/// Physical package dimensions (weight in kg, sides in cm).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Dimensions {
    pub weight: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub length: Option<f64>,
}

impl ValueObject for Dimensions {}

impl Dimensions {
    pub fn new(
        weight: Option<f64>,
        width: Option<f64>,
        height: Option<f64>,
        length: Option<f64>,
    ) -> Self {
        Self {
            weight,
            width,
            height,
            length,
        }
    }
}

/// Aggregate root: Product.
///
/// Immutable snapshot of a catalog listing. The only way to obtain one is
/// [`ProductBuilder::build`], and every business operation returns a fresh,
/// re-validated snapshot instead of mutating `self`.
///
/// Equality and hashing use the identifier only.
#[derive(Debug, Clone)]
pub struct Product {
    id: Option<ProductId>,
    title: String,
    description: Option<String>,
    price: Decimal,
    currency: Option<String>,
    stock: Stock,
    status: Option<ProductStatus>,
    category: Option<String>,
    subcategory: Option<String>,
    seller_id: SellerId,
    seller_name: Option<String>,
    listing_type: Option<ListingType>,
    free_shipping: Option<bool>,
    shipping_cost: Option<Decimal>,
    dimensions: Dimensions,
    images: Vec<String>,
    attributes: Vec<String>,
    views: Option<u32>,
    sales: Option<u32>,
    rating: Rating,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    last_sold_at: Option<DateTime<Utc>>,
    condition: Option<ProductCondition>,
    brand: Option<String>,
    model: Option<String>,
    sku: Option<String>,
    barcode: Option<String>,
    tags: Vec<String>,
    warranty: Option<String>,
    return_policy: Option<String>,
}

impl Product {
    /// Builder for a product that has not been persisted yet (no id).
    pub fn builder() -> ProductBuilder {
        ProductBuilder::new(None)
    }

    /// Builder for a product with a known identifier.
    pub fn builder_with_id(id: ProductId) -> ProductBuilder {
        ProductBuilder::new(Some(id))
    }

    /// Builder pre-filled with every field of `self`.
    ///
    /// Building it unchanged yields an identical snapshot (same `created_at`).
    pub fn to_builder(&self) -> ProductBuilder {
        ProductBuilder {
            id: self.id,
            title: Some(self.title.clone()),
            description: self.description.clone(),
            price: Some(self.price),
            currency: self.currency.clone(),
            stock_quantity: i64::from(self.stock.quantity()),
            status: self.status,
            category: self.category.clone(),
            subcategory: self.subcategory.clone(),
            seller_id: Some(self.seller_id),
            seller_name: self.seller_name.clone(),
            listing_type: self.listing_type,
            free_shipping: self.free_shipping,
            shipping_cost: self.shipping_cost,
            dimensions: self.dimensions,
            images: self.images.clone(),
            attributes: self.attributes.clone(),
            views: self.views,
            sales: self.sales,
            rating: self.rating,
            created_at: self.created_at,
            updated_at: self.updated_at,
            last_sold_at: self.last_sold_at,
            condition: self.condition,
            brand: self.brand.clone(),
            model: self.model.clone(),
            sku: self.sku.clone(),
            barcode: self.barcode.clone(),
            tags: self.tags.clone(),
            warranty: self.warranty.clone(),
            return_policy: self.return_policy.clone(),
        }
    }

    // ---- business queries ----

    /// Sellable right now: stock is available and the listing is active.
    pub fn is_available(&self) -> bool {
        self.stock.is_available() && self.status == Some(ProductStatus::Active)
    }

    pub fn has_stock(&self) -> bool {
        self.stock.has_stock()
    }

    pub fn is_free_shipping(&self) -> bool {
        self.free_shipping == Some(true)
    }

    // ---- business operations (each returns a new snapshot) ----

    /// One more view; a missing counter counts as zero.
    pub fn record_view(&self) -> DomainResult<Self> {
        let views = self.views.unwrap_or(0).saturating_add(1);
        self.to_builder()
            .counters(Some(views), self.sales)
            .updated_at(Utc::now())
            .build()
    }

    /// One more sale; a missing counter counts as zero.
    pub fn record_sale(&self) -> DomainResult<Self> {
        let now = Utc::now();
        let sales = self.sales.unwrap_or(0).saturating_add(1);
        self.to_builder()
            .counters(self.views, Some(sales))
            .last_sold_at(now)
            .updated_at(now)
            .build()
    }

    pub fn add_rating(&self, rating: f64) -> DomainResult<Self> {
        let rating = self.rating.add_rating(rating)?;
        self.to_builder()
            .rating(rating)
            .updated_at(Utc::now())
            .build()
    }

    pub fn reduce_stock(&self, quantity: i64) -> DomainResult<Self> {
        let stock = self.stock.reduce(quantity)?;
        self.to_builder()
            .stock(i64::from(stock.quantity()))
            .build()
    }

    pub fn add_stock(&self, quantity: i64) -> DomainResult<Self> {
        let stock = self.stock.add(quantity)?;
        self.to_builder()
            .stock(i64::from(stock.quantity()))
            .build()
    }

    /// Replaces title, description and price; currency and everything else stay.
    pub fn update_basic_info(
        &self,
        title: impl Into<String>,
        description: Option<String>,
        price: Decimal,
    ) -> DomainResult<Self> {
        self.to_builder()
            .basic_info(title, description, price, self.currency.clone())
            .build()
    }

    pub fn update_category(
        &self,
        category: Option<String>,
        subcategory: Option<String>,
    ) -> DomainResult<Self> {
        self.to_builder()
            .categorization(category, subcategory)
            .build()
    }

    pub fn update_condition(&self, condition: Option<ProductCondition>) -> DomainResult<Self> {
        self.to_builder().condition(condition).build()
    }

    pub fn pause_product(&self) -> DomainResult<Self> {
        self.with_status(ProductStatus::Paused)
    }

    pub fn activate_product(&self) -> DomainResult<Self> {
        self.with_status(ProductStatus::Active)
    }

    pub fn close_product(&self) -> DomainResult<Self> {
        self.with_status(ProductStatus::Closed)
    }

    // Any status may move to any other, including closed back to active.
    fn with_status(&self, status: ProductStatus) -> DomainResult<Self> {
        self.to_builder().status(Some(status)).build()
    }

    // ---- accessors ----

    pub fn id_typed(&self) -> Option<ProductId> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    pub fn stock(&self) -> Stock {
        self.stock
    }

    pub fn available_quantity(&self) -> u32 {
        self.stock.quantity()
    }

    pub fn status(&self) -> Option<ProductStatus> {
        self.status
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn subcategory(&self) -> Option<&str> {
        self.subcategory.as_deref()
    }

    pub fn seller_id(&self) -> SellerId {
        self.seller_id
    }

    pub fn seller_name(&self) -> Option<&str> {
        self.seller_name.as_deref()
    }

    pub fn listing_type(&self) -> Option<ListingType> {
        self.listing_type
    }

    pub fn free_shipping(&self) -> Option<bool> {
        self.free_shipping
    }

    pub fn shipping_cost(&self) -> Option<Decimal> {
        self.shipping_cost
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn views(&self) -> Option<u32> {
        self.views
    }

    pub fn sales(&self) -> Option<u32> {
        self.sales
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn last_sold_at(&self) -> Option<DateTime<Utc>> {
        self.last_sold_at
    }

    pub fn condition(&self) -> Option<ProductCondition> {
        self.condition
    }

    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref()
    }

    pub fn barcode(&self) -> Option<&str> {
        self.barcode.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn warranty(&self) -> Option<&str> {
        self.warranty.as_deref()
    }

    pub fn return_policy(&self) -> Option<&str> {
        self.return_policy.as_deref()
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Product {}

impl core::hash::Hash for Product {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Option<&Self::Id> {
        self.id.as_ref()
    }
}

impl AggregateRoot for Product {
    fn aggregate_type() -> &'static str {
        "catalog.product"
    }
}

/// Accumulates product fields and validates them in [`ProductBuilder::build`].
///
/// Setters are grouped the way listings are edited (basic info, seller, listing,
/// ...). A fresh builder starts with zero views and sales, an empty rating and
/// `created_at = now`.
#[derive(Debug, Clone)]
pub struct ProductBuilder {
    id: Option<ProductId>,
    title: Option<String>,
    description: Option<String>,
    price: Option<Decimal>,
    currency: Option<String>,
    stock_quantity: i64,
    status: Option<ProductStatus>,
    category: Option<String>,
    subcategory: Option<String>,
    seller_id: Option<SellerId>,
    seller_name: Option<String>,
    listing_type: Option<ListingType>,
    free_shipping: Option<bool>,
    shipping_cost: Option<Decimal>,
    dimensions: Dimensions,
    images: Vec<String>,
    attributes: Vec<String>,
    views: Option<u32>,
    sales: Option<u32>,
    rating: Rating,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    last_sold_at: Option<DateTime<Utc>>,
    condition: Option<ProductCondition>,
    brand: Option<String>,
    model: Option<String>,
    sku: Option<String>,
    barcode: Option<String>,
    tags: Vec<String>,
    warranty: Option<String>,
    return_policy: Option<String>,
}

impl ProductBuilder {
    fn new(id: Option<ProductId>) -> Self {
        Self {
            id,
            title: None,
            description: None,
            price: None,
            currency: None,
            stock_quantity: 0,
            status: None,
            category: None,
            subcategory: None,
            seller_id: None,
            seller_name: None,
            listing_type: None,
            free_shipping: None,
            shipping_cost: None,
            dimensions: Dimensions::default(),
            images: Vec::new(),
            attributes: Vec::new(),
            views: Some(0),
            sales: Some(0),
            rating: Rating::empty(),
            created_at: Utc::now(),
            updated_at: None,
            last_sold_at: None,
            condition: None,
            brand: None,
            model: None,
            sku: None,
            barcode: None,
            tags: Vec::new(),
            warranty: None,
            return_policy: None,
        }
    }

    pub fn id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn basic_info(
        mut self,
        title: impl Into<String>,
        description: Option<String>,
        price: Decimal,
        currency: Option<String>,
    ) -> Self {
        self.title = Some(title.into());
        self.description = description;
        self.price = Some(price);
        self.currency = currency;
        self
    }

    pub fn categorization(mut self, category: Option<String>, subcategory: Option<String>) -> Self {
        self.category = category;
        self.subcategory = subcategory;
        self
    }

    pub fn seller(mut self, seller_id: Option<SellerId>, seller_name: Option<String>) -> Self {
        self.seller_id = seller_id;
        self.seller_name = seller_name;
        self
    }

    pub fn listing(mut self, listing_type: Option<ListingType>, free_shipping: Option<bool>) -> Self {
        self.listing_type = listing_type;
        self.free_shipping = free_shipping;
        self
    }

    pub fn condition(mut self, condition: Option<ProductCondition>) -> Self {
        self.condition = condition;
        self
    }

    /// Units on hand. Checked by `Stock::of` in `build`.
    pub fn stock(mut self, quantity: i64) -> Self {
        self.stock_quantity = quantity;
        self
    }

    pub fn status(mut self, status: Option<ProductStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn shipping(mut self, shipping_cost: Option<Decimal>) -> Self {
        self.shipping_cost = shipping_cost;
        self
    }

    pub fn dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn media(mut self, images: Vec<String>, attributes: Vec<String>) -> Self {
        self.images = images;
        self.attributes = attributes;
        self
    }

    pub fn identification(
        mut self,
        sku: Option<String>,
        barcode: Option<String>,
        brand: Option<String>,
        model: Option<String>,
    ) -> Self {
        self.sku = sku;
        self.barcode = barcode;
        self.brand = brand;
        self.model = model;
        self
    }

    pub fn policies(
        mut self,
        warranty: Option<String>,
        return_policy: Option<String>,
        tags: Vec<String>,
    ) -> Self {
        self.warranty = warranty;
        self.return_policy = return_policy;
        self.tags = tags;
        self
    }

    pub fn counters(mut self, views: Option<u32>, sales: Option<u32>) -> Self {
        self.views = views;
        self.sales = sales;
        self
    }

    pub fn rating(mut self, rating: Rating) -> Self {
        self.rating = rating;
        self
    }

    pub fn timestamps(
        mut self,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
        last_sold_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self.last_sold_at = last_sold_at;
        self
    }

    pub fn updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = Some(at);
        self
    }

    pub fn last_sold_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_sold_at = Some(at);
        self
    }

    /// Validates and produces the product.
    ///
    /// Checked in order: title present and non-blank, price present and > 0,
    /// seller id present, stock quantity non-negative.
    pub fn build(self) -> DomainResult<Product> {
        let title = match self.title {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Err(DomainError::invalid_argument("Product title is required")),
        };

        let price = match self.price {
            Some(p) if p > Decimal::ZERO => p,
            _ => {
                return Err(DomainError::invalid_argument(
                    "Product price must be greater than zero",
                ));
            }
        };

        let seller_id = self
            .seller_id
            .ok_or_else(|| DomainError::invalid_argument("Seller ID is required"))?;

        let stock = Stock::of(self.stock_quantity)?;

        Ok(Product {
            id: self.id,
            title,
            description: self.description,
            price,
            currency: self.currency,
            stock,
            status: self.status,
            category: self.category,
            subcategory: self.subcategory,
            seller_id,
            seller_name: self.seller_name,
            listing_type: self.listing_type,
            free_shipping: self.free_shipping,
            shipping_cost: self.shipping_cost,
            dimensions: self.dimensions,
            images: self.images,
            attributes: self.attributes,
            views: self.views,
            sales: self.sales,
            rating: self.rating,
            created_at: self.created_at,
            updated_at: self.updated_at,
            last_sold_at: self.last_sold_at,
            condition: self.condition,
            brand: self.brand,
            model: self.model,
            sku: self.sku,
            barcode: self.barcode,
            tags: self.tags,
            warranty: self.warranty,
            return_policy: self.return_policy,
        })
    }
}
