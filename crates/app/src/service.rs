use chrono::Utc;

use catalog_core::{AggregateRoot, DomainResult, ProductId};
use catalog_infra::ProductRepository;
use catalog_products::Product;

use crate::dto::{ProductRequest, ProductResponse};
use crate::error::{ServiceError, ServiceResult};

/// Product catalog use cases on top of a [`ProductRepository`].
///
/// Every write follows the same shape: load the stored snapshot, derive a new
/// one through a domain operation, save it. Nothing is saved when the domain
/// rejects the change.
#[derive(Debug)]
pub struct ProductService<R> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip_all)]
    pub fn create_product(&self, request: ProductRequest) -> ServiceResult<ProductResponse> {
        check(&request)?;

        let product = request.apply_to(Product::builder()).build()?;
        let saved = self.repo.save(&product)?;

        tracing::info!(
            aggregate = Product::aggregate_type(),
            product_id = ?saved.id_typed(),
            title = saved.title(),
            "product created"
        );
        Ok(ProductResponse::from(&saved))
    }

    /// Replace the request-owned fields of a stored product.
    ///
    /// Id, view/sale counters, rating, `created_at` and `last_sold_at` are kept.
    #[tracing::instrument(skip_all, fields(product_id = %id))]
    pub fn update_product(
        &self,
        id: ProductId,
        request: ProductRequest,
    ) -> ServiceResult<ProductResponse> {
        let current = self.load(id)?;
        check(&request)?;

        let updated = request
            .apply_to(current.to_builder())
            .updated_at(Utc::now())
            .build()?;
        let saved = self.repo.save(&updated)?;

        tracing::info!("product updated");
        Ok(ProductResponse::from(&saved))
    }

    #[tracing::instrument(skip_all, fields(product_id = %id))]
    pub fn find_by_id(&self, id: ProductId) -> ServiceResult<Option<ProductResponse>> {
        let found = self.repo.find_by_id(id)?;
        tracing::debug!(found = found.is_some(), "find by id");
        Ok(found.map(ProductResponse::from))
    }

    #[tracing::instrument(skip(self))]
    pub fn find_by_title(&self, title: &str) -> ServiceResult<Option<ProductResponse>> {
        let found = self.repo.find_by_title(title)?;
        tracing::debug!(found = found.is_some(), "find by title");
        Ok(found.map(ProductResponse::from))
    }

    /// Keyword search over the catalog.
    ///
    /// `None` when the keyword is blank or nothing matches.
    #[tracing::instrument(skip(self))]
    pub fn search(&self, keyword: &str) -> ServiceResult<Option<Vec<ProductResponse>>> {
        let Some(keyword) = normalize_keyword(keyword) else {
            tracing::debug!("blank keyword");
            return Ok(None);
        };

        let hits = self.repo.find_by_keyword(&keyword)?;
        tracing::debug!(hits = hits.len(), "keyword search");
        if hits.is_empty() {
            return Ok(None);
        }
        Ok(Some(hits.iter().map(ProductResponse::from).collect()))
    }

    #[tracing::instrument(skip(self))]
    pub fn count_by_keyword(&self, keyword: &str) -> ServiceResult<usize> {
        match normalize_keyword(keyword) {
            Some(keyword) => Ok(self.repo.count_by_keyword(&keyword)?),
            None => Ok(0),
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn list_all(&self) -> ServiceResult<Vec<ProductResponse>> {
        let all = self.repo.find_all()?;
        tracing::debug!(count = all.len(), "list all");
        Ok(all.iter().map(ProductResponse::from).collect())
    }

    #[tracing::instrument(skip(self))]
    pub fn count(&self) -> ServiceResult<usize> {
        Ok(self.repo.count()?)
    }

    #[tracing::instrument(skip_all, fields(product_id = %id))]
    pub fn record_view(&self, id: ProductId) -> ServiceResult<ProductResponse> {
        self.change(id, "view recorded", |p| p.record_view())
    }

    /// Sell `quantity` units: stock goes down by `quantity`, sales by one.
    #[tracing::instrument(skip_all, fields(product_id = %id, quantity = quantity))]
    pub fn record_sale(&self, id: ProductId, quantity: i64) -> ServiceResult<ProductResponse> {
        self.change(id, "sale recorded", |p| {
            p.reduce_stock(quantity)?.record_sale()
        })
    }

    #[tracing::instrument(skip_all, fields(product_id = %id, value = value))]
    pub fn rate(&self, id: ProductId, value: f64) -> ServiceResult<ProductResponse> {
        self.change(id, "rating added", |p| p.add_rating(value))
    }

    #[tracing::instrument(skip_all, fields(product_id = %id, amount = amount))]
    pub fn restock(&self, id: ProductId, amount: i64) -> ServiceResult<ProductResponse> {
        self.change(id, "stock added", |p| p.add_stock(amount))
    }

    #[tracing::instrument(skip_all, fields(product_id = %id))]
    pub fn pause(&self, id: ProductId) -> ServiceResult<ProductResponse> {
        self.change(id, "product paused", Product::pause_product)
    }

    #[tracing::instrument(skip_all, fields(product_id = %id))]
    pub fn activate(&self, id: ProductId) -> ServiceResult<ProductResponse> {
        self.change(id, "product activated", Product::activate_product)
    }

    #[tracing::instrument(skip_all, fields(product_id = %id))]
    pub fn close(&self, id: ProductId) -> ServiceResult<ProductResponse> {
        self.change(id, "product closed", Product::close_product)
    }

    #[tracing::instrument(skip_all, fields(product_id = %id))]
    pub fn delete(&self, id: ProductId) -> ServiceResult<()> {
        if !self.repo.delete_by_id(id)? {
            tracing::warn!("product not found");
            return Err(ServiceError::not_found(id));
        }
        tracing::info!("product deleted");
        Ok(())
    }

    fn load(&self, id: ProductId) -> ServiceResult<Product> {
        match self.repo.find_by_id(id)? {
            Some(product) => Ok(product),
            None => {
                tracing::warn!("product not found");
                Err(ServiceError::not_found(id))
            }
        }
    }

    fn change<F>(&self, id: ProductId, what: &'static str, op: F) -> ServiceResult<ProductResponse>
    where
        F: FnOnce(&Product) -> DomainResult<Product>,
    {
        let current = self.load(id)?;
        let next = op(&current).inspect_err(|e| {
            tracing::warn!(error = %e, "change rejected");
        })?;
        let saved = self.repo.save(&next)?;
        tracing::info!("{what}");
        Ok(ProductResponse::from(&saved))
    }
}

fn check(request: &ProductRequest) -> ServiceResult<()> {
    let violations = request.validate();
    if violations.is_empty() {
        return Ok(());
    }
    tracing::warn!(violations = violations.len(), "product request rejected");
    Err(ServiceError::Validation(violations))
}

fn normalize_keyword(keyword: &str) -> Option<String> {
    let keyword = keyword.trim();
    (!keyword.is_empty()).then(|| keyword.to_lowercase())
}
