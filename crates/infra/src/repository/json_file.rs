use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;

use catalog_core::ProductId;
use catalog_products::Product;

use super::r#trait::{ProductRepository, RepositoryError};
use crate::record::ProductRecord;

/// Product repository backed by a single JSON array file.
///
/// Every operation reads the whole file; every write rewrites it (to a sibling
/// temp file, then renamed into place). A mutex serializes writers inside this
/// process only; it is not a multi-process lock.
///
/// Rows that no longer rebuild into a valid `Product` (wrong shape, or failing a
/// domain check) are skipped by queries with a warning but kept on disk untouched,
/// so a bad row never causes data loss on the next save.
#[derive(Debug)]
pub struct JsonFileProductRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileProductRepository {
    /// Open (and create if missing) the data file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();
        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| RepositoryError::io(parent, e))?;
            }
            fs::write(&path, "[]").map_err(|e| RepositoryError::io(&path, e))?;
            tracing::info!(path = %path.display(), "created product data file");
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw rows as stored. Each row is decoded separately, so a single row of
    /// the wrong shape never makes the rest of the file unreadable.
    fn load_rows(&self) -> Result<Vec<Value>, RepositoryError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(RepositoryError::io(&self.path, e)),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn store_rows(&self, rows: &[Value]) -> Result<(), RepositoryError> {
        let json = serde_json::to_string_pretty(rows)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| RepositoryError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| RepositoryError::io(&self.path, e))?;
        Ok(())
    }

    fn load_products(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = self.load_rows()?;
        let total = rows.len();
        let products: Vec<Product> = rows
            .into_iter()
            .filter_map(|row| {
                let id = row_id(&row);
                match decode_row(row) {
                    Ok(p) => Some(p),
                    Err(e) => {
                        tracing::warn!(product_id = ?id, error = %e, "skipping invalid product row");
                        None
                    }
                }
            })
            .collect();
        tracing::debug!(path = %self.path.display(), total, valid = products.len(), "loaded products");
        Ok(products)
    }
}

fn row_id(row: &Value) -> Option<ProductId> {
    row.get("id")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
}

fn decode_row(row: Value) -> Result<Product, RepositoryError> {
    let record: ProductRecord = serde_json::from_value(row)?;
    Ok(Product::try_from(record)?)
}

impl ProductRepository for JsonFileProductRepository {
    fn save(&self, product: &Product) -> Result<Product, RepositoryError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::storage("lock poisoned"))?;

        let mut rows = self.load_rows()?;
        let saved = match product.id_typed() {
            Some(_) => product.clone(),
            None => product.to_builder().id(ProductId::new()).build()?,
        };
        let row = serde_json::to_value(ProductRecord::from(&saved))?;

        match rows.iter_mut().find(|r| row_id(r) == saved.id_typed()) {
            Some(slot) => *slot = row,
            None => rows.push(row),
        }
        self.store_rows(&rows)?;

        tracing::debug!(product_id = ?saved.id_typed(), path = %self.path.display(), "product saved");
        Ok(saved)
    }

    fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self
            .load_products()?
            .into_iter()
            .find(|p| p.id_typed() == Some(id)))
    }

    fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        self.load_products()
    }

    fn delete_by_id(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::storage("lock poisoned"))?;

        let mut rows = self.load_rows()?;
        let before = rows.len();
        rows.retain(|r| row_id(r) != Some(id));
        let removed = rows.len() != before;
        if removed {
            self.store_rows(&rows)?;
        }
        Ok(removed)
    }

    /// Counts stored rows, including rows that would be skipped as invalid.
    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.load_rows()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::SellerId;
    use catalog_products::ProductStatus;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn data_file(dir: &TempDir) -> PathBuf {
        dir.path().join("catalog").join("products.json")
    }

    fn unsaved(title: &str) -> Product {
        Product::builder()
            .basic_info(title, Some("desc".into()), Decimal::new(4990, 2), Some("ARS".into()))
            .seller(Some(SellerId::new()), Some("Seller".into()))
            .status(Some(ProductStatus::Active))
            .policies(None, None, vec!["gift".into()])
            .stock(5)
            .build()
            .unwrap()
    }

    #[test]
    fn open_creates_file_with_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileProductRepository::open(data_file(&dir)).unwrap();
        assert_eq!(fs::read_to_string(repo.path()).unwrap(), "[]");
        assert!(repo.find_all().unwrap().is_empty());
    }

    #[test]
    fn saved_products_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let saved = {
            let repo = JsonFileProductRepository::open(data_file(&dir)).unwrap();
            let saved = repo.save(&unsaved("Mate gourd")).unwrap();
            repo.save(&saved.add_rating(5.0).unwrap()).unwrap()
        };

        let repo = JsonFileProductRepository::open(data_file(&dir)).unwrap();
        let found = repo.find_by_id(saved.id_typed().unwrap()).unwrap().unwrap();
        assert_eq!(found.rating(), saved.rating());
        assert_eq!(found.created_at(), saved.created_at());
        assert_eq!(found.tags(), ["gift".to_string()]);
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn keyword_search_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileProductRepository::open(data_file(&dir)).unwrap();
        repo.save(&unsaved("iPhone 15 Pro Max")).unwrap();
        repo.save(&unsaved("Galaxy S24")).unwrap();

        assert_eq!(repo.find_by_keyword("iphone").unwrap().len(), 1);
        assert_eq!(repo.count_by_keyword("gift").unwrap(), 2);
        assert!(repo.find_by_keyword("samsung").unwrap().is_empty());
    }

    #[test]
    fn invalid_rows_are_skipped_but_kept() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileProductRepository::open(data_file(&dir)).unwrap();
        let good = repo.save(&unsaved("Good")).unwrap();

        let mut bad = ProductRecord::from(&unsaved("Bad"));
        bad.id = Some(ProductId::new());
        bad.price = Decimal::ZERO;
        let mut rows = repo.load_rows().unwrap();
        rows.push(serde_json::to_value(bad).unwrap());
        repo.store_rows(&rows).unwrap();

        assert_eq!(repo.find_all().unwrap(), vec![good.clone()]);
        assert_eq!(repo.count().unwrap(), 2);

        repo.save(&good.record_view().unwrap()).unwrap();
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn rows_of_the_wrong_shape_are_skipped_and_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileProductRepository::open(data_file(&dir)).unwrap();
        let good = repo.save(&unsaved("Good")).unwrap();
        let good_id = good.id_typed().unwrap();

        let mut rows = repo.load_rows().unwrap();
        let mut negative_stock = rows[0].clone();
        negative_stock["id"] = serde_json::json!(ProductId::new());
        negative_stock["available_quantity"] = serde_json::json!(-1);
        let mut no_created_at = rows[0].clone();
        no_created_at["id"] = serde_json::json!(ProductId::new());
        no_created_at.as_object_mut().unwrap().remove("created_at");
        rows.push(negative_stock.clone());
        rows.push(no_created_at);
        repo.store_rows(&rows).unwrap();

        assert_eq!(repo.find_all().unwrap(), vec![good.clone()]);
        assert_eq!(repo.find_by_id(good_id).unwrap(), Some(good.clone()));
        assert_eq!(repo.count().unwrap(), 3);

        let viewed = repo.save(&good.record_view().unwrap()).unwrap();
        assert_eq!(repo.find_by_id(good_id).unwrap().unwrap().views(), viewed.views());

        let stored = repo.load_rows().unwrap();
        assert_eq!(stored.len(), 3);
        assert_eq!(stored[1], negative_stock);
    }

    #[test]
    fn malformed_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileProductRepository::open(data_file(&dir)).unwrap();
        fs::write(repo.path(), "{ not json").unwrap();
        assert!(matches!(repo.find_all(), Err(RepositoryError::Serialization(_))));
    }

    #[test]
    fn delete_rewrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileProductRepository::open(data_file(&dir)).unwrap();
        let saved = repo.save(&unsaved("Mate gourd")).unwrap();

        assert!(repo.delete_by_id(saved.id_typed().unwrap()).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
    }
}
