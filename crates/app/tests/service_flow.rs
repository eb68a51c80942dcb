use catalog_app::{ProductRequest, ProductService, ServiceError};
use catalog_core::{ProductId, SellerId};
use catalog_infra::{StorageBackend, StorageConfig};
use serde_json::json;
use tempfile::TempDir;

fn json_config(dir: &TempDir) -> StorageConfig {
    StorageConfig {
        backend: StorageBackend::JsonFile,
        data_file: dir.path().join("products.json"),
    }
}

fn request(payload: serde_json::Value) -> ProductRequest {
    serde_json::from_value(payload).expect("request payload")
}

fn phone(title: &str, quantity: i64) -> ProductRequest {
    request(json!({
        "title": title,
        "description": "Unlocked smartphone",
        "price": "1499.99",
        "currency": "BRL",
        "available_quantity": quantity,
        "status": "ACTIVE",
        "category": "Electronics",
        "subcategory": "Smartphones",
        "seller_id": SellerId::new(),
        "seller_name": "Loja Oficial",
        "listing_type": "GOLD_PRO",
        "free_shipping": true,
        "condition": "NEW",
        "brand": "Motorola",
        "tags": ["android", "5g"],
    }))
}

fn id_of(value: &catalog_app::ProductResponse) -> ProductId {
    value.product.id.expect("saved product has an id")
}

#[test]
fn catalog_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let (id, created_at) = {
        let service = ProductService::new(json_config(&dir).open().unwrap());
        let created = service.create_product(phone("Moto G84", 10)).unwrap();
        let id = id_of(&created);

        service.record_view(id).unwrap();
        service.record_sale(id, 4).unwrap();
        service.rate(id, 5.0).unwrap();
        service.rate(id, 4.0).unwrap();
        (id, created.product.created_at)
    };

    let service = ProductService::new(json_config(&dir).open().unwrap());
    let stored = service.find_by_id(id).unwrap().expect("stored product");

    assert_eq!(stored.product.title, "Moto G84");
    assert_eq!(stored.product.available_quantity, 6);
    assert_eq!(stored.product.views, Some(1));
    assert_eq!(stored.product.sales, Some(1));
    assert_eq!(stored.product.rating, 4.5);
    assert_eq!(stored.product.rating_count, 2);
    assert_eq!(stored.product.created_at, created_at);
    assert!(stored.is_available);
    assert!(stored.is_free_shipping);
}

#[test]
fn search_update_and_delete_flow() {
    let dir = tempfile::tempdir().unwrap();
    let service = ProductService::new(json_config(&dir).open().unwrap());

    let g84 = id_of(&service.create_product(phone("Moto G84", 3)).unwrap());
    service.create_product(phone("Moto Edge 40", 1)).unwrap();

    let hits = service.search(" MOTO ").unwrap().expect("two motorola phones");
    assert_eq!(hits.len(), 2);
    assert_eq!(service.count_by_keyword("edge").unwrap(), 1);
    assert!(service.search("iphone").unwrap().is_none());

    let mut update = phone("Moto G84 5G", 8);
    update.price = Some("1299.90".parse().unwrap());
    let updated = service.update_product(g84, update).unwrap();
    assert_eq!(id_of(&updated), g84);
    assert_eq!(updated.product.title, "Moto G84 5G");
    assert_eq!(updated.product.available_quantity, 8);
    assert!(service.find_by_title("Moto G84").unwrap().is_none());

    service.delete(g84).unwrap();
    assert_eq!(service.count().unwrap(), 1);
    assert!(matches!(
        service.update_product(g84, phone("Moto G84", 1)),
        Err(ServiceError::NotFound(_))
    ));
}

#[test]
fn rejected_changes_leave_storage_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let service = ProductService::new(json_config(&dir).open().unwrap());
    let id = id_of(&service.create_product(phone("Moto G84", 2)).unwrap());

    let err = service.record_sale(id, 3).unwrap_err();
    assert_eq!(err.code(), "INSUFFICIENT_STOCK");

    let err = service
        .create_product(request(json!({ "title": "Incomplete", "price": "0" })))
        .unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
    assert!(err.violations().iter().any(|v| v.field == "price"));

    let stored = service.find_by_id(id).unwrap().unwrap();
    assert_eq!(stored.product.available_quantity, 2);
    assert_eq!(service.count().unwrap(), 1);
}

#[test]
fn response_json_uses_wire_names() {
    let service = ProductService::new(
        StorageConfig {
            backend: StorageBackend::Memory,
            ..StorageConfig::default()
        }
        .open()
        .unwrap(),
    );
    let created = service.create_product(phone("Moto G84", 1)).unwrap();
    let value = serde_json::to_value(&created).unwrap();

    assert_eq!(value["status"], "ACTIVE");
    assert_eq!(value["listing_type"], "GOLD_PRO");
    assert_eq!(value["condition"], "NEW");
    assert_eq!(value["price"], "1499.99");
    assert_eq!(value["has_stock"], true);
}
