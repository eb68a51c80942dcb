use anyhow::{Context, bail};

use catalog_app::{ProductRequest, ProductService};
use catalog_core::ProductId;
use catalog_infra::StorageConfig;

const USAGE: &str = "usage: catalog <list | search KEYWORD | count [KEYWORD] | show ID | import FILE>";

fn main() -> anyhow::Result<()> {
    catalog_observability::init();

    let config = StorageConfig::from_env();
    let repo = config
        .open()
        .with_context(|| format!("failed to open product storage ({:?})", config.backend))?;
    let service = ProductService::new(repo);

    let stored = service.count()?;
    tracing::info!(products = stored, "catalog ready");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let output = match args.as_slice() {
        [] | ["list"] => serde_json::to_value(service.list_all()?)?,
        ["search", keyword] => serde_json::to_value(service.search(keyword)?.unwrap_or_default())?,
        ["count"] => serde_json::json!({ "count": stored }),
        ["count", keyword] => serde_json::json!({ "count": service.count_by_keyword(keyword)? }),
        ["show", id] => {
            let id: ProductId = id.parse()?;
            match service.find_by_id(id)? {
                Some(product) => serde_json::to_value(product)?,
                None => bail!("product not found: {id}"),
            }
        }
        ["import", path] => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {path}"))?;
            let requests: Vec<ProductRequest> =
                serde_json::from_str(&raw).with_context(|| format!("invalid product list in {path}"))?;

            let mut created = Vec::with_capacity(requests.len());
            for (i, request) in requests.into_iter().enumerate() {
                match service.create_product(request) {
                    Ok(product) => created.push(product),
                    Err(e) => tracing::warn!(index = i, code = e.code(), error = %e, "skipping product"),
                }
            }
            serde_json::to_value(created)?
        }
        _ => bail!(USAGE),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
