use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{Product, ProductSource};
use crate::nutrition::convert::lenient_f64;

/// Open Food Facts product API (v2). No key required.
#[derive(Clone)]
pub struct OpenFoodFactsClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ProductEnvelope {
    #[serde(default)]
    status: Option<i64>,
    #[serde(default)]
    product: Option<ProductBody>,
}

#[derive(Debug, Default, Deserialize)]
struct ProductBody {
    product_name: Option<String>,
    product_name_nl: Option<String>,
    product_name_en: Option<String>,
    #[serde(default)]
    nutriments: serde_json::Map<String, Value>,
}

impl OpenFoodFactsClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

fn into_product(barcode: &str, envelope: ProductEnvelope) -> Option<Product> {
    if envelope.status != Some(1) {
        return None;
    }
    let body = envelope.product.unwrap_or_default();
    let name = [body.product_name, body.product_name_nl, body.product_name_en]
        .into_iter()
        .flatten()
        .map(|n| n.trim().to_string())
        .find(|n| !n.is_empty())
        .unwrap_or_else(|| "Unknown product".to_string());
    let nutrient = |key: &str| body.nutriments.get(key).and_then(lenient_f64);

    Some(Product {
        barcode: barcode.to_string(),
        name,
        kcal_100g: nutrient("energy-kcal_100g"),
        protein_100g: nutrient("proteins_100g"),
        carbs_100g: nutrient("carbohydrates_100g"),
        fat_100g: nutrient("fat_100g"),
    })
}

#[async_trait]
impl ProductSource for OpenFoodFactsClient {
    async fn lookup(&self, barcode: &str) -> anyhow::Result<Option<Product>> {
        let response = self
            .http
            .get(format!("{}/api/v2/product/{}.json", self.base_url, barcode))
            .send()
            .await
            .context("openfoodfacts request")?;

        // unknown barcodes come back as 404 with a status-0 body
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let envelope: ProductEnvelope = response
            .error_for_status()
            .context("openfoodfacts status")?
            .json()
            .await
            .context("openfoodfacts body")?;

        Ok(into_product(barcode, envelope))
    }
}
