use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use super::dto::{FoodNutrients, FoodSummary, UsdaFoodDetail, UsdaNutrient, UsdaSearchResponse};
use crate::config::UsdaConfig;

#[derive(Debug, Error)]
pub enum FoodLookupError {
    #[error("food lookup request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("food lookup returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Food composition source: free-text search plus per-100g macros.
#[async_trait]
pub trait FoodLookup: Send + Sync {
    async fn search_foods(&self, query: &str) -> Result<Vec<FoodSummary>, FoodLookupError>;
    async fn get_food_nutrients(&self, food_id: i64) -> Result<FoodNutrients, FoodLookupError>;
}

#[derive(Clone)]
pub struct UsdaClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl UsdaClient {
    pub fn new(cfg: &UsdaConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("build usda http client")?;
        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, FoodLookupError> {
        let resp = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(params)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FoodLookupError::Status {
                status: status.as_u16(),
                body: body.chars().take(256).collect(),
            });
        }
        Ok(resp.json::<T>().await?)
    }
}

#[async_trait]
impl FoodLookup for UsdaClient {
    async fn search_foods(&self, query: &str) -> Result<Vec<FoodSummary>, FoodLookupError> {
        let body: UsdaSearchResponse = self.get_json("/foods/search", &[("query", query)]).await?;
        debug!(query, hits = body.foods.len(), "usda search");
        Ok(body.foods.into_iter().map(FoodSummary::from).collect())
    }

    async fn get_food_nutrients(&self, food_id: i64) -> Result<FoodNutrients, FoodLookupError> {
        let body: UsdaFoodDetail = self.get_json(&format!("/food/{}", food_id), &[]).await?;
        Ok(FoodNutrients {
            protein_per_100g: find_nutrient(&body.food_nutrients, &["Protein"]),
            carbs_per_100g: find_nutrient(
                &body.food_nutrients,
                &["Carbohydrate, by difference", "Carbohydrates"],
            ),
            fat_per_100g: find_nutrient(&body.food_nutrients, &["Total lipid (fat)"]),
        })
    }
}

/// Amount of the first nutrient whose name is one of `names`, 0 if none.
fn find_nutrient(nutrients: &[UsdaNutrient], names: &[&str]) -> f64 {
    nutrients
        .iter()
        .find(|n| {
            n.name()
                .is_some_and(|name| names.iter().any(|candidate| *candidate == name))
        })
        .and_then(|n| n.value.filter(|v| *v != 0.0).or(n.amount))
        .unwrap_or(0.0)
}
