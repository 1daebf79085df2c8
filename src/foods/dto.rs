use serde::{Deserialize, Serialize};

use crate::engine::{GramsInput, MacroGrams};

/// One search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodSummary {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub category: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodNutrients {
    pub protein_per_100g: f64,
    pub carbs_per_100g: f64,
    pub fat_per_100g: f64,
}

impl FoodNutrients {
    pub fn per_100g(&self) -> MacroGrams {
        MacroGrams {
            protein: self.protein_per_100g,
            carbs: self.carbs_per_100g,
            fat: self.fat_per_100g,
        }
    }
}

// ---- USDA wire types ----

#[derive(Debug, Deserialize)]
pub struct UsdaSearchResponse {
    #[serde(default)]
    pub foods: Vec<UsdaSearchFood>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsdaSearchFood {
    pub fdc_id: i64,
    pub description: String,
    pub brand_owner: Option<String>,
    pub food_category: Option<String>,
}

impl From<UsdaSearchFood> for FoodSummary {
    fn from(f: UsdaSearchFood) -> Self {
        Self {
            id: f.fdc_id,
            name: f.description,
            brand: f.brand_owner.unwrap_or_else(|| "Generic".into()),
            category: f.food_category.unwrap_or_else(|| "N/A".into()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsdaFoodDetail {
    #[serde(default)]
    pub food_nutrients: Vec<UsdaNutrient>,
}

/// Search-style entries carry `nutrientName`/`value`; detail-style entries
/// nest the name under `nutrient` and use `amount`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsdaNutrient {
    pub nutrient_name: Option<String>,
    pub nutrient: Option<UsdaNutrientRef>,
    pub value: Option<f64>,
    pub amount: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct UsdaNutrientRef {
    pub name: Option<String>,
}

impl UsdaNutrient {
    pub fn name(&self) -> Option<&str> {
        self.nutrient_name
            .as_deref()
            .or_else(|| self.nutrient.as_ref().and_then(|n| n.name.as_deref()))
    }
}

// ---- API ----

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct FoodSearchResponse {
    pub query: String,
    /// A newer search from the same user replaced this one; `results` is empty.
    pub superseded: bool,
    pub results: Vec<FoodSummary>,
}

#[derive(Debug, Deserialize)]
pub struct NutrientParams {
    pub serving: Option<String>,
}

impl NutrientParams {
    pub fn serving_input(&self) -> Option<GramsInput> {
        self.serving.clone().map(GramsInput::Text)
    }
}

#[derive(Debug, Serialize)]
pub struct FoodNutrientsResponse {
    pub food_id: i64,
    pub per_100g: MacroGrams,
    pub serving: MacroGrams,
    pub serving_calories: f64,
}
