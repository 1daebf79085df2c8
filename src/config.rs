use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// USDA FoodData Central access.
#[derive(Debug, Clone, Deserialize)]
pub struct UsdaConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FoodSearchConfig {
    pub debounce_ms: u64,
    pub min_query_len: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub usda: UsdaConfig,
    pub food_search: FoodSearchConfig,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "macrotrack".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "macrotrack-users".into()),
            ttl_minutes: env_or("JWT_TTL_MINUTES", 60),
            refresh_ttl_minutes: env_or("JWT_REFRESH_TTL_MINUTES", 60 * 24 * 14),
        };
        let usda = UsdaConfig {
            api_key: std::env::var("USDA_API_KEY").unwrap_or_else(|_| "DEMO_KEY".into()),
            base_url: std::env::var("USDA_BASE_URL")
                .unwrap_or_else(|_| "https://api.nal.usda.gov/fdc/v1".into()),
            timeout_secs: env_or("USDA_TIMEOUT_SECS", 10),
        };
        let food_search = FoodSearchConfig {
            debounce_ms: env_or("FOOD_SEARCH_DEBOUNCE_MS", 300),
            min_query_len: env_or("FOOD_SEARCH_MIN_QUERY_LEN", 2),
        };
        Ok(Self {
            database_url,
            jwt,
            usda,
            food_search,
        })
    }
}
