use std::str::FromStr;

use crate::server::error::{config::ConfigError, AppError};

/// Application configuration loaded from the environment.
pub struct Config {
    pub database_url: String,
    pub bind_address: String,

    /// Account created or promoted at startup when no admin exists.
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,

    pub cache_ttl_secs: u64,
    /// Allowed CORS origin; any origin is allowed when unset.
    pub cors_origin: Option<String>,

    pub shop: ShopSettings,
}

/// Business settings consulted by order placement and inventory reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopSettings {
    /// Flat shipping fee in minor units.
    pub shipping_fee: i64,
    /// Subtotal after discount at or above which shipping is free.
    pub free_shipping_threshold: i64,
    /// Default threshold for the low-stock report and dashboard.
    pub low_stock_threshold: i32,
}

impl Default for ShopSettings {
    fn default() -> Self {
        Self {
            shipping_fee: 30_000,
            free_shipping_threshold: 500_000,
            low_stock_threshold: 5,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = ShopSettings::default();

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            bind_address: std::env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            admin_email: optional_var("ADMIN_EMAIL"),
            admin_password: optional_var("ADMIN_PASSWORD"),
            cache_ttl_secs: parse_var("CACHE_TTL_SECS", 300)?,
            cors_origin: optional_var("CORS_ORIGIN"),
            shop: ShopSettings {
                shipping_fee: parse_var("SHIPPING_FEE", defaults.shipping_fee)?,
                free_shipping_threshold: parse_var(
                    "FREE_SHIPPING_THRESHOLD",
                    defaults.free_shipping_threshold,
                )?,
                low_stock_threshold: parse_var("LOW_STOCK_THRESHOLD", defaults.low_stock_threshold)?,
            },
        })
    }
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Reads `name` and parses it, falling back to `default` when unset.
fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}
