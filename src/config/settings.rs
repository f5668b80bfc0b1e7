//! Application settings loaded from config.toml
//!
//! Everything except secrets lives here. The bot token and database URL come from
//! the environment (optionally via `.env`).

use crate::{
    api::client::DEFAULT_BASE_URL,
    core::access::PurchaseRule,
    errors::{Error, Result},
};
use serde::Deserialize;
use std::{path::Path, time::Duration};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Discord user who receives feedback and may use the admin commands
    pub admin_user_id: u64,
    /// Company API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// `/company list` settings
    #[serde(default)]
    pub listing: ListingConfig,
    /// Access gate settings
    #[serde(default)]
    pub access: AccessConfig,
}

/// `[api]` section
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// `[listing]` section
#[derive(Debug, Deserialize, Clone)]
pub struct ListingConfig {
    /// Companies shown per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Idle time after which the listing controls are removed; unset keeps them forever
    #[serde(default)]
    pub session_timeout_secs: Option<u64>,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            session_timeout_secs: None,
        }
    }
}

impl ListingConfig {
    /// Session idle timeout, if bounded.
    #[must_use]
    pub fn session_timeout(&self) -> Option<Duration> {
        self.session_timeout_secs.map(Duration::from_secs)
    }
}

/// `[access]` section
#[derive(Debug, Deserialize, Clone)]
pub struct AccessConfig {
    /// Price of the product, in coins
    #[serde(default = "default_purchase_price")]
    pub purchase_price: i64,
    /// Text the purchase entry's reason must contain
    #[serde(default = "default_product_marker")]
    pub product_marker: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            purchase_price: default_purchase_price(),
            product_marker: default_product_marker(),
        }
    }
}

impl AccessConfig {
    /// The rule the access gate checks purchase history against.
    #[must_use]
    pub fn rule(&self) -> PurchaseRule {
        PurchaseRule {
            price: self.purchase_price,
            marker: self.product_marker.clone(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_page_size() -> usize {
    10
}

const fn default_purchase_price() -> i64 {
    1000
}

fn default_product_marker() -> String {
    "company-buddy".to_string()
}

impl AppConfig {
    /// Checks values that parse fine but cannot work.
    ///
    /// # Errors
    /// Returns [`Error::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| {
            Err(Error::Config {
                message: message.to_string(),
            })
        };
        if self.admin_user_id == 0 {
            return invalid("admin_user_id must be a Discord user ID");
        }
        if self.api.base_url.trim().is_empty() {
            return invalid("api.base_url cannot be empty");
        }
        if self.listing.page_size == 0 {
            return invalid("listing.page_size must be at least 1");
        }
        if self.access.purchase_price <= 0 {
            return invalid("access.purchase_price must be positive");
        }
        if self.access.product_marker.trim().is_empty() {
            return invalid("access.product_marker cannot be empty");
        }
        Ok(())
    }
}

/// Parses and validates a config.toml document.
///
/// # Errors
/// Returns [`Error::Config`] if the TOML is malformed or a value is invalid.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads application configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing or a value is out of range
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

/// Loads application configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<AppConfig> {
    load_config("config.toml")
}
