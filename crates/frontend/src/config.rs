//! Конфигурация клиента.
//!
//! `config.toml` встраивается в бандл; если он не разбирается,
//! используется встроенная конфигурация по умолчанию.

use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub currency: CurrencyConfig,
    pub receipt: ReceiptConfig,
    pub list: ListConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub image_base_url: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DigitGrouping {
    /// 12,34,567: лакхи и кроры
    Indian,
    /// 1,234,567
    Western,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CurrencyConfig {
    pub code: String,
    pub symbol: String,
    /// Название валюты для суммы прописью
    pub name: String,
    pub decimals: u8,
    pub grouping: DigitGrouping,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReceiptConfig {
    pub company_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub footer_note: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListConfig {
    pub default_page_size: u32,
    pub page_size_options: Vec<u32>,
}

fn default_port() -> u16 {
    3000
}

const EMBEDDED_CONFIG: &str = include_str!("../config.toml");

static CONFIG: Lazy<AppConfig> = Lazy::new(|| match parse_config(EMBEDDED_CONFIG) {
    Ok(config) => config,
    Err(e) => {
        log::warn!("config.toml is invalid, using defaults: {}", e);
        fallback_config()
    }
});

pub fn parse_config(source: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(source)
}

/// Глобальная конфигурация приложения
pub fn config() -> &'static AppConfig {
    &CONFIG
}

/// Конфигурация по умолчанию, если встроенный файл повреждён
fn fallback_config() -> AppConfig {
    AppConfig {
        api: ApiConfig {
            base_url: String::new(),
            port: default_port(),
        },
        storage: StorageConfig {
            image_base_url: "/storage".to_string(),
        },
        currency: CurrencyConfig {
            code: "BDT".to_string(),
            symbol: "৳".to_string(),
            name: "Taka".to_string(),
            decimals: 2,
            grouping: DigitGrouping::Indian,
        },
        receipt: ReceiptConfig {
            company_name: "Retail POS".to_string(),
            address: String::new(),
            footer_note: String::new(),
        },
        list: ListConfig {
            default_page_size: 20,
            page_size_options: vec![10, 20, 50, 100],
        },
    }
}
