use serde::Deserialize;
use url::Url;

use crate::{disk_storage::DiskStorageInterface, reqwest::parse_url};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_SYMBOL: &str = "CIB";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Root of the pricing API, without the `/api/v1` prefix.
    pub base_url: String,
    /// Symbol shown in the input box when the page opens.
    pub default_symbol: String,
    // TODO theme_name should be the tui ThemeName enum once themes move out of the tui crate
    pub theme_name: String,
    /// Fixed chart size in terminal cells.
    pub chart_width: u16,
    pub chart_height: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_symbol: DEFAULT_SYMBOL.to_string(),
            theme_name: "Monochrome".to_string(),
            chart_width: 100,
            chart_height: 20,
        }
    }
}

impl DiskStorageInterface for Config {
    const FILE_NAME: &'static str = "config";
}

impl Config {
    /// Applies values coming from the command line or environment on top of the
    /// file values. `None` keeps what the file said.
    pub fn with_overrides(mut self, base_url: Option<String>, symbol: Option<String>) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if let Some(symbol) = symbol {
            self.default_symbol = symbol;
        }
        self
    }

    pub fn get_theme_name(&self) -> &str {
        &self.theme_name
    }

    /// Parsed and checked base URL.
    pub fn get_base_url(&self) -> crate::Result<Url> {
        let url = parse_url(&self.base_url)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(crate::Error::UnsupportedUrlScheme(url)),
        }
    }
}
