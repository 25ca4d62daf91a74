use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub trade: TradeConfig,
    pub page: PageConfig,
    pub filters: FilterConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeConfig {
    /// Percent the trade-in price must exceed the market price by for a
    /// listing to count as a value trade
    pub value_trade_threshold: f64,

    /// Currency suffix shown after prices
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Overrides the layout's page title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// chrono format string for the date shown in the title
    pub date_format: String,

    /// Include the tablesort scripts in rendered pages
    pub include_tablesort: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Label of the "match everything" dropdown entry
    pub all_label: String,

    /// Class put on rows the filters hide
    pub hidden_class: String,
}

impl Default for TradeConfig {
    fn default() -> Self {
        Self {
            value_trade_threshold: 50.0,
            currency: "SEK".to_string(),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: None,
            date_format: "%Y-%m-%d %H:%M".to_string(),
            include_tablesort: true,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            all_label: "All".to_string(),
            hidden_class: "hidden".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location, falling back to defaults when
    /// there is no config file yet
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("card-filter").join("config.toml"))
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# Card Filter Configuration File
# Location: ~/.config/card-filter/config.toml (Linux)
#           %APPDATA%\card-filter\config.toml (Windows)

[trade]
# A tradable listing is a value trade when the trade-in price beats the
# market price by at least this many percent
value_trade_threshold = 50.0

# Currency suffix shown after prices
currency = "SEK"

[page]
# Page title (leave commented to use the layout's own title)
# title = "Tradable cards"

# Date shown next to the title, chrono format
date_format = "%Y-%m-%d %H:%M"

# Load tablesort from the CDN so the columns stay sortable
include_tablesort = true

[filters]
# Label of the dropdown entry that matches every row
all_label = "All"

# Class put on hidden rows
hidden_class = "hidden"
"#
        .to_string()
    }
}
