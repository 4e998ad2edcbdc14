use anyhow::{anyhow, Context, Result};

use crate::layout::{default_page_geometry, Labels, LayoutSettings, Locale, PaginationMode};

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub locale: Locale,
    pub pagination: PaginationMode,
    pub footer_text: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let locale = match lookup("CV_LOCALE") {
            Some(raw) => raw
                .parse::<Locale>()
                .map_err(|e| anyhow!(e))
                .context("CV_LOCALE must be 'fr' or 'en'")?,
            None => Locale::default(),
        };
        let pagination = match lookup("CV_PAGINATION") {
            Some(raw) => raw
                .parse::<PaginationMode>()
                .map_err(|e| anyhow!(e))
                .context("CV_PAGINATION must be 'measured' or 'conservative'")?,
            None => PaginationMode::default(),
        };

        Ok(Config {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            locale,
            pagination,
            footer_text: lookup("CV_FOOTER_TEXT").filter(|t| !t.trim().is_empty()),
        })
    }

    /// Layout settings shared by every export request.
    pub fn layout_settings(&self) -> LayoutSettings {
        LayoutSettings {
            geometry: default_page_geometry(),
            labels: Labels::for_locale(self.locale).with_footer(self.footer_text.as_deref()),
            pagination: self.pagination,
        }
    }
}
