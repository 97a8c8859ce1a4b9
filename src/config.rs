use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use url::Url;

use crate::{
    Error, ErrorContext, ErrorDetail,
    grid::{self, GridConfig},
    media::RemotePattern,
    pricing::PriceFormat,
    translation::DEFAULT_LANG,
};

const MAX_DECIMALS: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("image_base_url must be an http(s) URL: {0}")]
    ImageBaseUrl(Url),
    #[error("grid {grid}: invalid theme color {color:?}")]
    ThemeColor { grid: String, color: String },
    #[error("price_format.decimals must not exceed 6, got {0}")]
    Decimals(usize),
    #[error("default_lang must not be empty")]
    EmptyDefaultLang,
}

fn default_lang() -> String {
    DEFAULT_LANG.into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub image_base_url: Option<Url>,
    #[serde(default = "default_lang")]
    pub default_lang: String,
    #[serde(default)]
    pub price_format: PriceFormat,
    #[serde(default)]
    pub remote_patterns: Vec<RemotePattern>,
    #[serde(default = "grid::default_grids")]
    pub grids: IndexMap<String, GridConfig>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            image_base_url: None,
            default_lang: default_lang(),
            price_format: PriceFormat::default(),
            remote_patterns: Vec::new(),
            grids: grid::default_grids(),
        }
    }
}

fn is_hex_color(color: &str) -> bool {
    color
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

impl StorefrontConfig {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let context = ErrorContext::new(path.to_owned());
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| context.error(ErrorDetail::ReadDocument(e)))?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| context.error(ErrorDetail::ParseYaml(e)))?;
        config
            .validate()
            .map_err(|e| context.error(ErrorDetail::InvalidConfig(e)))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(base) = &self.image_base_url
            && !matches!(base.scheme(), "http" | "https")
        {
            return Err(ValidationError::ImageBaseUrl(base.clone()));
        }
        if self.default_lang.trim().is_empty() {
            return Err(ValidationError::EmptyDefaultLang);
        }
        if self.price_format.decimals > MAX_DECIMALS {
            return Err(ValidationError::Decimals(self.price_format.decimals));
        }
        for (name, grid) in &self.grids {
            if !is_hex_color(&grid.theme_color) {
                return Err(ValidationError::ThemeColor {
                    grid: name.clone(),
                    color: grid.theme_color.clone(),
                });
            }
        }
        Ok(())
    }
}
