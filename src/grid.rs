//! Grids arrange a catalog into cards of a single variant.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    card::{CardOptions, CardSize, CardVariant, DEFAULT_THEME_COLOR, ProductCard},
    config::StorefrontConfig,
    product::Product,
    warning,
};

fn default_theme_color() -> String {
    DEFAULT_THEME_COLOR.into()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GridConfig {
    pub variant: CardVariant,
    #[serde(default = "default_theme_color")]
    pub theme_color: String,
    #[serde(default)]
    pub size: CardSize,
    #[serde(default)]
    pub lang: Option<String>,
    /// Defaults to the variant's column count.
    #[serde(default)]
    pub columns: Option<usize>,
}

impl GridConfig {
    pub fn new(variant: CardVariant, theme_color: impl Into<String>, size: CardSize) -> Self {
        Self {
            variant,
            theme_color: theme_color.into(),
            size,
            lang: None,
            columns: None,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
            .unwrap_or_else(|| self.variant.default_columns())
            .max(1)
    }
}

/// The grids shown on the storefront home page.
pub fn default_grids() -> IndexMap<String, GridConfig> {
    IndexMap::from([
        (
            "zoommer".to_owned(),
            GridConfig::new(CardVariant::Zoommer, "#CC6A4C", CardSize::Compact),
        ),
        (
            "alta".to_owned(),
            GridConfig::new(CardVariant::Alta, "#7A5AE0", CardSize::Compact),
        ),
        (
            "alta-horizontal".to_owned(),
            GridConfig::new(CardVariant::AltaHorizontal, "#7A5AE0", CardSize::Compact),
        ),
        (
            "classic".to_owned(),
            GridConfig::new(CardVariant::Classic, "#0f172a", CardSize::Compact),
        ),
    ])
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrangedCard {
    #[serde(flatten)]
    pub card: ProductCard,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrangedGrid {
    pub name: String,
    pub columns: usize,
    pub cards: Vec<ArrangedCard>,
}

impl ArrangedGrid {
    pub fn rows(&self) -> impl Iterator<Item = &[ArrangedCard]> {
        self.cards.chunks(self.columns.max(1))
    }

    pub fn warning_count(&self) -> usize {
        self.cards.iter().map(|card| card.warnings.len()).sum()
    }
}

pub struct Grid<'c> {
    pub name: &'c str,
    pub config: &'c GridConfig,
    pub storefront: &'c StorefrontConfig,
}

impl<'c> Grid<'c> {
    pub fn new(name: &'c str, config: &'c GridConfig, storefront: &'c StorefrontConfig) -> Self {
        Self {
            name,
            config,
            storefront,
        }
    }

    /// `lang` overrides the grid's own language, which overrides the
    /// storefront default.
    pub fn options(&self, lang: Option<&str>) -> CardOptions {
        let lang = lang
            .or(self.config.lang.as_deref())
            .unwrap_or(self.storefront.default_lang.as_str());
        CardOptions {
            variant: self.config.variant,
            size: self.config.size,
            theme_color: self.config.theme_color.clone(),
            lang: lang.to_owned(),
        }
    }

    /// One card per active product, in catalog order.
    pub async fn arrange(&self, products: &[Product], lang: Option<&str>) -> ArrangedGrid {
        let options = self.options(lang);
        let mut cards = Vec::with_capacity(products.len());
        for product in products {
            if product.is_active == Some(false) {
                debug!(grid = self.name, product = product.id.as_str(), "skip inactive product");
                continue;
            }
            let (card, warnings) = warning::collect_warnings(async {
                ProductCard::build(product, &options, self.storefront)
            })
            .await;
            cards.push(ArrangedCard { card, warnings });
        }
        let grid = ArrangedGrid {
            name: self.name.to_owned(),
            columns: self.config.columns(),
            cards,
        };
        info!(
            grid = self.name,
            lang = options.lang.as_str(),
            cards = grid.cards.len(),
            warnings = grid.warning_count(),
            "arranged grid"
        );
        grid
    }
}
