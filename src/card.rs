//! Product card view models.

use serde::{Deserialize, Serialize};

use crate::{
    config::StorefrontConfig,
    media,
    pricing::Pricing,
    product::Product,
    translation::{self, DEFAULT_LANG},
    warn_product,
};

pub const UNNAMED_PRODUCT: &str = "Unnamed Product";
pub const DEFAULT_THEME_COLOR: &str = "#000000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CardVariant {
    #[default]
    Classic,
    Zoommer,
    Alta,
    AltaHorizontal,
}

impl CardVariant {
    /// Cards per row on the widest breakpoint.
    pub fn default_columns(self) -> usize {
        match self {
            Self::AltaHorizontal => 1,
            Self::Classic | Self::Zoommer | Self::Alta => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CardSize {
    #[default]
    Default,
    Compact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardOptions {
    pub variant: CardVariant,
    pub size: CardSize,
    pub theme_color: String,
    pub lang: String,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            variant: CardVariant::default(),
            size: CardSize::default(),
            theme_color: DEFAULT_THEME_COLOR.into(),
            lang: DEFAULT_LANG.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub id: String,
    pub variant: CardVariant,
    pub size: CardSize,
    pub theme_color: String,
    pub lang: String,
    pub href: String,
    pub title: String,
    pub image_url: Option<String>,
    pub image_urls: Vec<String>,
    pub unoptimized_image: bool,
    pub in_stock: bool,
    pub can_add_to_cart: bool,
    pub price: String,
    pub original_price: Option<String>,
    pub discount_percent: u32,
    pub is_new_arrival: bool,
}

impl ProductCard {
    pub fn build(product: &Product, options: &CardOptions, config: &StorefrontConfig) -> Self {
        let lang = options.lang.as_str();
        let default_name = product.name.as_deref().filter(|name| !name.is_empty());
        let title = match default_name {
            Some(name) => {
                translation::resolve_field(product.translations.as_ref(), "Name", lang, name)
            }
            None => {
                let title = translation::resolve_field(
                    product.translations.as_ref(),
                    "Name",
                    lang,
                    "",
                );
                if title.is_empty() {
                    warn_product!("{}: no name in {lang} and no default name", product.id);
                    UNNAMED_PRODUCT
                } else {
                    title
                }
            }
        };

        let image_urls = product
            .image_urls()
            .into_iter()
            .filter_map(|path| media::resolve_image_url(path, config.image_base_url.as_ref()))
            .collect::<Vec<_>>();
        let image_url = image_urls.first().cloned();
        match &image_url {
            None => warn_product!("{}: no image", product.id),
            Some(url) if !media::is_allowed(url, &config.remote_patterns) => {
                warn_product!("{}: image host not allowed: {url}", product.id)
            }
            Some(_) => {}
        }

        let in_stock = product.in_stock();
        let pricing = Pricing::evaluate(product.price, product.discount_price);
        Self {
            id: product.id.clone(),
            variant: options.variant,
            size: options.size,
            theme_color: options.theme_color.clone(),
            lang: lang.to_owned(),
            href: format!("/{lang}/product/{}", product.handle()),
            title: title.to_owned(),
            unoptimized_image: image_url.as_deref().is_some_and(media::is_s3_url),
            image_url,
            image_urls,
            in_stock,
            can_add_to_cart: in_stock && !product.is_coming_soon.unwrap_or(false),
            price: config.price_format.format(pricing.display_price),
            original_price: pricing
                .original_price
                .map(|price| config.price_format.format(price)),
            discount_percent: pricing.discount_percent,
            is_new_arrival: product.is_new_arrival.unwrap_or(false),
        }
    }
}
