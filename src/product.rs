//! Catalog payload as served by the storefront backend.

use serde::{Deserialize, Serialize};

use crate::{
    image::{self, ProductImages},
    translation::{self, EntityTranslations},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum StockStatus {
    InStock,
    OutOfStock,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Condition {
    New,
    Used,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

impl Brand {
    pub fn logo_url(&self) -> Option<&str> {
        image::category_cover_image_url(self.images.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetValue {
    pub id: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facet {
    pub id: String,
    pub name: String,
    pub display_type: String,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub facet_values: Vec<FacetValue>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub facets: Vec<Facet>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub meta_keywords: Option<String>,
    #[serde(default, deserialize_with = "translation::deserialize_translations")]
    pub translations: Option<EntityTranslations>,
}

impl Category {
    pub fn cover_image_url(&self) -> Option<&str> {
        image::category_cover_image_url(self.images.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFacetValue {
    pub facet_value_id: String,
    pub facet_name: String,
    pub facet_value: String,
    #[serde(default)]
    pub is_reachable: bool,
    #[serde(default)]
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub discount_price: Option<f64>,
    #[serde(default)]
    pub is_discount_percentage: Option<bool>,
    #[serde(default)]
    pub discount_value: Option<f64>,
    pub status: StockStatus,
    pub condition: Condition,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Option<ProductImages>,
    pub brand: Brand,
    pub category: Category,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_liquidated: Option<bool>,
    #[serde(default)]
    pub is_coming_soon: Option<bool>,
    #[serde(default)]
    pub is_new_arrival: Option<bool>,
    #[serde(default)]
    pub product_facet_values: Vec<ProductFacetValue>,
    #[serde(default)]
    pub product_group_id: Option<String>,
    #[serde(default)]
    pub product_additional_json: Option<String>,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub meta_keywords: Option<String>,
    #[serde(default, deserialize_with = "translation::deserialize_translations")]
    pub translations: Option<EntityTranslations>,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.status == StockStatus::InStock
    }

    /// Path segment used in product links; an empty slug falls back to the id.
    pub fn handle(&self) -> &str {
        self.slug
            .as_deref()
            .filter(|slug| !slug.is_empty())
            .unwrap_or(self.id.as_str())
    }

    pub fn image_urls(&self) -> Vec<&str> {
        image::list_image_urls(self.images.as_ref())
    }

    pub fn cover_image_url(&self) -> Option<&str> {
        image::cover_image_url(self.images.as_ref())
    }
}
