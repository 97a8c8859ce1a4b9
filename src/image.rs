//! Product image collections.
//!
//! A product carries its images either as structured records (with cover flag
//! and display order) or, in older payloads, as a plain list of URLs. Both are
//! represented by [`ProductImages`]; the shape is decided once, when the
//! payload is deserialized.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    #[serde(default, deserialize_with = "loose_id")]
    pub id: String,
    #[serde(default, deserialize_with = "loose_id")]
    pub product_id: String,
    pub image_path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_cover: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_order: i64,
}

/// Ids arrive as strings or numbers depending on the backend.
fn loose_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(id) => id,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProductImages {
    /// Legacy payloads: bare image URLs.
    Paths(Vec<String>),
    Records(Vec<ProductImage>),
}

impl<'de> Deserialize<'de> for ProductImages {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items = Vec::<serde_json::Value>::deserialize(deserializer)?;
        let structured = items
            .first()
            .and_then(serde_json::Value::as_object)
            .is_some_and(|first| first.contains_key("imagePath"));
        if structured {
            let records = items
                .into_iter()
                .filter_map(|item| match serde_json::from_value::<ProductImage>(item) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!(%e, "skip malformed image record");
                        None
                    }
                })
                .collect();
            Ok(Self::Records(records))
        } else {
            let paths = items
                .into_iter()
                .filter_map(|item| match item {
                    serde_json::Value::String(path) => Some(path),
                    _ => None,
                })
                .collect();
            Ok(Self::Paths(paths))
        }
    }
}

fn is_blank(path: &str) -> bool {
    path.trim().is_empty()
}

impl ProductImages {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Paths(paths) => paths.is_empty(),
            Self::Records(records) => records.is_empty(),
        }
    }

    /// Image URLs in presentation order.
    ///
    /// Records are ordered by `display_order`; among records sharing an order
    /// the cover image goes first, and the input order is kept otherwise.
    /// Blank legacy entries are dropped.
    pub fn urls(&self) -> Vec<&str> {
        match self {
            Self::Paths(paths) => paths
                .iter()
                .map(String::as_str)
                .filter(|path| !is_blank(path))
                .collect(),
            Self::Records(records) => {
                let mut sorted = records.iter().collect::<Vec<_>>();
                sorted.sort_by(|a, b| {
                    a.display_order
                        .cmp(&b.display_order)
                        .then_with(|| b.is_cover.cmp(&a.is_cover))
                });
                sorted
                    .into_iter()
                    .map(|record| record.image_path.as_str())
                    .collect()
            }
        }
    }

    /// The first cover-flagged record wins; without one, the record with the
    /// lowest display order is used.
    pub fn cover(&self) -> Option<&str> {
        match self {
            Self::Paths(paths) => paths
                .iter()
                .map(String::as_str)
                .find(|path| !is_blank(path)),
            Self::Records(records) => records
                .iter()
                .find(|record| record.is_cover)
                .or_else(|| records.iter().min_by_key(|record| record.display_order))
                .map(|record| record.image_path.as_str()),
        }
    }
}

pub fn list_image_urls(images: Option<&ProductImages>) -> Vec<&str> {
    images.map(ProductImages::urls).unwrap_or_default()
}

pub fn cover_image_url(images: Option<&ProductImages>) -> Option<&str> {
    images.and_then(ProductImages::cover)
}

/// Categories and brands only carry plain URLs; the first one is the cover.
pub fn category_cover_image_url(images: Option<&[String]>) -> Option<&str> {
    images.and_then(<[String]>::first).map(String::as_str)
}
