//! Entity translation tables.
//!
//! Backends ship translations as `language -> field -> text`. Field names are
//! not cased consistently across languages, so lookups fall back to a
//! case-insensitive match when the exact key is missing.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::trace;

pub type FieldMap = IndexMap<String, String>;

/// `{ "en": { "Name": "..." }, "ka": { "Name": "..." } }`
pub type EntityTranslations = IndexMap<String, FieldMap>;

pub const DEFAULT_LANG: &str = "en";

/// One field's text per language. Always holds an `en` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedText(IndexMap<String, String>);

impl Default for LocalizedText {
    fn default() -> Self {
        let mut texts = IndexMap::new();
        texts.insert(DEFAULT_LANG.to_owned(), String::new());
        Self(texts)
    }
}

impl LocalizedText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn en(&self) -> &str {
        self.get(DEFAULT_LANG).unwrap_or_default()
    }

    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0.get(lang).map(String::as_str)
    }

    pub fn set(&mut self, lang: impl Into<String>, text: impl Into<String>) {
        self.0.insert(lang.into(), text.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(lang, text)| (lang.as_str(), text.as_str()))
    }
}

impl From<IndexMap<String, String>> for LocalizedText {
    fn from(texts: IndexMap<String, String>) -> Self {
        let mut localized = Self::default();
        localized.0.extend(texts);
        localized
    }
}

impl<L: Into<String>, T: Into<String>> FromIterator<(L, T)> for LocalizedText {
    fn from_iter<I: IntoIterator<Item = (L, T)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(lang, text)| (lang.into(), text.into()))
            .collect::<IndexMap<String, String>>()
            .into()
    }
}

impl<'de> Deserialize<'de> for LocalizedText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        IndexMap::<String, String>::deserialize(deserializer).map(Into::into)
    }
}

/// Reads a translation table, dropping `null` texts and languages instead of
/// rejecting the whole entity. Numbers and booleans are kept as their text.
pub fn deserialize_translations<'de, D>(
    deserializer: D,
) -> Result<Option<EntityTranslations>, D::Error>
where
    D: Deserializer<'de>,
{
    type RawTable = IndexMap<String, Option<IndexMap<String, serde_json::Value>>>;
    let Some(raw) = Option::<RawTable>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let translations = raw
        .into_iter()
        .filter_map(|(lang, fields)| Some((lang, fields?)))
        .map(|(lang, fields)| {
            let fields = fields
                .into_iter()
                .filter_map(|(key, value)| match value {
                    serde_json::Value::String(text) => Some((key, text)),
                    serde_json::Value::Number(_) | serde_json::Value::Bool(_) => {
                        Some((key, value.to_string()))
                    }
                    _ => {
                        trace!(lang = lang.as_str(), key = key.as_str(), "skip non-text field");
                        None
                    }
                })
                .collect::<FieldMap>();
            (lang, fields)
        })
        .collect();
    Ok(Some(translations))
}

fn lookup<'t>(fields: &'t FieldMap, field: &str) -> Option<&'t str> {
    if let Some(value) = fields.get(field) {
        return Some(value.as_str());
    }
    let lower = field.to_lowercase();
    let (key, value) = fields.iter().find(|(key, _)| key.to_lowercase() == lower)?;
    trace!(field, key = key.as_str(), "case-insensitive field match");
    Some(value.as_str())
}

/// Translated text of `field` in `lang`, or `fallback` when the table has no
/// non-empty value for it.
pub fn resolve_field<'a>(
    translations: Option<&'a EntityTranslations>,
    field: &str,
    lang: &str,
    fallback: &'a str,
) -> &'a str {
    translations
        .and_then(|translations| translations.get(lang))
        .and_then(|fields| lookup(fields, field))
        .filter(|value| !value.is_empty())
        .unwrap_or(fallback)
}

/// Collects one field across all languages of a table.
pub fn to_localized_text(translations: Option<&EntityTranslations>, field: &str) -> LocalizedText {
    let mut localized = LocalizedText::new();
    let Some(translations) = translations else {
        return localized;
    };
    for (lang, fields) in translations {
        if let Some(value) = lookup(fields, field) {
            localized.set(lang.as_str(), value);
        }
    }
    localized
}

/// Inverse of [`to_localized_text`] over several fields at once. Empty texts
/// are not written.
pub fn from_localized_fields<'a, I>(fields: I) -> EntityTranslations
where
    I: IntoIterator<Item = (&'a str, &'a LocalizedText)>,
{
    let mut translations = EntityTranslations::new();
    for (name, localized) in fields {
        for (lang, text) in localized.iter() {
            let entry = translations.entry(lang.to_owned()).or_default();
            if !text.is_empty() {
                entry.insert(name.to_owned(), text.to_owned());
            }
        }
    }
    translations
}

/// Lowercase-key index over one language's fields, for resolving many fields
/// against the same map.
pub struct FieldIndex<'t> {
    fields: &'t FieldMap,
    folded: HashMap<String, &'t str>,
}

impl<'t> FieldIndex<'t> {
    pub fn new(fields: &'t FieldMap) -> Self {
        let mut folded = HashMap::with_capacity(fields.len());
        for (key, value) in fields {
            folded.entry(key.to_lowercase()).or_insert(value.as_str());
        }
        Self { fields, folded }
    }

    pub fn get(&self, field: &str) -> Option<&'t str> {
        self.fields
            .get(field)
            .map(String::as_str)
            .or_else(|| self.folded.get(&field.to_lowercase()).copied())
    }

    /// Same contract as [`resolve_field`] for a single language.
    pub fn resolve<'a>(&self, field: &str, fallback: &'a str) -> &'a str
    where
        't: 'a,
    {
        self.get(field)
            .filter(|value| !value.is_empty())
            .unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use maplit::hashmap;

    use super::*;

    fn table(entries: &[(&str, &[(&str, &str)])]) -> EntityTranslations {
        entries
            .iter()
            .map(|(lang, fields)| {
                let fields = fields
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect::<FieldMap>();
                (lang.to_string(), fields)
            })
            .collect()
    }

    #[test]
    fn test_resolve_field_case_insensitive() {
        let translations = table(&[("en", &[("Name", "Widget")])]);
        assert_eq!(
            resolve_field(Some(&translations), "name", "en", "Fallback"),
            "Widget"
        );
        assert_eq!(
            resolve_field(Some(&translations), "Name", "ka", "Fallback"),
            "Fallback"
        );
    }

    #[test]
    fn test_resolve_field_prefers_exact_key() {
        let translations = table(&[("en", &[("name", "lower"), ("Name", "exact")])]);
        assert_eq!(
            resolve_field(Some(&translations), "Name", "en", "Fallback"),
            "exact"
        );
        assert_eq!(
            resolve_field(Some(&translations), "NAME", "en", "Fallback"),
            "lower"
        );
    }

    #[test]
    fn test_resolve_field_fallbacks() {
        let translations = table(&[("en", &[("Name", ""), ("Description", "Text")])]);
        assert_eq!(resolve_field(None, "Name", "en", "Fallback"), "Fallback");
        assert_eq!(
            resolve_field(Some(&translations), "Name", "en", "Fallback"),
            "Fallback"
        );
        assert_eq!(
            resolve_field(Some(&translations), "Sku", "en", "Fallback"),
            "Fallback"
        );
    }

    #[test]
    fn test_to_localized_text() {
        let translations = table(&[
            ("en", &[("Name", "Widget")]),
            ("ka", &[("name", "ვიჯეტი")]),
            ("de", &[("Description", "Beschreibung")]),
        ]);
        let localized = to_localized_text(Some(&translations), "Name");
        assert_eq!(
            localized,
            LocalizedText::from_iter([("en", "Widget"), ("ka", "ვიჯეტი")])
        );
        assert_eq!(localized.get("de"), None);
    }

    #[test]
    fn test_to_localized_text_keeps_empty_values() {
        let translations = table(&[("en", &[("Name", "Widget")]), ("ka", &[("name", "")])]);
        let localized = to_localized_text(Some(&translations), "Name");
        assert_eq!(localized.get("ka"), Some(""));
        assert_eq!(resolve_field(Some(&translations), "Name", "ka", "F"), "F");
    }

    #[test]
    fn test_deserialize_translations_skips_null() {
        #[derive(Deserialize)]
        struct Entity {
            #[serde(default, deserialize_with = "deserialize_translations")]
            translations: Option<EntityTranslations>,
        }
        let entity: Entity = serde_json::from_str(
            r#"{"translations":{"en":{"Name":"Widget","Description":null,"Stock":3},"ka":null}}"#,
        )
        .unwrap();
        assert_eq!(
            entity.translations,
            Some(table(&[("en", &[("Name", "Widget"), ("Stock", "3")])]))
        );
        let entity: Entity = serde_json::from_str(r#"{"translations":null}"#).unwrap();
        assert_eq!(entity.translations, None);
        let entity: Entity = serde_json::from_str("{}").unwrap();
        assert_eq!(entity.translations, None);
    }

    #[test]
    fn test_to_localized_text_seeds_en() {
        assert_eq!(to_localized_text(None, "Name").en(), "");
        let translations = table(&[("ka", &[("Name", "ვიჯეტი")])]);
        let localized = to_localized_text(Some(&translations), "Name");
        assert_eq!(localized.en(), "");
        assert_eq!(localized.get("ka"), Some("ვიჯეტი"));
    }

    #[test]
    fn test_from_localized_fields() {
        let name = LocalizedText::from_iter([("en", "Widget"), ("ka", "ვიჯეტი")]);
        let description = LocalizedText::from_iter([("en", "Desc"), ("ka", "")]);
        let translations =
            from_localized_fields([("Name", &name), ("Description", &description)]);
        assert_eq!(
            translations,
            table(&[
                ("en", &[("Name", "Widget"), ("Description", "Desc")]),
                ("ka", &[("Name", "ვიჯეტი")]),
            ])
        );
    }

    #[test]
    fn test_from_localized_fields_skips_empty_text() {
        let name = LocalizedText::new();
        let translations = from_localized_fields([("Name", &name)]);
        assert_eq!(translations.get("en").map(FieldMap::len), Some(0));
    }

    #[test]
    fn test_round_trip() {
        let name = LocalizedText::from_iter([("en", "Widget"), ("ka", "ვიჯეტი")]);
        let translations = from_localized_fields([("Name", &name)]);
        assert_eq!(to_localized_text(Some(&translations), "Name"), name);
    }

    #[test]
    fn test_field_index_matches_linear_lookup() {
        let fields = table(&[(
            "en",
            &[("Name", "Widget"), ("description", "Desc"), ("SKU", "")],
        )])
        .swap_remove("en")
        .unwrap();
        let index = FieldIndex::new(&fields);
        let expected = hashmap! {
            "Name" => "Widget",
            "name" => "Widget",
            "Description" => "Desc",
            "sku" => "Fallback",
            "Missing" => "Fallback",
        };
        for (field, value) in expected {
            assert_eq!(index.resolve(field, "Fallback"), value, "field {field}");
            assert_eq!(
                lookup(&fields, field)
                    .filter(|v| !v.is_empty())
                    .unwrap_or("Fallback"),
                value
            );
        }
    }

    #[test]
    fn test_deserialize_localized_text_adds_en() {
        let localized: LocalizedText = serde_json::from_str(r#"{"ka":"ვიჯეტი"}"#).unwrap();
        assert_eq!(localized.en(), "");
        assert_eq!(localized.get("ka"), Some("ვიჯეტი"));
    }
}
