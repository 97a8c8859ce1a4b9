use std::path::Path;

use tracing::debug;

use crate::{Error, ErrorContext, ErrorDetail, product::Product};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSyntax {
    Yaml,
    Json,
}

impl DocumentSyntax {
    /// `.yaml` and `.yml` are YAML; everything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    pub products: Vec<Product>,
}

impl Catalog {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let context = ErrorContext::new(path.to_owned());
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| context.error(ErrorDetail::ReadDocument(e)))?;
        let catalog = Self::parse(&content, DocumentSyntax::from_path(path))
            .map_err(|detail| context.error(detail))?;
        debug!(path = %path.display(), products = catalog.products.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Accepts either a bare product list or `{ products: [...] }`.
    pub fn parse(content: &str, syntax: DocumentSyntax) -> Result<Self, ErrorDetail> {
        let document: serde_json::Value = match syntax {
            DocumentSyntax::Yaml => serde_yaml::from_str(content).map_err(ErrorDetail::ParseYaml)?,
            DocumentSyntax::Json => serde_json::from_str(content).map_err(ErrorDetail::ParseJson)?,
        };
        let products = match document {
            serde_json::Value::Array(_) => document,
            serde_json::Value::Object(mut fields) if fields.contains_key("products") => fields
                .remove("products")
                .unwrap_or(serde_json::Value::Null),
            got => {
                return Err(ErrorDetail::TypeMismatch {
                    expected: "product list",
                    got,
                });
            }
        };
        let products = serde_json::from_value(products).map_err(ErrorDetail::InvalidProduct)?;
        Ok(Self { products })
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }
}
