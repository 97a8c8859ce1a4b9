use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pricing {
    pub has_discount: bool,
    pub display_price: f64,
    pub original_price: Option<f64>,
    pub discount_percent: u32,
}

impl Pricing {
    /// A discount only counts when it is non-zero and below a positive list
    /// price.
    pub fn evaluate(price: f64, discount_price: Option<f64>) -> Self {
        match discount_price {
            Some(discount) if price > 0.0 && discount != 0.0 && discount < price => {
                let percent = ((price - discount) / price * 100.0).round().max(0.0);
                Self {
                    has_discount: true,
                    display_price: discount,
                    original_price: Some(price),
                    discount_percent: percent as u32,
                }
            }
            _ => Self {
                has_discount: false,
                display_price: price,
                original_price: None,
                discount_percent: 0,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    Before,
    #[default]
    After,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PriceFormat {
    pub symbol: String,
    pub position: SymbolPosition,
    pub decimals: usize,
    pub thousands_separator: String,
}

impl Default for PriceFormat {
    fn default() -> Self {
        Self {
            symbol: "₾".into(),
            position: SymbolPosition::After,
            decimals: 2,
            thousands_separator: ",".into(),
        }
    }
}

impl PriceFormat {
    pub fn format(&self, amount: f64) -> String {
        let digits = format!("{:.*}", self.decimals, amount.abs());
        let (integer, fraction) = match digits.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (digits.as_str(), None),
        };
        let integer = integer
            .as_bytes()
            .rchunks(3)
            .rev()
            .map(|group| String::from_utf8_lossy(group))
            .join(&self.thousands_separator);
        // no sign when the rounded amount is zero
        let negative = amount < 0.0 && digits.bytes().any(|b| b.is_ascii_digit() && b != b'0');
        let sign = if negative { "-" } else { "" };
        let number = match fraction {
            Some(fraction) => format!("{sign}{integer}.{fraction}"),
            None => format!("{sign}{integer}"),
        };
        match (self.position, self.symbol.is_empty()) {
            (_, true) => number,
            (SymbolPosition::Before, false) => format!("{}{number}", self.symbol),
            (SymbolPosition::After, false) => format!("{number} {}", self.symbol),
        }
    }
}
