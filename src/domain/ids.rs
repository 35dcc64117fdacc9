//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Product stock-keeping unit - newtype for type safety.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    /// Create a new Sku from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the SKU as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Sku {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Sku {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Harmonized System customs classification code.
///
/// Stored without separators so prefix matching against duty rules is a
/// plain string comparison ("9504.50" and "950450" are the same code).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct HsCode(String);

impl HsCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(
            code.as_ref()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `prefix` (normalized the same way) is a prefix of this code.
    pub fn starts_with(&self, prefix: &HsCode) -> bool {
        self.0.starts_with(prefix.as_str())
    }
}

impl fmt::Display for HsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for HsCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for HsCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<HsCode> for String {
    fn from(code: HsCode) -> Self {
        code.0
    }
}

/// ISO 3166-1 country code, normalized to upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CountryCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for CountryCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

/// ISO 4217 currency code, normalized to upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    /// Japanese yen, the accounting currency for every cost component.
    pub fn jpy() -> Self {
        Self::new("JPY")
    }

    /// US dollar, the currency customs brackets are expressed in.
    pub fn usd() -> Self {
        Self::new("USD")
    }

    pub fn is_jpy(&self) -> bool {
        self.0 == "JPY"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Currency {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sku_new_and_as_str() {
        let sku = Sku::new("GADGET-XYZ-001");
        assert_eq!(sku.as_str(), "GADGET-XYZ-001");
        assert_eq!(format!("{}", sku), "GADGET-XYZ-001");
    }

    #[test]
    fn hs_code_strips_separators() {
        let code = HsCode::new("9504.50");
        assert_eq!(code.as_str(), "950450");
        assert!(code.starts_with(&HsCode::new("9504")));
        assert!(!code.starts_with(&HsCode::new("9503")));
    }

    #[test]
    fn country_code_is_upper_case() {
        assert_eq!(CountryCode::new(" us ").as_str(), "US");
    }

    #[test]
    fn currency_helpers() {
        assert!(Currency::new("jpy").is_jpy());
        assert!(!Currency::usd().is_jpy());
        assert_eq!(Currency::from("usd"), Currency::usd());
    }

    #[test]
    fn currency_deserializes_normalized() {
        let c: Currency = serde_json::from_str("\"eur\"").unwrap();
        assert_eq!(c.as_str(), "EUR");
    }
}
