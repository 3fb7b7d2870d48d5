use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::DomainError;

pub const MISSING_PRODUCT_REF: &str = "شناسه محصول یا URL باسلام را وارد کنید";

static PRODUCT_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/product/([0-9]+)").expect("product path pattern is valid"));

/// A numeric marketplace product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductRef(String);

impl ProductRef {
    /// Accept a bare identifier. It must be all ASCII digits.
    pub fn from_id(id: &str) -> Result<Self, DomainError> {
        let id = id.trim();
        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::validation(MISSING_PRODUCT_REF));
        }
        Ok(Self(id.to_string()))
    }

    /// Extract the identifier from a `.../product/<digits>...` URL.
    pub fn from_url(url: &str) -> Option<Self> {
        PRODUCT_PATH
            .captures(url)
            .and_then(|c| c.get(1))
            .map(|m| Self(m.as_str().to_string()))
    }

    /// Resolve from request parameters. A non-empty `id` wins over `url`.
    pub fn resolve(id: Option<&str>, url: Option<&str>) -> Result<Self, DomainError> {
        if let Some(id) = id.filter(|v| !v.trim().is_empty()) {
            return Self::from_id(id);
        }

        url.filter(|v| !v.trim().is_empty())
            .and_then(Self::from_url)
            .ok_or_else(|| DomainError::validation(MISSING_PRODUCT_REF))
    }

    /// Accept either form, as typed on a command line.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        Self::from_id(input).or_else(|_| {
            Self::from_url(input).ok_or_else(|| DomainError::validation(MISSING_PRODUCT_REF))
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
