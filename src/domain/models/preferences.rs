use serde::{Deserialize, Serialize};

/// Desired length of the suggested names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum NameLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl NameLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            NameLength::Short => "short",
            NameLength::Medium => "medium",
            NameLength::Long => "long",
        }
    }

    /// Anything other than `short` or `medium` is treated as `long`.
    pub fn from_name(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "short" => NameLength::Short,
            "medium" => NameLength::Medium,
            _ => NameLength::Long,
        }
    }
}

impl From<String> for NameLength {
    fn from(s: String) -> Self {
        Self::from_name(&s)
    }
}

fn default_true() -> bool {
    true
}

/// Seller choices that shape the generated names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default = "default_true")]
    pub include_brand: bool,
    #[serde(default = "default_true")]
    pub include_category: bool,
    #[serde(default = "default_true")]
    pub include_features: bool,
    #[serde(default)]
    pub name_length: NameLength,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            include_brand: true,
            include_category: true,
            include_features: true,
            name_length: NameLength::default(),
        }
    }
}

impl Preferences {
    pub fn with_brand(mut self, include: bool) -> Self {
        self.include_brand = include;
        self
    }

    pub fn with_category(mut self, include: bool) -> Self {
        self.include_category = include;
        self
    }

    pub fn with_features(mut self, include: bool) -> Self {
        self.include_features = include;
        self
    }

    pub fn with_name_length(mut self, length: NameLength) -> Self {
        self.name_length = length;
        self
    }
}
