use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::DomainError;

pub const MISSING_PRODUCT_FIELDS: &str = "عنوان، توضیحات و دسته‌بندی محصول الزامی است";

/// Three-level marketplace category. Missing ancestors are empty strings.
///
/// Accepts either a plain string (taken as the leaf) or a `{main, sub, leaf}`
/// object on input; always serializes as the object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CategoryRepr")]
pub struct CategoryPath {
    pub main: String,
    pub sub: String,
    pub leaf: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryRepr {
    Leaf(String),
    Path(CategoryFields),
}

#[derive(Deserialize)]
struct CategoryFields {
    #[serde(default)]
    main: String,
    #[serde(default)]
    sub: String,
    #[serde(default)]
    leaf: String,
}

impl From<CategoryRepr> for CategoryPath {
    fn from(repr: CategoryRepr) -> Self {
        match repr {
            CategoryRepr::Leaf(leaf) => Self::leaf_only(leaf),
            CategoryRepr::Path(f) => Self::new(f.main, f.sub, f.leaf),
        }
    }
}

impl CategoryPath {
    pub fn new(main: impl Into<String>, sub: impl Into<String>, leaf: impl Into<String>) -> Self {
        Self {
            main: main.into(),
            sub: sub.into(),
            leaf: leaf.into(),
        }
    }

    pub fn leaf_only(leaf: impl Into<String>) -> Self {
        Self::new("", "", leaf)
    }

    pub fn is_blank(&self) -> bool {
        self.segments().next().is_none()
    }

    fn segments(&self) -> impl Iterator<Item = &str> {
        [&self.main, &self.sub, &self.leaf]
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    /// Non-empty segments from the root down, e.g. `پوشاک > کیف > کیف دستی`.
    pub fn display_path(&self) -> String {
        self.segments().collect::<Vec<_>>().join(" > ")
    }
}

/// A product photo. Plain URL strings are accepted and used for both sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ImageRepr")]
pub struct ProductImage {
    pub original: String,
    pub large: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ImageRepr {
    Url(String),
    Sized {
        #[serde(default)]
        original: String,
        #[serde(default, alias = "lg")]
        large: String,
    },
}

impl From<ImageRepr> for ProductImage {
    fn from(repr: ImageRepr) -> Self {
        match repr {
            ImageRepr::Url(url) => Self::new(url.clone(), url),
            ImageRepr::Sized { original, large } => Self::new(original, large),
        }
    }
}

impl ProductImage {
    pub fn new(original: impl Into<String>, large: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            large: large.into(),
        }
    }
}

/// A single product attribute. Fields beyond `title` and `value` (id, unit,
/// type, required, ...) are kept verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub value: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Attribute {
    pub fn new(title: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            extra: Map::new(),
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.extra
            .insert("unit".to_string(), Value::String(unit.into()));
        self
    }

    pub fn unit(&self) -> Option<&str> {
        self.extra
            .get("unit")
            .and_then(Value::as_str)
            .filter(|u| !u.trim().is_empty())
    }

    /// The value as prompt text: strings verbatim, `null` as empty, other
    /// scalars as their JSON text.
    pub fn value_text(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeGroup {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AttributeGroup {
    pub fn new(title: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            title: title.into(),
            attributes,
            extra: Map::new(),
        }
    }
}

/// Normalized product record, either built by the marketplace fetcher or
/// validated from caller input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub title: String,
    pub description: String,
    pub category: CategoryPath,
    #[serde(rename = "brandName", default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub attribute_groups: Vec<AttributeGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl ProductInfo {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: CategoryPath,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category,
            brand_name: None,
            attribute_groups: Vec::new(),
            attributes: Vec::new(),
            images: Vec::new(),
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand_name = Some(brand.into());
        self
    }

    pub fn with_attribute_groups(mut self, groups: Vec<AttributeGroup>) -> Self {
        self.attribute_groups = groups;
        self
    }

    pub fn with_attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_images(mut self, images: Vec<ProductImage>) -> Self {
        self.images = images;
        self
    }

    /// Brand name if one is set and non-blank.
    pub fn brand(&self) -> Option<&str> {
        self.brand_name
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
    }

    /// Same required-field rule as [`ProductDraft::into_product`], for
    /// records that did not come from a draft.
    pub fn ensure_complete(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty()
            || self.description.trim().is_empty()
            || self.category.is_blank()
        {
            return Err(DomainError::validation(MISSING_PRODUCT_FIELDS));
        }
        Ok(())
    }
}

/// Product data as sent by a client. Every field is optional here;
/// [`ProductDraft::into_product`] enforces the required ones.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductDraft {
    #[serde(default)]
    pub title: Option<String>,
    /// Older clients send the current name as `name`.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryPath>,
    #[serde(default, rename = "brandName")]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub attribute_groups: Option<Vec<AttributeGroup>>,
    #[serde(default)]
    pub attributes: Option<Vec<Attribute>>,
    #[serde(default)]
    pub images: Option<Vec<ProductImage>>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ProductDraft {
    /// Validate required fields (title or name, description, category).
    pub fn into_product(self) -> Result<ProductInfo, DomainError> {
        let title = non_blank(self.title).or_else(|| non_blank(self.name));
        let description = non_blank(self.description);
        let category = self.category.filter(|c| !c.is_blank());

        let (Some(title), Some(description), Some(category)) = (title, description, category)
        else {
            return Err(DomainError::validation(MISSING_PRODUCT_FIELDS));
        };

        Ok(ProductInfo {
            title,
            description,
            category,
            brand_name: non_blank(self.brand_name),
            attribute_groups: self.attribute_groups.unwrap_or_default(),
            attributes: self.attributes.unwrap_or_default(),
            images: self.images.unwrap_or_default(),
        })
    }
}
