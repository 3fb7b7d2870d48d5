//! Prompt text for the naming model.
//!
//! The prompt is Persian because the sellers and the marketplace are; the
//! model is asked to answer in a fixed JSON shape that
//! [`super::parse_naming_reply`] understands.

use crate::domain::{Attribute, AttributeGroup, NameLength, Preferences, ProductInfo};

/// Sampling temperature for every naming request.
pub const NAMING_TEMPERATURE: f32 = 0.7;

/// Number of names the model is asked for. Not enforced on the reply.
pub const SUGGESTION_COUNT: usize = 5;

pub const SYSTEM_PROMPT: &str = "شما یک متخصص نام‌گذاری محصولات هستید که به فروشندگان آنلاین کمک می‌کنید نام‌های مناسب و جذاب برای محصولاتشان انتخاب کنند. پاسخ شما باید دقیقاً در قالب JSON مشخص شده باشد، بدون هیچ کد markdown یا توضیح اضافه.";

const NO_BRAND: &str = "ندارد";

const GUIDELINES: [&str; 4] = [
    "از ویژگی‌های مهم و متمایزکننده محصول استفاده کنید (مثل جنس، رنگ، سایز)",
    "اگر محصول کاربرد خاصی دارد (مثل مناسب برای دانشگاه)، می‌توانید از آن در نام استفاده کنید",
    "اگر محصول ویژگی خاصی در نگهداری دارد، می‌تواند در نام‌گذاری مفید باشد",
    "برای محصولات با چند رنگ یا سایز، می‌توانید از عبارت \"تنوع\" یا \"چند رنگ\" استفاده کنید",
];

const REPLY_SHAPE: &str = r#"{
  "currentNameAnalysis": {
    "strengths": ["نقطه قوت 1", "نقطه قوت 2"],
    "weaknesses": ["نقطه ضعف 1", "نقطه ضعف 2"]
  },
  "suggestions": [
    {
      "name": "نام پیشنهادی 1",
      "reasoning": "دلیل انتخاب این نام"
    }
  ]
}"#;

fn toggle(include: bool, with: &'static str, without: &'static str) -> &'static str {
    if include {
        with
    } else {
        without
    }
}

fn length_phrase(length: NameLength) -> &'static str {
    match length {
        NameLength::Short => "کوتاه",
        NameLength::Medium => "متوسط",
        NameLength::Long => "بلند",
    }
}

fn attribute_line(attr: &Attribute, with_unit: bool) -> String {
    let mut line = format!("- {}: {}", attr.title, attr.value_text());
    if with_unit {
        if let Some(unit) = attr.unit() {
            line.push_str(&format!(" ({unit})"));
        }
    }
    line
}

fn attribute_section(groups: &[AttributeGroup], flat: &[Attribute]) -> Vec<String> {
    if !groups.is_empty() {
        let mut lines = vec!["ویژگی‌های محصول:".to_string()];
        for group in groups {
            lines.push(format!("{}:", group.title));
            lines.extend(group.attributes.iter().map(|a| attribute_line(a, true)));
        }
        lines
    } else if !flat.is_empty() {
        let mut lines = vec!["ویژگی‌ها:".to_string()];
        lines.extend(flat.iter().map(|a| attribute_line(a, false)));
        lines
    } else {
        Vec::new()
    }
}

/// Render the user turn for a naming request. Same input, same text.
///
/// Grouped attributes are used when present; flat attributes only when there
/// are no groups.
pub fn render_naming_prompt(product: &ProductInfo, preferences: &Preferences) -> String {
    let mut lines = vec![
        format!("لطفاً {SUGGESTION_COUNT} نام مناسب برای یک محصول با مشخصات زیر پیشنهاد دهید:"),
        String::new(),
        format!("نام فعلی: {}", product.title),
        format!("توضیحات: {}", product.description),
        format!("دسته‌بندی: {}", product.category.display_path()),
        format!("برند: {}", product.brand().unwrap_or(NO_BRAND)),
        String::new(),
    ];

    let attributes = attribute_section(&product.attribute_groups, &product.attributes);
    if !attributes.is_empty() {
        lines.extend(attributes);
        lines.push(String::new());
    }

    lines.push("ترجیحات نام‌گذاری:".to_string());
    lines.push(format!(
        "- {}",
        toggle(preferences.include_brand, "شامل نام برند", "بدون نام برند")
    ));
    lines.push(format!(
        "- {}",
        toggle(preferences.include_category, "شامل دسته‌بندی", "بدون دسته‌بندی")
    ));
    lines.push(format!(
        "- {}",
        toggle(
            preferences.include_features,
            "شامل ویژگی‌های اصلی",
            "بدون ویژگی‌های اصلی"
        )
    ));
    lines.push(format!("- طول نام: {}", length_phrase(preferences.name_length)));
    lines.push(String::new());

    lines.push("راهنمایی برای نام‌گذاری:".to_string());
    lines.extend(
        GUIDELINES
            .iter()
            .enumerate()
            .map(|(i, g)| format!("{}. {g}", i + 1)),
    );
    lines.push(String::new());

    lines.push("همچنین برای نام فعلی محصول، نقاط قوت و ضعف آن را تحلیل کنید.".to_string());
    lines.push(String::new());
    lines.push(
        "پاسخ را دقیقاً در قالب JSON زیر برگردانید، بدون هیچ توضیح اضافه یا کد markdown:"
            .to_string(),
    );
    lines.push(REPLY_SHAPE.to_string());

    lines.join("\n")
}
