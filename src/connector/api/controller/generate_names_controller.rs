use anyhow::Result;

use crate::application::ProductInput;
use crate::domain::{NamingResult, Preferences, ProductRef};

use super::super::Container;

pub struct GenerateNamesController<'a> {
    container: &'a Container,
}

impl<'a> GenerateNamesController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn generate(&self, product: String, preferences: Preferences) -> Result<String> {
        let product_ref = ProductRef::parse(&product)?;
        let reply = self
            .container
            .generate_names_use_case()
            .execute(ProductInput::Reference(product_ref), preferences)
            .await?;

        match reply.to_result() {
            Ok(result) => Ok(format_result(&result)),
            // Shape is not enforced; show whatever came back.
            Err(_) => Ok(serde_json::to_string_pretty(reply.as_json())?),
        }
    }
}

fn format_result(result: &NamingResult) -> String {
    let mut out = String::new();

    let analysis = &result.current_name_analysis;
    if !analysis.strengths.is_empty() || !analysis.weaknesses.is_empty() {
        out.push_str("Current name\n");
        for s in &analysis.strengths {
            out.push_str(&format!("  + {}\n", s));
        }
        for w in &analysis.weaknesses {
            out.push_str(&format!("  - {}\n", w));
        }
        out.push('\n');
    }

    if result.suggestions.is_empty() {
        out.push_str("No suggestions returned.");
        return out;
    }

    out.push_str(&format!("Suggestions ({}):\n", result.suggestions.len()));
    for (i, suggestion) in result.suggestions.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, suggestion.name));
        if !suggestion.reasoning.is_empty() {
            out.push_str(&format!("   {}\n", suggestion.reasoning));
        }
    }

    out.trim_end().to_string()
}
