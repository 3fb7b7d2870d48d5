use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::DomainError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameSuggestion {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub reasoning: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameAnalysis {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
}

/// Typed view of a model reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamingResult {
    #[serde(default)]
    pub current_name_analysis: NameAnalysis,
    #[serde(default)]
    pub suggestions: Vec<NameSuggestion>,
}

/// The model's JSON reply, kept exactly as parsed.
///
/// The shape (`currentNameAnalysis` plus five `suggestions`) is requested in
/// the prompt but not enforced; callers receive whatever the model produced.
#[derive(Debug, Clone, PartialEq)]
pub struct NamingReply(Value);

impl NamingReply {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    pub fn into_json(self) -> Value {
        self.0
    }

    pub fn suggestion_count(&self) -> usize {
        self.0
            .get("suggestions")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    pub fn to_result(&self) -> Result<NamingResult, DomainError> {
        serde_json::from_value(self.0.clone())
            .map_err(|e| DomainError::parse(format!("reply does not match naming shape: {e}")))
    }
}
