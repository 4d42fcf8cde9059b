//! Bodies forwarded to the AI backend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AiTaskRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 2000))]
    pub prompt: String,
    pub business_id: Option<i32>,
    /// Number of suggestions to ask for.
    #[serde(default = "default_task_count")]
    #[validate(range(min = 1, max = 20))]
    pub count: u8,
    /// Persist the suggestions as tasks owned by the caller.
    #[serde(default, skip_serializing)]
    pub save: bool,
}

fn default_task_count() -> u8 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AiStudyRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 500))]
    pub topic: String,
    pub level: Option<String>,
    #[validate(length(max = 2000))]
    pub question: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AiTranslateRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 10000))]
    pub text: String,
    pub source_lang: Option<String>,
    #[serde(default = "default_target_lang")]
    #[validate(length(min = 2, max = 10))]
    pub target_lang: String,
}

fn default_target_lang() -> String {
    "en".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AiSeoArticleRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 500))]
    pub keywords: String,
    pub title: Option<String>,
    pub tone: Option<String>,
    #[validate(range(min = 200, max = 10000))]
    pub length: Option<u32>,
}

/// One task suggestion in the backend's `{ "tasks": [...] }` answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedTasks {
    #[serde(default)]
    pub tasks: Vec<GeneratedTask>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use validator::Validate;

    use super::*;

    #[test]
    fn task_request_defaults_and_hides_save_flag() {
        let request: AiTaskRequest =
            serde_json::from_value(json!({ "prompt": "新規出店の準備", "save": true })).unwrap();
        assert_eq!(request.count, 5);
        assert!(request.save);
        let forwarded = serde_json::to_value(&request).unwrap();
        assert!(forwarded.get("save").is_none());
    }

    #[test]
    fn translate_request_needs_text() {
        let request: AiTranslateRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request.target_lang, "en");
        assert!(request.validate().is_err());
    }
}
