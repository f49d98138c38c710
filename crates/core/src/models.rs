use serde::{Deserialize, Serialize};

fn default_class_level() -> String {
    "10".to_string()
}

/// A student's question together with the curriculum position it belongs to.
///
/// Constructed once per incoming call and dropped when the pipeline finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    #[serde(default = "default_class_level")]
    pub class_level: String,
    pub subject: String,
    #[serde(default)]
    pub chapter: String,
    pub question: String,
}

impl AskRequest {
    pub fn new(
        subject: impl Into<String>,
        chapter: impl Into<String>,
        question: impl Into<String>,
    ) -> Self {
        Self {
            class_level: default_class_level(),
            subject: subject.into(),
            chapter: chapter.into(),
            question: question.into(),
        }
    }
}

/// Curriculum context echoed back alongside every answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerMeta {
    pub class_level: String,
    pub subject: String,
    pub chapter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<String>,
}

/// The normalized answer returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    pub meta: AnswerMeta,
}
