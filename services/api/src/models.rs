//! API Models
//!
//! Request and response bodies of the HTTP surface, annotated with `utoipa`
//! for the OpenAPI document. They convert to and from the core pipeline types.

use serde::{Deserialize, Serialize};
use tutor_core::{
    AnswerMeta, AskRequest, AskResponse, BoardVariant, CurriculumRegistry, ValidationError,
    ValidationPolicy,
};
use utoipa::ToSchema;

fn default_class_level() -> String {
    "10".to_string()
}

#[derive(Deserialize, ToSchema, Debug)]
pub struct AskPayload {
    #[serde(default = "default_class_level")]
    #[schema(example = "10")]
    pub class_level: String,
    #[schema(example = "Mathematics")]
    pub subject: String,
    #[serde(default)]
    #[schema(example = "Quadratic Equations")]
    pub chapter: String,
    #[schema(example = "Solve x^2-5x+6=0")]
    pub question: String,
}

impl From<AskPayload> for AskRequest {
    fn from(payload: AskPayload) -> Self {
        AskRequest {
            class_level: payload.class_level,
            subject: payload.subject,
            chapter: payload.chapter,
            question: payload.question,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct AnswerMetaBody {
    pub class_level: String,
    pub subject: String,
    pub chapter: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub board: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct AnswerResponse {
    #[schema(example = "x = 2 or x = 3")]
    pub answer: String,
    pub meta: AnswerMetaBody,
}

impl From<AskResponse> for AnswerResponse {
    fn from(response: AskResponse) -> Self {
        let AnswerMeta {
            class_level,
            subject,
            chapter,
            board,
        } = response.meta;
        Self {
            answer: response.answer,
            meta: AnswerMetaBody {
                class_level,
                subject,
                chapter,
                board,
            },
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct SubjectBody {
    pub subject: String,
    pub chapters: Vec<String>,
}

/// The active board's curriculum, for populating subject and chapter pickers.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct CurriculumResponse {
    #[schema(example = "ap_ssc")]
    pub board: String,
    #[schema(example = "AP SSC")]
    pub board_name: String,
    #[schema(example = "strict")]
    pub validation_policy: String,
    pub subjects: Vec<SubjectBody>,
}

impl CurriculumResponse {
    pub fn new(board: BoardVariant, policy: ValidationPolicy, registry: &CurriculumRegistry) -> Self {
        Self {
            board: board.key().to_string(),
            board_name: board.display_name().to_string(),
            validation_policy: policy.name().to_string(),
            subjects: registry
                .entries(board)
                .iter()
                .map(|entry| SubjectBody {
                    subject: entry.subject.clone(),
                    chapters: entry.chapters.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub allowed_subjects: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub suggestion: Option<String>,
}

impl ErrorResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            allowed_subjects: None,
            suggestion: None,
        }
    }
}

impl From<&ValidationError> for ErrorResponse {
    fn from(err: &ValidationError) -> Self {
        Self {
            message: err.to_string(),
            allowed_subjects: err.allowed_subjects().map(<[String]>::to_vec),
            suggestion: err.suggestion().map(str::to_string),
        }
    }
}
