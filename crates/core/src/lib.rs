//! Board Tutor Core
//!
//! The question-answering pipeline behind the tutor API: curriculum lookup,
//! request validation, per-board prompt construction, the completion client
//! seam and answer normalization, tied together by `TutorPipeline`.

pub mod board;
pub mod completion;
pub mod curriculum;
pub mod error;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod prompt;
pub mod validator;

pub use board::{BoardVariant, ValidationPolicy};
pub use completion::{CompletionClient, CompletionResult};
pub use curriculum::CurriculumRegistry;
pub use error::{AskError, UpstreamFailure, ValidationError};
pub use models::{AnswerMeta, AskRequest, AskResponse};
pub use pipeline::TutorPipeline;
