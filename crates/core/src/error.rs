//! Pipeline Error Types
//!
//! Every outcome of an ask is either an answer, a client-caused
//! `ValidationError`, or a dependency-caused `UpstreamFailure`. An empty but
//! successful completion is not an error; the normalizer resolves it.

use thiserror::Error;

/// Client-caused rejections, detected before any upstream call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("question required")]
    QuestionRequired,

    #[error("unsupported subject '{subject}'; subject must be one of {allowed:?}")]
    UnsupportedSubject { subject: String, allowed: Vec<String> },

    #[error("unsupported chapter for subject: '{chapter}' is not part of {subject}")]
    UnsupportedChapter {
        subject: String,
        chapter: String,
        suggestion: Option<String>,
    },
}

impl ValidationError {
    /// The allowed subject list, when the rejection was about the subject.
    pub fn allowed_subjects(&self) -> Option<&[String]> {
        match self {
            ValidationError::UnsupportedSubject { allowed, .. } => Some(allowed),
            _ => None,
        }
    }

    /// The closest registered chapter, when the rejection was about the chapter.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            ValidationError::UnsupportedChapter { suggestion, .. } => suggestion.as_deref(),
            _ => None,
        }
    }
}

/// Failures of the completion service: transport, status, decoding, timeout.
#[derive(Debug, Error)]
pub enum UpstreamFailure {
    #[error("completion request timed out after {0} seconds")]
    Timeout(u64),

    #[error("completion transport error: {0}")]
    Transport(String),

    #[error("completion service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed completion response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for UpstreamFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            UpstreamFailure::Malformed(err.to_string())
        } else {
            UpstreamFailure::Transport(err.to_string())
        }
    }
}

impl From<async_openai::error::OpenAIError> for UpstreamFailure {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        use async_openai::error::OpenAIError;
        match err {
            err @ OpenAIError::JSONDeserialize(..) => UpstreamFailure::Malformed(err.to_string()),
            other => UpstreamFailure::Transport(other.to_string()),
        }
    }
}

/// The two terminal failure outcomes of the pipeline.
#[derive(Debug, Error)]
pub enum AskError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Upstream(#[from] UpstreamFailure),
}
