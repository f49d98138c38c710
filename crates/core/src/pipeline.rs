//! Pipeline Orchestrator
//!
//! `TutorPipeline` sequences validation, prompt construction, the completion
//! call and normalization for one board. It is built once at startup from
//! injected, immutable parts and shared across requests.

use crate::{
    board::{BoardVariant, ValidationPolicy},
    completion::CompletionClient,
    curriculum::CurriculumRegistry,
    error::AskError,
    models::{AnswerMeta, AskRequest, AskResponse},
    normalizer::normalize,
    prompt::build_prompt,
    validator::validate,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// The stages a single ask passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Validating,
    Rejected,
    Prompting,
    Completing,
    Failed,
    Normalizing,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One parameterized question-answering pipeline for a board variant.
#[derive(Clone)]
pub struct TutorPipeline {
    board: BoardVariant,
    policy: ValidationPolicy,
    registry: Arc<CurriculumRegistry>,
    client: Arc<dyn CompletionClient>,
}

impl TutorPipeline {
    /// Creates a pipeline for `board` using the board's own validation policy.
    pub fn new(
        board: BoardVariant,
        registry: Arc<CurriculumRegistry>,
        client: Arc<dyn CompletionClient>,
    ) -> Self {
        Self::with_policy(board, board.default_policy(), registry, client)
    }

    pub fn with_policy(
        board: BoardVariant,
        policy: ValidationPolicy,
        registry: Arc<CurriculumRegistry>,
        client: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            board,
            policy,
            registry,
            client,
        }
    }

    pub fn board(&self) -> BoardVariant {
        self.board
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    pub fn registry(&self) -> &CurriculumRegistry {
        &self.registry
    }

    /// Answers one question.
    ///
    /// Validation failures return before the completion client is touched.
    /// A completion failure is returned as-is; there are no retries.
    #[instrument(name = "ask", skip_all, fields(board = %self.board, subject = %request.subject))]
    pub async fn ask(&self, request: AskRequest) -> Result<AskResponse, AskError> {
        debug!(stage = %Stage::Received, "Ask received");

        debug!(stage = %Stage::Validating, policy = self.policy.name());
        if let Err(reason) = validate(&request, self.board, self.policy, &self.registry) {
            warn!(stage = %Stage::Rejected, %reason, "Request rejected");
            return Err(reason.into());
        }

        debug!(stage = %Stage::Prompting);
        let prompt = build_prompt(
            self.board,
            &request.class_level,
            &request.subject,
            &request.chapter,
            &request.question,
        );

        debug!(stage = %Stage::Completing, prompt_len = prompt.len());
        let result = match self.client.complete(&prompt).await {
            Ok(result) => result,
            Err(cause) => {
                warn!(stage = %Stage::Failed, error = %cause, "Completion call failed");
                return Err(cause.into());
            }
        };

        debug!(stage = %Stage::Normalizing);
        let answer = normalize(Some(&result));

        info!(stage = %Stage::Done, answer_len = answer.len(), "Answer ready");
        Ok(AskResponse {
            answer,
            meta: AnswerMeta {
                class_level: request.class_level,
                subject: request.subject,
                chapter: request.chapter,
                board: Some(self.board.display_name().to_string()),
            },
        })
    }
}
