//! Request Validator
//!
//! Checks an `AskRequest` against the curriculum registry before any prompt is
//! built. Rules run in a fixed order and stop at the first failure:
//! question presence, then subject membership, then chapter membership.

use crate::{
    board::{BoardVariant, ValidationPolicy},
    curriculum::CurriculumRegistry,
    error::ValidationError,
    models::AskRequest,
};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};

/// Validates a request for `board` under `policy`.
pub fn validate(
    request: &AskRequest,
    board: BoardVariant,
    policy: ValidationPolicy,
    registry: &CurriculumRegistry,
) -> Result<(), ValidationError> {
    if request.question.trim().is_empty() {
        return Err(ValidationError::QuestionRequired);
    }

    if policy.enforce_subject && !registry.is_subject_allowed(board, &request.subject) {
        return Err(ValidationError::UnsupportedSubject {
            subject: request.subject.clone(),
            allowed: registry
                .subjects(board)
                .into_iter()
                .map(str::to_string)
                .collect(),
        });
    }

    if policy.enforce_chapter
        && !registry.is_chapter_allowed(board, &request.subject, &request.chapter)
    {
        let chapters = registry.chapters(board, &request.subject);
        return Err(ValidationError::UnsupportedChapter {
            subject: request.subject.clone(),
            chapter: request.chapter.clone(),
            suggestion: closest_chapter(chapters, &request.chapter),
        });
    }

    Ok(())
}

/// Picks the registered chapter that best fuzzy-matches what the student typed.
fn closest_chapter(chapters: &[String], requested: &str) -> Option<String> {
    let requested = requested.trim();
    if requested.is_empty() {
        return None;
    }
    let matcher = SkimMatcherV2::default().ignore_case();
    chapters
        .iter()
        .filter_map(|chapter| {
            matcher
                .fuzzy_match(chapter, requested)
                .map(|score| (score, chapter))
        })
        .max_by_key(|(score, _)| *score)
        .map(|(_, chapter)| chapter.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> CurriculumRegistry {
        CurriculumRegistry::builtin()
    }

    fn request(subject: &str, chapter: &str, question: &str) -> AskRequest {
        AskRequest::new(subject, chapter, question)
    }

    #[test]
    fn test_valid_request_passes() {
        let req = request("Mathematics", "Quadratic Equations", "Solve x^2-5x+6=0");
        assert_eq!(
            validate(&req, BoardVariant::ApSsc, ValidationPolicy::STRICT, &registry()),
            Ok(())
        );
    }

    #[test]
    fn test_whitespace_question_is_rejected_first() {
        // Subject is also invalid; the question rule must win.
        let req = request("Physics", "Optics", "   \n\t ");
        assert_eq!(
            validate(&req, BoardVariant::ApSsc, ValidationPolicy::STRICT, &registry()),
            Err(ValidationError::QuestionRequired)
        );
    }

    #[test]
    fn test_empty_question_is_rejected_even_without_curriculum_checks() {
        let req = request("Anything", "Anything", "");
        assert_eq!(
            validate(&req, BoardVariant::Icse, ValidationPolicy::NONE, &registry()),
            Err(ValidationError::QuestionRequired)
        );
    }

    #[test]
    fn test_unknown_subject_lists_all_allowed_subjects() {
        let req = request("Physics", "Optics", "What is refraction?");
        let err = validate(&req, BoardVariant::ApSsc, ValidationPolicy::STRICT, &registry())
            .unwrap_err();
        match err {
            ValidationError::UnsupportedSubject { subject, allowed } => {
                assert_eq!(subject, "Physics");
                assert_eq!(
                    allowed,
                    vec!["Telugu", "English", "Hindi", "Mathematics", "Science", "Social Studies"]
                );
            }
            other => panic!("Expected UnsupportedSubject, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_chapter_is_rejected_with_suggestion() {
        let req = request("Mathematics", "quadratic", "Solve x^2=4");
        let err = validate(&req, BoardVariant::ApSsc, ValidationPolicy::STRICT, &registry())
            .unwrap_err();
        match &err {
            ValidationError::UnsupportedChapter {
                subject, chapter, ..
            } => {
                assert_eq!(subject, "Mathematics");
                assert_eq!(chapter, "quadratic");
            }
            other => panic!("Expected UnsupportedChapter, got {:?}", other),
        }
        assert_eq!(err.suggestion(), Some("Quadratic Equations"));
    }

    #[test]
    fn test_unrelated_chapter_has_no_suggestion() {
        let req = request("Mathematics", "zzzz", "Explain this");
        let err = validate(&req, BoardVariant::ApSsc, ValidationPolicy::STRICT, &registry())
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedChapter { .. }));
        assert_eq!(err.suggestion(), None);
    }

    #[test]
    fn test_subject_only_policy_ignores_chapter() {
        let req = request("Mathematics", "Not A Chapter", "What is a prime?");
        assert_eq!(
            validate(&req, BoardVariant::Cbse, ValidationPolicy::SUBJECT_ONLY, &registry()),
            Ok(())
        );

        let req = request("Telugu", "Not A Chapter", "What is a prime?");
        assert!(matches!(
            validate(&req, BoardVariant::Cbse, ValidationPolicy::SUBJECT_ONLY, &registry()),
            Err(ValidationError::UnsupportedSubject { .. })
        ));
    }

    #[test]
    fn test_none_policy_is_a_no_op_for_curriculum() {
        let req = request("Astronomy", "Black Holes", "What is a black hole?");
        assert_eq!(
            validate(&req, BoardVariant::Icse, ValidationPolicy::NONE, &registry()),
            Ok(())
        );
    }

    #[test]
    fn test_closest_chapter_ignores_blank_input() {
        let chapters = vec!["Triangles".to_string()];
        assert_eq!(closest_chapter(&chapters, "  "), None);
    }
}
