//! Curriculum Registry
//!
//! This module holds the static mapping of board → subject → chapters that the
//! request validator checks against. The registry is built once at startup
//! (from built-in data or a JSON override file) and is read-only afterwards,
//! so it can be shared across concurrent requests behind an `Arc`.

use crate::board::BoardVariant;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Errors raised while loading a curriculum override file.
#[derive(Debug, thiserror::Error)]
pub enum CurriculumError {
    #[error("failed to read curriculum file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse curriculum file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown board key in curriculum file: {0}")]
    UnknownBoard(String),
}

/// One subject and its chapters, in syllabus order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectEntry {
    pub subject: String,
    pub chapters: Vec<String>,
}

impl SubjectEntry {
    fn new(subject: &str, chapters: &[&str]) -> Self {
        Self {
            subject: subject.to_string(),
            chapters: chapters.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Read-only lookup of allowed subjects and chapters per board.
#[derive(Debug, Clone, Default)]
pub struct CurriculumRegistry {
    boards: HashMap<BoardVariant, Vec<SubjectEntry>>,
}

impl CurriculumRegistry {
    /// Creates a registry from explicit per-board subject lists.
    pub fn new(boards: HashMap<BoardVariant, Vec<SubjectEntry>>) -> Self {
        Self { boards }
    }

    /// The Class 10 curricula bundled with the service.
    pub fn builtin() -> Self {
        let mut boards = HashMap::new();
        boards.insert(BoardVariant::ApSsc, ap_ssc_subjects());
        boards.insert(BoardVariant::Cbse, cbse_subjects());
        boards.insert(BoardVariant::Icse, icse_subjects());
        Self { boards }
    }

    /// Loads a registry from a JSON file shaped as
    /// `{ "ap_ssc": [ { "subject": "...", "chapters": ["..."] } ] }`.
    ///
    /// Boards missing from the file have no registered subjects.
    pub fn from_json_file(path: &Path) -> Result<Self, CurriculumError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CurriculumError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CurriculumError> {
        let parsed: HashMap<String, Vec<SubjectEntry>> = serde_json::from_str(raw)?;
        let mut boards = HashMap::with_capacity(parsed.len());
        for (key, subjects) in parsed {
            let board = key
                .parse::<BoardVariant>()
                .map_err(|_| CurriculumError::UnknownBoard(key.clone()))?;
            boards.insert(board, subjects);
        }
        Ok(Self { boards })
    }

    /// All subject names registered for a board, in registry order.
    pub fn subjects(&self, board: BoardVariant) -> Vec<&str> {
        self.boards
            .get(&board)
            .map(|entries| entries.iter().map(|e| e.subject.as_str()).collect())
            .unwrap_or_default()
    }

    /// Chapters registered for `subject` on `board`; empty when either is unknown.
    pub fn chapters(&self, board: BoardVariant, subject: &str) -> &[String] {
        self.boards
            .get(&board)
            .and_then(|entries| entries.iter().find(|e| e.subject == subject))
            .map(|e| e.chapters.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_subject_allowed(&self, board: BoardVariant, subject: &str) -> bool {
        self.boards
            .get(&board)
            .is_some_and(|entries| entries.iter().any(|e| e.subject == subject))
    }

    pub fn is_chapter_allowed(&self, board: BoardVariant, subject: &str, chapter: &str) -> bool {
        self.chapters(board, subject).iter().any(|c| c == chapter)
    }

    /// The full subject list for a board, used by the curriculum endpoint.
    pub fn entries(&self, board: BoardVariant) -> &[SubjectEntry] {
        self.boards.get(&board).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn ap_ssc_subjects() -> Vec<SubjectEntry> {
    vec![
        SubjectEntry::new(
            "Telugu",
            &[
                "కథలు (Stories)",
                "కవిత్వం (Poetry)",
                "వ్యాకరణం (Grammar)",
                "నాటకం (Drama)",
                "ఆధునిక సాహిత్యం (Modern Literature)",
            ],
        ),
        SubjectEntry::new(
            "English",
            &["Prose", "Poetry", "Grammar", "Writing Skills", "Reading Comprehension"],
        ),
        SubjectEntry::new(
            "Hindi",
            &[
                "गद्य खंड (Prose)",
                "पद्य खंड (Poetry)",
                "व्याकरण (Grammar)",
                "निबंध लेखन (Essay Writing)",
            ],
        ),
        SubjectEntry::new(
            "Mathematics",
            &[
                "Real Numbers",
                "Polynomials",
                "Pair of Linear Equations",
                "Quadratic Equations",
                "Arithmetic Progressions",
                "Triangles",
                "Coordinate Geometry",
                "Trigonometry",
            ],
        ),
        SubjectEntry::new(
            "Science",
            &[
                "Chemical Reactions",
                "Acids Bases Salts",
                "Metals Non-metals",
                "Carbon Compounds",
                "Life Processes",
                "Control Coordination",
                "Reproduction",
                "Heredity",
                "Our Environment",
            ],
        ),
        SubjectEntry::new(
            "Social Studies",
            &[
                "Nationalism in India",
                "Industrialization 1857-1947",
                "Post-war World",
                "Citizenship",
                "Economic Development",
                "Climate Disaster Management",
            ],
        ),
    ]
}

fn cbse_subjects() -> Vec<SubjectEntry> {
    vec![
        SubjectEntry::new(
            "Mathematics",
            &[
                "Real Numbers",
                "Polynomials",
                "Pair of Linear Equations in Two Variables",
                "Quadratic Equations",
                "Arithmetic Progressions",
                "Triangles",
                "Coordinate Geometry",
                "Introduction to Trigonometry",
                "Some Applications of Trigonometry",
                "Circles",
                "Areas Related to Circles",
                "Surface Areas and Volumes",
                "Statistics",
                "Probability",
            ],
        ),
        SubjectEntry::new(
            "Science",
            &[
                "Chemical Reactions and Equations",
                "Acids, Bases and Salts",
                "Metals and Non-metals",
                "Carbon and its Compounds",
                "Life Processes",
                "Control and Coordination",
                "How do Organisms Reproduce?",
                "Heredity",
                "Light - Reflection and Refraction",
                "The Human Eye and the Colourful World",
                "Electricity",
                "Magnetic Effects of Electric Current",
                "Our Environment",
            ],
        ),
        SubjectEntry::new(
            "Social Science",
            &[
                "The Rise of Nationalism in Europe",
                "Nationalism in India",
                "The Making of a Global World",
                "Resources and Development",
                "Water Resources",
                "Agriculture",
                "Power Sharing",
                "Federalism",
                "Development",
                "Sectors of the Indian Economy",
                "Money and Credit",
                "Globalisation and the Indian Economy",
            ],
        ),
        SubjectEntry::new(
            "English",
            &["First Flight (Prose)", "First Flight (Poetry)", "Footprints Without Feet", "Grammar", "Writing Skills"],
        ),
        SubjectEntry::new("Hindi", &["क्षितिज", "कृतिका", "व्याकरण", "लेखन"]),
    ]
}

fn icse_subjects() -> Vec<SubjectEntry> {
    vec![
        SubjectEntry::new(
            "Mathematics",
            &[
                "GST",
                "Banking",
                "Linear Inequations",
                "Quadratic Equations",
                "Ratio and Proportion",
                "Matrices",
                "Arithmetic Progression",
                "Coordinate Geometry",
                "Similarity",
                "Circles",
                "Trigonometry",
                "Statistics",
                "Probability",
            ],
        ),
        SubjectEntry::new(
            "Physics",
            &[
                "Force",
                "Work, Energy and Power",
                "Machines",
                "Refraction of Light",
                "Spectrum",
                "Sound",
                "Current Electricity",
                "Electromagnetism",
                "Calorimetry",
                "Radioactivity",
            ],
        ),
        SubjectEntry::new(
            "Chemistry",
            &[
                "Periodic Table",
                "Chemical Bonding",
                "Acids, Bases and Salts",
                "Analytical Chemistry",
                "Mole Concept and Stoichiometry",
                "Electrolysis",
                "Metallurgy",
                "Study of Compounds",
                "Organic Chemistry",
            ],
        ),
        SubjectEntry::new(
            "Biology",
            &[
                "Cell Cycle and Cell Division",
                "Genetics",
                "Absorption by Roots",
                "Transpiration",
                "Photosynthesis",
                "Circulatory System",
                "Excretory System",
                "Nervous System",
                "Endocrine System",
                "Reproductive System",
                "Human Evolution",
                "Pollution",
            ],
        ),
        SubjectEntry::new("History and Civics", &["The Union Parliament", "The Union Executive", "The Judiciary", "The First War of Independence, 1857", "Indian National Movement", "The World Wars", "The United Nations"]),
        SubjectEntry::new("Geography", &["Topographical Maps", "Climate of India", "Soil Resources", "Water Resources", "Mineral and Energy Resources", "Agriculture", "Industries", "Transport", "Waste Management"]),
        SubjectEntry::new("English", &["English Language", "English Literature"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ap_ssc_subjects_in_order() {
        let registry = CurriculumRegistry::builtin();
        assert_eq!(
            registry.subjects(BoardVariant::ApSsc),
            vec!["Telugu", "English", "Hindi", "Mathematics", "Science", "Social Studies"]
        );
    }

    #[test]
    fn test_chapters_for_known_subject() {
        let registry = CurriculumRegistry::builtin();
        let chapters = registry.chapters(BoardVariant::ApSsc, "Mathematics");
        assert_eq!(chapters.first().map(String::as_str), Some("Real Numbers"));
        assert!(chapters.iter().any(|c| c == "Quadratic Equations"));
    }

    #[test]
    fn test_chapters_for_unknown_subject_is_empty() {
        let registry = CurriculumRegistry::builtin();
        assert!(registry.chapters(BoardVariant::ApSsc, "Physics").is_empty());
        assert!(registry.chapters(BoardVariant::ApSsc, "").is_empty());
    }

    #[test]
    fn test_ap_ssc_hindi_chapters_are_single_script() {
        let registry = CurriculumRegistry::builtin();
        assert_eq!(
            registry.chapters(BoardVariant::ApSsc, "Hindi"),
            [
                "गद्य खंड (Prose)",
                "पद्य खंड (Poetry)",
                "व्याकरण (Grammar)",
                "निबंध लेखन (Essay Writing)",
            ]
        );
        // The Telugu-script spelling is not an alias.
        assert!(!registry.is_chapter_allowed(BoardVariant::ApSsc, "Hindi", "व్యాకరణ (Grammar)"));
    }

    #[test]
    fn test_lookups_are_exact_match() {
        let registry = CurriculumRegistry::builtin();
        assert!(registry.is_subject_allowed(BoardVariant::ApSsc, "Science"));
        assert!(!registry.is_subject_allowed(BoardVariant::ApSsc, "science"));
        assert!(registry.is_chapter_allowed(BoardVariant::ApSsc, "Science", "Heredity"));
        assert!(!registry.is_chapter_allowed(BoardVariant::ApSsc, "Science", "Quadratic Equations"));
    }

    #[test]
    fn test_empty_registry_returns_empty_results() {
        let registry = CurriculumRegistry::default();
        assert!(registry.subjects(BoardVariant::Cbse).is_empty());
        assert!(registry.entries(BoardVariant::Cbse).is_empty());
        assert!(!registry.is_subject_allowed(BoardVariant::Cbse, "Mathematics"));
    }

    #[test]
    fn test_from_json_str_preserves_order() {
        let raw = r#"{
            "cbse": [
                { "subject": "Science", "chapters": ["Electricity", "Light"] },
                { "subject": "Mathematics", "chapters": ["Statistics"] }
            ]
        }"#;
        let registry = CurriculumRegistry::from_json_str(raw).unwrap();
        assert_eq!(registry.subjects(BoardVariant::Cbse), vec!["Science", "Mathematics"]);
        assert_eq!(registry.chapters(BoardVariant::Cbse, "Science"), &["Electricity", "Light"]);
        assert!(registry.subjects(BoardVariant::ApSsc).is_empty());
    }

    #[test]
    fn test_from_json_str_rejects_unknown_board() {
        let raw = r#"{ "state_board": [] }"#;
        match CurriculumRegistry::from_json_str(raw) {
            Err(CurriculumError::UnknownBoard(key)) => assert_eq!(key, "state_board"),
            other => panic!("Expected UnknownBoard, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_str_rejects_malformed_json() {
        assert!(matches!(
            CurriculumRegistry::from_json_str("{ not json"),
            Err(CurriculumError::Parse(_))
        ));
    }

    #[test]
    fn test_from_json_file_missing_path() {
        let err = CurriculumRegistry::from_json_file(Path::new("/nonexistent/curriculum.json"))
            .unwrap_err();
        assert!(matches!(err, CurriculumError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/curriculum.json"));
    }
}
