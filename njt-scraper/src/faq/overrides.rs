//! Per-question fallback answers.
//!
//! Some entries on the FAQ page are known to render without a reachable
//! answer. An override supplies the answer for such a question, keyed by
//! the question text, and is only consulted when the live answer cannot
//! be located.

use std::collections::HashMap;
use std::path::Path;

use super::error::FaqError;
use super::extract::normalize_question;

/// Question whose answer panel is known not to render.
const TRIP_PLANNER_QUESTION: &str = "How do I plan my trip?";

const TRIP_PLANNER_ANSWER: &str = "NJ TRANSIT's online trip planner provides accurate and up-to-the-minute travel itineraries across our network of train, bus and light rail services. Visit our homepage and look for the Trip Planner on the left-hand side of the page. Simply enter your starting and ending address and provide the date and time of your trip. The trip planner will provide the best route(s) to your destination, including walking directions if needed and fare details.";

/// Fallback answers keyed by question.
///
/// Keys are matched after question normalization and case folding, so
/// icon-label residue and capitalization differences don't matter.
#[derive(Debug, Clone, Default)]
pub struct AnswerOverrides {
    answers: HashMap<String, String>,
}

impl AnswerOverrides {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The table shipped with the scraper.
    pub fn builtin() -> Self {
        Self::new().with(TRIP_PLANNER_QUESTION, TRIP_PLANNER_ANSWER)
    }

    /// Add (or replace) the fallback answer for `question`.
    pub fn with(mut self, question: impl AsRef<str>, answer: impl Into<String>) -> Self {
        self.answers.insert(key(question.as_ref()), answer.into());
        self
    }

    /// Add every entry of `other`, replacing existing ones.
    pub fn merge(mut self, other: AnswerOverrides) -> Self {
        self.answers.extend(other.answers);
        self
    }

    /// Load a JSON object mapping questions to answers.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FaqError> {
        let path = path.as_ref();
        let error = |message: String| FaqError::Overrides {
            path: path.display().to_string(),
            message,
        };

        let contents = std::fs::read_to_string(path).map_err(|e| error(e.to_string()))?;
        let table: HashMap<String, String> =
            serde_json::from_str(&contents).map_err(|e| error(e.to_string()))?;

        Ok(table
            .into_iter()
            .fold(Self::new(), |overrides, (question, answer)| {
                overrides.with(question, answer)
            }))
    }

    /// Fallback answer for `question`, if one is configured.
    pub fn get(&self, question: &str) -> Option<&str> {
        self.answers.get(&key(question)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

fn key(question: &str) -> String {
    normalize_question(question).to_lowercase()
}
