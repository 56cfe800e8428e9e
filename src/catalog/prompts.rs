//! Suggested business actions
//!
//! These phrases double as the scripted-action triggers: a prompt containing
//! any of them runs the scripted action bundle.

use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone)]
pub struct PromptCatalog {
    suggestions: Vec<String>,
    research_topics: Vec<String>,
}

impl PromptCatalog {
    pub fn new(suggestions: Vec<String>, research_topics: Vec<String>) -> Self {
        Self {
            suggestions,
            research_topics,
        }
    }

    pub fn builtin() -> Self {
        let to_vec =
            |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        Self::new(
            to_vec(&[
                "launch a marketing campaign",
                "expand into a new region",
                "hire a new management team",
                "open a flagship store",
                "acquire a rival startup",
                "build a research lab",
                "sign a celebrity endorsement",
                "launch a new product line",
                "host a charity gala",
                "negotiate a supplier contract",
            ]),
            to_vec(&[
                "quantum computing",
                "renewable energy",
                "biotechnology",
                "artificial intelligence",
                "supply chain automation",
                "urban farming",
            ]),
        )
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// First suggestion contained in an already lower-cased prompt
    pub fn matching_action(&self, lowered_prompt: &str) -> Option<&str> {
        self.suggestions
            .iter()
            .find(|phrase| lowered_prompt.contains(phrase.as_str()))
            .map(String::as_str)
    }

    pub fn random_suggestion<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.suggestions.choose(rng).map(String::as_str)
    }

    pub fn random_research_topic<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.research_topics.choose(rng).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_matching_action_finds_phrase_inside_prompt() {
        let catalog = PromptCatalog::builtin();
        assert_eq!(
            catalog.matching_action("please launch a marketing campaign now"),
            Some("launch a marketing campaign")
        );
        assert_eq!(catalog.matching_action("do something"), None);
    }

    #[test]
    fn test_random_suggestion_is_from_catalog() {
        let catalog = PromptCatalog::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..20 {
            let pick = catalog.random_suggestion(&mut rng).unwrap();
            assert!(catalog.suggestions().iter().any(|s| s == pick));
        }
    }

    #[test]
    fn test_suggestions_do_not_shadow_earlier_intents() {
        // Travel is checked before scripted actions
        let catalog = PromptCatalog::builtin();
        for phrase in catalog.suggestions() {
            assert!(!phrase.contains("go to"));
            assert!(!phrase.contains("visit"));
            assert!(!phrase.contains("travel"));
        }
    }
}
