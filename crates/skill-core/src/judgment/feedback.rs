//! Feedback strategy lookup
//!
//! Gold-standard answers are stored under `true_<key>`, where `<key>` is the
//! first answer field of the feedback strategy that produced them.

/// Feedback strategy identifier -> answer fields, first field carries the labels
const FEEDBACK_STRATEGIES: &[(&str, &[&str])] = &[
    ("singleAnswerQuestion", &["answer"]),
    ("multipleAnswerQuestion", &["answers"]),
    ("surveySimple", &["choiceIds"]),
];

/// Answer field for a strategy, e.g. `surveySimple` -> `choiceIds`
pub fn answer_key(strategy: &str) -> Option<&'static str> {
    FEEDBACK_STRATEGIES
        .iter()
        .find(|(name, _)| *name == strategy)
        .and_then(|(_, keys)| keys.first().copied())
}

/// Feedback field holding the gold-standard labels, e.g. `true_choiceIds`
pub fn true_key(strategy: &str) -> Option<String> {
    answer_key(strategy).map(|key| format!("true_{}", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn survey_uses_choice_ids() {
        assert_eq!(true_key("surveySimple").as_deref(), Some("true_choiceIds"));
    }

    #[test]
    fn question_strategies() {
        assert_eq!(answer_key("singleAnswerQuestion"), Some("answer"));
        assert_eq!(answer_key("multipleAnswerQuestion"), Some("answers"));
    }

    #[test]
    fn unknown_strategy() {
        assert_eq!(true_key("drawingTool"), None);
    }
}
