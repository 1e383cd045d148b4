//! Lesson quiz parsing and grading.
//!
//! Quiz questions are stored as a JSONB array on each lesson. A submission
//! maps question IDs to the chosen option index.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Default minimum score (percent) required to pass a lesson quiz.
pub const DEFAULT_PASS_PERCENT: u32 = 70;

/// A multiple-choice question attached to a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

/// A question as shown to learners (answer stripped).
#[derive(Debug, Clone, Serialize)]
pub struct PublicQuizQuestion {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
}

impl From<&QuizQuestion> for PublicQuizQuestion {
    fn from(q: &QuizQuestion) -> Self {
        Self {
            id: q.id.clone(),
            prompt: q.prompt.clone(),
            options: q.options.clone(),
        }
    }
}

/// Outcome of grading a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizGrade {
    pub correct: u32,
    pub total: u32,
    pub score_percent: u32,
    pub passed: bool,
}

/// Decode the `quiz_questions` JSONB column. `null` decodes as no questions.
pub fn parse_questions(value: &serde_json::Value) -> Result<Vec<QuizQuestion>, CoreError> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    let questions: Vec<QuizQuestion> = serde_json::from_value(value.clone())
        .map_err(|e| CoreError::Internal(format!("Malformed quiz questions: {e}")))?;
    for q in &questions {
        if q.correct_index >= q.options.len() {
            return Err(CoreError::Internal(format!(
                "Quiz question '{}' has correct_index {} but only {} options",
                q.id,
                q.correct_index,
                q.options.len()
            )));
        }
    }
    Ok(questions)
}

/// Grade `answers` against `questions`.
///
/// Unanswered questions count as wrong. Answers naming an unknown question
/// or an out-of-range option are rejected.
pub fn grade(
    questions: &[QuizQuestion],
    answers: &HashMap<String, usize>,
    pass_percent: u32,
) -> Result<QuizGrade, CoreError> {
    if questions.is_empty() {
        return Err(CoreError::Validation(
            "This lesson has no quiz".to_string(),
        ));
    }

    let by_id: HashMap<&str, &QuizQuestion> =
        questions.iter().map(|q| (q.id.as_str(), q)).collect();

    for (question_id, choice) in answers {
        let question = by_id.get(question_id.as_str()).ok_or_else(|| {
            CoreError::Validation(format!("Unknown quiz question '{question_id}'"))
        })?;
        if *choice >= question.options.len() {
            return Err(CoreError::Validation(format!(
                "Answer {choice} out of range for question '{question_id}'"
            )));
        }
    }

    let total = questions.len() as u32;
    let correct = questions
        .iter()
        .filter(|q| answers.get(&q.id) == Some(&q.correct_index))
        .count() as u32;
    let score_percent = (correct * 100 + total / 2) / total;

    Ok(QuizGrade {
        correct,
        total,
        score_percent,
        passed: score_percent >= pass_percent,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn questions() -> Vec<QuizQuestion> {
        parse_questions(&json!([
            { "id": "q1", "prompt": "Best time to call?", "options": ["Morning", "Never"], "correct_index": 0 },
            { "id": "q2", "prompt": "Bundle what?", "options": ["Auto", "Home", "Both"], "correct_index": 2 },
            { "id": "q3", "prompt": "Follow up within?", "options": ["24h", "1 month"], "correct_index": 0 },
        ]))
        .unwrap()
    }

    fn answers(pairs: &[(&str, usize)]) -> HashMap<String, usize> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn null_means_no_questions() {
        assert!(parse_questions(&serde_json::Value::Null).unwrap().is_empty());
    }

    #[test]
    fn malformed_questions_are_internal_errors() {
        let bad = json!([{ "id": "q", "prompt": "p", "options": ["a"], "correct_index": 3 }]);
        assert_matches!(parse_questions(&bad), Err(CoreError::Internal(_)));
    }

    #[test]
    fn all_correct_passes() {
        let g = grade(&questions(), &answers(&[("q1", 0), ("q2", 2), ("q3", 0)]), 70).unwrap();
        assert_eq!(g.correct, 3);
        assert_eq!(g.score_percent, 100);
        assert!(g.passed);
    }

    #[test]
    fn two_of_three_rounds_and_fails_at_seventy() {
        let g = grade(&questions(), &answers(&[("q1", 0), ("q2", 2), ("q3", 1)]), 70).unwrap();
        assert_eq!(g.score_percent, 67);
        assert!(!g.passed);
    }

    #[test]
    fn unanswered_counts_as_wrong() {
        let g = grade(&questions(), &answers(&[("q1", 0)]), 70).unwrap();
        assert_eq!(g.correct, 1);
        assert_eq!(g.total, 3);
    }

    #[test]
    fn unknown_question_rejected() {
        let result = grade(&questions(), &answers(&[("q9", 0)]), 70);
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn out_of_range_answer_rejected() {
        let result = grade(&questions(), &answers(&[("q1", 5)]), 70);
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn empty_quiz_rejected() {
        assert_matches!(grade(&[], &HashMap::new(), 70), Err(CoreError::Validation(_)));
    }

    #[test]
    fn public_question_hides_answer() {
        let q = &questions()[0];
        let public = serde_json::to_value(PublicQuizQuestion::from(q)).unwrap();
        assert!(public.get("correct_index").is_none());
        assert_eq!(public["options"][0], "Morning");
    }
}
