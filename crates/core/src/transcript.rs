//! Call-scoring Q&A: find the transcript excerpts that answer a question.
//!
//! Single pass over the segments. Each segment is scored by the fraction of
//! the question's keywords it contains. A question that mentions a timestamp
//! (`m:ss` or `mm:ss`) only considers segments overlapping a window around
//! that moment.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum number of excerpts returned.
pub const MAX_MATCHES: usize = 3;

/// Seconds either side of a referenced timestamp that are searched.
pub const TIMESTAMP_WINDOW_SECS: f64 = 30.0;

/// Minimum keyword length.
const MIN_KEYWORD_LEN: usize = 3;

const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "was", "were", "did", "does", "what", "when", "where", "which",
    "who", "why", "how", "that", "this", "with", "you", "your", "they", "them", "their", "about",
    "from", "have", "has", "had", "not", "but", "can", "could", "would", "should", "there",
    "then", "than", "into", "any", "all", "say", "said", "call",
];

/// One speaker turn from a call transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub start_secs: f64,
    pub end_secs: f64,
    pub speaker: String,
    pub text: String,
}

/// A ranked excerpt returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptMatch {
    pub segment_index: usize,
    pub start_secs: f64,
    pub end_secs: f64,
    pub speaker: String,
    pub text: String,
    /// Fraction of question keywords found in the segment, in `(0, 1]`.
    pub score: f64,
}

/// Decode the `transcript_segments` JSONB column.
pub fn parse_segments(value: &serde_json::Value) -> Result<Vec<TranscriptSegment>, CoreError> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(value.clone())
        .map_err(|e| CoreError::Internal(format!("Malformed transcript segments: {e}")))
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

/// Distinct keywords of `question`, in first-seen order.
pub fn extract_keywords(question: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokens(question)
        .filter(|t| t.chars().count() >= MIN_KEYWORD_LEN && !STOP_WORDS.contains(&t.as_str()))
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

fn timestamp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(\d{1,2}):([0-5]\d)\b").expect("valid timestamp regex"))
}

/// The first `m:ss` timestamp mentioned in `question`, in seconds.
pub fn referenced_timestamp(question: &str) -> Option<f64> {
    let caps = timestamp_regex().captures(question)?;
    let minutes: f64 = caps[1].parse().ok()?;
    let seconds: f64 = caps[2].parse().ok()?;
    Some(minutes * 60.0 + seconds)
}

/// Rank the segments of a transcript against a question.
pub fn find_relevant_segments(
    segments: &[TranscriptSegment],
    question: &str,
) -> Result<Vec<TranscriptMatch>, CoreError> {
    let keywords = extract_keywords(question);
    if keywords.is_empty() {
        return Err(CoreError::Validation(
            "Question must contain at least one meaningful keyword".to_string(),
        ));
    }

    let window = referenced_timestamp(question)
        .map(|t| (t - TIMESTAMP_WINDOW_SECS, t + TIMESTAMP_WINDOW_SECS));

    let mut matches: Vec<TranscriptMatch> = segments
        .iter()
        .enumerate()
        .filter(|(_, seg)| match window {
            Some((from, to)) => seg.start_secs <= to && seg.end_secs >= from,
            None => true,
        })
        .filter_map(|(index, seg)| {
            let words: HashSet<String> = tokens(&seg.text).collect();
            let hits = keywords.iter().filter(|k| words.contains(*k)).count();
            (hits > 0).then(|| TranscriptMatch {
                segment_index: index,
                start_secs: seg.start_secs,
                end_secs: seg.end_secs,
                speaker: seg.speaker.clone(),
                text: seg.text.clone(),
                score: hits as f64 / keywords.len() as f64,
            })
        })
        .collect();

    matches.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(a.start_secs.total_cmp(&b.start_secs))
    });
    matches.truncate(MAX_MATCHES);
    Ok(matches)
}
