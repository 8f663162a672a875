//! Keyword-overlap match score between a resume and a job description.
//!
//! Keywords are the alphabetic, non-stopword tokens of a text, normalized and
//! collapsed into a set. The score is the share of job keywords that also
//! appear in the resume:
//!
//!   score = 100 * |resume ∩ job| / |job|
//!
//! The overlap is built by walking the job set, so it is a subset of it and
//! the score stays within 0..=100 without clamping. Not symmetric.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::analysis::normalize::normalize;
use crate::errors::AppError;
use crate::nlp::LanguageModel;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// 0.0 – 100.0
    pub score: f64,
    pub matched_keywords: BTreeSet<String>,
}

impl MatchResult {
    /// Score with two decimals, e.g. "66.67".
    pub fn score_display(&self) -> String {
        format!("{:.2}", self.score)
    }

    /// Integer part of the score, for a 0–100 progress bar.
    pub fn progress(&self) -> u8 {
        self.score as u8
    }
}

/// Alphabetic, non-stopword tokens of `text`, normalized. Frequency is ignored.
pub fn keyword_set(text: &str, model: &dyn LanguageModel) -> HashSet<String> {
    model
        .tokenize(text)
        .into_iter()
        .filter(|t| t.is_alpha && !t.is_stop)
        .map(|t| normalize(&t.text))
        .collect()
}

/// Scores already-extracted keyword sets. Fails when the job set is empty.
pub fn overlap_score(
    resume_keywords: &HashSet<String>,
    job_keywords: &HashSet<String>,
) -> Result<MatchResult, AppError> {
    if job_keywords.is_empty() {
        return Err(AppError::NoJobTokens);
    }

    let matched_keywords: BTreeSet<String> = job_keywords
        .iter()
        .filter(|k| resume_keywords.contains(*k))
        .cloned()
        .collect();

    let score = 100.0 * matched_keywords.len() as f64 / job_keywords.len() as f64;

    Ok(MatchResult {
        score,
        matched_keywords,
    })
}

/// Tokenizes both texts and scores the resume against the job description.
pub fn score_match(
    resume_text: &str,
    job_text: &str,
    model: &dyn LanguageModel,
) -> Result<MatchResult, AppError> {
    let job_keywords = keyword_set(job_text, model);
    if job_keywords.is_empty() {
        return Err(AppError::NoJobTokens);
    }
    let resume_keywords = keyword_set(resume_text, model);
    overlap_score(&resume_keywords, &job_keywords)
}
