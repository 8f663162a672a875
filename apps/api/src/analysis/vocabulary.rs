use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use anyhow::{bail, Result};

use crate::analysis::normalize::normalize;
use crate::config::read_list_file;

/// Built-in skills recognized when no vocabulary file is configured.
pub const DEFAULT_SKILLS: &[&str] = &[
    "python",
    "java",
    "c++",
    "javascript",
    "html",
    "css",
    "react",
    "angular",
    "vue",
    "sql",
    "nosql",
    "aws",
    "azure",
    "docker",
    "kubernetes",
    "machine learning",
    "ai",
    "data analysis",
    "communication",
    "leadership",
    "management",
    "problem solving",
];

/// Immutable set of normalized skill terms. Multi-word terms are kept in a
/// sorted side list for the phrase search.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    terms: HashSet<String>,
    phrases: Vec<String>,
}

impl SkillVocabulary {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms: HashSet<String> = terms
            .into_iter()
            .map(|t| normalize(t.as_ref()))
            .filter(|t| !t.is_empty())
            .collect();
        let phrases = terms
            .iter()
            .filter(|t| t.contains(' '))
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        Self { terms, phrases }
    }

    /// Loads a newline-delimited skill list. An empty list is rejected.
    pub fn load(path: &Path) -> Result<Self> {
        let vocabulary = Self::new(read_list_file(path)?);
        if vocabulary.is_empty() {
            bail!("Skill vocabulary file {} contains no skills", path.display());
        }
        Ok(vocabulary)
    }

    /// Configured file when present, built-in list otherwise.
    pub fn from_path(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    /// Entries containing an internal space, in sorted order.
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_SKILLS)
    }
}
