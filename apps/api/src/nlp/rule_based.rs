//! Rule-based tokenizer and entity recognizer.
//!
//! Entities come from a fixed set of patterns plus a location gazetteer.
//! Candidate spans are resolved left to right: earliest start wins, then the
//! longer span, then rule order (email, url, phone, date, organization,
//! location, person).

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use stop_words::{get, LANGUAGE};
use tracing::info;

use super::{Entity, EntityLabel, LanguageModel, Token};
use crate::config::read_list_file;

// A dotted continuation must start lowercase or with a digit: "node.js" and
// "web2.0" stay whole, "Python.Docker" splits at the period.
const TOKEN_PATTERN: &str =
    r"[\p{L}\p{N}]+(?:[+#]+|(?:\.[\p{Ll}\p{N}][\p{L}\p{N}]*)+)?|[^\s\p{L}\p{N}]";

const EMAIL_PATTERN: &str = r"[\w.+-]+@[\w-]+(?:\.[\w-]+)+";

const URL_PATTERN: &str = r#"https?://[^\s<>"')]+|\bwww\.[^\s<>"')]+"#;

const PHONE_PATTERN: &str = r"\+?\d[\d \t().-]{7,}\d";

const DATE_PATTERN: &str = r"(?i)\b(?:(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?[ \t]+(?:19|20)\d{2}|(?:0?[1-9]|1[0-2])/(?:19|20)\d{2}|(?:19|20)\d{2})\b";

const ORGANIZATION_PATTERN: &str = r"\b(?:[A-Z][\p{L}\p{N}&'-]*[ \t]+){1,3}(?:Inc|LLC|Ltd|Corp|Corporation|Company|Technologies|Labs|Group|Systems|Solutions|Bank|University|College|Institute|Foundation|Partners|Consulting)\b\.?|\b(?:University|Institute|College)[ \t]+of(?:[ \t]+[A-Z][\p{L}-]*){1,3}";

const NAME_LINE_PATTERN: &str =
    r"(?m)^[ \t]*Name[ \t]*:[ \t]*([A-Z][\p{L}'.-]*(?:[ \t]+[A-Z][\p{L}'.-]*){1,3})";

const MIN_PHONE_DIGITS: usize = 10;

const DEFAULT_LOCATIONS: &[&str] = &[
    // Countries and regions
    "United States",
    "USA",
    "United Kingdom",
    "UK",
    "Canada",
    "Mexico",
    "Brazil",
    "Germany",
    "France",
    "Spain",
    "Italy",
    "Netherlands",
    "Ireland",
    "Poland",
    "Sweden",
    "Switzerland",
    "India",
    "China",
    "Japan",
    "Singapore",
    "Australia",
    "New Zealand",
    "Israel",
    "Nigeria",
    "Kenya",
    "South Africa",
    "Europe",
    "Asia",
    // US states
    "California",
    "Texas",
    "Florida",
    "Washington",
    "Massachusetts",
    "Illinois",
    "Colorado",
    "Georgia",
    "Oregon",
    "Virginia",
    "New Jersey",
    "Pennsylvania",
    // Cities
    "New York",
    "San Francisco",
    "Los Angeles",
    "Seattle",
    "Austin",
    "Boston",
    "Chicago",
    "Denver",
    "Atlanta",
    "Miami",
    "Portland",
    "San Diego",
    "San Jose",
    "Toronto",
    "Vancouver",
    "Montreal",
    "London",
    "Manchester",
    "Dublin",
    "Paris",
    "Berlin",
    "Munich",
    "Amsterdam",
    "Madrid",
    "Barcelona",
    "Stockholm",
    "Zurich",
    "Warsaw",
    "Bangalore",
    "Bengaluru",
    "Mumbai",
    "Delhi",
    "New Delhi",
    "Hyderabad",
    "Pune",
    "Chennai",
    "Tokyo",
    "Beijing",
    "Shanghai",
    "Sydney",
    "Melbourne",
    "Tel Aviv",
    "Lagos",
    "Nairobi",
];

/// Default `LanguageModel`. Immutable after `load`.
pub struct RuleBasedModel {
    token_re: Regex,
    rules: Vec<(EntityLabel, Regex)>,
    name_line_re: Regex,
    stop_words: HashSet<String>,
}

struct Candidate {
    start: usize,
    end: usize,
    label: EntityLabel,
    rank: usize,
}

impl RuleBasedModel {
    /// Compiles the patterns and builds the gazetteer, optionally extended
    /// with names read from `gazetteer_path`.
    pub fn load(gazetteer_path: Option<&Path>) -> Result<Self> {
        let mut locations: Vec<String> =
            DEFAULT_LOCATIONS.iter().map(|s| s.to_string()).collect();
        if let Some(path) = gazetteer_path {
            let extra = read_list_file(path)?;
            info!(path = %path.display(), count = extra.len(), "Loaded location gazetteer");
            locations.extend(extra);
        }

        let rules = vec![
            (EntityLabel::Email, compile(EMAIL_PATTERN)?),
            (EntityLabel::Url, compile(URL_PATTERN)?),
            (EntityLabel::Phone, compile(PHONE_PATTERN)?),
            (EntityLabel::Date, compile(DATE_PATTERN)?),
            (EntityLabel::Organization, compile(ORGANIZATION_PATTERN)?),
            (EntityLabel::Location, compile(&gazetteer_pattern(locations))?),
        ];

        let stop_words = get(LANGUAGE::English)
            .into_iter()
            .map(|w| w.to_lowercase())
            .collect::<HashSet<_>>();

        Ok(Self {
            token_re: compile(TOKEN_PATTERN)?,
            rules,
            name_line_re: compile(NAME_LINE_PATTERN)?,
            stop_words,
        })
    }

    fn is_stop(&self, lower: &str) -> bool {
        self.stop_words.contains(lower)
    }

    fn person_candidates(&self, text: &str, rank: usize) -> Vec<Candidate> {
        let mut out = Vec::new();

        // Resume header: the first non-empty line, when it reads like a name.
        let mut offset = 0;
        for line in text.split_inclusive('\n') {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                if looks_like_name(trimmed) {
                    let start = offset + (line.len() - line.trim_start().len());
                    out.push(Candidate {
                        start,
                        end: start + trimmed.len(),
                        label: EntityLabel::Person,
                        rank,
                    });
                }
                break;
            }
            offset += line.len();
        }

        for caps in self.name_line_re.captures_iter(text) {
            if let Some(m) = caps.get(1) {
                out.push(Candidate {
                    start: m.start(),
                    end: m.end(),
                    label: EntityLabel::Person,
                    rank,
                });
            }
        }

        out
    }
}

impl LanguageModel for RuleBasedModel {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        self.token_re
            .find_iter(text)
            .map(|m| {
                let surface = m.as_str();
                Token {
                    text: surface.to_string(),
                    is_stop: self.is_stop(&surface.to_lowercase()),
                    is_alpha: surface.chars().all(char::is_alphabetic),
                }
            })
            .collect()
    }

    fn entities(&self, text: &str) -> Vec<Entity> {
        let mut candidates = Vec::new();

        for (rank, (label, re)) in self.rules.iter().enumerate() {
            for m in re.find_iter(text) {
                let (start, end) = match label {
                    EntityLabel::Url => {
                        (m.start(), m.start() + trim_trailing_punct(m.as_str()).len())
                    }
                    EntityLabel::Phone if !is_phone_like(m.as_str()) => continue,
                    _ => (m.start(), m.end()),
                };
                candidates.push(Candidate {
                    start,
                    end,
                    label: *label,
                    rank,
                });
            }
        }
        candidates.extend(self.person_candidates(text, self.rules.len()));

        resolve_overlaps(candidates)
            .into_iter()
            .map(|c| Entity::new(&text[c.start..c.end], c.label))
            .collect()
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).with_context(|| format!("Failed to compile pattern: {pattern}"))
}

fn gazetteer_pattern(mut names: Vec<String>) -> String {
    // Longest first so "New York" beats "York" under leftmost-first matching.
    names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    names.dedup();
    let alternatives: Vec<String> = names.iter().map(|n| regex::escape(n)).collect();
    format!(r"\b(?:{})\b", alternatives.join("|"))
}

fn resolve_overlaps(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then_with(|| (b.end - b.start).cmp(&(a.end - a.start)))
            .then_with(|| a.rank.cmp(&b.rank))
    });

    let mut accepted: Vec<Candidate> = Vec::with_capacity(candidates.len());
    let mut last_end = 0;
    for c in candidates {
        if c.end > c.start && c.start >= last_end {
            last_end = c.end;
            accepted.push(c);
        }
    }
    accepted
}

fn looks_like_name(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    (2..=4).contains(&words.len())
        && words.iter().all(|w| {
            w.chars().next().map(char::is_uppercase).unwrap_or(false)
                && w.chars().all(|c| c.is_alphabetic() || matches!(c, '\'' | '.' | '-'))
        })
}

fn trim_trailing_punct(s: &str) -> &str {
    s.trim_end_matches(['.', ',', ';', ':', '!', '?'])
}

fn digit_count(s: &str) -> usize {
    s.chars().filter(char::is_ascii_digit).count()
}

/// Runs of years ("2016 - 2018 2019 - 2021") match the phone pattern too.
fn is_year_run(s: &str) -> bool {
    s.split(|c: char| !c.is_ascii_digit())
        .filter(|group| !group.is_empty())
        .all(|group| group.len() == 4 && (group.starts_with("19") || group.starts_with("20")))
}

fn is_phone_like(s: &str) -> bool {
    digit_count(s) >= MIN_PHONE_DIGITS && !is_year_run(s)
}
