//! Folder-name cleanup: turns release-style folder names into search queries.
//!
//! ```text
//! The.Dark.Knight.2008.1080p.BluRay.x264-[YTS.MX]  ->  The Dark Knight 2008
//! ```

use chrono::Datelike;
use imdb_renamer_core::Settings;
use once_cell::sync::Lazy;
use regex::Regex;

static BRACKET_GROUP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]|\{[^}]*\}").expect("static pattern"));
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("static pattern"));
static RESOLUTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\d{3,4}[pi]$").expect("static pattern"));
static SEASON_EPISODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:season|episode)\s?\d+\b|\bs\d{1,2}(?:e\d{1,3})?\b|\be\d{1,3}\b")
        .expect("static pattern")
});
static PROPERLY_NAMED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.* \((?:(?:19|20)\d{2}|N-A)\) - IMDb[-:]\s?(?:\d+(?:\.\d+)?|N-A)$").expect("static pattern")
});
static ILLEGAL_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("static pattern"));

/// Source, codec and audio markers stripped regardless of configuration.
const RELEASE_TAGS: &[&str] = &[
    "bluray", "blu ray", "brrip", "bdrip", "webrip", "web dl", "webdl", "hdrip", "dvdrip",
    "dvdscr", "hdtv", "remux", "x264", "x265", "h264", "h265", "h 264", "h 265", "hevc", "avc",
    "xvid", "aac", "ac3", "dts", "ddp5 1", "10bit", "8bit", "hdr", "uhd", "4k",
];

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '.' | '_' | '-' | '(' | ')' | '[' | ']' | '{' | '}' | '+')
}

/// Replace separator characters with spaces and collapse runs of whitespace.
pub fn normalize_separators(s: &str) -> String {
    s.split(is_separator)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Deterministic folder-name cleaner configured with an extraneous word list.
#[derive(Debug, Clone)]
pub struct NameSanitizer {
    /// Lowercased token sequences to remove, longest first
    stop_sequences: Vec<Vec<String>>,
    current_year: u16,
}

impl NameSanitizer {
    pub fn new(settings: &Settings) -> Self {
        Self::with_words(&settings.extraneous_words)
    }

    pub fn with_words<S: AsRef<str>>(words: &[S]) -> Self {
        let year = chrono::Local::now().year();
        Self::with_words_and_year(words, u16::try_from(year).unwrap_or(u16::MAX))
    }

    pub fn with_words_and_year<S: AsRef<str>>(words: &[S], current_year: u16) -> Self {
        let mut stop_sequences: Vec<Vec<String>> = words
            .iter()
            .map(|w| w.as_ref())
            .chain(RELEASE_TAGS.iter().copied())
            .map(|w| {
                normalize_separators(w)
                    .split(' ')
                    .filter(|t| !t.is_empty())
                    .map(str::to_lowercase)
                    .collect::<Vec<_>>()
            })
            .filter(|seq| !seq.is_empty())
            .collect();
        stop_sequences.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        stop_sequences.dedup();
        Self {
            stop_sequences,
            current_year,
        }
    }

    /// Clean a raw folder name into a search-ready title.
    ///
    /// Bracketed groups, extraneous words, resolution and codec tags are
    /// removed; separators become single spaces. If a plausible release year
    /// follows the title, everything after it is dropped.
    pub fn sanitize(&self, raw: &str) -> String {
        let without_groups = BRACKET_GROUP_RE.replace_all(raw, " ");
        let normalized = normalize_separators(&without_groups);
        let tokens: Vec<&str> = normalized.split(' ').filter(|t| !t.is_empty()).collect();
        let cleaned = self.strip_stop_words(tokens).join(" ");
        self.truncate_after_year(&cleaned)
    }

    /// Remove stop sequences until none remain. Removal can bring two halves
    /// of a sequence together, so this repeats until nothing changes.
    fn strip_stop_words<'a>(&self, mut tokens: Vec<&'a str>) -> Vec<&'a str> {
        loop {
            let mut kept = Vec::with_capacity(tokens.len());
            let mut i = 0;
            while i < tokens.len() {
                if RESOLUTION_RE.is_match(tokens[i]) {
                    i += 1;
                    continue;
                }
                match self.match_len(&tokens[i..]) {
                    Some(len) => i += len,
                    None => {
                        kept.push(tokens[i]);
                        i += 1;
                    }
                }
            }
            if kept.len() == tokens.len() {
                return kept;
            }
            tokens = kept;
        }
    }

    fn match_len(&self, tokens: &[&str]) -> Option<usize> {
        self.stop_sequences
            .iter()
            .find(|seq| {
                seq.len() <= tokens.len()
                    && seq
                        .iter()
                        .zip(tokens)
                        .all(|(word, token)| token.to_lowercase() == *word)
            })
            .map(Vec::len)
    }

    fn truncate_after_year(&self, cleaned: &str) -> String {
        for m in YEAR_RE.find_iter(cleaned) {
            if !self.is_valid_year(m.as_str()) {
                continue;
            }
            let title = cleaned[..m.start()].trim();
            if title.is_empty() {
                continue;
            }
            return format!("{} {}", title, m.as_str());
        }
        cleaned.to_string()
    }

    fn is_valid_year(&self, s: &str) -> bool {
        s.parse::<u16>()
            .is_ok_and(|y| (1900..=self.current_year).contains(&y))
    }

    /// First plausible release year in a folder name.
    pub fn extract_year(&self, name: &str) -> Option<u16> {
        YEAR_RE
            .find_iter(name)
            .filter_map(|m| m.as_str().parse::<u16>().ok())
            .find(|y| (1900..=self.current_year).contains(y))
    }

    /// Queries to try in order when a search comes back empty: the sanitized
    /// name, the title without its year, and the core title without season
    /// or episode markers. Duplicates and empty rungs are dropped.
    pub fn query_ladder(&self, sanitized: &str) -> Vec<String> {
        let simplified = strip_trailing_year(sanitized);
        let core = core_title(&simplified);
        let mut ladder: Vec<String> = Vec::with_capacity(3);
        for query in [sanitized.to_string(), simplified, core] {
            if !query.is_empty() && !ladder.contains(&query) {
                ladder.push(query);
            }
        }
        ladder
    }
}

/// Drop a year token at the end of a sanitized name.
pub fn strip_trailing_year(name: &str) -> String {
    match name.rsplit_once(' ') {
        Some((title, last)) if YEAR_RE.is_match(last) && last.len() == 4 => title.to_string(),
        _ => name.to_string(),
    }
}

/// Remove season and episode markers, leaving the show or film title.
pub fn core_title(name: &str) -> String {
    let stripped = SEASON_EPISODE_RE.replace_all(name, " ");
    normalize_separators(&stripped)
}

/// Whether a folder already follows the `Title (Year) - IMDb- Rating` form.
pub fn already_properly_named(folder_name: &str) -> bool {
    PROPERLY_NAMED_RE.is_match(folder_name)
}

/// Replace characters that are illegal in file names with `-`.
pub fn safe_name(name: &str) -> String {
    ILLEGAL_CHARS_RE.replace_all(name, "-").into_owned()
}

#[cfg(test)]
#[path = "tests/sanitize_tests.rs"]
mod tests;
