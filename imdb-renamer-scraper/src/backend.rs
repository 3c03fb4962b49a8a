//! Metadata backends: the black-box services that answer title searches.

use std::future::Future;

use futures::future::join_all;
use imdb_renamer_core::{Candidate, Settings};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use crate::error::LookupError;
use crate::types::{Suggestion, SuggestionResponse, TitleJsonLd};

const SUGGESTION_URL: &str = "https://v3.sg.media-imdb.com/suggestion/x";
const TITLE_URL: &str = "https://www.imdb.com/title";
const GOOGLE_SEARCH_URL: &str = "https://www.google.com/search";

static IMDB_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"tt\d+").expect("static pattern"));
static LD_JSON_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("static selector")
});
static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("static selector"));

/// A service that can turn a title query into candidate matches.
///
/// `search` is the primary path and may be retried; `fallback_search` is the
/// secondary path tried once when the primary yields nothing.
pub trait MetadataBackend: Send + Sync {
    /// Search by title. Results are in the backend's relevance order and hold
    /// at most `limit` entries.
    fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Candidate>, LookupError>> + Send;

    /// Secondary lookup used after the primary path is exhausted.
    fn fallback_search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Candidate>, LookupError>> + Send;
}

/// IMDb-backed search: title suggestions for the primary path, a Google
/// `site:imdb.com` query for the fallback, and title pages for details.
pub struct ImdbBackend {
    http: reqwest::Client,
    user_agent: String,
}

impl ImdbBackend {
    pub fn new(settings: &Settings) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .user_agent(settings.google_user_agent.clone())
            .build()?;
        Ok(Self {
            http,
            user_agent: settings.google_user_agent.clone(),
        })
    }

    async fn get_text(&self, request: reqwest::RequestBuilder) -> Result<String, LookupError> {
        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
                url: resp.url().to_string(),
            });
        }
        Ok(resp.text().await?)
    }

    /// Fetch title, year, rating and vote count from a title page.
    pub async fn title_details(&self, imdb_id: &str) -> Result<Candidate, LookupError> {
        let request = self
            .http
            .get(format!("{TITLE_URL}/{imdb_id}/"))
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9");
        let html = self.get_text(request).await?;
        parse_title_page(&html, imdb_id)
    }
}

impl MetadataBackend for ImdbBackend {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Candidate>, LookupError> {
        let url = format!("{SUGGESTION_URL}/{}.json", urlencoding::encode(query));
        let text = self.get_text(self.http.get(url)).await?;
        let suggestions = parse_suggestions(&text, limit)?;

        // Details are fetched concurrently; the result cap bounds the fan-out.
        let details = join_all(suggestions.iter().map(|s| self.title_details(&s.id))).await;

        let candidates = suggestions
            .into_iter()
            .zip(details)
            .map(|(suggestion, detail)| match detail {
                Ok(candidate) => candidate,
                Err(e) => {
                    log::debug!("Details for {} unavailable: {}", suggestion.id, e);
                    candidate_from_suggestion(suggestion)
                }
            })
            .collect();
        Ok(candidates)
    }

    async fn fallback_search(&self, query: &str) -> Result<Vec<Candidate>, LookupError> {
        let q = format!("{query} site:imdb.com");
        let request = self
            .http
            .get(GOOGLE_SEARCH_URL)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(&[("q", q.as_str()), ("num", "1"), ("hl", "en")]);
        let html = self.get_text(request).await?;

        match find_imdb_id(&html) {
            Some(id) => {
                log::info!("Found IMDb ID {} for '{}'", id, query);
                Ok(vec![self.title_details(&id).await?])
            }
            None => {
                log::warn!("No IMDb ID found in Google results for '{}'", query);
                Ok(Vec::new())
            }
        }
    }
}

/// Parse the suggestion JSON, keeping only title entries, capped at `limit`.
pub fn parse_suggestions(text: &str, limit: usize) -> Result<Vec<Suggestion>, LookupError> {
    let response: SuggestionResponse = serde_json::from_str(text)?;
    Ok(response
        .d
        .into_iter()
        .filter(Suggestion::is_title)
        .take(limit)
        .collect())
}

fn candidate_from_suggestion(s: Suggestion) -> Candidate {
    let mut candidate = Candidate::new(s.label.unwrap_or_else(|| s.id.clone()), s.id);
    candidate.year = s.year;
    candidate
}

/// Extract a [`Candidate`] from the JSON-LD block of an IMDb title page.
pub fn parse_title_page(html: &str, imdb_id: &str) -> Result<Candidate, LookupError> {
    let document = Html::parse_document(html);
    let script = document
        .select(&LD_JSON_SELECTOR)
        .next()
        .ok_or_else(|| LookupError::malformed(format!("{imdb_id}: no JSON-LD block")))?;
    let json: String = script.text().collect();
    let ld: TitleJsonLd = serde_json::from_str(&json)?;

    let title = ld
        .name
        .map(|n| html_escape::decode_html_entities(&n).into_owned())
        .ok_or_else(|| LookupError::malformed(format!("{imdb_id}: title has no name")))?;

    let mut candidate = Candidate::new(title, imdb_id);
    candidate.year = ld
        .date_published
        .as_deref()
        .and_then(|d| d.get(..4))
        .and_then(|y| y.parse().ok());
    if let Some(rating) = ld.aggregate_rating {
        candidate.rating = rating.rating_value;
        candidate.votes = rating.rating_count.unwrap_or(0);
    }
    Ok(candidate)
}

/// Find the first IMDb title id linked from a search results page.
pub fn find_imdb_id(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&LINK_SELECTOR)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.contains("imdb.com/title/tt"))
        .find_map(|href| IMDB_ID_RE.find(href).map(|m| m.as_str().to_string()))
}

#[cfg(test)]
#[path = "tests/backend_tests.rs"]
mod tests;
