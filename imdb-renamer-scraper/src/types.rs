//! Wire types for the IMDb endpoints.

use serde::Deserialize;

/// Response from the IMDb title suggestion endpoint.
#[derive(Debug, Deserialize)]
pub struct SuggestionResponse {
    #[serde(default)]
    pub d: Vec<Suggestion>,
}

/// One suggestion entry. Only titles (`tt…` ids) are candidates.
#[derive(Debug, Clone, Deserialize)]
pub struct Suggestion {
    pub id: String,
    /// Display title
    #[serde(rename = "l")]
    pub label: Option<String>,
    /// Release year
    #[serde(rename = "y")]
    pub year: Option<u16>,
    /// Kind of title ("movie", "tvSeries", ...)
    pub qid: Option<String>,
}

impl Suggestion {
    pub fn is_title(&self) -> bool {
        self.id.starts_with("tt")
    }
}

/// JSON-LD block embedded in an IMDb title page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleJsonLd {
    pub name: Option<String>,
    pub date_published: Option<String>,
    pub aggregate_rating: Option<AggregateRating>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRating {
    pub rating_value: Option<f32>,
    pub rating_count: Option<u64>,
}
