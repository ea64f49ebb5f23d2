use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Keyword the client starts with before the user types anything.
pub const DEFAULT_KEYWORD: &str = "криптовалюта";

/// Languages the news API can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ar,
    De,
    En,
    Es,
    Fr,
    He,
    It,
    Nl,
    No,
    Pt,
    #[default]
    Ru,
    Sv,
    Ud,
    Zh,
}

impl Language {
    pub const ALL: [Language; 14] = [
        Language::Ar,
        Language::De,
        Language::En,
        Language::Es,
        Language::Fr,
        Language::He,
        Language::It,
        Language::Nl,
        Language::No,
        Language::Pt,
        Language::Ru,
        Language::Sv,
        Language::Ud,
        Language::Zh,
    ];

    /// Two-letter code sent on the wire.
    pub fn code(self) -> &'static str {
        match self {
            Language::Ar => "ar",
            Language::De => "de",
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::He => "he",
            Language::It => "it",
            Language::Nl => "nl",
            Language::No => "no",
            Language::Pt => "pt",
            Language::Ru => "ru",
            Language::Sv => "sv",
            Language::Ud => "ud",
            Language::Zh => "zh",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::Ar => "Arabic",
            Language::De => "German",
            Language::En => "English",
            Language::Es => "Spanish",
            Language::Fr => "French",
            Language::He => "Hebrew",
            Language::It => "Italian",
            Language::Nl => "Dutch",
            Language::No => "Norwegian",
            Language::Pt => "Portuguese",
            Language::Ru => "Русский",
            Language::Sv => "Swedish",
            Language::Ud => "Urdu",
            Language::Zh => "Chinese",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == wanted)
            .ok_or_else(|| UnknownOption {
                kind: "language",
                value: s.to_string(),
            })
    }
}

/// Result ordering understood by the news API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortMode {
    #[serde(rename = "relevancy")]
    Relevancy,
    #[serde(rename = "popularity")]
    Popularity,
    #[default]
    #[serde(rename = "publishedAt")]
    PublishedAt,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [SortMode::Relevancy, SortMode::Popularity, SortMode::PublishedAt];

    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Relevancy => "relevancy",
            SortMode::Popularity => "popularity",
            SortMode::PublishedAt => "publishedAt",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Relevancy => "By relevance",
            SortMode::Popularity => "By popularity",
            SortMode::PublishedAt => "By publication date",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownOption {
                kind: "sort mode",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
}

/// The user-controlled search parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub keyword: String,
    pub language: Language,
    #[serde(rename = "sortBy")]
    pub sort_by: SortMode,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            keyword: DEFAULT_KEYWORD.to_string(),
            language: Language::default(),
            sort_by: SortMode::default(),
        }
    }
}

impl QueryState {
    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.keyword = keyword.into();
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn set_sort_by(&mut self, sort_by: SortMode) {
        self.sort_by = sort_by;
    }

    /// Keyword with surrounding whitespace removed, `None` when nothing is left.
    pub fn effective_keyword(&self) -> Option<&str> {
        let trimmed = self.keyword.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(rename = "urlToImage", default, skip_serializing_if = "Option::is_none")]
    pub url_to_image: Option<String>,
}

// Upstream feeds send `null` for missing titles and links.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// State of the most recent request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loading,
    Success(Vec<Article>),
    Failure(String),
}

/// Body the news API sends instead of an article list when it rejects a request.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// Upstream news API envelope (the proxy unwraps this)
#[derive(Debug, Deserialize)]
pub struct UpstreamResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "totalResults", default)]
    pub total_results: u64,
    #[serde(default)]
    pub articles: Option<Vec<Article>>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewsQueryParams {
    pub keyword: Option<String>,
    pub language: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_codes_parse_case_insensitively() {
        assert_eq!("EN".parse::<Language>(), Ok(Language::En));
        assert_eq!(" zh ".parse::<Language>(), Ok(Language::Zh));
        assert!("xx".parse::<Language>().is_err());
        assert_eq!(Language::ALL.len(), 14);
    }

    #[test]
    fn sort_mode_uses_wire_names() {
        assert_eq!("publishedat".parse::<SortMode>(), Ok(SortMode::PublishedAt));
        assert_eq!(
            serde_json::to_string(&SortMode::PublishedAt).unwrap(),
            "\"publishedAt\""
        );
        assert!("newest".parse::<SortMode>().is_err());
    }

    #[test]
    fn defaults_seed_a_searchable_query() {
        let query = QueryState::default();
        assert!(query.effective_keyword().is_some());
        assert_eq!(query.language, Language::Ru);
        assert_eq!(query.sort_by, SortMode::PublishedAt);
    }

    #[test]
    fn whitespace_keyword_is_not_effective() {
        let mut query = QueryState::default();
        query.set_keyword("   \t");
        assert_eq!(query.effective_keyword(), None);
        query.set_keyword("  rust ");
        assert_eq!(query.effective_keyword(), Some("rust"));
    }

    #[test]
    fn article_fields_default_when_missing() {
        let article: Article =
            serde_json::from_str(r#"{"title":"A","url":"http://x","source":{"id":null}}"#).unwrap();
        assert_eq!(article.title, "A");
        assert_eq!(article.description, None);
        assert_eq!(article.url_to_image, None);

        let bare: Article = serde_json::from_str("{}").unwrap();
        assert!(bare.title.is_empty() && bare.url.is_empty());
    }

    #[test]
    fn null_title_and_url_become_empty() {
        let articles: Vec<Article> = serde_json::from_str(
            r#"[{"title":null,"url":null,"description":null},{"title":"B","url":"http://y"}]"#,
        )
        .unwrap();
        assert_eq!(articles.len(), 2);
        assert!(articles[0].title.is_empty() && articles[0].url.is_empty());
        assert_eq!(articles[1].title, "B");
    }
}
