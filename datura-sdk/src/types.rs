//! Schema layer: closed enums, request payloads, and typed response
//! structures for every Datura endpoint.
//!
//! Response models are tolerant of extra fields and mark everything the
//! server may omit as `Option` with a serde default, so a sparse body still
//! decodes. Request payloads omit unset optional fields entirely instead of
//! sending `null`.

use std::str::FromStr;

use datura_common::{DaturaError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ==============================
// Enumerations
// ==============================

/// Search backends selectable for AI search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tool {
    #[serde(rename = "web")]
    Web,
    #[serde(rename = "twitter")]
    Twitter,
    #[serde(rename = "reddit")]
    Reddit,
    #[serde(rename = "hackernews")]
    HackerNews,
    #[serde(rename = "arxiv")]
    Arxiv,
    #[serde(rename = "wikipedia")]
    Wikipedia,
    #[serde(rename = "youtube")]
    Youtube,
}

impl Tool {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Web => "web",
            Tool::Twitter => "twitter",
            Tool::Reddit => "reddit",
            Tool::HackerNews => "hackernews",
            Tool::Arxiv => "arxiv",
            Tool::Wikipedia => "wikipedia",
            Tool::Youtube => "youtube",
        }
    }
}

impl FromStr for Tool {
    type Err = DaturaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "web" => Ok(Tool::Web),
            "twitter" => Ok(Tool::Twitter),
            "reddit" => Ok(Tool::Reddit),
            "hackernews" => Ok(Tool::HackerNews),
            "arxiv" => Ok(Tool::Arxiv),
            "wikipedia" => Ok(Tool::Wikipedia),
            "youtube" => Ok(Tool::Youtube),
            other => Err(DaturaError::Schema(format!("unknown search tool: {other:?}"))),
        }
    }
}

/// AI model backing the search synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Model {
    #[serde(rename = "NOVA")]
    Nova,
    #[serde(rename = "ORBIT")]
    Orbit,
    #[serde(rename = "HORIZON")]
    Horizon,
}

impl Model {
    pub fn as_str(&self) -> &'static str {
        match self {
            Model::Nova => "NOVA",
            Model::Orbit => "ORBIT",
            Model::Horizon => "HORIZON",
        }
    }
}

impl FromStr for Model {
    type Err = DaturaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "NOVA" => Ok(Model::Nova),
            "ORBIT" => Ok(Model::Orbit),
            "HORIZON" => Ok(Model::Horizon),
            other => Err(DaturaError::Schema(format!("unknown model: {other:?}"))),
        }
    }
}

/// Recency window applied to AI search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFilter {
    #[serde(rename = "PAST_24_HOURS")]
    Past24Hours,
    #[serde(rename = "PAST_2_DAYS")]
    Past2Days,
    #[serde(rename = "PAST_WEEK")]
    PastWeek,
    #[serde(rename = "PAST_2_WEEKS")]
    Past2Weeks,
    #[serde(rename = "PAST_MONTH")]
    PastMonth,
    #[serde(rename = "PAST_YEAR")]
    PastYear,
}

impl DateFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateFilter::Past24Hours => "PAST_24_HOURS",
            DateFilter::Past2Days => "PAST_2_DAYS",
            DateFilter::PastWeek => "PAST_WEEK",
            DateFilter::Past2Weeks => "PAST_2_WEEKS",
            DateFilter::PastMonth => "PAST_MONTH",
            DateFilter::PastYear => "PAST_YEAR",
        }
    }
}

impl FromStr for DateFilter {
    type Err = DaturaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PAST_24_HOURS" => Ok(DateFilter::Past24Hours),
            "PAST_2_DAYS" => Ok(DateFilter::Past2Days),
            "PAST_WEEK" => Ok(DateFilter::PastWeek),
            "PAST_2_WEEKS" => Ok(DateFilter::Past2Weeks),
            "PAST_MONTH" => Ok(DateFilter::PastMonth),
            "PAST_YEAR" => Ok(DateFilter::PastYear),
            other => Err(DaturaError::Schema(format!(
                "unknown date filter: {other:?}"
            ))),
        }
    }
}

// ==============================
// Request payloads
// ==============================

/// POST body for `ai_search`. Optional fields are omitted when unset.
#[derive(Debug, Clone, Serialize)]
pub struct AiSearchRequest {
    pub prompt: String,
    pub tools: Vec<Tool>,
    pub model: Model,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_filter: Option<DateFilter>,
    /// Forwarded to the server when set; this SDK always performs one
    /// buffered JSON decode regardless.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streaming: Option<bool>,
}

impl AiSearchRequest {
    pub fn new(prompt: impl Into<String>, tools: Vec<Tool>, model: Model) -> Self {
        Self {
            prompt: prompt.into(),
            tools,
            model,
            date_filter: None,
            streaming: None,
        }
    }

    pub fn date_filter(mut self, filter: DateFilter) -> Self {
        self.date_filter = Some(filter);
        self
    }

    pub fn streaming(mut self, on: bool) -> Self {
        self.streaming = Some(on);
        self
    }
}

/// POST body for `web_links_search`.
#[derive(Debug, Clone, Serialize)]
pub struct WebLinksRequest {
    pub prompt: String,
    pub tools: Vec<Tool>,
    pub model: Model,
}

impl WebLinksRequest {
    pub fn new(prompt: impl Into<String>, tools: Vec<Tool>, model: Model) -> Self {
        Self {
            prompt: prompt.into(),
            tools,
            model,
        }
    }
}

/// POST body for `twitter_links_search`.
#[derive(Debug, Clone, Serialize)]
pub struct TwitterLinksRequest {
    pub prompt: String,
    pub model: Model,
}

impl TwitterLinksRequest {
    pub fn new(prompt: impl Into<String>, model: Model) -> Self {
        Self {
            prompt: prompt.into(),
            model,
        }
    }
}

/// POST body for `basic_twitter_search`: one required query plus thirteen
/// optional filters, every one omitted from the payload until set.
#[derive(Debug, Clone, Serialize)]
pub struct TwitterSearchRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// `YYYY-MM-DD`, validated before the request is sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`, validated before the request is sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blue_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_quote: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_video: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_image: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_retweets: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_replies: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_likes: Option<u32>,
}

impl TwitterSearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            sort: None,
            user: None,
            start_date: None,
            end_date: None,
            lang: None,
            verified: None,
            blue_verified: None,
            is_quote: None,
            is_video: None,
            is_image: None,
            min_retweets: None,
            min_replies: None,
            min_likes: None,
        }
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn start_date(mut self, date: impl Into<String>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    pub fn end_date(mut self, date: impl Into<String>) -> Self {
        self.end_date = Some(date.into());
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn verified(mut self, on: bool) -> Self {
        self.verified = Some(on);
        self
    }

    pub fn blue_verified(mut self, on: bool) -> Self {
        self.blue_verified = Some(on);
        self
    }

    pub fn is_quote(mut self, on: bool) -> Self {
        self.is_quote = Some(on);
        self
    }

    pub fn is_video(mut self, on: bool) -> Self {
        self.is_video = Some(on);
        self
    }

    pub fn is_image(mut self, on: bool) -> Self {
        self.is_image = Some(on);
        self
    }

    pub fn min_retweets(mut self, n: u32) -> Self {
        self.min_retweets = Some(n);
        self
    }

    pub fn min_replies(mut self, n: u32) -> Self {
        self.min_replies = Some(n);
        self
    }

    pub fn min_likes(mut self, n: u32) -> Self {
        self.min_likes = Some(n);
        self
    }
}

/// POST body for `twitter_by_urls`.
#[derive(Debug, Clone, Serialize)]
pub struct TwitterUrlsRequest {
    pub urls: Vec<String>,
}

// ==============================
// Shared response models
// ==============================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,

    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub user: Option<TweetUser>,

    #[serde(default)]
    pub like_count: Option<u64>,
    #[serde(default)]
    pub retweet_count: Option<u64>,
    #[serde(default)]
    pub reply_count: Option<u64>,
    #[serde(default)]
    pub quote_count: Option<u64>,
    #[serde(default)]
    pub bookmark_count: Option<u64>,
    #[serde(default)]
    pub impression_count: Option<u64>,

    #[serde(default)]
    pub is_quote_tweet: Option<bool>,
    #[serde(default)]
    pub is_retweet: Option<bool>,

    #[serde(default)]
    pub media: Option<Vec<TweetMedia>>,
    #[serde(default)]
    pub entities: Option<TweetEntities>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TweetUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub is_blue_verified: Option<bool>,
    #[serde(default)]
    pub followers_count: Option<u64>,
    #[serde(default)]
    pub favourites_count: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TweetMedia {
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TweetEntities {
    #[serde(default)]
    pub urls: Option<Vec<UrlEntity>>,
    #[serde(default)]
    pub mentions: Option<Vec<MentionEntity>>,
    #[serde(default)]
    pub hashtags: Option<Vec<HashTag>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlEntity {
    #[serde(default)]
    pub expanded_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentionEntity {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashTag {
    pub tag: String,
}

/// One organic result from a web-style vertical.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebResult {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

// ==============================
// Endpoint responses
// ==============================

/// Aggregated AI search body. Which sections are present depends on the
/// tools requested, so everything is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AiSearchResponse {
    /// Synthesis payload; its shape varies with the requested tools, so it
    /// is kept opaque.
    #[serde(default)]
    pub completion: Option<Value>,
    #[serde(default)]
    pub completion_links: Option<Vec<String>>,
    #[serde(default)]
    pub search_results: Option<Vec<WebResult>>,
    #[serde(default)]
    pub news_search_results: Option<Vec<WebResult>>,
    #[serde(default)]
    pub hacker_news_search_results: Option<Vec<WebResult>>,
    #[serde(default)]
    pub reddit_search_results: Option<Vec<WebResult>>,
    #[serde(default)]
    pub youtube_search_results: Option<Vec<WebResult>>,
    #[serde(default)]
    pub miner_tweets: Option<Vec<Tweet>>,
}

/// Field names an AI search object is expected to carry at least one of.
const AI_SEARCH_KEYS: &[&str] = &[
    "completion",
    "completion_links",
    "search_results",
    "news_search_results",
    "hacker_news_search_results",
    "reddit_search_results",
    "youtube_search_results",
    "miner_tweets",
];

/// Result of `ai_search`, resolved from the decoded JSON's shape.
#[derive(Debug, Clone)]
pub enum AiSearchResult {
    /// JSON object conforming to [`AiSearchResponse`].
    Structured(Box<AiSearchResponse>),
    /// Body decoded to a bare JSON string.
    Text(String),
    /// Anything else: arrays, scalars, or objects with no recognized field.
    Raw(Value),
}

impl AiSearchResult {
    pub(crate) fn from_value(value: Value) -> Self {
        match value {
            Value::String(s) => AiSearchResult::Text(s),
            Value::Object(ref map) if map.keys().any(|k| AI_SEARCH_KEYS.contains(&k.as_str())) => {
                match serde_json::from_value::<AiSearchResponse>(value.clone()) {
                    Ok(resp) => AiSearchResult::Structured(Box::new(resp)),
                    Err(_) => AiSearchResult::Raw(value),
                }
            }
            other => AiSearchResult::Raw(other),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebLinksSearchResponse {
    pub search_results: Vec<WebResult>,
    #[serde(default)]
    pub completion_links: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwitterLinksSearchResponse {
    pub miner_tweets: Vec<Tweet>,
    #[serde(default)]
    pub completion_links: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicTwitterSearchResponse {
    pub data: Vec<Tweet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicWebSearchResponse {
    pub data: Vec<WebResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwitterByUrlsResponse {
    pub data: Vec<Tweet>,
}

/// Single-tweet lookup body; the endpoint returns the tweet object directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TwitterByIdResponse(pub Tweet);

// ==============================
// Decoding helpers
// ==============================

/// Map a raw executor value onto a typed response structure.
pub(crate) fn decode_response<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| DaturaError::Schema(e.to_string()))
}

/// Reject anything that is not a `YYYY-MM-DD` calendar date.
pub(crate) fn validate_date(field: &str, raw: &str) -> Result<()> {
    let format = time::macros::format_description!("[year]-[month]-[day]");
    time::Date::parse(raw, &format)
        .map(|_| ())
        .map_err(|_| DaturaError::Schema(format!("{field} must be YYYY-MM-DD, got {raw:?}")))
}
