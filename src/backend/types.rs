use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Number of recommendations requested when nothing else is configured.
pub const DEFAULT_TOP_N: u32 = 5;

/// Body of `POST /api/chat`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub user_id: String,
    pub message: String,
    pub top_n: u32,
}

/// Successful reply from the recommendation backend.
///
/// `extracted_mood` and `recommendations` are optional on the wire; a reply
/// that omits them still carries its `message`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub message: String,
    #[serde(default)]
    pub extracted_mood: Option<Mood>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub recommendations: Vec<Recommendation>,
}

/// Mood/tone pair the backend extracted from the user's text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Mood {
    pub mood: String,
    pub tone: String,
}

/// Tags arrive either as a preformatted string or as a list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Tags {
    Text(String),
    List(Vec<String>),
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tags::Text(s) => write!(f, "{s}"),
            Tags::List(items) => write!(f, "{}", items.join(", ")),
        }
    }
}

/// A single ranked title. Everything except `title` is optional because
/// the backend fills fields from whichever catalog row it matched.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub title: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Tags>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub mood_tag: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub hybrid_score: f64,
}

impl Recommendation {
    /// Match percentage shown on the card, e.g. `0.83` → `"83%"`.
    pub fn match_label(&self) -> String {
        match_percent(self.hybrid_score)
    }
}

/// Formats a score in `[0, 1]` as a whole percentage, rounding half away from zero.
pub fn match_percent(score: f64) -> String {
    format!("{}%", (score * 100.0).round() as i64)
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Recommendation>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Recommendation>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Catalog exports are inconsistent about years: `2019`, `2019.0` and `"2019"` all occur.
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .map(|y| y as i32)
            .or_else(|| n.as_f64().map(|y| y as i32)),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok().map(|y| y as i32),
        _ => None,
    })
}
