// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Douban book search response types.

use serde::{Deserialize, Deserializer};

/// Response body of `GET /v2/book/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub books: Vec<DoubanBook>,
}

/// One book in a search response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DoubanBook {
    pub id: String,
    pub title: String,
    pub author: Vec<String>,
    pub summary: String,
    pub publisher: String,
    /// Free-form: `2005`, `2005-6`, `2005-06-01`.
    pub pubdate: String,
    pub tags: Vec<DoubanTag>,
    pub rating: Option<DoubanRating>,
    pub series: Option<DoubanSeries>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DoubanTag {
    pub title: Option<String>,
}

/// Douban ratings are on a 0-10 scale.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DoubanRating {
    #[serde(deserialize_with = "lenient_f64")]
    pub average: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DoubanSeries {
    pub title: String,
}

/// Douban sends numbers as JSON numbers or as strings (`"8.5"`, `""`).
/// Anything unparsable reads as zero.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_search_response() {
        let json = r#"{
            "count": 1, "start": 0, "total": 1,
            "books": [{
                "id": "1003078",
                "title": "小王子",
                "author": ["圣埃克苏佩里"],
                "pubdate": "2003-8",
                "tags": [{"count": 100, "name": "童话", "title": "童话"}, {"count": 3}],
                "rating": {"max": 10, "numRaters": 9438, "average": "9.0", "min": 0},
                "series": {"id": "1", "title": "Classics"},
                "image": "https://img.douban.com/1003078.jpg"
            }]
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        let book = &response.books[0];
        assert_eq!(book.id, "1003078");
        assert_eq!(book.author, vec!["圣埃克苏佩里"]);
        assert_eq!(book.tags.len(), 2);
        assert!(book.tags[1].title.is_none());
        assert_eq!(book.rating.as_ref().unwrap().average, 9.0);
        assert_eq!(book.series.as_ref().unwrap().title, "Classics");
    }

    #[test]
    fn rating_accepts_numbers_and_garbage() {
        let rating: DoubanRating = serde_json::from_str(r#"{"average": 7.2}"#).unwrap();
        assert_eq!(rating.average, 7.2);
        let rating: DoubanRating = serde_json::from_str(r#"{"average": ""}"#).unwrap();
        assert_eq!(rating.average, 0.0);
        let rating: DoubanRating = serde_json::from_str(r#"{"average": null}"#).unwrap();
        assert_eq!(rating.average, 0.0);
    }

    #[test]
    fn missing_books_is_empty() {
        let response: SearchResponse = serde_json::from_str(r#"{"msg": "invalid_apikey"}"#).unwrap();
        assert!(response.books.is_empty());
    }
}
