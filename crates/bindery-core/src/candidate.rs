// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Book candidate records returned by metadata providers.
//!
//! The record shape is a cross-provider contract: the application renders
//! candidates from any provider the same way. Providers use the normalisation
//! helpers here so that dates, tags, and ratings look alike regardless of
//! the upstream service.

use serde::{Deserialize, Serialize};

/// Highest rating a candidate can carry.
pub const MAX_RATING: f64 = 5.0;

/// Identifies the provider that produced a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSource {
    /// Provider name (e.g., "google").
    pub id: String,
    /// Human-readable provider description (e.g., "Google Books").
    pub description: String,
    /// Provider home page.
    pub url: String,
}

/// One metadata match for a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookCandidate {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub description: String,
    pub publisher: String,
    /// `YYYY-MM-DD`, or empty when unknown.
    pub published_date: String,
    /// Lowercase, de-duplicated.
    pub tags: Vec<String>,
    /// In `[0.0, 5.0]`.
    pub rating: f64,
    pub series: String,
    /// External image URL or a local placeholder path.
    pub cover: String,
    /// Link to the book's page at the provider.
    pub url: String,
    pub source: CandidateSource,
}

/// Normalises a provider date to `YYYY-MM-DD`.
///
/// Year-only and year-month dates get `01` for the missing parts. Anything
/// that does not parse as a calendar-plausible date yields an empty string.
pub fn normalize_published_date(raw: &str) -> String {
    let date = raw.trim().split('T').next().unwrap_or_default();
    if date.is_empty() {
        return String::new();
    }

    let mut parts = date.split('-').map(str::trim);
    let year = parts.next().and_then(|y| y.parse::<u32>().ok());
    let month = match parts.next() {
        Some(m) => m.parse::<u32>().ok(),
        None => Some(1),
    };
    let day = match parts.next() {
        Some(d) => d.parse::<u32>().ok(),
        None => Some(1),
    };
    if parts.next().is_some() {
        return String::new();
    }

    match (year, month, day) {
        (Some(y), Some(m), Some(d))
            if (1..=12).contains(&m) && (1..=days_in_month(y, m)).contains(&d) =>
        {
            format!("{y:04}-{m:02}-{d:02}")
        }
        _ => String::new(),
    }
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Lowercases tags, replaces commas (the catalog's tag separator) with `_`,
/// and drops blanks and duplicates while keeping first-seen order.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim().to_lowercase().replace(',', "_");
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

/// Clamps a rating into `[0.0, MAX_RATING]`; NaN becomes zero.
pub fn clamp_rating(rating: f64) -> f64 {
    if rating.is_nan() {
        0.0
    } else {
        rating.clamp(0.0, MAX_RATING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_only_date_gets_january_first() {
        assert_eq!(normalize_published_date("1965"), "1965-01-01");
    }

    #[test]
    fn year_month_date_gets_first_day() {
        assert_eq!(normalize_published_date("2005-3"), "2005-03-01");
    }

    #[test]
    fn full_dates_are_kept() {
        assert_eq!(normalize_published_date("2019-10-08"), "2019-10-08");
        assert_eq!(normalize_published_date("2019-10-08T00:00:00Z"), "2019-10-08");
    }

    #[test]
    fn unparsable_dates_are_dropped() {
        assert_eq!(normalize_published_date(""), "");
        assert_eq!(normalize_published_date("unknown"), "");
        assert_eq!(normalize_published_date("2005-13"), "");
        assert_eq!(normalize_published_date("2005-xx"), "");
        assert_eq!(normalize_published_date("2005-02-31"), "");
        assert_eq!(normalize_published_date("2005-04-31"), "");
        assert_eq!(normalize_published_date("1900-02-29"), "");
        assert_eq!(normalize_published_date("1965-08-01-junk"), "");
    }

    #[test]
    fn leap_days_are_kept() {
        assert_eq!(normalize_published_date("2004-02-29"), "2004-02-29");
        assert_eq!(normalize_published_date("2000-02-29T00:00:00Z"), "2000-02-29");
    }

    #[test]
    fn tags_are_lowercased_and_deduplicated() {
        let tags = normalize_tags(["Science Fiction", "science fiction", "Fiction, Classic", " "]);
        assert_eq!(tags, vec!["science fiction", "fiction_ classic"]);
    }

    #[test]
    fn rating_is_clamped() {
        assert_eq!(clamp_rating(7.5), 5.0);
        assert_eq!(clamp_rating(-1.0), 0.0);
        assert_eq!(clamp_rating(f64::NAN), 0.0);
        assert_eq!(clamp_rating(4.25), 4.25);
    }

    #[test]
    fn candidate_serializes_camel_case_date() {
        let candidate = BookCandidate {
            id: "1".into(),
            title: "Dune".into(),
            authors: vec!["Frank Herbert".into()],
            description: String::new(),
            publisher: "Chilton".into(),
            published_date: "1965-01-01".into(),
            tags: vec![],
            rating: 4.5,
            series: String::new(),
            cover: "/static/generic_cover.jpg".into(),
            url: "https://example.com/1".into(),
            source: CandidateSource {
                id: "google".into(),
                description: "Google Books".into(),
                url: "https://books.google.com/".into(),
            },
        };
        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["publishedDate"], "1965-01-01");
        assert_eq!(json["source"]["id"], "google");
    }
}
