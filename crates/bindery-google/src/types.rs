// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Books API response types.
//!
//! Only the fields the provider maps are modelled; everything else in the
//! volumes payload is ignored. Every field is optional upstream, so every
//! field defaults.

use serde::Deserialize;

/// Response body of `GET /books/v1/volumes`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VolumesResponse {
    /// Absent when nothing matched.
    #[serde(default)]
    pub items: Vec<Volume>,
}

/// One search hit.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub id: String,
    #[serde(default)]
    pub volume_info: VolumeInfo,
}

/// Bibliographic data of a volume.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeInfo {
    pub title: String,
    pub authors: Vec<String>,
    pub description: String,
    pub publisher: String,
    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
    pub published_date: String,
    pub categories: Vec<String>,
    /// Already on a 0-5 scale.
    pub average_rating: Option<f64>,
    pub image_links: Option<ImageLinks>,
}

/// Cover image URLs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageLinks {
    pub small_thumbnail: Option<String>,
    pub thumbnail: Option<String>,
}
