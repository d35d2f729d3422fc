// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `bindery search` command implementation.

use std::io::IsTerminal;

use bindery_core::{BinderyError, BookCandidate, BookQuery, SearchOverrides};
use bindery_metadata::{MetadataSearch, ProviderResults, SearchOutcome, SearchReport};

/// Run `bindery search <title>`.
///
/// Without `--provider` every enabled provider is queried concurrently.
/// Naming a provider that is not enabled is an error.
pub async fn run_search(
    search: &MetadataSearch,
    title: &str,
    provider: Option<&str>,
    json: bool,
    plain: bool,
) -> Result<(), BinderyError> {
    let query = BookQuery::titled(title);
    let overrides = SearchOverrides::none();

    let report = match provider {
        Some(name) => {
            let results = search
                .search_provider(name, &query, &overrides)
                .await
                .ok_or_else(|| BinderyError::PluginNotFound {
                    category: search.category().name().to_string(),
                    name: name.to_string(),
                })?;
            SearchReport {
                results: vec![results],
            }
        }
        None => search.search(&query, &overrides).await,
    };

    if json {
        let out = serde_json::to_string_pretty(&report)
            .map_err(|e| BinderyError::Internal(format!("failed to encode report: {e}")))?;
        println!("{out}");
        return Ok(());
    }

    let use_color = !plain && std::io::stdout().is_terminal();
    println!();
    if report.results.is_empty() {
        println!("  no metadata providers enabled");
    }
    for results in &report.results {
        println!("{}", format_header(results, use_color));
        for candidate in &results.candidates {
            println!("{}", format_candidate(candidate));
        }
    }
    if !report.results.is_empty() && report.is_empty() {
        println!("  no results for \"{title}\"");
    }
    println!();
    Ok(())
}

fn format_header(results: &ProviderResults, use_color: bool) -> String {
    let summary = match results.outcome {
        SearchOutcome::Completed => format!("{} results", results.candidates.len()),
        SearchOutcome::Failed => "failed".to_string(),
        SearchOutcome::TimedOut => "timed out".to_string(),
        SearchOutcome::NotImplemented => "not implemented".to_string(),
    };
    let summary = format!("{summary}, {}ms", results.elapsed_ms);

    if use_color {
        use colored::Colorize;
        let summary = match results.outcome {
            SearchOutcome::Completed => summary.green(),
            SearchOutcome::TimedOut | SearchOutcome::Failed => summary.yellow(),
            SearchOutcome::NotImplemented => summary.red(),
        };
        format!("  {} ({summary})", results.provider.bold())
    } else {
        format!("  {} ({summary})", results.provider)
    }
}

fn format_candidate(candidate: &BookCandidate) -> String {
    let mut line = format!("    {}", candidate.title);
    if !candidate.authors.is_empty() {
        line.push_str(&format!(" by {}", candidate.authors.join(", ")));
    }
    if !candidate.published_date.is_empty() {
        line.push_str(&format!(" ({})", candidate.published_date));
    }
    line.push_str(&format!("\n      {}", candidate.url));
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindery_test_utils::candidate;

    fn results(outcome: SearchOutcome, count: usize) -> ProviderResults {
        ProviderResults {
            provider: "google".into(),
            outcome,
            candidates: (0..count)
                .map(|i| candidate("google", &i.to_string(), "Dune"))
                .collect(),
            error: None,
            elapsed_ms: 42,
        }
    }

    #[test]
    fn header_summarises_outcome() {
        assert_eq!(
            format_header(&results(SearchOutcome::Completed, 3), false),
            "  google (3 results, 42ms)"
        );
        assert_eq!(
            format_header(&results(SearchOutcome::TimedOut, 0), false),
            "  google (timed out, 42ms)"
        );
    }

    #[test]
    fn candidate_line_skips_missing_fields() {
        let mut c = candidate("google", "vol1", "Dune");
        c.published_date = "1965-08-01".into();
        let line = format_candidate(&c);
        assert!(line.starts_with("    Dune by Test Author (1965-08-01)"));
        assert!(line.ends_with("https://example.test/google/vol1"));

        c.authors.clear();
        c.published_date.clear();
        assert!(format_candidate(&c).starts_with("    Dune\n"));
    }
}
