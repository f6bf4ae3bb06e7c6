//! Digest content generator.
//!
//! Builds email content from the final result list. Rendering is pure; the
//! caller supplies the timestamp so output stays deterministic.

use chrono::{DateTime, Utc};
use std::fmt::Write;

use crate::config::Settings;
use crate::search::JobResult;

/// Fallback line when a run finds nothing.
const EMPTY_MESSAGE: &str = "No results found today.";

/// Generates digest email content from job results.
pub struct DigestGenerator;

impl DigestGenerator {
    /// Generate the HTML email body.
    ///
    /// Results render as one list per domain group, largest group first with
    /// alphabetical domain order breaking ties. The footer echoes the query,
    /// regions, sites, and recency window so the recipient can audit what
    /// was searched.
    #[must_use]
    pub fn generate_html(
        results: &[JobResult],
        settings: &Settings,
        generated_at: DateTime<Utc>,
    ) -> String {
        let timestamp = generated_at.format("%Y-%m-%d %H:%M UTC").to_string();

        let groups = group_by_domain(results);
        let mut groups_html = String::new();
        for (domain, items) in &groups {
            let _ = write!(
                groups_html,
                r#"
            <div class="group">
                <h3 class="group-title">{domain} <span class="count">({count})</span></h3>
                <ul class="jobs">
"#,
                domain = html_escape(domain),
                count = items.len(),
            );
            for item in items {
                let _ = writeln!(
                    groups_html,
                    r#"                    <li><a href="{url}" target="_blank" rel="noopener noreferrer">{title}</a></li>"#,
                    url = html_escape(&item.url),
                    title = html_escape(&item.title),
                );
            }
            groups_html.push_str("                </ul>\n            </div>\n");
        }
        if groups_html.is_empty() {
            groups_html = format!(r#"<p class="empty">{EMPTY_MESSAGE}</p>"#);
        }

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', sans-serif;
            line-height: 1.6;
            color: #1f2937;
            background-color: #f3f4f6;
            margin: 0;
            padding: 20px;
        }}
        .container {{
            max-width: 700px;
            margin: 0 auto;
            background: #ffffff;
            border-radius: 12px;
            overflow: hidden;
            border: 1px solid #e5e7eb;
        }}
        .header {{
            background: linear-gradient(135deg, #0ea5e9 0%, #06b6d4 100%);
            color: white;
            padding: 24px;
        }}
        .header h1 {{
            margin: 0 0 6px 0;
            font-size: 24px;
            font-weight: 700;
        }}
        .header .subtitle {{
            opacity: 0.9;
            font-size: 14px;
        }}
        .content {{
            padding: 24px;
        }}
        .group-title {{
            font-size: 16px;
            font-weight: 600;
            color: #111827;
            margin: 16px 0 6px 0;
            padding-bottom: 4px;
            border-bottom: 1px solid #e5e7eb;
        }}
        .group-title .count {{
            color: #6b7280;
            font-weight: 400;
            font-size: 14px;
        }}
        .jobs {{
            margin: 6px 0 12px 0;
            padding-left: 20px;
        }}
        .jobs li {{
            margin-bottom: 6px;
        }}
        .jobs a {{
            color: #0ea5e9;
            text-decoration: none;
        }}
        .empty {{
            color: #6b7280;
        }}
        .footer {{
            background: #f9fafb;
            padding: 14px 24px;
            font-size: 12px;
            color: #6b7280;
            border-top: 1px solid #e5e7eb;
        }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Daily Job Digest</h1>
            <div class="subtitle">Generated: {timestamp}</div>
        </div>
        <div class="content">
            {groups_html}
        </div>
        <div class="footer">
            Filters: QUERY={query} | REGIONS={regions} | SITES={sites} | TIME_FILTER={recency}
        </div>
    </div>
</body>
</html>"#,
            timestamp = timestamp,
            groups_html = groups_html,
            query = html_escape(&settings.query),
            regions = html_escape(&settings.regions.join(", ")),
            sites = html_escape(&settings.sites.join(", ")),
            recency = settings.recency,
        )
    }

    /// Generate the plain-text email body.
    #[must_use]
    pub fn generate_text(
        results: &[JobResult],
        settings: &Settings,
        generated_at: DateTime<Utc>,
    ) -> String {
        let timestamp = generated_at.format("%Y-%m-%d %H:%M UTC").to_string();

        let mut text = format!(
            "Daily Job Digest\nGenerated: {timestamp}\n{}\n\n",
            "=".repeat(60)
        );

        let groups = group_by_domain(results);
        if groups.is_empty() {
            text.push_str(EMPTY_MESSAGE);
            text.push('\n');
        } else {
            for (domain, items) in &groups {
                let _ = writeln!(text, "{domain} ({count})", count = items.len());
                text.push_str(&"-".repeat(40));
                text.push('\n');
                for item in items {
                    let _ = writeln!(text, "- {}", item.title);
                    if !item.url.is_empty() {
                        let _ = writeln!(text, "  {}", item.url);
                    }
                }
                text.push('\n');
            }
        }

        let _ = write!(
            text,
            "{}\nFilters: QUERY={query} | REGIONS={regions} | SITES={sites} | TIME_FILTER={recency}\n",
            "=".repeat(60),
            query = settings.query,
            regions = settings.regions.join(", "),
            sites = settings.sites.join(", "),
            recency = settings.recency,
        );

        text
    }
}

/// Group results by domain, keeping first-appearance order inside each group.
///
/// Groups come back ordered by descending size, then ascending domain name.
fn group_by_domain(results: &[JobResult]) -> Vec<(String, Vec<&JobResult>)> {
    let mut groups: Vec<(String, Vec<&JobResult>)> = Vec::new();
    for result in results {
        match groups.iter_mut().find(|(domain, _)| domain == &result.domain) {
            Some((_, items)) => items.push(result),
            None => groups.push((result.domain.clone(), vec![result])),
        }
    }
    groups.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(&b.0)));
    groups
}

/// Simple HTML escaping for user content.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
