use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::domain::telemetry::model::counts::HourlyCount;
use crate::domain::telemetry::model::period::Period;
use crate::domain::telemetry::model::record::{ErrorCode, Outcome, TelemetryRecord};

pub const SYSTEM_MESSAGE: &str = "You are a reliable API diagnostics assistant.";
pub const COMPARISON_MAX_TOKENS: u32 = 1500;
pub const ERROR_SPREAD_MAX_TOKENS: u32 = 800;

/// Chart previews embedded in prompts are capped to the first 200
/// characters of the base64 text.
const CHART_PREVIEW_CHARS: usize = 200;

/// Group a period subset by (service, endpoint, status code) for the given
/// outcome and render it as a fixed-width table, header included, cells
/// right-aligned per column, rows sorted by group key ascending.
pub fn build_period_summary_payload(records: &[TelemetryRecord], outcome: Outcome) -> String {
    let mut groups: BTreeMap<(String, String, ErrorCode), u64> = BTreeMap::new();
    for record in records {
        if record.outcome != outcome {
            continue;
        }
        let key = (
            record.service_name.clone(),
            record.endpoint.clone(),
            record.response_status_code.clone(),
        );
        *groups.entry(key).or_default() += 1;
    }

    let header = ["service_name", "endpoint", "response_status_code", "count"];
    let rows: Vec<[String; 4]> = groups
        .into_iter()
        .map(|((service, endpoint, code), count)| {
            [service, endpoint, code.as_str().to_string(), count.to_string()]
        })
        .collect();

    let mut widths: [usize; 4] = header.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }

    let render = |cells: [&str; 4]| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| format!("{:>width$}", cell, width = w))
            .collect::<Vec<_>>()
            .join(" ")
    };

    let mut out = render(header);
    for row in &rows {
        out.push('\n');
        out.push_str(&render([&row[0], &row[1], &row[2], &row[3]]));
    }
    out
}

/// Render hourly counts as `"{hour}: {count}"` lines, ascending.
pub fn build_hourly_spread_payload(hourly: &[HourlyCount]) -> String {
    hourly
        .iter()
        .map(|h| format!("{}: {}", h.hour, h.count))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assemble the user prompt for the two-period comparison narrative.
pub fn build_comparison_prompt(
    outcome: Outcome,
    period1: &Period,
    period2: &Period,
    summary1: &str,
    summary2: &str,
    chart1_png_base64: Option<&str>,
    chart2_png_base64: Option<&str>,
) -> String {
    let status = outcome.label();
    let mut prompt = format!(
        "You are an expert in API telemetry diagnostics.\n\
         \n\
         ### Visual Input:\n\
         - Two charts showing `{status}` trends over two periods (provided as images).\n\
         \n\
         ### Tabular Data (grouped by service, endpoint, HTTP code):\n\
         \n\
         #### Period 1 ({p1_start} -> {p1_end}):\n\
         {summary1}\n\
         \n\
         #### Period 2 ({p2_start} -> {p2_end}):\n\
         {summary2}\n\
         \n\
         ### Tasks:\n\
         1. Identify dates with large differences (>3%) in `{status}` volume.\n\
         2. Analyze possible causes:\n\
         - Common errors: 401, 403, 404, 429, 500, 503, 504\n\
         - Time-window spikes (e.g., high 500s between 2pm-3pm)\n\
         - Differences in endpoint/service behavior\n\
         - Throttling or backend/server issues\n\
         - Region-specific errors\n\
         - High latency or timeouts\n",
        status = status,
        p1_start = period1.start_date(),
        p1_end = period1.last_date(),
        p2_start = period2.start_date(),
        p2_end = period2.last_date(),
        summary1 = summary1,
        summary2 = summary2,
    );

    if let Some(chart) = chart1_png_base64 {
        let _ = write!(
            prompt,
            "\n### Image 1 (base64 PNG):\n{}\n",
            preview(chart)
        );
    }
    if let Some(chart) = chart2_png_base64 {
        let _ = write!(
            prompt,
            "\n### Image 2 (base64 PNG):\n{}\n",
            preview(chart)
        );
    }

    let _ = write!(
        prompt,
        "\n### Output:\n\
         | Period 1 timeline | Period 1 {status} Value | Period 2 timeline | Period 2 {status} Value | Difference | Observation |\n\
         - list all the timelines in markdown\n\
         - 3-5 bullet points explaining what might have caused the significant differences.\n\
         - Don't guess - infer only from data shown\n\
         - Use easy understandable technical language suitable for a developer or operations engineer.\n",
        status = status,
    );
    prompt
}

/// Assemble the user prompt for the hourly error-spread narrative.
pub fn build_error_spread_prompt(hourly_payload: &str, error_code: &str, date: NaiveDate) -> String {
    format!(
        "You are an expert in API telemetry diagnostics.\n\
         \n\
         ### Error Spread Analysis:\n\
         - Analyze the hourly distribution of error code {error_code} on {date}.\n\
         - Explain what the pattern of occurrence suggests about the cause (e.g., server overload, maintenance, peak usage).\n\
         - Use only the data shown, do not speculate beyond it.\n\
         \n\
         ### Data Summary (hourly counts):\n\
         {hourly_payload}\n\
         \n\
         ### Output:\n\
         - Provide 2-3 bullet points summarizing insights on which time of day is most affected by this error spread and explain why this error spread happened as observed.\n",
    )
}

// The chart field is caller-supplied text, so truncate on a char boundary.
fn preview(b64: &str) -> &str {
    let mut cut = b64.len().min(CHART_PREVIEW_CHARS);
    while !b64.is_char_boundary(cut) {
        cut -= 1;
    }
    &b64[..cut]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(service: &str, endpoint: &str, code: &str) -> TelemetryRecord {
        TelemetryRecord::new(
            "2024-02-01T10:00:00Z".parse().ok(),
            service,
            endpoint,
            "eu-west-1",
            code,
        )
    }

    #[test]
    fn summary_table_is_right_aligned_with_header() {
        let records = vec![
            record("auth", "/login", "500"),
            record("auth", "/login", "500"),
            record("billing-gateway", "/charge", "503"),
            record("auth", "/login", "200"),
        ];
        let table = build_period_summary_payload(&records, Outcome::Failure);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "   service_name endpoint response_status_code count"
        );
        assert_eq!(
            lines[1],
            "           auth   /login                  500     2"
        );
        assert_eq!(
            lines[2],
            "billing-gateway  /charge                  503     1"
        );
    }

    #[test]
    fn summary_table_with_no_matches_is_header_only() {
        let records = vec![record("auth", "/login", "200")];
        let table = build_period_summary_payload(&records, Outcome::Failure);
        assert_eq!(table.lines().count(), 1);
    }

    #[test]
    fn hourly_payload_renders_hour_colon_count_lines() {
        let hourly = vec![
            HourlyCount { hour: 2, count: 4 },
            HourlyCount { hour: 14, count: 9 },
        ];
        assert_eq!(build_hourly_spread_payload(&hourly), "2: 4\n14: 9");
    }

    #[test]
    fn comparison_prompt_truncates_chart_previews() {
        let p1 = Period::from_dates(
            "Period 1",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
        )
        .unwrap();
        let p2 = Period::from_dates(
            "Period 2",
            NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 14).unwrap(),
        )
        .unwrap();
        let long_chart = "A".repeat(5000);
        let prompt = build_comparison_prompt(
            Outcome::Failure,
            &p1,
            &p2,
            "summary one",
            "summary two",
            Some(&long_chart),
            None,
        );

        assert!(prompt.contains("2024-01-01 -> 2024-01-07"));
        assert!(prompt.contains("summary two"));
        assert!(prompt.contains(&"A".repeat(200)));
        assert!(!prompt.contains(&"A".repeat(201)));
        assert!(!prompt.contains("Image 2"));
    }

    #[test]
    fn comparison_prompt_handles_multibyte_chart_text() {
        let p1 = Period::from_dates(
            "Period 1",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
        )
        .unwrap();
        let p2 = Period::from_dates(
            "Period 2",
            NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 14).unwrap(),
        )
        .unwrap();
        // 3-byte chars, so byte 200 falls inside a character.
        let chart = "€".repeat(100);
        let prompt = build_comparison_prompt(
            Outcome::Failure,
            &p1,
            &p2,
            "summary one",
            "summary two",
            Some(&chart),
            Some(&chart),
        );

        // 198 bytes = 66 whole chars; never a partial one.
        assert!(prompt.contains(&"€".repeat(66)));
        assert!(!prompt.contains(&"€".repeat(67)));
    }

    #[test]
    fn error_spread_prompt_embeds_code_date_and_counts() {
        let prompt = build_error_spread_prompt(
            "9: 3\n10: 7",
            "500",
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        );
        assert!(prompt.contains("error code 500 on 2024-02-01"));
        assert!(prompt.contains("9: 3\n10: 7"));
    }
}
