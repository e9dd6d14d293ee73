use crate::app::view::DetailView;
use crate::core::report::format_value;
use crate::domain::model::{
    DatasetStatus, DetailCategory, KeywordResult, MatchCategory, SortDirection, SortMetric,
    SortSpec,
};
use std::io::{self, Write};

const PLACEHOLDER: &str = "—";

const COLUMNS: [(&str, SortMetric); 4] = [
    ("Prefix", SortMetric::Prefix),
    ("Suffix", SortMetric::Suffix),
    ("Substring", SortMetric::Substring),
    ("Total", SortMetric::Total),
];

fn header_label(title: &str, metric: SortMetric, sort: Option<SortSpec>) -> String {
    match sort {
        Some(spec) if spec.metric == metric => match spec.direction {
            SortDirection::Ascending => format!("{} ▲", title),
            SortDirection::Descending => format!("{} ▼", title),
        },
        _ => title.to_string(),
    }
}

fn cell(result: &KeywordResult, metric: SortMetric) -> String {
    let selection = match metric {
        SortMetric::Prefix => DetailCategory::Category(MatchCategory::Prefix),
        SortMetric::Suffix => DetailCategory::Category(MatchCategory::Suffix),
        SortMetric::Substring => DetailCategory::Category(MatchCategory::Substring),
        SortMetric::Total => DetailCategory::Total,
    };
    let count = result.count(selection);
    if count == 0 {
        return "0".to_string();
    }
    format!("{} ({})", count, format_value(result.value(selection)))
}

/// Keyword table: one row per result with count and summed value per column.
pub fn render_table<W: Write>(
    out: &mut W,
    results: &[KeywordResult],
    sort: Option<SortSpec>,
) -> io::Result<()> {
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(results.len() + 1);

    let mut header = vec!["#".to_string(), "Keyword".to_string()];
    header.extend(
        COLUMNS
            .iter()
            .map(|(title, metric)| header_label(title, *metric, sort)),
    );
    rows.push(header);

    for (index, result) in results.iter().enumerate() {
        let mut row = vec![(index + 1).to_string(), result.keyword.clone()];
        row.extend(COLUMNS.iter().map(|(_, metric)| cell(result, *metric)));
        rows.push(row);
    }

    let mut widths = vec![0usize; rows[0].len()];
    for row in &rows {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.chars().count());
        }
    }

    for (line, row) in rows.iter().enumerate() {
        let padded: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(value, width)| {
                let pad = width - value.chars().count();
                format!("{}{}", value, " ".repeat(pad))
            })
            .collect();
        writeln!(out, "{}", padded.join("  ").trim_end())?;

        if line == 0 {
            let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
            writeln!(out, "{}", rule.join("  "))?;
        }
    }

    if results.is_empty() {
        writeln!(out, "(no keywords)")?;
    }
    Ok(())
}

fn or_placeholder(value: Option<&str>) -> &str {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => PLACEHOLDER,
    }
}

pub fn render_detail<W: Write>(out: &mut W, view: &DetailView<'_>) -> io::Result<()> {
    writeln!(
        out,
        "[{}] Matches for \"{}\" ({})",
        view.category.title(),
        view.keyword,
        view.records.len()
    )?;

    if view.records.is_empty() {
        writeln!(out, "  No domains from the dataset matched this category.")?;
        return Ok(());
    }

    for record in &view.records {
        let domain = if record.domain.is_empty() {
            PLACEHOLDER
        } else {
            record.domain.as_str()
        };
        writeln!(out, "  - {}", domain)?;
        writeln!(
            out,
            "    Price: {}  Date: {}  Venue: {}",
            or_placeholder(record.price.as_deref()),
            or_placeholder(record.date.as_deref()),
            or_placeholder(record.venue.as_deref())
        )?;
    }
    Ok(())
}

pub fn render_status<W: Write>(out: &mut W, title: &str, message: &str) -> io::Result<()> {
    writeln!(out, "== {} ==", title)?;
    writeln!(out, "{}", message)
}

pub fn render_dataset_status<W: Write>(
    out: &mut W,
    status: DatasetStatus,
    size: usize,
) -> io::Result<()> {
    match status {
        DatasetStatus::Loaded if size > 0 => writeln!(out, "Dataset loaded: {} domains.", size),
        _ => render_status(
            out,
            "Dataset unavailable",
            "The CSV data could not be loaded. Check the dataset path and try again.",
        ),
    }
}
