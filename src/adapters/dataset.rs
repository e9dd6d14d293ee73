use crate::domain::model::{Dataset, DomainRecord, SharedRecord};
use crate::utils::error::{AnalyzerError, Result};
use reqwest::Client;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// Column reference by header name or zero-based index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRef {
    Index(usize),
    Name(String),
}

impl ColumnRef {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<usize>() {
            Ok(index) => ColumnRef::Index(index),
            Err(_) => ColumnRef::Name(raw.to_string()),
        }
    }

    fn resolve(&self, headers: Option<&[String]>) -> Option<usize> {
        match self {
            ColumnRef::Index(index) => Some(*index),
            ColumnRef::Name(name) => headers?
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(name)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ColumnLayout {
    pub domain: ColumnRef,
    pub price: ColumnRef,
    pub date: ColumnRef,
    pub venue: ColumnRef,
    pub has_headers: bool,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            domain: ColumnRef::Index(1),
            price: ColumnRef::Name("price".to_string()),
            date: ColumnRef::Name("date".to_string()),
            venue: ColumnRef::Name("venue".to_string()),
            has_headers: true,
        }
    }
}

impl ColumnLayout {
    pub fn from_config<C: crate::domain::ports::ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            domain: ColumnRef::parse(config.domain_column()),
            price: ColumnRef::parse(config.price_column()),
            date: ColumnRef::parse(config.date_column()),
            venue: ColumnRef::parse(config.venue_column()),
            has_headers: config.has_headers(),
        }
    }
}

// 非 UTF-8 的欄位以替代字元解碼，不讓整份資料載入失敗
fn decode_cell(record: &csv::ByteRecord, index: usize) -> Option<String> {
    record
        .get(index)
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
}

fn optional_cell(record: &csv::ByteRecord, index: Option<usize>) -> Option<String> {
    let value = decode_cell(record, index?)?;
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Reads CSV rows into normalized records, keeping file order.
/// Rows without a domain cell, or with an empty one, are skipped.
pub fn read_records<R: Read>(reader: R, layout: &ColumnLayout) -> Result<Vec<SharedRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(layout.has_headers)
        .flexible(true)
        .from_reader(reader);

    let headers = if layout.has_headers {
        Some(
            csv_reader
                .byte_headers()?
                .iter()
                .map(|header| String::from_utf8_lossy(header).into_owned())
                .collect::<Vec<_>>(),
        )
    } else {
        None
    };
    let headers = headers.as_deref();

    let domain_index = layout.domain.resolve(headers).ok_or_else(|| {
        AnalyzerError::DatasetError {
            message: format!("domain column {:?} not found in header row", layout.domain),
        }
    })?;
    let price_index = layout.price.resolve(headers);
    let date_index = layout.date.resolve(headers);
    let venue_index = layout.venue.resolve(headers);

    tracing::debug!(
        "Column layout resolved: domain={}, price={:?}, date={:?}, venue={:?}",
        domain_index,
        price_index,
        date_index,
        venue_index
    );

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for row in csv_reader.byte_records() {
        let row = row?;
        let domain = match decode_cell(&row, domain_index) {
            Some(domain) if !domain.is_empty() => domain,
            _ => {
                skipped += 1;
                continue;
            }
        };

        records.push(Arc::new(DomainRecord::with_details(
            &domain,
            optional_cell(&row, price_index),
            optional_cell(&row, date_index),
            optional_cell(&row, venue_index),
        )));
    }

    if skipped > 0 {
        tracing::debug!("Skipped {} rows without a domain value", skipped);
    }
    Ok(records)
}

// 沒有任何網域列時視同資料無法使用
fn into_dataset(records: Vec<SharedRecord>, source: &str) -> Dataset {
    if records.is_empty() {
        tracing::warn!("⚠️ Dataset has no domain rows: {}", source);
        Dataset::unavailable()
    } else {
        Dataset::loaded(records)
    }
}

/// Local CSV. A missing file is the "dataset unavailable" state, not an error.
pub async fn load_local(path: &str, layout: &ColumnLayout) -> Result<Dataset> {
    if !Path::new(path).exists() {
        tracing::warn!("⚠️ Dataset file not found: {}", path);
        return Ok(Dataset::unavailable());
    }

    let data = tokio::fs::read(path).await?;
    let records = read_records(data.as_slice(), layout)?;
    Ok(into_dataset(records, path))
}

pub async fn fetch_remote(client: &Client, url: &str, layout: &ColumnLayout) -> Result<Dataset> {
    tracing::debug!("Fetching dataset from: {}", url);
    let response = client.get(url).send().await?.error_for_status()?;
    tracing::debug!("Dataset response status: {}", response.status());

    let body = response.bytes().await?;
    let records = read_records(body.as_ref(), layout)?;
    Ok(into_dataset(records, url))
}

pub async fn load_dataset(client: &Client, source: &str, layout: &ColumnLayout) -> Result<Dataset> {
    if source.starts_with("http://") || source.starts_with("https://") {
        fetch_remote(client, source, layout).await
    } else {
        load_local(source, layout).await
    }
}
