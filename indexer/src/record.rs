//! Crawl records: one JSON object per line with the page body in `html_content`.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRecord {
    pub html: String,
    pub url: String,
    pub oid: String,
}

/// Parse one input line. `Ok(None)` means valid JSON without page content.
pub fn parse_line(line: &str) -> serde_json::Result<Option<CrawlRecord>> {
    let value: Value = serde_json::from_str(line)?;
    Ok(from_value(&value))
}

pub fn from_value(value: &Value) -> Option<CrawlRecord> {
    let html = value.get("html_content")?.as_str()?.to_owned();
    let url = value.get("url").and_then(Value::as_str).unwrap_or_default().to_owned();
    Some(CrawlRecord { html, url, oid: object_id(value).unwrap_or_default().to_owned() })
}

// Mongo exports nest the id as {"_id": {"$oid": "..."}}.
fn object_id(value: &Value) -> Option<&str> {
    if let Some(oid) = value.get("$oid").and_then(Value::as_str) {
        return Some(oid);
    }
    match value.get("_id")? {
        Value::String(s) => Some(s.as_str()),
        id => id.get("$oid").and_then(Value::as_str),
    }
}
