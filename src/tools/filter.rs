use serde_json::Value;
use tracing::warn;

/// Explicit allow-list of VOD ids, either already split or comma-delimited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecificVods {
    List(Vec<String>),
    Delimited(String),
}

impl SpecificVods {
    /// Delimited input is split on commas, trimmed, and empty pieces dropped.
    /// Lists are taken verbatim.
    pub fn normalize(&self) -> Vec<String> {
        match self {
            SpecificVods::List(ids) => ids.clone(),
            SpecificVods::Delimited(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

impl From<&str> for SpecificVods {
    fn from(s: &str) -> Self { SpecificVods::Delimited(s.to_string()) }
}
impl From<String> for SpecificVods {
    fn from(s: String) -> Self { SpecificVods::Delimited(s) }
}
impl From<Vec<String>> for SpecificVods {
    fn from(v: Vec<String>) -> Self { SpecificVods::List(v) }
}
impl From<&[&str]> for SpecificVods {
    fn from(v: &[&str]) -> Self { SpecificVods::List(v.iter().map(|s| s.to_string()).collect()) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criteria {
    /// Selects the head of the list.
    Latest,
    /// Selects the tail of the list.
    First,
}

impl Criteria {
    /// Case-insensitive, surrounding whitespace ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "latest" => Some(Criteria::Latest),
            "first" => Some(Criteria::First),
            _ => None,
        }
    }
}

/// Narrow `ids` by an explicit allow-list or a named criteria.
///
/// An allow-list wins and is returned as given, without checking membership
/// in `ids`. `latest` picks `ids[0]` and `first` picks the last element;
/// existing callers depend on that mapping. Never fails: bad input degrades
/// to an empty or unmodified copy with a warning.
pub fn filter_video_ids(ids: &[String], criteria: Option<&str>, specific: Option<&SpecificVods>) -> Vec<String> {
    if ids.is_empty() {
        warn!("no video ids to filter");
        return Vec::new();
    }

    if let Some(specific) = specific {
        let wanted = specific.normalize();
        if wanted.is_empty() {
            warn!("specific vods given but empty after normalizing");
        }
        return wanted;
    }

    let raw = match criteria.map(str::trim) {
        Some(c) if !c.is_empty() => c,
        _ => return ids.to_vec(),
    };

    match Criteria::parse(raw) {
        Some(Criteria::Latest) => ids[..1].to_vec(),
        Some(Criteria::First) => ids[ids.len() - 1..].to_vec(),
        None => {
            warn!(criteria = raw, "unknown criteria, returning all ids");
            ids.to_vec()
        }
    }
}

/// Same as [`filter_video_ids`] for ids loaded as JSON. Anything other than
/// an array of strings is rejected with a warning and yields an empty vec.
pub fn filter_video_ids_value(ids: &Value, criteria: Option<&str>, specific: Option<&SpecificVods>) -> Vec<String> {
    let Some(items) = ids.as_array() else {
        warn!(kind = json_kind(ids), "video ids are not a list");
        return Vec::new();
    };
    let mut list = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(s) => list.push(s.to_string()),
            None => {
                warn!(kind = json_kind(item), "video id list holds a non-string entry");
                return Vec::new();
            }
        }
    }
    filter_video_ids(&list, criteria, specific)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
