use serde_json::Value;

use crate::error::ExtractError;
use crate::extract::{BackupPolicy, ResourcePolicy, RestorePolicy, SchedulePolicy, StoragePolicy, extract, is_truthy};
use crate::items::{BackupItem, RestoreItem, ScheduleItem, StorageItem};

/// How a raw response is recognized as a list or a single resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Structural: `items` means a list, `metadata` means a single resource.
    Shape,
    /// Explicit `kind` tag for the list and the singleton forms.
    KindTag {
        list: &'static str,
        single: &'static str,
    },
}

/// Reduces one API response to records of a single kind, in source order.
///
/// Non-candidate items are dropped and unrecognized responses give an empty
/// sequence. A candidate that breaks the nesting contract fails the call.
pub fn normalize<P: ResourcePolicy>(raw: Option<&Value>) -> Result<Vec<P::Item>, ExtractError> {
    let data = match raw {
        Some(data) if is_truthy(Some(data)) => data,
        _ => return Ok(Vec::new()),
    };

    match P::DISPATCH {
        Dispatch::Shape => by_shape::<P>(data),
        Dispatch::KindTag { list, single } => by_kind_tag::<P>(data, list, single),
    }
}

fn by_shape<P: ResourcePolicy>(data: &Value) -> Result<Vec<P::Item>, ExtractError> {
    if is_truthy(data.get("items")) {
        let Some(items) = data["items"].as_array() else {
            return Ok(Vec::new());
        };
        return items
            .iter()
            .filter(|item| P::is_candidate(item))
            .map(P::build)
            .collect();
    }

    if is_truthy(data.get("metadata")) {
        return Ok(vec![P::build(data)?]);
    }

    Ok(Vec::new())
}

fn by_kind_tag<P: ResourcePolicy>(
    data: &Value,
    list: &str,
    single: &str,
) -> Result<Vec<P::Item>, ExtractError> {
    let kind = data.get("kind").and_then(Value::as_str);

    if kind == Some(list) && is_truthy(data.get("items")) {
        let Some(items) = data["items"].as_array() else {
            return Ok(Vec::new());
        };
        let mut records = Vec::with_capacity(items.len());
        for item in items {
            if let Some(record) = extract::<P>(item)? {
                records.push(record);
            }
        }
        Ok(records)
    } else if kind == Some(single) {
        Ok(extract::<P>(data)?.into_iter().collect())
    } else {
        Ok(Vec::new())
    }
}

pub fn parse_backups(raw: &Value) -> Result<Vec<BackupItem>, ExtractError> {
    normalize::<BackupPolicy>(Some(raw))
}

pub fn parse_schedules(raw: &Value) -> Result<Vec<ScheduleItem>, ExtractError> {
    normalize::<SchedulePolicy>(Some(raw))
}

pub fn parse_storages(raw: &Value) -> Result<Vec<StorageItem>, ExtractError> {
    normalize::<StoragePolicy>(Some(raw))
}

pub fn parse_restores(raw: &Value) -> Result<Vec<RestoreItem>, ExtractError> {
    normalize::<RestorePolicy>(Some(raw))
}

/// Decodes a response body. Some servers wrap the document in a JSON string,
/// which is unwrapped once. An empty body decodes to `null`.
pub fn decode_payload(body: &str) -> Result<Value, ExtractError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    let value: Value =
        serde_json::from_str(body).map_err(|e| ExtractError::Decode(e.to_string()))?;

    match value {
        Value::String(inner) if inner.trim().is_empty() => Ok(Value::Null),
        Value::String(inner) => {
            serde_json::from_str(&inner).map_err(|e| ExtractError::Decode(e.to_string()))
        }
        other => Ok(other),
    }
}
