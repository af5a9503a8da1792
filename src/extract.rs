use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::ExtractError;
use crate::items::*;
use crate::normalize::Dispatch;

/// Minimal presence check applied to a raw item before extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidacy {
    /// `metadata` is truthy. Nested sections are then assumed present.
    Metadata,
    /// `metadata`, `spec` and `status` are all truthy.
    AllSections,
}

impl Candidacy {
    pub fn admits(&self, document: &Value) -> bool {
        match self {
            Candidacy::Metadata => is_truthy(document.get("metadata")),
            Candidacy::AllSections => {
                is_truthy(document.get("metadata"))
                    && is_truthy(document.get("spec"))
                    && is_truthy(document.get("status"))
            }
        }
    }
}

/// Per-kind extraction contract: which documents are candidates, how a
/// collection response is dispatched, and how a candidate maps to a record.
pub trait ResourcePolicy {
    type Item;

    const KIND: ResourceKind;
    const CANDIDACY: Candidacy;
    const DISPATCH: Dispatch;

    /// Builds the record from a document that already passed candidacy.
    fn build(document: &Value) -> Result<Self::Item, ExtractError>;

    fn is_candidate(document: &Value) -> bool {
        Self::CANDIDACY.admits(document)
    }
}

/// Extracts one document: `Ok(None)` when it is not a candidate.
pub fn extract<P: ResourcePolicy>(document: &Value) -> Result<Option<P::Item>, ExtractError> {
    if !P::is_candidate(document) {
        return Ok(None);
    }
    P::build(document).map(Some)
}

pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_none_or(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn text_or(value: Option<&Value>, default: &str) -> String {
    if is_truthy(value) {
        text(value).unwrap_or_else(|| default.to_string())
    } else {
        default.to_string()
    }
}

fn count(value: Option<&Value>) -> i64 {
    value.and_then(Value::as_i64).unwrap_or(0)
}

fn section<'a>(
    parent: &'a Value,
    key: &'static str,
    path: &'static str,
    kind: ResourceKind,
    document: &Value,
) -> Result<&'a Value, ExtractError> {
    match parent.get(key) {
        Some(value) if !value.is_null() => Ok(value),
        _ => Err(ExtractError::UnexpectedNesting {
            kind,
            name: document_name(document),
            path,
        }),
    }
}

fn document_name(document: &Value) -> String {
    document
        .get("metadata")
        .and_then(|m| m.get("name"))
        .and_then(Value::as_str)
        .unwrap_or(UNDEFINED)
        .to_string()
}

/// Renders an RFC 3339 timestamp as `YYYY-MM-DD HH:MM:SS` in UTC. Anything
/// else is returned untouched.
pub fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.with_timezone(&Utc).format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => raw.to_string(),
    }
}

pub struct BackupPolicy;

impl ResourcePolicy for BackupPolicy {
    type Item = BackupItem;

    const KIND: ResourceKind = ResourceKind::Backup;
    const CANDIDACY: Candidacy = Candidacy::Metadata;
    const DISPATCH: Dispatch = Dispatch::Shape;

    fn build(document: &Value) -> Result<BackupItem, ExtractError> {
        let metadata = &document["metadata"];
        let status = section(document, "status", "status", Self::KIND, document)?;
        let spec = section(document, "spec", "spec", Self::KIND, document)?;

        Ok(BackupItem {
            name: text(metadata.get("name")),
            status: text_or(status.get("phase"), NEW_PHASE),
            errors: count(status.get("errors")),
            warnings: count(status.get("warnings")),
            created: text_or(metadata.get("creationTimestamp"), NIL),
            expiration: text_or(status.get("expiration"), NOT_AVAILABLE),
            storage_location: text_or(spec.get("storageLocation"), NONE),
            selector: NONE.to_string(),
        })
    }
}

pub struct SchedulePolicy;

impl ResourcePolicy for SchedulePolicy {
    type Item = ScheduleItem;

    const KIND: ResourceKind = ResourceKind::Schedule;
    const CANDIDACY: Candidacy = Candidacy::AllSections;
    const DISPATCH: Dispatch = Dispatch::KindTag {
        list: "ScheduleList",
        single: "Schedule",
    };

    // Schedules always carry a template; a missing one is a contract violation.
    fn build(document: &Value) -> Result<ScheduleItem, ExtractError> {
        let metadata = &document["metadata"];
        let spec = &document["spec"];
        let status = &document["status"];
        let template = section(spec, "template", "spec.template", Self::KIND, document)?;

        // A present `null` selector prints as `null`; only absence means none.
        let selector = match template.get("labelSelector") {
            Some(selector) => {
                serde_json::to_string_pretty(selector).unwrap_or_else(|_| NONE.to_string())
            }
            None => NONE.to_string(),
        };

        let last_backup = if is_truthy(status.get("lastBackup")) {
            text(status.get("lastBackup"))
                .map(|raw| format_timestamp(&raw))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        } else {
            NOT_AVAILABLE.to_string()
        };

        Ok(ScheduleItem {
            name: text(metadata.get("name")),
            status: text(status.get("phase")),
            created: text(metadata.get("creationTimestamp")),
            schedule: text(spec.get("schedule")),
            backup_ttl: text(template.get("ttl")),
            last_backup,
            selector,
            paused: false,
        })
    }
}

pub struct RestorePolicy;

impl ResourcePolicy for RestorePolicy {
    type Item = RestoreItem;

    const KIND: ResourceKind = ResourceKind::Restore;
    const CANDIDACY: Candidacy = Candidacy::Metadata;
    const DISPATCH: Dispatch = Dispatch::Shape;

    // A fresh restore has no status until the controller picks it up.
    fn build(document: &Value) -> Result<RestoreItem, ExtractError> {
        let metadata = &document["metadata"];
        let spec = section(document, "spec", "spec", Self::KIND, document)?;
        let status = document.get("status").unwrap_or(&Value::Null);

        let source = if is_truthy(spec.get("backupName")) {
            text_or(spec.get("backupName"), NONE)
        } else {
            text_or(spec.get("scheduleName"), NONE)
        };

        Ok(RestoreItem {
            name: text(metadata.get("name")),
            status: text_or(status.get("phase"), NEW_PHASE),
            source,
            errors: count(status.get("errors")),
            warnings: count(status.get("warnings")),
            created: text_or(metadata.get("creationTimestamp"), NIL),
            restore_pvs: spec.get("restorePVs").and_then(Value::as_bool).unwrap_or(false),
        })
    }
}

pub struct StoragePolicy;

impl ResourcePolicy for StoragePolicy {
    type Item = StorageItem;

    const KIND: ResourceKind = ResourceKind::BackupStorageLocation;
    const CANDIDACY: Candidacy = Candidacy::Metadata;
    const DISPATCH: Dispatch = Dispatch::Shape;

    // Only status and created get defaults, the rest passes through.
    fn build(document: &Value) -> Result<StorageItem, ExtractError> {
        let metadata = &document["metadata"];
        let status = section(document, "status", "status", Self::KIND, document)?;
        let spec = section(document, "spec", "spec", Self::KIND, document)?;

        Ok(StorageItem {
            name: text(metadata.get("name")),
            status: text_or(status.get("phase"), NEW_PHASE),
            last_validation_time: text(status.get("lastValidationTime")),
            created: text_or(metadata.get("creationTimestamp"), NIL),
            backup_sync_period: text(spec.get("backupSyncPeriod")),
            config: spec.get("config").filter(|c| !c.is_null()).cloned(),
        })
    }
}
