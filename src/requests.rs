use std::sync::LazyLock;
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::RequestError;
use crate::items::{ResourceKind, VELERO_API_VERSION};

// Optional DNS-style prefix, then a 63-char name.
static LABEL_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*/)?[A-Za-z0-9]([-A-Za-z0-9_.]{0,61}[A-Za-z0-9])?$")
        .expect("label key pattern is valid")
});

/// Raw text of the create backup / create schedule forms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateResourceForm {
    pub metadata_name: String,
    pub spec_included_namespaces: String,
    pub spec_ttl: String,
    pub spec_schedule: String,
    pub spec_labels: String,
}

/// Payload sent by the forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRequest {
    pub metadata_name: String,
    #[serde(rename = "spec_includedNamespaces")]
    pub spec_included_namespaces: Vec<String>,
    pub spec_ttl: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec_schedule: Option<String>,
    #[serde(default)]
    pub spec_labels: Vec<String>,
}

impl CreateResourceForm {
    pub fn into_backup_request(self) -> Result<CreateRequest, RequestError> {
        self.into_request(false)
    }

    pub fn into_schedule_request(self) -> Result<CreateRequest, RequestError> {
        self.into_request(true)
    }

    fn into_request(self, with_schedule: bool) -> Result<CreateRequest, RequestError> {
        let metadata_name = self.metadata_name.trim().to_string();
        if metadata_name.is_empty() {
            return Err(RequestError::EmptyField("metadata_name"));
        }
        if self.spec_ttl.trim().is_empty() {
            return Err(RequestError::EmptyField("spec_ttl"));
        }
        if with_schedule && self.spec_schedule.trim().is_empty() {
            return Err(RequestError::EmptyField("spec_schedule"));
        }

        let spec_included_namespaces = split_list(&self.spec_included_namespaces);
        if spec_included_namespaces.is_empty() {
            return Err(RequestError::EmptyField("spec_includedNamespaces"));
        }

        Ok(CreateRequest {
            metadata_name,
            spec_included_namespaces,
            spec_ttl: self.spec_ttl.trim().to_string(),
            spec_schedule: with_schedule.then(|| self.spec_schedule.trim().to_string()),
            spec_labels: split_list(&self.spec_labels),
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses `key=value` entries into a `matchLabels` map. Empty entries are
/// skipped; everything after the first `=` is the value.
pub fn parse_match_labels(labels: &[String]) -> Result<IndexMap<String, String>, RequestError> {
    let mut match_labels = IndexMap::new();
    for label in labels.iter().map(|l| l.trim()).filter(|l| !l.is_empty()) {
        let Some((key, value)) = label.split_once('=') else {
            return Err(RequestError::InvalidLabel(label.to_string()));
        };
        if key.is_empty() {
            return Err(RequestError::EmptyLabelKey(label.to_string()));
        }
        if !LABEL_KEY.is_match(key) {
            return Err(RequestError::InvalidLabel(label.to_string()));
        }
        match_labels.insert(key.to_string(), value.to_string());
    }
    Ok(match_labels)
}

fn backup_spec(request: &CreateRequest, storage_location: &str) -> Result<Value, RequestError> {
    let mut spec = json!({
        "includedNamespaces": request.spec_included_namespaces,
        "ttl": request.spec_ttl,
        "storageLocation": storage_location,
        "defaultVolumesToFsBackup": true,
    });

    let match_labels = parse_match_labels(&request.spec_labels)?;
    if !match_labels.is_empty() {
        spec["labelSelector"] = json!({ "matchLabels": match_labels });
    }
    Ok(spec)
}

pub fn backup_manifest(
    request: &CreateRequest,
    namespace: &str,
    storage_location: &str,
) -> Result<Value, RequestError> {
    Ok(json!({
        "apiVersion": VELERO_API_VERSION,
        "kind": ResourceKind::Backup.kind(),
        "metadata": {
            "name": request.metadata_name,
            "namespace": namespace,
        },
        "spec": backup_spec(request, storage_location)?,
    }))
}

pub fn schedule_manifest(
    request: &CreateRequest,
    namespace: &str,
    storage_location: &str,
) -> Result<Value, RequestError> {
    let schedule = request
        .spec_schedule
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(RequestError::EmptyField("spec_schedule"))?;

    Ok(json!({
        "apiVersion": VELERO_API_VERSION,
        "kind": ResourceKind::Schedule.kind(),
        "metadata": {
            "name": request.metadata_name,
            "namespace": namespace,
        },
        "spec": {
            "schedule": schedule,
            "template": backup_spec(request, storage_location)?,
        },
    }))
}

/// Backups are removed through a `DeleteBackupRequest`, not a direct delete.
pub fn delete_backup_request_manifest(backup_name: &str, namespace: &str) -> Result<Value, RequestError> {
    if backup_name.trim().is_empty() {
        return Err(RequestError::MissingName);
    }

    Ok(json!({
        "apiVersion": VELERO_API_VERSION,
        "kind": ResourceKind::DeleteBackupRequest.kind(),
        "metadata": {
            "name": format!("{}-delete-request", backup_name),
            "namespace": namespace,
        },
        "spec": {
            "backupName": backup_name,
        },
    }))
}

/// What a restore is made from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreSource<'a> {
    Backup(&'a str),
    /// Velero picks the latest completed backup of the schedule.
    Schedule(&'a str),
}

impl RestoreSource<'_> {
    pub fn kind(&self) -> ResourceKind {
        match self {
            RestoreSource::Backup(_) => ResourceKind::Backup,
            RestoreSource::Schedule(_) => ResourceKind::Schedule,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            RestoreSource::Backup(name) | RestoreSource::Schedule(name) => name,
        }
    }
}

/// Restore named `<source>-restore`, including persistent volumes.
pub fn restore_manifest(source: RestoreSource<'_>, namespace: &str) -> Result<Value, RequestError> {
    let name = source.name().trim();
    if name.is_empty() {
        return Err(RequestError::MissingName);
    }

    let mut spec = json!({ "restorePVs": true });
    match source {
        RestoreSource::Backup(_) => spec["backupName"] = json!(name),
        RestoreSource::Schedule(_) => spec["scheduleName"] = json!(name),
    }

    Ok(json!({
        "apiVersion": VELERO_API_VERSION,
        "kind": ResourceKind::Restore.kind(),
        "metadata": {
            "name": format!("{}-restore", name),
            "namespace": namespace,
        },
        "spec": spec,
    }))
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Plain-text description: top-level `key: value` lines, with objects expanded
/// one level as indented `inner: value` lines.
pub fn describe(resource: &Value) -> String {
    let Some(map) = resource.as_object() else {
        return String::new();
    };

    let mut out = String::new();
    for (key, value) in map {
        match value {
            Value::Object(inner) => {
                out.push_str(&format!("{}:\n", key));
                for (inner_key, inner_value) in inner {
                    out.push_str(&format!("  {}: {}\n", inner_key, describe_value(inner_value)));
                }
            }
            other => out.push_str(&format!("{}: {}\n", key, describe_value(other))),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> CreateResourceForm {
        CreateResourceForm {
            metadata_name: "nightly".into(),
            spec_included_namespaces: "apps, db".into(),
            spec_ttl: "72h0m0s".into(),
            spec_schedule: "0 1 * * *".into(),
            spec_labels: "app=web,tier=front".into(),
        }
    }

    #[test]
    fn form_splits_lists() {
        let request = form().into_schedule_request().unwrap();
        assert_eq!(request.spec_included_namespaces, vec!["apps", "db"]);
        assert_eq!(request.spec_labels, vec!["app=web", "tier=front"]);
        assert_eq!(request.spec_schedule.as_deref(), Some("0 1 * * *"));
    }

    #[test]
    fn form_rejects_empty_fields() {
        let mut f = form();
        f.spec_ttl.clear();
        assert_eq!(f.into_backup_request(), Err(RequestError::EmptyField("spec_ttl")));

        let mut f = form();
        f.spec_schedule = "  ".into();
        assert_eq!(f.clone().into_schedule_request(), Err(RequestError::EmptyField("spec_schedule")));
        assert!(f.into_backup_request().is_ok());

        let mut f = form();
        f.spec_included_namespaces = " , ".into();
        assert_eq!(
            f.into_backup_request(),
            Err(RequestError::EmptyField("spec_includedNamespaces"))
        );
    }

    #[test]
    fn request_uses_wire_keys() {
        let request = form().into_backup_request().unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["spec_includedNamespaces"], json!(["apps", "db"]));
        assert!(value.get("spec_schedule").is_none());
    }

    #[test]
    fn labels_must_be_key_value() {
        assert_eq!(
            parse_match_labels(&["app".to_string()]),
            Err(RequestError::InvalidLabel("app".into()))
        );
        assert_eq!(
            parse_match_labels(&["=web".to_string()]),
            Err(RequestError::EmptyLabelKey("=web".into()))
        );
        assert!(matches!(
            parse_match_labels(&["bad key=x".to_string()]),
            Err(RequestError::InvalidLabel(_))
        ));

        let labels = parse_match_labels(&["".to_string(), "app.kubernetes.io/name=a=b".to_string()]).unwrap();
        assert_eq!(labels.get("app.kubernetes.io/name").map(String::as_str), Some("a=b"));
    }

    #[test]
    fn backup_manifest_shape() {
        let request = form().into_backup_request().unwrap();
        let manifest = backup_manifest(&request, "velero", "default").unwrap();

        assert_eq!(manifest["apiVersion"], "velero.io/v1");
        assert_eq!(manifest["kind"], "Backup");
        assert_eq!(manifest["metadata"]["namespace"], "velero");
        assert_eq!(manifest["spec"]["storageLocation"], "default");
        assert_eq!(manifest["spec"]["defaultVolumesToFsBackup"], true);
        assert_eq!(manifest["spec"]["labelSelector"]["matchLabels"]["tier"], "front");
    }

    #[test]
    fn schedule_manifest_nests_template() {
        let mut f = form();
        f.spec_labels.clear();
        let request = f.into_schedule_request().unwrap();
        let manifest = schedule_manifest(&request, "velero", "default").unwrap();

        assert_eq!(manifest["kind"], "Schedule");
        assert_eq!(manifest["spec"]["schedule"], "0 1 * * *");
        assert_eq!(manifest["spec"]["template"]["ttl"], "72h0m0s");
        assert!(manifest["spec"]["template"].get("labelSelector").is_none());
    }

    #[test]
    fn delete_request_targets_backup() {
        let manifest = delete_backup_request_manifest("b1", "velero").unwrap();
        assert_eq!(manifest["metadata"]["name"], "b1-delete-request");
        assert_eq!(manifest["spec"]["backupName"], "b1");
        assert_eq!(delete_backup_request_manifest("", "velero"), Err(RequestError::MissingName));
    }

    #[test]
    fn restore_from_backup_includes_volumes() {
        let manifest = restore_manifest(RestoreSource::Backup("b1"), "velero").unwrap();
        assert_eq!(manifest["kind"], "Restore");
        assert_eq!(manifest["metadata"]["name"], "b1-restore");
        assert_eq!(manifest["metadata"]["namespace"], "velero");
        assert_eq!(manifest["spec"]["backupName"], "b1");
        assert_eq!(manifest["spec"]["restorePVs"], true);
        assert!(manifest["spec"].get("scheduleName").is_none());
    }

    #[test]
    fn restore_from_schedule_uses_schedule_name() {
        let source = RestoreSource::Schedule("nightly");
        assert_eq!(source.kind(), ResourceKind::Schedule);

        let manifest = restore_manifest(source, "velero").unwrap();
        assert_eq!(manifest["metadata"]["name"], "nightly-restore");
        assert_eq!(manifest["spec"]["scheduleName"], "nightly");
        assert!(manifest["spec"].get("backupName").is_none());
        assert_eq!(
            restore_manifest(RestoreSource::Backup(" "), "velero"),
            Err(RequestError::MissingName)
        );
    }

    #[test]
    fn describe_expands_one_level() {
        let resource = json!({
            "kind": "Schedule",
            "spec": {"schedule": "@daily", "template": {"ttl": "1h"}},
            "paused": false
        });
        assert_eq!(
            describe(&resource),
            "kind: Schedule\nspec:\n  schedule: @daily\n  template: {\"ttl\":\"1h\"}\npaused: false\n"
        );
    }
}
