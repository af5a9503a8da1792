use std::fmt;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

pub const VELERO_GROUP: &str = "velero.io";
pub const VELERO_VERSION: &str = "v1";
pub const VELERO_API_VERSION: &str = "velero.io/v1";

// Placeholders shown when a source field is missing
pub const UNDEFINED: &str = "undefined";
pub const NIL: &str = "<nil>";
pub const NONE: &str = "<none>";
pub const NOT_AVAILABLE: &str = "n/a";
pub const NEW_PHASE: &str = "New";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Backup,
    Schedule,
    BackupStorageLocation,
    DeleteBackupRequest,
    Restore,
}

impl ResourceKind {
    pub fn kind(&self) -> &'static str {
        match self {
            ResourceKind::Backup => "Backup",
            ResourceKind::Schedule => "Schedule",
            ResourceKind::BackupStorageLocation => "BackupStorageLocation",
            ResourceKind::DeleteBackupRequest => "DeleteBackupRequest",
            ResourceKind::Restore => "Restore",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::Backup => "backups",
            ResourceKind::Schedule => "schedules",
            ResourceKind::BackupStorageLocation => "backupstoragelocations",
            ResourceKind::DeleteBackupRequest => "deletebackuprequests",
            ResourceKind::Restore => "restores",
        }
    }

    /// Tag the API puts on collection envelopes, e.g. `ScheduleList`.
    pub fn list_kind(&self) -> String {
        format!("{}List", self.kind())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// A missing name stays `None` so the table can show it as `undefined`.
pub fn display_name(name: &Option<String>) -> &str {
    name.as_deref().unwrap_or(UNDEFINED)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupItem {
    pub name: Option<String>,
    pub status: String,
    pub errors: i64,
    pub warnings: i64,
    pub created: String,
    pub expiration: String,
    pub storage_location: String,
    pub selector: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub name: Option<String>,
    pub status: Option<String>,
    pub created: Option<String>,
    pub schedule: Option<String>,
    pub backup_ttl: Option<String>,
    pub last_backup: String,
    pub selector: String,
    pub paused: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageItem {
    pub name: Option<String>,
    pub status: String,
    pub last_validation_time: Option<String>,
    pub created: String,
    pub backup_sync_period: Option<String>,
    pub config: Option<Value>,
}

impl StorageItem {
    pub fn is_available(&self) -> bool {
        self.status == "Available"
    }
}

/// `source` is the backup or schedule the restore was made from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreItem {
    pub name: Option<String>,
    pub status: String,
    pub source: String,
    pub errors: i64,
    pub warnings: i64,
    pub created: String,
    pub restore_pvs: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_backups: usize,
    pub total_schedules: usize,
    pub backups_by_status: IndexMap<String, usize>,
}

impl fmt::Display for DashboardSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Backups: {}", self.total_backups)?;
        writeln!(f, "Total Schedules: {}", self.total_schedules)?;
        write!(f, "Backups by Status:")?;
        for (status, count) in &self.backups_by_status {
            write!(f, "\n- {}: {}", status, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_kind_appends_suffix() {
        assert_eq!(ResourceKind::Schedule.list_kind(), "ScheduleList");
        assert_eq!(ResourceKind::BackupStorageLocation.plural(), "backupstoragelocations");
        assert_eq!(ResourceKind::Restore.plural(), "restores");
        assert_eq!(ResourceKind::Restore.list_kind(), "RestoreList");
    }

    #[test]
    fn missing_name_is_shown_as_undefined() {
        assert_eq!(display_name(&None), "undefined");
        assert_eq!(display_name(&Some("b1".into())), "b1");
    }

    #[test]
    fn summary_renders_status_lines_in_order() {
        let mut by_status = IndexMap::new();
        by_status.insert("Completed".to_string(), 2);
        by_status.insert("Failed".to_string(), 1);
        let summary = DashboardSummary {
            total_backups: 3,
            total_schedules: 1,
            backups_by_status: by_status,
        };

        assert_eq!(
            summary.to_string(),
            "Total Backups: 3\nTotal Schedules: 1\nBackups by Status:\n- Completed: 2\n- Failed: 1"
        );
    }

    #[test]
    fn records_serialize_with_camel_case_keys() {
        let item = StorageItem {
            name: Some("default".into()),
            status: "Available".into(),
            last_validation_time: None,
            created: NIL.into(),
            backup_sync_period: Some("1m".into()),
            config: None,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["backupSyncPeriod"], "1m");
        assert!(value["lastValidationTime"].is_null());
        assert!(item.is_available());
    }
}
