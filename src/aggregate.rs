use indexmap::IndexMap;

use crate::items::{BackupItem, DashboardSummary, ScheduleItem};

/// Counts backups per status. Statuses are compared verbatim; buckets keep the
/// order in which a status was first seen.
pub fn aggregate(backups: &[BackupItem]) -> IndexMap<String, usize> {
    backups.iter().fold(IndexMap::new(), |mut counts, backup| {
        *counts.entry(backup.status.clone()).or_insert(0) += 1;
        counts
    })
}

pub fn summarize(backups: &[BackupItem], schedules: &[ScheduleItem]) -> DashboardSummary {
    DashboardSummary {
        total_backups: backups.len(),
        total_schedules: schedules.len(),
        backups_by_status: aggregate(backups),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::NONE;

    fn backup(status: &str) -> BackupItem {
        BackupItem {
            name: Some(format!("backup-{}", status.to_lowercase())),
            status: status.to_string(),
            errors: 0,
            warnings: 0,
            created: "2024-01-01".to_string(),
            expiration: "n/a".to_string(),
            storage_location: "default".to_string(),
            selector: NONE.to_string(),
        }
    }

    #[test]
    fn counts_by_status() {
        let backups = vec![backup("Completed"), backup("Completed"), backup("Failed")];
        let summary = summarize(&backups, &[]);

        assert_eq!(summary.total_backups, 3);
        assert_eq!(summary.total_schedules, 0);
        assert_eq!(summary.backups_by_status.get("Completed"), Some(&2));
        assert_eq!(summary.backups_by_status.get("Failed"), Some(&1));
        assert_eq!(summary.backups_by_status.len(), 2);
    }

    #[test]
    fn status_case_is_not_folded() {
        let counts = aggregate(&[backup("New"), backup("new"), backup("New")]);
        assert_eq!(counts.get("New"), Some(&2));
        assert_eq!(counts.get("new"), Some(&1));
    }

    #[test]
    fn empty_input_has_no_buckets() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn counts_always_sum_to_total() {
        let statuses = ["Completed", "InProgress", "Failed", "Completed", "Deleting", "Failed", "New"];
        let backups: Vec<_> = statuses.iter().map(|s| backup(s)).collect();
        let counts = aggregate(&backups);

        assert_eq!(counts.values().sum::<usize>(), backups.len());
        let keys: Vec<_> = counts.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Completed", "InProgress", "Failed", "Deleting", "New"]);
    }
}
