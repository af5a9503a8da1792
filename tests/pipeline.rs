use serde_json::{Value, json};
use velerolens::*;

fn backup_list() -> Value {
    json!({
        "apiVersion": "velero.io/v1",
        "kind": "BackupList",
        "items": [
            {
                "metadata": {"name": "b1", "creationTimestamp": "2024-01-01T00:00:00Z"},
                "status": {"phase": "Completed", "expiration": "2024-01-31T00:00:00Z"},
                "spec": {"storageLocation": "default"}
            },
            {
                "metadata": {"name": "b2"},
                "status": {"phase": "Completed", "errors": 0, "warnings": 2},
                "spec": {}
            },
            {"spec": {}, "status": {"phase": "Failed"}},
            {
                "metadata": {"name": "b3"},
                "status": {"phase": "Failed", "errors": 4},
                "spec": {"storageLocation": "aws"}
            }
        ]
    })
}

#[test]
fn scenario_single_backup_list() {
    let raw = json!({"items": [{
        "metadata": {"name": "b1", "creationTimestamp": "2024-01-01"},
        "status": {"phase": "Completed"},
        "spec": {"storageLocation": "default"}
    }]});

    let backups = parse_backups(&raw).unwrap();
    assert_eq!(
        backups,
        vec![BackupItem {
            name: Some("b1".into()),
            status: "Completed".into(),
            errors: 0,
            warnings: 0,
            created: "2024-01-01".into(),
            expiration: "n/a".into(),
            storage_location: "default".into(),
            selector: "<none>".into(),
        }]
    );
}

#[test]
fn scenario_absent_response_is_empty() {
    assert!(normalize::<BackupPolicy>(None).unwrap().is_empty());
    assert!(parse_schedules(&Value::Null).unwrap().is_empty());
    assert!(parse_storages(&Value::Null).unwrap().is_empty());
}

#[test]
fn scenario_schedule_singleton() {
    let raw = json!({
        "kind": "Schedule",
        "metadata": {"name": "s1", "creationTimestamp": "t"},
        "spec": {"schedule": "0 0 * * *", "template": {"ttl": "24h"}},
        "status": {"phase": "Enabled"}
    });

    let schedules = parse_schedules(&raw).unwrap();
    assert_eq!(
        schedules,
        vec![ScheduleItem {
            name: Some("s1".into()),
            status: Some("Enabled".into()),
            created: Some("t".into()),
            schedule: Some("0 0 * * *".into()),
            backup_ttl: Some("24h".into()),
            last_backup: "n/a".into(),
            selector: "<none>".into(),
            paused: false,
        }]
    );
}

#[test]
fn scenario_status_buckets() {
    let backups = parse_backups(&backup_list()).unwrap();
    let summary = summarize(&backups, &[]);

    assert_eq!(summary.total_backups, 3);
    assert_eq!(summary.backups_by_status.get("Completed"), Some(&2));
    assert_eq!(summary.backups_by_status.get("Failed"), Some(&1));
    assert_eq!(summary.backups_by_status.values().sum::<usize>(), summary.total_backups);
}

#[test]
fn backup_count_matches_items_with_metadata() {
    let raw = backup_list();
    let with_metadata = raw["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|item| item.get("metadata").is_some())
        .count();

    assert_eq!(parse_backups(&raw).unwrap().len(), with_metadata);
}

#[test]
fn order_follows_the_source() {
    let names: Vec<_> = parse_backups(&backup_list())
        .unwrap()
        .into_iter()
        .map(|b| b.name.unwrap())
        .collect();
    assert_eq!(names, vec!["b1", "b2", "b3"]);
}

#[test]
fn normalizing_twice_gives_equal_records() {
    let raw = backup_list();
    let before = raw.clone();

    let first = parse_backups(&raw).unwrap();
    let second = parse_backups(&raw).unwrap();

    assert_eq!(first, second);
    assert_eq!(raw, before);
}

#[test]
fn broken_schedule_template_surfaces_as_error() {
    let raw = json!({"kind": "ScheduleList", "items": [
        {"metadata": {"name": "s1"}, "spec": {"schedule": "@daily"}, "status": {"phase": "Enabled"}}
    ]});

    match parse_schedules(&raw) {
        Err(ExtractError::UnexpectedNesting { kind, name, path }) => {
            assert_eq!(kind, ResourceKind::Schedule);
            assert_eq!(name, "s1");
            assert_eq!(path, "spec.template");
        }
        other => panic!("expected a nesting error, got {:?}", other),
    }
}

#[test]
fn storage_list_keeps_pass_through_fields() {
    let raw = json!({"items": [
        {
            "metadata": {"name": "default", "creationTimestamp": "2024-02-02T00:00:00Z"},
            "status": {"phase": "Available", "lastValidationTime": "2024-02-03T00:00:00Z"},
            "spec": {"backupSyncPeriod": "2m0s", "config": {"region": "minio"}}
        },
        {
            "metadata": {"name": "secondary"},
            "status": {},
            "spec": {}
        }
    ]});

    let storages = parse_storages(&raw).unwrap();
    assert_eq!(storages.len(), 2);
    assert!(storages[0].is_available());
    assert_eq!(storages[0].backup_sync_period.as_deref(), Some("2m0s"));
    assert_eq!(storages[1].status, "New");
    assert_eq!(storages[1].created, "<nil>");
    assert_eq!(storages[1].config, None);
    assert_eq!(storages[1].last_validation_time, None);
}

#[test]
fn double_encoded_body_goes_through_the_pipeline() {
    let body = serde_json::to_string(&backup_list().to_string()).unwrap();
    let raw = decode_payload(&body).unwrap();
    let backups = parse_backups(&raw).unwrap();
    let schedules = parse_schedules(&json!({"kind": "ScheduleList", "items": []})).unwrap();

    let summary = summarize(&backups, &schedules);
    assert_eq!(
        summary.to_string(),
        "Total Backups: 3\nTotal Schedules: 0\nBackups by Status:\n- Completed: 2\n- Failed: 1"
    );
}

#[test]
fn restore_list_body_is_decoded_and_normalized() {
    let body = json!({
        "apiVersion": "velero.io/v1",
        "kind": "RestoreList",
        "items": [
            {
                "metadata": {"name": "b1-restore", "creationTimestamp": "2024-01-02T00:00:00Z"},
                "spec": {"backupName": "b1", "restorePVs": true},
                "status": {"phase": "Completed"}
            },
            {
                "metadata": {"name": "nightly-restore"},
                "spec": {"scheduleName": "nightly", "restorePVs": true}
            }
        ]
    })
    .to_string();

    let restores = parse_restores(&decode_payload(&body).unwrap()).unwrap();
    assert_eq!(restores.len(), 2);
    assert_eq!(restores[0].source, "b1");
    assert_eq!(restores[1].source, "nightly");
    assert_eq!(restores[1].status, "New");
    assert!(restores.iter().all(|r| r.restore_pvs));
}
