use std::sync::{atomic::{AtomicBool, Ordering}, Arc, Mutex};
use std::time::Duration;
use chrono::{DateTime, Utc};
use tokio::sync::Notify;
use velerolens::*;

use crate::functions::VeleroApi;

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub backups: Vec<BackupItem>,
    pub schedules: Vec<ScheduleItem>,
    pub storages: Vec<StorageItem>,
    pub restores: Vec<RestoreItem>,
    pub summary: DashboardSummary,
    pub last_error: Option<String>,
    pub last_refresh: Option<DateTime<Utc>>,
}

/// One load cycle: list every kind, normalize, summarize.
pub async fn load_dashboard(api: &VeleroApi) -> Result<DashboardState, anyhow::Error> {
    let (backups_raw, schedules_raw, storages_raw, restores_raw) = futures::try_join!(
        api.list(ResourceKind::Backup),
        api.list(ResourceKind::Schedule),
        api.list(ResourceKind::BackupStorageLocation),
        api.list(ResourceKind::Restore),
    )?;

    let backups = parse_backups(&backups_raw)?;
    let schedules = parse_schedules(&schedules_raw)?;
    let storages = parse_storages(&storages_raw)?;
    let restores = parse_restores(&restores_raw)?;
    let summary = summarize(&backups, &schedules);

    Ok(DashboardState {
        backups,
        schedules,
        storages,
        restores,
        summary,
        last_error: None,
        last_refresh: Some(Utc::now()),
    })
}

/// Reloads the dashboard every `interval`, or sooner when `refresh` fires.
/// Every cycle replaces the whole state; a failed cycle leaves only the error.
pub async fn watch_dashboard(
    api: Arc<VeleroApi>,
    state: Arc<Mutex<DashboardState>>,
    load_status: Arc<AtomicBool>,
    refresh: Arc<Notify>,
    interval: Duration,
) {
    loop {
        load_status.store(true, Ordering::Relaxed);

        let next = match load_dashboard(&api).await {
            Ok(loaded) => loaded,
            Err(e) => {
                log::error!("Failed to load Velero resources in {}: {:#}", api.namespace(), e);
                DashboardState {
                    last_error: Some(e.to_string()),
                    last_refresh: Some(Utc::now()),
                    ..DashboardState::default()
                }
            }
        };
        *state.lock().unwrap() = next;

        load_status.store(false, Ordering::Relaxed);

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = refresh.notified() => {}
        }
    }
}
