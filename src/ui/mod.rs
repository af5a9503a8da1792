use std::sync::{Arc, Mutex};
use egui::Context;
use serde_json::Value;
use tokio::sync::Notify;
use velerolens::config::AppConfig;
use velerolens::requests::{RestoreSource, delete_backup_request_manifest, restore_manifest};
use velerolens::ResourceKind;

use crate::functions::VeleroApi;

pub mod configuration;
pub use configuration::*;

pub mod confirmation_dialog;
pub use confirmation_dialog::*;

pub mod describe;
pub use describe::*;

pub mod new_resource;
pub use new_resource::*;

pub mod overview;
pub use overview::*;

pub mod resources;
pub use resources::*;

/// Handles the UI uses to talk to the cluster. Every call runs on the tokio
/// runtime and reports back through `notice`.
#[derive(Clone)]
pub struct Actions {
    pub api: Arc<VeleroApi>,
    pub refresh: Arc<Notify>,
    pub notice: Arc<Mutex<Option<String>>>,
}

impl Actions {
    pub fn new(api: Arc<VeleroApi>, refresh: Arc<Notify>) -> Self {
        Self {
            api,
            refresh,
            notice: Arc::new(Mutex::new(None)),
        }
    }

    pub fn notify(&self, message: String) {
        *self.notice.lock().unwrap() = Some(message);
    }

    pub fn create(&self, kind: ResourceKind, name: String, manifest: Value) {
        let actions = self.clone();
        tokio::spawn(async move {
            match actions.api.create(kind, manifest).await {
                Ok(()) => actions.notify(format!("{} {} created successfully", kind, name)),
                Err(e) => {
                    log::error!("Failed to create {} {}: {:#}", kind, name, e);
                    actions.notify(format!("Failed to create {}. {}", kind.kind().to_lowercase(), e));
                }
            }
            actions.refresh.notify_one();
        });
    }

    pub fn restore(&self, source: RestoreSource<'_>) {
        let kind = source.kind();
        let name = source.name().to_string();
        let manifest = restore_manifest(source, self.api.namespace());

        let actions = self.clone();
        tokio::spawn(async move {
            let result = match manifest {
                Ok(manifest) => actions.api.create(ResourceKind::Restore, manifest).await,
                Err(e) => Err(e.into()),
            };

            match result {
                Ok(()) => actions.notify(format!(
                    "Restore from {} {} created successfully",
                    kind.kind().to_lowercase(),
                    name
                )),
                Err(e) => {
                    log::error!("Failed to restore from {} {}: {:#}", kind, name, e);
                    actions.notify(format!(
                        "Restore from {} {} failed to create. {}",
                        kind.kind().to_lowercase(),
                        name,
                        e
                    ));
                }
            }
            actions.refresh.notify_one();
        });
    }

    pub fn delete(&self, kind: ResourceKind, name: String) {
        let actions = self.clone();
        tokio::spawn(async move {
            let result = match kind {
                ResourceKind::Backup => {
                    match delete_backup_request_manifest(&name, actions.api.namespace()) {
                        Ok(manifest) => actions.api.create(ResourceKind::DeleteBackupRequest, manifest).await,
                        Err(e) => Err(e.into()),
                    }
                }
                _ => actions.api.delete(kind, &name).await,
            };

            match result {
                Ok(()) => actions.notify(format!("{} {} deleted successfully", kind, name)),
                Err(e) => {
                    log::error!("Failed to delete {} {}: {:#}", kind, name, e);
                    actions.notify(format!("{} {} failed to delete. {}", kind, name, e));
                }
            }
            actions.refresh.notify_one();
        });
    }
}

pub fn window_moved_or_resized(ctx: &Context, app_config: &mut AppConfig) -> bool {
    let mut changed = false;

    ctx.input(|i| {
        let viewport = i.viewport();
        if let (Some(rect), Some(inner)) = (viewport.outer_rect, viewport.inner_rect) {
            let pos_x = rect.min.x;
            let pos_y = rect.min.y;
            let size_x = inner.width();
            let size_y = inner.height();

            if app_config.options.last_window_pos_x != pos_x {
                app_config.options.last_window_pos_x = pos_x;
                changed = true;
            }

            if app_config.options.last_window_pos_y != pos_y {
                app_config.options.last_window_pos_y = pos_y;
                changed = true;
            }

            if app_config.options.last_width != size_x {
                app_config.options.last_width = size_x;
                changed = true;
            }

            if app_config.options.last_height != size_y {
                app_config.options.last_height = size_y;
                changed = true;
            }
        }
    });

    changed
}
