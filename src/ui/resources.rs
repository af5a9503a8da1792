use egui::{RichText, Ui};
use velerolens::{BackupItem, ResourceKind, RestoreItem, ScheduleItem, UNDEFINED, display_name};
use velerolens::extract::format_timestamp;
use velerolens::requests::RestoreSource;

use super::{Actions, ConfirmKind, Confirmation, DescribeWindow};
use crate::functions::{format_age, item_color};
use crate::theme::*;

fn matches_filter(name: &Option<String>, filter: &str) -> bool {
    filter.is_empty() || display_name(name).to_lowercase().contains(filter)
}

fn name_label(ui: &mut Ui, name: &Option<String>) {
    match name {
        Some(name) => ui.label(RichText::new(name).color(ITEM_NAME_COLOR)),
        None => ui.label(RichText::new(UNDEFINED).italics().color(UNDEFINED_NAME_COLOR)),
    };
}

fn created_label(ui: &mut Ui, created: &str) {
    let age = format_age(created);
    if age == created {
        ui.label(created);
    } else {
        ui.label(format!("{} ({} ago)", format_timestamp(created), age));
    }
}

/// Backups and schedules can be restored from; restores themselves cannot.
fn is_restorable(kind: ResourceKind) -> bool {
    matches!(kind, ResourceKind::Backup | ResourceKind::Schedule)
}

fn action_buttons(
    ui: &mut Ui,
    kind: ResourceKind,
    name: &Option<String>,
    actions: &Actions,
    confirmation: &mut Confirmation,
    describe: &mut DescribeWindow,
) {
    ui.horizontal(|ui| {
        let enabled = name.is_some();
        let name = name.clone().unwrap_or_default();

        if ui.add_enabled(enabled, egui::Button::new(RichText::new("🔍 Describe").color(BLUE_BUTTON))).clicked() {
            describe.open(kind, name.clone(), actions);
        }

        if is_restorable(kind)
            && ui.add_enabled(enabled, egui::Button::new(RichText::new("⟲ Restore").color(ORANGE_BUTTON))).clicked()
        {
            let actions = actions.clone();
            let target = name.clone();
            confirmation.request(ConfirmKind::Restore, kind, &name, move || {
                let source = match kind {
                    ResourceKind::Schedule => RestoreSource::Schedule(&target),
                    _ => RestoreSource::Backup(&target),
                };
                actions.restore(source);
            });
        }

        if ui.add_enabled(enabled, egui::Button::new(RichText::new("🗑 Delete").color(RED_BUTTON))).clicked() {
            let actions = actions.clone();
            let target = name.clone();
            confirmation.request(ConfirmKind::Delete, kind, &name, move || actions.delete(kind, target));
        }
    });
}

fn filter_bar(ui: &mut Ui, heading: String, filter: &mut String) {
    ui.horizontal(|ui| {
        ui.heading(heading);
        ui.separator();
        ui.add(egui::TextEdit::singleline(filter).hint_text("Filter by name...").desired_width(200.0));
        *filter = filter.to_lowercase();
        if ui.button(RichText::new("ｘ").size(16.0).color(RED_BUTTON)).clicked() {
            filter.clear();
        }
    });
}

pub fn show_backups(
    ui: &mut Ui,
    backups: &[BackupItem],
    filter: &mut String,
    actions: &Actions,
    confirmation: &mut Confirmation,
    describe: &mut DescribeWindow,
) {
    filter_bar(ui, format!("Backups - {}", backups.len()), filter);
    ui.separator();
    let filter = filter.as_str();

    egui::ScrollArea::vertical().id_salt("backups_scroll").show(ui, |ui| {
        egui::Grid::new("backups_grid").striped(true).min_col_width(20.0).show(ui, |ui| {
            for title in ["Name", "Status", "Errors", "Warnings", "Created", "Expires", "Storage location", "Selector", ""] {
                ui.label(RichText::new(title).color(HEAD_GRID_COLOR));
            }
            ui.end_row();

            for item in backups.iter().filter(|b| matches_filter(&b.name, filter)) {
                name_label(ui, &item.name);
                ui.label(RichText::new(&item.status).color(item_color(&item.status)));
                ui.label(item.errors.to_string());
                ui.label(item.warnings.to_string());
                created_label(ui, &item.created);
                ui.label(item.expiration.as_str());
                ui.label(item.storage_location.as_str());
                ui.label(item.selector.as_str());
                action_buttons(ui, ResourceKind::Backup, &item.name, actions, confirmation, describe);
                ui.end_row();
            }
        });
    });
}

pub fn show_schedules(
    ui: &mut Ui,
    schedules: &[ScheduleItem],
    filter: &mut String,
    actions: &Actions,
    confirmation: &mut Confirmation,
    describe: &mut DescribeWindow,
) {
    filter_bar(ui, format!("Schedules - {}", schedules.len()), filter);
    ui.separator();
    let filter = filter.as_str();

    egui::ScrollArea::vertical().id_salt("schedules_scroll").show(ui, |ui| {
        egui::Grid::new("schedules_grid").striped(true).min_col_width(20.0).show(ui, |ui| {
            for title in ["Name", "Status", "Created", "Schedule", "Backup TTL", "Last backup", "Selector", "Paused", ""] {
                ui.label(RichText::new(title).color(HEAD_GRID_COLOR));
            }
            ui.end_row();

            for item in schedules.iter().filter(|s| matches_filter(&s.name, filter)) {
                let status = item.status.as_deref().unwrap_or(UNDEFINED);
                name_label(ui, &item.name);
                ui.label(RichText::new(status).color(item_color(status)));
                created_label(ui, item.created.as_deref().unwrap_or(UNDEFINED));
                ui.label(RichText::new(item.schedule.as_deref().unwrap_or(UNDEFINED)).monospace());
                ui.label(item.backup_ttl.as_deref().unwrap_or(UNDEFINED));
                ui.label(item.last_backup.as_str());
                ui.label(RichText::new(&item.selector).small().monospace());
                ui.label(item.paused.to_string());
                action_buttons(ui, ResourceKind::Schedule, &item.name, actions, confirmation, describe);
                ui.end_row();
            }
        });
    });
}

pub fn show_restores(
    ui: &mut Ui,
    restores: &[RestoreItem],
    filter: &mut String,
    actions: &Actions,
    confirmation: &mut Confirmation,
    describe: &mut DescribeWindow,
) {
    filter_bar(ui, format!("Restores - {}", restores.len()), filter);
    ui.separator();
    let filter = filter.as_str();

    egui::ScrollArea::vertical().id_salt("restores_scroll").show(ui, |ui| {
        egui::Grid::new("restores_grid").striped(true).min_col_width(20.0).show(ui, |ui| {
            for title in ["Name", "Status", "Restored from", "Errors", "Warnings", "Created", "Volumes", ""] {
                ui.label(RichText::new(title).color(HEAD_GRID_COLOR));
            }
            ui.end_row();

            for item in restores.iter().filter(|r| matches_filter(&r.name, filter)) {
                name_label(ui, &item.name);
                ui.label(RichText::new(&item.status).color(item_color(&item.status)));
                ui.label(RichText::new(&item.source).color(DETAIL_COLOR));
                ui.label(item.errors.to_string());
                ui.label(item.warnings.to_string());
                created_label(ui, &item.created);
                ui.label(if item.restore_pvs { "restored" } else { "skipped" });
                action_buttons(ui, ResourceKind::Restore, &item.name, actions, confirmation, describe);
                ui.end_row();
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_matches_lowercased_names() {
        assert!(matches_filter(&Some("Nightly-Apps".into()), "nightly"));
        assert!(!matches_filter(&Some("weekly".into()), "nightly"));
        assert!(matches_filter(&None, "undef"));
        assert!(matches_filter(&None, ""));
    }

    #[test]
    fn only_backups_and_schedules_offer_restore() {
        assert!(is_restorable(ResourceKind::Backup));
        assert!(is_restorable(ResourceKind::Schedule));
        assert!(!is_restorable(ResourceKind::Restore));
        assert!(!is_restorable(ResourceKind::BackupStorageLocation));
    }
}
