use std::f32::consts::{FRAC_PI_2, TAU};
use egui::{Color32, Pos2, Shape, Stroke, Ui};
use serde_json::Value;
use velerolens::{DashboardSummary, NONE, StorageItem, display_name};

use crate::functions::item_color;
use crate::theme::*;

const RING_SIZE: f32 = 120.0;
const RING_WIDTH: f32 = 17.0;

/// Angular span of each status on the ring, starting at the top and running
/// clockwise in bucket order. Empty when there are no backups.
fn ring_segments(summary: &DashboardSummary) -> Vec<(f32, f32, &str)> {
    if summary.total_backups == 0 {
        return Vec::new();
    }

    let mut start = -FRAC_PI_2;
    summary
        .backups_by_status
        .iter()
        .map(|(status, count)| {
            let end = start + *count as f32 / summary.total_backups as f32 * TAU;
            let segment = (start, end, status.as_str());
            start = end;
            segment
        })
        .collect()
}

fn stroke_arc(ui: &Ui, center: Pos2, radius: f32, (start, end): (f32, f32), color: Color32) {
    let steps = ((end - start) * radius / 4.0).ceil().max(2.0) as usize;
    let points = (0..=steps)
        .map(|i| {
            let angle = start + (end - start) * i as f32 / steps as f32;
            center + radius * egui::vec2(angle.cos(), angle.sin())
        })
        .collect();
    ui.painter().add(Shape::line(points, Stroke::new(RING_WIDTH, color)));
}

pub fn show_overview(ui: &mut Ui, summary: &DashboardSummary, storages: &[StorageItem]) {
    ui.horizontal(|ui| {
        show_status_ring(ui, summary);
        ui.separator();
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(format!("Total Backups: {}", summary.total_backups)).family(egui::FontFamily::Monospace));
            ui.label(egui::RichText::new(format!("Total Schedules: {}", summary.total_schedules)).family(egui::FontFamily::Monospace));
            ui.add_space(6.0);
            ui.label("Backups by Status:");
            for (status, count) in &summary.backups_by_status {
                ui.label(egui::RichText::new(format!("◾ {}: {}", status, count)).small().color(item_color(status)));
            }
        });
    });

    ui.add_space(20.0);
    ui.heading(format!("Storage locations - {}", storages.len()));
    ui.separator();
    show_storage_grid(ui, storages);
}

fn show_status_ring(ui: &mut Ui, summary: &DashboardSummary) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(RING_SIZE, RING_SIZE), egui::Sense::hover());
    let radius = (RING_SIZE - RING_WIDTH) / 2.0;

    let segments = ring_segments(summary);
    if segments.is_empty() {
        ui.painter().circle_stroke(rect.center(), radius, Stroke::new(RING_WIDTH, ui.visuals().widgets.inactive.bg_fill));
    }
    for (start, end, status) in segments {
        stroke_arc(ui, rect.center(), radius, (start, end), item_color(status));
    }

    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        summary.total_backups.to_string(),
        egui::FontId::proportional(22.0),
        ui.visuals().strong_text_color(),
    );
}

/// Storage config as shown in the table: indented JSON without quotes.
pub fn config_text(config: &Option<Value>) -> String {
    match config {
        Some(config) => serde_json::to_string_pretty(config)
            .map(|s| s.replace('"', ""))
            .unwrap_or_else(|_| NONE.to_string()),
        None => NONE.to_string(),
    }
}

fn show_storage_grid(ui: &mut Ui, storages: &[StorageItem]) {
    egui::Grid::new("storage_grid").striped(true).min_col_width(20.0).show(ui, |ui| {
        ui.label(egui::RichText::new("Name").color(HEAD_GRID_COLOR));
        ui.label(egui::RichText::new("Config").color(HEAD_GRID_COLOR));
        ui.label(egui::RichText::new("Status").color(HEAD_GRID_COLOR));
        ui.label(egui::RichText::new("Last validation").color(HEAD_GRID_COLOR));
        ui.label(egui::RichText::new("Sync period").color(HEAD_GRID_COLOR));
        ui.end_row();

        for item in storages {
            let row_color = if item.is_available() { GREEN_BUTTON } else { RED_BUTTON };
            ui.label(egui::RichText::new(display_name(&item.name)).color(row_color));
            ui.label(egui::RichText::new(config_text(&item.config)).monospace());
            ui.label(egui::RichText::new(&item.status).color(row_color));
            ui.label(item.last_validation_time.as_deref().unwrap_or(NONE));
            ui.label(item.backup_sync_period.as_deref().unwrap_or(NONE));
            ui.end_row();
        }
    });
}
