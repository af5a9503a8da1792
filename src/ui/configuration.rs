use std::path::Path;
use egui::Ui;
use velerolens::config::{AppConfig, write_config_to_file};

pub fn show_configuration(ui: &mut Ui, app_config: &mut AppConfig, config_path: &Path) {
    let mut config_should_be_saved = false;

    ui.add_space(10.0);

    ui.vertical(|ui| {
        ui.heading("Velero:");
        ui.add_space(10.0);

        egui::Frame::group(ui.style())
            .fill(crate::theme::SETTINGS_FRAME_COLOR)
            .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
            .corner_radius(egui::CornerRadius::same(8))
            .inner_margin(egui::Margin::symmetric(12, 10))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());

                egui::Grid::new("velero_settings_grid")
                    .num_columns(2)
                    .spacing([16.0, 8.0])
                    .striped(true)
                    .show(ui, |ui| {
                        ui.set_row_height(24.0);
                        ui.label("Velero namespace (applied on restart):");
                        if ui.text_edit_singleline(&mut app_config.velero.namespace).changed() {
                            config_should_be_saved = true;
                        }
                        ui.end_row();

                        ui.set_row_height(24.0);
                        ui.label("Default storage location:");
                        if ui.text_edit_singleline(&mut app_config.velero.storage_location).changed() {
                            config_should_be_saved = true;
                        }
                        ui.end_row();

                        ui.set_row_height(24.0);
                        ui.label("Refresh interval (seconds, applied on restart):");
                        let interval = egui::DragValue::new(&mut app_config.velero.refresh_interval_secs).range(1..=3600);
                        if ui.add(interval).changed() {
                            config_should_be_saved = true;
                        }
                        ui.end_row();
                    });
            });
    });

    if config_should_be_saved {
        if let Err(e) = write_config_to_file(config_path, app_config) {
            log::error!("Failed to save config: {}", e);
        }
    }
}
