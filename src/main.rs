use eframe::egui;
use egui::{Context, FontId, Style, TextStyle};
use std::sync::{atomic::{AtomicBool, Ordering}, Arc, Mutex};
use std::time::Duration;
use kube::Client;
use tokio::sync::Notify;
use velerolens::config::{config_file_path, read_app_config_from_file, write_config_to_file};
use velerolens::{ResourceKind, SetupOnce};

mod functions;
use functions::*;

mod theme;
use theme::*;

mod ui;
use ui::*;

mod watchers;
use watchers::*;

#[derive(PartialEq, Clone, Copy)]
enum Category {
    Overview,
    Backups,
    Schedules,
    Restores,
    Configuration,
}

fn apply_style(ctx: &Context) {
    let mut style: Style = (*ctx.style()).clone();

    style.text_styles = [
        (TextStyle::Heading, FontId::new(24.0, egui::FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(18.0, egui::FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(16.0, egui::FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(18.0, egui::FontFamily::Proportional)),
        (TextStyle::Small, FontId::new(14.0, egui::FontFamily::Proportional)),
    ]
    .into();

    ctx.set_style(style);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config_path = config_file_path()?;
    let mut app_config = read_app_config_from_file(&config_path)?;

    let mut title = String::from("VeleroLens v");
    title.push_str(env!("CARGO_PKG_VERSION"));
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([app_config.options.last_width, app_config.options.last_height])
            .with_position([app_config.options.last_window_pos_x, app_config.options.last_window_pos_y]),
        ..Default::default()
    };

    // Client connection
    let client = Client::try_default().await?;
    let api = Arc::new(VeleroApi::new(client, app_config.velero.namespace.clone()));
    log::info!("Watching Velero resources in namespace {}", api.namespace());

    let cluster_name = Arc::new(Mutex::new(String::from("unknown")));
    let cluster_name_bg = Arc::clone(&cluster_name);
    tokio::spawn(async move {
        match get_cluster_name().await {
            Ok(name) => *cluster_name_bg.lock().unwrap() = name,
            Err(e) => log::warn!("Failed to resolve cluster name: {}", e),
        }
    });

    let dashboard = Arc::new(Mutex::new(DashboardState::default()));
    let load_status = Arc::new(AtomicBool::new(false));
    let refresh = Arc::new(Notify::new());
    tokio::spawn(watch_dashboard(
        Arc::clone(&api),
        Arc::clone(&dashboard),
        Arc::clone(&load_status),
        Arc::clone(&refresh),
        Duration::from_secs(app_config.velero.refresh_interval_secs.max(1)),
    ));

    let actions = Actions::new(Arc::clone(&api), Arc::clone(&refresh));
    let mut selected_category = Category::Overview;
    let mut style_setup = SetupOnce::new();
    let mut confirmation = Confirmation::new();
    let mut describe_window = DescribeWindow::new();
    let mut new_resource_window = NewResourceWindow::new();
    let mut filter_backups = String::new();
    let mut filter_schedules = String::new();
    let mut filter_restores = String::new();

    eframe::run_simple_native(&title, options, move |ctx: &Context, _frame| {
        style_setup.run(|| apply_style(ctx));

        if window_moved_or_resized(ctx, &mut app_config) {
            if let Err(e) = write_config_to_file(&config_path, &app_config) {
                log::error!("Failed to save window geometry: {}", e);
            }
        }

        let state = dashboard.lock().unwrap().clone();

        egui::SidePanel::left("tasks panel").resizable(false).exact_width(240.0).show(ctx, |ui| {
            egui::CollapsingHeader::new("☸ Velero").default_open(true).show(ui, |ui| {
                if ui.selectable_label(selected_category == Category::Overview, "🗠 Overview").clicked() {
                    selected_category = Category::Overview;
                }
                if ui.selectable_label(selected_category == Category::Backups, "🗄 Backups").clicked() {
                    selected_category = Category::Backups;
                }
                if ui.selectable_label(selected_category == Category::Schedules, "📅 Schedules").clicked() {
                    selected_category = Category::Schedules;
                }
                if ui.selectable_label(selected_category == Category::Restores, "⟲ Restores").clicked() {
                    selected_category = Category::Restores;
                }
            });
            egui::CollapsingHeader::new("🛠 Settings").default_open(true).show(ui, |ui| {
                if ui.selectable_label(selected_category == Category::Configuration, "⚙ Configuration").clicked() {
                    selected_category = Category::Configuration;
                }
            });
        });

        egui::TopBottomPanel::top("status panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Cluster: {}", cluster_name.lock().unwrap()));
                ui.separator();
                ui.label(format!("Namespace: {}", actions.api.namespace()));
                ui.separator();
                if load_status.load(Ordering::Relaxed) {
                    ui.spinner();
                } else if let Some(ts) = state.last_refresh {
                    ui.label(format!("Updated {}", ts.format("%H:%M:%S")));
                }
                if ui.button(egui::RichText::new("⟳ Refresh").color(BLUE_BUTTON)).clicked() {
                    refresh.notify_one();
                }
                if ui.button(egui::RichText::new("➕ Backup").color(GREEN_BUTTON)).clicked() {
                    new_resource_window.open(ResourceKind::Backup);
                }
                if ui.button(egui::RichText::new("➕ Schedule").color(GREEN_BUTTON)).clicked() {
                    new_resource_window.open(ResourceKind::Schedule);
                }
            });

            if let Some(error) = &state.last_error {
                ui.label(egui::RichText::new(error).color(RED_BUTTON));
            }

            let mut notice = actions.notice.lock().unwrap();
            if let Some(message) = notice.clone() {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(message).color(ORANGE_BUTTON));
                    if ui.small_button("ｘ").clicked() {
                        *notice = None;
                    }
                });
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            match selected_category {
                Category::Overview => {
                    ui.heading("Dashboard");
                    ui.separator();
                    egui::ScrollArea::vertical().id_salt("overview_scroll").show(ui, |ui| {
                        show_overview(ui, &state.summary, &state.storages);
                    });
                }
                Category::Backups => {
                    show_backups(ui, &state.backups, &mut filter_backups, &actions, &mut confirmation, &mut describe_window);
                }
                Category::Schedules => {
                    show_schedules(ui, &state.schedules, &mut filter_schedules, &actions, &mut confirmation, &mut describe_window);
                }
                Category::Restores => {
                    show_restores(ui, &state.restores, &mut filter_restores, &actions, &mut confirmation, &mut describe_window);
                }
                Category::Configuration => {
                    ui.heading("Configuration");
                    ui.separator();
                    show_configuration(ui, &mut app_config, &config_path);
                }
            }
        });

        show_confirmation(ctx, &mut confirmation);
        show_describe_window(ctx, &mut describe_window);
        let storage_location = app_config.velero.storage_location.clone();
        show_new_resource_window(ctx, &mut new_resource_window, &actions, &storage_location);

        ctx.request_repaint_after(Duration::from_millis(500));
    })
    .map_err(|e| anyhow::anyhow!("Failed to start UI: {}", e))?;

    Ok(())
}
