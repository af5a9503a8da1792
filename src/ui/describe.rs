use std::sync::{Arc, Mutex};
use egui::Context;
use serde_json::Value;
use velerolens::ResourceKind;
use velerolens::requests::describe;

use super::Actions;

enum DescribeContent {
    Loading,
    Loaded(Value),
    Failed(String),
}

pub struct DescribeWindow {
    pub show: bool,
    pub as_yaml: bool,
    title: String,
    content: Arc<Mutex<DescribeContent>>,
}

impl DescribeWindow {
    pub fn new() -> Self {
        Self {
            show: false,
            as_yaml: false,
            title: String::new(),
            content: Arc::new(Mutex::new(DescribeContent::Loading)),
        }
    }

    /// Shows the window and fetches the resource in the background.
    pub fn open(&mut self, kind: ResourceKind, name: String, actions: &Actions) {
        self.show = true;
        self.title = format!("{} {}", kind, name);
        *self.content.lock().unwrap() = DescribeContent::Loading;

        let content = Arc::clone(&self.content);
        let api = Arc::clone(&actions.api);
        tokio::spawn(async move {
            let next = match api.get(kind, &name).await {
                Ok(value) => DescribeContent::Loaded(value),
                Err(e) => {
                    log::error!("Error fetching {} describe: {:#}", kind, e);
                    DescribeContent::Failed(format!("Error fetching {} describe: {}", kind, e))
                }
            };
            *content.lock().unwrap() = next;
        });
    }
}

fn render(value: &Value, as_yaml: bool) -> String {
    if as_yaml {
        serde_yaml::to_string(value).unwrap_or_else(|e| format!("Failed to render YAML: {}", e))
    } else {
        describe(value)
    }
}

pub fn show_describe_window(ctx: &Context, window: &mut DescribeWindow) {
    if !window.show {
        return;
    }

    let mut open = window.show;
    let title = window.title.clone();
    let content = Arc::clone(&window.content);
    let as_yaml = &mut window.as_yaml;

    egui::Window::new(title).min_width(700.0).collapsible(false).resizable(true).open(&mut open).show(ctx, |ui| {
        ui.checkbox(as_yaml, "YAML");
        ui.separator();

        let mut text = match &*content.lock().unwrap() {
            DescribeContent::Loading => {
                ui.spinner();
                return;
            }
            DescribeContent::Loaded(value) => render(value, *as_yaml),
            DescribeContent::Failed(message) => message.clone(),
        };

        egui::ScrollArea::vertical().max_height(600.0).show(ui, |ui| {
            ui.add(egui::TextEdit::multiline(&mut text)
                .font(egui::TextStyle::Monospace)
                .text_color(crate::theme::DETAIL_COLOR)
                .interactive(false)
                .desired_width(f32::INFINITY),
            );
        });
    });

    window.show = open;
}
