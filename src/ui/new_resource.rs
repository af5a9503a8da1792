use egui::Context;
use serde_json::Value;
use velerolens::requests::{CreateResourceForm, backup_manifest, schedule_manifest};
use velerolens::{RequestError, ResourceKind};

use super::Actions;

pub struct NewResourceWindow {
    pub kind: ResourceKind,
    pub form: CreateResourceForm,
    pub show: bool,
    pub error: Option<String>,
}

impl NewResourceWindow {
    pub fn new() -> Self {
        Self {
            kind: ResourceKind::Backup,
            form: CreateResourceForm::default(),
            show: false,
            error: None,
        }
    }

    pub fn open(&mut self, kind: ResourceKind) {
        self.kind = kind;
        self.form = CreateResourceForm::default();
        self.error = None;
        self.show = true;
    }
}

/// Turns the form into a Velero manifest for `kind`.
pub fn build_manifest(
    kind: ResourceKind,
    form: CreateResourceForm,
    namespace: &str,
    storage_location: &str,
) -> Result<(String, Value), RequestError> {
    match kind {
        ResourceKind::Schedule => {
            let request = form.into_schedule_request()?;
            let manifest = schedule_manifest(&request, namespace, storage_location)?;
            Ok((request.metadata_name, manifest))
        }
        _ => {
            let request = form.into_backup_request()?;
            let manifest = backup_manifest(&request, namespace, storage_location)?;
            Ok((request.metadata_name, manifest))
        }
    }
}

pub fn show_new_resource_window(ctx: &Context, window: &mut NewResourceWindow, actions: &Actions, storage_location: &str) {
    if !window.show {
        return;
    }

    let title = format!("Create {}", window.kind.kind().to_lowercase());
    egui::Window::new(title).collapsible(false).resizable(false).show(ctx, |ui| {
        egui::Grid::new("new_resource_grid").num_columns(2).spacing([16.0, 8.0]).show(ui, |ui| {
            ui.label("Name:");
            ui.add(egui::TextEdit::singleline(&mut window.form.metadata_name).hint_text("nightly-apps"));
            ui.end_row();

            ui.label("Included namespaces:");
            ui.add(egui::TextEdit::singleline(&mut window.form.spec_included_namespaces).hint_text("ns1,ns2"));
            ui.end_row();

            ui.label("TTL:");
            ui.add(egui::TextEdit::singleline(&mut window.form.spec_ttl).hint_text("720h0m0s"));
            ui.end_row();

            if window.kind == ResourceKind::Schedule {
                ui.label("Schedule (cron):");
                ui.add(egui::TextEdit::singleline(&mut window.form.spec_schedule).hint_text("0 1 * * *"));
                ui.end_row();
            }

            ui.label("Labels:");
            ui.add(egui::TextEdit::singleline(&mut window.form.spec_labels).hint_text("key=value,key=value"));
            ui.end_row();
        });

        if let Some(error) = &window.error {
            ui.label(egui::RichText::new(error).color(crate::theme::RED_BUTTON));
        }

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button(egui::RichText::new("✔ Create").size(16.0).color(crate::theme::GREEN_BUTTON)).clicked() {
                match build_manifest(window.kind, window.form.clone(), actions.api.namespace(), storage_location) {
                    Ok((name, manifest)) => {
                        actions.create(window.kind, name, manifest);
                        window.show = false;
                    }
                    Err(e) => window.error = Some(format!("ERROR: {}", e)),
                }
            }

            if ui.button(egui::RichText::new("🗙 Cancel").size(16.0).color(crate::theme::RED_BUTTON)).clicked() {
                window.show = false;
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_form_needs_cron() {
        let form = CreateResourceForm {
            metadata_name: "daily".into(),
            spec_included_namespaces: "apps".into(),
            spec_ttl: "24h".into(),
            ..CreateResourceForm::default()
        };

        assert_eq!(
            build_manifest(ResourceKind::Schedule, form.clone(), "velero", "default").unwrap_err(),
            RequestError::EmptyField("spec_schedule")
        );

        let (name, manifest) = build_manifest(ResourceKind::Backup, form, "velero", "default").unwrap();
        assert_eq!(name, "daily");
        assert_eq!(manifest["kind"], "Backup");
    }
}
