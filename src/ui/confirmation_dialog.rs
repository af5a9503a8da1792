use egui::{Align2, Color32, Context, RichText};
use velerolens::ResourceKind;

use crate::theme::{GREEN_BUTTON, ORANGE_BUTTON, RED_BUTTON};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmKind {
    Delete,
    Restore,
}

impl ConfirmKind {
    fn title(&self) -> &'static str {
        match self {
            ConfirmKind::Delete => "Confirm deletion",
            ConfirmKind::Restore => "Confirm restore",
        }
    }

    fn button(&self) -> (&'static str, Color32) {
        match self {
            ConfirmKind::Delete => ("Yes, delete", RED_BUTTON),
            ConfirmKind::Restore => ("Yes, restore", ORANGE_BUTTON),
        }
    }
}

struct Pending {
    action: ConfirmKind,
    prompt: String,
    on_confirm: Box<dyn FnOnce() + Send>,
}

/// Asks before anything destructive reaches the cluster. At most one question
/// is open; a new request replaces the previous one.
#[derive(Default)]
pub struct Confirmation {
    pending: Option<Pending>,
}

pub fn prompt_text(action: ConfirmKind, kind: ResourceKind, name: &str) -> String {
    let kind = kind.kind().to_lowercase();
    match action {
        ConfirmKind::Delete => format!("Are you sure you want to delete {} \"{}\"?", kind, name),
        ConfirmKind::Restore => format!(
            "Restore from {} \"{}\"? Existing resources are kept, missing ones and their volumes are recreated.",
            kind, name
        ),
    }
}

impl Confirmation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request<F>(&mut self, action: ConfirmKind, kind: ResourceKind, name: &str, on_confirm: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.pending = Some(Pending {
            action,
            prompt: prompt_text(action, kind, name),
            on_confirm: Box::new(on_confirm),
        });
    }
}

pub fn show_confirmation(ctx: &Context, confirmation: &mut Confirmation) {
    let Some(pending) = &confirmation.pending else {
        return;
    };

    let (label, color) = pending.action.button();
    let mut answer = None;

    egui::Window::new(pending.action.title())
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(pending.prompt.as_str());

            ui.horizontal(|ui| {
                if ui.button(RichText::new(label).color(color)).clicked() {
                    answer = Some(true);
                }
                if ui.button(RichText::new("Cancel").color(GREEN_BUTTON)).clicked() {
                    answer = Some(false);
                }
            });
        });

    match answer {
        Some(true) => {
            if let Some(pending) = confirmation.pending.take() {
                (pending.on_confirm)();
            }
        }
        Some(false) => confirmation.pending = None,
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_name_the_target() {
        assert_eq!(
            prompt_text(ConfirmKind::Delete, ResourceKind::Backup, "b1"),
            "Are you sure you want to delete backup \"b1\"?"
        );
        assert!(prompt_text(ConfirmKind::Restore, ResourceKind::Schedule, "nightly").starts_with("Restore from schedule \"nightly\"?"));
    }

    #[test]
    fn new_request_replaces_the_open_one() {
        let mut confirmation = Confirmation::new();
        assert!(confirmation.pending.is_none());

        confirmation.request(ConfirmKind::Delete, ResourceKind::Backup, "b1", || {});
        confirmation.request(ConfirmKind::Restore, ResourceKind::Backup, "b2", || {});

        let pending = confirmation.pending.as_ref().unwrap();
        assert_eq!(pending.action, ConfirmKind::Restore);
        assert!(pending.prompt.contains("\"b2\""));
    }
}
