//! Toolbar: file actions, zoom, grid and background

use bevy_egui::egui;

use super::PendingAction;
use crate::editors::choice_label;
use crate::EditorState;

/// Render the toolbar
pub fn render_toolbar(ctx: &egui::Context, editor_state: &mut EditorState) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui
                .button("Open...")
                .on_hover_text("Open workspace (Ctrl+O)")
                .clicked()
            {
                editor_state.pending_action = Some(PendingAction::OpenWorkspace);
            }
            let save_label = if editor_state.modified.is_empty() {
                "Save"
            } else {
                "Save*"
            };
            if ui
                .button(save_label)
                .on_hover_text("Save workspace (Ctrl+S)")
                .clicked()
            {
                editor_state.pending_action = Some(PendingAction::Save);
            }

            let Some(editor) = editor_state.editor.as_mut() else {
                return;
            };

            ui.separator();

            ui.label("Zoom:");
            if ui.button("-").on_hover_text("Zoom out (-)").clicked() {
                editor_state.pending_action = Some(PendingAction::ZoomOut);
            }
            ui.label(format!("{}%", (editor.scale() * 100.0) as i64));
            if ui.button("+").on_hover_text("Zoom in (+)").clicked() {
                editor_state.pending_action = Some(PendingAction::ZoomIn);
            }

            let mut show_grid = editor.show_grid();
            if ui
                .checkbox(&mut show_grid, "Grid")
                .on_hover_text("Toggle grid (G)")
                .changed()
            {
                editor_state.pending_action = Some(PendingAction::ToggleGrid);
            }

            ui.separator();

            ui.label("Background:");
            let current = editor.background_choice();
            let mut picked = None;
            egui::ComboBox::from_id_salt("background_choice")
                .selected_text(
                    choice_label(editor.background_choices(), &current)
                        .unwrap_or_else(|| "None".to_string()),
                )
                .show_ui(ui, |ui| {
                    for choice in editor.background_choices() {
                        if ui
                            .selectable_label(choice.id == current, &choice.label)
                            .clicked()
                        {
                            picked = Some(choice.id);
                        }
                    }
                });
            if let Some(choice) = picked.filter(|c| *c != current) {
                if let Err(e) = editor.choose_background(choice) {
                    editor_state.error_message =
                        Some(format!("Failed to load background: {}", e));
                }
            }
            if ui.button("Go to background").clicked() {
                editor.goto_background();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let file = editor.file();
                let marker = if editor_state.modified.contains(&file.file_name) {
                    " (modified)"
                } else {
                    ""
                };
                ui.label(format!("{} [{}]{}", file.file_name, file.scene_type, marker));
            });
        });
    });
}
