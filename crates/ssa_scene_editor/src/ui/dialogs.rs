//! Dialog windows for the editor

use bevy_egui::egui;

use crate::workspace::Workspace;
use crate::EditorState;

/// Actions that can be triggered from the toolbar or keyboard
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    OpenWorkspace,
    Save,
    SaveAs,
    ZoomIn,
    ZoomOut,
    ToggleGrid,
    ClosePopover,
}

/// Render all dialogs
pub fn render_dialogs(ctx: &egui::Context, editor_state: &mut EditorState, workspace: &Workspace) {
    render_background_view(ctx, editor_state, workspace);
    render_error_dialog(ctx, editor_state);
}

/// Details of the map background the editor asked to open
fn render_background_view(
    ctx: &egui::Context,
    editor_state: &mut EditorState,
    workspace: &Workspace,
) {
    let Some(map_id) = editor_state.background_view else {
        return;
    };
    let Some(source) = workspace.backgrounds.get(map_id) else {
        editor_state.background_view = None;
        return;
    };

    let mut open = true;
    egui::Window::new(format!("Background: {}", source.name))
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .show(ctx, |ui| {
            ui.label(format!("Map: {}", source.name));
            ui.label(format!("Image: {}", source.image));
            let scenes = workspace
                .scenes
                .iter()
                .filter(|s| s.map_name == source.name)
                .count();
            ui.label(format!("Scenes: {}", scenes));
        });
    if !open {
        editor_state.background_view = None;
    }
}

fn render_error_dialog(ctx: &egui::Context, editor_state: &mut EditorState) {
    let Some(error_msg) = editor_state.error_message.clone() else {
        return;
    };

    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(&error_msg);
            ui.separator();
            if ui.button("OK").clicked() {
                editor_state.error_message = None;
            }
        });
}
