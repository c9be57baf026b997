//! Keyboard shortcut handling

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::ui::PendingAction;
use crate::EditorState;

/// Handle keyboard shortcuts
pub fn handle_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut editor_state: ResMut<EditorState>,
) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);

    if ctrl {
        // Ctrl+S - Save
        if keyboard.just_pressed(KeyCode::KeyS) {
            editor_state.pending_action = Some(PendingAction::Save);
        }
        // Ctrl+O - Open workspace
        if keyboard.just_pressed(KeyCode::KeyO) {
            editor_state.pending_action = Some(PendingAction::OpenWorkspace);
        }
        return;
    }

    // Escape closes the popover even while one of its fields has focus
    if keyboard.just_pressed(KeyCode::Escape) {
        editor_state.pending_action = Some(PendingAction::ClosePopover);
    }

    // Non-Ctrl shortcuts (only when not typing in text fields)
    let typing = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_keyboard_input())
        .unwrap_or(false);
    if typing {
        return;
    }

    if keyboard.just_pressed(KeyCode::Equal) || keyboard.just_pressed(KeyCode::NumpadAdd) {
        editor_state.pending_action = Some(PendingAction::ZoomIn);
    }
    if keyboard.just_pressed(KeyCode::Minus) || keyboard.just_pressed(KeyCode::NumpadSubtract) {
        editor_state.pending_action = Some(PendingAction::ZoomOut);
    }
    // G key - toggle grid
    if keyboard.just_pressed(KeyCode::KeyG) {
        editor_state.pending_action = Some(PendingAction::ToggleGrid);
    }
}
