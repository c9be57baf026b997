//! Editor UI components using bevy_egui
//!
//! The UI only reads the open `SceneEditor` and forwards widget and pointer
//! events to it. All state changes go through the controller.

mod canvas;
mod dialogs;
mod panels;
mod popover;
mod toolbar;

pub use canvas::render_canvas;
pub use dialogs::*;
pub use panels::render_utility_panel;
pub use popover::render_popover;
pub use toolbar::render_toolbar;

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass, EguiTextureHandle};

use crate::canvas::TilePoint;
use crate::controller::ViewEvent;
use crate::workspace::Workspace;
use crate::EditorState;

/// Main UI plugin
pub struct EditorUiPlugin;

impl Plugin for EditorUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiState>()
            .add_systems(Update, load_background_texture)
            .add_systems(EguiPrimaryContextPass, render_ui);
    }
}

/// Background image registered with egui
#[derive(Debug, Clone)]
pub struct BackgroundTexture {
    pub map_id: usize,
    pub handle: Handle<Image>,
    pub texture_id: egui::TextureId,
}

/// UI state that does not belong to the open scene
#[derive(Resource, Default)]
pub struct UiState {
    pub background: Option<BackgroundTexture>,
    /// A canvas press is in progress
    pub canvas_pressed: bool,
    /// Screen position of canvas pixel (0, 0) in the last frame
    pub canvas_origin: egui::Pos2,
    /// Tile under the pointer
    pub hover_tile: Option<TilePoint>,
}

impl UiState {
    /// Texture of the given background, if it is the one uploaded
    pub fn background_texture(&self, map_id: Option<usize>) -> Option<egui::TextureId> {
        match (&self.background, map_id) {
            (Some(bg), Some(id)) if bg.map_id == id => Some(bg.texture_id),
            _ => None,
        }
    }
}

/// Upload the chosen background to the GPU when the choice changes
fn load_background_texture(
    editor_state: Res<EditorState>,
    mut ui_state: ResMut<UiState>,
    mut contexts: EguiContexts,
    mut images: ResMut<Assets<Image>>,
) {
    let Some(editor) = &editor_state.editor else {
        return;
    };
    let (Some(map_id), Some(background)) = (editor.background_choice(), editor.background())
    else {
        return;
    };
    if ui_state.background_texture(Some(map_id)).is_some() {
        return;
    }

    if let Some(old) = ui_state.background.take() {
        images.remove(&old.handle);
    }
    let image = Image::from_dynamic(
        image::DynamicImage::ImageRgba8((*background.image).clone()),
        true,
        RenderAssetUsages::RENDER_WORLD,
    );
    let handle = images.add(image);
    let texture_id = contexts.add_image(EguiTextureHandle::Strong(handle.clone()));
    bevy::log::debug!(
        "Uploaded background {} ({}x{})",
        map_id,
        background.width,
        background.height
    );
    ui_state.background = Some(BackgroundTexture {
        map_id,
        handle,
        texture_id,
    });
}

fn render_ui(
    mut contexts: EguiContexts,
    mut ui_state: ResMut<UiState>,
    mut editor_state: ResMut<EditorState>,
    workspace: Res<Workspace>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };
    let editor_state = &mut *editor_state;

    render_toolbar(ctx, editor_state);

    if let Some(editor) = editor_state.editor.as_mut() {
        egui::SidePanel::left("utility_panel")
            .resizable(true)
            .default_width(editor.session().panel_width)
            .show(ctx, |ui| {
                editor.session_mut().panel_width = ui.available_width();
                render_utility_panel(ui, editor);
            });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(tile) = ui_state.hover_tile {
                    ui.label(format!("Tile: {}, {}", tile.x, tile.y));
                    ui.separator();
                }
                match editor.selection() {
                    Some(target) => ui.label(format!(
                        "Selected: {} {} in sector {}",
                        target.kind.display_name(),
                        target.index,
                        target.layer
                    )),
                    None => ui.label("Nothing selected"),
                };
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            render_canvas(ui, &mut ui_state, editor);
        });

        render_popover(ctx, &ui_state, editor);

        let events = editor.drain_events();
        if events.iter().any(|e| *e == ViewEvent::Redraw) {
            ctx.request_repaint();
        }
    } else {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                if workspace.scenes.is_empty() {
                    ui.label("No workspace loaded. Open one from the toolbar.");
                } else {
                    ui.label("No scene open");
                }
            });
        });
    }

    render_dialogs(ctx, editor_state, &workspace);
}
