//! Scene canvas: background, grid, entities and pointer input

use bevy_egui::egui;
use ssa_scene_core::{EntityKind, SceneEntity, TILE_DIM};

use super::UiState;
use crate::canvas::{
    bounding_box_at, draw_order, to_canvas_pixel, to_logical, to_tile, CanvasPixel, CanvasRect,
    LogicalPoint, CANVAS_ORIGIN_OFFSET,
};
use crate::controller::SceneEditor;

const CANVAS_FILL: egui::Color32 = egui::Color32::from_gray(24);
const GRID_COLOR: egui::Color32 = egui::Color32::from_rgba_premultiplied(60, 60, 60, 90);
const SELECTION_COLOR: egui::Color32 = egui::Color32::YELLOW;
const SECTOR_HIGHLIGHT: egui::Color32 = egui::Color32::from_rgb(90, 200, 255);

fn kind_color(kind: EntityKind) -> egui::Color32 {
    match kind {
        EntityKind::Actor => egui::Color32::from_rgb(80, 140, 255),
        EntityKind::Object => egui::Color32::from_rgb(90, 200, 110),
        EntityKind::Performer => egui::Color32::from_rgb(190, 110, 230),
        EntityKind::Trigger => egui::Color32::from_rgb(240, 160, 60),
    }
}

/// Screen transform for one frame of the canvas
struct CanvasTransform {
    origin: egui::Pos2,
    scale: f64,
}

impl CanvasTransform {
    fn to_screen(&self, point: LogicalPoint) -> egui::Pos2 {
        let pixel = to_canvas_pixel(point, self.scale);
        self.origin + egui::vec2(pixel.x as f32, pixel.y as f32)
    }

    fn rect(&self, rect: CanvasRect) -> egui::Rect {
        egui::Rect::from_min_max(
            self.to_screen(LogicalPoint::new(rect.x, rect.y)),
            self.to_screen(LogicalPoint::new(rect.x + rect.w, rect.y + rect.h)),
        )
    }

    fn to_pixel(&self, pos: egui::Pos2) -> CanvasPixel {
        CanvasPixel::new((pos.x - self.origin.x) as f64, (pos.y - self.origin.y) as f64)
    }
}

/// Render the canvas and feed pointer events to the editor
pub fn render_canvas(ui: &mut egui::Ui, ui_state: &mut UiState, editor: &mut SceneEditor) {
    egui::ScrollArea::both()
        .id_salt("canvas_scroll")
        .drag_to_scroll(false)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (width, height) = editor.canvas_size();
            let border = CANVAS_ORIGIN_OFFSET as f32 * 2.0;
            let size = egui::vec2(width as f32 + border, height as f32 + border);
            let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());
            ui_state.canvas_origin = rect.min;

            let transform = CanvasTransform {
                origin: rect.min,
                scale: editor.scale(),
            };

            handle_pointer(ui, ui_state, editor, &response, &transform);
            paint(ui, ui_state, editor, rect, &transform);
        });
}

fn handle_pointer(
    ui: &egui::Ui,
    ui_state: &mut UiState,
    editor: &mut SceneEditor,
    response: &egui::Response,
    transform: &CanvasTransform,
) {
    let (pressed, released, moved, pos) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.delta() != egui::Vec2::ZERO,
            i.pointer.interact_pos(),
        )
    });
    let Some(pos) = pos else {
        ui_state.hover_tile = None;
        return;
    };
    let pixel = transform.to_pixel(pos);
    ui_state.hover_tile = response
        .hovered()
        .then(|| to_tile(to_logical(pixel, transform.scale)));

    if pressed && response.hovered() {
        ui_state.canvas_pressed = true;
        editor.pointer_pressed(pixel);
    } else if ui_state.canvas_pressed {
        if released {
            ui_state.canvas_pressed = false;
            editor.pointer_released(pixel);
        } else if moved {
            editor.pointer_moved(pixel);
        }
    }
}

fn paint(
    ui: &egui::Ui,
    ui_state: &UiState,
    editor: &SceneEditor,
    rect: egui::Rect,
    transform: &CanvasTransform,
) {
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, CANVAS_FILL);

    let (width, height) = editor.canvas_size();
    let image_rect = egui::Rect::from_min_size(
        transform.to_screen(LogicalPoint::new(0, 0)),
        egui::vec2(width as f32, height as f32),
    );
    if let Some(texture_id) = ui_state.background_texture(editor.background_choice()) {
        painter.image(
            texture_id,
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }

    if editor.show_grid() {
        let step = TILE_DIM as f32 * editor.scale() as f32;
        let stroke = egui::Stroke::new(1.0, GRID_COLOR);
        if step >= 2.0 {
            let mut x = image_rect.min.x;
            while x <= image_rect.max.x {
                painter.line_segment(
                    [egui::pos2(x, image_rect.min.y), egui::pos2(x, image_rect.max.y)],
                    stroke,
                );
                x += step;
            }
            let mut y = image_rect.min.y;
            while y <= image_rect.max.y {
                painter.line_segment(
                    [egui::pos2(image_rect.min.x, y), egui::pos2(image_rect.max.x, y)],
                    stroke,
                );
                y += step;
            }
        }
    }

    let scene = editor.scene();
    let names = editor.names();
    let preview = editor.drag_preview();
    for target in draw_order(scene) {
        if !editor.visibility().effective_visible(target.layer) {
            continue;
        }
        let Some(entity) = scene.entity(target) else {
            continue;
        };
        let position = match preview {
            Some((dragged, pos)) if dragged == target => pos,
            _ => *entity.position(),
        };
        let entity_rect = transform.rect(bounding_box_at(entity, &position));
        let color = kind_color(target.kind);

        painter.rect_filled(entity_rect, 0.0, color.gamma_multiply(0.35));
        let (stroke_width, stroke_color) = if editor.canvas_selection() == Some(target) {
            (2.0, SELECTION_COLOR)
        } else if editor.highlighted_sector() == Some(target.layer) {
            (2.0, SECTOR_HIGHLIGHT)
        } else {
            (1.0, color)
        };
        painter.rect_stroke(
            entity_rect,
            0.0,
            egui::Stroke::new(stroke_width, stroke_color),
            egui::StrokeKind::Outside,
        );

        if let SceneEntity::Trigger(trigger) = entity {
            painter.text(
                entity_rect.center_top() + egui::vec2(0.0, 2.0),
                egui::Align2::CENTER_TOP,
                names.event_script_short_name(trigger.trigger_id),
                egui::FontId::proportional(10.0),
                egui::Color32::WHITE,
            );
        }
    }
}
