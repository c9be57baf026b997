//! Standalone scene editor binary
//!
//! Run with: ssa_scene_editor [workspace.json] [scene file]

use bevy::image::{ImageFilterMode, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::window::WindowResolution;
use ssa_scene_editor::SceneEditorPlugin;

fn main() {
    let mut args = std::env::args().skip(1);
    let mut plugin = SceneEditorPlugin::new();
    if let Some(workspace) = args.next() {
        plugin = plugin.with_workspace(workspace);
    }
    if let Some(scene) = args.next() {
        plugin = plugin.with_initial_scene(scene);
    }

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "SSA Scene Editor".to_string(),
                        resolution: WindowResolution::new(1600, 900)
                            .with_scale_factor_override(1.0),
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin {
                    // Backgrounds are pixel art; keep them crisp when zoomed
                    default_sampler: ImageSamplerDescriptor {
                        mag_filter: ImageFilterMode::Nearest,
                        min_filter: ImageFilterMode::Nearest,
                        mipmap_filter: ImageFilterMode::Nearest,
                        ..default()
                    },
                }),
        )
        .add_plugins(plugin)
        .run();
}
