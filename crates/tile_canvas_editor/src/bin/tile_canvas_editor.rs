//! Standalone tile canvas editor binary
//!
//! Run with: tile_canvas_editor
//!
//! Settings are read from the user's config file, which is created with the
//! defaults on first launch.

use bevy::asset::{AssetPlugin, UnapprovedPathMode};
use bevy::image::{ImageFilterMode, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::window::WindowResolution;
use tile_canvas_editor::EditorPlugin;

fn main() {
    let plugin = EditorPlugin::from_config_file();
    let config = plugin.config().clone();
    let layout = config.layout();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: config.window_title.clone(),
                        // One window pixel per screen pixel, so cell math stays exact
                        resolution: WindowResolution::new(
                            layout.canvas_width(),
                            layout.window_height(),
                        )
                        .with_scale_factor_override(1.0),
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin {
                    default_sampler: ImageSamplerDescriptor {
                        mag_filter: ImageFilterMode::Nearest,
                        min_filter: ImageFilterMode::Nearest,
                        mipmap_filter: ImageFilterMode::Nearest,
                        ..default()
                    },
                })
                .set(AssetPlugin {
                    // Tile images are loaded by file name from the tile directory
                    file_path: config.tile_dir_absolute().display().to_string(),
                    unapproved_path_mode: UnapprovedPathMode::Allow,
                    ..default()
                }),
        )
        .add_plugins(plugin)
        .run();
}
