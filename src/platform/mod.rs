//! Platform abstraction layer
//!
//! The browser host lives in `web`: it turns animation-frame timestamps,
//! keyboard and pointer input into controller calls, plays audio cues and
//! hands JSON snapshots to the JavaScript renderer. Asset preloading stays
//! on the JavaScript side; `WebRun` is only constructed once assets are ready.

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Map a pointer position in client (CSS) pixels to world coordinates,
/// given the canvas bounding rect.
pub fn client_to_world(
    client_x: f32,
    client_y: f32,
    rect_left: f32,
    rect_top: f32,
    rect_width: f32,
    rect_height: f32,
) -> (f32, f32) {
    use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};

    let sx = if rect_width > 0.0 { WORLD_WIDTH / rect_width } else { 1.0 };
    let sy = if rect_height > 0.0 { WORLD_HEIGHT / rect_height } else { 1.0 };
    ((client_x - rect_left) * sx, (client_y - rect_top) * sy)
}
