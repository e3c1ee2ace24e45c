//! Crash panel layout
//!
//! The renderer draws the result panel; the simulation only needs to know
//! where the retry button sits to hit-test pointer input.

use serde::Serialize;

use crate::consts::WORLD_WIDTH;
use crate::sim::Rect;

pub const PANEL_WIDTH: f32 = 340.0;
pub const PANEL_HEIGHT: f32 = 220.0;
pub const PANEL_Y: f32 = 130.0;
pub const RETRY_WIDTH: f32 = 132.0;
pub const RETRY_HEIGHT: f32 = 42.0;
/// Retry button offset from the panel top
pub const RETRY_OFFSET_Y: f32 = 145.0;

/// Result panel and its retry button, in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrashPanelLayout {
    pub panel: Rect,
    pub retry: Rect,
}

impl Default for CrashPanelLayout {
    fn default() -> Self {
        Self::for_width(WORLD_WIDTH)
    }
}

impl CrashPanelLayout {
    /// Panel centred horizontally in a world `width` wide
    pub fn for_width(width: f32) -> Self {
        let panel = Rect::new((width - PANEL_WIDTH) * 0.5, PANEL_Y, PANEL_WIDTH, PANEL_HEIGHT);
        let retry = Rect::new(
            panel.x + (PANEL_WIDTH - RETRY_WIDTH) * 0.5,
            panel.y + RETRY_OFFSET_Y,
            RETRY_WIDTH,
            RETRY_HEIGHT,
        );
        Self { panel, retry }
    }

    pub fn hits_retry(&self, x: f32, y: f32) -> bool {
        self.retry.contains(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = CrashPanelLayout::default();
        assert_eq!(layout.panel.x, 30.0);
        assert_eq!(layout.retry, Rect::new(134.0, 275.0, 132.0, 42.0));
    }

    #[test]
    fn test_hits_retry() {
        let layout = CrashPanelLayout::default();
        assert!(layout.hits_retry(200.0, 296.0));
        assert!(layout.hits_retry(134.0, 275.0));
        assert!(!layout.hits_retry(200.0, 200.0));
    }
}
