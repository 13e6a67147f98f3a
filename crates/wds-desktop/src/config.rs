//! Shell configuration
//!
//! The dock and topbar belong to the surrounding shell, so their dimensions
//! arrive here as configuration and the usable screen rectangle is derived
//! from them. Every field has a default; hosts may deserialize a partial JSON
//! object.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::math::{Rect, Size};

/// Default storage key for the session snapshot
pub const SESSION_KEY: &str = "desktop-session";

/// Configuration for a [`DesktopEngine`](crate::DesktopEngine)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShellConfig {
    /// Full browser viewport size
    pub screen: Size,
    /// Width reserved on the left edge for the dock
    pub dock_width: f32,
    /// Height reserved on the top edge for the topbar
    pub topbar_height: f32,
    /// Distance at which a dragged window snaps to a screen edge
    pub snap_threshold: f32,
    /// Distance from an edge at which a released drag triggers maximize/half-tiling
    pub aero_snap_threshold: f32,
    /// Bounds given to a window opened without explicit bounds
    pub default_window_bounds: Rect,
    /// Offset applied per already-visible window to default bounds
    pub cascade_step: f32,
    /// Minimum window size when the window does not specify one
    pub min_window_size: Size,
    /// Interval between automatic session saves
    pub autosave_interval_ms: i64,
    /// Snapshots at least this old are discarded on restore
    pub session_max_age_ms: i64,
    /// Blob store key for the session snapshot
    pub session_key: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            screen: Size::new(1920.0, 1080.0),
            dock_width: 64.0,
            topbar_height: 28.0,
            snap_threshold: 20.0,
            aero_snap_threshold: 20.0,
            default_window_bounds: Rect::new(100.0, 100.0, 800.0, 600.0),
            cascade_step: 30.0,
            min_window_size: Size::new(300.0, 200.0),
            autosave_interval_ms: 30_000,
            session_max_age_ms: 24 * 60 * 60 * 1000,
            session_key: SESSION_KEY.to_string(),
        }
    }
}

impl ShellConfig {
    /// Screen area available to windows (viewport minus dock and topbar)
    pub fn usable_rect(&self) -> Rect {
        Rect::new(
            self.dock_width,
            self.topbar_height,
            (self.screen.width - self.dock_width).max(0.0),
            (self.screen.height - self.topbar_height).max(0.0),
        )
    }

    /// Autosave interval as a duration
    pub fn autosave_interval(&self) -> Duration {
        Duration::milliseconds(self.autosave_interval_ms)
    }

    /// Maximum session age as a duration
    pub fn session_max_age(&self) -> Duration {
        Duration::milliseconds(self.session_max_age_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_rect_excludes_dock_and_topbar() {
        let config = ShellConfig {
            screen: Size::new(1280.0, 800.0),
            dock_width: 60.0,
            topbar_height: 30.0,
            ..Default::default()
        };

        assert_eq!(config.usable_rect(), Rect::new(60.0, 30.0, 1220.0, 770.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ShellConfig =
            serde_json::from_str(r#"{"dockWidth": 0, "topbarHeight": 0}"#).unwrap();

        assert_eq!(config.dock_width, 0.0);
        assert_eq!(config.cascade_step, 30.0);
        assert_eq!(config.session_key, SESSION_KEY);
        assert_eq!(config.session_max_age(), Duration::hours(24));
        assert_eq!(config.autosave_interval(), Duration::seconds(30));
    }
}
