//! JavaScript bindings
//!
//! Thin `wasm-bindgen` wrapper over [`DesktopEngine`]. Ids cross the boundary
//! as strings and structured values as JSON strings; an id that does not
//! parse behaves like an id that no longer exists.

use std::str::FromStr;

use wasm_bindgen::prelude::*;
use wds_storage::LocalStorageBlobStore;

use crate::config::ShellConfig;
use crate::engine::DesktopEngine;
use crate::input::{PointerCapture, ResizeHandle};
use crate::types::WindowId;
use crate::window::WindowSpec;

/// Pointer capture backed by two JavaScript callbacks
struct JsPointerCapture {
    attach: js_sys::Function,
    release: js_sys::Function,
}

impl PointerCapture for JsPointerCapture {
    fn attach(&mut self) {
        if let Err(e) = self.attach.call0(&JsValue::NULL) {
            tracing::warn!(error = ?e, "pointer capture attach callback threw");
        }
    }

    fn release(&mut self) {
        if let Err(e) = self.release.call0(&JsValue::NULL) {
            tracing::warn!(error = ?e, "pointer capture release callback threw");
        }
    }
}

fn parse_id(id: &str) -> Option<WindowId> {
    WindowId::from_str(id).ok()
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Web desktop handle exported to JavaScript
#[wasm_bindgen]
pub struct WebDesktop {
    engine: DesktopEngine,
}

#[wasm_bindgen]
impl WebDesktop {
    /// Create a desktop persisting to `localStorage`
    ///
    /// `config_json` is an optional partial `ShellConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WebDesktop, JsValue> {
        console_error_panic_hook::set_once();

        let config = match config_json {
            Some(json) => serde_json::from_str::<ShellConfig>(&json).map_err(to_js_error)?,
            None => ShellConfig::default(),
        };
        let engine = DesktopEngine::new(config).with_store(LocalStorageBlobStore::new());
        Ok(WebDesktop { engine })
    }

    /// Register callbacks that bind/unbind document pointer listeners
    #[wasm_bindgen]
    pub fn set_pointer_capture(&mut self, attach: js_sys::Function, release: js_sys::Function) {
        self.engine
            .set_capture(JsPointerCapture { attach, release });
    }

    #[wasm_bindgen]
    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        self.engine.set_screen_size(width, height);
    }

    // Windows

    /// Open a window from a `WindowSpec` JSON object; returns the window id
    #[wasm_bindgen]
    pub fn open_window(&mut self, spec_json: &str) -> Result<String, JsValue> {
        let spec: WindowSpec = serde_json::from_str(spec_json).map_err(to_js_error)?;
        Ok(self.engine.open_window(spec).to_string())
    }

    #[wasm_bindgen]
    pub fn close_window(&mut self, id: &str) -> bool {
        parse_id(id).is_some_and(|id| self.engine.close_window(id))
    }

    #[wasm_bindgen]
    pub fn focus_window(&mut self, id: &str) -> bool {
        parse_id(id).is_some_and(|id| self.engine.focus_window(id))
    }

    #[wasm_bindgen]
    pub fn minimize_window(&mut self, id: &str) -> bool {
        parse_id(id).is_some_and(|id| self.engine.minimize_window(id))
    }

    #[wasm_bindgen]
    pub fn maximize_window(&mut self, id: &str) -> bool {
        parse_id(id).is_some_and(|id| self.engine.maximize_window(id))
    }

    #[wasm_bindgen]
    pub fn restore_window(&mut self, id: &str) -> bool {
        parse_id(id).is_some_and(|id| self.engine.restore_window(id))
    }

    #[wasm_bindgen]
    pub fn move_window(&mut self, id: &str, x: f32, y: f32) -> bool {
        parse_id(id).is_some_and(|id| self.engine.move_window(id, x, y))
    }

    #[wasm_bindgen]
    pub fn resize_window(&mut self, id: &str, width: f32, height: f32) -> bool {
        parse_id(id).is_some_and(|id| self.engine.resize_window(id, width, height))
    }

    #[wasm_bindgen]
    pub fn set_window_title(&mut self, id: &str, title: &str) -> bool {
        parse_id(id).is_some_and(|id| self.engine.set_window_title(id, title))
    }

    /// Alt-Tab; returns the newly focused window id
    #[wasm_bindgen]
    pub fn focus_next(&mut self) -> Option<String> {
        self.engine.focus_next().map(|id| id.to_string())
    }

    /// Paint-ordered `WindowFrame` array as JSON
    #[wasm_bindgen]
    pub fn frames_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.frames()).map_err(to_js_error)
    }

    // Pointer

    #[wasm_bindgen]
    pub fn begin_move(&mut self, id: &str, x: f32, y: f32) -> bool {
        parse_id(id).is_some_and(|id| self.engine.begin_move(id, x, y))
    }

    /// Start a resize from a handle direction ("n", "se", ...)
    #[wasm_bindgen]
    pub fn begin_resize(&mut self, id: &str, direction: &str, x: f32, y: f32) -> bool {
        let (Some(id), Some(handle)) = (parse_id(id), ResizeHandle::from_direction(direction))
        else {
            return false;
        };
        self.engine.begin_resize(id, handle, x, y)
    }

    /// Returns true if the move updated a window
    #[wasm_bindgen]
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.engine.pointer_move(x, y).is_some()
    }

    /// Returns true if an interaction ended
    #[wasm_bindgen]
    pub fn pointer_up(&mut self) -> bool {
        self.engine.pointer_up().is_some()
    }

    // Workspaces

    #[wasm_bindgen]
    pub fn create_workspace(&mut self, name: Option<String>) -> u32 {
        self.engine.create_workspace(name.as_deref())
    }

    #[wasm_bindgen]
    pub fn delete_workspace(&mut self, id: u32) -> bool {
        self.engine.delete_workspace(id)
    }

    #[wasm_bindgen]
    pub fn rename_workspace(&mut self, id: u32, name: &str) -> bool {
        self.engine.rename_workspace(id, name)
    }

    #[wasm_bindgen]
    pub fn switch_workspace(&mut self, id: u32) -> bool {
        self.engine.switch_workspace(id)
    }

    #[wasm_bindgen]
    pub fn switch_next_workspace(&mut self) -> u32 {
        self.engine.switch_next_workspace()
    }

    #[wasm_bindgen]
    pub fn switch_previous_workspace(&mut self) -> u32 {
        self.engine.switch_previous_workspace()
    }

    #[wasm_bindgen]
    pub fn move_window_to_workspace(&mut self, id: &str, workspace: u32) -> bool {
        parse_id(id).is_some_and(|id| self.engine.move_window_to_workspace(id, workspace))
    }

    #[wasm_bindgen]
    pub fn current_workspace(&self) -> u32 {
        self.engine.current_workspace()
    }

    // Overview

    #[wasm_bindgen]
    pub fn toggle_overview(&mut self) -> bool {
        self.engine.toggle_overview()
    }

    #[wasm_bindgen]
    pub fn overview_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.overview()).map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn activate_window(&mut self, id: &str) -> bool {
        parse_id(id).is_some_and(|id| self.engine.activate_window(id))
    }

    // Session

    #[wasm_bindgen]
    pub fn set_settings_json(&mut self, json: &str) -> Result<(), JsValue> {
        let settings = serde_json::from_str(json).map_err(to_js_error)?;
        self.engine.set_settings(settings);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn settings_json(&self) -> String {
        self.engine.settings().to_string()
    }

    #[wasm_bindgen]
    pub fn save_session(&mut self) -> bool {
        self.engine.save_session()
    }

    #[wasm_bindgen]
    pub fn load_session(&mut self) -> bool {
        self.engine.load_session()
    }

    /// Call from a `setInterval`; saves when the autosave interval has elapsed
    #[wasm_bindgen]
    pub fn tick(&mut self) -> bool {
        self.engine.tick()
    }

    /// Call from `pagehide`/`beforeunload`
    #[wasm_bindgen]
    pub fn shutdown(&mut self) {
        self.engine.shutdown();
    }
}
