//! Session snapshot
//!
//! A snapshot is the whole desktop in one JSON document: every window, the
//! workspace list, the current workspace, opaque settings and the time it
//! was taken. It is written under a single blob-store key.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use wds_storage::BlobStore;

use crate::error::{DesktopError, DesktopResult};
use crate::types::{WindowId, WorkspaceId};
use crate::window::{Window, WindowRegistry, WindowSpec};
use crate::workspace::{Workspace, WorkspaceManager};

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

/// Serialized desktop state
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    pub windows: Vec<Window>,
    pub workspaces: Vec<Workspace>,
    pub current_workspace: WorkspaceId,
    /// Host settings, carried through untouched
    #[serde(default)]
    pub settings: serde_json::Value,
    /// When the snapshot was taken (ISO-8601)
    pub timestamp: DateTime<Utc>,
}

impl SessionSnapshot {
    /// Capture the registry and workspace list as of `now`
    pub fn capture(
        registry: &WindowRegistry,
        workspaces: &WorkspaceManager,
        settings: &serde_json::Value,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            windows: registry.windows().to_vec(),
            workspaces: workspaces.workspaces().to_vec(),
            current_workspace: workspaces.current(),
            settings: settings.clone(),
            timestamp: now,
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> DesktopResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate a snapshot
    ///
    /// A snapshot without workspaces cannot describe a desktop and is rejected.
    pub fn from_json(json: &str) -> DesktopResult<Self> {
        let snapshot: SessionSnapshot = serde_json::from_str(json)?;
        if snapshot.workspaces.is_empty() {
            return Err(DesktopError::InvalidSnapshot("no workspaces"));
        }
        Ok(snapshot)
    }

    /// Time elapsed since the snapshot was taken
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.timestamp
    }

    /// Check the snapshot is younger than `max_age`
    pub fn ensure_fresh(&self, now: DateTime<Utc>, max_age: Duration) -> DesktopResult<()> {
        let age = self.age(now);
        if age >= max_age {
            return Err(DesktopError::StaleSession {
                age_minutes: age.num_minutes(),
            });
        }
        Ok(())
    }

    pub fn is_fresh(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        self.ensure_fresh(now, max_age).is_ok()
    }

    /// Window that held focus when the snapshot was taken
    pub fn focused_window(&self) -> Option<WindowId> {
        self.windows.iter().find(|w| w.flags.focused).map(|w| w.id)
    }

    /// Write the snapshot to `store` under `key`
    pub fn write_to(&self, store: &dyn BlobStore, key: &str) -> DesktopResult<()> {
        let json = self.to_json()?;
        store.write_blob(key, &json)?;
        debug!(key, windows = self.windows.len(), "session snapshot written");
        Ok(())
    }

    /// Read the snapshot stored under `key`. A missing key is `Ok(None)`.
    pub fn read_from(store: &dyn BlobStore, key: &str) -> DesktopResult<Option<Self>> {
        match store.read_blob(key)? {
            Some(json) => Self::from_json(&json).map(Some),
            None => Ok(None),
        }
    }

    /// Rebuild the desktop from this snapshot
    ///
    /// The registry is cleared and the workspace list replaced. Windows are
    /// reopened in ascending z-order under their original ids, so paint order
    /// and ids survive. A window naming a workspace that no longer exists
    /// lands on the current one. Focus goes back to the window that held it,
    /// if it is still shown.
    pub fn restore_into(
        &self,
        registry: &mut WindowRegistry,
        workspaces: &mut WorkspaceManager,
    ) -> DesktopResult<()> {
        if self.workspaces.is_empty() {
            return Err(DesktopError::InvalidSnapshot("no workspaces"));
        }
        registry.clear();
        workspaces.replace(registry, self.workspaces.clone(), self.current_workspace);
        let current = workspaces.current();

        let mut ordered: Vec<&Window> = self.windows.iter().collect();
        ordered.sort_by_key(|w| w.z_index);

        for saved in ordered {
            let workspace = if workspaces.contains(saved.workspace) {
                saved.workspace
            } else {
                warn!(
                    window_id = %saved.id,
                    workspace = saved.workspace,
                    "restored window names an unknown workspace"
                );
                current
            };

            let mut spec = WindowSpec::new(saved.app_id.clone(), saved.title.clone())
                .with_id(saved.id)
                .with_bounds(saved.bounds)
                .on_workspace(workspace)
                .with_min_size(saved.min_size)
                .with_capabilities(saved.flags.capabilities());
            spec.max_size = saved.max_size;

            let id = registry.open(spec);
            workspaces.attach_window(id, workspace);

            if saved.flags.maximized {
                registry.maximize(id);
            }
            if saved.flags.minimized {
                registry.minimize(id);
            }
        }

        let focus_target = self
            .focused_window()
            .filter(|id| registry.get(*id).is_some_and(|w| w.is_shown()));
        match focus_target {
            Some(id) => {
                registry.focus(id);
            }
            None => {
                registry.refocus();
            }
        }

        debug!(
            windows = registry.count(),
            workspace = current,
            "session restored"
        );
        Ok(())
    }
}
