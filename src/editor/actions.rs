//! Async editor operations.
//!
//! Each operation talks to the backend without holding the session borrowed, so
//! the UI stays responsive while a request is in flight. Results are written
//! back through a [`SessionStore`], which reports `None` once the view that owns
//! the session has gone away.

use super::session::{MapEditorSession, MapSnapshot};
use crate::api::{BackendError, MapBackend, PathRecorder};
use crate::models::{NodeId, NodeUpdate};
use std::cell::RefCell;

/// Somewhere a [`MapEditorSession`] lives
pub trait SessionStore {
    /// Run `f` against the session, or return `None` if it is no longer available.
    fn with_session<R>(&self, f: impl FnOnce(&mut MapEditorSession) -> R) -> Option<R>;
}

impl SessionStore for RefCell<MapEditorSession> {
    fn with_session<R>(&self, f: impl FnOnce(&mut MapEditorSession) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

impl SessionStore for leptos::RwSignal<MapEditorSession> {
    fn with_session<R>(&self, f: impl FnOnce(&mut MapEditorSession) -> R) -> Option<R> {
        leptos::SignalUpdate::try_update(self, f)
    }
}

/// What a reload ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadStatus {
    Applied,
    /// A newer load started or the view closed before the response arrived
    Discarded,
}

/// Fetch map, nodes and every path concurrently.
///
/// # Errors
///
/// Returns the first backend error encountered.
pub async fn fetch_snapshot<B: MapBackend>(backend: &B, map_id: &str) -> Result<MapSnapshot, BackendError> {
    let (map, nodes, paths) = futures::try_join!(
        backend.fetch_map(map_id),
        backend.fetch_map_nodes(map_id),
        backend.fetch_navigation_paths(),
    )?;
    Ok(MapSnapshot { map, nodes, paths })
}

/// Reload everything for the session's map and re-derive connections.
///
/// # Errors
///
/// Returns the backend error if this load is still the current one.
pub async fn reload<S: SessionStore, B: MapBackend>(store: &S, backend: &B) -> Result<ReloadStatus, BackendError> {
    let Some((ticket, map_id)) = store.with_session(|s| (s.begin_load(), s.map_id().to_string())) else {
        return Ok(ReloadStatus::Discarded);
    };

    let result = fetch_snapshot(backend, &map_id).await;

    match store.with_session(|s| s.apply_load(ticket, result)) {
        Some(Ok(true)) => Ok(ReloadStatus::Applied),
        Some(Ok(false)) | None => Ok(ReloadStatus::Discarded),
        Some(Err(err)) => {
            crate::log_warn!("Failed to load map {}: {}", map_id, err);
            Err(err)
        }
    }
}

/// Delete the path behind a connection, then reload.
///
/// # Errors
///
/// Fails with `NotFound` for an unknown connection, or with the backend error;
/// the connection list is left as it was in both cases.
pub async fn delete_connection<S: SessionStore, B: MapBackend>(
    store: &S,
    backend: &B,
    connection_id: &str,
) -> Result<ReloadStatus, BackendError> {
    let exists = store
        .with_session(|s| s.connection(connection_id).is_some())
        .unwrap_or(false);
    if !exists {
        return Err(BackendError::NotFound(format!("Connection {connection_id}")));
    }

    backend.delete_navigation_path(connection_id).await?;
    crate::log!("Deleted navigation path {}", connection_id);
    reload(store, backend).await
}

/// Delete a node, then reload. Connections that used it disappear on re-derivation.
///
/// # Errors
///
/// Returns the backend error; local state is left as it was.
pub async fn delete_node<S: SessionStore, B: MapBackend>(
    store: &S,
    backend: &B,
    node_id: &NodeId,
) -> Result<ReloadStatus, BackendError> {
    backend.delete_map_node(node_id).await?;
    crate::log!("Deleted map node {}", node_id);
    reload(store, backend).await
}

/// Persist a node edit, then reload.
///
/// # Errors
///
/// Returns the backend error. An optimistic local move is put back first, then
/// a best-effort reload picks up whatever the backend holds.
pub async fn update_node<S: SessionStore, B: MapBackend>(
    store: &S,
    backend: &B,
    update: &NodeUpdate,
) -> Result<ReloadStatus, BackendError> {
    if let Err(err) = backend.update_map_node(update).await {
        store.with_session(|s| s.rollback_node_update(&update.id));
        if let Err(reload_err) = reload(store, backend).await {
            crate::log_warn!("Reload after failed update of {} also failed: {}", update.id, reload_err);
        }
        return Err(err);
    }
    store.with_session(|s| s.confirm_node_update(&update.id));
    reload(store, backend).await
}

/// Hand the confirmed node pair to the recorder.
///
/// The pair is taken and connection mode goes back to waiting for a start node
/// before the recorder runs, so a repeated confirm cannot hand it over twice.
/// A recorded path triggers a reload; an abandoned recording changes nothing.
///
/// # Errors
///
/// Returns the recorder or reload error.
pub async fn record_path<S: SessionStore, B: MapBackend, R: PathRecorder>(
    store: &S,
    backend: &B,
    recorder: &R,
) -> Result<Option<ReloadStatus>, BackendError> {
    let Some(request) = store.with_session(MapEditorSession::take_recording_request).flatten() else {
        return Ok(None);
    };

    match recorder.record(&request).await? {
        Some(path) => {
            crate::log!("Recorded path {} ({} waypoints)", path.id, path.waypoint_count());
            reload(store, backend).await.map(Some)
        }
        None => Ok(None),
    }
}
