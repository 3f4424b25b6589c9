use crate::components::app::{use_app_context, AppContext};
use crate::components::confirmation_dialog::ConfirmationDialog;
use crate::components::connection_list::ConnectionList;
use crate::components::map_canvas::MapCanvas;
use crate::components::node_editor::NodeEditor;
use crate::editor::{actions, HitTestConfig, MapEditorSession, ModeNotice, TapOutcome};
use crate::geometry::CanvasScale;
use crate::models::{NodeId, NodeUpdate};
use leptos::{component, create_memo, create_rw_signal, spawn_local, view, Callback, IntoView, RwSignal, Signal, SignalGet, SignalGetUntracked, SignalSet, SignalUpdate, SignalWith, SignalWithUntracked};
use leptos_router::use_params_map;

#[component]
pub fn MapDetailPage() -> impl IntoView {
    let params = use_params_map();
    let map_id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());

    view! {
        {move || {
            let id = map_id();
            view! { <MapDetail map_id=id/> }
        }}
    }
}

fn spawn_reload(ctx: AppContext, session: RwSignal<MapEditorSession>) {
    let client = ctx.client();
    spawn_local(async move {
        match actions::reload(&session, &client).await {
            Err(err) if err.is_transient() => ctx.notify(format!("Failed to load map: {err}. Use Reload to retry.")),
            Err(err) => ctx.notify(format!("Failed to load map: {err}")),
            Ok(_) => {}
        }
    });
}

fn spawn_node_update(ctx: AppContext, session: RwSignal<MapEditorSession>, update: NodeUpdate, done: &'static str) {
    let client = ctx.client();
    spawn_local(async move {
        match actions::update_node(&session, &client, &update).await {
            Ok(_) => ctx.notify(done),
            Err(err) => ctx.notify(format!("Failed to update node: {err}")),
        }
    });
}

/// What the pending delete confirmation is about
#[derive(Clone, Debug, PartialEq)]
enum PendingDelete {
    Connection { id: String, label: String },
    Node { id: NodeId, name: String, connections: usize },
}

impl PendingDelete {
    fn message(&self) -> String {
        match self {
            PendingDelete::Connection { label, .. } => {
                format!("Delete {label}? The recorded path will be removed.")
            }
            PendingDelete::Node { name, connections: 0, .. } => format!("Delete {name}?"),
            PendingDelete::Node { name, connections, .. } => {
                format!("Delete {name}? {connections} connection(s) will no longer be shown.")
            }
        }
    }
}

#[component]
#[allow(clippy::too_many_lines)]
pub fn MapDetail(map_id: String) -> impl IntoView {
    let ctx = use_app_context();
    let session = create_rw_signal(MapEditorSession::for_map(&map_id));
    let pending_delete = create_rw_signal(None::<PendingDelete>);

    spawn_reload(ctx, session);

    let notify_notice = move |notice: Option<ModeNotice>| {
        if let Some(notice) = notice {
            // The confirmation dialog announces the pair itself
            if !matches!(notice, ModeNotice::ConfirmRecording { .. }) {
                ctx.notify(notice.message());
            }
        }
    };

    let toggle_mode = move |_| {
        notify_notice(session.try_update(MapEditorSession::toggle_connection_mode).flatten());
    };

    let on_node_tap = Callback::new(move |id: NodeId| {
        notify_notice(session.try_update(|s| s.tap_node(&id)).flatten());
    });

    let on_canvas_tap = Callback::new(move |(tap, scale): ((f64, f64), CanvasScale)| {
        let config = HitTestConfig::from(&ctx.settings.get_untracked());
        let Some((outcome, update)) = session.try_update(|s| s.handle_canvas_tap(tap, scale, config)) else {
            return;
        };

        if let TapOutcome::ConnectionSelected { connection_id, .. } = &outcome {
            if let Some(label) = session.with_untracked(|s| s.connection(connection_id).map(|c| c.label.clone())) {
                ctx.notify(label);
            }
        }
        if let Some(update) = update {
            spawn_node_update(ctx, session, update, "Node moved");
        }
    });

    let on_select_connection = Callback::new(move |id: String| {
        session.update(|s| {
            s.select_connection(&id);
        });
    });

    let on_delete_connection = Callback::new(move |id: String| {
        let label = session.with_untracked(|s| s.connection(&id).map(|c| c.label.clone()));
        if let Some(label) = label {
            pending_delete.set(Some(PendingDelete::Connection { id, label }));
        }
    });

    let on_delete_node = Callback::new(move |id: NodeId| {
        let details = session.with_untracked(|s| {
            s.node(&id).map(|n| (n.display_name(), s.connections_for_node(&id).len()))
        });
        if let Some((name, connections)) = details {
            pending_delete.set(Some(PendingDelete::Node { id, name, connections }));
        }
    });

    let on_save_node = Callback::new(move |update: NodeUpdate| {
        spawn_node_update(ctx, session, update, "Node saved");
    });

    let on_reposition_node = Callback::new(move |id: NodeId| {
        if session.try_update(|s| s.begin_repositioning(&id)).unwrap_or(false) {
            ctx.notify("Tap the map where this node belongs");
        }
    });

    let confirm_delete = Callback::new(move |()| {
        let Some(target) = pending_delete.get_untracked() else { return };
        pending_delete.set(None);
        let client = ctx.client();
        spawn_local(async move {
            let result = match &target {
                PendingDelete::Connection { id, .. } => actions::delete_connection(&session, &client, id).await,
                PendingDelete::Node { id, .. } => actions::delete_node(&session, &client, id).await,
            };
            match result {
                Ok(_) => ctx.notify("Deleted"),
                Err(err) => ctx.notify(format!("Delete failed: {err}")),
            }
        });
    });

    let cancel_delete = Callback::new(move |()| pending_delete.set(None));

    let recording_message = Signal::derive(move || {
        session.with(|s| {
            s.recording_request()
                .map(|r| format!("Record a path from {} to {}?", r.start_name, r.end_name))
                .unwrap_or_default()
        })
    });

    let confirm_recording = Callback::new(move |()| {
        let client = ctx.client();
        spawn_local(async move {
            match actions::record_path(&session, &client, &client).await {
                Ok(Some(_)) => ctx.notify("Path saved"),
                Ok(None) => ctx.notify("No path recorded"),
                Err(err) => ctx.notify(format!("Recording failed: {err}")),
            }
        });
    });

    let cancel_recording = Callback::new(move |()| {
        notify_notice(session.try_update(MapEditorSession::cancel_recording).flatten());
    });

    let mode_label = move || {
        if session.with(|s| s.mode().is_active()) {
            "Exit connection mode"
        } else {
            "Connect nodes"
        }
    };

    let title = move || session.with(|s| s.map().map(|m| m.name.clone()).unwrap_or_default());
    let marker_radius = Signal::derive(move || ctx.settings.with(|s| s.node_marker_radius_px));

    // Only rebuild the editor when the selected node itself changes
    let selected_node = create_memo(move |_| {
        session.with(|s| {
            s.selected_node().cloned().map(|node| {
                let count = s.connections_for_node(&node.id).len();
                (node, count)
            })
        })
    });

    let editor_panel = move || {
        let (node, connection_count) = selected_node.get()?;
        Some(view! {
            <div class="node-editor-host">
                <NodeEditor
                    node=node
                    on_save=on_save_node
                    on_reposition=on_reposition_node
                    on_delete=on_delete_node
                    connection_count=connection_count
                />
            </div>
        })
    };

    view! {
        <section class="map-detail">
            <div class="map-toolbar">
                <h1>{title}</h1>
                <button
                    class="toolbar-button"
                    class:active=move || session.with(|s| s.mode().is_active())
                    on:click=toggle_mode
                >
                    {mode_label}
                </button>
                <button class="toolbar-button" on:click=move |_| spawn_reload(ctx, session)>"Reload"</button>
                {move || session.with(|s| s.repositioning().is_some()).then(|| view! {
                    <button class="toolbar-button" on:click=move |_| session.update(MapEditorSession::cancel_repositioning)>
                        "Cancel move"
                    </button>
                })}
                {move || session.with(MapEditorSession::is_loading).then(|| view! {
                    <span class="loading-indicator" aria-live="polite">"Loading…"</span>
                })}
            </div>

            <div class="map-detail-body">
                <MapCanvas
                    session=session
                    marker_radius=marker_radius
                    on_node_tap=on_node_tap
                    on_canvas_tap=on_canvas_tap
                />
                <aside class="map-sidebar">
                    {editor_panel}
                    <ConnectionList
                        session=session
                        on_select=on_select_connection
                        on_delete=on_delete_connection
                    />
                </aside>
            </div>

            <ConfirmationDialog
                is_open=Signal::derive(move || session.with(|s| s.recording_request().is_some()))
                title=Signal::derive(|| "Create connection".to_string())
                message=recording_message
                on_confirm=confirm_recording
                on_cancel=cancel_recording
                confirm_text="Record path".to_string()
            />

            <ConfirmationDialog
                is_open=Signal::derive(move || pending_delete.with(Option::is_some))
                title=Signal::derive(|| "Confirm delete".to_string())
                message=Signal::derive(move || pending_delete.with(|p| p.as_ref().map(PendingDelete::message).unwrap_or_default()))
                on_confirm=confirm_delete
                on_cancel=cancel_delete
                confirm_text="Delete".to_string()
                danger=true
            />
        </section>
    }
}
