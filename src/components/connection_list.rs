use crate::editor::MapEditorSession;
use crate::models::NodeId;
use leptos::{component, view, Callable, Callback, CollectView, IntoView, RwSignal, SignalWith};

fn node_name(session: &MapEditorSession, id: &NodeId) -> String {
    session
        .node(id)
        .map_or_else(|| id.to_string(), crate::models::MapNode::display_name)
}

#[component]
pub fn ConnectionList(
    session: RwSignal<MapEditorSession>,
    on_select: Callback<String>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let rows = move || {
        session.with(|s| {
            if s.connections().is_empty() {
                return view! { <li class="empty">"No connections on this map"</li> }.into_view();
            }

            s.connections()
                .iter()
                .map(|connection| {
                    let select_id = connection.id.clone();
                    let delete_id = connection.id.clone();
                    let is_selected = s.selected_connection() == Some(connection.id.as_str());
                    let route = format!(
                        "{} → {}",
                        node_name(s, &connection.node_a_id),
                        node_name(s, &connection.node_b_id)
                    );
                    let created = connection.created_at.format("%Y-%m-%d %H:%M").to_string();

                    view! {
                        <li class="connection-row" class:selected=is_selected>
                            <button class="connection-label" on:click=move |_| on_select.call(select_id.clone())>
                                <span class="connection-route">{route}</span>
                                <span class="connection-meta">{connection.label.clone()} " · " {created}</span>
                                {connection.awaiting_recording.then(|| view! {
                                    <span class="connection-pending">"Not walked yet"</span>
                                })}
                            </button>
                            <button
                                class="icon-button danger"
                                title="Delete connection"
                                aria-label="Delete connection"
                                on:click=move |_| on_delete.call(delete_id.clone())
                            >
                                <i class="fa-solid fa-trash"></i>
                            </button>
                        </li>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <section class="connection-list">
            <h3>"Connections"</h3>
            <ul>{rows}</ul>
        </section>
    }
}
