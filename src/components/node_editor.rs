use crate::models::{MapNode, NodeId, NodeUpdate};
use leptos::{component, create_rw_signal, event_target_value, view, Callable, Callback, IntoView, SignalGet, SignalGetUntracked, SignalSet};

/// Parse the direction field; blank clears the direction.
fn parse_direction(raw: &str) -> Result<Option<f64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite())
        .map(|d| Some(d.rem_euclid(360.0)))
        .ok_or_else(|| format!("'{trimmed}' is not a compass bearing"))
}

#[component]
pub fn NodeEditor(
    node: MapNode,
    on_save: Callback<NodeUpdate>,
    on_reposition: Callback<NodeId>,
    on_delete: Callback<NodeId>,
    #[prop(optional)] connection_count: usize,
) -> impl IntoView {
    let name = create_rw_signal(node.name.clone());
    let direction = create_rw_signal(
        node.normalized_direction()
            .map(|d| format!("{d:.0}"))
            .unwrap_or_default(),
    );
    let error = create_rw_signal(None::<String>);

    let save_node = node.clone();
    let save = move |_| {
        let name_value = name.get_untracked().trim().to_string();
        if name_value.is_empty() {
            error.set(Some("Name cannot be empty".to_string()));
            return;
        }
        match parse_direction(&direction.get_untracked()) {
            Ok(reference_direction) => {
                error.set(None);
                on_save.call(NodeUpdate {
                    id: save_node.id.clone(),
                    name: name_value,
                    position: save_node.position,
                    reference_direction,
                });
            }
            Err(message) => error.set(Some(message)),
        }
    };

    let reposition_id = node.id.clone();
    let delete_id = node.id.clone();
    let (x, y) = node.position;

    view! {
        <section class="node-editor">
            <h3>"Node"</h3>
            <label class="field">
                <span>"Name"</span>
                <input
                    type="text"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
            </label>
            <label class="field">
                <span>"Reference direction (°)"</span>
                <input
                    type="text"
                    inputmode="decimal"
                    placeholder="none"
                    prop:value=move || direction.get()
                    on:input=move |ev| direction.set(event_target_value(&ev))
                />
            </label>
            <p class="node-position">{format!("Position: {x:.0}, {y:.0}")}</p>
            <p class="node-connections">{format!("{connection_count} connection(s)")}</p>
            {move || error.get().map(|message| view! { <p class="error">{message}</p> })}
            <div class="node-editor-buttons">
                <button class="confirm-button" on:click=save>"Save"</button>
                <button on:click=move |_| on_reposition.call(reposition_id.clone())>"Move on map"</button>
                <button class="danger" on:click=move |_| on_delete.call(delete_id.clone())>"Delete"</button>
            </div>
        </section>
    }
}
