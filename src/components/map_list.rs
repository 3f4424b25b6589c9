use crate::api::MapBackend;
use crate::components::app::use_app_context;
use crate::models::FloorMap;
use leptos::{component, create_rw_signal, create_effect, spawn_local, view, CollectView, IntoView, SignalGet, SignalSet, SignalWith};
use leptos_router::A;

#[derive(Clone, Debug, PartialEq)]
enum MapListState {
    Loading,
    Loaded(Vec<FloorMap>),
    Failed(String),
}

#[component]
pub fn MapList() -> impl IntoView {
    let ctx = use_app_context();
    let state = create_rw_signal(MapListState::Loading);

    // Refetch whenever the backend settings change
    create_effect(move |_| {
        let backend = ctx.settings.with(|s| s.backend.clone());
        state.set(MapListState::Loading);
        let client = crate::api::SupabaseClient::new(backend);
        spawn_local(async move {
            let next = match client.fetch_maps().await {
                Ok(maps) => MapListState::Loaded(maps),
                Err(err) => {
                    crate::log_warn!("Failed to load maps: {}", err);
                    MapListState::Failed(err.to_string())
                }
            };
            // The list may have been unmounted while the request was in flight
            let _ = leptos::SignalUpdate::try_update(&state, |s| *s = next);
        });
    });

    view! {
        <section class="map-list">
            <h1>"Floor maps"</h1>
            {move || match state.get() {
                MapListState::Loading => view! { <p class="loading">"Loading maps…"</p> }.into_view(),
                MapListState::Failed(message) => view! { <p class="error">{message}</p> }.into_view(),
                MapListState::Loaded(maps) if maps.is_empty() => {
                    view! { <p class="empty">"No maps yet"</p> }.into_view()
                }
                MapListState::Loaded(maps) => view! {
                    <ul class="map-list-items">
                        {maps
                            .into_iter()
                            .map(|map| {
                                let href = format!("/maps/{}", map.id);
                                view! {
                                    <li>
                                        <A href=href>{map.name}</A>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                }
                .into_view(),
            }}
        </section>
    }
}
