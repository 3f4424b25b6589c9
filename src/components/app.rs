use crate::api::SupabaseClient;
use crate::components::map_detail::MapDetailPage;
use crate::components::map_list::MapList;
use crate::components::settings::Settings;
use crate::components::toast::{self, Toast, ToastNotification};
use crate::models::EditorSettings;
use crate::storage;
use leptos::{component, create_rw_signal, expect_context, provide_context, view, IntoView, RwSignal, SignalGetUntracked};
use leptos_meta::{provide_meta_context, Title};
use leptos_router::{Route, Router, Routes, A};

/// Shared state every screen reaches through context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub settings: RwSignal<EditorSettings>,
    pub toast: RwSignal<Toast>,
}

impl AppContext {
    /// Backend client for the settings in force right now
    #[must_use]
    pub fn client(&self) -> SupabaseClient {
        SupabaseClient::new(self.settings.get_untracked().backend)
    }

    pub fn notify(&self, message: impl Into<String>) {
        let duration = self.settings.get_untracked().toast_duration_ms;
        toast::show_toast(self.toast, message.into(), duration);
    }
}

#[must_use]
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let ctx = AppContext {
        settings: create_rw_signal(storage::load_settings_or_default()),
        toast: create_rw_signal(Toast::default()),
    };
    provide_context(ctx);

    view! {
        <Title text="Wayfinder Admin"/>
        <Router>
            <header class="app-header">
                <A href="/" class="app-title">"Wayfinder Admin"</A>
                <Settings/>
            </header>
            <main class="app-main">
                <Routes>
                    <Route path="/" view=MapList/>
                    <Route path="/maps/:id" view=MapDetailPage/>
                </Routes>
            </main>
            <ToastNotification toast=ctx.toast/>
        </Router>
    }
}
