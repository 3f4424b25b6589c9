use crate::components::app::use_app_context;
use crate::components::modal_overlay::ModalOverlay;
use crate::models::{EditorSettings, HitPolicy};
use crate::storage;
use leptos::{component, create_rw_signal, event_target_value, view, Callback, IntoView, Signal, SignalGet, SignalGetUntracked, SignalSet, SignalUpdate};

#[component]
#[allow(clippy::too_many_lines)]
pub fn Settings() -> impl IntoView {
    let ctx = use_app_context();
    let is_open = create_rw_signal(false);
    let draft = create_rw_signal(EditorSettings::default());

    let open = move |_| {
        draft.set(ctx.settings.get_untracked());
        is_open.set(true);
    };

    let close = Callback::new(move |()| is_open.set(false));

    let save = move |_| {
        let settings = draft.get_untracked().sanitized();
        match storage::save_settings(&settings) {
            Ok(()) => {
                ctx.settings.set(settings);
                ctx.notify("Settings saved");
                is_open.set(false);
            }
            Err(err) => {
                crate::log_error!("{}", err);
                ctx.notify(err);
            }
        }
    };

    view! {
        <button class="toolbar-button" title="Settings" on:click=open>
            <i class="fa-solid fa-cog"></i>
            " Settings"
        </button>

        <ModalOverlay is_open=Signal::derive(move || is_open.get()) on_dismiss=close>
            <div class="settings-content">
                <h2>"Settings"</h2>

                <div class="settings-section">
                    <h3>"Backend"</h3>
                    <label class="field">
                        <span>"Project URL"</span>
                        <input
                            type="url"
                            placeholder="https://your-project.supabase.co"
                            prop:value=move || draft.get().backend.url
                            on:input=move |ev| draft.update(|d| d.backend.url = event_target_value(&ev))
                        />
                    </label>
                    <label class="field">
                        <span>"Anon key"</span>
                        <input
                            type="password"
                            prop:value=move || draft.get().backend.anon_key
                            on:input=move |ev| draft.update(|d| d.backend.anon_key = event_target_value(&ev))
                        />
                    </label>
                </div>

                <div class="settings-section">
                    <h3>"Connection hit-testing"</h3>
                    <label class="field">
                        <span>"Tap tolerance (px)"</span>
                        <input
                            type="number"
                            min="1"
                            max="200"
                            prop:value=move || draft.get().hit_tolerance_px.to_string()
                            on:change=move |ev| {
                                if let Ok(value) = event_target_value(&ev).parse::<f64>() {
                                    draft.update(|d| d.hit_tolerance_px = value);
                                }
                            }
                        />
                    </label>
                    <label class="field">
                        <span>"When several connections are close"</span>
                        <select
                            on:change=move |ev| {
                                let policy = if event_target_value(&ev) == "nearest" {
                                    HitPolicy::Nearest
                                } else {
                                    HitPolicy::FirstWithinTolerance
                                };
                                draft.update(|d| d.hit_policy = policy);
                            }
                        >
                            <option
                                value="first"
                                selected=move || draft.get().hit_policy == HitPolicy::FirstWithinTolerance
                            >
                                {HitPolicy::FirstWithinTolerance.label()}
                            </option>
                            <option
                                value="nearest"
                                selected=move || draft.get().hit_policy == HitPolicy::Nearest
                            >
                                {HitPolicy::Nearest.label()}
                            </option>
                        </select>
                    </label>
                    <label class="field">
                        <span>"Node marker radius (px)"</span>
                        <input
                            type="number"
                            min="4"
                            max="60"
                            prop:value=move || draft.get().node_marker_radius_px.to_string()
                            on:change=move |ev| {
                                if let Ok(value) = event_target_value(&ev).parse::<f64>() {
                                    draft.update(|d| d.node_marker_radius_px = value);
                                }
                            }
                        />
                    </label>
                </div>

                <div class="confirmation-buttons">
                    <button class="cancel-button" on:click=move |_| is_open.set(false)>"Cancel"</button>
                    <button class="confirm-button" on:click=save>"Save"</button>
                </div>
            </div>
        </ModalOverlay>
    }
}
