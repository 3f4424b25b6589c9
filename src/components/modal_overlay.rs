use leptos::{component, view, Callable, Callback, Children, IntoView, Signal, SignalGet, store_value};

/// Dimmed backdrop that hosts a dialog while `is_open` holds.
///
/// Clicking the backdrop itself (not the dialog) calls `on_dismiss`.
#[component]
#[must_use]
pub fn ModalOverlay(
    #[prop(into)] is_open: Signal<bool>,
    #[prop(optional)] on_dismiss: Option<Callback<()>>,
    children: Children,
) -> impl IntoView {
    let children = store_value(children());

    view! {
        {move || if is_open.get() {
            view! {
                <div
                    class="modal-overlay"
                    on:click=move |ev| {
                        let on_backdrop = ev.target() == ev.current_target();
                        if let (true, Some(cb)) = (on_backdrop, on_dismiss) {
                            cb.call(());
                        }
                    }
                >
                    <div class="modal-dialog" role="dialog" aria-modal="true">
                        {children.get_value()}
                    </div>
                </div>
            }.into_view()
        } else {
            ().into_view()
        }}
    }
}
