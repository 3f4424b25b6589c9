use crate::components::modal_overlay::ModalOverlay;
use leptos::{component, view, Callable, Callback, IntoView, Signal, SignalGet};

#[allow(clippy::needless_pass_by_value)]
#[component]
pub fn ConfirmationDialog(
    #[prop(into)] is_open: Signal<bool>,
    #[prop(into)] title: Signal<String>,
    #[prop(into)] message: Signal<String>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
    #[prop(optional)] confirm_text: Option<String>,
    #[prop(optional)] cancel_text: Option<String>,
    #[prop(optional)] danger: bool,
) -> impl IntoView {
    let confirm_label = confirm_text.unwrap_or_else(|| "Confirm".to_string());
    let cancel_label = cancel_text.unwrap_or_else(|| "Cancel".to_string());
    let confirm_class = if danger { "confirm-button danger" } else { "confirm-button" };

    view! {
        <ModalOverlay is_open=is_open on_dismiss=on_cancel>
            <div class="confirmation-dialog-content">
                <h2 class="confirmation-title">{move || title.get()}</h2>
                <p class="confirmation-message">
                    {move || message.get()}
                </p>
                <div class="confirmation-buttons">
                    <button
                        class="cancel-button"
                        on:click=move |_| on_cancel.call(())
                    >
                        {cancel_label.clone()}
                    </button>
                    <button
                        class=confirm_class
                        on:click=move |_| on_confirm.call(())
                    >
                        {confirm_label.clone()}
                    </button>
                </div>
            </div>
        </ModalOverlay>
    }
}
