use gloo_timers::callback::Timeout;
use leptos::{component, view, IntoView, RwSignal, SignalGet, SignalUpdate};

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub visible: bool,
}

impl Toast {
    /// The toast that replaces `self`, with a fresh id so older timers leave it alone
    #[must_use]
    pub fn next(&self, message: String) -> Self {
        Self {
            id: self.id + 1,
            message,
            visible: true,
        }
    }

    pub fn hide_if_current(&mut self, id: u64) {
        if self.id == id {
            self.visible = false;
        }
    }
}

/// Show `message` and hide it again after `duration_ms`
pub fn show_toast(toast: RwSignal<Toast>, message: String, duration_ms: u32) {
    let Some(id) = toast.try_update(|t| {
        *t = t.next(message);
        t.id
    }) else {
        return;
    };

    let _ = Timeout::new(duration_ms, move || {
        toast.try_update(|t| t.hide_if_current(id));
    })
    .forget();
}

#[component]
#[must_use]
pub fn ToastNotification(toast: RwSignal<Toast>) -> impl IntoView {
    view! {
        <div class="toast-region" role="status" aria-live="polite">
            {move || {
                let t = toast.get();
                if t.visible {
                    view! { <div class="toast toast-visible">{t.message}</div> }.into_view()
                } else {
                    view! { <div class="toast"></div> }.into_view()
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_toast_survives_older_timer() {
        let first = Toast::default().next("Saved".to_string());
        let mut second = first.next("Deleted".to_string());

        second.hide_if_current(first.id);
        assert!(second.visible);

        second.hide_if_current(second.id);
        assert!(!second.visible);
    }
}
