use std::time::Duration;

use dioxus::prelude::*;

use crate::notify::{Notifier, Severity};
use crate::utils::time::sleep;

const TOAST_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub severity: Severity,
    pub text: String,
}

/// Reactive toast queue, shared through context.
#[derive(Clone, Copy, PartialEq)]
pub struct Toaster {
    toasts: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
}

impl Toaster {
    /// Must run inside a component (it creates signals).
    pub fn new() -> Self {
        Self {
            toasts: Signal::new(Vec::new()),
            next_id: Signal::new(0),
        }
    }

    pub fn dismiss(&self, id: u64) {
        let mut toasts = self.toasts;
        toasts.write().retain(|t| t.id != id);
    }
}

impl Notifier for Toaster {
    fn notify(&self, severity: Severity, text: &str) {
        let mut next_id = self.next_id;
        let id = {
            let mut n = next_id.write();
            *n += 1;
            *n
        };
        let mut toasts = self.toasts;
        toasts.write().push(Toast {
            id,
            severity,
            text: text.to_string(),
        });
    }
}

#[allow(non_snake_case)]
#[component]
pub fn ToastHost() -> Element {
    let toaster = use_context::<Toaster>();
    let toasts = toaster.toasts.read().clone();

    rsx! {
        div { class: "fixed bottom-4 right-4 z-50 flex flex-col gap-2 w-80",
            for toast in toasts {
                ToastItem { key: "{toast.id}", toast: toast.clone() }
            }
        }
    }
}

#[allow(non_snake_case)]
#[component]
fn ToastItem(toast: Toast) -> Element {
    let toaster = use_context::<Toaster>();
    let id = toast.id;

    // dropped together with the toast if it is dismissed by hand
    use_hook(move || {
        spawn(async move {
            sleep(TOAST_TTL).await;
            toaster.dismiss(id);
        });
    });

    let tone = match toast.severity {
        Severity::Success => "border-emerald-700 bg-emerald-900/80 text-emerald-100",
        Severity::Error => "border-red-700 bg-red-900/80 text-red-100",
    };

    rsx! {
        div {
            class: "rounded-lg border px-4 py-3 text-sm shadow-lg cursor-pointer {tone}",
            role: "status",
            onclick: move |_| toaster.dismiss(id),
            "{toast.text}"
        }
    }
}
