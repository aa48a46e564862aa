use dioxus::prelude::*;

#[allow(non_snake_case)]
#[component]
pub fn StatCard(name: String, value: String, accent: String) -> Element {
    rsx! {
        div { class: "rounded-xl border border-gray-700 bg-gray-800/50 backdrop-blur-md shadow-lg px-4 py-5 sm:p-6",
            span { class: "flex items-center gap-2 text-sm font-medium text-gray-400",
                span { class: "inline-block h-2.5 w-2.5 rounded-full", style: "background-color:{accent}" }
                "{name}"
            }
            p { class: "mt-1 text-3xl font-semibold text-gray-100 tabular-nums", "{value}" }
        }
    }
}
