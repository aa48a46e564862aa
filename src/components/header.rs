use dioxus::prelude::*;

#[allow(non_snake_case)]
#[component]
pub fn Header(title: String) -> Element {
    rsx! {
        header { class: "bg-gray-800/50 backdrop-blur-md shadow-lg border-b border-gray-700",
            div { class: "max-w-7xl mx-auto py-4 px-4 sm:px-6 lg:px-8",
                h1 { class: "text-2xl font-semibold text-gray-100", "{title}" }
            }
        }
    }
}
