use dioxus::prelude::*;

use crate::api::ApiClient;
use crate::components::{ToastHost, Toaster};
use crate::config::AppConfig;
use crate::pages::{SalesPage, UsersPage};
use crate::TAILWIND_CSS;

#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/")]
        SalesPage {},
        #[route("/users")]
        UsersPage {},
}

#[allow(non_snake_case)]
#[component]
pub fn App() -> Element {
    let config = use_context_provider(AppConfig::from_env);
    use_context_provider(|| ApiClient::new(&config));
    use_context_provider(Toaster::new);

    rsx! {
        document::Stylesheet { href: TAILWIND_CSS }
        document::Meta { name: "theme-color", content: "#111827" } // gray-900
        document::Meta { name: "color-scheme", content: "dark" }
        Router::<Route> {}
    }
}

#[allow(non_snake_case)]
#[component]
fn Shell() -> Element {
    rsx! {
        div { class: "flex h-screen bg-gray-900 text-gray-100 overflow-hidden",
            nav { class: "w-56 shrink-0 border-r border-gray-700 bg-gray-800/50 p-4 space-y-2",
                Link { class: "block rounded-lg px-3 py-2 hover:bg-gray-700", to: Route::SalesPage {}, "Sales" }
                Link { class: "block rounded-lg px-3 py-2 hover:bg-gray-700", to: Route::UsersPage {}, "Users" }
            }
            Outlet::<Route> {}
            ToastHost {}
        }
    }
}
