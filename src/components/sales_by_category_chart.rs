use dioxus::logger::tracing::warn;
use dioxus::prelude::*;

use crate::api::ApiClient;
use crate::components::{PieChart, Toaster};
use crate::components::pie_chart::pie_slices;
use crate::notify::Notifier;

const CARD: &str =
    "bg-gray-800/50 backdrop-blur-md shadow-lg rounded-xl p-6 border border-gray-700";

#[allow(non_snake_case)]
#[component]
pub fn SalesByCategoryChart() -> Element {
    let api = use_context::<ApiClient>();
    let toaster = use_context::<Toaster>();

    let data = use_resource(move || {
        let api = api.clone();
        async move {
            let result = api.sales_by_category().await;
            if let Err(e) = &result {
                warn!("[sales] error fetching sales by category: {e}");
                toaster.error(&e.user_message("Error loading sales data"));
            }
            result
        }
    });

    let body = match &*data.read_unchecked() {
        None => rsx! {
            div { class: "flex items-center justify-center h-64 text-gray-400", "Loading sales data..." }
        },
        Some(Err(e)) => {
            let msg = e.user_message("Error loading sales data");
            rsx! {
                div { class: "flex items-center justify-center h-64 text-red-400", "{msg}" }
            }
        }
        Some(Ok(rows)) => {
            let slices = pie_slices(rows);
            if slices.is_empty() {
                rsx! {
                    div { class: "flex items-center justify-center h-64 text-gray-400", "No sales data yet." }
                }
            } else {
                rsx! {
                    h2 { class: "text-xl font-semibold text-gray-100 mb-4", "Sales by Category" }
                    PieChart { slices, size: 240 }
                }
            }
        }
    };

    rsx! {
        div { class: CARD, {body} }
    }
}
