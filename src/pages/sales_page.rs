use dioxus::logger::tracing::warn;
use dioxus::prelude::*;

use crate::api::ApiClient;
use crate::components::{Header, SalesByCategoryChart, StatCard};
use crate::shared::types::SalesStatsDto;

#[allow(non_snake_case)]
#[component]
pub fn SalesPage() -> Element {
    let api = use_context::<ApiClient>();

    // failures only get logged; the cards keep their zero values
    let stats = use_resource(move || {
        let api = api.clone();
        async move {
            match api.sales_stats().await {
                Ok(s) => s,
                Err(e) => {
                    warn!("[sales] error fetching sales stats: {e}");
                    SalesStatsDto::default()
                }
            }
        }
    });
    let s = stats.read_unchecked().clone().unwrap_or_default();

    rsx! {
        div { class: "flex-1 overflow-auto relative z-10",
            Header { title: "Sales Dashboard".to_string() }
            main { class: "max-w-7xl mx-auto py-6 px-4 lg:px-8",
                div { class: "grid grid-cols-1 gap-5 sm:grid-cols-2 lg:grid-cols-4 mb-8",
                    StatCard { name: "Total Revenue".to_string(), value: s.total_revenue.clone(), accent: "#6366F1".to_string() }
                    StatCard { name: "Avg. Order Value".to_string(), value: s.average_order_value.clone(), accent: "#10B981".to_string() }
                    StatCard { name: "Conversion Rate".to_string(), value: s.conversion_rate.clone(), accent: "#F59E0B".to_string() }
                    StatCard { name: "Sales Growth".to_string(), value: s.sales_growth.clone(), accent: "#EF4444".to_string() }
                }
                div { class: "grid grid-cols-1 lg:grid-cols-2 gap-8 mb-8",
                    SalesByCategoryChart {}
                }
            }
        }
    }
}
