use dioxus::logger::tracing::warn;
use dioxus::prelude::*;

use crate::api::ApiClient;
use crate::components::{Header, StatCard, Toaster, UsersTable};
use crate::config::AppConfig;
use crate::notify::Notifier;
use crate::poll::periodic;
use crate::stats::{collect_user_stats, UserStats};
use crate::utils::format::{format_count, format_local};

#[allow(non_snake_case)]
#[component]
pub fn UsersPage() -> Element {
    let api = use_context::<ApiClient>();
    let config = use_context::<AppConfig>();
    let toaster = use_context::<Toaster>();
    let mut stats = use_signal(UserStats::default);

    // Refresh the aggregate figures for as long as the page is mounted.
    let poller = use_hook(move || {
        let users = api.users();
        let limit = config.stats_page_limit;
        let (task, handle) = periodic(config.stats_poll_interval, move || {
            let users = users.clone();
            async move {
                match collect_user_stats(&users, limit).await {
                    Ok(fresh) => stats.set(fresh),
                    Err(e) => {
                        warn!("[users] error fetching user stats: {e}");
                        toaster.error("Failed to fetch user statistics");
                    }
                }
            }
        });
        spawn(task);
        handle
    });
    use_drop(move || poller.stop());

    let s = stats.read().clone();
    let refreshed = s
        .refreshed_at
        .map(|ts| format_local(&ts.to_rfc3339()))
        .unwrap_or_else(|| "never".to_string());

    rsx! {
        div { class: "flex-1 overflow-auto relative z-10",
            Header { title: "Users".to_string() }
            main { class: "max-w-7xl mx-auto py-6 px-4 lg:px-8",
                div { class: "grid grid-cols-1 gap-5 sm:grid-cols-2 lg:grid-cols-4 mb-2",
                    StatCard { name: "Total Users".to_string(), value: format_count(s.total_users), accent: "#6366F1".to_string() }
                    StatCard { name: "New Users Today".to_string(), value: format_count(s.new_users_today), accent: "#10B981".to_string() }
                    StatCard { name: "Active Users".to_string(), value: format_count(s.active_users), accent: "#F59E0B".to_string() }
                    StatCard { name: "Churn Rate".to_string(), value: s.churn_label(), accent: "#EF4444".to_string() }
                }
                p { class: "mb-8 text-xs text-gray-500", "Stats updated {refreshed}" }
                UsersTable {}
            }
        }
    }
}
