use chrono::{DateTime, Utc};
use dioxus::logger::tracing::debug;

use crate::error::FetchError;
use crate::list::DataSource;
use crate::shared::types::{Status, User};

/// Share of the user base counted as "new today" until the backend exposes
/// real signup dates.
const NEW_USERS_RATIO: f64 = 0.002;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserStats {
    pub total_users: u64,
    pub new_users_today: u64,
    pub active_users: u64,
    /// Percentage of users that are not active, 0.0..=100.0.
    pub churn_rate: f64,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl UserStats {
    pub fn from_counts(total_users: u64, active_users: u64, now: DateTime<Utc>) -> Self {
        let churn_rate = if total_users == 0 {
            0.0
        } else {
            total_users.saturating_sub(active_users) as f64 / total_users as f64 * 100.0
        };
        Self {
            total_users,
            new_users_today: (total_users as f64 * NEW_USERS_RATIO).floor() as u64,
            active_users,
            churn_rate,
            refreshed_at: Some(now),
        }
    }

    pub fn churn_label(&self) -> String {
        format!("{:.1}%", self.churn_rate)
    }
}

/// Walks every page of the users collection and counts the active ones.
///
/// Pages are fetched one after the other; the first failure aborts the walk.
pub async fn collect_user_stats<S>(source: &S, page_limit: u32) -> Result<UserStats, FetchError>
where
    S: DataSource<Record = User>,
{
    let first = source.fetch_page(1, page_limit).await?;
    let total_users = first.total_count;
    let total_pages = first.total_pages.max(1);
    let mut active = count_active(&first.items);

    for page in 2..=total_pages {
        let next = source.fetch_page(page, page_limit).await?;
        active += count_active(&next.items);
    }
    debug!(
        "[stats] {} users over {} page(s), {} active",
        total_users, total_pages, active
    );
    Ok(UserStats::from_counts(total_users, active, Utc::now()))
}

fn count_active(users: &[User]) -> u64 {
    users.iter().filter(|u| u.status == Status::Active).count() as u64
}
