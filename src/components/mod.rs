pub mod header;
pub mod pie_chart;
pub mod sales_by_category_chart;
pub mod stat_card;
pub mod toast;
pub mod users_table;

pub use header::Header;
pub use pie_chart::PieChart;
pub use sales_by_category_chart::SalesByCategoryChart;
pub use stat_card::StatCard;
pub use toast::{ToastHost, Toaster};
pub use users_table::UsersTable;
