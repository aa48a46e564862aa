pub mod sales_page;
pub mod users_page;

pub use sales_page::SalesPage;
pub use users_page::UsersPage;
