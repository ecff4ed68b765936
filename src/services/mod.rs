pub mod dashboard;
pub mod resource;

pub use dashboard::{poll_dashboard, DashboardSnapshot};
pub use resource::Resource;
