pub mod settings;

pub use settings::{ApiSettings, DashboardSettings, SessionSettings, Settings};
