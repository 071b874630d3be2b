//! Selection-driven loading with published, supersedable state.

mod dashboard;
mod state;

pub use dashboard::Dashboard;
pub use state::{DashboardState, Phase};
