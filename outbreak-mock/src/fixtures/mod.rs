pub mod countries;
pub mod history;
pub mod snapshots;
