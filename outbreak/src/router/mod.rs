pub mod batch;
pub mod countries;
pub mod history;
pub mod macros;
pub mod snapshot;

pub mod util;
