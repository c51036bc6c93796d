// Handler modules
pub mod calculate;

pub use calculate::{Batch, CalculateOptions, handle_calculate};
