pub mod classify;
pub mod converge;
pub mod types;

pub use converge::{wait_for_convergence, WaitOptions};
