pub mod proximity;
pub mod stats;
