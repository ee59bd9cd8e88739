pub mod debug_log;
pub mod ihme;
pub mod ihme_pg;
pub mod synth;
