pub mod analyze;
pub mod play;
pub mod suggest;
