pub mod debounce;
pub mod format;
pub mod math;
pub mod net;
