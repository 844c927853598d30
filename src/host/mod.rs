pub mod args;
pub mod logging;
pub mod screen;
