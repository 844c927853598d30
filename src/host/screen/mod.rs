pub mod headless;

#[cfg(feature = "tui")]
pub mod ratatui;
