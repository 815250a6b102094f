// Presentation layer - Console commands and rendering
pub mod app_state;
pub mod command;
pub mod console;
pub mod render;
