// Presentation layer: text rendering and interactive session state.

pub mod render;
pub mod repl;
pub mod view;
