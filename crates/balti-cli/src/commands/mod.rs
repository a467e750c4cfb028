pub mod common;
pub mod completions;
pub mod config;
pub mod filters;
pub mod presets;
pub mod search;
pub mod suggest;
pub mod translate;
