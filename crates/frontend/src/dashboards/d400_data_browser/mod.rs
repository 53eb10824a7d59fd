pub mod api;
pub mod columns;
pub mod export;
pub mod filters;
pub mod sequencing;
pub mod state;
pub mod ui;
