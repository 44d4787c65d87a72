pub mod app;
pub mod choice_panel;
pub mod stats_panel;
pub mod story_panel;
