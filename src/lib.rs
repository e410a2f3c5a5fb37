pub mod badge;
pub mod board;
pub mod board_config;
pub mod errors;
pub mod github;
pub mod refresh;
pub mod telemetry;
pub mod ui;
pub mod ui_state;
