mod calculate;
mod config;
mod history;
mod session;

pub use calculate::{calculate, read_input};
pub use config::{config_show, set_api_url, set_log_level};
pub use history::{dashboard, history, leaderboard};
pub use session::{login, logout, whoami};
