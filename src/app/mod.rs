mod actions;
mod prompt;
mod state;

pub use state::AppState;
