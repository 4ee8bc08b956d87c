mod handlers;

pub use handlers::{AppState, router};
