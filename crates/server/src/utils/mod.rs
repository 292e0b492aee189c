mod chat_id;
pub use chat_id::chat_id_from_path;

mod shutdown_signal;
pub use shutdown_signal::shutdown_signal;

mod state;
pub use state::AppState;
