mod auth;
mod export;

pub use auth::TokenManager;
pub use export::DEFAULT_EXPORT_FILE;
pub use export::save_json;
