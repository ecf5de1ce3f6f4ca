pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod router;

pub use app::AppState;
pub use router::build_router;
