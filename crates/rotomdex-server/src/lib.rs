pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod pokedex;
pub mod server;

pub use config::{AppConfig, ImageSettings, ServerConfig, StorageBackend, UpstreamSettings};
pub use error::ApiError;
pub use observability::{apply_logging_level, init_tracing};
pub use pokedex::Pokedex;
pub use server::{AppState, RotomdexServer, ServerBuilder, build_app};
