//! # Server Crate
//!
//! The HTTP surface: engagement writes (ratings, watchlist, episode
//! marks), the recommendation trigger and listing, and analytics.
//!
//! ## Main Components
//!
//! - **routes**: the axum router and handlers
//! - **state**: `AppState` wiring the store, engine, and aggregator
//! - **identity**: the `x-user-id` caller extractor
//! - **config**: environment-driven `Config`
//! - **error**: `ApiError` and its HTTP mapping
//!
//! ## Example Usage
//!
//! ```ignore
//! use server::{create_router, AppState, Config};
//!
//! let config = Config::from_env()?;
//! let app = create_router(AppState::from_config(&config)?);
//! ```

pub mod config;
pub mod error;
pub mod identity;
pub mod routes;
pub mod state;

// Re-export commonly used types
pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use identity::UserIdentity;
pub use routes::create_router;
pub use state::AppState;
