//! Kakilima Order Service
//!
//! Order lifecycle and cart-aggregation engine for a local street-food
//! marketplace: buyers place and pay for orders, vendors accept and
//! deliver them, and every multi-step write runs inside one storage
//! transaction.
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/     # configuration, state, HTTP server
//! ├── auth/     # JWT validation, CurrentUser extractor
//! ├── api/      # routes and handlers
//! ├── db/       # Postgres pool, migrations, models, repositories
//! ├── orders/   # domain logic: state machine, pricing, projection
//! └── utils/    # errors, result alias, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService, Role};
pub use core::{Config, Server, ServerState};
pub use orders::{OrderAction, OrderError, StatusFilter};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
