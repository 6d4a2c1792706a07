// Error things.
pub use miette::{Context, IntoDiagnostic};

// Serde things.
pub use serde::{Deserialize, Serialize};

// Log things.
pub use tracing::{debug, info, warn};

// Aliases.

/// The standard result for this application.
pub type AppResult<T = ()> = miette::Result<T>;
