// Adapters layer: concrete metadata sources. Local storage lives with the CLI config.

pub mod force_api;
pub mod snapshot;
