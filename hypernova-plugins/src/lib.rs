//! # hypernova-plugins
//!
//! Ready-made [`Plugin`](hypernova_core::Plugin) implementations.
//!
//! - [`DevModePlugin`] — wraps failed renders in a visible warning banner
//! - [`LoggingPlugin`] — reports pipeline notifications through `tracing`

pub mod dev_mode;
pub mod logging;

pub use dev_mode::DevModePlugin;
pub use logging::LoggingPlugin;
