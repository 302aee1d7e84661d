pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, load_config_from};
pub use run::run;
pub use wiring::{wire_dependencies, WiredApp, WiringError, WiringResult};
