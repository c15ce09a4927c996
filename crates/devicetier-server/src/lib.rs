//! devicetier server — HTTP and CLI access to the device tier classifier.

pub mod cli;
pub mod hints;
pub mod routes;
pub mod state;

pub use hints::ClientHintsProbe;
pub use routes::build_router;
pub use state::AppState;
