pub mod announcements;
pub mod attendance;
pub mod auth;
pub mod error;
pub mod extract;
pub mod files;
pub mod middleware;
pub mod router;
pub mod state;
pub mod stream;

pub use error::ApiError;
pub use router::router;
pub use state::{AppState, AppStateInner};
