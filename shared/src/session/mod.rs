mod error;
mod sync_session;

pub use error::SessionError;
pub use sync_session::{ImpactOutcome, SyncSession};
