pub mod defaults;
pub mod errors;
pub mod id;

pub use errors::{ConfigError, IrisError};
pub use id::{new_id, SessionId};
