//! Collect named failures from a sequence of checks.
//!
//! ```
//! use faults::Faults;
//!
//! let username = "";
//! let mut faults = Faults::new();
//! faults
//!     .check("username", || {
//!         if username.is_empty() { Err("username is required") } else { Ok(()) }
//!     })
//!     .check("password", || -> Result<(), &'static str> {
//!         panic!("skipped once a check has failed")
//!     });
//!
//! assert_eq!(faults.last_message(), "username");
//! assert_eq!(faults.to_json(), r#"{"errors":{"username":"username is required"}}"#);
//! ```

mod error;
mod faults;
mod json;
pub mod log;

pub use error::{BoxError, ConditionFailed, LoggingError};
pub use faults::Faults;
