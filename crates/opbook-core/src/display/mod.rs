//! Display formatting for plans and operation feedback.
//!
//! Domain models implement [`std::fmt::Display`] (see [`models`]) and render
//! as markdown, which the CLI passes through its terminal renderer. Short
//! confirmations use [`OperationStatus`].
//!
//! ```rust
//! use opbook_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Deleted plan 0198");
//! assert_eq!(status.to_string(), "Success: Deleted plan 0198\n");
//! ```

pub mod models;
pub mod status;

pub use models::LocalDateTime;
pub use status::OperationStatus;
