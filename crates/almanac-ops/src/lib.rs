//! File operations for almanac.
//!
//! Synchronous helpers for creating, removing, trashing, moving and copying
//! items, plus [`Blueprint`] trees that describe files and folders to write.
//!
//! Operations on a missing source are no-ops rather than errors.

mod blueprint;
mod filer;
mod operation;

pub use blueprint::Blueprint;
pub use filer::{copy_item, create_directory, destination_for, move_item, remove_item, trash_item};
pub use operation::{OperationError, validate_filename};
