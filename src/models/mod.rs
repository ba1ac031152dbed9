//! Data models for the PlacementOps backend.
//!
//! Wire shapes match the spreadsheet backend's row layout and the dashboard
//! frontend's expectations exactly.

mod form;
mod requests;
mod student;

pub use form::*;
pub use requests::*;
pub use student::*;
