//! Infrastructure layer.

pub mod memory;
pub mod source;

pub use self::{memory::Roster, source::Source};
