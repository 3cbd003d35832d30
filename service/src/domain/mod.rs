//! Domain definitions.

pub mod availability;
pub mod member;
pub mod window;

pub use self::{member::Member, window::Window};
