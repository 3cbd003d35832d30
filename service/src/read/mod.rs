//! Read entities definitions.

pub mod member;
