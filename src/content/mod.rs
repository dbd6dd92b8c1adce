//! Content editing and preview

pub mod form;
pub mod preview;
pub mod sanitize;
