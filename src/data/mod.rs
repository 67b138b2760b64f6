//! Data layer - Pure identity and classification types without host coupling
//!
//! NO imports from core/, host/ or frontend/.

pub mod widget;

pub use widget::*;
