//! Application layer: the preview pipeline and the views built on top of it.

pub mod error;
pub mod gate;
pub mod listing;
pub mod pagination;
pub mod pipeline;
pub mod preview;
pub mod render;
pub mod repos;
