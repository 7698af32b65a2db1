//! Presentation stage: layout and static rendering

pub mod layout;
pub mod svg;

pub use layout::{circular_layout, Point};
pub use svg::{RenderError, RenderResult, SvgRenderer};
