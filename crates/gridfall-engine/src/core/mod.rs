//! Board geometry and the shape catalog.

pub use self::{board::*, shape::*};

mod board;
mod shape;
