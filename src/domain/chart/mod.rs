//! Chart aggregate: what to plot and who owns the canvas.

pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
