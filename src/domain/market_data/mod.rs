//! Metal prices, exchange rates and the synthetic price history.

pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
