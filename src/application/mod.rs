pub mod chart_controller;
pub mod dashboard;
pub mod search;
pub mod state;
pub mod view;

pub use chart_controller::*;
pub use dashboard::*;
pub use search::*;
pub use state::*;
pub use view::*;
