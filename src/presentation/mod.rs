pub mod signal_view;

pub use signal_view::SignalView;
