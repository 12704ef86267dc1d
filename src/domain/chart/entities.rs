use super::value_objects::LineChartSpec;
use crate::domain::errors::AppResult;

/// A drawing surface that can host one chart instance at a time.
pub trait ChartBackend {
    type Instance;

    /// Draws `spec` and returns the live instance bound to the surface.
    fn create(&mut self, spec: &LineChartSpec) -> AppResult<Self::Instance>;

    /// Releases a previously created instance.
    fn destroy(&mut self, instance: Self::Instance);

    /// Shows a placeholder when no chart can be drawn.
    fn show_empty(&mut self, message: &str);
}

/// Ownership of the chart canvas.
#[derive(Debug)]
pub enum ChartState<I> {
    Empty,
    Bound(I),
}

impl<I> ChartState<I> {
    pub fn is_bound(&self) -> bool {
        matches!(self, ChartState::Bound(_))
    }

    pub fn instance(&self) -> Option<&I> {
        match self {
            ChartState::Bound(instance) => Some(instance),
            ChartState::Empty => None,
        }
    }
}
