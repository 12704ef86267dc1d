use crate::domain::{
    chart::{ChartBackend, ChartState, YearFilter, services::ChartDataSelector},
    errors::AppResult,
    logging::LogComponent,
    market_data::{HistoricalSeries, Metal},
};
use crate::{log_debug, log_warn};

/// Owns the single chart bound to the canvas.
pub struct ChartController<B: ChartBackend> {
    backend: B,
    state: ChartState<B::Instance>,
}

impl<B: ChartBackend> ChartController<B> {
    pub fn new(backend: B) -> Self {
        Self { backend, state: ChartState::Empty }
    }

    pub fn state(&self) -> &ChartState<B::Instance> {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Releases the current chart, then builds a new one for `metal` and `filter`.
    ///
    /// On error the controller is left `Empty` and the canvas shows a placeholder.
    pub fn rebuild(&mut self, series: &HistoricalSeries, metal: Metal, filter: YearFilter) -> AppResult<()> {
        self.release();

        let result = ChartDataSelector::select(series, metal, filter)
            .and_then(|spec| self.backend.create(&spec));

        match result {
            Ok(instance) => {
                log_debug!(
                    LogComponent::Application("ChartController"),
                    "Chart bound for {} / {}",
                    metal.as_ref(),
                    filter
                );
                self.state = ChartState::Bound(instance);
                Ok(())
            }
            Err(err) => {
                log_warn!(LogComponent::Application("ChartController"), "Chart not drawn: {err}");
                self.backend.show_empty("No historical data for this selection");
                Err(err)
            }
        }
    }

    /// Destroys the bound chart, if any.
    pub fn release(&mut self) {
        if let ChartState::Bound(instance) = std::mem::replace(&mut self.state, ChartState::Empty) {
            self.backend.destroy(instance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::LineChartSpec;
    use crate::domain::errors::AppError;
    use crate::infrastructure::mock_data::MockDataGenerator;

    #[derive(Default)]
    struct CountingBackend {
        created: usize,
        destroyed: usize,
        live: usize,
        placeholders: usize,
    }

    impl ChartBackend for CountingBackend {
        type Instance = usize;

        fn create(&mut self, spec: &LineChartSpec) -> AppResult<usize> {
            self.created += 1;
            self.live += 1;
            assert_eq!(self.live, 1, "two charts on one canvas");
            Ok(spec.points.len())
        }

        fn destroy(&mut self, _instance: usize) {
            self.destroyed += 1;
            self.live -= 1;
        }

        fn show_empty(&mut self, _message: &str) {
            self.placeholders += 1;
        }
    }

    #[test]
    fn rebinding_releases_the_previous_chart() {
        let series = MockDataGenerator::historical_series();
        let mut controller = ChartController::new(CountingBackend::default());

        let selections = [
            (Metal::Gold, YearFilter::All),
            (Metal::Gold, YearFilter::Year(2021)),
            (Metal::Silver, YearFilter::Year(2021)),
            (Metal::Platinum, YearFilter::All),
            (Metal::Platinum, YearFilter::Year(2019)),
        ];
        for (metal, filter) in selections {
            controller.rebuild(&series, metal, filter).unwrap();
        }

        assert_eq!(controller.backend().created, 5);
        assert_eq!(controller.backend().destroyed, 4);
        assert_eq!(controller.backend().live, 1);
        assert_eq!(controller.state().instance(), Some(&12));
    }

    #[test]
    fn failed_rebuild_leaves_canvas_empty() {
        let series = MockDataGenerator::historical_series();
        let mut controller = ChartController::new(CountingBackend::default());
        controller.rebuild(&series, Metal::Gold, YearFilter::All).unwrap();

        let err = controller.rebuild(&series, Metal::Palladium, YearFilter::All).unwrap_err();
        assert!(matches!(err, AppError::DataUnavailable(_)));
        assert!(!controller.state().is_bound());
        assert_eq!(controller.backend().live, 0);
        assert_eq!(controller.backend().placeholders, 1);
    }
}
