use super::value_objects::{ChartStyle, LineChartSpec, MONTH_LABELS, YearFilter};
use crate::domain::errors::AppResult;
use crate::domain::market_data::{HistoricalSeries, Metal};

/// Picks the points to plot for a metal and year filter.
pub struct ChartDataSelector;

impl ChartDataSelector {
    /// `All` yields one rounded yearly mean per year; a single year yields its twelve months.
    pub fn select(series: &HistoricalSeries, metal: Metal, filter: YearFilter) -> AppResult<LineChartSpec> {
        let (labels, points): (Vec<String>, Vec<f64>) = match filter {
            YearFilter::All => series
                .years(metal)?
                .iter()
                .map(|(year, monthly)| (format!("Year {year}"), monthly.average()))
                .unzip(),
            YearFilter::Year(year) => {
                let monthly = series.year(metal, year)?;
                (
                    MONTH_LABELS.iter().map(|label| label.to_string()).collect(),
                    monthly.values().to_vec(),
                )
            }
        };

        Ok(LineChartSpec {
            title: format!("{metal} Price (USD/oz)"),
            labels,
            points,
            style: ChartStyle::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::AppError;
    use crate::domain::market_data::MonthlyPrices;

    fn series() -> HistoricalSeries {
        let mut series = HistoricalSeries::new();
        let mut months = [100.0; 12];
        months[11] = 112.0;
        series.insert(Metal::Gold, 2020, MonthlyPrices::new(months));
        series.insert(Metal::Gold, 2019, MonthlyPrices::new([90.0; 12]));
        series
    }

    #[test]
    fn all_years_plot_yearly_means_in_order() {
        let spec = ChartDataSelector::select(&series(), Metal::Gold, YearFilter::All).unwrap();
        assert_eq!(spec.labels, ["Year 2019", "Year 2020"]);
        assert_eq!(spec.points, [90.0, 101.0]);
        assert_eq!(spec.title, "Gold Price (USD/oz)");
    }

    #[test]
    fn single_year_plots_months() {
        let spec = ChartDataSelector::select(&series(), Metal::Gold, YearFilter::Year(2020)).unwrap();
        assert_eq!(spec.labels.len(), 12);
        assert_eq!(spec.labels[0], "Jan");
        assert_eq!(spec.labels[11], "Dec");
        assert_eq!(spec.points[11], 112.0);
    }

    #[test]
    fn missing_history_is_data_unavailable() {
        let err = ChartDataSelector::select(&series(), Metal::Palladium, YearFilter::All).unwrap_err();
        assert!(matches!(err, AppError::DataUnavailable(_)));
        let err = ChartDataSelector::select(&series(), Metal::Gold, YearFilter::Year(2031)).unwrap_err();
        assert!(matches!(err, AppError::DataUnavailable(_)));
    }
}
