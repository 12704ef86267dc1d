use crate::domain::errors::AppError;
use derive_more::Display;
use std::str::FromStr;

pub const MONTH_LABELS: [&str; 12] =
    ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

/// Value Object - year selector value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum YearFilter {
    #[display(fmt = "all")]
    All,
    #[display(fmt = "{}", _0)]
    Year(u16),
}

impl FromStr for YearFilter {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "all" => Ok(YearFilter::All),
            year => year
                .parse::<u16>()
                .map(YearFilter::Year)
                .map_err(|_| AppError::DataUnavailable(format!("invalid year filter '{year}'"))),
        }
    }
}

/// Value Object - line chart appearance
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub border_color: &'static str,
    pub fill_color: &'static str,
    pub tick_color: &'static str,
    pub background: &'static str,
    pub point_radius: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            border_color: "#FFD700",
            fill_color: "rgba(255, 215, 0, 0.2)",
            tick_color: "#fff",
            background: "#1a1a1a",
            point_radius: 4.0,
        }
    }
}

/// Everything a backend needs to draw one line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChartSpec {
    pub title: String,
    pub labels: Vec<String>,
    pub points: Vec<f64>,
    pub style: ChartStyle,
}

impl LineChartSpec {
    /// `(min, max)` of the plotted values.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.points.iter().fold(None, |range, &value| match range {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_filter_parses_selector_values() {
        assert_eq!("all".parse::<YearFilter>().unwrap(), YearFilter::All);
        assert_eq!("2021".parse::<YearFilter>().unwrap(), YearFilter::Year(2021));
        assert!("last".parse::<YearFilter>().is_err());
        assert_eq!(YearFilter::Year(2020).to_string(), "2020");
    }

    #[test]
    fn value_range_covers_all_points() {
        let spec = LineChartSpec {
            title: String::new(),
            labels: vec![],
            points: vec![3.0, -1.0, 7.5],
            style: ChartStyle::default(),
        };
        assert_eq!(spec.value_range(), Some((-1.0, 7.5)));
    }
}
