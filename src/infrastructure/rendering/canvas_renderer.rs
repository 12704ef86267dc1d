use crate::domain::{
    chart::{ChartBackend, LineChartSpec},
    errors::{AppError, AppResult},
    logging::LogComponent,
};
use crate::log_debug;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const PADDING: f64 = 50.0;
const AXIS_SPACE: f64 = 60.0;
const LEGEND_HEIGHT: f64 = 30.0;

/// Plot-area geometry for one spec.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleParams {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub min_value: f64,
    pub max_value: f64,
}

impl ScaleParams {
    pub fn new(canvas_width: f64, canvas_height: f64, spec: &LineChartSpec) -> Option<Self> {
        let (min, max) = spec.value_range()?;
        // Flat series still need a non-zero span.
        let span = if (max - min).abs() < f64::EPSILON { max.abs().max(1.0) * 0.05 } else { (max - min) * 0.05 };
        Some(Self {
            left: PADDING + AXIS_SPACE,
            top: PADDING + LEGEND_HEIGHT,
            width: canvas_width - PADDING * 2.0 - AXIS_SPACE,
            height: canvas_height - PADDING * 2.0 - LEGEND_HEIGHT,
            min_value: min - span,
            max_value: max + span,
        })
    }

    pub fn x(&self, index: usize, count: usize) -> f64 {
        if count <= 1 {
            return self.left + self.width / 2.0;
        }
        self.left + self.width * index as f64 / (count - 1) as f64
    }

    pub fn y(&self, value: f64) -> f64 {
        self.top + (self.max_value - value) / (self.max_value - self.min_value) * self.height
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// A chart currently painted on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub title: String,
    pub point_count: usize,
}

/// Canvas 2D line-chart backend.
pub struct CanvasLineChart {
    canvas_id: String,
    width: u32,
    height: u32,
}

impl CanvasLineChart {
    pub fn new(canvas_id: impl Into<String>, width: u32, height: u32) -> Self {
        Self { canvas_id: canvas_id.into(), width, height }
    }

    fn context(&self) -> AppResult<CanvasRenderingContext2d> {
        let canvas = gloo::utils::document()
            .get_element_by_id(&self.canvas_id)
            .ok_or_else(|| AppError::Rendering(format!("canvas #{} not found", self.canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| AppError::Rendering("element is not a canvas".to_string()))?;

        canvas.set_width(self.width);
        canvas.set_height(self.height);

        canvas
            .get_context("2d")
            .map_err(|_| AppError::Rendering("failed to get 2D context".to_string()))?
            .ok_or_else(|| AppError::Rendering("2D context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AppError::Rendering("failed to cast to 2D context".to_string()))
    }

    fn clear(&self, context: &CanvasRenderingContext2d) {
        context.clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
    }

    fn draw(&self, context: &CanvasRenderingContext2d, spec: &LineChartSpec, scale: &ScaleParams) -> AppResult<()> {
        let style = &spec.style;
        let count = spec.points.len();

        context.set_fill_style_str(style.background);
        context.fill_rect(0.0, 0.0, self.width as f64, self.height as f64);

        // Area under the line.
        context.begin_path();
        context.move_to(scale.x(0, count), scale.bottom());
        for (i, value) in spec.points.iter().enumerate() {
            context.line_to(scale.x(i, count), scale.y(*value));
        }
        context.line_to(scale.x(count - 1, count), scale.bottom());
        context.close_path();
        context.set_fill_style_str(style.fill_color);
        context.fill();

        context.begin_path();
        for (i, value) in spec.points.iter().enumerate() {
            let (x, y) = (scale.x(i, count), scale.y(*value));
            if i == 0 { context.move_to(x, y) } else { context.line_to(x, y) }
        }
        context.set_stroke_style_str(style.border_color);
        context.set_line_width(2.0);
        context.stroke();

        context.set_fill_style_str(style.border_color);
        for (i, value) in spec.points.iter().enumerate() {
            context.begin_path();
            context
                .arc(scale.x(i, count), scale.y(*value), style.point_radius, 0.0, std::f64::consts::TAU)
                .map_err(|_| AppError::Rendering("arc failed".to_string()))?;
            context.fill();
        }

        self.draw_axes(context, spec, scale)
    }

    fn draw_axes(&self, context: &CanvasRenderingContext2d, spec: &LineChartSpec, scale: &ScaleParams) -> AppResult<()> {
        let text = |label: &str, x: f64, y: f64| {
            context
                .fill_text(label, x, y)
                .map_err(|_| AppError::Rendering("fill_text failed".to_string()))
        };
        let count = spec.points.len();

        context.set_fill_style_str(spec.style.tick_color);
        context.set_font("12px Arial");
        for (i, label) in spec.labels.iter().enumerate() {
            text(label, scale.x(i, count) - 14.0, scale.bottom() + 20.0)?;
        }

        const TICKS: usize = 5;
        for tick in 0..=TICKS {
            let value = scale.min_value + (scale.max_value - scale.min_value) * tick as f64 / TICKS as f64;
            text(&format!("{value:.0}"), PADDING, scale.y(value) + 4.0)?;
        }

        context.set_font("14px Arial");
        text(&spec.title, scale.left, PADDING)
    }
}

impl ChartBackend for CanvasLineChart {
    type Instance = RenderedChart;

    fn create(&mut self, spec: &LineChartSpec) -> AppResult<RenderedChart> {
        let scale = ScaleParams::new(self.width as f64, self.height as f64, spec)
            .ok_or_else(|| AppError::Rendering("nothing to plot".to_string()))?;
        let context = self.context()?;
        self.clear(&context);
        self.draw(&context, spec, &scale)?;

        log_debug!(
            LogComponent::Infrastructure("CanvasLineChart"),
            "📈 Drew '{}' with {} points",
            spec.title,
            spec.points.len()
        );

        Ok(RenderedChart { title: spec.title.clone(), point_count: spec.points.len() })
    }

    fn destroy(&mut self, instance: RenderedChart) {
        if let Ok(context) = self.context() {
            self.clear(&context);
        }
        log_debug!(
            LogComponent::Infrastructure("CanvasLineChart"),
            "🗑️ Released '{}'",
            instance.title
        );
    }

    fn show_empty(&mut self, message: &str) {
        if let Ok(context) = self.context() {
            self.clear(&context);
            context.set_fill_style_str("#ffffff");
            context.set_font("16px Arial");
            let _ = context.fill_text(message, PADDING, self.height as f64 / 2.0);
        }
    }
}
