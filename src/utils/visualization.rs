//! Visualization utilities for rust_motion_planning
//!
//! Plots search trees and paths with gnuplot. Configurations are projected
//! onto two chosen dimensions; one-dimensional spaces are drawn on y = 0.

use gnuplot::{Figure, Caption, Color, PointSymbol, PointSize, LineWidth, AxesCommon, AutoOption};
use crate::common::{Configuration, KinematicPath, PlanningError, PlanningResult};

/// Color palette for consistent styling
pub mod colors {
    pub const BLACK: &str = "#000000";
    pub const RED: &str = "#FF0000";
    pub const GREEN: &str = "#00FF00";
    pub const BLUE: &str = "#0000FF";
    pub const GRAY: &str = "#808080";

    // Semantic colors
    pub const OBSTACLE: &str = BLACK;
    pub const START: &str = GREEN;
    pub const GOAL: &str = BLUE;
    pub const PATH: &str = RED;
    pub const TREE: &str = GRAY;
}

/// Style for path rendering
#[derive(Debug, Clone)]
pub struct PathStyle {
    pub color: String,
    pub line_width: f64,
    pub caption: String,
}

impl PathStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            line_width: 2.0,
            caption: caption.to_string(),
        }
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: colors::PATH.to_string(),
            line_width: 2.0,
            caption: "Path".to_string(),
        }
    }
}

/// Style for point rendering
#[derive(Debug, Clone)]
pub struct PointStyle {
    pub color: String,
    pub size: f64,
    pub symbol: char,
    pub caption: String,
}

impl PointStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            size: 1.0,
            symbol: 'O',
            caption: caption.to_string(),
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_symbol(mut self, symbol: char) -> Self {
        self.symbol = symbol;
        self
    }
}

/// Main visualizer struct
pub struct Visualizer {
    figure: Figure,
    title: String,
    x_label: String,
    y_label: String,
    x_range: Option<(f64, f64)>,
    y_range: Option<(f64, f64)>,
    aspect_ratio: Option<f64>,
    // dimensions drawn on the x and y axes
    projection: (usize, usize),
}

impl Visualizer {
    /// Create a new visualizer
    pub fn new() -> Self {
        Self {
            figure: Figure::new(),
            title: String::new(),
            x_label: "q[0]".to_string(),
            y_label: "q[1]".to_string(),
            x_range: None,
            y_range: None,
            aspect_ratio: Some(1.0),
            projection: (0, 1),
        }
    }

    /// Set the plot title
    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    /// Set X axis range
    pub fn set_x_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.x_range = Some((min, max));
        self
    }

    /// Set Y axis range
    pub fn set_y_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.y_range = Some((min, max));
        self
    }

    /// Set aspect ratio (None for auto)
    pub fn set_aspect_ratio(&mut self, ratio: Option<f64>) -> &mut Self {
        self.aspect_ratio = ratio;
        self
    }

    /// Choose which configuration dimensions are plotted
    pub fn set_projection(&mut self, x_dim: usize, y_dim: usize) -> &mut Self {
        self.projection = (x_dim, y_dim);
        self.x_label = format!("q[{}]", x_dim);
        self.y_label = format!("q[{}]", y_dim);
        self
    }

    /// Project a configuration onto the plot plane
    pub fn project(&self, state: &Configuration) -> (f64, f64) {
        let (xd, yd) = self.projection;
        let x = state.as_slice().get(xd).copied().unwrap_or(0.0);
        let y = state.as_slice().get(yd).copied().unwrap_or(0.0);
        (x, y)
    }

    /// Plot a path
    pub fn plot_path(&mut self, path: &KinematicPath, style: &PathStyle) -> &mut Self {
        let (x, y): (Vec<f64>, Vec<f64>) = path.states.iter().map(|s| self.project(s)).unzip();

        self.figure.axes2d()
            .lines(&x, &y, &[
                Caption(&style.caption),
                Color(&style.color),
                LineWidth(style.line_width),
            ]);
        self
    }

    /// Plot every tree edge as a thin segment
    pub fn plot_tree(&mut self, tree: &[(&Configuration, Option<&Configuration>)]) -> &mut Self {
        let edges: Vec<((f64, f64), (f64, f64))> = tree
            .iter()
            .filter_map(|(state, parent)| parent.map(|p| (self.project(p), self.project(state))))
            .collect();

        let axes = self.figure.axes2d();
        for (i, ((x0, y0), (x1, y1))) in edges.into_iter().enumerate() {
            let caption = if i == 0 { "Tree" } else { "" };
            axes.lines(&[x0, x1], &[y0, y1], &[
                Caption(caption),
                Color(colors::TREE),
                LineWidth(0.5),
            ]);
        }
        self
    }

    /// Plot multiple configurations as points
    pub fn plot_states(&mut self, states: &[&Configuration], style: &PointStyle) -> &mut Self {
        let (x, y): (Vec<f64>, Vec<f64>) = states.iter().map(|s| self.project(s)).unzip();

        self.figure.axes2d()
            .points(&x, &y, &[
                Caption(&style.caption),
                Color(&style.color),
                PointSymbol(style.symbol),
                PointSize(style.size),
            ]);
        self
    }

    /// Plot an axis-aligned box in the projection plane
    pub fn plot_box(&mut self, min: (f64, f64), max: (f64, f64)) -> &mut Self {
        let x = [min.0, max.0, max.0, min.0, min.0];
        let y = [min.1, min.1, max.1, max.1, min.1];
        self.figure.axes2d()
            .lines(&x, &y, &[Color(colors::OBSTACLE), LineWidth(1.5)]);
        self
    }

    /// Plot start configuration
    pub fn plot_start(&mut self, state: &Configuration) -> &mut Self {
        self.plot_states(&[state], &PointStyle::new(colors::START, "Start").with_size(1.5))
    }

    /// Plot goal configuration
    pub fn plot_goal(&mut self, state: &Configuration) -> &mut Self {
        self.plot_states(&[state], &PointStyle::new(colors::GOAL, "Goal").with_size(1.5))
    }

    /// Finalize and show the plot
    pub fn show(&mut self) -> PlanningResult<()> {
        self.apply_settings();
        self.figure
            .show()
            .map(|_| ())
            .map_err(|e| PlanningError::VisualizationError(e.to_string()))
    }

    /// Save plot to PNG file
    pub fn save_png(&mut self, path: &str, width: u32, height: u32) -> PlanningResult<()> {
        self.apply_settings();
        self.figure
            .save_to_png(path, width, height)
            .map_err(|e| PlanningError::VisualizationError(e.to_string()))
    }

    /// Save plot to SVG file
    pub fn save_svg(&mut self, path: &str) -> PlanningResult<()> {
        self.apply_settings();
        self.figure
            .save_to_svg(path, 800, 600)
            .map_err(|e| PlanningError::VisualizationError(e.to_string()))
    }

    fn apply_settings(&mut self) {
        let axes = self.figure.axes2d();

        if !self.title.is_empty() {
            axes.set_title(&self.title, &[]);
        }
        axes.set_x_label(&self.x_label, &[]);
        axes.set_y_label(&self.y_label, &[]);

        if let Some((min, max)) = self.x_range {
            axes.set_x_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        if let Some((min, max)) = self.y_range {
            axes.set_y_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        if let Some(ratio) = self.aspect_ratio {
            axes.set_aspect_ratio(AutoOption::Fix(ratio));
        }
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visualizer_creation() {
        let vis = Visualizer::new();
        assert!(vis.aspect_ratio.is_some());
        assert_eq!(vis.projection, (0, 1));
    }

    #[test]
    fn test_projection() {
        let mut vis = Visualizer::new();
        let q = Configuration::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(vis.project(&q), (1.0, 2.0));
        vis.set_projection(2, 0);
        assert_eq!(vis.project(&q), (3.0, 1.0));
        assert_eq!(vis.x_label, "q[2]");
        // missing dimensions fall back to zero
        assert_eq!(vis.project(&Configuration::new(vec![4.0])), (0.0, 4.0));
    }

    #[test]
    fn test_path_style() {
        let style = PathStyle::new(colors::RED, "Test Path")
            .with_line_width(3.0);
        assert_eq!(style.line_width, 3.0);
        assert_eq!(style.color, colors::RED);
    }

    #[test]
    fn test_point_style() {
        let style = PointStyle::new(colors::START, "Roots").with_size(1.5).with_symbol('S');
        assert_eq!(style.symbol, 'S');
        assert_eq!(style.size, 1.5);
        assert_eq!(PointStyle::new(colors::GOAL, "Goal").symbol, 'O');
    }
}
