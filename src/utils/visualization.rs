//! Visualization utilities for terrain_pathfinder
//!
//! Plots a search result (walls, explored cells, path, start and goal)
//! using gnuplot. Rows are drawn on the x axis and columns on the y axis.

use gnuplot::{AutoOption, AxesCommon, Caption, Color, Figure, LineWidth, PointSize, PointSymbol};

use crate::common::{CostModel, GridCoord, GridPath, PathfinderError, PathfinderResult};
use crate::path_planning::Pathfinder;
use crate::utils::Terrain;

/// Color palette for consistent styling
pub mod colors {
    pub const WALL: &str = "#2F2F2F";
    pub const EXPLORED: &str = "#C0C0C0";
    pub const PATH: &str = "#D62728";
    pub const START: &str = "#2CA02C";
    pub const GOAL: &str = "#1F77B4";
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
        Self::new(colors::PATH, "Path")
    }
}

/// Style for cell markers
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

enum Layer {
    Points { x: Vec<f64>, y: Vec<f64>, style: PointStyle },
    Lines { x: Vec<f64>, y: Vec<f64>, style: PathStyle },
}

/// Collects layers and draws them onto a single set of axes on save/show
pub struct Visualizer {
    figure: Figure,
    title: String,
    dimension: Option<usize>,
    layers: Vec<Layer>,
}

impl Visualizer {
    pub fn new() -> Self {
        Self {
            figure: Figure::new(),
            title: String::new(),
            dimension: None,
            layers: Vec::new(),
        }
    }

    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    /// Fix both axes to the grid extent
    pub fn set_dimension(&mut self, n: usize) -> &mut Self {
        self.dimension = Some(n);
        self
    }

    pub fn plot_cells(&mut self, cells: &[GridCoord], style: &PointStyle) -> &mut Self {
        if cells.is_empty() {
            return self;
        }
        let x: Vec<f64> = cells.iter().map(|c| c.i as f64).collect();
        let y: Vec<f64> = cells.iter().map(|c| c.j as f64).collect();

        self.layers.push(Layer::Points { x, y, style: style.clone() });
        self
    }

    pub fn plot_walls(&mut self, terrain: &Terrain) -> &mut Self {
        let style = PointStyle::new(colors::WALL, "Walls").with_symbol('S').with_size(1.5);
        self.plot_cells(&terrain.walls(), &style)
    }

    pub fn plot_explored<C: CostModel>(&mut self, pathfinder: &Pathfinder<C>) -> &mut Self {
        let explored: Vec<GridCoord> = pathfinder.visited_cells().collect();
        let style = PointStyle::new(colors::EXPLORED, "Explored").with_symbol('o').with_size(0.8);
        self.plot_cells(&explored, &style)
    }

    /// Draws `start` followed by the path cells as one polyline
    pub fn plot_path(&mut self, start: GridCoord, path: &GridPath, style: &PathStyle) -> &mut Self {
        let mut x = vec![start.i as f64];
        let mut y = vec![start.j as f64];
        x.extend(path.rows());
        y.extend(path.cols());

        self.layers.push(Layer::Lines { x, y, style: style.clone() });
        self
    }

    pub fn plot_start(&mut self, cell: GridCoord) -> &mut Self {
        self.plot_cells(&[cell], &PointStyle::new(colors::START, "Start").with_size(2.0))
    }

    pub fn plot_goal(&mut self, cell: GridCoord) -> &mut Self {
        self.plot_cells(&[cell], &PointStyle::new(colors::GOAL, "Goal").with_size(2.0))
    }

    /// Open an interactive gnuplot window
    pub fn show(&mut self) -> PathfinderResult<()> {
        self.render();
        self.figure
            .show()
            .map(|_| ())
            .map_err(|e| PathfinderError::Visualization(e.to_string()))
    }

    pub fn save_png(&mut self, path: &str, width: u32, height: u32) -> PathfinderResult<()> {
        self.render();
        self.figure
            .save_to_png(path, width, height)
            .map_err(|e| PathfinderError::Visualization(e.to_string()))
    }

    /// Save as an 800x800 SVG
    pub fn save_svg(&mut self, path: &str) -> PathfinderResult<()> {
        self.render();
        self.figure
            .save_to_svg(path, 800, 800)
            .map_err(|e| PathfinderError::Visualization(e.to_string()))
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn render(&mut self) {
        self.figure.clear_axes();
        let axes = self.figure.axes2d();

        for layer in &self.layers {
            match layer {
                Layer::Points { x, y, style } => {
                    axes.points(
                        x,
                        y,
                        &[
                            Caption(&style.caption),
                            Color(&style.color),
                            PointSymbol(style.symbol),
                            PointSize(style.size),
                        ],
                    );
                }
                Layer::Lines { x, y, style } => {
                    axes.lines(
                        x,
                        y,
                        &[
                            Caption(&style.caption),
                            Color(&style.color),
                            LineWidth(style.line_width),
                        ],
                    );
                }
            }
        }

        if !self.title.is_empty() {
            axes.set_title(&self.title, &[]);
        }
        axes.set_x_label("row i", &[]);
        axes.set_y_label("column j", &[]);

        if let Some(n) = self.dimension {
            let max = n as f64 - 0.5;
            axes.set_x_range(AutoOption::Fix(-0.5), AutoOption::Fix(max));
            axes.set_y_range(AutoOption::Fix(-0.5), AutoOption::Fix(max));
        }
        axes.set_aspect_ratio(AutoOption::Fix(1.0));
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Plot a finished search: walls, explored region, path, start and goal
pub fn plot_search(pathfinder: &Pathfinder<&Terrain>, title: &str) -> PathfinderResult<Visualizer> {
    let start = pathfinder
        .start()
        .ok_or_else(|| PathfinderError::IllegalState("start location is not set".to_string()))?;
    let goal = pathfinder
        .end()
        .ok_or_else(|| PathfinderError::IllegalState("end location is not set".to_string()))?;

    let mut vis = Visualizer::new();
    vis.set_title(title).set_dimension(pathfinder.dimension());
    vis.plot_walls(pathfinder.terrain()).plot_explored(pathfinder);
    if pathfinder.path_found() {
        let path = pathfinder.reconstruct_path()?;
        vis.plot_path(start, &path, &PathStyle::default());
    }
    vis.plot_start(start).plot_goal(goal);
    Ok(vis)
}
