use std::{collections::HashSet, fmt::Display, path::Path};

use image::{ImageBuffer, Rgba, RgbaImage};
use log::debug;

use crate::{
    error::MazeError,
    find::Solution,
    grid::{Action, Maze, Point},
};

pub const WALL_GLYPH: char = '█';
pub const START_GLYPH: char = 'A';
pub const GOAL_GLYPH: char = 'B';
pub const PATH_GLYPH: char = '*';

pub const BACKGROUND_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const WALL_COLOR: Rgba<u8> = Rgba([40, 40, 40, 255]);
pub const START_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);
pub const GOAL_COLOR: Rgba<u8> = Rgba([0, 171, 28, 255]);
pub const PATH_COLOR: Rgba<u8> = Rgba([220, 235, 113, 255]);
pub const EXPLORED_COLOR: Rgba<u8> = Rgba([212, 97, 85, 255]);
pub const EMPTY_COLOR: Rgba<u8> = Rgba([237, 240, 252, 255]);

/// Draws the maze as text, one line per row, marking the cells of `solution` if given
pub fn render_text(maze: &Maze, solution: Option<&[Point]>) -> String {
    let path: HashSet<Point> = solution.unwrap_or_default().iter().copied().collect();
    let mut out = String::with_capacity((maze.width() + 1) * maze.height());

    for row in 0..maze.height() {
        for col in 0..maze.width() {
            let point = Point { row, col };
            out.push(if maze.is_wall(point) {
                WALL_GLYPH
            } else if point == maze.start() {
                START_GLYPH
            } else if point == maze.goal() {
                GOAL_GLYPH
            } else if path.contains(&point) {
                PATH_GLYPH
            } else {
                ' '
            });
        }
        out.push('\n');
    }

    out
}

impl Display for Maze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", render_text(self, None))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Side length of a cell in pixels
    pub cell_size: u32,
    /// Pixels left uncovered on each side of a cell
    pub border: u32,
    pub show_solution: bool,
    pub show_explored: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cell_size: 50,
            border: 2,
            show_solution: true,
            show_explored: false,
        }
    }
}

fn cell_color(
    maze: &Maze,
    point: Point,
    solution: Option<&Solution<Action, Point>>,
    path: &HashSet<Point>,
    options: &RenderOptions,
) -> Rgba<u8> {
    if maze.is_wall(point) {
        WALL_COLOR
    } else if point == maze.start() {
        START_COLOR
    } else if point == maze.goal() {
        GOAL_COLOR
    } else if options.show_solution && path.contains(&point) {
        PATH_COLOR
    } else if options.show_explored && solution.is_some_and(|s| s.explored.contains(&point)) {
        EXPLORED_COLOR
    } else {
        EMPTY_COLOR
    }
}

/// Draws the maze as an image with one filled square per cell.
///
/// Solution and explored cells are only highlighted when a solution is given and the
/// matching option is set.
pub fn render_image(
    maze: &Maze,
    solution: Option<&Solution<Action, Point>>,
    options: &RenderOptions,
) -> RgbaImage {
    let cell_size = options.cell_size;
    let width = maze.width() as u32 * cell_size;
    let height = maze.height() as u32 * cell_size;

    let mut img: RgbaImage = ImageBuffer::from_pixel(width, height, BACKGROUND_COLOR);
    if width == 0 || height == 0 {
        return img;
    }

    let path: HashSet<Point> = solution
        .map(|s| s.cells.iter().copied().collect())
        .unwrap_or_default();

    for row in 0..maze.height() {
        for col in 0..maze.width() {
            let fill = cell_color(maze, Point { row, col }, solution, &path, options);

            // corners are inclusive on both ends
            let x0 = col as u32 * cell_size + options.border;
            let y0 = row as u32 * cell_size + options.border;
            let x1 = ((col as u32 + 1) * cell_size)
                .saturating_sub(options.border)
                .min(width - 1);
            let y1 = ((row as u32 + 1) * cell_size)
                .saturating_sub(options.border)
                .min(height - 1);

            for y in y0..=y1 {
                for x in x0..=x1 {
                    img.put_pixel(x, y, fill);
                }
            }
        }
    }

    img
}

/// Renders the maze with [`render_image`] and writes it to `path`
pub fn save_image(
    maze: &Maze,
    solution: Option<&Solution<Action, Point>>,
    options: &RenderOptions,
    path: impl AsRef<Path>,
) -> Result<(), MazeError> {
    let path = path.as_ref();
    let img = render_image(maze, solution, options);
    img.save(path)?;
    debug!(
        "wrote {}x{} maze image to {}",
        img.width(),
        img.height(),
        path.display()
    );
    Ok(())
}
