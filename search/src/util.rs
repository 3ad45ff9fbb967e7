use std::{fs, path::Path, str::FromStr};

use image::{DynamicImage, GenericImageView, Rgba};
use log::debug;

use crate::{
    error::MazeError,
    grid::{Maze, Point},
};

/// Marks the start cell in a text maze
pub const START: char = 'A';
/// Marks the goal cell in a text maze
pub const GOAL: char = 'B';
/// The only character besides the markers that is not a wall
pub const OPEN: char = ' ';

/// File extensions that are loaded as thresholded images instead of text
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

/// Characters that end a row. A `\r\n` pair counts as a single break.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Split text into rows. A break at the very end does not start another row.
fn split_lines(contents: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = contents;

    while !rest.is_empty() {
        match rest.char_indices().find(|(_, c)| LINE_BREAKS.contains(c)) {
            Some((i, c)) => {
                lines.push(&rest[..i]);
                let len = if rest[i..].starts_with("\r\n") {
                    2
                } else {
                    c.len_utf8()
                };
                rest = &rest[i + len..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }

    lines
}

/// Parses a text maze.
///
/// `A` marks the start and `B` the goal, both exactly once. A space is open and any
/// other character is a wall. Lines may have different lengths, the maze is as wide as
/// the longest one and the missing cells of shorter lines are open.
pub fn parse_text(contents: &str) -> Result<Maze, MazeError> {
    if contents.matches(START).count() != 1 {
        return Err(MazeError::malformed("maze must have exactly one start point"));
    }
    if contents.matches(GOAL).count() != 1 {
        return Err(MazeError::malformed("maze must have exactly one goal"));
    }

    let mut start = None;
    let mut goal = None;
    let mut walls = Vec::new();

    for (row, line) in split_lines(contents).into_iter().enumerate() {
        let mut cells = Vec::with_capacity(line.len());
        for (col, c) in line.chars().enumerate() {
            cells.push(match c {
                START => {
                    start = Some(Point { row, col });
                    false
                }
                GOAL => {
                    goal = Some(Point { row, col });
                    false
                }
                OPEN => false,
                _ => true,
            });
        }
        walls.push(cells);
    }

    // both markers were counted above, so they were seen while parsing
    let (Some(start), Some(goal)) = (start, goal) else {
        return Err(MazeError::malformed("maze must have a start and a goal"));
    };

    let maze = Maze::new(walls, start, goal)?;
    debug!(
        "parsed a {}x{} maze with {} open cells",
        maze.height(),
        maze.width(),
        maze.open_cells()
    );
    Ok(maze)
}

impl FromStr for Maze {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_text(s)
    }
}

enum PixelKind {
    Open,
    Wall,
    Start,
    Goal,
}

fn classify(p: Rgba<u8>) -> PixelKind {
    let [r, g, b, _] = p.0;

    if r >= 128 && g < 128 && b < 128 {
        PixelKind::Start
    } else if g >= 128 && r < 128 && b < 128 {
        PixelKind::Goal
    } else if r < 128 {
        PixelKind::Wall
    } else {
        PixelKind::Open
    }
}

/// Converts a thresholded image into a maze, one pixel per cell.
///
/// Dark pixels are walls, light pixels are open, the single red pixel is the start and
/// the single green pixel is the goal.
pub fn parse_img(img: &DynamicImage) -> Result<Maze, MazeError> {
    let width = img.width() as usize;
    let height = img.height() as usize;

    let mut walls = vec![vec![false; width]; height];
    let mut starts = Vec::new();
    let mut goals = Vec::new();

    for row in 0..height {
        for col in 0..width {
            let p = img.get_pixel(col as u32, row as u32);

            match classify(p) {
                PixelKind::Wall => walls[row][col] = true,
                PixelKind::Open => {}
                PixelKind::Start => starts.push(Point { row, col }),
                PixelKind::Goal => goals.push(Point { row, col }),
            }
        }
    }

    let start = match starts.as_slice() {
        [start] => *start,
        _ => {
            return Err(MazeError::malformed(format!(
                "maze image must have exactly one start pixel, found {}",
                starts.len()
            )))
        }
    };
    let goal = match goals.as_slice() {
        [goal] => *goal,
        _ => {
            return Err(MazeError::malformed(format!(
                "maze image must have exactly one goal pixel, found {}",
                goals.len()
            )))
        }
    };

    Maze::new(walls, start, goal)
}

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Loads a maze from disk, as an image if the extension says so and as text otherwise
pub fn load_file(path: impl AsRef<Path>) -> Result<Maze, MazeError> {
    let path = path.as_ref();

    if is_image_path(path) {
        debug!("loading maze image {}", path.display());
        let img = image::open(path)?;
        parse_img(&img)
    } else {
        debug!("loading maze text {}", path.display());
        let contents = fs::read_to_string(path)?;
        parse_text(&contents)
    }
}
