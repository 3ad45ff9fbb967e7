use crate::error::MazeError;
use crate::find::{NodeReference, SearchSpace};
use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// One of the four orthogonal moves between adjacent cells
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    /// All actions in the order neighbors are generated. Depth-first search picks its
    /// path based on this order, so it must not change.
    pub const ALL: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    /// Returns the point reached by taking this action from `point`, or `None` if that
    /// would leave the grid on the top or left side.
    pub fn apply(self, point: Point) -> Option<Point> {
        match self {
            Action::Up => point.row.checked_sub(1).map(|row| Point { row, ..point }),
            Action::Down => Some(Point {
                row: point.row + 1,
                ..point
            }),
            Action::Left => point.col.checked_sub(1).map(|col| Point { col, ..point }),
            Action::Right => Some(Point {
                col: point.col + 1,
                ..point
            }),
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Action::Up => "up",
                Action::Down => "down",
                Action::Left => "left",
                Action::Right => "right",
            }
        )
    }
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Action::Up),
            "down" => Ok(Action::Down),
            "left" => Ok(Action::Left),
            "right" => Ok(Action::Right),
            _ => Err(anyhow::anyhow!("Invalid action: {}", s)),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl NodeReference for Point {}

/// A rectangular maze of open and wall cells with a single start and a single goal.
///
/// A `Maze` is never modified after construction, so it can be solved any number of
/// times with different frontier policies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMaze")]
pub struct Maze {
    height: usize,
    width: usize,
    // true = wall
    walls: Vec<Vec<bool>>,
    start: Point,
    goal: Point,
}

/// The serialized form of a [`Maze`], checked by [`Maze::new`] before it is accepted
#[derive(Deserialize)]
struct RawMaze {
    height: usize,
    width: usize,
    walls: Vec<Vec<bool>>,
    start: Point,
    goal: Point,
}

impl TryFrom<RawMaze> for Maze {
    type Error = MazeError;

    fn try_from(raw: RawMaze) -> Result<Self, Self::Error> {
        let maze = Maze::new(raw.walls, raw.start, raw.goal)?;
        if (maze.height, maze.width) != (raw.height, raw.width) {
            return Err(MazeError::malformed(format!(
                "maze is declared {}x{} but its walls are {}x{}",
                raw.height, raw.width, maze.height, maze.width
            )));
        }
        Ok(maze)
    }
}

impl Maze {
    /// Builds a maze from rows of wall flags.
    ///
    /// The width is the length of the longest row. Shorter rows are padded with open
    /// cells rather than rejected.
    pub fn new(walls: Vec<Vec<bool>>, start: Point, goal: Point) -> Result<Self, MazeError> {
        let height = walls.len();
        let width = walls.iter().map(Vec::len).max().unwrap_or(0);

        if height == 0 || width == 0 {
            return Err(MazeError::malformed("maze must have at least one cell"));
        }

        let walls: Vec<Vec<bool>> = walls
            .into_iter()
            .map(|mut row| {
                row.resize(width, false);
                row
            })
            .collect();

        let maze = Self {
            height,
            width,
            walls,
            start,
            goal,
        };

        if start == goal {
            return Err(MazeError::malformed("start and goal must be different cells"));
        }
        for (name, point) in [("start", start), ("goal", goal)] {
            if !maze.contains(point) {
                return Err(MazeError::malformed(format!(
                    "{} {} is outside of the {}x{} maze",
                    name, point, height, width
                )));
            }
            if maze.is_wall(point) {
                return Err(MazeError::malformed(format!("{} {} is a wall", name, point)));
            }
        }

        Ok(maze)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn goal(&self) -> Point {
        self.goal
    }

    pub fn contains(&self, point: Point) -> bool {
        point.row < self.height && point.col < self.width
    }

    /// Points outside the maze are reported as open.
    pub fn is_wall(&self, point: Point) -> bool {
        self.contains(point) && self.walls[point.row][point.col]
    }

    pub fn walls(&self) -> &[Vec<bool>] {
        &self.walls
    }

    /// Number of cells that are not walls
    pub fn open_cells(&self) -> usize {
        self.walls.iter().flatten().filter(|wall| !**wall).count()
    }

    /// Scales the maze by the given factor, i.e. to make it twice as large, pass 2.
    /// Every cell is repeated into a `factor`x`factor` block, start and goal end up in
    /// the top left cell of their block.
    pub fn scaled(&self, factor: usize) -> Maze {
        let factor = factor.max(1);
        let mut walls = vec![vec![false; self.width * factor]; self.height * factor];

        for row in 0..self.height {
            for col in 0..self.width {
                for r in 0..factor {
                    for c in 0..factor {
                        walls[row * factor + r][col * factor + c] = self.walls[row][col];
                    }
                }
            }
        }

        let scale = |p: Point| Point {
            row: p.row * factor,
            col: p.col * factor,
        };

        Maze {
            height: self.height * factor,
            width: self.width * factor,
            walls,
            start: scale(self.start),
            goal: scale(self.goal),
        }
    }

    /// Returns the open, in-bounds neighbors of `point` together with the action that
    /// reaches each one, in the order up, down, left, right.
    pub fn neighbors(&self, point: Point) -> Vec<(Action, Point)> {
        let mut points = Vec::with_capacity(4);

        for action in Action::ALL {
            if let Some(next) = action.apply(point) {
                if self.contains(next) && !self.is_wall(next) {
                    points.push((action, next));
                }
            }
        }

        points
    }
}

impl SearchSpace for Maze {
    type Reference = Point;
    type Action = Action;

    fn start(&self) -> Self::Reference {
        self.start
    }

    fn goal(&self) -> Self::Reference {
        self.goal
    }

    fn neighbors_of(
        &self,
        node: Self::Reference,
    ) -> impl Iterator<Item = (Self::Action, Self::Reference)> {
        self.neighbors(node).into_iter()
    }
}
