//! Depth-first and breadth-first search through grid mazes.
//!
//! ```
//! use maze_search::{solve, Maze, Policy};
//!
//! let maze: Maze = "A #\n  B".parse().unwrap();
//! let solution = solve(&maze, Policy::Queue).unwrap();
//! assert_eq!(solution.len(), 3);
//! ```

pub mod error;
pub mod find;
pub mod frontier;
pub mod grid;
pub mod node;
pub mod render;
pub mod util;

pub use error::{MazeError, SearchError};
pub use find::{
    solve, solve_with_limits, NodeReference, PathFinder, PathFinderState, SearchLimits,
    SearchSpace, Solution,
};
pub use frontier::{Frontier, Policy, QueueFrontier, StackFrontier};
pub use grid::{Action, Maze, Point};
pub use node::Node;
pub use render::{render_image, render_text, save_image, RenderOptions};
