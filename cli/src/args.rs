use std::path::PathBuf;

use clap::{builder::BoolishValueParser, ArgAction, Parser};
use maze_search::{Policy, RenderOptions, SearchLimits};

/// Find a path through a maze with depth-first or breadth-first search
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Maze to solve: a text file with `A` as start and `B` as goal, or a one pixel per
    /// cell image with a red start and a green goal
    pub maze: PathBuf,

    /// Search with a queue (breadth-first) instead of a stack (depth-first): true or false
    #[arg(required = true, action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    pub use_queue: bool,

    /// Where to write the rendered maze
    #[arg(short, long, default_value = "maze.png")]
    pub output: PathBuf,

    /// Do not highlight explored cells in the image
    #[arg(long)]
    pub hide_explored: bool,

    /// Give up after taking this many nodes out of the frontier
    #[arg(long)]
    pub max_explored: Option<usize>,

    /// Print the solution as JSON instead of drawing the maze
    #[arg(long)]
    pub json: bool,

    /// Log more, can be repeated
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn policy(&self) -> Policy {
        Policy::from_use_queue(self.use_queue)
    }

    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_explored: self.max_explored,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            show_explored: !self.hide_explored,
            ..Default::default()
        }
    }

    /// The log filter used when `RUST_LOG` is not set
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
