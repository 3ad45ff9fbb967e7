use std::io::Write;

use anyhow::Context;
use log::info;
use maze_search::{render, solve_with_limits, util, SearchError};

use crate::args::Args;

/// How a run ended, when it did not fail outright
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Solved,
    NoSolution,
}

/// Loads the maze, solves it and reports the result to `out`
pub fn run(args: &Args, out: &mut impl Write) -> anyhow::Result<Outcome> {
    let maze = util::load_file(&args.maze)
        .with_context(|| format!("could not load maze from {}", args.maze.display()))?;
    info!(
        "loaded a {}x{} maze from {}",
        maze.height(),
        maze.width(),
        args.maze.display()
    );

    if !args.json {
        writeln!(out, "Maze:")?;
        writeln!(out)?;
        write!(out, "{}", maze)?;
        writeln!(out)?;
        writeln!(out, "Solving...")?;
    }

    let solution = match solve_with_limits(&maze, args.policy(), args.limits()) {
        Ok(solution) => solution,
        Err(SearchError::NoSolution { explored }) => {
            writeln!(out, "No solution, explored {} states", explored)?;
            return Ok(Outcome::NoSolution);
        }
        Err(err) => return Err(err).context("search failed"),
    };

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &solution)?;
        writeln!(out)?;
        return Ok(Outcome::Solved);
    }

    writeln!(out, "States Explored: {}", solution.num_explored)?;
    writeln!(out, "Solution:")?;
    writeln!(out)?;
    write!(out, "{}", render::render_text(&maze, Some(&solution.cells)))?;
    writeln!(out)?;

    render::save_image(&maze, Some(&solution), &args.render_options(), &args.output)
        .with_context(|| format!("could not write image to {}", args.output.display()))?;
    info!("wrote {}", args.output.display());

    Ok(Outcome::Solved)
}
