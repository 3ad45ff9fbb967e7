use std::{collections::HashSet, fmt::Debug, hash::Hash, rc::Rc};

use log::{debug, trace};
use serde::{Serialize, Serializer};

use crate::{
    error::SearchError,
    frontier::{Frontier, Policy},
    node::Node,
};

/// Supertrait that collects all the requirements on the NodeReference values
/// Must be copy, hashable, ordered and not references (hence 'static)
pub trait NodeReference: Copy + Eq + Hash + Ord + Debug + 'static {}

/// Anything the search engine can walk: a start, a goal and the moves out of each state
pub trait SearchSpace {
    /// The type that can be used to reference nodes in the space
    type Reference: NodeReference;

    /// The move that leads from one node to a neighbor
    type Action: Copy + Debug + 'static;

    fn start(&self) -> Self::Reference;

    fn goal(&self) -> Self::Reference;

    /// Return an iterator over the neighbors of the provided node and the action that
    /// reaches each of them. The order of the iterator decides how ties are broken.
    fn neighbors_of(
        &self,
        node: Self::Reference,
    ) -> impl Iterator<Item = (Self::Action, Self::Reference)>;
}

/// The outcome of a successful search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(bound(serialize = "A: Serialize, R: Serialize"))]
pub struct Solution<A, R: NodeReference> {
    /// The actions leading from the start to the goal
    pub actions: Vec<A>,
    /// The state after each action, so the start is left out and the goal is last
    pub cells: Vec<R>,
    /// Number of nodes taken out of the frontier, including the goal
    pub num_explored: usize,
    /// The states that were expanded before the goal was reached
    #[serde(serialize_with = "serialize_sorted")]
    pub explored: HashSet<R>,
}

impl<A, R: NodeReference> Solution<A, R> {
    /// Number of actions in the path
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

fn serialize_sorted<R, S>(set: &HashSet<R>, serializer: S) -> Result<S::Ok, S::Error>
where
    R: Ord + Serialize,
    S: Serializer,
{
    let mut items: Vec<&R> = set.iter().collect();
    items.sort();
    items.serialize(serializer)
}

/// Bounds on how much work a single search may do
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Give up once this many nodes were taken out of the frontier
    pub max_explored: Option<usize>,
}

impl SearchLimits {
    pub fn max_explored(max_explored: usize) -> Self {
        Self {
            max_explored: Some(max_explored),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathFinderState<A, R: NodeReference> {
    Computing,
    NoPathFound,
    ExploreLimitReached,
    PathFound(Solution<A, R>),
}

impl<A, R: NodeReference> PathFinderState<A, R> {
    pub fn is_done(&self) -> bool {
        !matches!(self, PathFinderState::Computing)
    }
}

/// An uninformed search that can be driven one expansion at a time.
///
/// The order in which nodes are expanded is entirely decided by the frontier
/// [`Policy`]: a stack gives depth-first search, a queue breadth-first search.
pub struct PathFinder<'m, M: SearchSpace> {
    space: &'m M,
    policy: Policy,
    limits: SearchLimits,
    frontier: Box<dyn Frontier<M::Reference, M::Action>>,
    explored: HashSet<M::Reference>,
    num_explored: usize,
    state: PathFinderState<M::Action, M::Reference>,
}

impl<'m, M: SearchSpace> PathFinder<'m, M> {
    pub fn new(space: &'m M, policy: Policy) -> Self {
        Self::with_limits(space, policy, SearchLimits::default())
    }

    pub fn with_limits(space: &'m M, policy: Policy, limits: SearchLimits) -> Self {
        let mut frontier = policy.create::<M::Reference, M::Action>();
        frontier.add(Node::root(space.start()));

        Self {
            space,
            policy,
            limits,
            frontier,
            explored: HashSet::new(),
            num_explored: 0,
            state: PathFinderState::Computing,
        }
    }

    /// Run the search until it either finds the goal or gives up
    pub fn finish(mut self) -> Result<Solution<M::Action, M::Reference>, SearchError> {
        debug!(
            "searching from {:?} to {:?} with a {} frontier",
            self.space.start(),
            self.space.goal(),
            self.policy
        );

        loop {
            self.step()?;

            match std::mem::replace(&mut self.state, PathFinderState::Computing) {
                PathFinderState::Computing => {}
                PathFinderState::PathFound(solution) => {
                    debug!(
                        "found a path of {} actions after exploring {} states",
                        solution.len(),
                        solution.num_explored
                    );
                    return Ok(solution);
                }
                PathFinderState::NoPathFound => {
                    debug!("no path found after exploring {} states", self.num_explored);
                    return Err(SearchError::NoSolution {
                        explored: self.num_explored,
                    });
                }
                PathFinderState::ExploreLimitReached => {
                    debug!("gave up after exploring {} states", self.num_explored);
                    return Err(SearchError::ExploreLimitReached {
                        explored: self.num_explored,
                    });
                }
            }
        }
    }

    /// Expand a single node
    pub fn step(&mut self) -> Result<&PathFinderState<M::Action, M::Reference>, SearchError> {
        if self.state.is_done() {
            return Ok(&self.state);
        }

        if self.frontier.is_empty() {
            self.state = PathFinderState::NoPathFound;
            return Ok(&self.state);
        }

        if let Some(max_explored) = self.limits.max_explored {
            if self.num_explored >= max_explored {
                self.state = PathFinderState::ExploreLimitReached;
                return Ok(&self.state);
            }
        }

        let node = self.frontier.remove()?;
        self.num_explored += 1;

        if node.state() == self.space.goal() {
            self.state = PathFinderState::PathFound(self.solution_for(&node));
            return Ok(&self.state);
        }

        self.explored.insert(node.state());

        let space = self.space;
        for (action, neighbor) in space.neighbors_of(node.state()) {
            if !self.frontier.contains_state(&neighbor) && !self.explored.contains(&neighbor) {
                self.frontier.add(Node::child(&node, action, neighbor));
            }
        }

        trace!(
            "expanded {:?}, frontier holds {} nodes",
            node.state(),
            self.frontier.len()
        );

        Ok(&self.state)
    }

    fn solution_for(
        &self,
        goal: &Rc<Node<M::Reference, M::Action>>,
    ) -> Solution<M::Action, M::Reference> {
        let (actions, cells) = goal.backtrack();

        Solution {
            actions,
            cells,
            num_explored: self.num_explored,
            explored: self.explored.clone(),
        }
    }

    pub fn state(&self) -> &PathFinderState<M::Action, M::Reference> {
        &self.state
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// The states expanded so far
    pub fn explored(&self) -> &HashSet<M::Reference> {
        &self.explored
    }

    pub fn num_explored(&self) -> usize {
        self.num_explored
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }
}

/// Search `space` for a path from its start to its goal using the given frontier policy.
///
/// An unreachable goal is reported as [`SearchError::NoSolution`].
pub fn solve<M: SearchSpace>(
    space: &M,
    policy: Policy,
) -> Result<Solution<M::Action, M::Reference>, SearchError> {
    PathFinder::new(space, policy).finish()
}

/// Like [`solve`], but fails with [`SearchError::ExploreLimitReached`] once the limits
/// are exhausted.
pub fn solve_with_limits<M: SearchSpace>(
    space: &M,
    policy: Policy,
    limits: SearchLimits,
) -> Result<Solution<M::Action, M::Reference>, SearchError> {
    PathFinder::with_limits(space, policy, limits).finish()
}

#[cfg(test)]
mod test {
    use std::collections::{HashMap, VecDeque};

    use super::*;
    use crate::grid::{Action, Maze, Point};
    use crate::util::parse_text;

    const POLICIES: [Policy; 2] = [Policy::Stack, Policy::Queue];

    fn create_open_map() -> Maze {
        parse_text("A  \n   \n  B\n").unwrap()
    }

    fn create_basic_map() -> Maze {
        parse_text(concat!(
            "#######\n",
            "#A###B#\n",
            "# ### #\n",
            "# #   #\n",
            "# # ###\n",
            "#      \n",
            "#######\n",
        ))
        .unwrap()
    }

    fn create_loop_map() -> Maze {
        parse_text(concat!(
            "##########\n",
            "#A       #\n",
            "# ###### #\n",
            "# #    # #\n",
            "# # ## # #\n",
            "#   ##   #\n",
            "### ######\n",
            "#B       #\n",
            "##########\n",
        ))
        .unwrap()
    }

    fn create_walled_map() -> Maze {
        parse_text("A  #   \n   #   \n   #  B\n").unwrap()
    }

    /// Shortest number of actions from start to goal, computed independently
    fn shortest_distance(maze: &Maze) -> Option<usize> {
        let mut distances = HashMap::from([(maze.start(), 0)]);
        let mut queue = VecDeque::from([maze.start()]);

        while let Some(point) = queue.pop_front() {
            let distance = distances[&point];
            if point == maze.goal() {
                return Some(distance);
            }
            for (_, next) in maze.neighbors(point) {
                if !distances.contains_key(&next) {
                    distances.insert(next, distance + 1);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    /// Replays the actions of a solution and checks every step against the maze
    fn assert_valid_solution(maze: &Maze, solution: &Solution<Action, Point>) {
        assert_eq!(solution.actions.len(), solution.cells.len());

        let mut position = maze.start();
        for (action, cell) in solution.actions.iter().zip(&solution.cells) {
            position = action.apply(position).expect("action left the maze");
            assert!(maze.contains(position));
            assert!(!maze.is_wall(position), "walked into a wall at {}", position);
            assert_eq!(position, *cell);
        }
        assert_eq!(position, maze.goal());
    }

    #[test]
    fn test_open_grid_stack() {
        let maze = create_open_map();
        let solution = solve(&maze, Policy::Stack).unwrap();

        assert_valid_solution(&maze, &solution);
        assert_eq!(
            solution.actions,
            vec![Action::Right, Action::Right, Action::Down, Action::Down]
        );
        assert_eq!(solution.num_explored, 5);
    }

    #[test]
    fn test_open_grid_queue() {
        let maze = create_open_map();
        let solution = solve(&maze, Policy::Queue).unwrap();

        assert_valid_solution(&maze, &solution);
        assert_eq!(
            solution.actions,
            vec![Action::Down, Action::Down, Action::Right, Action::Right]
        );
        assert_eq!(
            solution.cells,
            vec![
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(2, 1),
                Point::new(2, 2)
            ]
        );
        assert_eq!(solution.num_explored, 9);
        // the goal itself is never added to the explored set
        assert!(!solution.explored.contains(&maze.goal()));
        assert_eq!(solution.explored.len(), 8);
    }

    #[test]
    fn test_basic_route() {
        let maze = create_basic_map();

        for policy in POLICIES {
            let solution = solve(&maze, policy).unwrap();
            assert_valid_solution(&maze, &solution);
            assert_eq!(solution.len(), 12);
        }
    }

    #[test]
    fn test_queue_finds_shortest_path() {
        for maze in [create_open_map(), create_basic_map(), create_loop_map()] {
            let shortest = shortest_distance(&maze).unwrap();

            let bfs = solve(&maze, Policy::Queue).unwrap();
            assert_valid_solution(&maze, &bfs);
            assert_eq!(bfs.len(), shortest);

            let dfs = solve(&maze, Policy::Stack).unwrap();
            assert_valid_solution(&maze, &dfs);
            assert!(dfs.len() >= shortest);
        }
    }

    #[test]
    fn test_stack_takes_the_long_way() {
        // depth-first follows the last generated neighbor (right) around the loop
        let maze = create_loop_map();
        let dfs = solve(&maze, Policy::Stack).unwrap();
        let bfs = solve(&maze, Policy::Queue).unwrap();

        assert_eq!(bfs.len(), 10);
        assert!(dfs.len() > bfs.len());
    }

    #[test]
    fn test_basic_no_route() {
        let maze = create_walled_map();

        for policy in POLICIES {
            let err = solve(&maze, policy).unwrap_err();
            assert!(err.is_no_solution());
            // every open cell left of the wall gets explored
            assert_eq!(err, SearchError::NoSolution { explored: 9 });
        }
    }

    #[test]
    fn test_start_enclosed() {
        let maze = parse_text("###\n#A#\n###\n  B\n").unwrap();

        for policy in POLICIES {
            assert_eq!(
                solve(&maze, policy).unwrap_err(),
                SearchError::NoSolution { explored: 1 }
            );
        }
    }

    #[test]
    fn test_goal_next_to_start() {
        let maze = parse_text("AB").unwrap();

        for policy in POLICIES {
            let solution = solve(&maze, policy).unwrap();
            assert_eq!(solution.actions, vec![Action::Right]);
            assert_eq!(solution.cells, vec![Point::new(0, 1)]);
            assert_eq!(solution.num_explored, 2);
        }
    }

    #[test]
    fn test_repeated_solves_are_identical() {
        let maze = create_loop_map();

        for policy in POLICIES {
            let first = solve(&maze, policy).unwrap();
            let second = solve(&maze, policy).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_explore_limit() {
        let maze = create_open_map();

        assert_eq!(
            solve_with_limits(&maze, Policy::Queue, SearchLimits::max_explored(3)).unwrap_err(),
            SearchError::ExploreLimitReached { explored: 3 }
        );

        // the goal is the ninth node out of the queue
        let solution =
            solve_with_limits(&maze, Policy::Queue, SearchLimits::max_explored(9)).unwrap();
        assert_eq!(solution.num_explored, 9);

        // an unreachable goal is still reported as such when the limit is never hit
        assert!(solve_with_limits(
            &create_walled_map(),
            Policy::Stack,
            SearchLimits::max_explored(100)
        )
        .unwrap_err()
        .is_no_solution());
    }

    #[test]
    fn test_step_by_step() {
        let maze = create_open_map();
        let mut finder = PathFinder::new(&maze, Policy::Queue);

        assert_eq!(finder.frontier_len(), 1);
        assert!(!finder.step().unwrap().is_done());
        assert_eq!(finder.num_explored(), 1);
        assert!(finder.explored().contains(&maze.start()));
        assert_eq!(finder.frontier_len(), 2);

        let mut steps = 1;
        while !finder.step().unwrap().is_done() {
            steps += 1;
        }
        assert_eq!(steps, 8);
        assert!(matches!(
            finder.state(),
            PathFinderState::PathFound(Solution {
                num_explored: 9,
                ..
            })
        ));

        // stepping a finished search does not change it
        let done = finder.state().clone();
        assert_eq!(finder.step().unwrap(), &done);
    }

    #[test]
    fn test_explored_set_only_grows() {
        let maze = create_loop_map();

        for policy in POLICIES {
            let mut finder = PathFinder::new(&maze, policy);
            let mut seen = HashSet::new();
            while !finder.step().unwrap().is_done() {
                assert!(seen.is_subset(finder.explored()));
                seen = finder.explored().clone();
                assert!(finder.explored().len() <= maze.open_cells());
            }
        }
    }

    #[test]
    fn test_solution_json() {
        let maze = parse_text("AB").unwrap();
        let solution = solve(&maze, Policy::Queue).unwrap();

        let json = serde_json::to_value(&solution).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "actions": ["right"],
                "cells": [{"row": 0, "col": 1}],
                "num_explored": 2,
                "explored": [{"row": 0, "col": 0}],
            })
        );
    }
}
