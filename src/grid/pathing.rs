use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use super::{calculator::HexagonalGridCalculator, storage::Storage};
use crate::geometry::{AxialCoordinate, Direction, Hexagon};

/// Can a visitor move into a hexagon?
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Traversable {
    /// Obstructed hexagons cannot be moved into.
    Obstructed,
    /// Free hexagons can be moved through.
    Free,
    /// Halt hexagons can be moved into, but not past.
    Halt,
}

/// Decides how something moves between neighboring hexagons.
///
/// Any `Fn(&Hexagon<T>, &Hexagon<T>) -> Traversable` is an agent with unit movement cost.
pub trait PathingAgent<T> {
    /// Whether a step from `from` into its neighbor `to` is allowed.
    fn traversable(&self, from: &Hexagon<T>, to: &Hexagon<T>) -> Traversable;

    /// Cost of the step from `from` into `to`.
    ///
    /// Costs below 1 make the distance heuristic inadmissible, so paths found
    /// with them may not be the cheapest.
    fn movement_cost(&self, _from: &Hexagon<T>, _to: &Hexagon<T>) -> u32 {
        1
    }
}

impl<T, F> PathingAgent<T> for F
where
    F: Fn(&Hexagon<T>, &Hexagon<T>) -> Traversable,
{
    fn traversable(&self, from: &Hexagon<T>, to: &Hexagon<T>) -> Traversable {
        self(from, to)
    }
}

/// A* State
// https://doc.rust-lang.org/std/collections/binary_heap/#examples
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
struct AStarNode {
    /// Best guess of the total cost of a path through this node.
    cost: u32,
    position: AxialCoordinate,
}

// The priority queue depends on `Ord`.
// Explicitly implement the trait so the queue becomes a min-heap
// instead of a max-heap.
impl Ord for AStarNode {
    fn cmp(&self, other: &AStarNode) -> std::cmp::Ordering {
        // In case of a tie we compare positions - this step is necessary
        // to make implementations of `PartialEq` and `Ord` consistent.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| self.position.cmp(&other.position))
    }
}

impl PartialOrd for AStarNode {
    fn partial_cmp(&self, other: &AStarNode) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<'g, T, S: Storage<T>> HexagonalGridCalculator<'g, T, S> {
    /// Visit every hexagon reachable from the initial coordinate.
    ///
    /// The starting hexagon is always visited. If the visitor ever returns true,
    /// processing halts and no further hexagons are visited.
    pub fn reachable_from(
        &self,
        from: AxialCoordinate,
        agent: &impl PathingAgent<T>,
        mut visit: impl FnMut(&'g Hexagon<T>) -> bool,
    ) {
        let grid = self.grid();
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        queue.push_back((from, Traversable::Free));

        while let Some((position, traversable)) = queue.pop_front() {
            // we may have scheduled a single hexagon more than once via alternate paths;
            // we should only actually visit once.
            if !visited.insert(position) {
                continue;
            }
            let Some(current) = grid.get(&position) else {
                continue;
            };

            if visit(current) {
                break;
            }

            if traversable == Traversable::Halt {
                continue;
            }
            for neighbor in self.neighbors(position) {
                if visited.contains(&neighbor.coordinate()) {
                    continue;
                }
                match agent.traversable(current, neighbor) {
                    Traversable::Obstructed => {}
                    step => queue.push_back((neighbor.coordinate(), step)),
                }
            }
        }
    }

    /// Navigate between the given coordinates using A*.
    ///
    /// Returns the directions to step in, starting from `from`, or `None` when
    /// either end is outside the grid or no path exists.
    // https://en.wikipedia.org/wiki/A*_search_algorithm#Pseudocode
    pub fn path_to(
        &self,
        from: AxialCoordinate,
        to: AxialCoordinate,
        agent: &impl PathingAgent<T>,
    ) -> Option<Vec<Direction>> {
        let grid = self.grid();
        if !grid.contains(&from) || !grid.contains(&to) {
            return None;
        }

        let mut open_set = BinaryHeap::new();
        open_set.push(AStarNode {
            cost: from.distance(to),
            position: from,
        });

        // key: node
        // value: step into the node, and the node preceding it on the cheapest known path
        let mut came_from = HashMap::new();

        // gscore
        // key: position
        // value: cost of cheapest path from start to node
        let mut cheapest_path_cost = HashMap::new();
        cheapest_path_cost.insert(from, 0_u32);

        // nodes entered through a `Halt` step on their cheapest known path
        let mut halted = HashSet::new();

        while let Some(AStarNode { cost, position }) = open_set.pop() {
            if position == to {
                let mut current = position;
                let mut path = Vec::new();
                while let Some((direction, predecessor)) = came_from.remove(&current) {
                    current = predecessor;
                    path.push(direction);
                }
                debug_assert!(path.len() as u32 >= to.distance(from));
                path.reverse();
                tracing::debug!(%from, %to, steps = path.len(), "found path");
                return Some(path);
            }

            let Some(&path_cost) = cheapest_path_cost.get(&position) else {
                continue;
            };
            // a cheaper route to this node was queued after this entry
            if cost > path_cost.saturating_add(position.distance(to)) {
                continue;
            }
            if halted.contains(&position) {
                continue;
            }
            let Some(current) = grid.get(&position) else {
                continue;
            };

            for direction in Direction::iter() {
                let Some(neighbor) = position.neighbor(direction) else {
                    continue;
                };
                let Some(next) = grid.get(&neighbor) else {
                    continue;
                };
                let traversable = agent.traversable(current, next);
                if traversable == Traversable::Obstructed {
                    continue;
                }

                let tentative_cheapest_path_cost =
                    path_cost.saturating_add(agent.movement_cost(current, next));
                if tentative_cheapest_path_cost
                    < cheapest_path_cost
                        .get(&neighbor)
                        .copied()
                        .unwrap_or(u32::MAX)
                {
                    // this path to the neighbor is better than any previous one
                    came_from.insert(neighbor, (direction, position));
                    cheapest_path_cost.insert(neighbor, tentative_cheapest_path_cost);
                    if traversable == Traversable::Halt {
                        halted.insert(neighbor);
                    } else {
                        halted.remove(&neighbor);
                    }
                    open_set.push(AStarNode {
                        cost: tentative_cheapest_path_cost.saturating_add(neighbor.distance(to)),
                        position: neighbor,
                    });
                }
            }
        }

        tracing::debug!(%from, %to, "no path");
        None
    }
}
