use std::collections::{BinaryHeap, HashMap, HashSet};

use skirm_core::Point;

use crate::distance::manhattan;
use crate::traits::Walkable;

/// Cost of one step, identical for cardinal and diagonal moves.
pub const STEP_COST: i32 = 10;

/// Neighbor evaluation order: E, S, W, N, SE, SW, NW, NE.
const DIRECTIONS: [Point; 8] = [
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
    Point::new(0, -1),
    Point::new(1, 1),
    Point::new(-1, 1),
    Point::new(-1, -1),
    Point::new(1, -1),
];

/// A discovered cell in the search arena. Parent handles index back into
/// the arena; the start node has no parent.
struct Node {
    pos: Point,
    g: i32,
    f: i32,
    parent: Option<usize>,
}

/// Reference into the node arena, ordered for the open heap: smallest `f`
/// first, ties broken by earliest insertion.
#[derive(Clone, Copy, Eq, PartialEq)]
struct OpenRef {
    f: i32,
    seq: u64,
    idx: usize,
}

impl Ord for OpenRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest (f, seq) first.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Best-first shortest-path search over the 8-connected grid.
///
/// All eight directions cost [`STEP_COST`] and the heuristic is Manhattan
/// distance times [`STEP_COST`], so the engine favors diagonal shortcuts:
/// a free-field path covers the Chebyshev distance between its endpoints.
/// Diagonal steps are taken even when both flanking cardinal cells are
/// blocked.
///
/// The search is synchronous and runs to completion in one call. Internal
/// caches (node arena, open heap and index, visited set) are owned by the
/// `Pathfinder` and reused across calls.
#[derive(Default)]
pub struct Pathfinder {
    arena: Vec<Node>,
    heap: BinaryHeap<OpenRef>,
    /// Position -> arena index of the live open entry for that position.
    open: HashMap<Point, usize>,
    visited: HashSet<Point>,
    seq: u64,
}

impl Pathfinder {
    /// Create a new pathfinder with empty caches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute a path from `from` to `to`, walking only cells for which
    /// `world` answers true.
    ///
    /// The returned waypoints run from the first step after `from` through
    /// `to` inclusive; `from` itself is never part of the result. An empty
    /// vector means no path: the endpoints are identical, the destination
    /// is not walkable, or every route is cut off. Callers should treat an
    /// empty result as "stay put" rather than as an error.
    pub fn find_path<W: Walkable>(&mut self, from: Point, to: Point, world: &W) -> Vec<Point> {
        if from == to {
            return Vec::new();
        }
        if !world.walkable(to) {
            return Vec::new();
        }

        self.arena.clear();
        self.heap.clear();
        self.open.clear();
        self.visited.clear();
        self.seq = 0;

        self.push_open(from, 0, manhattan(from, to) * STEP_COST, None);

        while let Some(OpenRef { idx, .. }) = self.heap.pop() {
            let pos = self.arena[idx].pos;
            // A superseded or already-expanded entry; the live one for
            // this position (if any) is elsewhere in the heap.
            if self.open.get(&pos) != Some(&idx) {
                continue;
            }
            self.open.remove(&pos);

            if pos == to {
                return self.reconstruct(idx);
            }

            let g_next = self.arena[idx].g + STEP_COST;
            for dir in DIRECTIONS {
                let next = pos + dir;
                if self.visited.contains(&next) {
                    continue;
                }
                if !world.walkable(next) {
                    continue;
                }
                // Insert undiscovered neighbors; re-insert open ones only
                // when the route through `pos` is strictly cheaper. The
                // replacement takes a fresh insertion rank.
                let improves = match self.open.get(&next).copied() {
                    None => true,
                    Some(old) => self.arena[old].g > g_next,
                };
                if improves {
                    self.push_open(next, g_next, manhattan(next, to) * STEP_COST, Some(idx));
                }
            }

            self.visited.insert(pos);
        }

        // Frontier exhausted without reaching `to`.
        Vec::new()
    }

    fn push_open(&mut self, pos: Point, g: i32, h: i32, parent: Option<usize>) {
        let idx = self.arena.len();
        self.arena.push(Node {
            pos,
            g,
            f: g + h,
            parent,
        });
        self.open.insert(pos, idx);
        self.heap.push(OpenRef {
            f: self.arena[idx].f,
            seq: self.seq,
            idx,
        });
        self.seq += 1;
    }

    /// Walk parent handles back to the start, collecting positions
    /// (excluding the start itself), then reverse into walk order.
    fn reconstruct(&self, goal_idx: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut idx = goal_idx;
        while let Some(parent) = self.arena[idx].parent {
            path.push(self.arena[idx].pos);
            idx = parent;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::chebyshev;

    fn open_field(_: Point) -> bool {
        true
    }

    #[test]
    fn identical_endpoints_yield_empty_path() {
        let mut pf = Pathfinder::new();
        let p = Point::new(3, 3);
        assert!(pf.find_path(p, p, &open_field).is_empty());
    }

    #[test]
    fn unwalkable_destination_yields_empty_path() {
        let mut pf = Pathfinder::new();
        let goal = Point::new(5, 5);
        let world = |p: Point| p != goal;
        assert!(pf.find_path(Point::ZERO, goal, &world).is_empty());
    }

    #[test]
    fn nothing_walkable_yields_empty_path() {
        let mut pf = Pathfinder::new();
        let world = |_: Point| false;
        assert!(
            pf.find_path(Point::ZERO, Point::new(10, 10), &world)
                .is_empty()
        );
    }

    #[test]
    fn enclosed_goal_yields_empty_path() {
        let mut pf = Pathfinder::new();
        let from = Point::ZERO;
        let to = Point::new(5, 5);
        // Only the two endpoints are walkable; no route can exist.
        let world = move |p: Point| p == from || p == to;
        assert!(pf.find_path(from, to, &world).is_empty());
    }

    #[test]
    fn free_field_diagonal_covers_chebyshev_distance() {
        let mut pf = Pathfinder::new();
        let from = Point::ZERO;
        let to = Point::new(10, 10);
        let path = pf.find_path(from, to, &open_field);
        assert_eq!(path.len(), 10);
        assert_eq!(path.len() as i32, chebyshev(from, to));
        assert_eq!(path.last(), Some(&to));
    }

    #[test]
    fn straight_line_walks_straight() {
        let mut pf = Pathfinder::new();
        let path = pf.find_path(Point::ZERO, Point::new(10, 0), &open_field);
        let expected: Vec<Point> = (1..=10).map(|x| Point::new(x, 0)).collect();
        assert_eq!(path, expected);
    }

    #[test]
    fn blocked_line_detours_at_equal_cost() {
        let mut pf = Pathfinder::new();
        // Two cells cut out of the direct row; the diagonal detour costs
        // the same as the straight line, so the path stays at 10 steps.
        let world = |p: Point| {
            if p.y != 0 {
                return true;
            }
            p.x != 4 && p.x != 5
        };
        let path = pf.find_path(Point::ZERO, Point::new(10, 0), &world);
        assert_eq!(path.len(), 10);
        assert_eq!(path.last(), Some(&Point::new(10, 0)));
    }

    #[test]
    fn path_excludes_start_and_ends_at_goal() {
        let mut pf = Pathfinder::new();
        let from = Point::new(2, 3);
        let to = Point::new(7, 5);
        let path = pf.find_path(from, to, &open_field);
        assert!(!path.is_empty());
        assert!(!path.contains(&from));
        assert_eq!(path.last(), Some(&to));
    }

    #[test]
    fn consecutive_waypoints_are_king_moves() {
        let mut pf = Pathfinder::new();
        let from = Point::ZERO;
        let path = pf.find_path(from, Point::new(6, 9), &open_field);
        assert_eq!(chebyshev(from, path[0]), 1);
        for pair in path.windows(2) {
            assert_eq!(chebyshev(pair[0], pair[1]), 1);
        }
    }

    #[test]
    fn diagonal_squeeze_is_permitted() {
        let mut pf = Pathfinder::new();
        // Both cardinal cells flanking the diagonal are blocked; the
        // diagonal step is still taken.
        let world = |p: Point| p != Point::new(1, 0) && p != Point::new(0, 1);
        let path = pf.find_path(Point::ZERO, Point::new(1, 1), &world);
        assert_eq!(path, vec![Point::new(1, 1)]);
    }

    #[test]
    fn repeated_searches_are_identical() {
        let mut pf = Pathfinder::new();
        let world = |p: Point| p.x.rem_euclid(3) != 0 || p.y.rem_euclid(2) != 0;
        let first = pf.find_path(Point::new(1, 1), Point::new(11, 7), &world);
        let second = pf.find_path(Point::new(1, 1), Point::new(11, 7), &world);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
}
