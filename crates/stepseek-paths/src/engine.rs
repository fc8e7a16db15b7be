//! [`SearchEngine`]: one resumable search over a grid, advanced one
//! expansion per [`step`](SearchEngine::step).

use stepseek_core::{Bounds, Coord, Grid};

use crate::bfs::Bfs;
use crate::bidir::Bidirectional;
use crate::dfs::Dfs;
use crate::dls::Dls;
use crate::event::StepEvent;
use crate::iddfs::Iddfs;
use crate::traits::{WeightedPather, path_cost};
use crate::ucs::Ucs;
use crate::variant::{SearchConfig, Variant};

/// Outcome of a single variant step, before it is turned into a
/// [`StepEvent`].
#[derive(Debug)]
pub(crate) enum Step {
    /// A cell was expanded and the search goes on.
    Expanded(Coord),
    /// Nothing was expanded, but the frontier changed.
    Skipped,
    /// `expanded` completed the search.
    Found { expanded: Coord, path: Vec<Coord> },
    Exhausted(crate::event::FailureReason),
}

/// Per-variant continuation data.
#[derive(Clone, Debug)]
enum SearchState {
    Bfs(Bfs),
    Dfs(Dfs),
    Ucs(Ucs),
    Dls(Dls),
    Iddfs(Iddfs),
    Bidirectional(Bidirectional),
}

/// A single search from `start` to `goal`.
///
/// The engine only borrows the grid during [`step`](Self::step), so the
/// grid can be changed between steps. Once a terminal event has been
/// produced, further steps return that same event.
#[derive(Clone, Debug)]
pub struct SearchEngine {
    variant: Variant,
    bounds: Bounds,
    start: Coord,
    goal: Coord,
    state: SearchState,
    /// Distinct expanded cells, in first-expansion order.
    explored: Vec<Coord>,
    explored_mask: Vec<bool>,
    expansions: usize,
    terminal: Option<StepEvent>,
    // shared scratch buffer for neighbour queries
    nbuf: Vec<Coord>,
}

impl SearchEngine {
    /// Create a search over `bounds`. A start outside the bounds yields an
    /// immediately exhausted search.
    pub fn new(
        variant: Variant,
        bounds: Bounds,
        start: Coord,
        goal: Coord,
        config: &SearchConfig,
    ) -> Self {
        let state = match variant {
            Variant::Bfs => SearchState::Bfs(Bfs::new(bounds, start, goal)),
            Variant::Dfs => SearchState::Dfs(Dfs::new(bounds, start, goal)),
            Variant::Ucs => SearchState::Ucs(Ucs::new(bounds, start, goal)),
            Variant::Dls => SearchState::Dls(Dls::new(bounds, start, goal, config.depth_limit)),
            Variant::Iddfs => SearchState::Iddfs(Iddfs::new(
                bounds,
                start,
                goal,
                config.iddfs_bound(bounds),
            )),
            Variant::Bidirectional => {
                SearchState::Bidirectional(Bidirectional::new(bounds, start, goal))
            }
        };
        Self {
            variant,
            bounds,
            start,
            goal,
            state,
            explored: Vec::new(),
            explored_mask: vec![false; bounds.len()],
            expansions: 0,
            terminal: None,
            nbuf: Vec::with_capacity(8),
        }
    }

    /// Create a search between the grid's start and goal cells.
    pub fn for_grid(variant: Variant, grid: &Grid, config: &SearchConfig) -> Self {
        Self::new(variant, grid.bounds(), grid.start(), grid.goal(), config)
    }

    /// Perform exactly one expansion (or one pass transition for IDDFS) and
    /// report it.
    pub fn step<P: WeightedPather>(&mut self, pather: &P) -> StepEvent {
        if let Some(ev) = &self.terminal {
            return ev.clone();
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let step = match &mut self.state {
            SearchState::Bfs(s) => s.step(pather, &mut nbuf),
            SearchState::Dfs(s) => s.step(pather, &mut nbuf),
            SearchState::Ucs(s) => s.step(pather, &mut nbuf),
            SearchState::Dls(s) => s.step(pather, &mut nbuf),
            SearchState::Iddfs(s) => s.step(pather, &mut nbuf),
            SearchState::Bidirectional(s) => s.step(pather, &mut nbuf),
        };
        self.nbuf = nbuf;

        match step {
            Step::Expanded(c) => {
                self.record(c);
                StepEvent::NodeExplored(c)
            }
            Step::Skipped => StepEvent::FrontierUpdated(self.frontier()),
            Step::Found { expanded, path } => {
                self.record(expanded);
                let cost = path_cost(pather, &path);
                log::debug!(
                    "{}: path of {} cells (cost {cost:.3}) after {} expansions",
                    self.variant,
                    path.len(),
                    self.expansions
                );
                self.finish(StepEvent::PathFound { path, cost })
            }
            Step::Exhausted(reason) => {
                log::debug!(
                    "{}: {reason} after {} expansions",
                    self.variant,
                    self.expansions
                );
                self.finish(StepEvent::Failure(reason))
            }
        }
    }

    /// Step until a terminal event is produced.
    pub fn run_to_end<P: WeightedPather>(&mut self, pather: &P) -> StepEvent {
        loop {
            let ev = self.step(pather);
            if ev.is_terminal() {
                return ev;
            }
        }
    }

    fn record(&mut self, c: Coord) {
        self.expansions += 1;
        if let Some(i) = self.bounds.index(c) {
            if !self.explored_mask[i] {
                self.explored_mask[i] = true;
                self.explored.push(c);
            }
        }
    }

    fn finish(&mut self, ev: StepEvent) -> StepEvent {
        self.terminal = Some(ev.clone());
        ev
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Coord {
        self.goal
    }

    /// Whether a terminal event has been produced.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.terminal.is_some()
    }

    /// The terminal event, once there is one.
    pub fn outcome(&self) -> Option<&StepEvent> {
        self.terminal.as_ref()
    }

    /// The path found, if the search succeeded.
    pub fn path(&self) -> Option<&[Coord]> {
        match &self.terminal {
            Some(StepEvent::PathFound { path, .. }) => Some(path),
            _ => None,
        }
    }

    /// Distinct cells expanded so far, in first-expansion order. IDDFS
    /// accumulates across passes.
    pub fn explored(&self) -> &[Coord] {
        &self.explored
    }

    /// Total expansions, counting re-expansions.
    #[inline]
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Cells currently waiting on the frontier. Empty once finished.
    pub fn frontier(&self) -> Vec<Coord> {
        if self.terminal.is_some() {
            return Vec::new();
        }
        match &self.state {
            SearchState::Bfs(s) => s.frontier(),
            SearchState::Dfs(s) => s.frontier(),
            SearchState::Ucs(s) => s.frontier(),
            SearchState::Dls(s) => s.frontier(),
            SearchState::Iddfs(s) => s.frontier(),
            SearchState::Bidirectional(s) => s.frontier(),
        }
    }

    /// Whether `c` has been expanded or put on the frontier, i.e. whether
    /// the search has committed any work through it.
    pub fn is_reached(&self, c: Coord) -> bool {
        if self.bounds.index(c).is_some_and(|i| self.explored_mask[i]) {
            return true;
        }
        match &self.state {
            SearchState::Bfs(s) => s.is_reached(c),
            SearchState::Dfs(s) => s.is_reached(c),
            SearchState::Ucs(s) => s.is_reached(c),
            SearchState::Dls(s) => s.is_reached(c),
            SearchState::Iddfs(s) => s.is_reached(c),
            SearchState::Bidirectional(s) => s.is_reached(c),
        }
    }

    /// Current depth bound, for the depth-limited variants.
    pub fn depth_limit(&self) -> Option<usize> {
        match &self.state {
            SearchState::Dls(s) => Some(s.limit()),
            SearchState::Iddfs(s) => Some(s.limit()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::FailureReason;
    use std::f64::consts::SQRT_2;
    use stepseek_core::DrawMode;

    const EPS: f64 = 1e-9;

    fn run(variant: Variant, grid: &Grid, config: &SearchConfig) -> (SearchEngine, StepEvent) {
        let mut e = SearchEngine::for_grid(variant, grid, config);
        let ev = e.run_to_end(grid);
        (e, ev)
    }

    fn found(ev: &StepEvent) -> (&[Coord], f64) {
        match ev {
            StepEvent::PathFound { path, cost } => (path, *cost),
            other => panic!("expected a path, got {other:?}"),
        }
    }

    fn assert_valid_path(grid: &Grid, path: &[Coord]) {
        assert_eq!(path.first(), Some(&grid.start()));
        assert_eq!(path.last(), Some(&grid.goal()));
        for w in path.windows(2) {
            assert!(w[0].is_adjacent(w[1]), "{} -> {} is not a move", w[0], w[1]);
            assert!(grid.walkable(w[1]));
        }
    }

    /// 20x20 grid with a wall across rows 5..15 of column 10.
    fn walled20() -> Grid {
        let mut g = Grid::new(20, 20).unwrap();
        for r in 5..15 {
            g.toggle_wall(Coord::new(r, 10), DrawMode::Wall).unwrap();
        }
        g
    }

    /// Walls that force a winding route on a 7x7 grid.
    fn maze7() -> Grid {
        let mut g = Grid::new(7, 7).unwrap();
        for c in 0..6 {
            g.toggle_wall(Coord::new(1, c), DrawMode::Wall).unwrap();
        }
        for c in 1..7 {
            g.toggle_wall(Coord::new(3, c), DrawMode::Wall).unwrap();
        }
        for c in 0..6 {
            g.toggle_wall(Coord::new(5, c), DrawMode::Wall).unwrap();
        }
        g
    }

    #[test]
    fn empty_5x5_diagonal_for_bfs_and_ucs() {
        let g = Grid::new(5, 5).unwrap();
        let diagonal: Vec<Coord> = (0..5).map(|i| Coord::new(i, i)).collect();
        for v in [Variant::Bfs, Variant::Ucs] {
            let (_, ev) = run(v, &g, &SearchConfig::default());
            let (path, cost) = found(&ev);
            assert_eq!(path, diagonal.as_slice(), "{v}");
            assert!((cost - 4.0 * SQRT_2).abs() < EPS, "{v}: {cost}");
        }
    }

    #[test]
    fn empty_5x5_dfs_finds_a_path() {
        let g = Grid::new(5, 5).unwrap();
        let (_, ev) = run(Variant::Dfs, &g, &SearchConfig::default());
        let (path, _) = found(&ev);
        assert_valid_path(&g, path);
        assert!(path.len() >= 5);
    }

    #[test]
    fn empty_5x5_dls_limit_3_exceeds_depth() {
        let g = Grid::new(5, 5).unwrap();
        let cfg = SearchConfig {
            depth_limit: 3,
            ..SearchConfig::default()
        };
        let (_, ev) = run(Variant::Dls, &g, &cfg);
        assert_eq!(ev, StepEvent::Failure(FailureReason::DepthExceeded));

        let cfg = SearchConfig {
            depth_limit: 4,
            ..SearchConfig::default()
        };
        let (_, ev) = run(Variant::Dls, &g, &cfg);
        let (path, _) = found(&ev);
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn dls_cutoff_at_fifteen_succeeds_at_sixteen() {
        // Goal sits 16 edges down a corridor.
        let g = Grid::new(17, 1).unwrap();
        let (_, ev) = run(Variant::Dls, &g, &SearchConfig::default());
        assert_eq!(ev, StepEvent::Failure(FailureReason::DepthExceeded));

        let cfg = SearchConfig {
            depth_limit: 16,
            ..SearchConfig::default()
        };
        let (_, ev) = run(Variant::Dls, &g, &cfg);
        let (path, cost) = found(&ev);
        assert_eq!(path.len(), 17);
        assert!((cost - 16.0).abs() < EPS);
    }

    #[test]
    fn dls_reports_not_found_without_cutoff() {
        let mut g = Grid::new(5, 5).unwrap();
        for r in 0..5 {
            g.toggle_wall(Coord::new(r, 2), DrawMode::Wall).unwrap();
        }
        let (_, ev) = run(Variant::Dls, &g, &SearchConfig::default());
        assert_eq!(ev, StepEvent::Failure(FailureReason::NotFound));
    }

    /// 5x5 grid cut in two by a wall on column 2. The start's side holds 10
    /// cells, the farthest 4 edges away.
    fn split5() -> Grid {
        let mut g = Grid::new(5, 5).unwrap();
        for r in 0..5 {
            g.toggle_wall(Coord::new(r, 2), DrawMode::Wall).unwrap();
        }
        g
    }

    #[test]
    fn dls_limit_covering_component_is_not_found() {
        let g = split5();
        for limit in 4..=9 {
            let cfg = SearchConfig {
                depth_limit: limit,
                ..SearchConfig::default()
            };
            let (e, ev) = run(Variant::Dls, &g, &cfg);
            assert_eq!(
                ev,
                StepEvent::Failure(FailureReason::NotFound),
                "limit {limit}"
            );
            assert_eq!(e.explored().len(), 10, "limit {limit}");
        }

        let cfg = SearchConfig {
            depth_limit: 3,
            ..SearchConfig::default()
        };
        let (_, ev) = run(Variant::Dls, &g, &cfg);
        assert_eq!(ev, StepEvent::Failure(FailureReason::DepthExceeded));
    }

    #[test]
    fn iddfs_stops_after_first_pass_without_cutoff() {
        let g = split5();
        let (e, ev) = run(Variant::Iddfs, &g, &SearchConfig::default());
        assert_eq!(ev, StepEvent::Failure(FailureReason::NotFound));
        assert_eq!(e.depth_limit(), Some(4));
        assert_eq!(e.explored().len(), 10);
    }

    #[test]
    fn dls_finds_winding_goal_within_limit() {
        let g = maze7();
        let (_, bfs) = run(Variant::Bfs, &g, &SearchConfig::default());
        let depth = found(&bfs).0.len() - 1;
        let cfg = SearchConfig {
            depth_limit: depth,
            ..SearchConfig::default()
        };
        let (_, ev) = run(Variant::Dls, &g, &cfg);
        let (path, _) = found(&ev);
        assert_valid_path(&g, path);
        assert!(path.len() - 1 <= depth);
    }

    #[test]
    fn every_variant_reports_not_found_behind_a_wall() {
        let mut g = Grid::new(5, 5).unwrap();
        for r in 0..5 {
            g.toggle_wall(Coord::new(r, 2), DrawMode::Wall).unwrap();
        }
        for v in Variant::ALL {
            let (e, ev) = run(v, &g, &SearchConfig::default());
            assert_eq!(ev, StepEvent::Failure(FailureReason::NotFound), "{v}");
            assert!(e.frontier().is_empty());
        }
    }

    #[test]
    fn every_variant_finds_valid_path() {
        for g in [walled20(), maze7()] {
            for v in Variant::ALL {
                let cfg = SearchConfig {
                    depth_limit: 60,
                    ..SearchConfig::default()
                };
                let (_, ev) = run(v, &g, &cfg);
                let (path, cost) = found(&ev);
                assert_valid_path(&g, path);
                assert!((cost - path_cost(&g, path)).abs() < EPS, "{v}");
            }
        }
    }

    #[test]
    fn bfs_path_has_fewest_edges() {
        let g = walled20();
        let (_, bfs) = run(Variant::Bfs, &g, &SearchConfig::default());
        let bfs_len = found(&bfs).0.len();
        // The pure diagonal runs into the wall; detouring below it takes
        // five extra moves each way.
        assert_eq!(bfs_len, 25);
        for v in Variant::ALL {
            let cfg = SearchConfig {
                depth_limit: 60,
                ..SearchConfig::default()
            };
            let (_, ev) = run(v, &g, &cfg);
            assert!(found(&ev).0.len() >= bfs_len, "{v}");
        }
    }

    #[test]
    fn ucs_cost_is_minimal() {
        for g in [walled20(), maze7()] {
            let (_, ucs) = run(Variant::Ucs, &g, &SearchConfig::default());
            let best = found(&ucs).1;
            for v in Variant::ALL {
                let cfg = SearchConfig {
                    depth_limit: 60,
                    ..SearchConfig::default()
                };
                let (_, ev) = run(v, &g, &cfg);
                assert!(found(&ev).1 + EPS >= best, "{v}");
            }
        }
    }

    #[test]
    fn ucs_prefers_one_diagonal_over_two_cardinals() {
        let g = Grid::with_endpoints(3, 3, Coord::new(1, 0), Coord::new(0, 1)).unwrap();
        let (_, ev) = run(Variant::Ucs, &g, &SearchConfig::default());
        let (path, cost) = found(&ev);
        assert_eq!(path, &[Coord::new(1, 0), Coord::new(0, 1)]);
        assert!((cost - SQRT_2).abs() < EPS);
    }

    #[test]
    fn ucs_routes_by_cost_not_edge_count() {
        // Reaching (1,4) from (1,0) takes 4 edges either way; the straight
        // line costs 4, any diagonal detour costs more.
        let g = Grid::with_endpoints(5, 3, Coord::new(1, 0), Coord::new(1, 4)).unwrap();
        let (_, ev) = run(Variant::Ucs, &g, &SearchConfig::default());
        let (path, cost) = found(&ev);
        assert!((cost - 4.0).abs() < EPS);
        assert!(path.iter().all(|c| c.row == 1));
    }

    #[test]
    fn iddfs_matches_bfs_length() {
        for g in [Grid::new(5, 5).unwrap(), maze7(), walled20()] {
            let (_, bfs) = run(Variant::Bfs, &g, &SearchConfig::default());
            let (_, iddfs) = run(Variant::Iddfs, &g, &SearchConfig::default());
            assert_eq!(found(&iddfs).0.len(), found(&bfs).0.len());
        }
    }

    #[test]
    fn iddfs_gives_up_past_max_depth() {
        let g = Grid::new(17, 1).unwrap();
        let cfg = SearchConfig {
            iddfs_max_depth: Some(10),
            ..SearchConfig::default()
        };
        let (e, ev) = run(Variant::Iddfs, &g, &cfg);
        assert_eq!(ev, StepEvent::Failure(FailureReason::NotFound));
        assert_eq!(e.depth_limit(), Some(10));
    }

    #[test]
    fn iddfs_pass_restart_is_a_frontier_update() {
        let g = Grid::new(3, 3).unwrap();
        let mut e = SearchEngine::for_grid(Variant::Iddfs, &g, &SearchConfig::default());
        // Limit 0: expand the start, then the pass runs dry with a cutoff.
        assert_eq!(e.step(&g), StepEvent::NodeExplored(Coord::new(0, 0)));
        assert_eq!(
            e.step(&g),
            StepEvent::FrontierUpdated(vec![Coord::new(0, 0)])
        );
        assert_eq!(e.depth_limit(), Some(1));
    }

    #[test]
    fn bidirectional_explores_no_more_than_bfs() {
        for g in [Grid::new(5, 5).unwrap(), Grid::new(20, 20).unwrap(), walled20()] {
            let (bfs, _) = run(Variant::Bfs, &g, &SearchConfig::default());
            let (bi, ev) = run(Variant::Bidirectional, &g, &SearchConfig::default());
            assert_valid_path(&g, found(&ev).0);
            assert!(bi.explored().len() <= bfs.explored().len());
        }
    }

    #[test]
    fn bidirectional_adjacent_endpoints() {
        let g = Grid::new(2, 1).unwrap();
        let (_, ev) = run(Variant::Bidirectional, &g, &SearchConfig::default());
        assert_eq!(found(&ev).0, &[Coord::new(0, 0), Coord::new(0, 1)]);
    }

    #[test]
    fn bfs_expands_in_clockwise_order() {
        let g = Grid::new(5, 5).unwrap();
        let mut e = SearchEngine::for_grid(Variant::Bfs, &g, &SearchConfig::default());
        assert_eq!(e.step(&g), StepEvent::NodeExplored(Coord::new(0, 0)));
        assert_eq!(
            e.frontier(),
            vec![Coord::new(0, 1), Coord::new(1, 0), Coord::new(1, 1)]
        );
        assert_eq!(e.step(&g), StepEvent::NodeExplored(Coord::new(0, 1)));
    }

    #[test]
    fn dfs_follows_first_clockwise_neighbour() {
        let g = Grid::new(5, 5).unwrap();
        let mut e = SearchEngine::for_grid(Variant::Dfs, &g, &SearchConfig::default());
        e.step(&g);
        // Up is off-grid, so Right comes first.
        assert_eq!(e.step(&g), StepEvent::NodeExplored(Coord::new(0, 1)));
        assert_eq!(e.frontier()[0], Coord::new(0, 2));
    }

    #[test]
    fn terminal_event_repeats() {
        let g = Grid::new(3, 3).unwrap();
        let mut e = SearchEngine::for_grid(Variant::Bfs, &g, &SearchConfig::default());
        let last = e.run_to_end(&g);
        let explored = e.explored().len();
        assert_eq!(e.step(&g), last);
        assert_eq!(e.step(&g), last);
        assert_eq!(e.explored().len(), explored);
        assert!(e.is_finished());
        assert_eq!(e.outcome(), Some(&last));
        assert!(e.path().is_some());
    }

    #[test]
    fn is_reached_tracks_frontier_and_explored() {
        let g = Grid::new(5, 5).unwrap();
        let mut e = SearchEngine::for_grid(Variant::Bfs, &g, &SearchConfig::default());
        assert!(e.is_reached(Coord::new(0, 0)));
        assert!(!e.is_reached(Coord::new(1, 1)));
        e.step(&g);
        assert!(e.is_reached(Coord::new(1, 1)));
        assert!(!e.is_reached(Coord::new(2, 2)));
        assert!(!e.is_reached(Coord::new(9, 9)));
    }

    #[test]
    fn obstacle_between_steps_is_respected() {
        let mut g = Grid::new(3, 1).unwrap();
        let mut e = SearchEngine::for_grid(Variant::Bfs, &g, &SearchConfig::default());
        g.place_obstacle(Coord::new(0, 1)).unwrap();
        assert_eq!(e.step(&g), StepEvent::NodeExplored(Coord::new(0, 0)));
        assert_eq!(e.step(&g), StepEvent::Failure(FailureReason::NotFound));
    }
}
