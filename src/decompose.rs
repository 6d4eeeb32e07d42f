//! Skeleton → ordered pixel paths.
//!
//! Set pixels of a skeleton mask are treated as nodes of an implicit graph
//! under 8-connectivity; neighbors are looked up on the fly against the mask,
//! no adjacency structure is materialized. Node classes follow the degree:
//!
//! - degree 0: isolated
//! - degree 1: endpoint
//! - degree 2: interior
//! - degree ≥ 3: branch
//!
//! Walks are seeded in row-major order, first from unvisited endpoints and
//! then, once those are exhausted, from any unvisited pixel (pure loops have
//! no endpoint). A walk appends unvisited neighbors (edge-adjacent before
//! diagonal) until it dead-ends, steps onto a branch pixel, or closes back on
//! its own start. Walks are iterative so large or heavily branched skeletons
//! never hit a recursion limit.
//!
//! Invariants
//! - Every set pixel lands on at least one emitted path.
//! - A branch pixel is interior to at most one path; it may terminate several.
//! - Each pixel is walked once, so the cost is linear in the pixel count.
use crate::image::mask::NEIGHBORS_8;
use crate::image::BinaryMask;
use crate::types::PixelPath;
use log::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Isolated,
    Endpoint,
    Interior,
    Branch,
}

impl NodeKind {
    pub fn from_degree(degree: usize) -> Self {
        match degree {
            0 => NodeKind::Isolated,
            1 => NodeKind::Endpoint,
            2 => NodeKind::Interior,
            _ => NodeKind::Branch,
        }
    }
}

/// Classify a set pixel of `skel` by its 8-neighbor degree.
pub fn classify(skel: &BinaryMask, x: usize, y: usize) -> NodeKind {
    NodeKind::from_degree(skel.degree(x, y))
}

/// Decompose a skeleton into raw paths covering every set pixel.
///
/// Paths come out in seeding order. Single-pixel paths (isolated pixels or
/// leftovers between branch pixels) are emitted as well; canonicalization
/// drops them later.
pub fn decompose_skeleton(skel: &BinaryMask) -> Vec<PixelPath> {
    PathWalker::new(skel).run()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WalkEnd {
    DeadEnd,
    Branch,
    Closed,
}

struct PathWalker<'a> {
    skel: &'a BinaryMask,
    visited: Vec<bool>,
    paths: Vec<PixelPath>,
}

impl<'a> PathWalker<'a> {
    fn new(skel: &'a BinaryMask) -> Self {
        Self {
            skel,
            visited: vec![false; skel.w * skel.h],
            paths: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<PixelPath> {
        let pixels: Vec<[usize; 2]> = self.skel.iter_set().collect();
        let endpoints: Vec<[usize; 2]> = pixels
            .iter()
            .copied()
            .filter(|&[x, y]| self.kind(x, y) == NodeKind::Endpoint)
            .collect();

        for &seed in &endpoints {
            if !self.is_visited(seed) {
                self.trace_from_endpoint(seed);
            }
        }
        for &seed in &pixels {
            if !self.is_visited(seed) {
                self.trace_from_any(seed);
            }
        }

        debug!(
            "decompose_skeleton: pixels={} endpoints={} paths={}",
            pixels.len(),
            endpoints.len(),
            self.paths.len()
        );
        self.paths
    }

    fn trace_from_endpoint(&mut self, seed: [usize; 2]) {
        self.mark(seed);
        let mut path = vec![seed];
        self.walk(&mut path, true, None);
        self.paths.push(path);
    }

    /// Seed inside a chain or loop: walk forward, and unless the walk closed,
    /// walk the other way from the seed and join both halves.
    fn trace_from_any(&mut self, seed: [usize; 2]) {
        self.mark(seed);
        let mut forward = vec![seed];
        if self.walk(&mut forward, true, None) == WalkEnd::Closed {
            self.paths.push(forward);
            return;
        }

        let mut backward = vec![seed];
        self.walk(&mut backward, false, forward.get(1).copied());
        if backward.len() == 1 {
            self.paths.push(forward);
            return;
        }

        let mut path: PixelPath = Vec::with_capacity(backward.len() + forward.len() - 1);
        path.extend(backward.iter().skip(1).rev());
        path.extend(forward);
        self.paths.push(path);
    }

    /// Extend `path` from its last pixel; `avoid` is never joined as a
    /// terminal branch pixel.
    fn walk(
        &mut self,
        path: &mut PixelPath,
        allow_close: bool,
        avoid: Option<[usize; 2]>,
    ) -> WalkEnd {
        let start = path[0];
        loop {
            let cur = path[path.len() - 1];
            if let Some(next) = self.next_unvisited(cur) {
                self.mark(next);
                path.push(next);
                if self.kind(next[0], next[1]) == NodeKind::Branch {
                    return WalkEnd::Branch;
                }
                continue;
            }

            if allow_close && path.len() >= 3 && is_adjacent(cur, start) {
                path.push(start);
                return WalkEnd::Closed;
            }

            let prev = (path.len() >= 2).then(|| path[path.len() - 2]);
            let join = self.neighbors(cur).find(|&n| {
                self.is_visited(n)
                    && Some(n) != prev
                    && Some(n) != avoid
                    && n != start
                    && self.kind(n[0], n[1]) == NodeKind::Branch
            });
            return match join {
                Some(b) => {
                    path.push(b);
                    WalkEnd::Branch
                }
                None => WalkEnd::DeadEnd,
            };
        }
    }

    fn next_unvisited(&self, p: [usize; 2]) -> Option<[usize; 2]> {
        self.neighbors(p).find(|&n| !self.is_visited(n))
    }

    /// Set 8-neighbors of `p`, edge-adjacent first.
    fn neighbors(&self, p: [usize; 2]) -> impl Iterator<Item = [usize; 2]> + '_ {
        let (x, y) = (p[0] as isize, p[1] as isize);
        NEIGHBORS_8.iter().filter_map(move |&(dx, dy)| {
            let (nx, ny) = (x + dx, y + dy);
            self.skel
                .get_signed(nx, ny)
                .then_some([nx as usize, ny as usize])
        })
    }

    #[inline]
    fn kind(&self, x: usize, y: usize) -> NodeKind {
        classify(self.skel, x, y)
    }

    #[inline]
    fn is_visited(&self, p: [usize; 2]) -> bool {
        self.visited[self.skel.idx(p[0], p[1])]
    }

    #[inline]
    fn mark(&mut self, p: [usize; 2]) {
        let i = self.skel.idx(p[0], p[1]);
        self.visited[i] = true;
    }
}

#[inline]
fn is_adjacent(a: [usize; 2], b: [usize; 2]) -> bool {
    a != b && a[0].abs_diff(b[0]) <= 1 && a[1].abs_diff(b[1]) <= 1
}
