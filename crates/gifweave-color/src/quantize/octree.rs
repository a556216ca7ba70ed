//! Octree quantization
//!
//! Each distinct color is routed down an 8-level tree by the successive
//! high-to-low bits of its 8-bit channels. Whenever an insertion leaves more
//! leaves than the target, the most recently created node on the deepest
//! level that still has children is collapsed into a leaf, so the tree stays
//! bounded while it is built rather than only at the end.
//!
//! Nodes live in an arena and refer to each other by index. Each level keeps
//! an intrusive list (through [`Node::next`]) of its internal nodes, which
//! are exactly the nodes eligible for reduction.

use super::{ColorQuantizer, check_max_colors};
use crate::ColorResult;
use gifweave_core::{Color, ColorMultiset};
use log::trace;

/// Depth of the tree: one level per bit of an 8-bit channel
const MAX_DEPTH: usize = 8;

const ROOT: usize = 0;

/// Octree quantizer
#[derive(Debug, Clone, Copy, Default)]
pub struct OctreeQuantizer;

impl ColorQuantizer for OctreeQuantizer {
    fn quantize(&self, population: &ColorMultiset, max_colors: usize) -> ColorResult<Vec<Color>> {
        check_max_colors(max_colors)?;
        // The tree keys on 8-bit channels, which would merge colors closer
        // than one step
        if population.distinct_len() <= max_colors {
            return Ok(population.distinct());
        }

        let mut tree = Octree::new();
        for (color, count) in population.iter() {
            tree.insert(color, count);
            while tree.leaf_count > max_colors {
                if !tree.reduce() {
                    break;
                }
            }
        }
        trace!(
            "octree: {} leaves from {} distinct colors",
            tree.leaf_count,
            population.distinct_len()
        );

        let mut palette = Vec::with_capacity(tree.leaf_count);
        tree.collect_palette(ROOT, &mut palette);
        Ok(palette)
    }
}

#[derive(Debug, Clone, Default)]
struct Node {
    children: [Option<usize>; 8],
    is_leaf: bool,
    /// Pixel count and weighted component sums of everything merged here
    count: usize,
    sum: Color,
    /// First color merged here, and whether any other color followed it
    sample: Color,
    mixed: bool,
    /// Next internal node on the same level
    next: Option<usize>,
}

impl Node {
    fn absorb(&mut self, sample: Color, sum: Color, count: usize, mixed: bool) {
        if count == 0 {
            return;
        }
        if self.count == 0 {
            self.sample = sample;
            self.mixed = mixed;
        } else {
            self.mixed |= mixed || sample != self.sample;
        }
        self.count += count;
        self.sum = self.sum + sum;
    }

    fn color(&self) -> Color {
        if self.mixed {
            self.sum.scale(1.0 / self.count as f64)
        } else {
            self.sample
        }
    }
}

struct Octree {
    nodes: Vec<Node>,
    free: Vec<usize>,
    reducible: [Option<usize>; MAX_DEPTH],
    leaf_count: usize,
}

impl Octree {
    fn new() -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            free: Vec::new(),
            reducible: [None; MAX_DEPTH],
            leaf_count: 0,
        };
        tree.create_node(0);
        tree
    }

    fn create_node(&mut self, level: usize) -> usize {
        let node = Node {
            is_leaf: level == MAX_DEPTH,
            ..Node::default()
        };
        let id = match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };

        if level == MAX_DEPTH {
            self.leaf_count += 1;
        } else {
            self.nodes[id].next = self.reducible[level];
            self.reducible[level] = Some(id);
        }
        id
    }

    fn insert(&mut self, color: Color, count: usize) {
        let (r, g, b) = color.to_rgb8();
        let mut id = ROOT;
        let mut level = 0;
        while !self.nodes[id].is_leaf {
            let slot = child_slot(r, g, b, level);
            id = match self.nodes[id].children[slot] {
                Some(child) => child,
                None => {
                    let child = self.create_node(level + 1);
                    self.nodes[id].children[slot] = Some(child);
                    child
                }
            };
            level += 1;
        }
        self.nodes[id].absorb(color, color.scale(count as f64), count, false);
    }

    /// Collapse one node into a leaf. Returns `false` if no node is left to
    /// collapse.
    fn reduce(&mut self) -> bool {
        let Some(level) = (0..MAX_DEPTH).rev().find(|&l| self.reducible[l].is_some()) else {
            return false;
        };
        let Some(id) = self.reducible[level] else {
            return false;
        };
        self.reducible[level] = self.nodes[id].next.take();

        let children = std::mem::take(&mut self.nodes[id].children);
        for child in children.into_iter().flatten() {
            let Node {
                sample,
                sum,
                count,
                mixed,
                ..
            } = std::mem::take(&mut self.nodes[child]);
            self.nodes[id].absorb(sample, sum, count, mixed);
            self.free.push(child);
            self.leaf_count -= 1;
        }
        self.nodes[id].is_leaf = true;
        self.leaf_count += 1;
        true
    }

    fn collect_palette(&self, id: usize, palette: &mut Vec<Color>) {
        let node = &self.nodes[id];
        if node.is_leaf {
            if node.count > 0 {
                palette.push(node.color());
            }
            return;
        }
        for child in node.children.iter().flatten() {
            self.collect_palette(*child, palette);
        }
    }
}

/// Child slot for the bit of each channel at `level` (red high, blue low).
fn child_slot(r: u8, g: u8, b: u8, level: usize) -> usize {
    let shift = 7 - level;
    let r_bit = ((r >> shift) & 1) as usize;
    let g_bit = ((g >> shift) & 1) as usize;
    let b_bit = ((b >> shift) & 1) as usize;
    (r_bit << 2) | (g_bit << 1) | b_bit
}
