use std::sync::Arc;

use anyhow::{bail, Result};

use crate::core::bbox::Bbox;
use crate::core::intersection::Intersection;
use crate::core::ray::Ray;
use crate::core::rng::Rng;
use crate::primitive::{Primitive, PrimitiveT};

const MAX_LEAF_SIZE: usize = 4;

#[derive(Debug)]
struct BvhNode {
    lc: Option<Box<BvhNode>>,
    rc: Option<Box<BvhNode>>,
    bbox: Bbox,
    start: usize,
    end: usize,
}

impl BvhNode {
    fn is_leaf(&self) -> bool {
        self.lc.is_none()
    }
}

/// Bounding volume hierarchy over a fixed set of primitives.
///
/// Built once for the shutter interval; node boxes are cached at build
/// time and never recomputed, so a query's `time0`/`time1` are ignored.
/// Interior nodes are split with a surface-area-heuristic sweep along the
/// widest centroid axis.
#[derive(Debug)]
pub struct BvhAccel {
    root: Option<Box<BvhNode>>,
    primitives: Vec<Arc<Primitive>>,
}

impl BvhAccel {
    pub fn new(primitives: Vec<Arc<Primitive>>, time0: f32, time1: f32) -> Result<Self> {
        if primitives.is_empty() {
            return Ok(Self {
                root: None,
                primitives,
            });
        }

        let mut items = Vec::with_capacity(primitives.len());
        for primitive in primitives {
            let bbox = primitive.bbox(time0, time1);
            if bbox.is_empty() {
                bail!("bvh: primitive has no valid bounding box");
            }
            items.push((primitive, bbox));
        }

        let root = build_node(&mut items, 0);
        Ok(Self {
            root: Some(root),
            primitives: items.into_iter().map(|(primitive, _)| primitive).collect(),
        })
    }
}

fn build_node(items: &mut [(Arc<Primitive>, Bbox)], offset: usize) -> Box<BvhNode> {
    let len = items.len();
    let bbox = items
        .iter()
        .fold(Bbox::empty(), |bbox, (_, b)| bbox.merge(*b));

    if len <= MAX_LEAF_SIZE {
        return Box::new(BvhNode {
            lc: None,
            rc: None,
            bbox,
            start: offset,
            end: offset + len,
        });
    }

    let centroid_bounds = items.iter().fold(Bbox::empty(), |bounds, (_, b)| {
        bounds.merge(Bbox::new(b.centroid(), b.centroid()))
    });
    let extent = centroid_bounds.p_max - centroid_bounds.p_min;
    let axis = if extent.x >= extent.y && extent.x >= extent.z {
        0
    } else if extent.y >= extent.z {
        1
    } else {
        2
    };

    items.sort_by(|(_, a), (_, b)| {
        let ka = a.centroid()[axis];
        let kb = b.centroid()[axis];
        ka.partial_cmp(&kb).unwrap_or(std::cmp::Ordering::Equal)
    });

    // suffix[i] bounds items[i..]
    let mut suffix = vec![Bbox::empty(); len];
    suffix[len - 1] = items[len - 1].1;
    for i in (0..len - 1).rev() {
        suffix[i] = suffix[i + 1].merge(items[i].1);
    }

    let mut best_cost = f32::MAX;
    let mut best_mid = len / 2;
    let mut prefix = Bbox::empty();
    for mid in 1..len {
        prefix = prefix.merge(items[mid - 1].1);
        let cost = prefix.surface_area() * mid as f32
            + suffix[mid].surface_area() * (len - mid) as f32;
        if cost < best_cost {
            best_cost = cost;
            best_mid = mid;
        }
    }

    let (left, right) = items.split_at_mut(best_mid);
    let lc = build_node(left, offset);
    let rc = build_node(right, offset + best_mid);
    Box::new(BvhNode {
        lc: Some(lc),
        rc: Some(rc),
        bbox,
        start: offset,
        end: offset + len,
    })
}

impl PrimitiveT for BvhAccel {
    fn intersect(&self, ray: &Ray, inter: &mut Intersection, rng: &mut Rng) -> bool {
        let root = match &self.root {
            Some(root) => root,
            None => return false,
        };

        let mut hit = false;
        let mut stack = vec![root.as_ref()];
        while let Some(node) = stack.pop() {
            if !node.bbox.intersect_test(ray, inter.t) {
                continue;
            }
            if node.is_leaf() {
                for primitive in &self.primitives[node.start..node.end] {
                    hit |= primitive.intersect(ray, inter, rng);
                }
            } else {
                if let Some(lc) = &node.lc {
                    stack.push(lc);
                }
                if let Some(rc) = &node.rc {
                    stack.push(rc);
                }
            }
        }
        hit
    }

    fn bbox(&self, _time0: f32, _time1: f32) -> Bbox {
        match &self.root {
            Some(root) => root.bbox,
            None => Bbox::empty(),
        }
    }

    fn pdf(&self, origin: glam::Vec3A, direction: glam::Vec3A, rng: &mut Rng) -> f32 {
        if self.primitives.is_empty() {
            return 0.0;
        }
        let sum: f32 = self
            .primitives
            .iter()
            .map(|primitive| primitive.pdf(origin, direction, rng))
            .sum();
        sum / self.primitives.len() as f32
    }

    fn sample_direction(&self, origin: glam::Vec3A, rng: &mut Rng) -> glam::Vec3A {
        if self.primitives.is_empty() {
            return glam::Vec3A::X;
        }
        let index =
            (rng.uniform_1d() * self.primitives.len() as f32) as usize % self.primitives.len();
        self.primitives[index].sample_direction(origin, rng)
    }
}
