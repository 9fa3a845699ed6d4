//! [BSP](https://en.wikipedia.org/wiki/Binary_space_partitioning) tree node structure and operations
//!
//! Every traversal keeps an explicit stack instead of recursing: a convex
//! solid with many faces degenerates into a list-shaped tree whose depth
//! equals its face count.

use crate::mesh::plane::Plane;
use crate::mesh::polygon::Polygon;

/// A BSP tree node, containing polygons plus optional front/back subtrees
#[derive(Debug, Default)]
pub struct Node {
    /// Splitting plane for this node, `None` only for an empty tree.
    pub plane: Option<Plane>,

    /// Polygons in *front* half‑spaces.
    pub front: Option<Box<Node>>,

    /// Polygons in *back* half‑spaces.
    pub back: Option<Box<Node>>,

    /// Polygons that lie on `plane`.
    pub polygons: Vec<Polygon>,
}

impl Node {
    /// Create a new empty BSP node
    pub const fn new() -> Self {
        Self {
            plane: None,
            front: None,
            back: None,
            polygons: Vec::new(),
        }
    }

    /// Creates a new BSP node from polygons
    pub fn from_polygons(polygons: &[Polygon]) -> Self {
        let mut node = Self::new();
        if !polygons.is_empty() {
            node.build(polygons);
        }
        node
    }

    /// Convert solid space to empty space and empty space to solid space.
    pub fn invert(&mut self) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            node.polygons.iter_mut().for_each(|p| p.flip());
            if let Some(plane) = node.plane.as_mut() {
                plane.flip();
            }
            std::mem::swap(&mut node.front, &mut node.back);
            if let Some(front) = node.front.as_deref_mut() {
                stack.push(front);
            }
            if let Some(back) = node.back.as_deref_mut() {
                stack.push(back);
            }
        }
    }

    /// Recursively remove all polygons in `polygons` that are inside this BSP tree.
    ///
    /// Fragments reaching a missing back child are inside the solid and
    /// dropped, fragments reaching a missing front child are kept.
    pub fn clip_polygons(&self, polygons: &[Polygon]) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack: Vec<(&Node, Vec<Polygon>)> = vec![(self, polygons.to_vec())];

        while let Some((node, polygons)) = stack.pop() {
            let Some(plane) = node.plane.as_ref() else {
                result.extend(polygons);
                continue;
            };

            let mut front_parts = Vec::new();
            let mut back_parts = Vec::new();
            for polygon in &polygons {
                let (coplanar_front, coplanar_back, front, back) = plane.split_polygon(polygon);
                front_parts.extend(coplanar_front);
                front_parts.extend(front);
                back_parts.extend(coplanar_back);
                back_parts.extend(back);
            }

            match node.front.as_deref() {
                Some(front) => stack.push((front, front_parts)),
                None => result.extend(front_parts),
            }
            if let Some(back) = node.back.as_deref() {
                stack.push((back, back_parts));
            }
        }

        result
    }

    /// Remove all polygons in this BSP tree that are inside the other BSP tree
    pub fn clip_to(&mut self, bsp: &Node) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            node.polygons = bsp.clip_polygons(&node.polygons);
            if let Some(front) = node.front.as_deref_mut() {
                stack.push(front);
            }
            if let Some(back) = node.back.as_deref_mut() {
                stack.push(back);
            }
        }
    }

    /// Return all polygons in this BSP tree
    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            result.extend_from_slice(&node.polygons);
            stack.extend(node.front.as_deref());
            stack.extend(node.back.as_deref());
        }
        result
    }

    /// Build a BSP tree from the given polygons.
    ///
    /// Can be called on an existing tree to add polygons; each new polygon
    /// is filtered down to the leaf it belongs to. The first polygon
    /// reaching an empty node lends its plane as the splitter.
    pub fn build(&mut self, polygons: &[Polygon]) {
        let mut stack: Vec<(&mut Node, Vec<Polygon>)> = vec![(self, polygons.to_vec())];

        while let Some((node, polygons)) = stack.pop() {
            let Some(first) = polygons.first() else {
                continue;
            };
            let Node {
                plane,
                front,
                back,
                polygons: coplanar,
            } = node;
            let splitter = plane.get_or_insert_with(|| first.plane.clone()).clone();

            let mut front_parts = Vec::new();
            let mut back_parts = Vec::new();
            for polygon in &polygons {
                let (coplanar_front, coplanar_back, f, b) = splitter.split_polygon(polygon);
                coplanar.extend(coplanar_front);
                coplanar.extend(coplanar_back);
                front_parts.extend(f);
                back_parts.extend(b);
            }

            if !front_parts.is_empty() {
                let child = front.get_or_insert_with(|| Box::new(Node::new()));
                stack.push((&mut **child, front_parts));
            }
            if !back_parts.is_empty() {
                let child = back.get_or_insert_with(|| Box::new(Node::new()));
                stack.push((&mut **child, back_parts));
            }
        }
    }
}

impl Drop for Node {
    // Unlink children iteratively so dropping a deep tree cannot exhaust the stack.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node>> = Vec::new();
        stack.extend(self.front.take());
        stack.extend(self.back.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.front.take());
            stack.extend(node.back.take());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn square(z: f64) -> Polygon {
        let points = [
            Point3::new(0.0, 0.0, z),
            Point3::new(1.0, 0.0, z),
            Point3::new(1.0, 1.0, z),
            Point3::new(0.0, 1.0, z),
        ];
        Polygon::from_points(&points).unwrap()
    }

    #[test]
    fn deep_list_tree_does_not_overflow() {
        // Parallel planes stack into a chain as deep as the input.
        let polygons: Vec<Polygon> = (0..5_000).map(|i| square(i as f64)).collect();
        let mut node = Node::from_polygons(&polygons);
        assert_eq!(node.all_polygons().len(), polygons.len());
        node.invert();
        node.clip_to(&Node::from_polygons(&[square(-0.5)]));
        assert_eq!(node.all_polygons().len(), polygons.len());
    }

    #[test]
    fn clip_drops_back_fragments() {
        // Half space z < 0.5 is solid.
        let tree = Node::from_polygons(&[square(0.5)]);
        let below = square(0.0);
        let above = square(1.0);
        let clipped = tree.clip_polygons(&[below, above.clone()]);
        assert_eq!(clipped, vec![above]);
    }
}
