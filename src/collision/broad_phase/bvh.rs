use crate::geometry::Aabb;
use crate::world::ColliderHandle;

#[derive(Debug, Clone, Copy)]
enum Link {
    Leaf(ColliderHandle),
    /// Two children and the number of leaves below them
    Branch { children: [u32; 2], leaves: u32 },
}

#[derive(Debug, Clone, Copy)]
struct Node {
    bounds: Aabb,
    parent: Option<u32>,
    link: Link,
}

impl Node {
    fn leaf_count(&self) -> u32 {
        match self.link {
            Link::Leaf(_) => 1,
            Link::Branch { leaves, .. } => leaves,
        }
    }
}

/// Broad-phase tree over collider boxes.
///
/// Leaves hold "fat" boxes grown by a margin. A collider only moves in the tree once its box
/// leaves the fat box. Insertion walks down toward the child whose box grows least.
#[derive(Debug)]
pub struct Bvh {
    nodes: Vec<Node>,
    vacant: Vec<u32>,
    root: Option<u32>,
    /// Leaf node of each collider slot
    leaves: Vec<Option<u32>>,
    margin: f32,
}

impl Bvh {
    /// Creates an empty tree whose leaves are grown by `margin` on every side
    pub fn with_margin(margin: f32) -> Self {
        Self {
            nodes: Vec::new(),
            vacant: Vec::new(),
            root: None,
            leaves: Vec::new(),
            margin,
        }
    }

    pub fn insert(&mut self, handle: ColliderHandle, aabb: Aabb) {
        let leaf = self.allocate(Node {
            bounds: aabb.expand(self.margin),
            parent: None,
            link: Link::Leaf(handle),
        });

        let slot = handle.index();
        if slot >= self.leaves.len() {
            self.leaves.resize(slot + 1, None);
        }
        self.leaves[slot] = Some(leaf);
        self.attach(leaf);
    }

    /// Removes a collider; unknown handles are ignored
    pub fn remove(&mut self, handle: ColliderHandle) {
        let Some(leaf) = self.leaves.get_mut(handle.index()).and_then(Option::take) else {
            return;
        };
        self.detach(leaf);
        self.vacant.push(leaf);
    }

    /// Refreshes a collider's box. Returns true if its leaf had to move.
    pub fn update(&mut self, handle: ColliderHandle, aabb: Aabb) -> bool {
        let Some(leaf) = self.leaves.get(handle.index()).copied().flatten() else {
            return false;
        };
        if self.nodes[leaf as usize].bounds.contains_aabb(aabb) {
            return false;
        }

        self.detach(leaf);
        self.nodes[leaf as usize].bounds = aabb.expand(self.margin);
        self.attach(leaf);
        true
    }

    /// Every pair of colliders whose fat boxes overlap, lower slot first
    pub fn query_pairs(&self) -> Vec<(ColliderHandle, ColliderHandle)> {
        let mut pairs = Vec::new();
        if let Some(root) = self.root {
            self.pairs_within(root, &mut pairs);
        }
        pairs
    }

    fn pairs_within(&self, node: u32, pairs: &mut Vec<(ColliderHandle, ColliderHandle)>) {
        if let Link::Branch { children: [a, b], .. } = self.nodes[node as usize].link {
            self.pairs_within(a, pairs);
            self.pairs_within(b, pairs);
            self.pairs_between(a, b, pairs);
        }
    }

    /// Pairs with one leaf under `a` and the other under `b`
    fn pairs_between(&self, a: u32, b: u32, pairs: &mut Vec<(ColliderHandle, ColliderHandle)>) {
        let (node_a, node_b) = (&self.nodes[a as usize], &self.nodes[b as usize]);
        if !node_a.bounds.intersects(node_b.bounds) {
            return;
        }

        match (node_a.link, node_b.link) {
            (Link::Leaf(x), Link::Leaf(y)) => {
                pairs.push(if x.0 < y.0 { (x, y) } else { (y, x) });
            }
            (Link::Leaf(_), Link::Branch { children, .. }) => {
                for child in children {
                    self.pairs_between(a, child, pairs);
                }
            }
            (Link::Branch { children, .. }, _) => {
                for child in children {
                    self.pairs_between(child, b, pairs);
                }
            }
        }
    }

    /// Links a detached leaf into the tree
    fn attach(&mut self, leaf: u32) {
        let bounds = self.nodes[leaf as usize].bounds;
        let Some(mut current) = self.root else {
            self.root = Some(leaf);
            return;
        };

        // Boxes grow on the way down; the walk ends at the leaf that becomes the sibling
        while let Link::Branch { children, leaves } = self.nodes[current as usize].link {
            let node = &mut self.nodes[current as usize];
            node.bounds = node.bounds.union(bounds);
            node.link = Link::Branch {
                children,
                leaves: leaves + 1,
            };
            current = self.cheaper_child(children, bounds);
        }

        let sibling = current;
        let parent = self.nodes[sibling as usize].parent;
        let branch = self.allocate(Node {
            bounds: bounds.union(self.nodes[sibling as usize].bounds),
            parent,
            link: Link::Branch {
                children: [sibling, leaf],
                leaves: 2,
            },
        });
        self.nodes[sibling as usize].parent = Some(branch);
        self.nodes[leaf as usize].parent = Some(branch);

        match parent {
            Some(parent) => self.replace_child(parent, sibling, branch),
            None => self.root = Some(branch),
        }
    }

    /// Unlinks a leaf and collapses its parent into the sibling
    fn detach(&mut self, leaf: u32) {
        let Some(parent) = self.nodes[leaf as usize].parent.take() else {
            self.root = None;
            return;
        };
        let Link::Branch { children, .. } = self.nodes[parent as usize].link else {
            return;
        };

        let sibling = if children[0] == leaf {
            children[1]
        } else {
            children[0]
        };
        let grandparent = self.nodes[parent as usize].parent;
        self.nodes[sibling as usize].parent = grandparent;

        match grandparent {
            Some(grandparent) => {
                self.replace_child(grandparent, parent, sibling);
                self.refit(grandparent);
            }
            None => self.root = Some(sibling),
        }
        self.vacant.push(parent);
    }

    /// Child whose box grows least when `bounds` is added; ties go to the smaller subtree
    fn cheaper_child(&self, children: [u32; 2], bounds: Aabb) -> u32 {
        let [a, b] = children.map(|child| {
            let node = &self.nodes[child as usize];
            let growth = node.bounds.union(bounds).surface_area() - node.bounds.surface_area();
            (growth, node.leaf_count())
        });

        if a.0 < b.0 || (a.0 == b.0 && a.1 <= b.1) {
            children[0]
        } else {
            children[1]
        }
    }

    fn replace_child(&mut self, parent: u32, old: u32, new: u32) {
        if let Link::Branch { children, .. } = &mut self.nodes[parent as usize].link {
            if let Some(child) = children.iter_mut().find(|child| **child == old) {
                *child = new;
            }
        }
    }

    /// Recomputes boxes and leaf counts from `start` up to the root
    fn refit(&mut self, start: u32) {
        let mut current = Some(start);

        while let Some(index) = current {
            if let Link::Branch { children: [a, b], .. } = self.nodes[index as usize].link {
                let (left, right) = (self.nodes[a as usize], self.nodes[b as usize]);
                let node = &mut self.nodes[index as usize];
                node.bounds = left.bounds.union(right.bounds);
                node.link = Link::Branch {
                    children: [a, b],
                    leaves: left.leaf_count() + right.leaf_count(),
                };
            }
            current = self.nodes[index as usize].parent;
        }
    }

    fn allocate(&mut self, node: Node) -> u32 {
        match self.vacant.pop() {
            Some(index) => {
                self.nodes[index as usize] = node;
                index
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() as u32 - 1
            }
        }
    }
}
