// src/core/storage/tree.rs

//! An AVL tree keyed by member name, backing `Object`.
//!
//! Nodes live in an arena (`Vec<Option<Node>>` plus a free list) and refer to
//! each other by index. Child links express ownership; the parent link is a
//! plain index kept only so rotations and retracing can walk upwards.
//!
//! Each node stores two separately maintained figures: `height`, which drives
//! rebalancing, and `count`, the member population of its subtree, which makes
//! `len` O(1).

use crate::core::errors::{DocError, DocResult};
use crate::core::value::{Value, try_clone_str};
use std::cmp::Ordering;
use tracing::{debug, trace};

pub(crate) type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left = 0,
    Right = 1,
}

impl Side {
    fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Debug)]
struct Node {
    key: String,
    value: Value,
    parent: Option<NodeId>,
    children: [Option<NodeId>; 2],
    /// Height of the subtree rooted here; a leaf has height 1.
    height: usize,
    /// Number of members in the subtree rooted here.
    count: usize,
}

#[derive(Debug, Default)]
pub struct Tree {
    nodes: Vec<Option<Node>>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
    /// Which neighbour replaces a removed node with two children; flips on every such removal.
    prefer_predecessor: bool,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.count_of(self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the whole tree; 0 when empty.
    pub fn height(&self) -> usize {
        self.height_of(self.root)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.find(key).map(|id| &self.node(id).value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.find(key).map(|id| &mut self.node_mut(id).value)
    }

    /// Inserts a deep copy of `value` under `key`, or replaces the value of an
    /// existing member in place. Returns `true` when a new member was created.
    ///
    /// Key and value are copied and an arena slot is reserved before anything
    /// is linked, so a failed insert leaves the tree as it was.
    pub fn insert(&mut self, key: &str, value: &Value) -> DocResult<bool> {
        let mut parent = None;
        let mut side = Side::Left;
        let mut cursor = self.root;
        while let Some(id) = cursor {
            side = match key.cmp(self.node(id).key.as_str()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    self.node_mut(id).value.modify(value)?;
                    return Ok(false);
                }
            };
            parent = Some(id);
            cursor = self.child(id, side);
        }

        let node = Node {
            key: try_clone_str(key)?,
            value: value.try_clone()?,
            parent,
            children: [None, None],
            height: 1,
            count: 1,
        };
        let id = self.allocate(node)?;
        match parent {
            Some(parent) => self.set_child(parent, side, Some(id)),
            None => self.root = Some(id),
        }
        self.retrace(parent);
        Ok(true)
    }

    /// Unlinks the member stored under `key` and hands back its value.
    pub fn remove(&mut self, key: &str) -> DocResult<Value> {
        let id = self.find(key).ok_or(DocError::NotFound)?;
        let children = self.node(id).children;
        let retrace_from = match children {
            [Some(left), Some(right)] => self.splice_neighbour(id, left, right),
            [child, None] | [None, child] => {
                let parent = self.node(id).parent;
                self.replace_in_parent(id, child);
                parent
            }
        };
        self.retrace(retrace_from);

        let node = self.nodes[id].take().ok_or(DocError::NotFound)?;
        self.free.push(id);
        if self.root.is_none() {
            self.nodes.clear();
            self.free.clear();
        }
        debug!(key, remaining = self.len(), "removed object member");
        Ok(node.value)
    }

    /// Releases every member, children before their parents.
    pub fn clear(&mut self) {
        if let Some(root) = self.root.take() {
            self.release_subtree(root);
        }
        self.nodes.clear();
        self.free.clear();
    }

    /// Rebuilds an isomorphic tree holding deep copies of every key and value.
    pub fn try_clone(&self) -> DocResult<Tree> {
        let mut copy = Tree::new();
        copy.nodes.try_reserve_exact(self.len())?;
        let root = match self.root {
            Some(root) => Some(self.clone_subtree(root, None, &mut copy)?),
            None => None,
        };
        copy.root = root;
        copy.prefer_predecessor = self.prefer_predecessor;
        Ok(copy)
    }

    /// Iterates members in ascending key order.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter {
            tree: self,
            stack: Vec::new(),
            remaining: self.len(),
        };
        iter.descend_left(self.root);
        iter
    }

    /// Iterates mutable values in storage order, which is unrelated to key order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.nodes.iter_mut().flatten().map(|node| &mut node.value)
    }

    /// Verifies ordering, balance, heights, counts and parent links.
    /// Returns a description of the first violation found.
    pub fn check_invariants(&self) -> Result<(), String> {
        if let Some(root) = self.root {
            if self.node(root).parent.is_some() {
                return Err("root has a parent link".into());
            }
            self.check_subtree(root, None, None)?;
        }
        let live = self.nodes.iter().flatten().count();
        if live != self.len() {
            return Err(format!(
                "arena holds {live} live nodes but the root counts {}",
                self.len()
            ));
        }
        Ok(())
    }

    fn check_subtree(
        &self,
        id: NodeId,
        lower: Option<&str>,
        upper: Option<&str>,
    ) -> Result<(usize, usize), String> {
        let node = self.node(id);
        if lower.is_some_and(|lower| node.key.as_str() <= lower)
            || upper.is_some_and(|upper| node.key.as_str() >= upper)
        {
            return Err(format!("key {:?} is out of order", node.key));
        }

        let mut heights = [0, 0];
        let mut counts = [0, 0];
        for side in [Side::Left, Side::Right] {
            let Some(child) = node.children[side as usize] else {
                continue;
            };
            if self.node(child).parent != Some(id) {
                return Err(format!("child of {:?} has a stale parent link", node.key));
            }
            let (lower, upper) = match side {
                Side::Left => (lower, Some(node.key.as_str())),
                Side::Right => (Some(node.key.as_str()), upper),
            };
            (heights[side as usize], counts[side as usize]) =
                self.check_subtree(child, lower, upper)?;
        }

        let height = 1 + heights[0].max(heights[1]);
        let count = 1 + counts[0] + counts[1];
        if heights[0].abs_diff(heights[1]) > 1 {
            return Err(format!("node {:?} is unbalanced", node.key));
        }
        if node.height != height {
            return Err(format!(
                "node {:?} stores height {} but has height {height}",
                node.key, node.height
            ));
        }
        if node.count != count {
            return Err(format!(
                "node {:?} stores count {} but holds {count} members",
                node.key, node.count
            ));
        }
        Ok((height, count))
    }

    fn find(&self, key: &str) -> Option<NodeId> {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let side = match key.cmp(self.node(id).key.as_str()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Some(id),
            };
            cursor = self.child(id, side);
        }
        None
    }

    fn allocate(&mut self, node: Node) -> DocResult<NodeId> {
        if let Some(id) = self.free.pop() {
            self.nodes[id] = Some(node);
            return Ok(id);
        }
        self.nodes.try_reserve(1)?;
        self.nodes.push(Some(node));
        Ok(self.nodes.len() - 1)
    }

    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id].as_ref().expect("linked arena slot is occupied")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id].as_mut().expect("linked arena slot is occupied")
    }

    fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        self.node(id).children[side as usize]
    }

    /// Links `child` under `id` on `side`, pointing the child's parent link back at `id`.
    fn set_child(&mut self, id: NodeId, side: Side, child: Option<NodeId>) {
        self.node_mut(id).children[side as usize] = child;
        if let Some(child) = child {
            self.node_mut(child).parent = Some(id);
        }
    }

    /// Puts `new` where `old` hangs from its parent (or at the root).
    fn replace_in_parent(&mut self, old: NodeId, new: Option<NodeId>) {
        match self.node(old).parent {
            Some(parent) => {
                let side = if self.child(parent, Side::Left) == Some(old) {
                    Side::Left
                } else {
                    Side::Right
                };
                self.set_child(parent, side, new);
            }
            None => {
                self.root = new;
                if let Some(new) = new {
                    self.node_mut(new).parent = None;
                }
            }
        }
    }

    /// Moves the in-order neighbour of `id` into its position. Alternates
    /// between successor and predecessor. Returns the lowest node whose
    /// subtree changed shape.
    fn splice_neighbour(&mut self, id: NodeId, left: NodeId, right: NodeId) -> Option<NodeId> {
        let (side, start) = if self.prefer_predecessor {
            (Side::Left, left)
        } else {
            (Side::Right, right)
        };
        self.prefer_predecessor = !self.prefer_predecessor;
        let inward = side.opposite();

        let mut holder = id;
        let mut replacement = start;
        while let Some(next) = self.child(replacement, inward) {
            holder = replacement;
            replacement = next;
        }

        let retrace_from = if holder == id {
            replacement
        } else {
            let outer = self.child(replacement, side);
            self.set_child(holder, inward, outer);
            self.set_child(replacement, side, Some(start));
            holder
        };
        let other = self.child(id, inward);
        self.set_child(replacement, inward, other);
        self.replace_in_parent(id, Some(replacement));
        Some(retrace_from)
    }

    fn height_of(&self, id: Option<NodeId>) -> usize {
        id.map_or(0, |id| self.node(id).height)
    }

    fn count_of(&self, id: Option<NodeId>) -> usize {
        id.map_or(0, |id| self.node(id).count)
    }

    fn balance_factor(&self, id: NodeId) -> isize {
        let [left, right] = self.node(id).children;
        self.height_of(left) as isize - self.height_of(right) as isize
    }

    fn refresh(&mut self, id: NodeId) {
        let [left, right] = self.node(id).children;
        let height = 1 + self.height_of(left).max(self.height_of(right));
        let count = 1 + self.count_of(left) + self.count_of(right);
        let node = self.node_mut(id);
        node.height = height;
        node.count = count;
    }

    /// Rotates the subtree at `id` towards `side`: the child on the other side
    /// rises into `id`'s place. Returns the new subtree root.
    fn rotate(&mut self, id: NodeId, side: Side) -> NodeId {
        let other = side.opposite();
        let Some(pivot) = self.child(id, other) else {
            return id;
        };
        let inner = self.child(pivot, side);
        self.replace_in_parent(id, Some(pivot));
        self.set_child(id, other, inner);
        self.set_child(pivot, side, Some(id));
        self.refresh(id);
        self.refresh(pivot);
        trace!(?side, "rotated object tree");
        pivot
    }

    /// Recomputes `id`'s figures and restores its balance. Returns the root of
    /// the subtree that now occupies `id`'s position.
    fn rebalance(&mut self, id: NodeId) -> NodeId {
        self.refresh(id);
        let factor = self.balance_factor(id);
        if factor > 1
            && let Some(left) = self.child(id, Side::Left)
        {
            if self.balance_factor(left) < 0 {
                self.rotate(left, Side::Left);
            }
            self.rotate(id, Side::Right)
        } else if factor < -1
            && let Some(right) = self.child(id, Side::Right)
        {
            if self.balance_factor(right) > 0 {
                self.rotate(right, Side::Right);
            }
            self.rotate(id, Side::Left)
        } else {
            id
        }
    }

    /// Walks from `cursor` to the root, rebalancing every ancestor on the way.
    fn retrace(&mut self, mut cursor: Option<NodeId>) {
        while let Some(id) = cursor {
            let top = self.rebalance(id);
            cursor = self.node(top).parent;
        }
    }

    fn clone_subtree(
        &self,
        id: NodeId,
        parent: Option<NodeId>,
        copy: &mut Tree,
    ) -> DocResult<NodeId> {
        let node = self.node(id);
        let new_id = copy.allocate(Node {
            key: try_clone_str(&node.key)?,
            value: node.value.try_clone()?,
            parent,
            children: [None, None],
            height: node.height,
            count: node.count,
        })?;
        for side in [Side::Left, Side::Right] {
            if let Some(child) = node.children[side as usize] {
                let child_copy = self.clone_subtree(child, Some(new_id), copy)?;
                copy.node_mut(new_id).children[side as usize] = Some(child_copy);
            }
        }
        Ok(new_id)
    }

    fn release_subtree(&mut self, id: NodeId) {
        let Some(node) = self.nodes[id].take() else {
            return;
        };
        for child in node.children.into_iter().flatten() {
            self.release_subtree(child);
        }
        drop(node);
    }
}

/// In-order iterator over `(key, value)` pairs.
pub struct Iter<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl Iter<'_> {
    fn descend_left(&mut self, mut cursor: Option<NodeId>) {
        while let Some(id) = cursor {
            self.stack.push(id);
            cursor = self.tree.child(id, Side::Left);
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let tree = self.tree;
        self.descend_left(tree.child(id, Side::Right));
        self.remaining -= 1;
        let node = tree.node(id);
        Some((node.key.as_str(), &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
