use core::borrow::Borrow;
use core::cmp::Ordering;

use alloc::vec::Vec;

use super::arena::{Arena, Handle};
use super::node::AvlNode;

/// The core height-balanced tree backing `AvlSet`.
///
/// Nodes live in a slot arena and link to their children by handle, so a
/// rotation is a handful of index swaps rather than an ownership shuffle.
/// Every mutating helper takes the handle of a subtree root and returns the
/// (possibly different) handle of the subtree root after the operation; the
/// caller reattaches it. That is how a rotation deep in the tree propagates
/// upward without parent pointers.
#[derive(Clone)]
pub(crate) struct RawAvlTree<T> {
    /// Arena storing all tree nodes.
    nodes: Arena<AvlNode<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Total number of elements in the tree.
    len: usize,
}

impl<T> RawAvlTree<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates a new tree with slots pre-allocated for `capacity` elements.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    /// Returns the number of elements in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the capacity of the node arena.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns the height of the tree: 0 when empty, 1 for a single node.
    pub(crate) fn height(&self) -> usize {
        self.root.map_or(0, |h| usize::from(self.node(h).height))
    }

    /// Clears all elements from the tree.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    #[inline]
    fn node(&self, handle: Handle) -> &AvlNode<T> {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut AvlNode<T> {
        self.nodes.get_mut(handle)
    }

    fn height_of(&self, node: Option<Handle>) -> u8 {
        node.map_or(0, |h| self.node(h).height)
    }

    fn size_of(&self, node: Option<Handle>) -> usize {
        node.map_or(0, |h| self.node(h).subtree_size())
    }

    /// Balance factor of the subtree rooted at `handle`: positive means
    /// right-heavy, negative left-heavy, |factor| > 1 means out of balance.
    ///
    /// Heights are stored 1-based, so an absent child is special-cased
    /// instead of being read as height 0.
    fn balance_factor(&self, handle: Handle) -> i32 {
        let n = self.node(handle);
        if n.right.is_none() {
            1 - i32::from(n.height)
        } else if n.left.is_none() {
            i32::from(n.height) - 1
        } else {
            i32::from(self.height_of(n.right)) - i32::from(self.height_of(n.left))
        }
    }

    /// Recomputes the cached height of `handle` from its children.
    fn update_height(&mut self, handle: Handle) {
        let (left, right) = {
            let n = self.node(handle);
            (n.left, n.right)
        };
        let height = 1 + self.height_of(left).max(self.height_of(right));
        self.node_mut(handle).height = height;
    }

    /// Recomputes the cached height and both subtree counts of `handle`.
    ///
    /// Used by the rotations: relinking a subtree under a different parent
    /// changes that parent's counts, and only the rotated nodes are affected.
    /// O(1), since every child caches its own subtree total.
    fn update_height_and_sizes(&mut self, handle: Handle) {
        let (left, right) = {
            let n = self.node(handle);
            (n.left, n.right)
        };
        let height = 1 + self.height_of(left).max(self.height_of(right));
        let left_size = self.size_of(left);
        let right_size = self.size_of(right);

        let n = self.node_mut(handle);
        n.height = height;
        n.left_size = left_size;
        n.right_size = right_size;
    }

    /// Restores local balance at `handle` and returns the new subtree root.
    ///
    /// Assumes both children are already individually balanced and the cached
    /// height of `handle` is current - which holds on the unwind path of the
    /// insertion and deletion recursions. The double rotations fire only when
    /// the taller child leans the opposite way; a factor of 0 on the child
    /// must take the single rotation, or specific deletion sequences leave
    /// the tree unbalanced.
    fn rebalance(&mut self, handle: Handle) -> Handle {
        let factor = self.balance_factor(handle);
        if factor > 1 {
            let right = self.node(handle).right.expect("`rebalance()` - right-heavy node has no right child!");
            if self.balance_factor(right) < 0 {
                self.rotate_right_left(handle)
            } else {
                self.rotate_right_right(handle)
            }
        } else if factor < -1 {
            let left = self.node(handle).left.expect("`rebalance()` - left-heavy node has no left child!");
            if self.balance_factor(left) > 0 {
                self.rotate_left_right(handle)
            } else {
                self.rotate_left_left(handle)
            }
        } else {
            handle
        }
    }

    /// Single rotation for a left-heavy node whose left child is not
    /// right-heavy. `b` takes the place of `a`; `b`'s right subtree moves
    /// under `a`.
    fn rotate_left_left(&mut self, a: Handle) -> Handle {
        let b = self.node(a).left.expect("`rotate_left_left()` - pivot has no left child!");
        let b_right = self.node(b).right;

        self.node_mut(a).left = b_right;
        self.node_mut(b).right = Some(a);

        self.update_height_and_sizes(a);
        self.update_height_and_sizes(b);

        b
    }

    /// Mirror image of [`rotate_left_left`](Self::rotate_left_left).
    fn rotate_right_right(&mut self, a: Handle) -> Handle {
        let b = self.node(a).right.expect("`rotate_right_right()` - pivot has no right child!");
        let b_left = self.node(b).left;

        self.node_mut(a).right = b_left;
        self.node_mut(b).left = Some(a);

        self.update_height_and_sizes(a);
        self.update_height_and_sizes(b);

        b
    }

    /// Double rotation for a left-heavy node whose left child is right-heavy.
    /// The grandchild `c` becomes the subtree root, with `b` and `a` as its
    /// children.
    fn rotate_left_right(&mut self, a: Handle) -> Handle {
        let b = self.node(a).left.expect("`rotate_left_right()` - pivot has no left child!");
        let c = self.node(b).right.expect("`rotate_left_right()` - pivot's left child has no right child!");
        let (c_left, c_right) = {
            let n = self.node(c);
            (n.left, n.right)
        };

        self.node_mut(a).left = c_right;
        self.node_mut(b).right = c_left;
        self.node_mut(c).left = Some(b);
        self.node_mut(c).right = Some(a);

        self.update_height_and_sizes(a);
        self.update_height_and_sizes(b);
        self.update_height_and_sizes(c);

        c
    }

    /// Mirror image of [`rotate_left_right`](Self::rotate_left_right).
    fn rotate_right_left(&mut self, a: Handle) -> Handle {
        let b = self.node(a).right.expect("`rotate_right_left()` - pivot has no right child!");
        let c = self.node(b).left.expect("`rotate_right_left()` - pivot's right child has no left child!");
        let (c_left, c_right) = {
            let n = self.node(c);
            (n.left, n.right)
        };

        self.node_mut(a).right = c_left;
        self.node_mut(b).left = c_right;
        self.node_mut(c).right = Some(b);
        self.node_mut(c).left = Some(a);

        self.update_height_and_sizes(a);
        self.update_height_and_sizes(b);
        self.update_height_and_sizes(c);

        c
    }
}

impl<T: Ord> RawAvlTree<T> {
    /// Returns true if the tree contains `query`.
    pub(crate) fn contains<Q>(&self, query: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(h) = current {
            let n = self.node(h);
            current = match query.cmp(n.element.borrow()) {
                Ordering::Less => n.left,
                Ordering::Greater => n.right,
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Inserts `element` into the tree.
    /// Returns false (and changes nothing) if an equal element is present.
    pub(crate) fn insert(&mut self, element: T) -> bool {
        // Membership probe up front: the structural descent below increments
        // the subtree counters on its way down and must only run when the
        // insertion is certain to happen.
        if self.contains(&element) {
            return false;
        }
        let root = self.root;
        self.root = Some(self.insert_at(root, element));
        self.len += 1;
        true
    }

    /// Recursive insertion into the subtree rooted at `node`.
    ///
    /// Rebalances bottom-up on the unwind: each ancestor sees an already
    /// balanced subtree before evaluating its own factor, which is what lets
    /// a single O(1) rebalance step per level restore global balance.
    fn insert_at(&mut self, node: Option<Handle>, element: T) -> Handle {
        let Some(h) = node else {
            return self.nodes.alloc(AvlNode::new(element));
        };

        let ordering = element.cmp(&self.node(h).element);
        match ordering {
            Ordering::Less => {
                let left = self.node(h).left;
                let new_left = self.insert_at(left, element);
                let n = self.node_mut(h);
                n.left = Some(new_left);
                n.left_size += 1;
            }
            Ordering::Greater => {
                let right = self.node(h).right;
                let new_right = self.insert_at(right, element);
                let n = self.node_mut(h);
                n.right = Some(new_right);
                n.right_size += 1;
            }
            // Unreachable after the membership probe, but harmless.
            Ordering::Equal => return h,
        }

        self.update_height(h);
        self.rebalance(h)
    }

    /// Returns the element at sorted position `rank`, zero-based.
    pub(crate) fn get_by_rank(&self, rank: usize) -> Option<&T> {
        if rank >= self.len {
            return None;
        }

        let mut rank = rank;
        let mut h = self.root.expect("`get_by_rank()` - non-empty tree has no root!");
        loop {
            let n = self.node(h);
            match rank.cmp(&n.left_size) {
                Ordering::Equal => return Some(&n.element),
                Ordering::Greater => {
                    // Skip the left subtree and the current node.
                    rank -= n.left_size + 1;
                    h = n.right.expect("`get_by_rank()` - right count is stale!");
                }
                Ordering::Less => {
                    h = n.left.expect("`get_by_rank()` - left count is stale!");
                }
            }
        }
    }

    /// Returns the zero-based rank of `query` in sorted order, or `None` if
    /// it is not present.
    pub(crate) fn rank_of<Q>(&self, query: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut rank = 0;
        let mut current = self.root;
        while let Some(h) = current {
            let n = self.node(h);
            match query.cmp(n.element.borrow()) {
                Ordering::Less => current = n.left,
                Ordering::Greater => {
                    rank += n.left_size + 1;
                    current = n.right;
                }
                Ordering::Equal => return Some(rank + n.left_size),
            }
        }
        None
    }

    /// Returns the smallest element, or `None` if the tree is empty.
    pub(crate) fn first(&self) -> Option<&T> {
        let mut h = self.root?;
        while let Some(left) = self.node(h).left {
            h = left;
        }
        Some(&self.node(h).element)
    }

    /// Returns the largest element, or `None` if the tree is empty.
    pub(crate) fn last(&self) -> Option<&T> {
        let mut h = self.root?;
        while let Some(right) = self.node(h).right {
            h = right;
        }
        Some(&self.node(h).element)
    }

    /// Largest element `<= query`, or `None`.
    pub(crate) fn floor<Q>(&self, query: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.floor_at(self.root, query)
    }

    fn floor_at<'a, Q>(&'a self, node: Option<Handle>, query: &Q) -> Option<&'a T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let n = self.node(node?);
        if n.element.borrow() > query {
            return self.floor_at(n.left, query);
        }
        // Current element qualifies; anything better is in the right subtree.
        self.floor_at(n.right, query).or(Some(&n.element))
    }

    /// Smallest element `>= query`, or `None`.
    pub(crate) fn ceiling<Q>(&self, query: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.ceiling_at(self.root, query)
    }

    fn ceiling_at<'a, Q>(&'a self, node: Option<Handle>, query: &Q) -> Option<&'a T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let n = self.node(node?);
        if n.element.borrow() < query {
            return self.ceiling_at(n.right, query);
        }
        self.ceiling_at(n.left, query).or(Some(&n.element))
    }

    /// Largest element strictly `< query`, or `None`.
    pub(crate) fn lower<Q>(&self, query: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.lower_at(self.root, query)
    }

    fn lower_at<'a, Q>(&'a self, node: Option<Handle>, query: &Q) -> Option<&'a T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let n = self.node(node?);
        if n.element.borrow() >= query {
            return self.lower_at(n.left, query);
        }
        self.lower_at(n.right, query).or(Some(&n.element))
    }

    /// Smallest element strictly `> query`, or `None`.
    pub(crate) fn higher<Q>(&self, query: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.higher_at(self.root, query)
    }

    fn higher_at<'a, Q>(&'a self, node: Option<Handle>, query: &Q) -> Option<&'a T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let n = self.node(node?);
        if n.element.borrow() <= query {
            return self.higher_at(n.right, query);
        }
        self.higher_at(n.left, query).or(Some(&n.element))
    }

    /// Collects every element within `[from, to]` inclusive, ascending, by a
    /// pruned in-order traversal. The bounds are assumed well-formed
    /// (`from <= to`); the public wrapper validates them.
    pub(crate) fn collect_range<Q>(&self, from: &Q, to: &Q) -> Vec<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut out = Vec::new();
        self.range_at(self.root, from, to, &mut out);
        out
    }

    fn range_at<'a, Q>(&'a self, node: Option<Handle>, from: &Q, to: &Q, out: &mut Vec<&'a T>)
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Some(h) = node else { return };
        let n = self.node(h);
        let element = n.element.borrow();

        if element >= from && element <= to {
            self.range_at(n.left, from, to, out);
            out.push(&n.element);
            self.range_at(n.right, from, to, out);
        } else if element < from {
            // Everything on the left is below the range too.
            self.range_at(n.right, from, to, out);
        } else {
            self.range_at(n.left, from, to, out);
        }
    }

    /// Collects all elements in ascending (in-order) sequence.
    pub(crate) fn in_order(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        self.in_order_at(self.root, &mut out);
        out
    }

    fn in_order_at<'a>(&'a self, node: Option<Handle>, out: &mut Vec<&'a T>) {
        let Some(h) = node else { return };
        let n = self.node(h);
        self.in_order_at(n.left, out);
        out.push(&n.element);
        self.in_order_at(n.right, out);
    }

    /// Collects all elements in pre-order (node, left, right) sequence.
    pub(crate) fn pre_order(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        self.pre_order_at(self.root, &mut out);
        out
    }

    fn pre_order_at<'a>(&'a self, node: Option<Handle>, out: &mut Vec<&'a T>) {
        let Some(h) = node else { return };
        let n = self.node(h);
        out.push(&n.element);
        self.pre_order_at(n.left, out);
        self.pre_order_at(n.right, out);
    }

    /// Collects all elements in post-order (left, right, node) sequence.
    pub(crate) fn post_order(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        self.post_order_at(self.root, &mut out);
        out
    }

    fn post_order_at<'a>(&'a self, node: Option<Handle>, out: &mut Vec<&'a T>) {
        let Some(h) = node else { return };
        let n = self.node(h);
        self.post_order_at(n.left, out);
        self.post_order_at(n.right, out);
        out.push(&n.element);
    }

    /// Consumes the tree and returns its elements in ascending order.
    pub(crate) fn into_sorted_vec(mut self) -> Vec<T> {
        let mut handles = Vec::with_capacity(self.len);
        self.handles_in_order(self.root, &mut handles);
        handles.into_iter().map(|h| self.nodes.take(h).element).collect()
    }

    fn handles_in_order(&self, node: Option<Handle>, out: &mut Vec<Handle>) {
        let Some(h) = node else { return };
        let n = self.node(h);
        self.handles_in_order(n.left, out);
        out.push(h);
        self.handles_in_order(n.right, out);
    }
}

impl<T: Clone + Ord> RawAvlTree<T> {
    /// Removes `target` from the tree. Returns true if it was present.
    pub(crate) fn remove<Q>(&mut self, target: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let root = self.root;
        let (new_root, removed) = self.remove_at(root, target);
        self.root = new_root;
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Recursive removal from the subtree rooted at `node`.
    ///
    /// Returns the new subtree root together with an explicit was-removed
    /// signal; the signal is what gates the subtree-count decrements on the
    /// unwind path, so a miss leaves every counter untouched.
    fn remove_at<Q>(&mut self, node: Option<Handle>, target: &Q) -> (Option<Handle>, bool)
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Some(h) = node else {
            return (None, false);
        };

        let ordering = target.cmp(self.node(h).element.borrow());
        let removed = match ordering {
            Ordering::Less => {
                let left = self.node(h).left;
                let (new_left, removed) = self.remove_at(left, target);
                let n = self.node_mut(h);
                n.left = new_left;
                if removed {
                    n.left_size -= 1;
                }
                removed
            }
            Ordering::Greater => {
                let right = self.node(h).right;
                let (new_right, removed) = self.remove_at(right, target);
                let n = self.node_mut(h);
                n.right = new_right;
                if removed {
                    n.right_size -= 1;
                }
                removed
            }
            Ordering::Equal => {
                let replacement = self.unlink(h).map(|r| {
                    self.update_height(r);
                    self.rebalance(r)
                });
                return (replacement, true);
            }
        };

        self.update_height(h);
        (Some(self.rebalance(h)), removed)
    }

    /// Detaches the node at `h` from the tree and returns its replacement.
    ///
    /// A node with at most one child is freed outright and replaced by that
    /// child. A node with two children keeps its identity: its element is
    /// overwritten with the in-order predecessor (the maximum of the left
    /// subtree) and the predecessor's node is removed instead - which is
    /// guaranteed to have at most one child itself.
    fn unlink(&mut self, h: Handle) -> Option<Handle> {
        let (left, right) = {
            let n = self.node(h);
            (n.left, n.right)
        };

        match (left, right) {
            (None, child) | (child, None) => {
                self.nodes.free(h);
                child
            }
            (Some(left), Some(_)) => {
                let predecessor = self.max_element(left).clone();
                let (new_left, _) = self.remove_at(Some(left), &predecessor);
                let n = self.node_mut(h);
                n.element = predecessor;
                n.left = new_left;
                n.left_size -= 1;
                Some(h)
            }
        }
    }

    /// Maximum element of the subtree rooted at `h`.
    fn max_element(&self, mut h: Handle) -> &T {
        while let Some(right) = self.node(h).right {
            h = right;
        }
        &self.node(h).element
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Walks the whole tree checking the ordering, balance, count, and
    /// height invariants. Returns (size, height) of the checked subtree.
    fn check_subtree(tree: &RawAvlTree<i64>, node: Option<Handle>, low: Option<i64>, high: Option<i64>) -> (usize, u8) {
        let Some(h) = node else {
            return (0, 0);
        };
        let n = tree.node(h);

        if let Some(low) = low {
            assert!(n.element > low, "ordering violated: {} <= {low}", n.element);
        }
        if let Some(high) = high {
            assert!(n.element < high, "ordering violated: {} >= {high}", n.element);
        }

        let (left_size, left_height) = check_subtree(tree, n.left, low, Some(n.element));
        let (right_size, right_height) = check_subtree(tree, n.right, Some(n.element), high);

        assert_eq!(n.left_size, left_size, "stale left count at {}", n.element);
        assert_eq!(n.right_size, right_size, "stale right count at {}", n.element);
        assert_eq!(n.height, 1 + left_height.max(right_height), "stale height at {}", n.element);
        assert!(tree.balance_factor(h).abs() <= 1, "unbalanced at {}", n.element);

        (left_size + right_size + 1, n.height)
    }

    fn check_invariants(tree: &RawAvlTree<i64>) {
        let (size, _) = check_subtree(tree, tree.root, None, None);
        assert_eq!(size, tree.len());
    }

    fn tree_of(values: &[i64]) -> RawAvlTree<i64> {
        let mut tree = RawAvlTree::new();
        for &v in values {
            tree.insert(v);
        }
        tree
    }

    fn elements(tree: &RawAvlTree<i64>) -> alloc::vec::Vec<i64> {
        tree.in_order().into_iter().copied().collect()
    }

    #[test]
    fn insert_single_rotations() {
        // Ascending run forces right-right rotations...
        let tree = tree_of(&[1, 2, 3]);
        assert_eq!(elements(&tree), [1, 2, 3]);
        assert_eq!(tree.pre_order().into_iter().copied().collect::<alloc::vec::Vec<_>>(), [2, 1, 3]);
        check_invariants(&tree);

        // ...and a descending run the left-left mirror.
        let tree = tree_of(&[3, 2, 1]);
        assert_eq!(tree.pre_order().into_iter().copied().collect::<alloc::vec::Vec<_>>(), [2, 1, 3]);
        check_invariants(&tree);
    }

    #[test]
    fn insert_double_rotations() {
        // Left child leaning right: left-right double rotation.
        let tree = tree_of(&[3, 1, 2]);
        assert_eq!(tree.pre_order().into_iter().copied().collect::<alloc::vec::Vec<_>>(), [2, 1, 3]);
        check_invariants(&tree);

        // Right child leaning left: right-left double rotation.
        let tree = tree_of(&[1, 3, 2]);
        assert_eq!(tree.pre_order().into_iter().copied().collect::<alloc::vec::Vec<_>>(), [2, 1, 3]);
        check_invariants(&tree);
    }

    #[test]
    fn rotation_keeps_counts_current() {
        // Regression shape: the very first rotation (insert 1, 2, 3) must
        // leave the counters usable for rank access.
        let tree = tree_of(&[1, 2, 3]);
        assert_eq!(tree.get_by_rank(0), Some(&1));
        assert_eq!(tree.get_by_rank(1), Some(&2));
        assert_eq!(tree.get_by_rank(2), Some(&3));
        assert_eq!(tree.get_by_rank(3), None);
    }

    #[test]
    fn deletion_tie_break_uses_single_rotation() {
        // Removing 1 unbalances the root (factor +2) while the right child's
        // factor is exactly 0: the single right-right rotation must fire, not
        // the double. The resulting shape pins the tie-break.
        let mut tree = tree_of(&[2, 1, 4, 3, 5]);
        assert!(tree.remove(&1));
        assert_eq!(tree.pre_order().into_iter().copied().collect::<alloc::vec::Vec<_>>(), [4, 2, 3, 5]);
        check_invariants(&tree);
    }

    #[test]
    fn two_child_removal_substitutes_predecessor() {
        let mut tree = tree_of(&[50, 30, 70]);
        assert!(tree.remove(&50));
        // The old root's slot now carries the in-order predecessor.
        assert_eq!(tree.pre_order().into_iter().copied().collect::<alloc::vec::Vec<_>>(), [30, 70]);
        assert_eq!(elements(&tree), [30, 70]);
        check_invariants(&tree);
    }

    #[test]
    fn duplicate_insert_is_a_no_op() {
        let mut tree = tree_of(&[5, 3, 8]);
        assert!(!tree.insert(5));
        assert_eq!(tree.len(), 3);
        assert_eq!(elements(&tree), [3, 5, 8]);
        check_invariants(&tree);
    }

    #[test]
    fn remove_miss_changes_nothing() {
        let mut tree = tree_of(&[5, 3, 8]);
        assert!(!tree.remove(&4));
        assert_eq!(tree.len(), 3);
        check_invariants(&tree);
    }

    #[test]
    fn ascending_inserts_stay_logarithmic() {
        let mut tree = RawAvlTree::new();
        for v in 1..=1024 {
            tree.insert(v);
        }
        check_invariants(&tree);
        // ceil(1.44 * log2(1026)) comfortably bounds an AVL of 1024 nodes.
        assert!(tree.height() <= 15, "height {} too large", tree.height());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Random insert/remove interleavings preserve every structural
        /// invariant and agree with a sorted-vec model.
        #[test]
        fn invariants_hold_under_random_ops(ops in proptest::collection::vec((any::<bool>(), -128i64..128), 1..512)) {
            let mut tree = RawAvlTree::new();
            let mut model: alloc::vec::Vec<i64> = alloc::vec::Vec::new();

            for (is_insert, value) in ops {
                if is_insert {
                    let inserted = tree.insert(value);
                    prop_assert_eq!(inserted, !model.contains(&value));
                    if inserted {
                        model.push(value);
                        model.sort_unstable();
                    }
                } else {
                    let removed = tree.remove(&value);
                    prop_assert_eq!(removed, model.contains(&value));
                    if removed {
                        model.retain(|&v| v != value);
                    }
                }

                check_invariants(&tree);
                prop_assert_eq!(elements(&tree), model.clone());
            }
        }

        /// Rank access agrees with the position in the sorted sequence.
        #[test]
        fn rank_access_matches_sorted_order(values in proptest::collection::btree_set(-500i64..500, 0..128)) {
            let sorted: alloc::vec::Vec<i64> = values.iter().copied().collect();
            let mut tree = RawAvlTree::new();
            for &v in &sorted {
                tree.insert(v);
            }

            for (rank, &v) in sorted.iter().enumerate() {
                prop_assert_eq!(tree.get_by_rank(rank), Some(&v));
                prop_assert_eq!(tree.rank_of(&v), Some(rank));
            }
            prop_assert_eq!(tree.get_by_rank(sorted.len()), None);
        }
    }
}
