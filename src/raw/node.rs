use super::arena::Handle;

/// A single AVL node: the stored element, two child links, the cached height
/// of the subtree rooted here, and the element counts of both subtrees.
///
/// Height is 1-based: a leaf stores 1, an absent subtree counts as 0. The
/// balance-factor formulas in the raw tree rely on this offset. The size
/// counters exclude the node itself; they are written only by the insertion
/// and deletion paths and by rotations.
#[derive(Clone)]
pub(crate) struct AvlNode<T> {
    pub(crate) element: T,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
    pub(crate) height: u8,
    pub(crate) left_size: usize,
    pub(crate) right_size: usize,
}

impl<T> AvlNode<T> {
    pub(crate) const fn new(element: T) -> Self {
        Self {
            element,
            left: None,
            right: None,
            height: 1,
            left_size: 0,
            right_size: 0,
        }
    }

    /// Number of elements in the subtree rooted at this node, itself included.
    pub(crate) const fn subtree_size(&self) -> usize {
        self.left_size + self.right_size + 1
    }
}
