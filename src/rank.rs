/// A zero-based rank into the sorted order of a set.
///
/// A rank of 0 names the smallest element, a rank of `len() - 1` the largest.
///
/// # Examples
///
/// ```
/// use ravl_tree::{AvlSet, Rank};
///
/// let set = AvlSet::from([30, 10, 20]);
/// assert_eq!(set[Rank(1)], 20);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
