use core::borrow::Borrow;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use alloc::vec::Vec;

use crate::raw::RawAvlTree;

mod capacity;
mod rank;
mod range;

/// An ordered set backed by a height-balanced (AVL) binary search tree with
/// per-node subtree counts.
///
/// `AvlSet` offers the familiar ordered-set surface - [`insert`](AvlSet::insert),
/// [`remove`](AvlSet::remove), [`contains`](AvlSet::contains),
/// [`first`](AvlSet::first)/[`last`](AvlSet::last), ordered queries like
/// [`floor`](AvlSet::floor) and [`ceiling`](AvlSet::ceiling) - plus O(log n)
/// order-statistic operations ([`get_by_rank`](AvlSet::get_by_rank),
/// [`rank_of`](AvlSet::rank_of)) that a plain `BTreeSet` cannot answer without
/// a traversal.
///
/// It is a logic error for an item to be modified in such a way that the
/// item's ordering relative to any other item, as determined by the [`Ord`]
/// trait, changes while it is in the set. This is normally only possible
/// through [`Cell`], [`RefCell`], global state, I/O, or unsafe code. The
/// behavior resulting from such a logic error is not specified, but will be
/// encapsulated to the `AvlSet` that observed the logic error and not result
/// in undefined behavior.
///
/// Iterators returned by [`AvlSet::iter`] and its pre-/post-order variants
/// snapshot the traversal eagerly at construction time; they are cursors over
/// an already-computed sequence, not live views of the tree.
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
///
/// # Examples
///
/// ```
/// use ravl_tree::AvlSet;
///
/// let mut primes = AvlSet::new();
///
/// primes.insert(5);
/// primes.insert(2);
/// primes.insert(3);
///
/// assert!(primes.contains(&3));
/// assert_eq!(primes.first(), Some(&2));
/// assert_eq!(primes.iter().copied().collect::<Vec<_>>(), [2, 3, 5]);
/// ```
///
/// An `AvlSet` with a known list of items can be initialized from an array;
/// bulk construction sorts the input and inserts middle-out, so the tree is
/// near-balanced before any rotation runs:
///
/// ```
/// use ravl_tree::AvlSet;
///
/// let set = AvlSet::from([5, 3, 8, 1]);
/// assert_eq!(set.len(), 4);
/// ```
#[derive(Clone)]
pub struct AvlSet<T> {
    tree: RawAvlTree<T>,
}

/// An iterator over the items of an `AvlSet` in a fixed traversal order.
///
/// Created by [`iter`](AvlSet::iter) (in-order),
/// [`iter_preorder`](AvlSet::iter_preorder), and
/// [`iter_postorder`](AvlSet::iter_postorder). The traversal is materialized
/// in full when the iterator is constructed (O(n) time and memory), so the
/// cursor itself is O(1) per step.
///
/// # Examples
///
/// ```
/// use ravl_tree::AvlSet;
///
/// let set = AvlSet::from([3, 1, 2]);
/// let mut iter = set.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    inner: alloc::vec::IntoIter<&'a T>,
}

/// An owning iterator over the items of an `AvlSet` in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`AvlSet`]
/// (provided by the [`IntoIterator`] trait).
///
/// # Examples
///
/// ```
/// use ravl_tree::AvlSet;
///
/// let set = AvlSet::from([2, 3, 1]);
/// let mut iter = set.into_iter();
/// assert_eq!(iter.next(), Some(1));
/// assert_eq!(iter.next_back(), Some(3));
/// assert_eq!(iter.next(), Some(2));
/// ```
///
/// [`into_iter`]: AvlSet#method.into_iter
pub struct IntoIter<T> {
    inner: alloc::vec::IntoIter<T>,
}

impl<T> AvlSet<T> {
    /// Makes a new, empty `AvlSet`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::AvlSet;
    ///
    /// let mut set: AvlSet<i32> = AvlSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        AvlSet {
            tree: RawAvlTree::new(),
        }
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::AvlSet;
    ///
    /// let set = AvlSet::from([1, 2]);
    /// assert_eq!(set.len(), 2);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert!(set.is_empty());
    /// set.insert(1);
    /// assert!(!set.is_empty());
    /// ```
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the height of the underlying tree: 0 when the set is empty,
    /// 1 when it holds a single element.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    /// The balance invariant keeps the height within a constant factor of
    /// log2 of the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::AvlSet;
    ///
    /// let set = AvlSet::from([1, 2, 3, 4, 5, 6, 7]);
    /// assert_eq!(set.height(), 3);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Clears the set, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::from([1, 2, 3]);
    /// set.clear();
    /// assert!(set.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }
}

impl<T: Ord> AvlSet<T> {
    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. That is:
    ///
    /// - If the set did not previously contain an equal value, `true` is
    ///   returned.
    /// - If the set already contained an equal value, `false` is returned,
    ///   and the set is not modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    ///
    /// assert!(set.insert(2));
    /// assert!(!set.insert(2));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        self.tree.insert(value)
    }

    /// Returns `true` if the set contains an element equal to the value.
    ///
    /// The value may be any borrowed form of the set's element type, but the
    /// ordering on the borrowed form *must* match the ordering on the element
    /// type.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::AvlSet;
    ///
    /// let set = AvlSet::from([1, 2, 3]);
    /// assert!(set.contains(&1));
    /// assert!(!set.contains(&4));
    /// ```
    #[must_use]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.contains(value)
    }

    /// Returns a reference to the first (smallest) element in the set, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert_eq!(set.first(), None);
    /// set.insert(2);
    /// set.insert(1);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.tree.first()
    }

    /// Returns a reference to the last (largest) element in the set, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert_eq!(set.last(), None);
    /// set.insert(2);
    /// set.insert(1);
    /// assert_eq!(set.last(), Some(&2));
    /// ```
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.tree.last()
    }

    /// Gets an iterator that visits the elements in ascending order.
    ///
    /// The in-order sequence is computed eagerly when the iterator is
    /// created; see [`Iter`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::AvlSet;
    ///
    /// let set = AvlSet::from([3, 1, 2]);
    /// let values: Vec<_> = set.iter().copied().collect();
    /// assert_eq!(values, [1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.tree.in_order().into_iter(),
        }
    }

    /// Gets an iterator that visits the elements in pre-order
    /// (node, then left subtree, then right subtree).
    ///
    /// The first element yielded is the tree's root, which makes this order
    /// suitable for rebuilding an equal set with no rotations.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::AvlSet;
    ///
    /// let set = AvlSet::from([1, 2, 3]);
    /// let values: Vec<_> = set.iter_preorder().copied().collect();
    /// assert_eq!(values, [2, 1, 3]);
    /// ```
    pub fn iter_preorder(&self) -> Iter<'_, T> {
        Iter {
            inner: self.tree.pre_order().into_iter(),
        }
    }

    /// Gets an iterator that visits the elements in post-order
    /// (left subtree, then right subtree, then node).
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::AvlSet;
    ///
    /// let set = AvlSet::from([1, 2, 3]);
    /// let values: Vec<_> = set.iter_postorder().copied().collect();
    /// assert_eq!(values, [1, 3, 2]);
    /// ```
    pub fn iter_postorder(&self) -> Iter<'_, T> {
        Iter {
            inner: self.tree.post_order().into_iter(),
        }
    }
}

impl<T: Clone + Ord> AvlSet<T> {
    /// If the set contains an element equal to the value, removes it from
    /// the set. Returns whether such an element was present.
    ///
    /// The value may be any borrowed form of the set's element type, but the
    /// ordering on the borrowed form *must* match the ordering on the element
    /// type.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(2);
    ///
    /// assert!(set.remove(&2));
    /// assert!(!set.remove(&2));
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.remove(value)
    }

    /// Copies the elements into a `Vec` in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::AvlSet;
    ///
    /// let set = AvlSet::from([3, 1, 2]);
    /// assert_eq!(set.to_vec(), [1, 2, 3]);
    /// ```
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Default for AvlSet<T> {
    /// Creates an empty `AvlSet`.
    fn default() -> Self {
        AvlSet::new()
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for AvlSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord> PartialEq for AvlSet<T> {
    /// Two sets are equal when they hold equal elements, regardless of the
    /// insertion orders that produced them.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Ord> Eq for AvlSet<T> {}

impl<T: Ord + Hash> Hash for AvlSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for element in self.iter() {
            element.hash(state);
        }
    }
}

impl<T: Ord> Extend<T> for AvlSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for AvlSet<T> {
    /// Builds a set by sorting the input and inserting middle-out, so each
    /// contiguous run contributes its midpoint before either half. The tree
    /// is near-balanced throughout the load, which keeps rotations rare; the
    /// result is identical to one-at-a-time insertion.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut values: Vec<T> = iter.into_iter().collect();
        values.sort_unstable();

        let mut set = AvlSet::with_capacity(values.len());
        let mut slots: Vec<Option<T>> = values.into_iter().map(Some).collect();
        set.insert_middle_out(&mut slots);
        set
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for AvlSet<T> {
    /// Converts a `[T; N]` into an `AvlSet<T>`. Duplicates are silently
    /// dropped.
    ///
    /// ```
    /// use ravl_tree::AvlSet;
    ///
    /// let set1 = AvlSet::from([1, 2, 3, 4]);
    /// let set2: AvlSet<_> = [1, 2, 3, 4].into();
    /// assert_eq!(set1, set2);
    /// ```
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T: Ord> AvlSet<T> {
    /// Inserts the midpoint of `slots`, then recurses on both halves.
    fn insert_middle_out(&mut self, slots: &mut [Option<T>]) {
        if slots.is_empty() {
            return;
        }
        let mid = slots.len() / 2;
        if let Some(value) = slots[mid].take() {
            self.insert(value);
        }
        let (left, right) = slots.split_at_mut(mid);
        self.insert_middle_out(left);
        self.insert_middle_out(&mut right[1..]);
    }
}

impl<'a, T: Ord> IntoIterator for &'a AvlSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T: Ord> IntoIterator for AvlSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an owning iterator over the elements in ascending order.
    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.tree.into_sorted_vec().into_iter(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}
