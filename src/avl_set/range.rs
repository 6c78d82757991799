use core::borrow::Borrow;

use alloc::vec::Vec;

use super::AvlSet;
use crate::Error;

impl<T: Ord> AvlSet<T> {
    /// Returns the largest element less than or equal to `value`, or `None`
    /// if every element is greater (including when the set is empty).
    ///
    /// A single descent from the root, pruning one side at each node and
    /// keeping the tightest qualifying candidate seen along the path.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::AvlSet;
    ///
    /// let set = AvlSet::from([10, 20, 30]);
    /// assert_eq!(set.floor(&25), Some(&20));
    /// assert_eq!(set.floor(&20), Some(&20));
    /// assert_eq!(set.floor(&5), None);
    /// ```
    #[must_use]
    pub fn floor<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.floor(value)
    }

    /// Returns the smallest element greater than or equal to `value`, or
    /// `None` if every element is smaller (including when the set is empty).
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::AvlSet;
    ///
    /// let set = AvlSet::from([10, 20, 30]);
    /// assert_eq!(set.ceiling(&25), Some(&30));
    /// assert_eq!(set.ceiling(&30), Some(&30));
    /// assert_eq!(set.ceiling(&35), None);
    /// ```
    #[must_use]
    pub fn ceiling<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.ceiling(value)
    }

    /// Returns the largest element strictly less than `value`, or `None` if
    /// there is no such element.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::AvlSet;
    ///
    /// let set = AvlSet::from([10, 20, 30]);
    /// assert_eq!(set.lower(&20), Some(&10));
    /// assert_eq!(set.lower(&10), None);
    /// ```
    #[must_use]
    pub fn lower<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.lower(value)
    }

    /// Returns the smallest element strictly greater than `value`, or `None`
    /// if there is no such element.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::AvlSet;
    ///
    /// let set = AvlSet::from([10, 20, 30]);
    /// assert_eq!(set.higher(&20), Some(&30));
    /// assert_eq!(set.higher(&30), None);
    /// ```
    #[must_use]
    pub fn higher<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.higher(value)
    }

    /// Returns every element within `[from, to]` inclusive, in ascending
    /// order. The result may be empty.
    ///
    /// The traversal prunes subtrees that provably fall outside the bounds,
    /// so the cost is O(log n + k) for k collected elements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvertedRange`] if `from > to`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::AvlSet;
    ///
    /// let set = AvlSet::from([1, 3, 5, 7, 9]);
    /// assert_eq!(set.get_range(&2, &8).unwrap(), [&3, &5, &7]);
    /// assert!(set.get_range(&8, &2).is_err());
    /// ```
    pub fn get_range<Q>(&self, from: &Q, to: &Q) -> Result<Vec<&T>, Error>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if from > to {
            return Err(Error::InvertedRange);
        }
        Ok(self.tree.collect_range(from, to))
    }
}
