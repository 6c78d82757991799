use thiserror::Error;

/// Errors reported by the fallible ordered queries on [`AvlSet`](crate::AvlSet).
///
/// Absent results (a missed `floor`, a duplicate `insert`, `first` on an empty
/// set) are normal outcomes and come back as `bool`/`Option`, not as errors;
/// this type covers arguments that are malformed regardless of the set's
/// contents.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// `get_range` was called with `from > to`.
    #[error("invalid range: `from` is greater than `to`")]
    InvertedRange,
}
