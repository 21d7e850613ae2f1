use quickcheck::{Arbitrary, Gen};

mod functional;

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Clone, Debug)]
pub(crate) enum Op<T> {
    /// Insert the T into the data structure
    Insert(T),
    /// Check whether the T is in the data structure
    Contains(T),
    /// Keep the current tree around to check later that it never changed
    Snapshot,
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 1, 2]).unwrap() {
            0 => Op::Insert(T::arbitrary(g)),
            1 => Op::Contains(T::arbitrary(g)),
            2 => Op::Snapshot,
            _ => unreachable!(),
        }
    }
}
