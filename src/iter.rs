use crate::DynArray;
use std::iter::FusedIterator;

/// Forward iterator over the live elements of a [`DynArray`].
///
/// A clone keeps the current position, so a clone taken before iteration
/// replays the whole sequence.
pub struct Iter<'a, T> {
    items: &'a [T],
    index: usize,
}

impl<'a, T> Iter<'a, T> {
    #[inline(always)]
    pub(crate) fn new(items: &'a [T]) -> Iter<'a, T> {
        Iter { items, index: 0 }
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter {
            items: self.items,
            index: self.index,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.items.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.items.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
