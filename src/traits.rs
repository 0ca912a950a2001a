use crate::{DynArray, DynArrayError};

/// Implements fallible collect into `DynArray`.
pub trait DynArrayIterator: Iterator {
    fn try_collect_dyn_array(self) -> Result<DynArray<Self::Item>, DynArrayError>;

    fn try_collect_result_dyn_array<I, E>(self) -> Result<DynArray<I>, E>
        where
            Self: Iterator<Item=Result<I, E>>,
            E: From<DynArrayError>;
}

impl<Q: Iterator> DynArrayIterator for Q {
    fn try_collect_dyn_array(self) -> Result<DynArray<Self::Item>, DynArrayError> {
        let (lower, _) = self.size_hint();
        let mut array = DynArray::with_capacity(lower.max(4))?;
        for item in self {
            array.push_back(item)?;
        }
        Ok(array)
    }

    fn try_collect_result_dyn_array<I, E>(self) -> Result<DynArray<I>, E>
        where
            Self: Iterator<Item=Result<I, E>>,
            E: From<DynArrayError>
    {
        let (lower, _) = self.size_hint();
        let mut array = DynArray::with_capacity(lower.max(4))?;
        for item in self {
            array.push_back(item?)?;
        }
        Ok(array)
    }
}
