/*!

Growable contiguous array with an explicit, fallible capacity policy.

`DynArray<T>` owns one heap allocation and keeps its elements packed at the front of it.
Unlike `Vec`, every operation that may allocate reports failure as a `DynArrayError`
instead of aborting, and the buffer follows a fixed policy:

- `push_back` doubles the capacity when full (starting at 1);
- `insert` grows a full buffer by exactly one slot;
- `pop_back` and `erase` shrink the buffer to fit once `capacity / len >= 4`,
  and erasing the last element releases it.

```
use dynarray::{DynArray, DynArrayError};

let mut numbers = DynArray::new();
for n in 1..=5 {
    numbers.push_back(n)?;
}
numbers.erase(1)?;
numbers.insert(0, 0)?;
assert_eq!(numbers, [0, 1, 3, 4, 5]);
assert_eq!(Ok(&3), numbers.at(2));
# Ok::<(), DynArrayError>(())
```

Enable the `logging` feature to route diagnostics through the `log` crate.

*/

#[macro_use]
mod logging;

mod array;
mod error;
mod iter;
pub mod policy;
mod raw;
mod traits;

pub use array::DynArray;
pub use error::DynArrayError;
pub use iter::Iter;
pub use traits::DynArrayIterator;

#[cfg(test)]
pub mod dropflag;
