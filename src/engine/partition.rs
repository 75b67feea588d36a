use crate::model::SortDirection;
use std::collections::BTreeSet;

/// Outcome of one Lomuto partition pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// Final position of the pivot.
    pub pivot_index: usize,
    /// Every index a swap touched, self-swaps included.
    pub touched: BTreeSet<usize>,
}

/// Partition `arr[low..=high]` around `arr[high]`.
///
/// Elements that precede the pivot in `direction` are swapped forward to the write
/// cursor. The closing pivot swap always marks both positions, even when the pivot
/// is already in place.
pub fn lomuto(arr: &mut [u32], low: usize, high: usize, direction: SortDirection) -> Partition {
    let pivot = arr[high];
    let mut i = low;
    let mut touched = BTreeSet::new();

    for j in low..high {
        if direction.precedes(arr[j], pivot) {
            arr.swap(i, j);
            touched.insert(i);
            touched.insert(j);
            i += 1;
        }
    }

    arr.swap(i, high);
    touched.insert(i);
    touched.insert(high);

    Partition {
        pivot_index: i,
        touched,
    }
}
