//! Various unsorted geometrical and logical operators.

pub use self::radix_sort::RadixSort;

mod radix_sort;
