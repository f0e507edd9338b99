//! Type aliases for commonly shared state.
//!
//! The editor is single-threaded and event driven: the 2D canvas and the 3D
//! scene both read and write the same pole collection on the UI thread.
//! `Rc<RefCell<T>>` expresses that ownership directly; the aliases below keep
//! signatures short and consistent across crates.
//!
//! ```rust
//! use polekit_core::types::{shared, Shared};
//!
//! let counter: Shared<u32> = shared(0);
//! let other_view = counter.clone();
//! *other_view.borrow_mut() += 1;
//! assert_eq!(*counter.borrow(), 1);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
pub type Shared<T> = Rc<RefCell<T>>;

/// Create a new `Shared<T>` from a value.
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
