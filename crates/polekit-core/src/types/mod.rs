//! Type aliases for shared ownership.
//!
//! - [`aliases`]: `Rc<RefCell<T>>` style aliases for state shared between views.

pub mod aliases;

pub use aliases::*;
