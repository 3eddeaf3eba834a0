//! Object managers
//!
//! Maps the handles produced by the index allocator to live native objects.

mod object_manager;

pub use object_manager::ObjectManager;
