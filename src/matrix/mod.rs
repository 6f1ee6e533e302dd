//! Morton-ordered square matrix
//!
//! A fixed-rank square container whose buffer is laid out along the Z-order
//! curve, with cursors that recover the logical coordinates of each element
//! during traversal.

pub mod iter;
pub mod morton_matrix;

// Re-export the container and its iteration types for convenience
pub use iter::{MortonCursor, MortonCursorMut, MortonIter, MortonIterMut};
pub use morton_matrix::MortonMatrix;
