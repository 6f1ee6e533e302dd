pub mod error;
pub mod matrix;
pub mod morton;

pub use error::{MatrixError, MatrixResult};
pub use matrix::{MortonCursor, MortonCursorMut, MortonIter, MortonIterMut, MortonMatrix};
pub use morton::{morton_decode, morton_encode};
