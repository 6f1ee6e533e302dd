/// Morton encoding (Z-order curve) for cache-friendly 2D storage
///
/// This module provides Morton encoding/decoding for 2D matrix coordinates,
/// which keeps spatially close elements close in memory when the matrix
/// buffer is laid out in Morton order.
pub mod morton2d;

pub use morton2d::{morton_decode, morton_encode};

// Morton encoding interleaves the bits of the x and y coordinates, tracing
// a Z-shaped curve through the grid. Nearby points in 2D land near each
// other in the 1D encoding.
//
// Benefits:
// - Better cache hit rate for neighborhood access
// - One flat allocation regardless of rank
// - Encode/decode are a handful of shift-mask operations, no lookup tables
