use crate::error::{MatrixError, MatrixResult};
use crate::matrix::iter::{MortonCursor, MortonCursorMut, MortonIter, MortonIterMut};
use crate::morton::{morton_decode, morton_encode};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// A square matrix storing its elements in Morton order
///
/// The rank (side length) must be zero or a power of two, so that the
/// Morton codec is a bijection between coordinates and storage offsets.
/// The rank is fixed at construction; there is no resize.
///
/// Implicit copying is not allowed: the type does not implement `Clone`.
/// A deep copy costs rank² element copies and must be requested explicitly
/// through [`MortonMatrix::duplicate`].
#[derive(Debug, PartialEq, Serialize)]
pub struct MortonMatrix<T> {
    rank: u32,
    /// Elements stored in Morton order
    elements: Vec<T>,
}

impl<T> MortonMatrix<T> {
    /// Create a matrix of the given rank, filled with default elements
    ///
    /// Panics if `rank` is neither zero nor a power of two. Rank zero
    /// yields a valid, empty matrix with no allocation.
    pub fn new(rank: u32) -> Self
    where
        T: Default + Clone,
    {
        assert!(
            rank == 0 || rank.is_power_of_two(),
            "matrix rank must be zero or a power of two, got {}",
            rank
        );
        let size = (rank as u64 * rank as u64) as usize;
        Self {
            rank,
            elements: vec![T::default(); size],
        }
    }

    /// Fallible variant of [`MortonMatrix::new`] for ranks taken from
    /// external input
    pub fn try_new(rank: u32) -> MatrixResult<Self>
    where
        T: Default + Clone,
    {
        Self::check_rank(rank)?;
        Ok(Self::new(rank))
    }

    /// Adopt a buffer that is already in Morton order
    ///
    /// Validates the rank and that the buffer holds exactly rank² elements.
    pub fn from_morton_buffer(rank: u32, elements: Vec<T>) -> MatrixResult<Self> {
        Self::check_rank(rank)?;
        let expected = rank as u64 * rank as u64;
        if elements.len() as u64 != expected {
            return Err(MatrixError::BufferSizeMismatch {
                rank,
                expected,
                actual: elements.len(),
            });
        }
        Ok(Self { rank, elements })
    }

    /// Build a matrix from a row-major buffer, re-ordering it into Morton
    /// order
    pub fn from_row_major(rank: u32, values: Vec<T>) -> MatrixResult<Self> {
        Self::check_rank(rank)?;
        let expected = rank as u64 * rank as u64;
        if values.len() as u64 != expected {
            return Err(MatrixError::BufferSizeMismatch {
                rank,
                expected,
                actual: values.len(),
            });
        }

        // Move each row-major element to its Morton offset
        let mut slots: Vec<Option<T>> = values.into_iter().map(Some).collect();
        let mut elements = Vec::with_capacity(slots.len());
        for morton in 0..slots.len() as u64 {
            let (x, y) = morton_decode(morton);
            let linear = y as usize * rank as usize + x as usize;
            let value = slots[linear]
                .take()
                .expect("morton codec visits each cell exactly once");
            elements.push(value);
        }
        Ok(Self { rank, elements })
    }

    fn check_rank(rank: u32) -> MatrixResult<()> {
        if rank == 0 || rank.is_power_of_two() {
            Ok(())
        } else {
            Err(MatrixError::RankNotPowerOfTwo { rank })
        }
    }

    /// Create a new matrix with contents copied from this one
    ///
    /// The result is element-wise equal and shares no storage with the
    /// source.
    pub fn duplicate(&self) -> Self
    where
        T: Clone,
    {
        Self {
            rank: self.rank,
            elements: self.elements.clone(),
        }
    }

    /// Render the contents as a row-major buffer
    pub fn to_row_major(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut linear = Vec::with_capacity(self.elements.len());
        for y in 0..self.rank {
            for x in 0..self.rank {
                linear.push(self.get(x, y).clone());
            }
        }
        linear
    }

    /// Get rank (side length)
    pub fn rank(&self) -> u32 {
        self.rank
    }

    /// Get total element count
    pub fn size(&self) -> u64 {
        self.rank as u64 * self.rank as u64
    }

    pub fn is_empty(&self) -> bool {
        self.rank == 0
    }

    /// Morton-encoded storage offset for coordinates
    #[inline(always)]
    fn morton_index(&self, x: u32, y: u32) -> usize {
        debug_assert!(
            x < self.rank && y < self.rank,
            "coordinates ({}, {}) out of range for rank {} matrix",
            x,
            y,
            self.rank
        );
        morton_encode(x, y) as usize
    }

    /// Element access by logical coordinates
    ///
    /// Caller guarantees `x` and `y` are below the rank.
    #[inline(always)]
    pub fn get(&self, x: u32, y: u32) -> &T {
        &self.elements[self.morton_index(x, y)]
    }

    /// Mutable element access by logical coordinates
    ///
    /// Caller guarantees `x` and `y` are below the rank.
    #[inline(always)]
    pub fn get_mut(&mut self, x: u32, y: u32) -> &mut T {
        let index = self.morton_index(x, y);
        &mut self.elements[index]
    }

    /// All elements in storage (Morton) order
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// All elements in storage (Morton) order, mutable
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.elements
    }

    /// Bidirectional cursor positioned at storage offset 0
    pub fn cursor(&self) -> MortonCursor<'_, T> {
        MortonCursor::new(&self.elements, 0)
    }

    /// Mutable bidirectional cursor positioned at storage offset 0
    pub fn cursor_mut(&mut self) -> MortonCursorMut<'_, T> {
        MortonCursorMut::new(&mut self.elements, 0)
    }

    /// Iterate elements in storage order with their logical coordinates
    pub fn iter(&self) -> MortonIter<'_, T> {
        MortonIter::new(&self.elements)
    }

    /// Mutable iteration in storage order with logical coordinates
    pub fn iter_mut(&mut self) -> MortonIterMut<'_, T> {
        MortonIterMut::new(&mut self.elements)
    }
}

impl<T> Default for MortonMatrix<T> {
    /// An empty matrix (rank 0, no allocation)
    fn default() -> Self {
        Self {
            rank: 0,
            elements: Vec::new(),
        }
    }
}

impl<T> Index<(u32, u32)> for MortonMatrix<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, (x, y): (u32, u32)) -> &T {
        self.get(x, y)
    }
}

impl<T> IndexMut<(u32, u32)> for MortonMatrix<T> {
    #[inline(always)]
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut T {
        self.get_mut(x, y)
    }
}

impl<'a, T> IntoIterator for &'a MortonMatrix<T> {
    type Item = ((u32, u32), &'a T);
    type IntoIter = MortonIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut MortonMatrix<T> {
    type Item = ((u32, u32), &'a mut T);
    type IntoIter = MortonIterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// Deserialization goes through the validating constructor so that malformed
// input cannot produce a matrix with a bad rank or buffer length.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for MortonMatrix<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename = "MortonMatrix")]
        struct Repr<T> {
            rank: u32,
            elements: Vec<T>,
        }

        let repr = Repr::deserialize(deserializer)?;
        MortonMatrix::from_morton_buffer(repr.rank, repr.elements).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_allocates_default_elements() {
        let m: MortonMatrix<u32> = MortonMatrix::new(4);
        assert_eq!(m.rank(), 4);
        assert_eq!(m.size(), 16);
        assert!(!m.is_empty());
        assert!(m.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_empty_matrix() {
        let m: MortonMatrix<u32> = MortonMatrix::new(0);
        assert_eq!(m.rank(), 0);
        assert_eq!(m.size(), 0);
        assert!(m.is_empty());

        let d: MortonMatrix<u32> = MortonMatrix::default();
        assert_eq!(d.size(), 0);
    }

    #[test]
    #[should_panic(expected = "power of two")]
    fn test_new_rejects_non_power_of_two_rank() {
        let _m: MortonMatrix<u32> = MortonMatrix::new(3);
    }

    #[test]
    fn test_try_new_reports_bad_rank() {
        let result: MatrixResult<MortonMatrix<u32>> = MortonMatrix::try_new(5);
        assert!(matches!(
            result,
            Err(MatrixError::RankNotPowerOfTwo { rank: 5 })
        ));
        assert!(MortonMatrix::<u32>::try_new(8).is_ok());
        assert!(MortonMatrix::<u32>::try_new(0).is_ok());
    }

    #[test]
    fn test_write_read_through_accessors() {
        let mut m: MortonMatrix<u64> = MortonMatrix::new(8);
        for y in 0..8 {
            for x in 0..8 {
                *m.get_mut(x, y) = (y * 100 + x) as u64;
            }
        }
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(*m.get(x, y), (y * 100 + x) as u64, "at ({}, {})", x, y);
                assert_eq!(m[(x, y)], (y * 100 + x) as u64);
            }
        }
    }

    #[test]
    fn test_storage_is_morton_ordered() {
        let mut m: MortonMatrix<u8> = MortonMatrix::new(4);
        m[(2, 0)] = 7;
        // encode(2, 0) = 0b100
        assert_eq!(m.as_slice()[4], 7);
        m[(0, 1)] = 9;
        assert_eq!(m.as_slice()[2], 9);
    }

    #[test]
    fn test_duplicate_is_independent() {
        let mut m: MortonMatrix<i32> = MortonMatrix::new(4);
        m[(1, 2)] = 42;
        let mut d = m.duplicate();
        assert_eq!(d, m);

        d[(1, 2)] = -1;
        assert_eq!(m[(1, 2)], 42);
        m[(3, 3)] = 5;
        assert_eq!(d[(3, 3)], 0);
    }

    #[test]
    fn test_row_major_round_trip() {
        let values: Vec<u32> = (0..16).collect();
        let m = MortonMatrix::from_row_major(4, values.clone()).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(m[(x, y)], y * 4 + x, "at ({}, {})", x, y);
            }
        }
        // (2, 0) sits at row-major index 2 but Morton offset 4
        assert_eq!(m.as_slice()[4], 2);
        assert_eq!(m.to_row_major(), values);
    }

    #[test]
    fn test_from_row_major_rejects_bad_input() {
        assert!(matches!(
            MortonMatrix::from_row_major(3, vec![0u8; 9]),
            Err(MatrixError::RankNotPowerOfTwo { rank: 3 })
        ));
        assert!(matches!(
            MortonMatrix::from_row_major(4, vec![0u8; 15]),
            Err(MatrixError::BufferSizeMismatch {
                rank: 4,
                expected: 16,
                actual: 15,
            })
        ));
    }

    #[test]
    fn test_from_morton_buffer_adopts_storage() {
        let m = MortonMatrix::from_morton_buffer(2, vec![10u8, 11, 12, 13]).unwrap();
        assert_eq!(m[(0, 0)], 10);
        assert_eq!(m[(1, 0)], 11);
        assert_eq!(m[(0, 1)], 12);
        assert_eq!(m[(1, 1)], 13);

        assert!(MortonMatrix::from_morton_buffer(2, vec![0u8; 3]).is_err());
    }
}
