//! Non-owning views over contiguous storage.
//!
//! A [`Span`] is nothing more than a borrowed slice: a pointer and a length
//! into memory that somebody else owns. It can be built from a `Vec`, an
//! array or a boxed slice, and narrowed with [`Span::first`], [`Span::last`]
//! and [`Span::subspan`] without copying a single element.
//!
//! A [`FixedSpan`] carries its length in the type, so handing it storage of
//! the wrong size does not compile:
//!
//! ```compile_fail
//! use format_span::FixedSpan;
//!
//! fn rgb(color: FixedSpan<'_, f32, 3>) -> f32 {
//!     color[0]
//! }
//!
//! let rgba = [0.0f32, 1.0, 0.0, 1.0];
//! rgb(FixedSpan::from(&rgba));
//! ```
//!
//! Returning a view of a local is rejected by the borrow checker:
//!
//! ```compile_fail
//! use format_span::Span;
//!
//! fn dangling() -> Span<'static, i32> {
//!     let local = vec![9, 9, 9];
//!     Span::from(&local)
//! }
//! ```

use std::fmt;
use std::ops::{Index, IndexMut};
use std::slice;

use crate::error::SpanError;

fn check_range(offset: usize, count: usize, len: usize) -> Result<(), SpanError> {
    match offset.checked_add(count) {
        Some(end) if end <= len => Ok(()),
        _ => Err(SpanError::OutOfRange { offset, count, len }),
    }
}

// =============================================================================
// Span: shared view
// =============================================================================

pub struct Span<'a, T> {
    data: &'a [T],
}

impl<'a, T> Span<'a, T> {
    pub const fn new(data: &'a [T]) -> Self {
        Self { data }
    }

    pub const fn empty() -> Self {
        Self { data: &[] }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Size of the viewed elements in bytes.
    pub fn size_bytes(&self) -> usize {
        std::mem::size_of_val(self.data)
    }

    pub fn get(&self, index: usize) -> Option<&'a T> {
        self.data.get(index)
    }

    pub fn front(&self) -> Option<&'a T> {
        self.data.first()
    }

    pub fn back(&self) -> Option<&'a T> {
        self.data.last()
    }

    pub fn iter(&self) -> slice::Iter<'a, T> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// The leading `count` elements.
    ///
    /// # Panics
    ///
    /// Panics if `count > self.len()`.
    pub fn first(&self, count: usize) -> Span<'a, T> {
        Span::new(&self.data[..count])
    }

    /// The trailing `count` elements.
    ///
    /// # Panics
    ///
    /// Panics if `count > self.len()`.
    pub fn last(&self, count: usize) -> Span<'a, T> {
        let len = self.data.len();
        assert!(
            count <= len,
            "last({count}) out of range for span of length {len}"
        );
        Span::new(&self.data[len - count..])
    }

    /// `count` elements starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + count > self.len()`.
    pub fn subspan(&self, offset: usize, count: usize) -> Span<'a, T> {
        if let Err(err) = check_range(offset, count, self.data.len()) {
            panic!("{err}");
        }
        Span::new(&self.data[offset..offset + count])
    }

    /// Everything from `offset` to the end.
    ///
    /// # Panics
    ///
    /// Panics if `offset > self.len()`.
    pub fn subspan_from(&self, offset: usize) -> Span<'a, T> {
        Span::new(&self.data[offset..])
    }

    pub fn try_first(&self, count: usize) -> Result<Span<'a, T>, SpanError> {
        self.try_subspan(0, count)
    }

    pub fn try_last(&self, count: usize) -> Result<Span<'a, T>, SpanError> {
        let len = self.data.len();
        if count > len {
            return Err(SpanError::OutOfRange { offset: 0, count, len });
        }
        Ok(Span::new(&self.data[len - count..]))
    }

    pub fn try_subspan(&self, offset: usize, count: usize) -> Result<Span<'a, T>, SpanError> {
        check_range(offset, count, self.data.len())?;
        Ok(Span::new(&self.data[offset..offset + count]))
    }
}

// Manual impls: a view is copyable whatever `T` is.
impl<T> Clone for Span<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Span<'_, T> {}

impl<T> Default for Span<'_, T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: fmt::Debug> fmt::Debug for Span<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data).finish()
    }
}

impl<T: PartialEq> PartialEq for Span<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T: Eq> Eq for Span<'_, T> {}

impl<T: PartialEq> PartialEq<[T]> for Span<'_, T> {
    fn eq(&self, other: &[T]) -> bool {
        self.data == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for Span<'_, T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.data == other.as_slice()
    }
}

impl<T> Index<usize> for Span<'_, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<'a, T> IntoIterator for Span<'a, T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, T> IntoIterator for &Span<'a, T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, T> From<&'a [T]> for Span<'a, T> {
    fn from(data: &'a [T]) -> Self {
        Self::new(data)
    }
}

impl<'a, T> From<&'a Vec<T>> for Span<'a, T> {
    fn from(data: &'a Vec<T>) -> Self {
        Self::new(data.as_slice())
    }
}

impl<'a, T> From<&'a Box<[T]>> for Span<'a, T> {
    fn from(data: &'a Box<[T]>) -> Self {
        Self::new(data)
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for Span<'a, T> {
    fn from(data: &'a [T; N]) -> Self {
        Self::new(data.as_slice())
    }
}

impl<'a, T, const N: usize> From<FixedSpan<'a, T, N>> for Span<'a, T> {
    fn from(fixed: FixedSpan<'a, T, N>) -> Self {
        fixed.as_span()
    }
}

impl<'a, T> From<SpanMut<'a, T>> for Span<'a, T> {
    fn from(view: SpanMut<'a, T>) -> Self {
        Self::new(view.data)
    }
}

// =============================================================================
// SpanMut: exclusive view
// =============================================================================

pub struct SpanMut<'a, T> {
    data: &'a mut [T],
}

impl<'a, T> SpanMut<'a, T> {
    pub fn new(data: &'a mut [T]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.get_mut(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Shortens the lifetime so the view can be narrowed without giving it up.
    pub fn reborrow(&mut self) -> SpanMut<'_, T> {
        SpanMut::new(self.data)
    }

    pub fn as_span(&self) -> Span<'_, T> {
        Span::new(self.data)
    }

    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.data.fill(value);
    }

    /// # Panics
    ///
    /// Panics if `count > self.len()`.
    pub fn first(self, count: usize) -> SpanMut<'a, T> {
        SpanMut::new(&mut self.data[..count])
    }

    /// # Panics
    ///
    /// Panics if `count > self.len()`.
    pub fn last(self, count: usize) -> SpanMut<'a, T> {
        let len = self.data.len();
        assert!(
            count <= len,
            "last({count}) out of range for span of length {len}"
        );
        SpanMut::new(&mut self.data[len - count..])
    }

    /// # Panics
    ///
    /// Panics if `offset + count > self.len()`.
    pub fn subspan(self, offset: usize, count: usize) -> SpanMut<'a, T> {
        if let Err(err) = check_range(offset, count, self.data.len()) {
            panic!("{err}");
        }
        SpanMut::new(&mut self.data[offset..offset + count])
    }

    pub fn try_subspan(self, offset: usize, count: usize) -> Result<SpanMut<'a, T>, SpanError> {
        check_range(offset, count, self.data.len())?;
        Ok(SpanMut::new(&mut self.data[offset..offset + count]))
    }
}

impl<T: fmt::Debug> fmt::Debug for SpanMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<T> Index<usize> for SpanMut<'_, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for SpanMut<'_, T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

impl<'a, T> IntoIterator for SpanMut<'a, T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter_mut()
    }
}

impl<'a, T> From<&'a mut [T]> for SpanMut<'a, T> {
    fn from(data: &'a mut [T]) -> Self {
        Self::new(data)
    }
}

impl<'a, T> From<&'a mut Vec<T>> for SpanMut<'a, T> {
    fn from(data: &'a mut Vec<T>) -> Self {
        Self::new(data.as_mut_slice())
    }
}

impl<'a, T, const N: usize> From<&'a mut [T; N]> for SpanMut<'a, T> {
    fn from(data: &'a mut [T; N]) -> Self {
        Self::new(data.as_mut_slice())
    }
}

// =============================================================================
// FixedSpan: length in the type
// =============================================================================

pub struct FixedSpan<'a, T, const N: usize> {
    data: &'a [T; N],
}

impl<'a, T, const N: usize> FixedSpan<'a, T, N> {
    pub const EXTENT: usize = N;

    pub const fn new(data: &'a [T; N]) -> Self {
        Self { data }
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn get(&self, index: usize) -> Option<&'a T> {
        self.data.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'a, T> {
        self.data.iter()
    }

    pub fn as_array(&self) -> &'a [T; N] {
        self.data
    }

    pub fn as_span(&self) -> Span<'a, T> {
        Span::new(self.data.as_slice())
    }
}

impl<T, const N: usize> Clone for FixedSpan<'_, T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for FixedSpan<'_, T, N> {}

impl<T: fmt::Debug, const N: usize> fmt::Debug for FixedSpan<'_, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<T: PartialEq, const N: usize> PartialEq for FixedSpan<'_, T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T, const N: usize> Index<usize> for FixedSpan<'_, T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<'a, T, const N: usize> IntoIterator for FixedSpan<'a, T, N> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for FixedSpan<'a, T, N> {
    fn from(data: &'a [T; N]) -> Self {
        Self::new(data)
    }
}

impl<'a, T, const N: usize> TryFrom<&'a [T]> for FixedSpan<'a, T, N> {
    type Error = SpanError;

    fn try_from(data: &'a [T]) -> Result<Self, Self::Error> {
        let actual = data.len();
        let data = <&[T; N]>::try_from(data).map_err(|_| SpanError::LengthMismatch {
            expected: N,
            actual,
        })?;
        Ok(Self::new(data))
    }
}

impl<'a, T, const N: usize> TryFrom<Span<'a, T>> for FixedSpan<'a, T, N> {
    type Error = SpanError;

    fn try_from(view: Span<'a, T>) -> Result<Self, Self::Error> {
        Self::try_from(view.as_slice())
    }
}
