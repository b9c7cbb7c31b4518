//! Checked sub-slices of caller owned buffers.
//!
//! Bindings that receive a base buffer with an offset and length
//! can use these functions to validate the range once before passing slices
//! to [surface](crate::surface) or [swizzle](crate::swizzle).
/*!
```rust
use blocklinear::view::buffer_view;

let data = [0u8; 16];
let view = buffer_view(&data, 4, 8).unwrap();
assert_eq!(8, view.len());
```
*/
use crate::{ArgumentError, SwizzleError};

/// Returns the `count` bytes of `base` starting at `offset`.
///
/// The base must not be empty, `offset` must be in bounds,
/// and the range must be non empty and fit within `base`.
pub fn buffer_view(base: &[u8], offset: usize, count: usize) -> Result<&[u8], SwizzleError> {
    let range = view_range(base.len(), offset, count)?;
    Ok(&base[range])
}

/// The mutable version of [buffer_view].
pub fn buffer_view_mut(
    base: &mut [u8],
    offset: usize,
    count: usize,
) -> Result<&mut [u8], SwizzleError> {
    let range = view_range(base.len(), offset, count)?;
    Ok(&mut base[range])
}

fn view_range(
    len: usize,
    offset: usize,
    count: usize,
) -> Result<core::ops::Range<usize>, ArgumentError> {
    if len == 0 {
        return Err(ArgumentError::EmptyBuffer);
    }
    if offset >= len {
        return Err(ArgumentError::OffsetOutOfRange { offset, len });
    }
    match offset.checked_add(count) {
        Some(end) if count > 0 && end <= len => Ok(offset..end),
        _ => Err(ArgumentError::CountOutOfRange { offset, count, len }),
    }
}
