//! Append-only colour strip visualising collected objects.

use labyrinth_core::Rgba;
use thiserror::Error;

/// Colour appended to the strip for every pickup.
pub const PROGRESS_MARKER: Rgba = Rgba::from_rgba(5, 90, 90, 1);

/// Preallocated 1xN strip of packed colours; the filled prefix grows by one
/// entry per pickup and never shrinks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressEncoding {
    texels: Vec<u32>,
    filled: usize,
}

impl ProgressEncoding {
    /// Creates an empty strip with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            texels: vec![0; capacity],
            filled: 0,
        }
    }

    /// Writes `color` at the current fill index and returns that index.
    pub fn record_pickup(&mut self, color: Rgba) -> Result<usize, ProgressError> {
        let index = self.filled;
        let Some(slot) = self.texels.get_mut(index) else {
            return Err(ProgressError::Full {
                capacity: self.texels.len(),
            });
        };
        *slot = color.packed();
        self.filled += 1;
        Ok(index)
    }

    /// Number of recorded entries.
    #[must_use]
    pub const fn filled(&self) -> usize {
        self.filled
    }

    /// Total number of entries the strip can hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.texels.len()
    }

    /// Whether every slot has been written.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.filled >= self.texels.len()
    }

    /// Recorded colours in pickup order.
    pub fn entries(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.texels[..self.filled]
            .iter()
            .map(|&texel| Rgba::from_packed(texel))
    }

    /// Packed texels including the unfilled tail.
    #[must_use]
    pub fn texels(&self) -> &[u32] {
        &self.texels
    }

    /// Texels expanded to RGBA8 bytes, ready for a texture upload.
    #[must_use]
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.texels
            .iter()
            .flat_map(|texel| texel.to_le_bytes())
            .collect()
    }
}

/// Errors raised while recording progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ProgressError {
    /// Every slot of the strip is already filled.
    #[error("progress strip is full ({capacity} entries)")]
    Full {
        /// Capacity of the strip.
        capacity: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order_until_full() {
        let mut progress = ProgressEncoding::with_capacity(3);
        let other = Rgba::from_rgb(1, 2, 3);

        assert_eq!(progress.record_pickup(PROGRESS_MARKER), Ok(0));
        assert_eq!(progress.record_pickup(other), Ok(1));
        assert_eq!(
            progress.texels(),
            &[PROGRESS_MARKER.packed(), other.packed(), 0]
        );
        assert_eq!(
            progress.entries().collect::<Vec<_>>(),
            vec![PROGRESS_MARKER, other]
        );

        assert_eq!(progress.record_pickup(other), Ok(2));
        assert!(progress.is_full());
        assert_eq!(
            progress.record_pickup(other),
            Err(ProgressError::Full { capacity: 3 })
        );
        assert_eq!(progress.filled(), 3);
    }

    #[test]
    fn bytes_follow_upload_order() {
        let mut progress = ProgressEncoding::with_capacity(2);
        let _ = progress.record_pickup(PROGRESS_MARKER).expect("room left");
        assert_eq!(progress.to_rgba_bytes(), vec![5, 90, 90, 1, 0, 0, 0, 0]);
    }
}
