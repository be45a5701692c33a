//! Undo logs and collision probes
//!
//! Both are side channels of a single draw pass. An undo log is positional:
//! entry N belongs to the Nth pixel the draw visited. Replaying it only makes
//! sense with the exact geometry, clip and call order that produced it.

use crate::color::Color;

/// Ordered colors captured during a draw, one per visited pixel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoLog {
    entries: Vec<u32>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, color: Color) {
        self.entries.push(color.to_argb());
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Color> {
        self.entries.get(index).copied().map(Color::from_argb)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget all entries, keeping the allocation for the next capture
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        self.entries.iter().copied().map(Color::from_argb)
    }

    /// Flat byte stream, 4 bytes per entry in A, R, G, B order, no header
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.entries.len() * 4);
        for argb in &self.entries {
            out.extend_from_slice(&argb.to_be_bytes());
        }
        out
    }

    /// Parse a stream written by `to_bytes`
    ///
    /// A trailing partial entry cannot belong to any pixel and is dropped.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let chunks = bytes.chunks_exact(4);
        let leftover = chunks.remainder().len();
        if leftover != 0 {
            tracing::warn!(
                "undo stream of {} bytes has {} trailing bytes, ignoring them",
                bytes.len(),
                leftover
            );
        }
        Self {
            entries: chunks
                .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
                .collect(),
        }
    }
}

/// Reports whether a draw overwrote anything but the expected background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionProbe {
    background: Color,
    hit: bool,
}

impl CollisionProbe {
    pub fn new(background: Color) -> Self {
        Self {
            background,
            hit: false,
        }
    }

    #[inline]
    pub fn background(&self) -> Color {
        self.background
    }

    #[inline]
    pub fn hit(&self) -> bool {
        self.hit
    }

    /// Rearm for another draw against the same background
    pub fn reset(&mut self) {
        self.hit = false;
    }

    #[inline]
    pub(crate) fn observe(&mut self, previous: Color) {
        self.hit |= previous != self.background;
    }
}
