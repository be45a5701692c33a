//! Draw modes
//!
//! Every primitive takes one `Pen`: where colors come from (flat, computed,
//! or replayed from a log) plus optional sinks fed during the same pass.
//!
//! ```
//! use rasterkit::{Color, CollisionProbe, FrameBuffer, Pen, UndoLog};
//!
//! let mut fb = FrameBuffer::new(64, 64);
//! let mut undo = UndoLog::new();
//! let mut probe = CollisionProbe::new(Color::EMPTY);
//! fb.fill_rectangle(4, 4, 20, 20, Pen::solid(Color::RED).record(&mut undo).probe(&mut probe));
//! assert!(!probe.hit());
//!
//! fb.fill_rectangle(4, 4, 20, 20, Pen::restore(&undo));
//! assert_eq!(fb.get_pixel(10, 10), Color::EMPTY);
//! ```

use super::undo::{CollisionProbe, UndoLog};
use crate::color::Color;
use crate::paint::ColorAlgorithm;

enum Source<'a> {
    Solid(Color),
    Algorithm(&'a dyn ColorAlgorithm),
    /// Put back overwritten colors; first visit of a pixel wins
    Restore { log: &'a UndoLog, cursor: usize },
    /// Re-emit produced colors; last visit of a pixel wins
    Redraw { log: &'a UndoLog, cursor: usize },
}

pub struct Pen<'a> {
    source: Source<'a>,
    undo: Option<&'a mut UndoLog>,
    output: Option<&'a mut UndoLog>,
    probe: Option<&'a mut CollisionProbe>,
    pending: Vec<(u32, u32, Color)>,
}

impl<'a> Pen<'a> {
    fn with_source(source: Source<'a>) -> Self {
        Self {
            source,
            undo: None,
            output: None,
            probe: None,
            pending: Vec::new(),
        }
    }

    pub fn solid(color: Color) -> Self {
        Self::with_source(Source::Solid(color))
    }

    /// Color each pixel with `algorithm`, given the pixel already there
    pub fn algorithm(algorithm: &'a dyn ColorAlgorithm) -> Self {
        Self::with_source(Source::Algorithm(algorithm))
    }

    /// Undo a draw: write back the colors an `.record()` pass captured
    ///
    /// Writes are applied once the primitive finishes, newest visit first,
    /// so a pixel the shape touched twice gets its original color back.
    pub fn restore(log: &'a UndoLog) -> Self {
        Self::with_source(Source::Restore { log, cursor: 0 })
    }

    /// Repeat a draw exactly from the colors a `.record_output()` pass captured
    pub fn redraw(log: &'a UndoLog) -> Self {
        Self::with_source(Source::Redraw { log, cursor: 0 })
    }

    /// Append every overwritten color to `log`
    pub fn record(mut self, log: &'a mut UndoLog) -> Self {
        self.undo = Some(log);
        self
    }

    /// Append every produced color to `log`
    pub fn record_output(mut self, log: &'a mut UndoLog) -> Self {
        self.output = Some(log);
        self
    }

    /// Compare every overwritten color against the probe's background
    pub fn probe(mut self, probe: &'a mut CollisionProbe) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Flat color with no side channels: eligible for run fills
    #[inline]
    pub(crate) fn plain_color(&self) -> Option<Color> {
        match self.source {
            Source::Solid(c) if self.undo.is_none() && self.output.is_none() && self.probe.is_none() => {
                Some(c)
            },
            _ => None,
        }
    }

    /// Color for the next visited pixel, or `None` once a replay log runs dry
    #[inline]
    pub(crate) fn next_color(&mut self, x: i32, y: i32, dest: Color) -> Option<Color> {
        match &mut self.source {
            Source::Solid(c) => Some(*c),
            Source::Algorithm(a) => Some(a.color_at(x, y, dest)),
            Source::Restore { log, cursor } | Source::Redraw { log, cursor } => {
                let c = log.get(*cursor)?;
                *cursor += 1;
                Some(c)
            },
        }
    }

    /// Feed the side channels for one visited pixel
    #[inline]
    pub(crate) fn observe(&mut self, previous: Color, produced: Color) {
        if let Some(probe) = self.probe.as_deref_mut() {
            probe.observe(previous);
        }
        if let Some(log) = self.undo.as_deref_mut() {
            log.push(previous);
        }
        if let Some(log) = self.output.as_deref_mut() {
            log.push(produced);
        }
    }

    #[inline]
    pub(crate) fn defers_writes(&self) -> bool {
        matches!(self.source, Source::Restore { .. })
    }

    #[inline]
    pub(crate) fn defer(&mut self, x: u32, y: u32, color: Color) {
        self.pending.push((x, y, color));
    }

    pub(crate) fn take_pending(&mut self) -> Vec<(u32, u32, Color)> {
        std::mem::take(&mut self.pending)
    }
}

impl From<Color> for Pen<'_> {
    fn from(color: Color) -> Self {
        Pen::solid(color)
    }
}

impl<'a, A: ColorAlgorithm> From<&'a A> for Pen<'a> {
    fn from(algorithm: &'a A) -> Self {
        Pen::algorithm(algorithm)
    }
}
