//! Edit notifications and their accumulation across nested editing.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::warn;

bitflags! {
    /// What an edit touched.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
    pub struct EditMask: u8 {
        /// Characters were inserted, removed or replaced.
        const CHARACTERS = 0x01;
        /// Attributes changed.
        const ATTRIBUTES = 0x02;
    }
}

/// Net effect of one or more edits.
///
/// `range` is in post-edit coordinates; `delta` is the change in length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditedChange {
    pub mask: EditMask,
    pub range: Range<usize>,
    pub delta: isize,
}

impl EditedChange {
    /// A change replacing `old_range` and shifting the text by `delta`.
    #[must_use]
    pub fn new(mask: EditMask, old_range: Range<usize>, delta: isize) -> Self {
        let end = old_range.end.saturating_add_signed(delta).max(old_range.start);
        Self {
            mask,
            range: old_range.start..end,
            delta,
        }
    }

    /// Fold a later edit into this one.
    ///
    /// `old_range` is in the coordinates current before the later edit.
    pub fn merge(&mut self, mask: EditMask, old_range: Range<usize>, delta: isize) {
        let later = Self::new(mask, old_range.clone(), delta);
        let shift = |pos: usize, edge: usize| {
            if pos <= old_range.start {
                pos
            } else if pos >= old_range.end {
                pos.saturating_add_signed(delta)
            } else {
                edge
            }
        };
        let start = shift(self.range.start, later.range.start);
        let end = shift(self.range.end, later.range.end);

        self.range = start.min(later.range.start)..end.max(later.range.end);
        self.mask |= mask;
        self.delta += delta;
    }
}

/// Pending change for the current editing session.
#[derive(Debug, Default)]
pub(crate) struct EditTracker {
    depth: usize,
    pending: Option<EditedChange>,
}

impl EditTracker {
    pub fn begin(&mut self) {
        self.depth += 1;
    }

    /// Close one level. Returns the net change when the outermost level closes.
    pub fn end(&mut self) -> Option<EditedChange> {
        if self.depth == 0 {
            warn!("end_editing called without matching begin_editing");
            return None;
        }
        self.depth -= 1;
        if self.depth == 0 {
            self.pending.take()
        } else {
            None
        }
    }

    pub fn is_editing(&self) -> bool {
        self.depth > 0
    }

    pub fn record(&mut self, mask: EditMask, old_range: Range<usize>, delta: isize) {
        match &mut self.pending {
            Some(pending) => pending.merge(mask, old_range, delta),
            None => self.pending = Some(EditedChange::new(mask, old_range, delta)),
        }
    }
}
