//! Undo/redo history with lazy snapshots.
//!
//! A gesture's first mutation captures a *pending* snapshot of the state
//! before it; `commit` turns that snapshot into an undo step. Mutations that
//! are never committed stay in `pending` and are either folded into the next
//! commit or reverted by `undo`.

use crate::document::Document;
use crate::shapes::ShapeId;
use crate::time::now_millis;
use std::collections::VecDeque;

/// Default number of undo steps kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// A deep copy of document and selection.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub document: Document,
    pub selection: Vec<ShapeId>,
    /// Human-readable name of the step ("Draw rectangle", "Move").
    pub label: String,
    /// When the entry was created or last squashed (Unix millis).
    pub timestamp: u64,
    /// Whether later squash commits may merge into this entry.
    squash: bool,
}

impl HistoryEntry {
    fn new(document: &Document, selection: &[ShapeId], label: &str) -> Self {
        Self {
            document: document.clone(),
            selection: selection.to_vec(),
            label: label.to_string(),
            timestamp: now_millis(),
            squash: false,
        }
    }
}

/// State to put back into the store after an undo or redo.
#[derive(Debug, Clone, PartialEq)]
pub struct Restore {
    pub document: Document,
    pub selection: Vec<ShapeId>,
    /// Label of the step that was undone or redone.
    pub label: String,
}

impl From<HistoryEntry> for Restore {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            document: entry.document,
            selection: entry.selection,
            label: entry.label,
        }
    }
}

/// Capacity-bounded undo/redo stacks.
#[derive(Debug, Clone)]
pub struct History {
    past: VecDeque<HistoryEntry>,
    future: Vec<HistoryEntry>,
    pending: Option<HistoryEntry>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    /// Create an empty history keeping at most `capacity` steps (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            pending: None,
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot the state before a mutation, once per gesture.
    ///
    /// Returns `true` if a new pending entry was created. Any capture clears
    /// the redo stack.
    pub fn capture(&mut self, document: &Document, selection: &[ShapeId]) -> bool {
        self.future.clear();
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(HistoryEntry::new(document, selection, ""));
        true
    }

    /// Turn the pending snapshot into an undo step.
    ///
    /// With `squash`, the step merges into the previous one if that one was
    /// also committed with `squash`: the older snapshot is kept so undo
    /// returns to the state before the whole run. Returns `false` if nothing
    /// was pending.
    pub fn commit(&mut self, label: &str, squash: bool) -> bool {
        let Some(mut entry) = self.pending.take() else {
            return false;
        };

        if squash {
            if let Some(last) = self.past.back_mut().filter(|e| e.squash) {
                last.label = label.to_string();
                last.timestamp = now_millis();
                log::debug!("Squashed history entry '{}' ({} steps)", label, self.past.len());
                return true;
            }
        }

        entry.label = label.to_string();
        entry.timestamp = now_millis();
        entry.squash = squash;
        self.past.push_back(entry);
        while self.past.len() > self.capacity {
            self.past.pop_front();
        }
        log::debug!("Committed history entry '{}' ({} steps)", label, self.past.len());
        true
    }

    /// Step back. `current` is the live state, pushed onto the redo stack.
    ///
    /// An uncommitted gesture is undone first. Returns `None` if there is
    /// nothing to undo.
    pub fn undo(&mut self, document: &Document, selection: &[ShapeId]) -> Option<Restore> {
        let target = match self.pending.take() {
            Some(pending) => pending,
            None => self.past.pop_back()?,
        };
        self.future
            .push(HistoryEntry::new(document, selection, &target.label));
        if self.future.len() > self.capacity {
            self.future.remove(0);
        }
        log::debug!("Undo '{}'", target.label);
        Some(target.into())
    }

    /// Step forward. Returns `None` if there is nothing to redo.
    pub fn redo(&mut self, document: &Document, selection: &[ShapeId]) -> Option<Restore> {
        let target = self.future.pop()?;
        self.pending = None;
        self.past
            .push_back(HistoryEntry::new(document, selection, &target.label));
        while self.past.len() > self.capacity {
            self.past.pop_front();
        }
        log::debug!("Redo '{}'", target.label);
        Some(target.into())
    }

    /// Remove the pending snapshot without committing it.
    pub fn take_pending(&mut self) -> Option<Restore> {
        self.pending.take().map(Restore::from)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.pending.is_some() || !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of committed undo steps.
    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    /// Number of redo steps.
    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    /// Label of the step `undo` would revert.
    pub fn undo_label(&self) -> Option<&str> {
        match &self.pending {
            Some(p) => Some(p.label.as_str()),
            None => self.past.back().map(|e| e.label.as_str()),
        }
    }

    /// Label of the step `redo` would reapply.
    pub fn redo_label(&self) -> Option<&str> {
        self.future.last().map(|e| e.label.as_str())
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.pending = None;
    }
}
