use crate::records::{Record, RecordId, RecordPatch};

/// Working copy of the records a view is editing. Seeded from the store,
/// mutated locally by patches, and pushed back whole on save.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditBuffer {
    records: Vec<Record>,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole buffer with a fresh copy from the store.
    pub fn seed(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    /// Merges a patch into the record with this id. Unknown ids and
    /// mismatched record kinds leave the buffer untouched.
    pub fn patch(&mut self, id: RecordId, patch: RecordPatch) -> bool {
        match self.records.iter_mut().find(|record| record.id() == id) {
            Some(record) => record.apply(patch),
            None => false,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SaveStatus {
    #[default]
    Idle,
    Unsaved,
    Saving,
    Saved,
    Error,
}

/// Edit/save lifecycle for one unit of work. A single post form and a whole
/// member table run the same machine; only the payload differs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditSession {
    status: SaveStatus,
    editing: bool,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SaveStatus {
        self.status
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Opens the edit session. Fields become interactive and the unit is
    /// marked unsaved right away, before any keystroke.
    pub fn enter_edit(&mut self) {
        if self.editing {
            return;
        }
        self.editing = true;
        self.status = SaveStatus::Unsaved;
    }

    /// Records a field mutation. Outside an edit session this is a no-op.
    /// While a save is in flight the saving marker stays up; the buffer
    /// already holds the new keystrokes.
    pub fn note_patch(&mut self) {
        if self.editing && self.status != SaveStatus::Saving {
            self.status = SaveStatus::Unsaved;
        }
    }

    /// Starts a save. Returns false, changing nothing, when no edit session
    /// is open or another save is already in flight.
    pub fn begin_save(&mut self) -> bool {
        if !self.editing {
            return false;
        }
        if !matches!(self.status, SaveStatus::Unsaved | SaveStatus::Error) {
            return false;
        }
        self.status = SaveStatus::Saving;
        true
    }

    /// The in-flight save landed. The unit flashes saved and drops back to
    /// read-only.
    pub fn save_succeeded(&mut self) {
        if self.status == SaveStatus::Saving {
            self.status = SaveStatus::Saved;
            self.editing = false;
        }
    }

    /// The in-flight save failed. The session stays open with the edits
    /// intact so the user can correct and retry.
    pub fn save_failed(&mut self) {
        if self.status == SaveStatus::Saving {
            self.status = SaveStatus::Error;
        }
    }

    /// Ends the saved flash once its display delay has elapsed.
    pub fn display_elapsed(&mut self) {
        if self.status == SaveStatus::Saved {
            self.status = SaveStatus::Idle;
        }
    }
}
