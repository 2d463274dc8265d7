use readtrack_core::{CustomBookForm, EntryId, ReadingStatus};

/// Popup dialog types.
#[derive(Debug)]
pub enum Popup {
    /// Hand-entry form for a book the catalog does not know.
    AddBook(AddBookForm),
    /// Second step of a delete; the entry is already marked pending.
    DeleteConfirm { id: EntryId, title: String },
    /// Pick a reading status.
    SetStatus { id: EntryId, selected: usize },
    /// Type an exact progress percentage.
    SetProgress { id: EntryId, input: FormField },
    /// Key reference.
    Help,
}

impl Popup {
    pub fn set_status(id: EntryId, current: ReadingStatus) -> Self {
        let selected = ReadingStatus::ALL
            .iter()
            .position(|status| *status == current)
            .unwrap_or(0);
        Self::SetStatus { id, selected }
    }

    pub fn set_progress(id: EntryId, current: u8) -> Self {
        Self::SetProgress {
            id,
            input: FormField::with_value("Progress %", current.to_string()),
        }
    }
}

/// Form for adding a custom book.
#[derive(Debug)]
pub struct AddBookForm {
    pub fields: Vec<FormField>,
    pub active_field: usize,
}

/// A single form field with label and text input.
#[derive(Debug)]
pub struct FormField {
    pub label: String,
    pub value: String,
    pub cursor: usize,
}

impl FormField {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            cursor: 0,
        }
    }

    pub fn with_value(label: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        Self {
            label: label.into(),
            value,
            cursor,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.value[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.value.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.value[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.value[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.value.len());
        }
    }
}

const TITLE: usize = 0;
const AUTHOR: usize = 1;
const YEAR: usize = 2;
const COVER_URL: usize = 3;

impl AddBookForm {
    pub fn new() -> Self {
        Self {
            fields: vec![
                FormField::new("Title *"),
                FormField::new("Author *"),
                FormField::new("Year"),
                FormField::new("Cover URL"),
            ],
            active_field: 0,
        }
    }

    pub fn active_field_mut(&mut self) -> &mut FormField {
        &mut self.fields[self.active_field]
    }

    /// Tab wraps around, unlike the arrow keys.
    pub fn next_field(&mut self) {
        self.active_field = (self.active_field + 1) % self.fields.len();
    }

    pub fn prev_field(&mut self) {
        self.active_field = self
            .active_field
            .checked_sub(1)
            .unwrap_or(self.fields.len() - 1);
    }

    pub fn to_form(&self) -> CustomBookForm {
        CustomBookForm {
            title: self.fields[TITLE].value.clone(),
            author: self.fields[AUTHOR].value.clone(),
            year: self.fields[YEAR].value.clone(),
            cover_url: self.fields[COVER_URL].value.clone(),
        }
    }
}

impl Default for AddBookForm {
    fn default() -> Self {
        Self::new()
    }
}
