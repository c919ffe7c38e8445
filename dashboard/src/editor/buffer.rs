use common::machine::MachineRecord;
use serde::Serialize;

/// Platforms offered while editing. The field itself stays free-form.
pub const PLATFORM_CHOICES: [&str; 3] = ["VNPT Cloud", "Viettel Cloud", "TTCNTT LC"];

/// Pending values for the editable fields of one machine record. This is
/// also the wire body of `PUT /update/{id}`, so read-only and identity
/// fields never appear in it.
#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    pub hostname: String,
    pub ip: String,
    pub platform: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Hostname,
    Ip,
    Platform,
}

impl EditField {
    fn next(&self) -> EditField {
        match self {
            EditField::Hostname => EditField::Ip,
            EditField::Ip => EditField::Platform,
            EditField::Platform => EditField::Hostname,
        }
    }

    fn prev(&self) -> EditField {
        match self {
            EditField::Hostname => EditField::Platform,
            EditField::Ip => EditField::Hostname,
            EditField::Platform => EditField::Ip,
        }
    }
}

#[derive(Debug)]
struct ActiveEdit {
    id: String,
    buffer: EditBuffer,
    field: EditField,
}

/// Inline record editor. At most one row is ever in edit mode: beginning
/// an edit discards any other active buffer.
#[derive(Debug, Default)]
pub struct Editor {
    active: Option<ActiveEdit>,
}

impl Editor {
    pub fn new() -> Editor {
        Editor { active: None }
    }

    /// Snapshot the editable fields of `record` into a fresh buffer and
    /// make `id` the exclusive edit target.
    pub fn begin(&mut self, id: &str, record: &MachineRecord) {
        self.active = Some(ActiveEdit {
            id: id.to_string(),
            buffer: EditBuffer {
                hostname: record.hostname.clone(),
                ip: record.ip.clone(),
                platform: record.platform.clone(),
            },
            field: EditField::Hostname,
        });
    }

    /// Discard the buffer without any network call.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Discard the buffer after a successful commit for `id`. A buffer
    /// opened for a different row in the meantime is left alone.
    pub fn finish(&mut self, id: &str) {
        if self.is_editing(id) {
            self.active = None;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_editing(&self, id: &str) -> bool {
        self.active.as_ref().is_some_and(|edit| edit.id == id)
    }

    pub fn buffer(&self) -> Option<&EditBuffer> {
        self.active.as_ref().map(|edit| &edit.buffer)
    }

    pub fn field(&self) -> Option<EditField> {
        self.active.as_ref().map(|edit| edit.field)
    }

    pub fn next_field(&mut self) {
        if let Some(edit) = self.active.as_mut() {
            edit.field = edit.field.next();
        }
    }

    pub fn prev_field(&mut self) {
        if let Some(edit) = self.active.as_mut() {
            edit.field = edit.field.prev();
        }
    }

    pub fn push_char(&mut self, value: char) {
        if let Some(edit) = self.active.as_mut() {
            field_mut(&mut edit.buffer, edit.field).push(value);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(edit) = self.active.as_mut() {
            field_mut(&mut edit.buffer, edit.field).pop();
        }
    }

    /// Step through the platform suggestions. Only meaningful while the
    /// platform field is focused; a value outside the list starts from
    /// the first suggestion.
    pub fn cycle_platform(&mut self, step: isize) {
        let Some(edit) = self.active.as_mut() else {
            return;
        };
        if edit.field != EditField::Platform {
            return;
        }

        let count = PLATFORM_CHOICES.len() as isize;
        let next = match PLATFORM_CHOICES
            .iter()
            .position(|choice| *choice == edit.buffer.platform)
        {
            Some(current) => (current as isize + step).rem_euclid(count),
            None => 0,
        };
        edit.buffer.platform = PLATFORM_CHOICES[next as usize].to_string();
    }

    /// The commit payload for the active edit. The buffer stays active
    /// until the commit succeeds, so a failed call can be retried.
    pub fn commit_payload(&self) -> Option<(String, EditBuffer)> {
        self.active
            .as_ref()
            .map(|edit| (edit.id.clone(), edit.buffer.clone()))
    }
}

fn field_mut(buffer: &mut EditBuffer, field: EditField) -> &mut String {
    match field {
        EditField::Hostname => &mut buffer.hostname,
        EditField::Ip => &mut buffer.ip,
        EditField::Platform => &mut buffer.platform,
    }
}
