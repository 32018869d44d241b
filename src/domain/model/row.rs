// Typed export rows and the per-kind field schemas they are checked against

use serde::{Deserialize, Serialize};

use crate::domain::model::{ExportRecord, ANNOTATION_FIELD, FRAME_FIELD};

/// Ordered field/value pairs with unique field names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Row::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a field; an existing field keeps its position and gets the new value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Field names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Values in header order; extra fields are dropped and missing ones are empty
    pub fn project<'a>(&'a self, header: &'a [String]) -> impl Iterator<Item = &'a str> + 'a {
        header
            .iter()
            .map(move |column| self.get(column).unwrap_or(""))
    }
}

impl From<ExportRecord> for Row {
    fn from(record: ExportRecord) -> Self {
        Row::new()
            .with(FRAME_FIELD, record.frame_number.to_string())
            .with(ANNOTATION_FIELD, record.annotation)
    }
}

impl From<&ExportRecord> for Row {
    fn from(record: &ExportRecord) -> Self {
        Row::from(record.clone())
    }
}

/// Export table kinds and their declared field lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Annotation,
    Tracking,
}

impl ExportKind {
    /// Full ordered column list for the kind
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            ExportKind::Annotation => &[FRAME_FIELD, ANNOTATION_FIELD],
            ExportKind::Tracking => &[
                FRAME_FIELD,
                "Object_ID",
                "Class_Name",
                "Confidence",
                "BBox_X1",
                "BBox_Y1",
                "BBox_X2",
                "BBox_Y2",
                "Center_X",
                "Center_Y",
                "Width",
                "Height",
                "Area",
                "Left_X_Position",
                "Left_Y_Position",
                "Left_Size",
                "Right_X_Position",
                "Right_Y_Position",
                "Right_Size",
            ],
        }
    }

    /// Columns a header must contain for a write to proceed
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            ExportKind::Annotation => &[FRAME_FIELD, ANNOTATION_FIELD],
            ExportKind::Tracking => &[FRAME_FIELD, "Object_ID", "Class_Name"],
        }
    }

    /// First required field missing from `header`, if any
    pub fn missing_field(&self, header: &[String]) -> Option<&'static str> {
        self.required_fields()
            .iter()
            .copied()
            .find(|required| !header.iter().any(|column| column == required))
    }
}
