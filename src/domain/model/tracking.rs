// Tracking export rows: one detected object in one frame

use serde::{Deserialize, Serialize};

use crate::domain::model::row::Row;
use crate::domain::model::{FrameNumber, FRAME_FIELD};

/// Bounding box in pixel coordinates (x1, y1) top-left, (x2, y2) bottom-right
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    pub fn center(&self) -> (f64, f64) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}

/// A tracked detection as produced by an external detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub tracking_id: Option<i64>,
    pub class_name: String,
    pub confidence: f64,
    pub bbox: BoundingBox,
}

/// Which half of the frame an object's centre falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSide {
    Left,
    Right,
}

/// Flattened tracking row ready for CSV export
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingRecord {
    pub frame_number: FrameNumber,
    pub detection: Detection,
    pub side: FrameSide,
}

impl TrackingRecord {
    /// Classify a detection against the horizontal midpoint of the frame
    pub fn new(frame_number: FrameNumber, detection: Detection, frame_width: u32) -> Self {
        let (center_x, _) = detection.bbox.center();
        let side = if center_x < frame_width as f64 / 2.0 {
            FrameSide::Left
        } else {
            FrameSide::Right
        };
        Self {
            frame_number,
            detection,
            side,
        }
    }
}

impl From<&TrackingRecord> for Row {
    fn from(record: &TrackingRecord) -> Self {
        let bbox = record.detection.bbox;
        let (center_x, center_y) = bbox.center();
        let area = bbox.area();
        let placed = |value: f64| value.to_string();
        let zero = || "0".to_string();

        let (left_x, left_y, left_size, right_x, right_y, right_size) = match record.side {
            FrameSide::Left => (placed(center_x), placed(center_y), placed(area), zero(), zero(), zero()),
            FrameSide::Right => (zero(), zero(), zero(), placed(center_x), placed(center_y), placed(area)),
        };

        Row::new()
            .with(FRAME_FIELD, record.frame_number.to_string())
            .with("Object_ID", record.detection.tracking_id.unwrap_or(0).to_string())
            .with("Class_Name", record.detection.class_name.clone())
            .with("Confidence", record.detection.confidence.to_string())
            .with("BBox_X1", bbox.x1.to_string())
            .with("BBox_Y1", bbox.y1.to_string())
            .with("BBox_X2", bbox.x2.to_string())
            .with("BBox_Y2", bbox.y2.to_string())
            .with("Center_X", center_x.to_string())
            .with("Center_Y", center_y.to_string())
            .with("Width", bbox.width().to_string())
            .with("Height", bbox.height().to_string())
            .with("Area", area.to_string())
            .with("Left_X_Position", left_x)
            .with("Left_Y_Position", left_y)
            .with("Left_Size", left_size)
            .with("Right_X_Position", right_x)
            .with("Right_Y_Position", right_y)
            .with("Right_Size", right_size)
    }
}

impl From<TrackingRecord> for Row {
    fn from(record: TrackingRecord) -> Self {
        Row::from(&record)
    }
}
