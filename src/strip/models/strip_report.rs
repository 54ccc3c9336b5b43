use serde::Serialize;
use std::path::PathBuf;

use crate::strip::bbox::BBox;

/// Summary of one strip run, printed with `--json`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StripReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub source_width: u32,
    pub source_height: u32,
    /// Pixels turned transparent by the white threshold.
    pub cleared_pixels: u64,
    /// `null` when the recolored image had no visible pixels.
    pub bbox: Option<BBox>,
    pub width: u32,
    pub height: u32,
}

impl StripReport {
    /// Whether the output is smaller than the source.
    pub fn was_cropped(&self) -> bool {
        (self.width, self.height) != (self.source_width, self.source_height)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::StripReport;
    use crate::strip::bbox::BBox;

    fn report(bbox: Option<BBox>, width: u32, height: u32) -> StripReport {
        StripReport {
            input: PathBuf::from("public/full-logo.png"),
            output: PathBuf::from("public/full-logo-transparent.png"),
            source_width: 4,
            source_height: 1,
            cleared_pixels: 2,
            bbox,
            width,
            height,
        }
    }

    #[test]
    fn serializes_camel_case_fields() {
        let bbox = BBox {
            left: 2,
            top: 0,
            right: 4,
            bottom: 1,
        };
        let value = serde_json::to_value(report(Some(bbox), 2, 1)).unwrap();

        assert_eq!(value["input"], "public/full-logo.png");
        assert_eq!(value["sourceWidth"], 4);
        assert_eq!(value["clearedPixels"], 2);
        assert_eq!(value["bbox"]["left"], 2);
        assert_eq!(value["bbox"]["right"], 4);
        assert_eq!(value["width"], 2);
    }

    #[test]
    fn missing_bbox_is_null() {
        let r = report(None, 4, 1);
        let value = serde_json::to_value(&r).unwrap();

        assert!(value["bbox"].is_null());
        assert!(!r.was_cropped());
    }
}
