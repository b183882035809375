use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::detection::{Detector, TrayImage};
use crate::error::{Result, TrayError};

/// Suffix of the detection export written next to each tray photo.
pub const EXPORT_SUFFIX: &str = ".detections.json";

/// Class table of a trained detector: class id to label.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelMap {
    pub names: BTreeMap<u32, String>,
}

/// One predicted region as exported by the detector.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBox {
    pub cls: u32,
    pub conf: f32,
    /// [x_min, y_min, x_max, y_max]
    #[serde(default)]
    pub xyxy: Option<[f32; 4]>,
}

/// Raw detector output for one image.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetectionExport {
    #[serde(default)]
    pub boxes: Vec<RawBox>,
}

/// Detector backed by a label map artifact and per-image detection exports.
///
/// The classifier itself runs outside this process; this adapter turns its
/// exported boxes into a deduplicated set of labels.
#[derive(Debug, Clone)]
pub struct LabelMapDetector {
    labels: LabelMap,
    confidence_threshold: f32,
}

impl LabelMapDetector {
    /// Load the label map. Any failure here is a startup error.
    pub fn load<P: AsRef<Path>>(model_path: P, confidence_threshold: f32) -> Result<Self> {
        let model_path = model_path.as_ref();
        let model_error = |reason: String| TrayError::ModelLoad {
            path: model_path.display().to_string(),
            reason,
        };

        let content = fs::read_to_string(model_path).map_err(|e| model_error(e.to_string()))?;
        let labels: LabelMap =
            serde_json::from_str(&content).map_err(|e| model_error(e.to_string()))?;
        if labels.names.is_empty() {
            return Err(model_error("label map has no classes".to_string()));
        }

        info!(
            path = %model_path.display(),
            classes = labels.names.len(),
            "Loaded detector label map"
        );

        Ok(Self::new(labels, confidence_threshold))
    }

    pub fn new(labels: LabelMap, confidence_threshold: f32) -> Self {
        Self {
            labels,
            confidence_threshold,
        }
    }

    pub fn class_count(&self) -> usize {
        self.labels.names.len()
    }

    /// Map raw boxes to labels, dropping low-confidence boxes.
    pub fn labels_for(&self, export: &DetectionExport) -> Result<BTreeSet<String>> {
        let mut detected = BTreeSet::new();
        for raw in &export.boxes {
            if raw.conf < self.confidence_threshold {
                debug!(cls = raw.cls, conf = raw.conf, "Dropping low-confidence box");
                continue;
            }
            let label = self.labels.names.get(&raw.cls).ok_or_else(|| {
                TrayError::Detection(format!("class id {} is not in the label map", raw.cls))
            })?;
            detected.insert(label.clone());
        }
        Ok(detected)
    }
}

impl Detector for LabelMapDetector {
    fn detect(&self, image: &TrayImage) -> Result<BTreeSet<String>> {
        let export_path = export_path_for(image.path());
        let content = fs::read_to_string(&export_path).map_err(|e| {
            TrayError::Detection(format!(
                "cannot read detections {}: {}",
                export_path.display(),
                e
            ))
        })?;
        let export: DetectionExport = serde_json::from_str(&content).map_err(|e| {
            TrayError::Detection(format!(
                "malformed detections {}: {}",
                export_path.display(),
                e
            ))
        })?;

        let labels = self.labels_for(&export)?;
        info!(
            image = %image.path().display(),
            boxes = export.boxes.len(),
            labels = labels.len(),
            "Detection finished"
        );
        Ok(labels)
    }
}

/// `<image path>.detections.json`
pub fn export_path_for(image_path: &Path) -> PathBuf {
    let mut path = OsString::from(image_path.as_os_str());
    path.push(EXPORT_SUFFIX);
    PathBuf::from(path)
}
