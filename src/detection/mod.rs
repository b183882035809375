mod label_map;
mod photo;

use std::collections::BTreeSet;

use crate::error::Result;

pub use label_map::{
    export_path_for, DetectionExport, LabelMap, LabelMapDetector, RawBox, EXPORT_SUFFIX,
};
pub use photo::TrayImage;

/// Turns a tray photo into the set of food labels seen on it.
///
/// An empty set is a normal outcome. Errors are reported per image.
pub trait Detector {
    fn detect(&self, image: &TrayImage) -> Result<BTreeSet<String>>;
}

/// Detector that always reports the same labels.
#[derive(Debug, Clone, Default)]
pub struct StaticDetector {
    labels: BTreeSet<String>,
}

impl StaticDetector {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }
}

impl Detector for StaticDetector {
    fn detect(&self, _image: &TrayImage) -> Result<BTreeSet<String>> {
        Ok(self.labels.clone())
    }
}
