use anyhow::Context;

/// Number of classes of the COCO-trained YOLOR models this parser ships for.
pub const DEFAULT_NUM_CLASSES: usize = 80;

/// Per-class minimum confidence, indexed by class id.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassThresholds {
    thresholds: Vec<f32>,
}

impl ClassThresholds {
    /// Same threshold for every class.
    pub fn uniform(threshold: f32, num_classes: usize) -> Self {
        Self {
            thresholds: vec![threshold; num_classes],
        }
    }

    pub fn from_vec(thresholds: Vec<f32>) -> Self {
        Self { thresholds }
    }

    /// Replace the threshold of a single class, growing the table with
    /// `f32::INFINITY` (never accepted) if `class_id` lies past its end.
    pub fn with_override(mut self, class_id: usize, threshold: f32) -> Self {
        if class_id >= self.thresholds.len() {
            self.thresholds.resize(class_id + 1, f32::INFINITY);
        }
        self.thresholds[class_id] = threshold;
        self
    }

    /// Apply overrides written as `class_id:threshold` pairs separated by commas,
    /// e.g. `"0:0.35,2:0.6"`. Empty entries are skipped.
    pub fn parse_overrides(self, spec: &str) -> anyhow::Result<Self> {
        let mut table = self;
        for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (class_id, threshold) = entry
                .split_once(':')
                .with_context(|| format!("Threshold override '{entry}' is not 'class:threshold'"))?;
            let class_id: usize = class_id
                .trim()
                .parse()
                .with_context(|| format!("Invalid class id in override '{entry}'"))?;
            let threshold: f32 = threshold
                .trim()
                .parse()
                .with_context(|| format!("Invalid threshold in override '{entry}'"))?;
            anyhow::ensure!(
                threshold.is_finite(),
                "Threshold in override '{entry}' must be a finite number"
            );
            table = table.with_override(class_id, threshold);
        }
        Ok(table)
    }

    pub fn get(&self, class_id: usize) -> Option<f32> {
        self.thresholds.get(class_id).copied()
    }

    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.thresholds
    }
}

impl Default for ClassThresholds {
    fn default() -> Self {
        Self::uniform(0.5, DEFAULT_NUM_CLASSES)
    }
}
