//! View toggles

use serde::{Deserialize, Serialize};

use crate::layout::{LayoutParams, LayoutType};

/// Every toggle the pipeline reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    pub deduplicate: bool,
    pub show_orphans: bool,
    pub show_inferred: bool,
    pub focus_id: Option<String>,
    pub layout_type: LayoutType,
    pub params: LayoutParams,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            deduplicate: true,
            show_orphans: false,
            show_inferred: true,
            focus_id: None,
            layout_type: LayoutType::Force,
            params: LayoutParams::default(),
        }
    }
}

/// Partial update; absent fields are left unchanged.
///
/// `focus_id` distinguishes "absent" from an explicit `null` (which clears
/// the focus).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ViewSettingsPatch {
    pub deduplicate: Option<bool>,
    pub show_orphans: Option<bool>,
    pub show_inferred: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub focus_id: Option<Option<String>>,
    pub layout_type: Option<LayoutType>,
    pub force_strength: Option<f64>,
    pub link_distance: Option<f64>,
    pub center_force: Option<f64>,
    pub iterations: Option<usize>,
    pub seed: Option<u64>,
    pub spacing: Option<f64>,
    pub horizontal_spacing: Option<f64>,
    pub vertical_spacing: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl ViewSettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == ViewSettingsPatch::default()
    }

    /// Apply the patch in place
    pub fn apply(&self, settings: &mut ViewSettings) {
        if let Some(v) = self.deduplicate {
            settings.deduplicate = v;
        }
        if let Some(v) = self.show_orphans {
            settings.show_orphans = v;
        }
        if let Some(v) = self.show_inferred {
            settings.show_inferred = v;
        }
        if let Some(v) = &self.focus_id {
            settings.focus_id = v.clone();
        }
        if let Some(v) = self.layout_type {
            settings.layout_type = v;
        }

        let params = &mut settings.params;
        set(&mut params.force_strength, self.force_strength);
        set(&mut params.link_distance, self.link_distance);
        set(&mut params.center_force, self.center_force);
        set(&mut params.iterations, self.iterations);
        set(&mut params.seed, self.seed);
        set(&mut params.spacing, self.spacing);
        set(&mut params.horizontal_spacing, self.horizontal_spacing);
        set(&mut params.vertical_spacing, self.vertical_spacing);
        set(&mut params.width, self.width);
        set(&mut params.height, self.height);
    }
}

fn set<T: Copy>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}
