//! Quick-set durations for the countdown.

use crate::clock::Hms;
use serde::{Deserialize, Serialize};

/// A labelled duration offered as a shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// Text shown on the control, e.g. `"5 min"`.
    pub label: String,
    /// Length in seconds.
    pub seconds: u64,
}

impl Preset {
    /// A preset of whole minutes labelled `"<n> min"`.
    pub fn minutes(minutes: u64) -> Self {
        Self {
            label: format!("{minutes} min"),
            seconds: minutes * 60,
        }
    }

    /// The preset's duration.
    pub fn duration(&self) -> Hms {
        Hms::from_secs(self.seconds)
    }
}

/// The 5, 10 and 20 minute presets.
pub fn default_presets() -> Vec<Preset> {
    [5, 10, 20].into_iter().map(Preset::minutes).collect()
}

/// A fixed, ordered set of presets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetSelector {
    presets: Vec<Preset>,
}

impl PresetSelector {
    /// Wraps the given presets.
    pub fn new(presets: Vec<Preset>) -> Self {
        Self { presets }
    }

    /// All presets in display order.
    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    /// The preset at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Preset> {
        self.presets.get(index)
    }

    /// Looks a preset up by its label.
    pub fn find(&self, label: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.label == label)
    }

    /// Number of presets.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Whether there are no presets.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for PresetSelector {
    fn default() -> Self {
        Self::new(default_presets())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_presets() {
        let sel = PresetSelector::default();
        let labels: Vec<&str> = sel.presets().iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["5 min", "10 min", "20 min"]);
        assert_eq!(sel.get(0).map(Preset::duration), Some(Hms::new(0, 5, 0)));
        assert_eq!(sel.find("20 min").map(|p| p.seconds), Some(1200));
        assert!(sel.get(3).is_none());
    }
}
