//! Immutable per-device state discovered once and passed by value.
//!
//! Feature flags and the command offset are read at discovery and never
//! change for the device's lifetime as observed by the codec, so they travel
//! as an explicit descriptor value rather than shared mutable state.

use crate::responses::FeatureWords;

/// Canonical name of the primary controller on a link.
///
/// Capabilities guarded to the primary device compare against this.
pub const CROS_EC_DEV_NAME: &str = "cros_ec";

/// Optional controller capabilities, one bit each.
///
/// Discriminants are the device-defined bit positions within the two
/// feature words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Limited = 0,
    Flash = 1,
    MotionSense = 6,
    Keyboard = 7,
    UsbPd = 22,
    TypecCmd = 41,
    RequireApModeEntry = 42,
}

impl Feature {
    fn word_and_mask(self) -> (usize, u32) {
        let bit = self as u32;
        ((bit / 32) as usize, 1 << (bit % 32))
    }
}

/// Snapshot of the device's feature bitmask, immutable after discovery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureSet {
    words: [u32; 2],
}

impl FeatureSet {
    /// Wrap raw feature words.
    pub fn new(words: [u32; 2]) -> Self {
        Self { words }
    }

    /// A device advertising nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set from individual features.
    pub fn with(features: &[Feature]) -> Self {
        let mut set = Self::default();
        for feature in features {
            let (word, mask) = feature.word_and_mask();
            set.words[word] |= mask;
        }
        set
    }

    /// Whether the device advertises `feature`.
    pub fn has(&self, feature: Feature) -> bool {
        let (word, mask) = feature.word_and_mask();
        self.words[word] & mask != 0
    }

    /// Raw feature words.
    pub fn words(&self) -> [u32; 2] {
        self.words
    }
}

impl From<FeatureWords> for FeatureSet {
    fn from(resp: FeatureWords) -> Self {
        Self::new(resp.flags)
    }
}

/// Immutable identity of one logical controller on a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    /// Device name; guarded capabilities compare it to the canonical name.
    pub name: String,
    /// Additive adjustment applied to every command code, used when one
    /// physical link multiplexes multiple logical controllers.
    pub cmd_offset: u16,
    /// Feature snapshot taken at discovery.
    pub features: FeatureSet,
}

impl DeviceDescriptor {
    pub fn new(name: impl Into<String>, cmd_offset: u16, features: FeatureSet) -> Self {
        Self {
            name: name.into(),
            cmd_offset,
            features,
        }
    }

    /// Whether this is the canonical primary controller.
    pub fn is_primary(&self) -> bool {
        self.name == CROS_EC_DEV_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_bits_span_both_words() {
        let set = FeatureSet::with(&[Feature::MotionSense, Feature::RequireApModeEntry]);
        assert!(set.has(Feature::MotionSense));
        assert!(set.has(Feature::RequireApModeEntry));
        assert!(!set.has(Feature::UsbPd));
        assert_eq!(set.words()[0], 1 << 6);
        assert_eq!(set.words()[1], 1 << (42 - 32));
    }

    #[test]
    fn empty_set_has_nothing() {
        let set = FeatureSet::empty();
        assert!(!set.has(Feature::Limited));
        assert!(!set.has(Feature::TypecCmd));
    }

    #[test]
    fn primary_device_matches_canonical_name() {
        let primary = DeviceDescriptor::new(CROS_EC_DEV_NAME, 0, FeatureSet::empty());
        let secondary = DeviceDescriptor::new("cros_pd", 0x4000, FeatureSet::empty());
        assert!(primary.is_primary());
        assert!(!secondary.is_primary());
    }
}
