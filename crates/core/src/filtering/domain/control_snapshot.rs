use super::filter_kind::FilterKind;

pub const MAX_INTENSITY: u8 = 100;

/// Operator controls sampled once per frame.
///
/// Filters receive the snapshot by reference and never mutate it.
/// `intensity` only affects the `noisy` filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSnapshot {
    pub filter: FilterKind,
    pub intensity: u8,
}

impl ControlSnapshot {
    /// Builds a snapshot, clamping `intensity` into `0..=100`.
    pub fn new(filter: FilterKind, intensity: i64) -> Self {
        Self {
            filter,
            intensity: intensity.clamp(0, MAX_INTENSITY as i64) as u8,
        }
    }

    /// Builds a snapshot from a raw control-surface name.
    pub fn from_name(name: &str, intensity: i64) -> Self {
        Self::new(FilterKind::from_name(name), intensity)
    }
}
