use std::fmt;

/// The closed set of per-frame filters an operator can select.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FilterKind {
    #[default]
    None,
    Gray,
    Noisy,
    Colorize,
    FaceBlurDnn,
    Cartoon,
    Posterize,
}

impl FilterKind {
    pub const ALL: &[FilterKind] = &[
        FilterKind::None,
        FilterKind::Gray,
        FilterKind::Noisy,
        FilterKind::Colorize,
        FilterKind::FaceBlurDnn,
        FilterKind::Cartoon,
        FilterKind::Posterize,
    ];

    /// Control-surface name of the filter.
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::None => "none",
            FilterKind::Gray => "gray",
            FilterKind::Noisy => "noisy",
            FilterKind::Colorize => "colorize",
            FilterKind::FaceBlurDnn => "faceblur_dnn",
            FilterKind::Cartoon => "cartoon",
            FilterKind::Posterize => "posterize",
        }
    }

    /// Parses a control-surface name. Unrecognized names select `None`.
    pub fn from_name(name: &str) -> Self {
        let trimmed = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == trimmed)
            .unwrap_or_else(|| {
                if !trimmed.is_empty() {
                    log::debug!("Unknown filter '{trimmed}', using 'none'");
                }
                FilterKind::None
            })
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("none", FilterKind::None)]
    #[case("gray", FilterKind::Gray)]
    #[case("noisy", FilterKind::Noisy)]
    #[case("colorize", FilterKind::Colorize)]
    #[case("faceblur_dnn", FilterKind::FaceBlurDnn)]
    #[case("cartoon", FilterKind::Cartoon)]
    #[case("posterize", FilterKind::Posterize)]
    fn test_from_name_recognizes_every_filter(#[case] name: &str, #[case] expected: FilterKind) {
        assert_eq!(FilterKind::from_name(name), expected);
    }

    #[rstest]
    #[case("")]
    #[case("sepia")]
    #[case("GRAY")]
    #[case("faceblur")]
    fn test_unknown_names_fall_back_to_none(#[case] name: &str) {
        assert_eq!(FilterKind::from_name(name), FilterKind::None);
    }

    #[test]
    fn test_name_roundtrips_for_all() {
        for &kind in FilterKind::ALL {
            assert_eq!(FilterKind::from_name(kind.name()), kind);
        }
    }

    #[test]
    fn test_display_uses_control_name() {
        assert_eq!(FilterKind::FaceBlurDnn.to_string(), "faceblur_dnn");
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        assert_eq!(FilterKind::from_name("  cartoon\n"), FilterKind::Cartoon);
    }
}
