use crossterm::style::Color;

/// One species of fish art. Both facings must agree on dimensions so a
/// fish's bounding size does not depend on which way it swims.
pub(crate) struct Species {
    pub(crate) name: &'static str,
    pub(crate) right: &'static [&'static str],
    pub(crate) left: &'static [&'static str],
    pub(crate) color: Color,
}

impl Species {
    /// Rendered extent in cells: widest art line x line count.
    pub(crate) fn dims(&self) -> (f32, f32) {
        let w = self
            .right
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        (w as f32, self.right.len() as f32)
    }
}

pub(crate) const SPECIES: &[Species] = &[
    Species {
        name: "minnow",
        right: &["><>"],
        left: &["<><"],
        color: Color::AnsiValue(229),
    },
    Species {
        name: "tetra",
        right: &["><(((*>"],
        left: &["<*)))><"],
        color: Color::AnsiValue(51),
    },
    Species {
        name: "goldfish",
        right: &[
            "   _  ",
            "><('> ",
        ],
        left: &[
            "  _   ",
            " <')><",
        ],
        color: Color::AnsiValue(215),
    },
    Species {
        name: "angelfish",
        right: &[
            " |\\  ",
            " | )>",
            " |/  ",
        ],
        left: &[
            "  /| ",
            "<( | ",
            "  \\| ",
        ],
        color: Color::AnsiValue(213),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn species_set_is_nonempty() {
        assert!(!SPECIES.is_empty());
    }

    #[test]
    fn facings_agree_on_dims() {
        for sp in SPECIES {
            let (w, h) = sp.dims();
            assert_eq!(sp.left.len(), sp.right.len(), "{}: line count", sp.name);
            assert_eq!(h as usize, sp.right.len(), "{}: height", sp.name);
            for line in sp.right.iter().chain(sp.left.iter()) {
                assert_eq!(line.chars().count(), w as usize, "{}: ragged line", sp.name);
            }
        }
    }
}
