//! The catalog stores the pose `Straight-on`; the UI shows it as `Facing`.
//! This is the single place where the two spellings meet: sessions translate
//! to display form when snapshotting vocabularies, and filter state
//! translates back when encoding backend query values.

const BACKEND_STRAIGHT_ON: &str = "Straight-on";
const DISPLAY_FACING: &str = "Facing";

#[must_use]
pub fn to_display(backend_label: &str) -> &str {
    if backend_label == BACKEND_STRAIGHT_ON {
        DISPLAY_FACING
    } else {
        backend_label
    }
}

#[must_use]
pub fn to_backend(display_label: &str) -> &str {
    if display_label == DISPLAY_FACING {
        BACKEND_STRAIGHT_ON
    } else {
        display_label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_is_bidirectional_and_leaves_other_labels_alone() {
        assert_eq!(to_display("Straight-on"), "Facing");
        assert_eq!(to_backend("Facing"), "Straight-on");
        assert_eq!(to_display("Side"), "Side");
        assert_eq!(to_backend(to_display("Straight-on")), "Straight-on");
    }
}
