//! Corner strategies for stacking notes.
//!
//! Each [`Corner`] knows two things: where a freshly created note starts
//! (just outside the viewport, so it can slide in) and where every active
//! note belongs in the stack. Both are pure functions of note sizes, the
//! viewport and the configured padding, so the whole stack is recomputed
//! from scratch on every pass.

use std::fmt;
use std::str::FromStr;

use ratatui::layout::Rect;
use serde::{Deserialize, Serialize};

use super::error::{NotifyError, Violation};
use super::note::NoteId;

// ============================================================================
// Geometry
// ============================================================================

/// Size of the visible area notes are stacked in, in cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

impl From<Rect> for Viewport {
    fn from(area: Rect) -> Self {
        Self::new(area.width, area.height)
    }
}

/// Absolute position of a note's top-left corner.
///
/// Coordinates are signed because notes start outside the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Outer size of a note, margins included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoteSize {
    pub width: i32,
    pub height: i32,
}

/// Distance kept between the stack and the viewport edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding {
    pub horizontal: i32,
    pub vertical: i32,
}

/// Order in which note ids are walked when stacking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Returns the ids sorted in this order.
    #[must_use]
    pub fn sorted(self, ids: impl IntoIterator<Item = NoteId>) -> Vec<NoteId> {
        let mut ids: Vec<NoteId> = ids.into_iter().collect();
        match self {
            Self::Ascending => ids.sort_unstable(),
            Self::Descending => ids.sort_unstable_by(|a, b| b.cmp(a)),
        }
        ids
    }
}

// ============================================================================
// Corner
// ============================================================================

/// Screen corner the note stack is anchored to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "String")]
pub enum Corner {
    /// Stack grows upward, newest note nearest the bottom edge.
    #[default]
    BottomLeft,
    /// Stack grows upward along the right edge.
    BottomRight,
    /// Stack grows downward, newest note nearest the top edge.
    TopLeft,
    /// Stack grows downward along the right edge.
    TopRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::BottomLeft,
        Corner::BottomRight,
        Corner::TopLeft,
        Corner::TopRight,
    ];

    /// Returns the camelCase name used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BottomLeft => "bottomLeft",
            Self::BottomRight => "bottomRight",
            Self::TopLeft => "topLeft",
            Self::TopRight => "topRight",
        }
    }

    /// Id order used when walking the stack away from the anchor.
    #[must_use]
    pub const fn sort_order(self) -> SortOrder {
        match self {
            Self::BottomLeft | Self::BottomRight => SortOrder::Descending,
            Self::TopLeft | Self::TopRight => SortOrder::Ascending,
        }
    }

    const fn is_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::BottomRight)
    }

    const fn is_right(self) -> bool {
        matches!(self, Self::BottomRight | Self::TopRight)
    }

    fn column(self, size: NoteSize, viewport: Viewport, padding: Padding) -> i32 {
        if self.is_right() {
            i32::from(viewport.width)
                .saturating_sub(padding.horizontal)
                .saturating_sub(size.width)
        } else {
            padding.horizontal
        }
    }

    /// Off-screen starting position for a newly created note.
    ///
    /// Bottom corners start just below the viewport, top corners just above.
    #[must_use]
    pub fn initial_position(self, size: NoteSize, viewport: Viewport, padding: Padding) -> Position {
        let x = self.column(size, viewport, padding);
        let y = if self.is_bottom() {
            i32::from(viewport.height)
        } else {
            size.height.saturating_neg()
        };
        Position::new(x, y)
    }

    /// Computes the slot of every note in the stack.
    ///
    /// `notes` may be in any order; the result follows [`Corner::sort_order`],
    /// starting with the note nearest the anchor. Consecutive notes touch:
    /// the distance between them is exactly the outer height of the one
    /// nearer the anchor (bottom corners) or of the earlier one (top corners).
    #[must_use]
    pub fn stacked_layout(
        self,
        notes: &[(NoteId, NoteSize)],
        viewport: Viewport,
        padding: Padding,
    ) -> Vec<(NoteId, Position)> {
        let order = self.sort_order().sorted(notes.iter().map(|(id, _)| *id));

        let mut y = if self.is_bottom() {
            i32::from(viewport.height).saturating_sub(padding.vertical)
        } else {
            padding.vertical
        };

        order
            .into_iter()
            .filter_map(|id| {
                let size = notes.iter().find(|(other, _)| *other == id)?.1;
                let x = self.column(size, viewport, padding);
                let slot = if self.is_bottom() {
                    y = y.saturating_sub(size.height);
                    Position::new(x, y)
                } else {
                    let slot = Position::new(x, y);
                    y = y.saturating_add(size.height);
                    slot
                };
                Some((id, slot))
            })
            .collect()
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Corner {
    type Err = NotifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|corner| corner.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| NotifyError::invalid(Violation::UnknownCorner(s.to_string())))
    }
}

impl TryFrom<String> for Corner {
    type Error = NotifyError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const VIEWPORT: Viewport = Viewport::new(100, 50);
    const PADDING: Padding = Padding {
        horizontal: 4,
        vertical: 2,
    };

    fn size(width: i32, height: i32) -> NoteSize {
        NoteSize { width, height }
    }

    fn three_notes() -> Vec<(NoteId, NoteSize)> {
        vec![
            (NoteId(1), size(20, 4)),
            (NoteId(2), size(30, 5)),
            (NoteId(3), size(25, 3)),
        ]
    }

    #[test]
    fn test_sort_order_variants() {
        let ids = [NoteId(2), NoteId(0), NoteId(5)];
        assert_eq!(
            SortOrder::Ascending.sorted(ids),
            vec![NoteId(0), NoteId(2), NoteId(5)]
        );
        assert_eq!(
            SortOrder::Descending.sorted(ids),
            vec![NoteId(5), NoteId(2), NoteId(0)]
        );
    }

    #[test]
    fn test_bottom_left_stack_newest_nearest_anchor() {
        let layout = Corner::BottomLeft.stacked_layout(&three_notes(), VIEWPORT, PADDING);

        assert_eq!(
            layout,
            vec![
                (NoteId(3), Position::new(4, 45)), // 50 - 2 - 3
                (NoteId(2), Position::new(4, 40)), // 45 - 5
                (NoteId(1), Position::new(4, 36)), // 40 - 4
            ]
        );
    }

    #[test]
    fn test_bottom_stack_has_no_gaps() {
        let notes = three_notes();
        let layout = Corner::BottomRight.stacked_layout(&notes, VIEWPORT, PADDING);
        let height_of = |id: NoteId| notes.iter().find(|(n, _)| *n == id).unwrap().1.height;

        let (first_id, first) = layout[0];
        assert_eq!(first.y + height_of(first_id), 48);

        for pair in layout.windows(2) {
            let (_, lower) = pair[0];
            let (upper_id, upper) = pair[1];
            assert_eq!(upper.y + height_of(upper_id), lower.y);
        }
    }

    #[test]
    fn test_top_right_stack() {
        let layout = Corner::TopRight.stacked_layout(&three_notes(), VIEWPORT, PADDING);

        assert_eq!(
            layout,
            vec![
                (NoteId(1), Position::new(76, 2)), // 100 - 4 - 20
                (NoteId(2), Position::new(66, 6)),
                (NoteId(3), Position::new(71, 11)),
            ]
        );
    }

    #[rstest]
    #[case::bottom_left(Corner::BottomLeft, Position::new(4, 50))]
    #[case::bottom_right(Corner::BottomRight, Position::new(76, 50))]
    #[case::top_left(Corner::TopLeft, Position::new(4, -4))]
    #[case::top_right(Corner::TopRight, Position::new(76, -4))]
    fn test_initial_position_is_off_screen(#[case] corner: Corner, #[case] expected: Position) {
        assert_eq!(
            corner.initial_position(size(20, 4), VIEWPORT, PADDING),
            expected
        );
    }

    #[test]
    fn test_empty_stack() {
        for corner in Corner::ALL {
            assert!(corner.stacked_layout(&[], VIEWPORT, PADDING).is_empty());
        }
    }

    #[rstest]
    #[case("bottomLeft", Corner::BottomLeft)]
    #[case("bottomright", Corner::BottomRight)]
    #[case("TOPLEFT", Corner::TopLeft)]
    #[case("topRight", Corner::TopRight)]
    fn test_corner_from_str(#[case] input: &str, #[case] expected: Corner) {
        assert_eq!(input.parse::<Corner>(), Ok(expected));
    }

    #[test]
    fn test_unknown_corner_is_an_error() {
        let err = "middle".parse::<Corner>().unwrap_err();
        assert!(err.contains(&Violation::UnknownCorner("middle".into())));
    }

    #[test]
    fn test_extreme_padding_saturates() {
        let padding = Padding {
            horizontal: i32::MAX,
            vertical: i32::MIN,
        };
        for corner in Corner::ALL {
            let layout = corner.stacked_layout(&three_notes(), VIEWPORT, padding);
            assert_eq!(layout.len(), 3);
            let _ = corner.initial_position(size(20, 4), VIEWPORT, padding);
        }
    }

    #[rstest]
    #[case::camel("\"topRight\"", Corner::TopRight)]
    #[case::upper("\"BOTTOMLEFT\"", Corner::BottomLeft)]
    fn test_corner_deserialize_ignores_case(#[case] json: &str, #[case] expected: Corner) {
        assert_eq!(serde_json::from_str::<Corner>(json).unwrap(), expected);
    }

    #[test]
    fn test_corner_deserialize_rejects_unknown() {
        let err = serde_json::from_str::<Corner>("\"middle\"").unwrap_err();
        assert!(err.to_string().contains("unknown corner 'middle'"));
    }

    #[test]
    fn test_corner_display_roundtrips_through_from_str() {
        for corner in Corner::ALL {
            assert_eq!(corner.to_string().parse::<Corner>(), Ok(corner));
        }
    }
}
