//! Responsive layout switch.
//!
//! Both tables are always rendered; the viewport width only decides which one
//! is displayed. Switching is a pure function of the width, so it can run on
//! every resize and on first load without side effects.

/// Viewport width, in CSS pixels, at or below which the narrow layout is used.
pub const DEFAULT_BREAKPOINT_PX: u32 = 768;

/// Table layout of the management view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Seven-column desktop table.
    #[default]
    Wide,
    /// Three-column stacked table for phones.
    Narrow,
}

/// Picks the layout for `viewport_width_px`.
///
/// # Examples
///
/// ```
/// use videotheque::ui::layout::{select_layout, Layout, DEFAULT_BREAKPOINT_PX};
///
/// assert_eq!(select_layout(768, DEFAULT_BREAKPOINT_PX), Layout::Narrow);
/// assert_eq!(select_layout(769, DEFAULT_BREAKPOINT_PX), Layout::Wide);
/// ```
#[must_use]
pub const fn select_layout(viewport_width_px: u32, breakpoint_px: u32) -> Layout {
    if viewport_width_px <= breakpoint_px {
        Layout::Narrow
    } else {
        Layout::Wide
    }
}

/// CSS `display` values applied to the two tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutVisibility {
    pub wide_display: &'static str,
    pub narrow_display: &'static str,
}

impl Layout {
    #[must_use]
    pub const fn visibility(self) -> LayoutVisibility {
        match self {
            Self::Wide => LayoutVisibility {
                wide_display: "table",
                narrow_display: "none",
            },
            Self::Narrow => LayoutVisibility {
                wide_display: "none",
                narrow_display: "table",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_is_inclusive() {
        assert_eq!(select_layout(0, 768), Layout::Narrow);
        assert_eq!(select_layout(768, 768), Layout::Narrow);
        assert_eq!(select_layout(1920, 768), Layout::Wide);
    }

    #[test]
    fn exactly_one_table_is_displayed() {
        for layout in [Layout::Wide, Layout::Narrow] {
            let v = layout.visibility();
            let shown = [v.wide_display, v.narrow_display]
                .iter()
                .filter(|d| **d == "table")
                .count();
            assert_eq!(shown, 1);
        }
    }
}
