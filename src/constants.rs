//! Shared crate-wide constants.

use std::time::Duration;

/// Padding (in cells) added around a submenu panel when testing whether it
/// would overflow the viewport in a given direction.
///
/// The candidate area used by the placement resolver is the trigger row
/// grown by the panel size plus this padding on every side. A larger value
/// flips submenus earlier, keeping a visible gap to the frame edge.
pub const SUBMENU_EDGE_PADDING: i32 = 10;

/// Delay between the pointer entering (or leaving) a submenu trigger and the
/// submenu opening (or closing).
pub const DEFAULT_HOVER_DELAY: Duration = Duration::from_millis(500);

/// Length of the panel show/hide transition. Any non-zero value produces a
/// transition-end signal; zero produces none.
pub const DEFAULT_PANEL_TRANSITION: Duration = Duration::from_millis(1);

/// Upper bound accepted for a configured hover delay.
pub const MAX_HOVER_DELAY: Duration = Duration::from_secs(10);

/// Upper bound accepted for a configured panel transition.
pub const MAX_PANEL_TRANSITION: Duration = Duration::from_secs(2);

/// Columns reserved on a submenu row for the trailing arrow glyph.
pub const SUBMENU_ARROW_WIDTH: u16 = 2;
