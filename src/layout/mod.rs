pub mod placement;

pub use placement::*;

use crate::geometry::BoundingRect;

/// Border thickness drawn around every menu panel.
pub const PANEL_BORDER: i32 = 1;

/// Row boxes for `count` entries stacked inside a bordered panel.
///
/// Each row spans the full inner width of the panel and is one cell tall.
/// Rows that fall past the inner area are still returned so hit-testing
/// stays index-aligned with the entries; they are simply never drawn.
pub fn menu_rows(panel: BoundingRect, count: usize) -> Vec<BoundingRect> {
    let inner = panel.inset(PANEL_BORDER);
    (0..count)
        .map(|i| BoundingRect::new(inner.left, inner.top + i as i32, inner.width, 1))
        .collect()
}

/// Panel box whose top-left corner sits at `origin`.
pub fn panel_at(origin: (i32, i32), width: i32, height: i32) -> BoundingRect {
    BoundingRect::new(origin.0, origin.1, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_stack_inside_border() {
        let panel = BoundingRect::new(4, 2, 12, 5);
        let rows = menu_rows(panel, 3);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], BoundingRect::new(5, 3, 10, 1));
        assert_eq!(rows[2], BoundingRect::new(5, 5, 10, 1));
    }

    #[test]
    fn rows_for_empty_list() {
        assert!(menu_rows(BoundingRect::new(0, 0, 4, 2), 0).is_empty());
    }
}
