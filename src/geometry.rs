use ratatui::prelude::Rect;

/// Signed, axis-aligned box in terminal cells.
///
/// Menu panels are positioned relative to their trigger row and may end up
/// partially outside the frame, so origins are signed. `right` and `bottom`
/// are exclusive edges (`left + width`, `top + height`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundingRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingRect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Build a rect from its four edges. Inverted edges collapse to zero size.
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            width: (right - left).max(0),
            height: (bottom - top).max(0),
        }
    }

    pub const fn right(&self) -> i32 {
        self.left + self.width
    }

    pub const fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, column: i32, row: i32) -> bool {
        if self.is_empty() {
            return false;
        }
        column >= self.left && column < self.right() && row >= self.top && row < self.bottom()
    }

    /// Shrink by `amount` cells on every side.
    pub fn inset(&self, amount: i32) -> Self {
        Self {
            left: self.left + amount,
            top: self.top + amount,
            width: (self.width - amount * 2).max(0),
            height: (self.height - amount * 2).max(0),
        }
    }

    /// Visible part of this rect inside `area`, as an unsigned ratatui rect.
    pub fn clip_to(&self, area: Rect) -> Option<Rect> {
        let left = self.left.max(area.x as i32);
        let top = self.top.max(area.y as i32);
        let right = self.right().min(area.right() as i32);
        let bottom = self.bottom().min(area.bottom() as i32);
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect {
            x: left as u16,
            y: top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        })
    }
}

impl From<Rect> for BoundingRect {
    fn from(rect: Rect) -> Self {
        Self {
            left: rect.x as i32,
            top: rect.y as i32,
            width: rect.width as i32,
            height: rect.height as i32,
        }
    }
}

/// Size of the visible frame, read live at placement time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewportExtent {
    pub width: i32,
    pub height: i32,
}

impl ViewportExtent {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl From<Rect> for ViewportExtent {
    fn from(rect: Rect) -> Self {
        Self {
            width: rect.right() as i32,
            height: rect.bottom() as i32,
        }
    }
}

/// Natural (unpositioned) size of a panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelSize {
    pub width: i32,
    pub height: i32,
}

impl PanelSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}
