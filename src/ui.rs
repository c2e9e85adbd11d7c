//! UiFrame: a thin wrapper around `ratatui::Frame` that clamps drawing to the
//! visible area.
//!
//! Menu panels are positioned with signed coordinates and are routinely
//! partially off-screen while the placement resolver flips them around.
//! Writing out of bounds into a `Buffer` panics, so every draw call made by
//! the menus goes through this wrapper, which clips rectangles and text to
//! the frame.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::geometry::BoundingRect;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Construct a `UiFrame` directly from an area and buffer, for headless
    /// rendering in tests.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer(&self) -> &Buffer {
        self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    /// Visible part of a signed rect, if any.
    pub fn clip(&self, rect: BoundingRect) -> Option<Rect> {
        rect.clip_to(self.area)
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        let clipped = area.intersection(self.area);
        if clipped.width > 0 && clipped.height > 0 {
            widget.render(clipped, self.buffer);
        }
    }

    /// Paint every visible cell of `rect` blank with `style`.
    pub fn fill(&mut self, rect: BoundingRect, style: Style) {
        let Some(clipped) = self.clip(rect) else {
            return;
        };
        for y in clipped.top()..clipped.bottom() {
            for x in clipped.left()..clipped.right() {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.set_symbol(" ");
                    cell.set_style(style);
                }
            }
        }
    }

    /// Write `text` starting at a signed position, dropping characters that
    /// fall outside the frame or past `max_width` columns.
    pub fn set_string_signed(&mut self, x: i32, y: i32, text: &str, max_width: i32, style: Style) {
        if y < self.area.y as i32 || y >= self.area.bottom() as i32 || max_width <= 0 {
            return;
        }
        let text = truncate_to_width(text, max_width as usize);
        for (i, ch) in text.chars().enumerate() {
            let cx = x + i as i32;
            if cx < self.area.x as i32 {
                continue;
            }
            if cx >= self.area.right() as i32 {
                break;
            }
            if let Some(cell) = self.buffer.cell_mut((cx as u16, y as u16)) {
                cell.set_char(ch);
                cell.set_style(style);
            }
        }
    }
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}
