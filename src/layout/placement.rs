//! Submenu placement.
//!
//! Decides where a submenu panel opens relative to its trigger row so that it
//! stays inside the viewport. The resolver is pure: it only reads the trigger
//! box, the panel's natural size and the viewport, and always yields exactly
//! one vertical and one horizontal anchor.

use std::fmt;

use crate::constants::SUBMENU_EDGE_PADDING;
use crate::geometry::{BoundingRect, PanelSize, ViewportExtent};

/// A single inline offset, interpreted against the trigger row box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offset {
    /// Absolute number of cells.
    Cells(i32),
    /// Percentage of the trigger box along the same axis.
    Percent(u16),
    /// `100% - n` cells along the same axis.
    FullMinus(i32),
}

impl Offset {
    /// Resolve against `basis`, the trigger box extent along this axis.
    pub fn resolve(self, basis: i32) -> i32 {
        match self {
            Offset::Cells(n) => n,
            Offset::Percent(pct) => basis * pct as i32 / 100,
            Offset::FullMinus(n) => basis - n,
        }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Offset::Cells(n) => write!(f, "{n}"),
            Offset::Percent(pct) => write!(f, "{pct}%"),
            Offset::FullMinus(n) => write!(f, "calc(100% - {n})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAnchor {
    Top(Offset),
    Bottom(Offset),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAnchor {
    Left(Offset),
    Right(Offset),
}

/// Resolved submenu placement: one vertical and one horizontal anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub vertical: VerticalAnchor,
    pub horizontal: HorizontalAnchor,
}

impl Placement {
    pub fn top(&self) -> Option<Offset> {
        match self.vertical {
            VerticalAnchor::Top(o) => Some(o),
            VerticalAnchor::Bottom(_) => None,
        }
    }

    pub fn bottom(&self) -> Option<Offset> {
        match self.vertical {
            VerticalAnchor::Bottom(o) => Some(o),
            VerticalAnchor::Top(_) => None,
        }
    }

    pub fn left(&self) -> Option<Offset> {
        match self.horizontal {
            HorizontalAnchor::Left(o) => Some(o),
            HorizontalAnchor::Right(_) => None,
        }
    }

    pub fn right(&self) -> Option<Offset> {
        match self.horizontal {
            HorizontalAnchor::Right(o) => Some(o),
            HorizontalAnchor::Left(_) => None,
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.vertical {
            VerticalAnchor::Top(o) => write!(f, "top: {o}")?,
            VerticalAnchor::Bottom(o) => write!(f, "bottom: {o}")?,
        }
        match self.horizontal {
            HorizontalAnchor::Left(o) => write!(f, ", left: {o}"),
            HorizontalAnchor::Right(o) => write!(f, ", right: {o}"),
        }
    }
}

/// Largest box the panel could cover when opened in each direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateArea {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl CandidateArea {
    pub fn around(trigger: BoundingRect, panel: PanelSize) -> Self {
        Self {
            top: trigger.bottom() - panel.height - SUBMENU_EDGE_PADDING,
            left: trigger.left - panel.width - SUBMENU_EDGE_PADDING,
            bottom: trigger.top + panel.height + SUBMENU_EDGE_PADDING,
            right: trigger.right() + panel.width + SUBMENU_EDGE_PADDING,
        }
    }
}

pub fn resolve_placement(
    trigger: BoundingRect,
    panel: PanelSize,
    viewport: ViewportExtent,
    rtl: bool,
) -> Placement {
    let area = CandidateArea::around(trigger, panel);
    let vertical = vertical_anchor(trigger, area, viewport);
    let horizontal = if rtl {
        rtl_horizontal_anchor(trigger, area, viewport)
    } else {
        horizontal_anchor(trigger, area, viewport)
    };
    Placement {
        vertical,
        horizontal,
    }
}

fn vertical_anchor(
    trigger: BoundingRect,
    area: CandidateArea,
    viewport: ViewportExtent,
) -> VerticalAnchor {
    if area.bottom > viewport.height {
        if area.top < 0 {
            return clamp_vertically(trigger, area, viewport);
        }
        // open upwards, bottoms aligned
        return VerticalAnchor::Bottom(Offset::Cells(0));
    }
    VerticalAnchor::Top(Offset::Cells(0))
}

fn horizontal_anchor(
    trigger: BoundingRect,
    area: CandidateArea,
    viewport: ViewportExtent,
) -> HorizontalAnchor {
    if area.right > viewport.width {
        if area.left < 0 {
            return clamp_horizontally(trigger, area, viewport);
        }
        return HorizontalAnchor::Right(Offset::Percent(100));
    }
    HorizontalAnchor::Left(Offset::Percent(100))
}

fn rtl_horizontal_anchor(
    trigger: BoundingRect,
    area: CandidateArea,
    viewport: ViewportExtent,
) -> HorizontalAnchor {
    if area.left < 0 {
        if area.right > viewport.width {
            return clamp_horizontally(trigger, area, viewport);
        }
        return HorizontalAnchor::Left(Offset::Percent(100));
    }
    HorizontalAnchor::Right(Offset::Percent(100))
}

fn clamp_vertically(
    trigger: BoundingRect,
    area: CandidateArea,
    viewport: ViewportExtent,
) -> VerticalAnchor {
    if viewport.height - trigger.bottom() < trigger.top {
        // more room above; pin the panel `padding` cells below the frame top
        return VerticalAnchor::Bottom(Offset::Cells(area.top));
    }
    VerticalAnchor::Top(Offset::Cells(viewport.height - area.bottom))
}

fn clamp_horizontally(
    trigger: BoundingRect,
    area: CandidateArea,
    viewport: ViewportExtent,
) -> HorizontalAnchor {
    if viewport.width - trigger.right() < trigger.left {
        return HorizontalAnchor::Right(Offset::FullMinus(-area.left));
    }
    HorizontalAnchor::Left(Offset::FullMinus(area.right - viewport.width))
}

/// Origin of a root context menu opened at the pointer.
///
/// The menu opens down/right from the cursor (down/left under RTL), flips
/// when it would overflow, and is centred on an axis where it still does not
/// fit.
pub fn root_menu_origin(
    column: i32,
    row: i32,
    size: PanelSize,
    viewport: ViewportExtent,
    rtl: bool,
) -> (i32, i32) {
    let mut left = column;
    let mut top = row;
    if top + size.height > viewport.height {
        top -= size.height;
    }
    if rtl {
        if left - size.width >= 0 {
            left -= size.width;
        }
    } else if left + size.width > viewport.width {
        left -= size.width;
    }
    if top < 0 {
        top = if size.height < viewport.height {
            (viewport.height - size.height) / 2
        } else {
            0
        };
    }
    if left < 0 {
        left = if size.width < viewport.width {
            (viewport.width - size.width) / 2
        } else {
            0
        };
    }
    (left, top)
}
