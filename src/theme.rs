use ratatui::style::{Color, Modifier, Style};

// Centralized menu colors. Per-menu overrides are layered on top through
// `MenuStyles`, so these stay plain functions.

pub fn menu_bg() -> Color {
    Color::DarkGray
}
pub fn menu_fg() -> Color {
    Color::White
}
pub fn menu_border() -> Color {
    Color::Gray
}
pub fn menu_selected_bg() -> Color {
    Color::Gray
}
pub fn menu_selected_fg() -> Color {
    Color::Black
}
pub fn menu_active_bg() -> Color {
    Color::Blue
}
pub fn menu_disabled_fg() -> Color {
    Color::Black
}
pub fn divider_fg() -> Color {
    Color::Gray
}

// Status line used by the demo binary
pub fn status_bg() -> Color {
    Color::Black
}
pub fn status_fg() -> Color {
    Color::DarkGray
}

pub fn item_style() -> Style {
    Style::default().fg(menu_fg()).bg(menu_bg())
}

pub fn panel_style() -> Style {
    Style::default().fg(menu_border()).bg(menu_bg())
}

pub fn selected_style() -> Style {
    Style::default()
        .fg(menu_selected_fg())
        .bg(menu_selected_bg())
}

pub fn active_style() -> Style {
    Style::default()
        .bg(menu_active_bg())
        .add_modifier(Modifier::BOLD)
}

pub fn disabled_style() -> Style {
    Style::default()
        .fg(menu_disabled_fg())
        .add_modifier(Modifier::DIM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_overrides_item_colors() {
        let s = item_style().patch(selected_style());
        assert_eq!(s.fg, Some(menu_selected_fg()));
        assert_eq!(s.bg, Some(menu_selected_bg()));
    }
}
