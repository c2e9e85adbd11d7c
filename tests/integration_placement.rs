#[cfg(test)]
mod tests {
    use term_menu::components::PanelStyle;
    use term_menu::geometry::{BoundingRect, PanelSize, ViewportExtent};
    use term_menu::layout::{
        CandidateArea, HorizontalAnchor, Offset, VerticalAnchor, resolve_placement,
    };

    fn trigger() -> BoundingRect {
        BoundingRect::from_edges(500, 100, 600, 130)
    }

    fn panel() -> PanelSize {
        PanelSize::new(200, 300)
    }

    #[test]
    fn right_overflow_with_room_left_opens_left_and_down() {
        let p = resolve_placement(trigger(), panel(), ViewportExtent::new(700, 800), false);
        assert_eq!(p.to_string(), "top: 0, right: 100%");
        assert_eq!(p.vertical, VerticalAnchor::Top(Offset::Cells(0)));
        assert_eq!(p.horizontal, HorizontalAnchor::Right(Offset::Percent(100)));
    }

    #[test]
    fn short_viewport_clamps_vertically_with_one_anchor() {
        let viewport = ViewportExtent::new(700, 150);
        let area = CandidateArea::around(trigger(), panel());
        assert_eq!(area.bottom, 410);
        assert_eq!(area.top, -180);

        let p = resolve_placement(trigger(), panel(), viewport, false);
        // 100 rows above the trigger, 20 below
        assert!(p.top().is_none());
        assert_eq!(p.bottom(), Some(Offset::Cells(area.top)));
        assert_eq!(p.right(), Some(Offset::Percent(100)));
    }

    #[test]
    fn placement_depends_only_on_inputs() {
        let viewport = ViewportExtent::new(700, 150);
        let first = resolve_placement(trigger(), panel(), viewport, true);
        for _ in 0..5 {
            assert_eq!(resolve_placement(trigger(), panel(), viewport, true), first);
        }
    }

    #[test]
    fn unclamped_panels_stay_inside_viewport() {
        let viewport = ViewportExtent::new(120, 60);
        let size = PanelSize::new(20, 6);
        for rtl in [false, true] {
            for left in (0..=100).step_by(5) {
                for top in 0..60 {
                    let trigger = BoundingRect::new(left, top, 20, 1);
                    let placement = resolve_placement(trigger, size, viewport, rtl);
                    let mut style = PanelStyle::default();
                    style.clear_offsets();
                    style.apply(&placement);
                    let rect = style.resolve(trigger, size);
                    assert!(
                        rect.left >= 0
                            && rect.top >= 0
                            && rect.right() <= viewport.width
                            && rect.bottom() <= viewport.height,
                        "{placement} put {rect:?} outside the viewport for {trigger:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn flipped_panel_hugs_trigger_edges() {
        let trigger = BoundingRect::new(90, 50, 20, 1);
        let size = PanelSize::new(20, 6);
        let placement = resolve_placement(trigger, size, ViewportExtent::new(120, 60), false);
        let mut style = PanelStyle::default();
        style.clear_offsets();
        style.apply(&placement);
        let rect = style.resolve(trigger, size);
        // opens up and to the left: bottoms aligned, right edge on the trigger's left
        assert_eq!(rect.bottom(), trigger.bottom());
        assert_eq!(rect.right(), trigger.left);
    }
}
