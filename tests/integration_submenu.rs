#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    use crossterm::event::{
        Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use term_menu::components::VisibilityPhase;
    use term_menu::document::{DocumentEvent, HandlerId};
    use term_menu::geometry::{BoundingRect, ViewportExtent};
    use term_menu::global_listener::{
        ClickOutsideListener, GlobalListener, ListenToken, ListenerSignal,
    };
    use term_menu::paint::TimeoutScheduler;
    use term_menu::timers::TimerKind;
    use term_menu::{
        ContextMenu, MenuData, MenuItem, MenuOptions, MenuRuntime, SubMenu, SubMenuConfig,
    };

    const DELAY: Duration = Duration::from_millis(500);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn moved(column: u16, row: u16) -> Event {
        mouse(MouseEventKind::Moved, column, row)
    }

    /// Root panel at (5, 3), 11x4: "Copy" on row 4, "Share ▸" on row 5.
    /// The Share panel opens at (15, 5), 8x4, with "Mail" on row 6.
    fn menu(t0: Instant, clicks: Rc<RefCell<Vec<MenuData>>>) -> ContextMenu {
        let mut rt = MenuRuntime::headless(t0);
        rt.set_viewport(ViewportExtent::new(80, 24));
        let c = clicks.clone();
        let mut cm = ContextMenu::new(
            vec![
                MenuItem::new("Copy")
                    .data("action", "copy")
                    .on_click(move |_, data| c.borrow_mut().push(data.clone()))
                    .into(),
                SubMenu::new(
                    SubMenuConfig::new("Share"),
                    vec![
                        MenuItem::new("Mail")
                            .on_click(move |_, data| clicks.borrow_mut().push(data.clone()))
                            .into(),
                        MenuItem::new("Chat").into(),
                    ],
                )
                .into(),
            ],
            rt,
        );
        let mut data = MenuData::new();
        data.insert("target".into(), "file.txt".into());
        cm.open_at(5, 3, data);
        cm
    }

    fn share_id(cm: &mut ContextMenu) -> HandlerId {
        match cm.submenu_by_title("Share") {
            Some(sub) => sub.id(),
            None => panic!("Share submenu missing"),
        }
    }

    fn share(cm: &mut ContextMenu) -> &mut SubMenu {
        match cm.submenu_by_title("Share") {
            Some(sub) => sub,
            None => panic!("Share submenu missing"),
        }
    }

    fn open_share_by_hover(cm: &mut ContextMenu, t0: Instant) {
        cm.handle_event(&moved(7, 5));
        assert!(share(cm).open_timer_pending());
        cm.tick(t0 + DELAY);
        assert_eq!(share(cm).phase(), VisibilityPhase::Open);
    }

    #[test]
    fn hover_opens_after_delay_and_places_panel() {
        let t0 = Instant::now();
        let mut cm = menu(t0, Rc::default());
        cm.handle_event(&moved(7, 5));
        cm.tick(t0 + ms(499));
        assert!(!share(&mut cm).is_panel_shown());

        cm.tick(t0 + DELAY);
        let id = share_id(&mut cm);
        let sub = share(&mut cm);
        assert!(sub.is_visible());
        assert!(sub.is_panel_shown());
        assert_eq!(sub.trigger_rect(), Some(BoundingRect::new(6, 5, 9, 1)));
        assert_eq!(sub.panel_rect(), Some(BoundingRect::new(15, 5, 8, 4)));
        assert_eq!(
            cm.runtime().document().listeners(DocumentEvent::KeyDown),
            &[id]
        );
        assert_eq!(
            cm.runtime().document().listeners(DocumentEvent::DragStart),
            &[id]
        );
    }

    #[test]
    fn quick_pass_over_trigger_leaves_nothing_pending() {
        let t0 = Instant::now();
        let mut cm = menu(t0, Rc::default());
        cm.handle_event(&moved(7, 5));
        cm.handle_event(&moved(40, 20));
        assert!(cm.runtime().timers().is_empty());
        cm.tick(t0 + ms(2_000));
        let sub = share(&mut cm);
        assert!(!sub.is_visible());
        assert_eq!(sub.phase(), VisibilityPhase::Closed);
    }

    #[test]
    fn moving_into_panel_keeps_it_open_and_leaving_closes_it() {
        let t0 = Instant::now();
        let mut cm = menu(t0, Rc::default());
        open_share_by_hover(&mut cm, t0);

        cm.handle_event(&moved(17, 6));
        assert!(!share(&mut cm).close_timer_pending());
        assert_eq!(share(&mut cm).selected_item(), Some(0));

        cm.handle_event(&moved(40, 20));
        assert!(share(&mut cm).close_timer_pending());
        assert_eq!(share(&mut cm).selected_item(), None);

        cm.tick(t0 + ms(1_000));
        assert_eq!(share(&mut cm).phase(), VisibilityPhase::Closing);

        cm.tick(t0 + ms(1_001));
        assert_eq!(share(&mut cm).phase(), VisibilityPhase::Closed);
        let root = cm.id();
        assert_eq!(
            cm.runtime().document().listeners(DocumentEvent::KeyDown),
            &[root]
        );
        assert!(cm
            .runtime()
            .document()
            .listeners(DocumentEvent::DragStart)
            .is_empty());
    }

    #[test]
    fn returning_before_close_delay_cancels_close() {
        let t0 = Instant::now();
        let mut cm = menu(t0, Rc::default());
        open_share_by_hover(&mut cm, t0);
        cm.handle_event(&moved(40, 20));
        cm.handle_event(&moved(8, 5));
        assert!(!share(&mut cm).close_timer_pending());
        cm.tick(t0 + ms(5_000));
        assert_eq!(share(&mut cm).phase(), VisibilityPhase::Open);
    }

    #[test]
    fn unmount_with_pending_open_timer_releases_everything() {
        let t0 = Instant::now();
        let mut cm = menu(t0, Rc::default());
        cm.handle_event(&moved(7, 5));
        assert_eq!(cm.runtime().timers().len(), 1);

        cm.unmount();
        assert!(cm.runtime().timers().is_empty());
        assert_eq!(cm.runtime().document().listener_count(), 0);
        assert!(cm.runtime().global().is_empty());
        assert!(!share(&mut cm).is_mounted());

        // nothing fires later either
        cm.tick(t0 + ms(5_000));
        assert!(!share(&mut cm).is_panel_shown());
    }

    #[test]
    fn keyboard_open_and_close_hands_keys_back() {
        let t0 = Instant::now();
        let mut cm = menu(t0, Rc::default());
        let root = cm.id();
        cm.handle_event(&key(KeyCode::Down));
        cm.handle_event(&key(KeyCode::Down));
        assert_eq!(cm.list().selected(), Some(1));
        cm.handle_event(&key(KeyCode::Right));
        assert!(share(&mut cm).is_force_open());
        assert_eq!(share(&mut cm).phase(), VisibilityPhase::Opening);

        cm.tick(t0);
        let id = share_id(&mut cm);
        assert_eq!(
            cm.runtime().document().listeners(DocumentEvent::KeyDown),
            &[id]
        );

        // keys now move inside the submenu, not the root
        cm.handle_event(&key(KeyCode::Down));
        assert_eq!(share(&mut cm).selected_item(), Some(0));
        assert_eq!(cm.list().selected(), Some(1));

        cm.handle_event(&key(KeyCode::Esc));
        assert!(!share(&mut cm).is_force_open());
        assert!(!cm.list().force_sub_menu_open());
        assert_eq!(
            cm.runtime().document().listeners(DocumentEvent::KeyDown),
            &[root]
        );
        assert!(cm.is_visible());
    }

    #[test]
    fn zero_transition_leaves_close_cleanup_pending() {
        let t0 = Instant::now();
        let mut cm = menu(t0, Rc::default());
        let options = match MenuOptions::new(DELAY, Duration::ZERO, false) {
            Ok(options) => options,
            Err(err) => panic!("{err}"),
        };
        cm.apply_options(options);
        cm.handle_event(&key(KeyCode::Up));
        cm.handle_event(&key(KeyCode::Right));
        cm.tick(t0);
        assert_eq!(share(&mut cm).phase(), VisibilityPhase::Open);

        cm.handle_event(&key(KeyCode::Left));
        cm.tick(t0 + ms(10_000));
        let sub = share(&mut cm);
        assert!(!sub.is_panel_shown());
        assert!(sub.panel_style().cleanup_on_transition_end);
        assert_eq!(sub.phase(), VisibilityPhase::Closing);
    }

    #[test]
    fn click_outside_closes_the_whole_tree() {
        let t0 = Instant::now();
        let mut cm = menu(t0, Rc::default());
        open_share_by_hover(&mut cm, t0);

        let consumed = cm.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 60, 20));
        assert!(!consumed);
        assert!(!cm.is_visible());
        assert!(!share(&mut cm).is_visible());
        assert!(!share(&mut cm).is_panel_shown());
        assert_eq!(cm.runtime().document().listener_count(), 0);

        cm.tick(t0 + ms(600));
        assert_eq!(share(&mut cm).phase(), VisibilityPhase::Closed);
    }

    #[test]
    fn drag_start_hides_open_submenu() {
        let t0 = Instant::now();
        let mut cm = menu(t0, Rc::default());
        open_share_by_hover(&mut cm, t0);

        assert!(cm.handle_event(&mouse(MouseEventKind::Down(MouseButton::Right), 18, 7)));
        assert!(cm.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Right), 19, 7)));
        assert!(!share(&mut cm).is_visible());
        assert!(!share(&mut cm).is_panel_shown());
        assert!(cm.is_visible());
    }

    #[test]
    fn item_click_merges_store_and_closes_everything() {
        let t0 = Instant::now();
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let mut cm = menu(t0, clicks.clone());
        open_share_by_hover(&mut cm, t0);

        cm.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 17, 6));
        let clicks = clicks.borrow();
        assert_eq!(clicks.len(), 1);
        assert_eq!(clicks[0].get("target").map(String::as_str), Some("file.txt"));
        assert!(!cm.is_visible());
        assert!(!share(&mut cm).is_visible());
    }

    #[test]
    fn disabled_submenu_never_opens_on_hover() {
        let t0 = Instant::now();
        let mut cm = menu(t0, Rc::default());
        share(&mut cm).config_mut().disabled = true;
        cm.handle_event(&moved(7, 5));
        assert!(!share(&mut cm).open_timer_pending());
        cm.tick(t0 + ms(1_000));
        assert!(!share(&mut cm).is_panel_shown());
    }

    #[derive(Debug, Default)]
    struct RecordingListener {
        inner: ClickOutsideListener,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl GlobalListener for RecordingListener {
        fn register(
            &mut self,
            on_activate: Option<HandlerId>,
            on_deactivate: HandlerId,
        ) -> ListenToken {
            self.log.borrow_mut().push(format!("register {on_deactivate}"));
            self.inner.register(on_activate, on_deactivate)
        }

        fn unregister(&mut self, token: ListenToken) {
            self.log.borrow_mut().push("unregister".into());
            self.inner.unregister(token);
        }

        fn targets(&self, signal: ListenerSignal) -> Vec<HandlerId> {
            self.inner.targets(signal)
        }

        fn len(&self) -> usize {
            self.inner.len()
        }
    }

    #[test]
    fn injected_dispatcher_sees_every_registration() {
        let t0 = Instant::now();
        let log = Rc::new(RefCell::new(Vec::new()));
        let listener = RecordingListener {
            log: log.clone(),
            ..RecordingListener::default()
        };
        let rt = MenuRuntime::new(Box::new(listener), Box::new(TimeoutScheduler), t0);
        let mut cm = ContextMenu::new(
            vec![SubMenu::new(SubMenuConfig::new("Share"), Vec::new()).into()],
            rt,
        );
        let root = cm.id();
        let sub = share_id(&mut cm);
        assert_eq!(
            *log.borrow(),
            vec![format!("register {root}"), format!("register {sub}")]
        );
        assert_eq!(
            cm.runtime().global().targets(ListenerSignal::Deactivate),
            vec![root, sub]
        );
        assert!(cm.runtime().global().targets(ListenerSignal::Activate).is_empty());

        cm.unmount();
        cm.unmount();
        assert_eq!(log.borrow().len(), 4);
        assert!(cm.runtime().global().is_empty());
    }

    /// Root panel at (5, 3), 10x4: "Aaaa ▸" on row 4, "Bbbb ▸" on row 5.
    fn sibling_menu(t0: Instant) -> ContextMenu {
        let mut rt = MenuRuntime::headless(t0);
        rt.set_viewport(ViewportExtent::new(80, 24));
        let mut cm = ContextMenu::new(
            vec![
                SubMenu::new(SubMenuConfig::new("Aaaa"), vec![MenuItem::new("x").into()])
                    .into(),
                SubMenu::new(
                    SubMenuConfig::new("Bbbb"),
                    vec![MenuItem::new("y").into(), MenuItem::new("z").into()],
                )
                .into(),
            ],
            rt,
        );
        cm.open_at(5, 3, MenuData::new());
        cm
    }

    fn titled<'a>(cm: &'a mut ContextMenu, title: &str) -> &'a mut SubMenu {
        match cm.submenu_by_title(title) {
            Some(sub) => sub,
            None => panic!("{title} submenu missing"),
        }
    }

    #[test]
    fn hovering_to_a_sibling_leaves_it_the_only_key_holder() {
        let t0 = Instant::now();
        let mut cm = sibling_menu(t0);
        cm.handle_event(&moved(7, 4));
        cm.tick(t0 + DELAY);
        assert_eq!(titled(&mut cm, "Aaaa").phase(), VisibilityPhase::Open);
        let a = titled(&mut cm, "Aaaa").id();
        let b = titled(&mut cm, "Bbbb").id();

        cm.handle_event(&moved(7, 5));
        assert!(titled(&mut cm, "Aaaa").close_timer_pending());
        assert!(titled(&mut cm, "Bbbb").open_timer_pending());

        cm.tick(t0 + ms(1_000));
        assert_eq!(titled(&mut cm, "Bbbb").phase(), VisibilityPhase::Open);
        assert_eq!(
            cm.runtime().document().listeners(DocumentEvent::KeyDown),
            &[b]
        );

        // A's close cleanup must not hand keys back to the root
        cm.tick(t0 + ms(1_200));
        cm.tick(t0 + ms(1_300));
        assert_eq!(titled(&mut cm, "Aaaa").phase(), VisibilityPhase::Closed);
        assert!(!titled(&mut cm, "Aaaa").is_panel_shown());
        assert_eq!(
            cm.runtime().document().listeners(DocumentEvent::KeyDown),
            &[b]
        );
        assert!(!cm.runtime().document().is_bound(a));

        cm.handle_event(&key(KeyCode::Down));
        assert_eq!(titled(&mut cm, "Bbbb").selected_item(), Some(0));
        assert_eq!(cm.list().selected(), Some(1));
    }

    #[test]
    fn hover_delay_counts_from_the_event_time() {
        let t0 = Instant::now();
        let mut cm = menu(t0, Rc::default());
        cm.tick(t0);
        cm.handle_event_at(&moved(7, 5), t0 + ms(200));
        assert_eq!(cm.next_deadline(), Some(t0 + ms(700)));

        cm.tick(t0 + ms(600));
        assert!(!share(&mut cm).is_panel_shown());
        cm.tick(t0 + ms(700));
        assert_eq!(share(&mut cm).phase(), VisibilityPhase::Open);
    }

    #[test]
    fn unmount_while_open_reports_closed() {
        let t0 = Instant::now();
        let mut cm = menu(t0, Rc::default());
        open_share_by_hover(&mut cm, t0);

        cm.unmount();
        let sub = share(&mut cm);
        assert_eq!(sub.phase(), VisibilityPhase::Closed);
        assert!(!sub.is_panel_shown());
        assert!(!sub.is_visible());
    }

    fn pump(sub: &mut SubMenu, rt: &mut MenuRuntime, now: Instant) {
        loop {
            let due = rt.advance(now);
            if due.is_empty() {
                break;
            }
            for wakeup in due {
                sub.handle_wakeup(wakeup.kind, rt);
            }
        }
    }

    #[test]
    fn forcing_an_already_visible_submenu_runs_no_sequence() {
        let t0 = Instant::now();
        let mut rt = MenuRuntime::headless(t0);
        let mut sub = SubMenu::new(SubMenuConfig::new("More"), vec![MenuItem::new("x").into()]);
        sub.mount(&mut rt);
        sub.on_hover_enter(&mut rt);
        sub.on_hover_enter(&mut rt);
        assert_eq!(rt.timers().len(), 1);

        pump(&mut sub, &mut rt, t0 + ms(600));
        assert_eq!(sub.phase(), VisibilityPhase::Open);
        pump(&mut sub, &mut rt, t0 + ms(700));
        assert_eq!(rt.timers().pending_for(sub.id()), 0);

        sub.set_force_open(true, &mut rt);
        assert_eq!(rt.timers().pending_for(sub.id()), 0);
        sub.set_force_open(false, &mut rt);
        assert_eq!(rt.timers().pending_for(sub.id()), 0);
        assert_eq!(sub.phase(), VisibilityPhase::Open);
    }

    #[test]
    fn stale_hover_wakeups_are_ignored() {
        let t0 = Instant::now();
        let mut rt = MenuRuntime::headless(t0);
        let mut sub = SubMenu::new(SubMenuConfig::new("More"), Vec::new());
        sub.mount(&mut rt);
        sub.handle_wakeup(TimerKind::HoverOpen, &mut rt);
        assert!(!sub.is_visible());
        assert_eq!(sub.phase(), VisibilityPhase::Closed);

        sub.unmount(&mut rt);
        sub.unmount(&mut rt);
        assert!(rt.is_released(sub.id()));
        assert!(rt.global().is_empty());
    }
}
