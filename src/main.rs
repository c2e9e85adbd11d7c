use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use indoc::indoc;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Paragraph;
use tracing::Level;

use term_menu::drivers::OutputDriver;
use term_menu::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use term_menu::event_loop::{ControlFlow, EventLoop};
use term_menu::log_buffer::{LogBuffer, set_global_log};
use term_menu::tracing_sub::LogSink;
use term_menu::ui::UiFrame;
use term_menu::{
    ContextMenu, MenuData, MenuEntry, MenuError, MenuItem, MenuOptions, MenuRuntime,
    OptionsError, SubMenu, SubMenuConfig, theme, tracing_sub,
};

const HELP: &str = indoc! {"
    term-menu demo
    Right-click anywhere to open the context menu.
    Hover a row ending in an arrow to open its submenu, or use the arrow keys.
    Enter activates, Left or Esc closes a level, Ctrl+Q quits.
"};

/// Rows reserved at the bottom of the screen for the log tail.
const LOG_ROWS: u16 = 8;

#[derive(Parser, Debug)]
#[command(
    name = "term-menu",
    version = env!("CARGO_PKG_VERSION"),
    about = "Nested context menus in the terminal"
)]
struct Cli {
    /// Delay before a hovered submenu opens or a left one closes.
    #[arg(long = "hover-delay", value_name = "MS", default_value_t = 500)]
    hover_delay_ms: u64,

    /// Length of the panel show/hide transition. 0 disables close cleanup.
    #[arg(long = "transition", value_name = "MS", default_value_t = 1)]
    transition_ms: u64,

    /// Open submenus to the left first.
    #[arg(long)]
    rtl: bool,

    /// Maximum level of log lines shown under the menu.
    #[arg(long = "log-level", value_name = "LEVEL", default_value_t = Level::DEBUG)]
    log_level: Level,
}

impl TryFrom<&Cli> for MenuOptions {
    type Error = OptionsError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        MenuOptions::new(
            Duration::from_millis(cli.hover_delay_ms),
            Duration::from_millis(cli.transition_ms),
            cli.rtl,
        )
    }
}

fn main() -> Result<(), MenuError> {
    let cli = Cli::parse();
    let options = MenuOptions::try_from(&cli)?;

    let log = LogBuffer::default();
    set_global_log(log.clone());
    tracing_sub::init(cli.log_level, LogSink::from_global());

    let mut menu = ContextMenu::new(sample_menu(), MenuRuntime::detect(Instant::now()))
        .with_options(options);

    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    tracing::info!(?options, "demo started");

    let mut events = EventLoop::new(ConsoleInputDriver::new(), Duration::from_millis(50));
    let result = events.run(|_, event| {
        match event {
            None => {
                menu.tick(Instant::now());
                output.draw(|frame| draw_screen(frame, &mut menu, &log))?;
            }
            Some(Event::Key(key))
                if key.code == KeyCode::Char('q')
                    && key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                return Ok(ControlFlow::Quit);
            }
            Some(event) => {
                if !menu.handle_event_at(&event, Instant::now())
                    && let Event::Mouse(mouse) = event
                    && mouse.kind == MouseEventKind::Down(MouseButton::Right)
                {
                    menu.open_at(mouse.column as i32, mouse.row as i32, click_data(&mouse));
                }
            }
        }
        Ok(match menu.next_deadline() {
            Some(deadline) => ControlFlow::WakeAt(deadline),
            None => ControlFlow::Continue,
        })
    });

    menu.unmount();
    output.exit()?;
    result?;
    Ok(())
}

fn draw_screen(frame: &mut UiFrame, menu: &mut ContextMenu, log: &LogBuffer) {
    let area = frame.area();
    let style = Style::default().fg(theme::menu_fg());
    frame.render_widget(Paragraph::new(HELP).style(style), area);

    let log_rows = LOG_ROWS.min(area.height);
    let log_area = Rect {
        x: area.x,
        y: area.bottom() - log_rows,
        width: area.width,
        height: log_rows,
    };
    log.render_tail(frame, log_area);

    menu.render(frame);
}

fn click_data(mouse: &MouseEvent) -> MenuData {
    let mut data = MenuData::new();
    data.insert("column".into(), mouse.column.to_string());
    data.insert("row".into(), mouse.row.to_string());
    data
}

fn log_click(event: &Event, data: &MenuData) {
    let kind = match event {
        Event::Key(_) => "key",
        Event::Mouse(_) => "mouse",
        _ => "other",
    };
    tracing::info!(via = kind, ?data, "item clicked");
}

fn sample_menu() -> Vec<MenuEntry> {
    let more = SubMenu::new(
        SubMenuConfig::new("More"),
        vec![
            MenuItem::new("Copy link")
                .data("action", "link")
                .on_click(log_click)
                .into(),
            MenuItem::new("QR code")
                .data("action", "qr")
                .on_click(log_click)
                .into(),
        ],
    );
    let share = SubMenu::new(
        SubMenuConfig::new("Share")
            .on_click(|_, data| tracing::info!(?data, "share trigger clicked"))
            .on_force_close(|| tracing::debug!("share released by keyboard")),
        vec![
            MenuItem::new("Mail")
                .data("action", "mail")
                .on_click(log_click)
                .into(),
            MenuItem::new("Chat")
                .data("action", "chat")
                .on_click(log_click)
                .into(),
            MenuEntry::Divider,
            more.into(),
        ],
    );
    let open_with = SubMenu::new(
        SubMenuConfig::new("Open with"),
        vec![
            MenuItem::new("Editor")
                .data("action", "edit")
                .on_click(log_click)
                .into(),
            MenuItem::new("Viewer").disabled(true).into(),
        ],
    );

    vec![
        MenuItem::new("Copy")
            .data("action", "copy")
            .on_click(log_click)
            .into(),
        MenuItem::new("Paste").disabled(true).into(),
        MenuEntry::Divider,
        share.into(),
        open_with.into(),
        MenuEntry::Divider,
        MenuItem::new("Delete")
            .data("action", "delete")
            .on_click(log_click)
            .into(),
    ]
}
