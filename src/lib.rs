pub mod components;
pub mod config;
pub mod constants;
pub mod document;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod geometry;
pub mod global_listener;
pub mod layout;
pub mod log_buffer;
pub mod paint;
pub mod runtime;
pub mod theme;
pub mod timers;
pub mod tracing_sub;
pub mod ui;

pub use components::{ContextMenu, MenuEntry, MenuItem, MenuList, SubMenu};
pub use config::{MenuData, MenuOptions, MenuStyles, SubMenuConfig};
pub use error::{MenuError, OptionsError};
pub use runtime::{MenuMessage, MenuRuntime};
