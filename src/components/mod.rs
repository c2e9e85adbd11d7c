pub mod context_menu;
pub mod menu_item;
pub mod menu_list;
pub mod submenu;

pub use context_menu::ContextMenu;
pub use menu_item::MenuItem;
pub use menu_list::{MenuEntry, MenuList, NavOutcome};
pub use submenu::{PanelStyle, SubMenu, VisibilityInputs, VisibilityPhase, is_visibility_change};
