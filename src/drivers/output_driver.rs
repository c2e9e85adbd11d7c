use crate::ui::UiFrame;
use std::io;

pub trait OutputDriver {
    /// Switch the terminal into the mode the menus draw in.
    fn enter(&mut self) -> io::Result<()>;
    /// Undo `enter`. Calling it without a prior `enter` is a no-op.
    fn exit(&mut self) -> io::Result<()>;

    fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(&mut UiFrame<'_>);
}
