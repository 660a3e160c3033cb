//! Built-in widgets.

mod book;
mod button;
mod container;
mod list;
mod min_proxy;
mod tabbed_book;
mod table;
mod tabs;

pub use book::{Book, PagesChange, PagesChangeHandler};
pub use button::{NinePatch, NinePatchButton, NinePatchToggle, Pressable, Toggleable};
pub use container::{Blank, Container};
pub use list::{DataSetChangedHandler, ItemsProvider, List};
pub use min_proxy::MinProxy;
pub use tabbed_book::TabbedBook;
pub use table::TableRow;
pub use tabs::{Tab, TabChangeHandler, TabGroup};
