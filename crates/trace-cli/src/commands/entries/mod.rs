//! Entry commands: write, show, list, search, delete.

mod delete;
mod list;
mod search;
mod show;
mod write;

pub use delete::handle_delete;
pub use list::handle_list;
pub use search::handle_search;
pub use show::handle_show;
pub use write::handle_write;
