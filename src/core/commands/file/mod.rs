// src/core/commands/file/mod.rs

//! File-management commands. Each one operates on names relative to the
//! server's storage root and only ever runs for authenticated callers.

pub mod append;
pub mod create;
pub mod delete;
pub mod info;
pub mod list;
pub mod read;
pub mod rename;
pub mod write;

pub use self::append::Append;
pub use self::create::Create;
pub use self::delete::Delete;
pub use self::info::Info;
pub use self::list::List;
pub use self::read::Read;
pub use self::rename::Rename;
pub use self::write::Write;
