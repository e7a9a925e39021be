//! Shared data types
//!
//! Wire types for every backend resource the client talks to, plus the
//! pagination envelope. All types are `serde` round-trippable.

pub mod class_group;
pub mod department;
pub mod notification;
pub mod pagination;
pub mod semester;
pub mod stored_file;
pub mod subject;
pub mod user;

pub use class_group::ClassGroup;
pub use department::Department;
pub use notification::Notification;
pub use pagination::{Paginated, Pagination};
pub use semester::Semester;
pub use stored_file::StoredFile;
pub use subject::Subject;
pub use user::{Role, User};
