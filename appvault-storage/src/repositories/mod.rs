//! Typed repositories over [`EntityStore`](crate::EntityStore).
//!
//! Repositories validate requests, assign identifiers and creation
//! timestamps from the injected clock, and delegate persistence to the
//! entity store.

mod links;
mod pdfs;
mod profile;
mod tasks;

pub use links::LinkRepository;
pub use pdfs::PdfRepository;
pub use profile::ProfileRepository;
pub use tasks::{task_status, TaskFilter, TaskObserver, TaskRepository, TaskStatus};
