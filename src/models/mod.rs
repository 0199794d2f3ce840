pub mod user;
pub mod repository;
pub mod event;
pub mod profile;

pub use user::*;
pub use repository::*;
pub use event::*;
pub use profile::*;
