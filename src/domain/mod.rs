pub mod common;
pub mod user;
pub mod announcement;
pub mod event;
pub mod notification;
pub mod document;
pub mod ticket;
pub mod teams;
pub mod assistant;

pub use common::*;
pub use user::*;
pub use announcement::*;
pub use event::*;
pub use notification::*;
pub use document::*;
pub use ticket::*;
pub use teams::*;
pub use assistant::*;
