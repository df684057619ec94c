pub mod root;
pub mod auth;
pub mod profile;
pub mod announcements;
pub mod events;
pub mod notifications;
pub mod documents;
pub mod tickets;
pub mod teams;
pub mod assistant;
pub mod search;
pub mod admin;
