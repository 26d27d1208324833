//! Typed records shared by stores and HTTP handlers.

pub mod guestbook;
pub mod response;
