pub mod application;
pub mod asset;
pub mod errors;
pub mod message;
pub mod project;
pub mod skill;
pub mod timeline;
pub mod user;
