pub mod assets;
pub mod notifications;
pub mod repositories;
