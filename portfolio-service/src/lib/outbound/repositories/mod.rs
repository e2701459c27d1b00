pub mod application;
pub mod message;
pub mod project;
pub mod skill;
pub mod timeline;
pub mod user;

pub use application::PostgresApplicationRepository;
pub use message::PostgresMessageRepository;
pub use project::PostgresProjectRepository;
pub use skill::PostgresSkillRepository;
pub use timeline::PostgresTimelineRepository;
pub use user::PostgresUserRepository;
