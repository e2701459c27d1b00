pub mod email;

pub use email::ResendEmailSender;
