pub mod codec;
pub mod errors;

pub use codec::ResetGrant;
pub use codec::ResetTokenCodec;
pub use errors::ResetTokenError;
