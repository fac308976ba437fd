#[cfg(feature = "context")]
mod context;
#[cfg(feature = "context")]
pub use context::Context;

#[cfg(feature = "internal-error")]
mod internal_error;
#[cfg(feature = "internal-error")]
pub use internal_error::InternalError;

#[cfg(feature = "op-error")]
mod op_error;
#[cfg(feature = "op-error")]
pub use op_error::OpError;
