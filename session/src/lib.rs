mod gate;
mod guard;
mod state;
mod token;

pub use gate::SessionGate;
pub use guard::{AccessMode, GuardOutcome, evaluate};
pub use state::SessionState;
pub use token::AccessToken;
