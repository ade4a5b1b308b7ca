mod effect;
mod intent;
mod state;
mod transition;

pub use effect::{Effect, PersistOp, PersistRequest, StoreOutcome, Transition};
pub use intent::Intent;
pub use state::{InputBuffers, Mode, NameStage, Session};
