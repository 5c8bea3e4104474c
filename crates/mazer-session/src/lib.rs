//! Interactive maze-solver session.
//!
//! [`Session`] holds the configuration, the current grid and the replay of
//! the last solve. A front end calls [`Session::solve`], then feeds elapsed
//! time to [`Session::tick`] and redraws from [`Session::grid`].

mod replay;
mod session;

pub use replay::{Replay, ReplayEvent, ReplayStep, base_delay};
pub use session::{Session, SessionError, SolveReport};
