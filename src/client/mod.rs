//! Client-side view logic: the screen state machine, the phone mask and the
//! controller that talks to the service.

pub mod backend;
pub mod controller;
pub mod mask;
pub mod state;

pub use backend::{Backend, LocalBackend};
pub use controller::Controller;
pub use state::{AdminTab, ClientState, View};
