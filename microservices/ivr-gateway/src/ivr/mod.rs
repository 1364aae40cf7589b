//! IVR call flow
//!
//! The remote voice gateway drives the menu tree by replaying HTTP
//! callbacks; the service holds no session state. `flow` decides
//! transitions, `markup` renders the Plivo XML each state answers with.

mod flow;
mod markup;


pub use flow::{CallFlow, CallState, Locale, Transition};
pub use markup::{IvrDocument, IvrElement, Prompt};
