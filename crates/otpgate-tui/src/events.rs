//! UI event types.
//!
//! Everything the reducer reacts to: frame ticks, raw terminal input and
//! flow events coming back from async handlers.

use crossterm::event::Event;
use otpgate_core::flow::FlowEvent;

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick; drives rendering and the spinner.
    Tick,
    Terminal(Event),
    /// Event for the sign-in flow (remote results, step entry).
    Flow(FlowEvent),
}
