//! Message bus, timer facility, and notification surface.
//!
//! The three surfaces (control, scheduler, presentation) run on independent
//! lifecycles and share no memory; everything between them goes through the
//! typed messages in `bus`, the named recurring trigger in `timer`, or the
//! notification sink in `notify`.

pub mod bus;
pub mod notify;
pub mod timer;
