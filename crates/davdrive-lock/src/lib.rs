//! Passcode app-lock for davdrive
//!
//! A small state machine over the preferences port: digits are entered one
//! at a time, a full buffer is evaluated against the session's action
//! (create, check or remove), and repeated failures trigger a timed
//! lockout. Input is trusted on-device UI input, so malformed input is
//! ignored rather than raised.

pub mod clock;
pub mod passcode;

pub use clock::{IClock, SystemClock};
pub use passcode::{PassCodeHandler, PasscodeAction, PasscodeOutcome, Status};
