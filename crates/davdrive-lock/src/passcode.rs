//! Passcode entry state machine
//!
//! One [`PassCodeHandler`] lives per lock-screen session and is confined
//! to the UI-interaction thread; there is one user and one input stream,
//! so the entered-digit buffer needs no synchronization. The handler
//! reads and writes lock state through the preferences port.

use std::sync::Arc;

use tracing::{debug, info};

use davdrive_core::ports::IPreferencesStore;

use crate::clock::IClock;

/// Storage key of the passcode in the current format
pub const PREF_PASSCODE: &str = "passcode";
/// Prefix of the legacy per-digit storage keys (`passcode_d1`..`passcode_dN`)
pub const PREF_LEGACY_PASSCODE_DIGIT: &str = "passcode_d";
/// Storage key of the "a passcode is set" flag
pub const PREF_PASSCODE_SET: &str = "passcode_set";
/// Storage key of the failed-attempt counter
pub const PREF_LOCK_ATTEMPTS: &str = "lock_attempts";
/// Storage key of the last failed attempt timestamp (millis)
pub const PREF_LAST_UNLOCK_ATTEMPT_AT: &str = "last_unlock_attempt_at";
/// Storage key of the last successful unlock timestamp (millis)
pub const PREF_LAST_UNLOCK_AT: &str = "last_unlock_at";
/// Storage key of the one-time migration flag
pub const PREF_MIGRATION_REQUIRED: &str = "passcode_migration_required";

/// Failed attempts after which the timed lockout applies
const ATTEMPTS_BEFORE_LOCKOUT: i32 = 3;
/// Length of the lockout window in milliseconds
const LOCKOUT_WINDOW_MILLIS: i64 = 3_000;
/// Floor for the configured digit count
const MIN_PASSCODE_DIGITS: u32 = 4;

/// The intent of a lock-screen session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasscodeAction {
    /// Set a new passcode (entered twice to confirm)
    Create,
    /// Verify the stored passcode
    Check,
    /// Remove the stored passcode after verifying it
    Remove,
}

/// Result of evaluating a full digit buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasscodeOutcome {
    /// The entered passcode matched (Check/Remove)
    Ok,
    /// The entered passcode did not match, or confirmation differed
    Error,
    /// First Create entry accepted, confirmation required
    NoConfirm,
    /// Create confirmation matched and the passcode was persisted
    Confirm,
}

/// Status emitted after a full buffer was evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    /// The session's action
    pub action: PasscodeAction,
    /// What the evaluation concluded
    pub outcome: PasscodeOutcome,
}

impl Status {
    fn new(action: PasscodeAction, outcome: PasscodeOutcome) -> Self {
        Self { action, outcome }
    }
}

/// Passcode entry state machine for one lock-screen session
pub struct PassCodeHandler {
    prefs: Arc<dyn IPreferencesStore>,
    clock: Arc<dyn IClock>,
    action: PasscodeAction,
    required_digits: usize,
    entered: String,
    candidate: Option<String>,
}

impl PassCodeHandler {
    /// Creates a handler for one lock-screen session
    ///
    /// `configured_digits` below the floor of 4 is clamped up. Legacy
    /// per-digit storage is migrated once, here, so the steady-state read
    /// path only ever sees the current format.
    pub fn new(
        prefs: Arc<dyn IPreferencesStore>,
        clock: Arc<dyn IClock>,
        action: PasscodeAction,
        configured_digits: u32,
    ) -> Self {
        let handler = Self {
            prefs,
            clock,
            action,
            required_digits: configured_digits.max(MIN_PASSCODE_DIGITS) as usize,
            entered: String::new(),
            candidate: None,
        };
        handler.migrate_legacy_format();
        handler
    }

    /// Feeds one digit into the entry buffer
    ///
    /// Returns `Some(Status)` exactly when a full buffer was evaluated.
    /// Digits outside 0-9, entries during an active lockout and digits
    /// past the required length are ignored without emitting anything.
    pub fn on_digit(&mut self, digit: u8) -> Option<Status> {
        if digit > 9 {
            return None;
        }
        if self.is_locked_out() {
            debug!("Digit ignored, lockout active");
            return None;
        }
        if self.entered.len() >= self.required_digits {
            return None;
        }

        self.entered.push((b'0' + digit) as char);

        if self.entered.len() == self.required_digits {
            let status = self.evaluate();
            self.entered.clear();
            return Some(status);
        }

        None
    }

    /// Evaluates the full buffer against the session's action
    fn evaluate(&mut self) -> Status {
        match self.action {
            PasscodeAction::Check => {
                if self.verify(self.entered.as_str()) {
                    self.reset_attempts();
                    Status::new(PasscodeAction::Check, PasscodeOutcome::Ok)
                } else {
                    self.increase_attempts();
                    Status::new(PasscodeAction::Check, PasscodeOutcome::Error)
                }
            }
            PasscodeAction::Remove => {
                if self.verify(self.entered.as_str()) {
                    self.prefs.remove(PREF_PASSCODE);
                    self.prefs.put_bool(PREF_PASSCODE_SET, false);
                    info!("Passcode removed");
                    Status::new(PasscodeAction::Remove, PasscodeOutcome::Ok)
                } else {
                    Status::new(PasscodeAction::Remove, PasscodeOutcome::Error)
                }
            }
            PasscodeAction::Create => match self.candidate.take() {
                None => {
                    self.candidate = Some(self.entered.clone());
                    Status::new(PasscodeAction::Create, PasscodeOutcome::NoConfirm)
                }
                Some(candidate) if candidate == self.entered => {
                    self.prefs.put_string(PREF_PASSCODE, &self.entered);
                    self.prefs.put_bool(PREF_PASSCODE_SET, true);
                    info!("Passcode set");
                    Status::new(PasscodeAction::Create, PasscodeOutcome::Confirm)
                }
                Some(_) => Status::new(PasscodeAction::Create, PasscodeOutcome::Error),
            },
        }
    }

    /// Compares a candidate against the stored passcode
    ///
    /// An absent or empty stored passcode never matches.
    pub fn verify(&self, candidate: &str) -> bool {
        match self.passcode() {
            Some(stored) if !stored.is_empty() => stored == candidate,
            _ => false,
        }
    }

    /// Returns the stored passcode, if any
    pub fn passcode(&self) -> Option<String> {
        self.prefs.get_string(PREF_PASSCODE)
    }

    /// Returns true if a passcode is currently set
    pub fn is_passcode_set(&self) -> bool {
        self.prefs.get_bool(PREF_PASSCODE_SET, false)
    }

    /// Returns the effective digit count for this session
    pub fn number_of_digits(&self) -> usize {
        self.required_digits
    }

    /// Returns the digits entered so far (for UI echo)
    pub fn entered(&self) -> &str {
        &self.entered
    }

    /// Returns the current failed-attempt count
    pub fn attempts(&self) -> i32 {
        self.prefs.get_i32(PREF_LOCK_ATTEMPTS, 0)
    }

    /// Records a failed attempt and stamps its time
    fn increase_attempts(&self) {
        self.prefs.put_i32(PREF_LOCK_ATTEMPTS, self.attempts() + 1);
        self.prefs
            .put_i64(PREF_LAST_UNLOCK_ATTEMPT_AT, self.clock.now_millis());
    }

    /// Clears the failed-attempt counter
    fn reset_attempts(&self) {
        self.prefs.put_i32(PREF_LOCK_ATTEMPTS, 0);
    }

    /// Milliseconds until digit entry is accepted again, 0 if not locked
    pub fn time_to_unlock_left(&self) -> i64 {
        let last_attempt = self.prefs.get_i64(PREF_LAST_UNLOCK_ATTEMPT_AT, 0);
        (last_attempt + LOCKOUT_WINDOW_MILLIS - self.clock.now_millis()).max(0)
    }

    /// Stamps a successful unlock
    pub fn register_unlock(&self) {
        self.prefs
            .put_i64(PREF_LAST_UNLOCK_AT, self.clock.now_millis());
    }

    /// Sets or clears the one-time migration flag
    pub fn set_migration_required(&self, required: bool) {
        self.prefs.put_bool(PREF_MIGRATION_REQUIRED, required);
    }

    /// Returns true if a one-time migration rewrite is still pending
    pub fn is_migration_required(&self) -> bool {
        self.prefs.get_bool(PREF_MIGRATION_REQUIRED, false)
    }

    fn is_locked_out(&self) -> bool {
        if self.attempts() < ATTEMPTS_BEFORE_LOCKOUT {
            return false;
        }
        let last_attempt = self.prefs.get_i64(PREF_LAST_UNLOCK_ATTEMPT_AT, 0);
        self.clock.now_millis() - last_attempt < LOCKOUT_WINDOW_MILLIS
    }

    /// One-time rewrite of the legacy per-digit storage format
    ///
    /// Older releases stored each digit under its own key. If the current
    /// key is absent and every legacy key is present, their concatenation
    /// becomes the passcode under the current key, the legacy keys are
    /// removed and the migration flag is raised.
    fn migrate_legacy_format(&self) {
        if self.prefs.get_string(PREF_PASSCODE).is_some() {
            return;
        }

        let mut combined = String::with_capacity(self.required_digits);
        for i in 1..=self.required_digits {
            match self
                .prefs
                .get_string(&format!("{PREF_LEGACY_PASSCODE_DIGIT}{i}"))
            {
                Some(digit) => combined.push_str(&digit),
                None => return,
            }
        }

        info!("Migrating passcode from legacy per-digit storage");
        self.prefs.put_string(PREF_PASSCODE, &combined);
        for i in 1..=self.required_digits {
            self.prefs
                .remove(&format!("{PREF_LEGACY_PASSCODE_DIGIT}{i}"));
        }
        self.set_migration_required(true);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use davdrive_prefs::InMemoryPreferences;

    use super::*;

    /// Clock double with a settable current time
    struct TestClock {
        now: Mutex<i64>,
    }

    impl TestClock {
        fn at(now: i64) -> Arc<Self> {
            Arc::new(Self {
                now: Mutex::new(now),
            })
        }

        fn set(&self, now: i64) {
            *self.now.lock().unwrap() = now;
        }
    }

    impl IClock for TestClock {
        fn now_millis(&self) -> i64 {
            *self.now.lock().unwrap()
        }
    }

    fn prefs_with_passcode(passcode: &str) -> Arc<InMemoryPreferences> {
        let prefs = Arc::new(InMemoryPreferences::new());
        prefs.put_string(PREF_PASSCODE, passcode);
        prefs.put_bool(PREF_PASSCODE_SET, true);
        prefs
    }

    fn enter(handler: &mut PassCodeHandler, digits: &[u8]) -> Option<Status> {
        let mut last = None;
        for &d in digits {
            last = handler.on_digit(d);
        }
        last
    }

    #[test]
    fn test_single_digit_is_buffered() {
        let prefs = prefs_with_passcode("1111");
        let mut handler =
            PassCodeHandler::new(prefs, TestClock::at(0), PasscodeAction::Check, 4);

        assert_eq!(handler.on_digit(1), None);
        assert_eq!(handler.entered(), "1");
    }

    #[test]
    fn test_check_ok_resets_attempts() {
        let prefs = prefs_with_passcode("1111");
        prefs.put_i32(PREF_LOCK_ATTEMPTS, 2);
        let mut handler =
            PassCodeHandler::new(prefs.clone(), TestClock::at(0), PasscodeAction::Check, 4);

        let status = enter(&mut handler, &[1, 1, 1, 1]);

        assert_eq!(
            status,
            Some(Status::new(PasscodeAction::Check, PasscodeOutcome::Ok))
        );
        assert_eq!(prefs.get_i32(PREF_LOCK_ATTEMPTS, -1), 0);
        assert_eq!(handler.entered(), "");
    }

    #[test]
    fn test_check_error_counts_attempt_and_stamps_time() {
        let prefs = prefs_with_passcode("1111");
        let clock = TestClock::at(5_000);
        let mut handler =
            PassCodeHandler::new(prefs.clone(), clock, PasscodeAction::Check, 4);

        let status = enter(&mut handler, &[2, 1, 1, 1]);

        assert_eq!(
            status,
            Some(Status::new(PasscodeAction::Check, PasscodeOutcome::Error))
        );
        assert_eq!(prefs.get_i32(PREF_LOCK_ATTEMPTS, 0), 1);
        assert_eq!(prefs.get_i64(PREF_LAST_UNLOCK_ATTEMPT_AT, 0), 5_000);
        assert_eq!(handler.entered(), "");
    }

    #[test]
    fn test_remove_ok_deletes_passcode() {
        let prefs = prefs_with_passcode("1111");
        let mut handler =
            PassCodeHandler::new(prefs.clone(), TestClock::at(0), PasscodeAction::Remove, 4);

        let status = enter(&mut handler, &[1, 1, 1, 1]);

        assert_eq!(
            status,
            Some(Status::new(PasscodeAction::Remove, PasscodeOutcome::Ok))
        );
        assert_eq!(prefs.get_string(PREF_PASSCODE), None);
        assert!(!prefs.get_bool(PREF_PASSCODE_SET, true));
    }

    #[test]
    fn test_remove_error_keeps_passcode_and_attempts() {
        let prefs = prefs_with_passcode("1111");
        let mut handler =
            PassCodeHandler::new(prefs.clone(), TestClock::at(0), PasscodeAction::Remove, 4);

        let status = enter(&mut handler, &[2, 1, 1, 1]);

        assert_eq!(
            status,
            Some(Status::new(PasscodeAction::Remove, PasscodeOutcome::Error))
        );
        assert_eq!(prefs.get_string(PREF_PASSCODE).as_deref(), Some("1111"));
        // Remove mismatches are not attempt-counted.
        assert_eq!(prefs.get_i32(PREF_LOCK_ATTEMPTS, 0), 0);
    }

    #[test]
    fn test_create_requires_confirmation() {
        let prefs = Arc::new(InMemoryPreferences::new());
        let mut handler =
            PassCodeHandler::new(prefs.clone(), TestClock::at(0), PasscodeAction::Create, 4);

        let first = enter(&mut handler, &[1, 1, 1, 1]);
        assert_eq!(
            first,
            Some(Status::new(
                PasscodeAction::Create,
                PasscodeOutcome::NoConfirm
            ))
        );
        assert_eq!(prefs.get_string(PREF_PASSCODE), None);

        let second = enter(&mut handler, &[1, 1, 1, 1]);
        assert_eq!(
            second,
            Some(Status::new(PasscodeAction::Create, PasscodeOutcome::Confirm))
        );
        assert_eq!(prefs.get_string(PREF_PASSCODE).as_deref(), Some("1111"));
        assert!(prefs.get_bool(PREF_PASSCODE_SET, false));
    }

    #[test]
    fn test_create_confirmation_mismatch_persists_nothing() {
        let prefs = Arc::new(InMemoryPreferences::new());
        let mut handler =
            PassCodeHandler::new(prefs.clone(), TestClock::at(0), PasscodeAction::Create, 4);

        enter(&mut handler, &[1, 1, 1, 1]);
        let status = enter(&mut handler, &[2, 1, 1, 1]);

        assert_eq!(
            status,
            Some(Status::new(PasscodeAction::Create, PasscodeOutcome::Error))
        );
        assert_eq!(prefs.get_string(PREF_PASSCODE), None);
        assert!(!prefs.get_bool(PREF_PASSCODE_SET, false));

        // The candidate is dropped; the next full entry starts over.
        let restart = enter(&mut handler, &[3, 3, 3, 3]);
        assert_eq!(
            restart,
            Some(Status::new(
                PasscodeAction::Create,
                PasscodeOutcome::NoConfirm
            ))
        );
    }

    #[test]
    fn test_lockout_ignores_digits_inside_window() {
        let prefs = prefs_with_passcode("1111");
        prefs.put_i32(PREF_LOCK_ATTEMPTS, 3);
        prefs.put_i64(PREF_LAST_UNLOCK_ATTEMPT_AT, 10_000);
        let clock = TestClock::at(10_000);
        let mut handler =
            PassCodeHandler::new(prefs.clone(), clock.clone(), PasscodeAction::Check, 4);

        assert_eq!(handler.on_digit(1), None);
        assert_eq!(handler.entered(), "");

        // Past the window the digit is accepted again.
        clock.set(13_001);
        assert_eq!(handler.on_digit(1), None);
        assert_eq!(handler.entered(), "1");
    }

    #[test]
    fn test_lockout_requires_three_attempts() {
        let prefs = prefs_with_passcode("1111");
        prefs.put_i32(PREF_LOCK_ATTEMPTS, 2);
        prefs.put_i64(PREF_LAST_UNLOCK_ATTEMPT_AT, 10_000);
        let mut handler = PassCodeHandler::new(
            prefs,
            TestClock::at(10_000),
            PasscodeAction::Check,
            4,
        );

        assert_eq!(handler.on_digit(1), None);
        assert_eq!(handler.entered(), "1");
    }

    #[test]
    fn test_digit_count_clamped_to_four() {
        let prefs = Arc::new(InMemoryPreferences::new());
        let handler =
            PassCodeHandler::new(prefs.clone(), TestClock::at(0), PasscodeAction::Check, 3);
        assert_eq!(handler.number_of_digits(), 4);

        let handler =
            PassCodeHandler::new(prefs, TestClock::at(0), PasscodeAction::Check, 6);
        assert_eq!(handler.number_of_digits(), 6);
    }

    #[test]
    fn test_out_of_range_digit_is_ignored() {
        let prefs = prefs_with_passcode("1111");
        let mut handler =
            PassCodeHandler::new(prefs, TestClock::at(0), PasscodeAction::Check, 4);

        assert_eq!(handler.on_digit(10), None);
        assert_eq!(handler.entered(), "");
    }

    #[test]
    fn test_verify_against_stored() {
        let prefs = prefs_with_passcode("1111");
        let handler =
            PassCodeHandler::new(prefs, TestClock::at(0), PasscodeAction::Check, 4);

        assert!(handler.verify("1111"));
        assert!(!handler.verify("1211"));
        assert!(!handler.verify(""));
    }

    #[test]
    fn test_verify_with_no_stored_passcode() {
        let prefs = Arc::new(InMemoryPreferences::new());
        let handler =
            PassCodeHandler::new(prefs, TestClock::at(0), PasscodeAction::Check, 4);

        assert!(!handler.verify("1111"));
    }

    #[test]
    fn test_verify_with_empty_stored_passcode() {
        let prefs = Arc::new(InMemoryPreferences::new());
        prefs.put_string(PREF_PASSCODE, "");
        let handler =
            PassCodeHandler::new(prefs, TestClock::at(0), PasscodeAction::Check, 4);

        assert!(!handler.verify("1111"));
    }

    #[test]
    fn test_legacy_format_is_migrated_once() {
        let prefs = Arc::new(InMemoryPreferences::new());
        prefs.put_string("passcode_d1", "4");
        prefs.put_string("passcode_d2", "3");
        prefs.put_string("passcode_d3", "2");
        prefs.put_string("passcode_d4", "1");

        let handler =
            PassCodeHandler::new(prefs.clone(), TestClock::at(0), PasscodeAction::Check, 4);

        assert_eq!(prefs.get_string(PREF_PASSCODE).as_deref(), Some("4321"));
        assert_eq!(prefs.get_string("passcode_d1"), None);
        assert_eq!(prefs.get_string("passcode_d4"), None);
        assert!(handler.is_migration_required());
        assert!(handler.verify("4321"));
    }

    #[test]
    fn test_migration_skipped_when_current_format_present() {
        let prefs = prefs_with_passcode("1111");
        prefs.put_string("passcode_d1", "9");

        let handler =
            PassCodeHandler::new(prefs.clone(), TestClock::at(0), PasscodeAction::Check, 4);

        assert_eq!(prefs.get_string(PREF_PASSCODE).as_deref(), Some("1111"));
        assert_eq!(prefs.get_string("passcode_d1").as_deref(), Some("9"));
        assert!(!handler.is_migration_required());
    }

    #[test]
    fn test_migration_skipped_when_legacy_keys_incomplete() {
        let prefs = Arc::new(InMemoryPreferences::new());
        prefs.put_string("passcode_d1", "1");
        prefs.put_string("passcode_d2", "2");

        let handler =
            PassCodeHandler::new(prefs.clone(), TestClock::at(0), PasscodeAction::Check, 4);

        assert_eq!(prefs.get_string(PREF_PASSCODE), None);
        assert!(!handler.is_migration_required());
        // Partial legacy keys are left untouched.
        assert_eq!(prefs.get_string("passcode_d1").as_deref(), Some("1"));
    }

    #[test]
    fn test_time_to_unlock_left() {
        let prefs = prefs_with_passcode("1111");
        let clock = TestClock::at(10_000);
        let handler =
            PassCodeHandler::new(prefs.clone(), clock.clone(), PasscodeAction::Check, 4);

        prefs.put_i64(PREF_LAST_UNLOCK_ATTEMPT_AT, 10_000);
        assert_eq!(handler.time_to_unlock_left(), 3_000);

        clock.set(12_000);
        assert_eq!(handler.time_to_unlock_left(), 1_000);

        clock.set(20_000);
        assert_eq!(handler.time_to_unlock_left(), 0);
    }

    #[test]
    fn test_register_unlock_stamps_time() {
        let prefs = prefs_with_passcode("1111");
        let handler =
            PassCodeHandler::new(prefs.clone(), TestClock::at(7_500), PasscodeAction::Check, 4);

        handler.register_unlock();
        assert_eq!(prefs.get_i64(PREF_LAST_UNLOCK_AT, 0), 7_500);
    }

    #[test]
    fn test_six_digit_session() {
        let prefs = prefs_with_passcode("135790");
        let mut handler =
            PassCodeHandler::new(prefs, TestClock::at(0), PasscodeAction::Check, 6);

        assert_eq!(enter(&mut handler, &[1, 3, 5, 7, 9]), None);
        let status = handler.on_digit(0);
        assert_eq!(
            status,
            Some(Status::new(PasscodeAction::Check, PasscodeOutcome::Ok))
        );
    }

    #[test]
    fn test_failed_attempts_accumulate_into_lockout() {
        let prefs = prefs_with_passcode("1111");
        let clock = TestClock::at(0);
        let mut handler =
            PassCodeHandler::new(prefs.clone(), clock.clone(), PasscodeAction::Check, 4);

        for _ in 0..3 {
            let status = enter(&mut handler, &[9, 9, 9, 9]);
            assert_eq!(
                status,
                Some(Status::new(PasscodeAction::Check, PasscodeOutcome::Error))
            );
        }
        assert_eq!(prefs.get_i32(PREF_LOCK_ATTEMPTS, 0), 3);

        // Third failure stamped at t=0; still inside the window.
        clock.set(2_999);
        assert_eq!(handler.on_digit(1), None);
        assert_eq!(handler.entered(), "");
    }
}
