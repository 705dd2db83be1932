#![forbid(unsafe_code)]

//! Lifecycle hooks: optional handlers invoked at state-machine transitions.
//!
//! Each hook fires synchronously, at most once per transition, inside the
//! step that performs the transition. No ordering guarantee exists beyond
//! that.

/// Handler receiving the word a transition concerns.
pub type WordHook = Box<dyn FnMut(&str) + Send>;
/// Handler for transitions with no payload.
pub type UnitHook = Box<dyn FnMut() + Send>;

/// Optional handler set for engine lifecycle transitions.
#[derive(Default)]
pub struct Hooks {
    /// Fired by `start()` with the word about to be typed.
    pub on_start: Option<WordHook>,
    /// Fired when a word is fully revealed.
    pub on_word_complete: Option<WordHook>,
    /// Fired when a word finishes deleting.
    pub on_delete_start: Option<UnitHook>,
    /// Fired each time the word index wraps back to the start.
    pub on_loop_restart: Option<UnitHook>,
    /// Fired by `stop()`.
    pub on_stop: Option<UnitHook>,
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("on_start", &self.on_start.is_some())
            .field("on_word_complete", &self.on_word_complete.is_some())
            .field("on_delete_start", &self.on_delete_start.is_some())
            .field("on_loop_restart", &self.on_loop_restart.is_some())
            .field("on_stop", &self.on_stop.is_some())
            .finish()
    }
}

impl Hooks {
    /// Invoke a word-carrying hook if set.
    pub(crate) fn fire_word(hook: &mut Option<WordHook>, word: &str) {
        if let Some(h) = hook.as_mut() {
            h(word);
        }
    }

    /// Invoke a unit hook if set.
    pub(crate) fn fire(hook: &mut Option<UnitHook>) {
        if let Some(h) = hook.as_mut() {
            h();
        }
    }
}
