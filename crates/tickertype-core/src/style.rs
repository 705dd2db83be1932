#![forbid(unsafe_code)]

//! Process-wide idempotent style registration.
//!
//! Backends share presentational setup (intensity ramps, cursor SGR
//! presets). Registration is keyed by a fixed identifier: the first call
//! for a key runs its initializer, every later call for the same key is a
//! no-op, regardless of which engine instance triggered it.

use std::collections::BTreeSet;
use std::sync::{Mutex, OnceLock};

fn registry() -> &'static Mutex<BTreeSet<String>> {
    static REGISTRY: OnceLock<Mutex<BTreeSet<String>>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(BTreeSet::new()))
}

/// Run `init` exactly once per `id` for the lifetime of the process.
///
/// Returns whether `init` ran on this call. A poisoned registry lock is
/// treated as already-registered (the initializer that poisoned it may
/// have partially run; re-running is worse than skipping).
pub fn register_once(id: &str, init: impl FnOnce()) -> bool {
    let Ok(mut ids) = registry().lock() else {
        return false;
    };
    if ids.contains(id) {
        return false;
    }
    ids.insert(id.to_string());
    init();
    true
}

/// Whether `id` has been registered.
#[must_use]
pub fn is_registered(id: &str) -> bool {
    registry()
        .lock()
        .map(|ids| ids.contains(id))
        .unwrap_or(true)
}
