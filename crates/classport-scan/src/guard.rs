//! Scoped suspension of the method-entry event source.
//!
//! Asking the host runtime for annotations reflectively runs more
//! instrumented code, which would fire the same method-entry hook again.
//! The hook has to be switched off for exactly the length of that nested
//! call and switched back on afterwards. [`HookSuspension`] ties both steps
//! to a scope: `suspend` on acquisition, `resume` on drop, on every exit
//! path including early returns and unwinding.

/// An event source that can be paused and resumed.
pub trait EventGate {
    fn suspend(&mut self);
    fn resume(&mut self);
}

impl<G: EventGate + ?Sized> EventGate for &mut G {
    fn suspend(&mut self) {
        (**self).suspend();
    }

    fn resume(&mut self) {
        (**self).resume();
    }
}

/// Holds the gate suspended until dropped.
#[must_use = "the hook resumes as soon as the guard is dropped"]
pub struct HookSuspension<'g, G: EventGate + ?Sized> {
    gate: &'g mut G,
}

impl<'g, G: EventGate + ?Sized> HookSuspension<'g, G> {
    pub fn acquire(gate: &'g mut G) -> Self {
        gate.suspend();
        Self { gate }
    }
}

impl<G: EventGate + ?Sized> Drop for HookSuspension<'_, G> {
    fn drop(&mut self) {
        self.gate.resume();
    }
}

/// Runs `f` with `gate` suspended.
pub fn with_hook_suspended<G, T>(gate: &mut G, f: impl FnOnce() -> T) -> T
where
    G: EventGate + ?Sized,
{
    let _suspended = HookSuspension::acquire(gate);
    f()
}
