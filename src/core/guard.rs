//! Guard predicates for controlling state transitions.
//!
//! Guards are boolean functions evaluated lazily every time the engine
//! looks for the next transition. They see the behavior that owns the
//! transition table and a read-only view of the shared context.

/// Predicate that determines if a transition can fire.
///
/// A guard receives the owning behavior `B` and the context `C`. It must
/// not mutate either; the engine may evaluate it any number of times.
///
/// # Example
///
/// ```rust
/// use tickwork::core::Guard;
///
/// struct Battery {
///     charge: u8,
/// }
///
/// let low = Guard::<(), Battery>::new(|_, battery| battery.charge < 20);
///
/// assert!(low.check(&(), &Battery { charge: 5 }));
/// assert!(!low.check(&(), &Battery { charge: 90 }));
/// ```
pub struct Guard<B, C> {
    predicate: Box<dyn Fn(&B, &C) -> bool + Send + Sync>,
}

impl<B, C> Guard<B, C> {
    /// Create a guard from a predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&B, &C) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// A guard that always passes.
    pub fn always() -> Self
    where
        B: 'static,
        C: 'static,
    {
        Guard::new(|_, _| true)
    }

    /// Evaluate the guard.
    pub fn check(&self, behavior: &B, ctx: &C) -> bool {
        (self.predicate)(behavior, ctx)
    }
}

impl<B, C> std::fmt::Debug for Guard<B, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Guard(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        value: u32,
    }

    #[test]
    fn guard_reads_the_behavior() {
        let guard = Guard::<Counter, ()>::new(|c, _| c.value >= 3);

        assert!(!guard.check(&Counter { value: 2 }, &()));
        assert!(guard.check(&Counter { value: 3 }, &()));
    }

    #[test]
    fn guard_reads_the_context() {
        let guard = Guard::<(), Vec<u8>>::new(|_, ctx| ctx.is_empty());

        assert!(guard.check(&(), &Vec::new()));
        assert!(!guard.check(&(), &vec![1]));
    }

    #[test]
    fn always_passes() {
        let guard = Guard::<Counter, ()>::always();
        assert!(guard.check(&Counter { value: 0 }, &()));
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::<Counter, u32>::new(|c, limit| c.value < *limit);
        let counter = Counter { value: 4 };

        assert_eq!(guard.check(&counter, &10), guard.check(&counter, &10));
    }
}
