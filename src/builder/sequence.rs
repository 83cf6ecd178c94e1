//! Builder for sequences.

use crate::behavior::Behavior;
use crate::builder::error::BuildError;
use crate::composite::Sequence;

/// Fluent builder for [`Sequence`].
///
/// ```rust
/// use tickwork::{Behavior, BehaviorState, Leaf, SequenceBuilder};
///
/// let approach = Leaf::<()>::builder("approach").build().unwrap();
/// let kick = Leaf::<()>::builder("kick").build().unwrap();
///
/// let sequence = SequenceBuilder::<()>::named("approach then kick")
///     .then(approach)
///     .then(kick)
///     .build()
///     .unwrap();
///
/// assert_eq!(sequence.behaviors().len(), 2);
/// assert!(sequence.is_in_state(BehaviorState::Start));
/// ```
pub struct SequenceBuilder<C> {
    name: String,
    behaviors: Vec<Box<dyn Behavior<C>>>,
}

impl<C: 'static> SequenceBuilder<C> {
    pub fn new() -> Self {
        Self::named("sequence")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            behaviors: Vec::new(),
        }
    }

    /// Append a sub-behavior.
    pub fn then<B>(mut self, behavior: B) -> Self
    where
        B: Behavior<C> + 'static,
    {
        self.behaviors.push(Box::new(behavior));
        self
    }

    /// Append an already boxed sub-behavior.
    pub fn then_boxed(mut self, behavior: Box<dyn Behavior<C>>) -> Self {
        self.behaviors.push(behavior);
        self
    }

    /// Build the sequence, validating every sub-behavior.
    pub fn build(self) -> Result<Sequence<C>, BuildError> {
        Sequence::named(self.name, self.behaviors)
    }
}

impl<C: 'static> Default for SequenceBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}
