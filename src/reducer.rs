//! The Reducer trait.
//!
//! Reducers are pure functions: `(State, Action) → (State, Effects)`.
//! They contain all transition logic, are deterministic, and run at
//! memory speed in tests. Side effects are returned as values and
//! executed by the imperative shell.

use smallvec::SmallVec;

/// Core abstraction for transition logic.
pub trait Reducer {
    /// The state type this reducer operates on.
    type State;

    /// The action type this reducer processes.
    type Action;

    /// The effect descriptions this reducer emits.
    type Effect;

    /// Reduce an action into state changes and effects.
    ///
    /// Updates `state` in place and returns effect descriptions for the
    /// caller to execute. Must not perform I/O.
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
    ) -> SmallVec<[Self::Effect; 4]>;
}
