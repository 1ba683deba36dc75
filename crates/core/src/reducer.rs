//! Reducer trait for the explicit, passed-in state containers.

/// A state container evolved by pure transitions.
///
/// - **State mutation**: `apply(&mut self, action)` evolves state in place.
/// - **Transition**: `reduce(self, action)` is the `(state, action) -> state`
///   form, built on `apply`.
///
/// Reducers must not perform IO or read the clock. Anything time-dependent is
/// carried inside the action so replaying the same actions yields the same
/// state.
pub trait Reducer: Sized {
    type Action: Clone + core::fmt::Debug;

    /// Evolve in-memory state from a single action.
    fn apply(&mut self, action: &Self::Action);

    /// Consume the state and return the state after `action`.
    fn reduce(mut self, action: &Self::Action) -> Self {
        self.apply(action);
        self
    }

    /// Fold a sequence of actions over the state.
    fn replay<'a, I>(self, actions: I) -> Self
    where
        I: IntoIterator<Item = &'a Self::Action>,
        Self::Action: 'a,
    {
        actions.into_iter().fold(self, |state, action| state.reduce(action))
    }
}
