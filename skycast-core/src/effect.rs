//! Effect-aware store
//!
//! The reducer never performs I/O. Instead it returns the effects it wants
//! run alongside a flag telling the runtime whether to re-render:
//!
//! ```ignore
//! fn reducer(state: &mut S, action: A) -> DispatchResult<E>
//! ```
//!
//! The runtime hands every effect to an effect handler, which typically
//! spawns a task on the [`TaskManager`](crate::TaskManager).

use std::marker::PhantomData;

use crate::action::Action;

/// Outcome of a single dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified and the UI should re-render.
    pub changed: bool,
    /// Effects to run after the dispatch.
    pub effects: Vec<E>,
}

impl<E> DispatchResult<E> {
    /// No state change, no effects.
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    /// State changed, no effects.
    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// State changed and one effect.
    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    /// Append an effect.
    #[inline]
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// Reducer signature accepted by [`EffectStore`].
pub type EffectReducer<S, A, E> = fn(&mut S, A) -> DispatchResult<E>;

/// Hook called around every dispatch.
pub trait Middleware<A: Action> {
    /// Called before the reducer sees the action.
    fn before(&mut self, _action: &A) {}

    /// Called after the reducer, with the change flag and effect count.
    fn after(&mut self, action: &A, changed: bool, effects: usize);
}

/// Middleware that emits a `tracing` debug event per dispatched action.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMiddleware;

impl<A: Action> Middleware<A> for TracingMiddleware {
    fn after(&mut self, action: &A, changed: bool, effects: usize) {
        tracing::debug!(
            action = %action.summary(),
            changed,
            effects,
            "action processed"
        );
    }
}

/// State container driven by an [`EffectReducer`].
pub struct EffectStore<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    state: S,
    reducer: EffectReducer<S, A, E>,
    middleware: M,
    _marker: PhantomData<(A, E)>,
}

impl<S, A, E, M> EffectStore<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    pub fn with_middleware(state: S, reducer: EffectReducer<S, A, E>, middleware: M) -> Self {
        Self {
            state,
            reducer,
            middleware,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Run the action through middleware and reducer.
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        self.middleware.before(&action);
        let result = (self.reducer)(&mut self.state, action.clone());
        self.middleware
            .after(&action, result.changed, result.effects.len());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Debug)]
    enum TestAction {
        Type(char),
        Submit,
        Noop,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Type(_) => "Type",
                TestAction::Submit => "Submit",
                TestAction::Noop => "Noop",
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum TestEffect {
        Fetch(String),
        Cancel,
    }

    #[derive(Default)]
    struct TestState {
        query: String,
    }

    fn test_reducer(state: &mut TestState, action: TestAction) -> DispatchResult<TestEffect> {
        match action {
            TestAction::Type(c) => {
                state.query.push(c);
                DispatchResult::changed()
            }
            TestAction::Submit => DispatchResult::changed_with(TestEffect::Cancel)
                .with(TestEffect::Fetch(state.query.clone())),
            TestAction::Noop => DispatchResult::unchanged(),
        }
    }

    /// Shared counters, readable after the store takes ownership.
    #[derive(Default, Clone)]
    struct Counting {
        before: Rc<Cell<usize>>,
        after: Rc<Cell<usize>>,
        effects: Rc<Cell<usize>>,
    }

    impl Middleware<TestAction> for Counting {
        fn before(&mut self, _action: &TestAction) {
            self.before.set(self.before.get() + 1);
        }

        fn after(&mut self, _action: &TestAction, _changed: bool, effects: usize) {
            self.after.set(self.after.get() + 1);
            self.effects.set(self.effects.get() + effects);
        }
    }

    #[test]
    fn test_dispatch_result_builders() {
        let r: DispatchResult<TestEffect> = DispatchResult::unchanged();
        assert!(!r.changed);
        assert!(!r.has_effects());

        let r = DispatchResult::changed_with(TestEffect::Fetch("a".into()));
        assert!(r.changed);
        assert_eq!(r.effects.len(), 1);

        let r = DispatchResult::changed_with(TestEffect::Cancel).with(TestEffect::Fetch("b".into()));
        assert_eq!(r.effects, vec![TestEffect::Cancel, TestEffect::Fetch("b".into())]);
    }

    #[test]
    fn test_store_dispatch() {
        let mut store =
            EffectStore::with_middleware(TestState::default(), test_reducer, TracingMiddleware);

        assert!(store.dispatch(TestAction::Type('o')).changed);
        assert!(store.dispatch(TestAction::Type('s')).changed);
        assert!(!store.dispatch(TestAction::Noop).changed);
        assert_eq!(store.state().query, "os");

        let result = store.dispatch(TestAction::Submit);
        assert_eq!(
            result.effects,
            vec![TestEffect::Cancel, TestEffect::Fetch("os".into())]
        );
    }

    #[test]
    fn test_store_middleware_sees_every_dispatch() {
        let counting = Counting::default();
        let mut store =
            EffectStore::with_middleware(TestState::default(), test_reducer, counting.clone());

        store.dispatch(TestAction::Type('x'));
        store.dispatch(TestAction::Submit);

        assert_eq!(counting.before.get(), 2);
        assert_eq!(counting.after.get(), 2);
        assert_eq!(counting.effects.get(), 2);
    }
}
