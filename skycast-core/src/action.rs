//! Action trait for dispatched intents and async results

use std::fmt::Debug;

/// Anything that can be dispatched to an [`EffectStore`](crate::EffectStore).
///
/// Actions cross task boundaries (HTTP tasks send their results back as
/// actions), hence the `Send + 'static` bound.
pub trait Action: Clone + Debug + Send + 'static {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    /// Short, log-friendly description.
    ///
    /// Defaults to the action name. Override for actions that carry large
    /// payloads (a full weather snapshot has no place in a debug log line).
    fn summary(&self) -> String {
        self.name().to_string()
    }
}
