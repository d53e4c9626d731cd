//! Component trait for UI pieces

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A piece of UI that renders from props and turns events into actions.
///
/// Props carry everything the component reads. Components may keep purely
/// visual state in `&mut self` (cursor position, scroll offset) but never
/// mutate application state; changes go out as actions.
///
/// ```ignore
/// impl Component<Action> for ResultView {
///     type Props<'a> = ResultViewProps<'a>;
///
///     fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>)
///         -> impl IntoIterator<Item = Action>
///     {
///         match event {
///             EventKind::Key(key) if key.code == KeyCode::Char('u') => Some(Action::UnitToggle),
///             _ => None,
///         }
///     }
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) { .. }
/// }
/// ```
pub trait Component<A> {
    /// Read-only data needed to render.
    type Props<'a>;

    /// Map an event to actions. Render-only components keep the default.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
