//! Pointer observers for pieces and squares
//!
//! Mesh picking decides what is under the pointer. Each observer records the
//! hit on the [`QueuedScene`](crate::rendering::QueuedScene) and then hands
//! the pointer position to the session, which picks through the scene like
//! any other front-end would.
//!
//! ```rust,ignore
//! commands.spawn(piece_bundle)
//!     .observe(on_piece_click)   // Pointer<Click>
//!     .observe(on_piece_hover)   // Pointer<Over>
//!     .observe(on_piece_unhover); // Pointer<Out>
//!
//! commands.spawn(square_bundle)
//!     .observe(on_square_click)
//!     .observe(on_square_hover);
//! ```
//!
//! A session error from a click means the registry no longer matches the
//! rules engine. That is unrecoverable: it is logged and the app exits.

use bevy::picking::events::{Click, Out, Over, Pointer};
use bevy::picking::pointer::{Location, PointerButton};
use bevy::prelude::*;

use crate::game::collaborators::PickTarget;
use crate::game::error::GameError;
use crate::game::plugin::Table;
use crate::game::types::ScreenPoint;
use crate::rendering::{BoardSquare, Visual};

fn is_primary(button: PointerButton) -> bool {
    matches!(button, PointerButton::Primary)
}

fn screen_point(location: &Location) -> ScreenPoint {
    ScreenPoint {
        x: location.position.x,
        y: location.position.y,
    }
}

fn fatal(error: GameError, exit: &mut MessageWriter<AppExit>) {
    error!("[INPUT] {}", error);
    exit.write(AppExit::error());
}

/// Observer function for piece click events
pub fn on_piece_click(
    click: On<Pointer<Click>>,
    visuals: Query<&Visual>,
    mut table: ResMut<Table>,
    mut exit: MessageWriter<AppExit>,
) {
    if !is_primary(click.event.button) {
        return;
    }
    let Ok(visual) = visuals.get(click.entity) else {
        warn!("[INPUT] Clicked entity {:?} has no Visual component", click.entity);
        return;
    };

    table.scene_mut().set_under_pointer(PickTarget::Piece(visual.0));
    if let Err(e) = table.pointer_clicked(screen_point(&click.pointer_location)) {
        fatal(e, &mut exit);
    }
}

/// Observer function for square click events
pub fn on_square_click(
    click: On<Pointer<Click>>,
    squares: Query<&BoardSquare>,
    mut table: ResMut<Table>,
    mut exit: MessageWriter<AppExit>,
) {
    if !is_primary(click.event.button) {
        return;
    }
    let Ok(square) = squares.get(click.entity) else {
        return;
    };

    table.scene_mut().set_under_pointer(PickTarget::Square(square.position));
    if let Err(e) = table.pointer_clicked(screen_point(&click.pointer_location)) {
        fatal(e, &mut exit);
    }
}

/// Observer function for piece hover events (Pointer<Over>)
pub fn on_piece_hover(hover: On<Pointer<Over>>, visuals: Query<&Visual>, mut table: ResMut<Table>) {
    let Ok(visual) = visuals.get(hover.entity) else {
        return;
    };
    table.scene_mut().set_under_pointer(PickTarget::Piece(visual.0));
    table.pointer_moved(screen_point(&hover.pointer_location));
}

/// Observer function for piece unhover events (Pointer<Out>)
pub fn on_piece_unhover(unhover: On<Pointer<Out>>, mut table: ResMut<Table>) {
    table.scene_mut().set_under_pointer(PickTarget::Nothing);
    table.pointer_moved(screen_point(&unhover.pointer_location));
}

/// Observer function for square hover events (Pointer<Over>)
pub fn on_square_hover(hover: On<Pointer<Over>>, squares: Query<&BoardSquare>, mut table: ResMut<Table>) {
    let Ok(square) = squares.get(hover.entity) else {
        return;
    };
    table.scene_mut().set_under_pointer(PickTarget::Square(square.position));
    table.pointer_moved(screen_point(&hover.pointer_location));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_primary_button_clicks() {
        assert!(is_primary(PointerButton::Primary));
        assert!(!is_primary(PointerButton::Secondary));
        assert!(!is_primary(PointerButton::Middle));
    }
}
