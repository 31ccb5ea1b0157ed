//! Drawing contract for the city layout: a pluggable [`VisualProvider`], a
//! depth-sorted [`DrawList`] kept in sync with the edit session, and O(1)
//! tile classification.

use bevy::prelude::*;

use layout::session::{EditSession, SessionSet};

pub mod draw_list;
pub mod palette;
pub mod tiles;
pub mod visual;

pub use draw_list::{build_draw_list, DrawItem, DrawList};
pub use palette::{entity_color, facing_toward_road, PaletteVisuals};
pub use tiles::{classify_tile, TileKind};
pub use visual::{Drawable, Facing, VisualProvider, VisualRequest};

/// The provider the draw list is built with. Insert before
/// [`RenderingPlugin`] to replace the default palette.
#[derive(Resource)]
pub struct Visuals(pub Box<dyn VisualProvider>);

impl Default for Visuals {
    fn default() -> Self {
        Self(Box::new(PaletteVisuals))
    }
}

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Visuals>()
            .init_resource::<DrawList>()
            .add_systems(
                Update,
                rebuild_draw_list
                    .after(SessionSet::Effects)
                    .run_if(resource_changed::<EditSession>),
            );
    }
}

fn rebuild_draw_list(
    session: Res<EditSession>,
    visuals: Res<Visuals>,
    mut draw_list: ResMut<DrawList>,
) {
    *draw_list = build_draw_list(session.layout(), visuals.0.as_ref());
}
