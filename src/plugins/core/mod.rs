//! Core plugin: tunables and the night-sky clear colour.

use crate::common::tunables::Tunables;
use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    let tunables = Tunables::default();
    debug!("tunables: {tunables:?}");
    app.insert_resource(tunables);
    app.insert_resource(ClearColor(Color::srgb(0.04, 0.05, 0.1)));
}
