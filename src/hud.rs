//! Heads-up display. Four counters drawn as 2D text over the info area below the map. The text is
//! pure display: it is rewritten whenever `SessionStats` changes and never feeds back into play.

use bevy::prelude::*;
use bevy::sprite::Anchor;

use crate::camera::screen_point_to_world;
use crate::config::LayoutConfig;
use crate::state::SessionStats;

const HUD_Z: f32 = 3.0;
const HUD_FONT_SIZE: f32 = 32.0;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud)
            .add_systems(
                PostUpdate,
                refresh_hud.run_if(resource_changed::<SessionStats>),
            );
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudField {
    Health,
    Level,
    Lives,
    Score,
}

impl HudField {
    const ALL: [Self; 4] = [Self::Health, Self::Level, Self::Lives, Self::Score];

    /// Offset from the top-left corner of the info area.
    fn offset(self) -> Vec2 {
        match self {
            Self::Health => Vec2::new(230.0, 70.0),
            Self::Level => Vec2::new(430.0, 70.0),
            Self::Lives => Vec2::new(230.0, 130.0),
            Self::Score => Vec2::new(430.0, 130.0),
        }
    }

    fn text(self, stats: &SessionStats) -> String {
        let value = match self {
            Self::Health => stats.health,
            Self::Level => stats.level,
            Self::Lives => stats.lives,
            Self::Score => stats.score,
        };
        value.to_string()
    }
}

fn spawn_hud(mut commands: Commands, config: Res<LayoutConfig>, stats: Res<SessionStats>) {
    for field in HudField::ALL {
        let position = config.hud_origin() + field.offset();
        commands.spawn((
            Name::new(format!("Hud{field:?}")),
            field,
            Text2dBundle {
                text: Text::from_section(
                    field.text(&stats),
                    TextStyle {
                        font_size: HUD_FONT_SIZE,
                        color: Color::BLACK,
                        ..default()
                    },
                ),
                text_anchor: Anchor::TopLeft,
                transform: Transform::from_translation(screen_point_to_world(position, HUD_Z)),
                ..default()
            },
        ));
    }
}

fn refresh_hud(stats: Res<SessionStats>, mut fields: Query<(&HudField, &mut Text)>) {
    for (field, mut text) in &mut fields {
        if let Some(section) = text.sections.first_mut() {
            section.value = field.text(&stats);
        }
    }
}
