//! Texture preloading. Stashes Bevy `Handle<Image>` references for every sprite the maze draws so
//! they stay alive for the whole session.
//!
//! Bevy's asset system reference-counts handles; the `MazeArt` resource keeps one strong handle per
//! texture. If a file is missing, the affected sprites fall back to Bevy's default white texture
//! drawn with a flat tint, so the maze stays playable without any art on disk.

use bevy::asset::LoadState;
use bevy::prelude::*;

/// Allocates the handle cache and watches for textures that fail to load.
pub struct ArtPlugin;

impl Plugin for ArtPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MazeArt>()
            .add_systems(Update, replace_failed_textures);
    }
}

/// One texture plus the flat colour used in its place if it never loads. A slot fails at most
/// once; after that it permanently holds Bevy's default white texture.
pub struct ArtSlot {
    pub texture: Handle<Image>,
    fallback_tint: Color,
    failed: bool,
}

impl ArtSlot {
    fn new(texture: Handle<Image>, fallback_tint: Color) -> Self {
        Self {
            texture,
            fallback_tint,
            failed: false,
        }
    }

    /// Sprite colour: untinted while the texture is usable, the fallback tint afterwards.
    pub fn color(&self) -> Color {
        if self.failed {
            self.fallback_tint
        } else {
            Color::WHITE
        }
    }

    /// Switches the slot to the default texture. Returns the dead texture id and the tint that
    /// replaces it the first time only, so each failure is handled once.
    pub fn mark_failed(&mut self) -> Option<(AssetId<Image>, Color)> {
        if self.failed {
            return None;
        }

        let dead = self.texture.id();
        self.texture = Handle::default();
        self.failed = true;
        Some((dead, self.fallback_tint))
    }
}

/// Points a sprite still using a dead texture at the default one, drawn with its fallback tint.
/// Returns whether the sprite was touched.
pub fn swap_failed_texture(
    failed: &[(AssetId<Image>, Color)],
    texture: &mut Handle<Image>,
    sprite: &mut Sprite,
) -> bool {
    let id = texture.id();
    let Some((_, tint)) = failed.iter().find(|(dead, _)| *dead == id) else {
        return false;
    };

    *texture = Handle::default();
    sprite.color = *tint;
    true
}

#[derive(Resource)]
pub struct MazeArt {
    pub wall: ArtSlot,
    pub player: ArtSlot,
    pub background_tile: ArtSlot,
    pub background_info_area: ArtSlot,
}

impl MazeArt {
    /// Wraps the four texture handles with their fallback tints: dark walls, pale floor and a
    /// warm player, so the maze reads correctly even as flat tiles.
    pub fn new(
        wall: Handle<Image>,
        player: Handle<Image>,
        background_tile: Handle<Image>,
        background_info_area: Handle<Image>,
    ) -> Self {
        Self {
            wall: ArtSlot::new(wall, Color::srgb(0.35, 0.30, 0.28)),
            player: ArtSlot::new(player, Color::srgb(0.95, 0.75, 0.20)),
            background_tile: ArtSlot::new(background_tile, Color::srgb(0.80, 0.82, 0.86)),
            background_info_area: ArtSlot::new(
                background_info_area,
                Color::srgb(0.93, 0.93, 0.90),
            ),
        }
    }

    fn slots_mut(&mut self) -> [&mut ArtSlot; 4] {
        [
            &mut self.wall,
            &mut self.player,
            &mut self.background_tile,
            &mut self.background_info_area,
        ]
    }
}

impl FromWorld for MazeArt {
    /// Queues every texture on the global `AssetServer`. Loading is asynchronous; sprites spawned
    /// before it finishes simply render once the image arrives.
    fn from_world(world: &mut World) -> Self {
        let asset_server = world.resource::<AssetServer>();
        let art = Self::new(
            asset_server.load("textures/wall.png"),
            asset_server.load("textures/player.png"),
            asset_server.load("textures/background_tile.png"),
            asset_server.load("textures/background_info_area.png"),
        );

        info!("Queued maze textures from assets/textures/.");
        art
    }
}

/// Swaps every sprite whose texture failed to load over to the default white texture with the
/// slot's fallback tint. Sprites spawned afterwards pick the replacement up from `MazeArt`.
fn replace_failed_textures(
    asset_server: Res<AssetServer>,
    mut art: ResMut<MazeArt>,
    mut sprites: Query<(&mut Handle<Image>, &mut Sprite)>,
) {
    let mut failed = Vec::new();

    for slot in art.slots_mut() {
        if slot.failed {
            continue;
        }

        if let Some(LoadState::Failed(err)) = asset_server.get_load_state(slot.texture.id()) {
            warn!("Texture failed to load ({}); drawing a flat tile instead.", err);
            failed.extend(slot.mark_failed());
        }
    }

    if failed.is_empty() {
        return;
    }

    for (mut texture, mut sprite) in &mut sprites {
        swap_failed_texture(&failed, &mut texture, &mut sprite);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALL_TEXTURE: Handle<Image> = Handle::weak_from_u128(0x6d61_7a65_0001);
    const OTHER_TEXTURE: Handle<Image> = Handle::weak_from_u128(0x6d61_7a65_0002);

    #[test]
    fn slot_fails_once_and_keeps_tint() {
        let tint = Color::srgb(0.35, 0.30, 0.28);
        let mut slot = ArtSlot::new(WALL_TEXTURE, tint);
        assert_eq!(slot.color(), Color::WHITE);

        let reported = slot.mark_failed();
        assert_eq!(reported, Some((WALL_TEXTURE.id(), tint)));
        assert_eq!(slot.color(), tint);
        assert_eq!(slot.texture, Handle::default());

        assert_eq!(slot.mark_failed(), None);
        assert_eq!(slot.color(), tint);
    }

    #[test]
    fn only_sprites_on_dead_texture_are_swapped() {
        let tint = Color::srgb(0.95, 0.75, 0.20);
        let failed = [(WALL_TEXTURE.id(), tint)];

        let mut texture = WALL_TEXTURE;
        let mut sprite = Sprite::default();
        assert!(swap_failed_texture(&failed, &mut texture, &mut sprite));
        assert_eq!(texture, Handle::default());
        assert_eq!(sprite.color, tint);

        let mut texture = OTHER_TEXTURE;
        let mut sprite = Sprite::default();
        assert!(!swap_failed_texture(&failed, &mut texture, &mut sprite));
        assert_eq!(texture, OTHER_TEXTURE);
        assert_eq!(sprite.color, Color::WHITE);
    }

    #[test]
    fn new_art_starts_untinted() {
        let art = MazeArt::new(
            Handle::default(),
            Handle::default(),
            Handle::default(),
            Handle::default(),
        );
        assert_eq!(art.wall.color(), Color::WHITE);
        assert_eq!(art.player.color(), Color::WHITE);
    }
}
