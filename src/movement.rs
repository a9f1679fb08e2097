//! Keyboard input and the movement/collision engine.
//!
//! Input is resolved into at most one `GameAction` per step, with held-key semantics. The action
//! then moves the player by one step along a single axis, unless the tentative rectangle overlaps
//! a wall, in which case the player is clamped flush against it instead.

use bevy::input::keyboard::KeyCode;
use bevy::math::Rect;
use bevy::prelude::*;

use crate::collision::{intersects, WallSet};
use crate::config::{ClampPolicy, LayoutConfig};
use crate::player::{Direction, Player, PlayerBody};
use crate::state::GameSet;

/// Reads the keyboard in `GameSet::Input` and moves the player in `GameSet::Movement`, both on the
/// fixed timestep so the per-step speed is independent of the frame rate.
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentAction>().add_systems(
            FixedUpdate,
            (
                read_player_action.in_set(GameSet::Input),
                apply_player_action.in_set(GameSet::Movement),
            ),
        );
    }
}

/// Discrete action chosen for the current step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// No relevant key held; the player stays put and keeps its facing.
    #[default]
    None,
    PlayerRight,
    PlayerLeft,
    PlayerUp,
    PlayerDown,
    /// Ends the session after the current step.
    Quit,
}

impl GameAction {
    /// Facing implied by a movement action, or `None` for actions that do not move the player.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::PlayerRight => Some(Direction::Right),
            Self::PlayerLeft => Some(Direction::Left),
            Self::PlayerUp => Some(Direction::Up),
            Self::PlayerDown => Some(Direction::Down),
            Self::None | Self::Quit => None,
        }
    }
}

/// Keys in priority order. The first one held wins.
const ACTION_KEYS: [(KeyCode, GameAction); 5] = [
    (KeyCode::ArrowRight, GameAction::PlayerRight),
    (KeyCode::ArrowLeft, GameAction::PlayerLeft),
    (KeyCode::ArrowUp, GameAction::PlayerUp),
    (KeyCode::ArrowDown, GameAction::PlayerDown),
    (KeyCode::Escape, GameAction::Quit),
];

/// Level-triggered: a key held across many steps yields the same action every step.
pub fn resolve_action(keyboard: &ButtonInput<KeyCode>) -> GameAction {
    ACTION_KEYS
        .iter()
        .find(|(key, _)| keyboard.pressed(*key))
        .map(|(_, action)| *action)
        .unwrap_or_default()
}

/// The action resolved for this step. Written by the input stage and consumed by the movement
/// stage; it is overwritten every step, so releasing all keys resets it to `GameAction::None`.
#[derive(Resource, Debug, Default, Deref, DerefMut)]
pub struct CurrentAction(pub GameAction);

/// What `apply_action` did with the player this step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing to do.
    Idle,
    /// Full step taken.
    Moved,
    /// At least one wall was hit; the player ends flush against it instead of stepping.
    Blocked,
    /// The caller should end the session.
    Quit,
}

/// Applies one action to the player. Quit is reported back, never acted on here.
///
/// A movement action always updates the facing, even when the player cannot move. The tentative
/// rectangle is the current bounds shifted by one step; with no wall in the way the step is taken,
/// otherwise `policy` decides which wall edge the player is clamped to and the step is dropped.
pub fn apply_action(
    action: GameAction,
    body: &mut PlayerBody,
    walls: &WallSet,
    policy: ClampPolicy,
) -> MoveOutcome {
    if action == GameAction::Quit {
        return MoveOutcome::Quit;
    }

    let Some(direction) = action.direction() else {
        return MoveOutcome::Idle;
    };

    body.direction = direction;

    let blocked = match policy {
        ClampPolicy::LastIntersecting => clamp_each_intersecting(body, walls),
        ClampPolicy::Nearest => clamp_nearest(body, walls),
    };

    if blocked {
        return MoveOutcome::Blocked;
    }

    body.position += body.step();
    MoveOutcome::Moved
}

/// Tests every wall in registry order and clamps against each one the tentative move overlaps.
/// Each clamp feeds into the rectangle tested against the following walls.
fn clamp_each_intersecting(body: &mut PlayerBody, walls: &WallSet) -> bool {
    let mut blocked = false;

    for wall in walls.iter() {
        let tentative = offset(body.bounds(), body.step());
        let solid = wall.bounds();
        if !intersects(tentative, solid) {
            continue;
        }

        blocked = true;
        body.position = flush_position(body, solid);
    }

    blocked
}

/// Collects every overlapping wall for the unclamped move and clamps to the closest edge.
fn clamp_nearest(body: &mut PlayerBody, walls: &WallSet) -> bool {
    let tentative = offset(body.bounds(), body.step());
    let candidates = walls
        .iter()
        .map(|wall| wall.bounds())
        .filter(|solid| intersects(tentative, *solid))
        .map(|solid| flush_position(body, solid));

    let nearest = match body.direction {
        Direction::Right => candidates.min_by(|a, b| a.x.total_cmp(&b.x)),
        Direction::Left => candidates.max_by(|a, b| a.x.total_cmp(&b.x)),
        Direction::Down => candidates.min_by(|a, b| a.y.total_cmp(&b.y)),
        Direction::Up => candidates.max_by(|a, b| a.y.total_cmp(&b.y)),
    };

    match nearest {
        Some(position) => {
            body.position = position;
            true
        }
        None => false,
    }
}

/// Position that puts the player's leading edge against `solid` along the facing axis.
fn flush_position(body: &PlayerBody, solid: Rect) -> Vec2 {
    let position = body.position;
    match body.direction {
        Direction::Right => Vec2::new(solid.min.x - body.size.x, position.y),
        Direction::Left => Vec2::new(solid.max.x, position.y),
        Direction::Up => Vec2::new(position.x, solid.max.y),
        Direction::Down => Vec2::new(position.x, solid.min.y - body.size.y),
    }
}

fn offset(rect: Rect, delta: Vec2) -> Rect {
    Rect::from_corners(rect.min + delta, rect.max + delta)
}

fn read_player_action(keyboard: Res<ButtonInput<KeyCode>>, mut current: ResMut<CurrentAction>) {
    **current = resolve_action(&keyboard);
}

fn apply_player_action(
    current: Res<CurrentAction>,
    walls: Res<WallSet>,
    config: Res<LayoutConfig>,
    mut query: Query<&mut PlayerBody, With<Player>>,
    mut exit: EventWriter<AppExit>,
) {
    if **current == GameAction::None {
        return;
    }

    let Ok(mut body) = query.get_single_mut() else {
        return;
    };

    match apply_action(**current, &mut body, &walls, config.clamp_policy) {
        MoveOutcome::Quit => {
            info!("Quit requested; exiting.");
            exit.send(AppExit::Success);
        }
        MoveOutcome::Blocked => {
            debug!(
                "Move {:?} blocked; player clamped to {:?}",
                body.direction, body.position
            );
        }
        MoveOutcome::Moved | MoveOutcome::Idle => {}
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::event::Events;
    use bevy::ecs::system::RunSystemOnce;

    use super::*;
    use crate::collision::Wall;
    use crate::level::build_level;

    fn level_one() -> (LayoutConfig, WallSet) {
        let config = LayoutConfig::default();
        let mut walls = WallSet::default();
        build_level(1, &config, &mut walls).unwrap();
        (config, walls)
    }

    fn player_at(x: f32, y: f32) -> PlayerBody {
        let mut body = PlayerBody::new(Vec2::new(x, y), Vec2::splat(64.0));
        body.speed = Vec2::new(5.0, 5.0);
        body
    }

    fn keyboard(keys: &[KeyCode]) -> ButtonInput<KeyCode> {
        let mut input = ButtonInput::default();
        for key in keys {
            input.press(*key);
        }
        input
    }

    #[test]
    fn no_keys_resolve_to_none() {
        assert_eq!(resolve_action(&keyboard(&[])), GameAction::None);
        assert_eq!(resolve_action(&keyboard(&[KeyCode::Space])), GameAction::None);
    }

    #[test]
    fn keys_resolve_in_priority_order() {
        let all = [
            KeyCode::Escape,
            KeyCode::ArrowDown,
            KeyCode::ArrowUp,
            KeyCode::ArrowLeft,
            KeyCode::ArrowRight,
        ];
        assert_eq!(resolve_action(&keyboard(&all)), GameAction::PlayerRight);
        assert_eq!(resolve_action(&keyboard(&all[..4])), GameAction::PlayerLeft);
        assert_eq!(resolve_action(&keyboard(&all[..3])), GameAction::PlayerUp);
        assert_eq!(resolve_action(&keyboard(&all[..2])), GameAction::PlayerDown);
        assert_eq!(resolve_action(&keyboard(&all[..1])), GameAction::Quit);
    }

    #[test]
    fn held_key_keeps_firing() {
        let mut input = keyboard(&[KeyCode::ArrowUp]);
        assert_eq!(resolve_action(&input), GameAction::PlayerUp);
        input.clear();
        assert_eq!(resolve_action(&input), GameAction::PlayerUp);
    }

    #[test]
    fn free_move_shifts_one_axis_by_speed() {
        let (config, walls) = level_one();

        let mut body = player_at(64.0, 64.0);
        let outcome = apply_action(GameAction::PlayerRight, &mut body, &walls, config.clamp_policy);
        assert_eq!(outcome, MoveOutcome::Moved);
        assert_eq!(body.position, Vec2::new(69.0, 64.0));
        assert_eq!(body.direction, Direction::Right);

        // Column 4 is an open corridor from row 1 down to row 7.
        let mut body = player_at(256.0, 100.0);
        let outcome = apply_action(GameAction::PlayerDown, &mut body, &walls, config.clamp_policy);
        assert_eq!(outcome, MoveOutcome::Moved);
        assert_eq!(body.position, Vec2::new(256.0, 105.0));
    }

    #[test]
    fn left_into_border_clamps_to_wall_edge() {
        let (config, walls) = level_one();
        let mut body = player_at(64.0, 64.0);

        let outcome = apply_action(GameAction::PlayerLeft, &mut body, &walls, config.clamp_policy);

        assert_eq!(outcome, MoveOutcome::Blocked);
        assert_eq!(body.position, Vec2::new(64.0, 64.0));
        assert_eq!(body.direction, Direction::Left);
    }

    #[test]
    fn right_near_wall_snaps_flush() {
        let (config, walls) = level_one();
        let mut body = player_at(445.0, 64.0);

        let outcome = apply_action(GameAction::PlayerRight, &mut body, &walls, config.clamp_policy);

        assert_eq!(outcome, MoveOutcome::Blocked);
        assert_eq!(body.position, Vec2::new(448.0, 64.0));
    }

    #[test]
    fn vertical_blocks_clamp_on_y() {
        let (config, walls) = level_one();

        let mut body = player_at(64.0, 62.0);
        apply_action(GameAction::PlayerUp, &mut body, &walls, config.clamp_policy);
        assert_eq!(body.position, Vec2::new(64.0, 64.0));

        let mut body = player_at(64.0, 445.0);
        apply_action(GameAction::PlayerDown, &mut body, &walls, config.clamp_policy);
        assert_eq!(body.position, Vec2::new(64.0, 448.0));
    }

    fn overlapping_pair() -> WallSet {
        [
            Wall::new(Vec2::new(115.0, 0.0), Vec2::splat(64.0)),
            Wall::new(Vec2::new(140.0, 0.0), Vec2::splat(64.0)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn last_intersecting_wall_wins() {
        let mut body = PlayerBody::new(Vec2::new(100.0, 0.0), Vec2::splat(10.0));
        body.speed = Vec2::new(50.0, 50.0);

        let outcome = apply_action(
            GameAction::PlayerRight,
            &mut body,
            &overlapping_pair(),
            ClampPolicy::LastIntersecting,
        );

        assert_eq!(outcome, MoveOutcome::Blocked);
        assert_eq!(body.position, Vec2::new(130.0, 0.0));
    }

    #[test]
    fn nearest_policy_uses_closest_edge() {
        let mut body = PlayerBody::new(Vec2::new(100.0, 0.0), Vec2::splat(10.0));
        body.speed = Vec2::new(50.0, 50.0);

        let outcome = apply_action(
            GameAction::PlayerRight,
            &mut body,
            &overlapping_pair(),
            ClampPolicy::Nearest,
        );

        assert_eq!(outcome, MoveOutcome::Blocked);
        assert_eq!(body.position, Vec2::new(105.0, 0.0));
    }

    #[test]
    fn idle_and_quit_leave_player_alone() {
        let (config, walls) = level_one();
        let before = player_at(64.0, 64.0);

        let mut body = before;
        assert_eq!(
            apply_action(GameAction::None, &mut body, &walls, config.clamp_policy),
            MoveOutcome::Idle
        );
        assert_eq!(
            apply_action(GameAction::Quit, &mut body, &walls, config.clamp_policy),
            MoveOutcome::Quit
        );
        assert_eq!(body, before);
    }

    fn movement_world(action: GameAction) -> World {
        let (config, walls) = level_one();
        let mut world = World::new();
        world.insert_resource(config);
        world.insert_resource(walls);
        world.insert_resource(CurrentAction(action));
        world.init_resource::<Events<AppExit>>();
        world.spawn((Player, player_at(64.0, 64.0)));
        world
    }

    #[test]
    fn only_quit_requests_exit() {
        for action in [
            GameAction::None,
            GameAction::PlayerRight,
            GameAction::PlayerLeft,
            GameAction::PlayerUp,
            GameAction::PlayerDown,
        ] {
            let mut world = movement_world(action);
            world.run_system_once(apply_player_action);
            assert!(world.resource::<Events<AppExit>>().is_empty(), "{action:?}");
        }

        let mut world = movement_world(GameAction::Quit);
        world.run_system_once(apply_player_action);
        assert!(!world.resource::<Events<AppExit>>().is_empty());
    }

    #[test]
    fn system_moves_player_entity() {
        let mut world = movement_world(GameAction::PlayerRight);
        world.run_system_once(apply_player_action);

        let body = world
            .query_filtered::<&PlayerBody, With<Player>>()
            .single(&world);
        assert_eq!(body.position, Vec2::new(69.0, 64.0));
    }
}
