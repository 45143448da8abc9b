//! Frame driver
//!
//! One call per display refresh. The fixed order is: apply input, draw road,
//! player and competitors, update the simulation, then draw the HUD. Sprites
//! therefore show the state from before this tick's update, while the HUD
//! shows the counters after it.

use glam::Vec2;

use crate::renderer::DrawCommand;
use crate::renderer::scene;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, Viewport, apply_input, step};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Accelerate,
    Brake,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" => Some(Key::Accelerate),
            "ArrowDown" => Some(Key::Brake),
            _ => None,
        }
    }
}

/// Key state collected between ticks
///
/// Held keys are level-triggered; steering presses and accelerate presses are
/// accumulated until the next [`InputState::snapshot`].
#[derive(Debug, Clone, Default)]
pub struct InputState {
    accelerating: bool,
    braking: bool,
    accelerate_pressed: bool,
    steer: i32,
}

impl InputState {
    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.steer -= 1,
            Key::Right => self.steer += 1,
            Key::Accelerate => {
                self.accelerating = true;
                self.accelerate_pressed = true;
            }
            Key::Brake => self.braking = true,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Accelerate => self.accelerating = false,
            Key::Brake => self.braking = false,
            Key::Left | Key::Right => {}
        }
    }

    /// Sample the input for one tick and clear the one-shot parts
    pub fn snapshot(&mut self) -> TickInput {
        let input = TickInput {
            accelerating: self.accelerating,
            braking: self.braking,
            accelerate_pressed: self.accelerate_pressed,
            steer: self.steer,
        };
        self.accelerate_pressed = false;
        self.steer = 0;
        input
    }
}

/// Output of a single frame
#[derive(Debug, Clone)]
pub struct Frame {
    /// Everything to paint on a cleared surface, in order
    pub commands: Vec<DrawCommand>,
    pub events: Vec<GameEvent>,
    /// Final overtake count if the run ended this frame
    pub game_over: Option<u32>,
    /// Counters after this frame's update
    pub overtakes: u32,
    pub lives: u8,
}

/// Owns the game state and runs frames against it
#[derive(Debug, Clone)]
pub struct FrameDriver {
    pub state: GameState,
    pub viewport: Viewport,
    pub settings: Settings,
}

impl FrameDriver {
    pub fn new(seed: u64, viewport: Viewport, settings: Settings) -> Self {
        log::info!(
            "Starting with seed {} on a {}x{} viewport",
            seed,
            viewport.width,
            viewport.height
        );
        Self {
            state: GameState::new(seed),
            viewport,
            settings,
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn jolt_offset(&self, now_ms: f64) -> Vec2 {
        if self.settings.effective_screen_jolt() {
            self.state.jolt.offset(now_ms)
        } else {
            Vec2::ZERO
        }
    }

    /// Run one frame
    pub fn frame(&mut self, input: &TickInput, now_ms: f64) -> Frame {
        apply_input(&mut self.state, input);

        // Draw before updating
        let mut commands = Vec::new();
        scene::road(&self.viewport, &mut commands);
        scene::player(&self.viewport, &self.state.player, &mut commands);
        scene::competitors(&self.viewport, &self.state.pool, &mut commands);

        let events = step(&mut self.state, &self.viewport, now_ms);

        if self.settings.show_hud {
            scene::hud(
                self.state.race.overtakes,
                self.state.player.lives,
                &mut commands,
            );
        }

        // Sampled after the update so a hit shakes the frame it happens in
        let offset = self.jolt_offset(now_ms);
        if offset != Vec2::ZERO {
            commands = commands
                .into_iter()
                .map(|c| c.translated(offset))
                .collect();
        }

        let game_over = events.iter().find_map(|e| match e {
            GameEvent::GameOver { overtakes } => Some(*overtakes),
            _ => None,
        });

        Frame {
            commands,
            events,
            game_over,
            overtakes: self.state.race.overtakes,
            lives: self.state.player.lives,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn driver() -> FrameDriver {
        FrameDriver::new(5, Viewport::default(), Settings::default())
    }

    fn player_body(commands: &[DrawCommand]) -> Vec2 {
        // Road is 3 segments x 2 commands, the player body follows
        match &commands[6] {
            DrawCommand::Rect { min, .. } => *min,
            other => panic!("expected player body, got {:?}", other),
        }
    }

    #[test]
    fn test_input_state_snapshot_clears_presses() {
        let mut input = InputState::default();
        input.key_down(Key::Left);
        input.key_down(Key::Left);
        input.key_down(Key::Right);
        input.key_down(Key::Accelerate);

        let snap = input.snapshot();
        assert_eq!(snap.steer, -1);
        assert!(snap.accelerating);
        assert!(snap.accelerate_pressed);

        let snap = input.snapshot();
        assert_eq!(snap.steer, 0);
        assert!(snap.accelerating);
        assert!(!snap.accelerate_pressed);

        input.key_up(Key::Accelerate);
        assert!(!input.snapshot().accelerating);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Key::from_dom("ArrowUp"), Some(Key::Accelerate));
        assert_eq!(Key::from_dom("ArrowDown"), Some(Key::Brake));
        assert_eq!(Key::from_dom("a"), None);
    }

    #[test]
    fn test_frame_renders_previous_state() {
        let mut driver = driver();
        let input = TickInput {
            accelerating: true,
            accelerate_pressed: true,
            ..Default::default()
        };
        let first = driver.frame(&input, 0.0);
        // Competitor 0 is drawn at its grid depth, then moves
        let drawn_depth = DRAW_DISTANCE;
        let moved_depth = driver.state.pool.competitors()[0].depth;
        assert!(moved_depth < drawn_depth);
        match &first.commands[10] {
            DrawCommand::Rect { min, .. } => {
                assert_eq!(min.y, driver.viewport.height - drawn_depth - 30.0);
            }
            other => panic!("expected competitor body, got {:?}", other),
        }
    }

    #[test]
    fn test_steering_shows_in_same_frame() {
        let mut driver = driver();
        let input = TickInput {
            steer: 2,
            ..Default::default()
        };
        let frame = driver.frame(&input, 0.0);
        // Player center moves to 420, body is 40 wide
        assert_eq!(player_body(&frame.commands).x, 400.0);
        assert_eq!(driver.state.player.x, 2.0 * STEER_STEP);
    }

    #[test]
    fn test_resized_viewport_moves_player_row() {
        let mut driver = driver();
        driver.set_viewport(Viewport::new(1200.0, 900.0));
        let frame = driver.frame(&TickInput::default(), 0.0);
        match &frame.commands[6] {
            DrawCommand::Rect { min, .. } => {
                assert_eq!(min.x, 600.0 - 20.0);
                assert_eq!(min.y, 900.0 - PLAYER_SCREEN_OFFSET - 40.0);
            }
            other => panic!("expected player body, got {:?}", other),
        }
    }

    #[test]
    fn test_hud_reports_updated_count() {
        let mut driver = driver();
        for car in driver.state.pool.competitors_mut() {
            car.depth = 100_000.0;
        }
        driver.state.pool.competitors_mut()[0].depth = 10.0;
        driver.state.player.z = 100.0;

        let frame = driver.frame(&TickInput::default(), 0.0);
        assert_eq!(frame.overtakes, 1);
        let hud = frame.commands.iter().find_map(|c| match c {
            DrawCommand::Text { text, .. } if text.starts_with("Overtakes") => Some(text.clone()),
            _ => None,
        });
        assert_eq!(hud.as_deref(), Some("Overtakes: 1"));
    }

    #[test]
    fn test_hud_can_be_hidden() {
        let mut driver = FrameDriver::new(
            5,
            Viewport::default(),
            Settings {
                show_hud: false,
                ..Default::default()
            },
        );
        let frame = driver.frame(&TickInput::default(), 0.0);
        assert!(
            !frame
                .commands
                .iter()
                .any(|c| matches!(c, DrawCommand::Text { .. }))
        );
    }

    #[test]
    fn test_jolt_offsets_hit_frame() {
        let mut driver = driver();
        for car in driver.state.pool.competitors_mut() {
            car.depth = 100_000.0;
        }
        driver.state.pool.competitors_mut()[0].depth = PLAYER_SCREEN_OFFSET;
        driver.state.player.x = driver.state.pool.competitors()[0].x();
        // Player body is 40 wide, centred on the player's screen point
        let steady_x = driver.viewport.center_x() + driver.state.player.x - 20.0;

        let hit = driver.frame(&TickInput::default(), 1000.0);
        assert_eq!(hit.lives, 2);
        assert_eq!(hit.game_over, None);
        // Sprites show the pre-hit state but the whole frame is already shifted
        assert_eq!(player_body(&hit.commands).x, steady_x + JOLT_OFFSET);

        let jolted = driver.frame(&TickInput::default(), 1050.0);
        assert_eq!(player_body(&jolted.commands).x, steady_x + JOLT_OFFSET);

        let settled = driver.frame(&TickInput::default(), 1100.0);
        assert_eq!(player_body(&settled.commands).x, steady_x);
    }

    #[test]
    fn test_game_over_is_reported() {
        let mut driver = driver();
        driver.state.race.overtakes = 9;
        driver.state.player.lives = 1;
        for car in driver.state.pool.competitors_mut() {
            car.depth = 100_000.0;
        }
        driver.state.pool.competitors_mut()[0].depth = PLAYER_SCREEN_OFFSET;
        driver.state.player.x = driver.state.pool.competitors()[0].x();

        let frame = driver.frame(&TickInput::default(), 0.0);
        assert_eq!(frame.game_over, Some(9));
        assert_eq!(frame.overtakes, 0);
        assert_eq!(frame.lives, STARTING_LIVES);
    }
}
