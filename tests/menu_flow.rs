//! Headless unit tests for the [`GameMode`] state machine.
//!
//! These tests use [`MinimalPlugins`] — no window, no rendering — so they
//! run fast and deterministically in CI.
//!
//! Covered scenarios:
//! 1. Default initial state is `Running`.
//! 2. A `NextState` request transitions `Running` → `Paused` and back.
//! 3. `Paused` persists across frames with no new transition request.
//! 4. The menu machine travels Root → Settings → Root while the mode state
//!    stays `Paused` throughout.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use driftfire::config::TuningConfig;
use driftfire::input::{ControlState, RawKeys};
use driftfire::menu::{pause_toggle_system, GameMode, MenuCommand, MenuScreen, MenuState};
use driftfire::simulation::DebounceTimers;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a minimal headless app with the mode state and menu machine
/// registered. `MinimalPlugins` provides the scheduling infrastructure;
/// `StatesPlugin` adds the `StateTransition` schedule needed by
/// `init_state`. No window or rendering is created.
fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<GameMode>();
    app.init_resource::<MenuState>();
    app
}

fn mode(app: &App) -> GameMode {
    app.world().resource::<State<GameMode>>().get().clone()
}

fn request(app: &mut App, next: GameMode) {
    app.world_mut()
        .resource_mut::<NextState<GameMode>>()
        .set(next);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// The game boots straight into `Running` — there is no splash screen.
#[test]
fn default_state_is_running() {
    let mut app = headless_app();
    app.update(); // run one frame so StateTransition fires
    assert_eq!(mode(&app), GameMode::Running);
}

/// Requesting `Paused` via `NextState` transitions on the next
/// `StateTransition` pass (which Bevy runs before each `Update`).
#[test]
fn transition_running_to_paused_and_back() {
    let mut app = headless_app();
    app.update();

    request(&mut app, GameMode::Paused);
    app.update();
    assert_eq!(mode(&app), GameMode::Paused);

    request(&mut app, GameMode::Running);
    app.update();
    assert_eq!(mode(&app), GameMode::Running);
}

/// `Paused` persists across additional frames — no accidental reversion.
#[test]
fn paused_state_persists_across_frames() {
    let mut app = headless_app();
    app.update();

    request(&mut app, GameMode::Paused);
    app.update();

    for _ in 0..5 {
        app.update();
    }
    assert_eq!(
        mode(&app),
        GameMode::Paused,
        "Paused must remain stable without a new transition"
    );
}

/// Walking into settings and backing out is purely a `MenuState` journey;
/// the mode state never leaves `Paused`.
#[test]
fn settings_round_trip_stays_paused() {
    let mut app = headless_app();
    app.update();
    request(&mut app, GameMode::Paused);
    app.update();

    {
        let mut menu = app.world_mut().resource_mut::<MenuState>();
        // Move the cursor to "Settings" and select it.
        menu.navigate(false, true, false, false, 0.2);
        menu.tick(0.25);
        let cmd = menu.navigate(false, false, true, false, 0.2);
        assert_eq!(cmd, Some(MenuCommand::OpenSettings));
        assert_eq!(menu.screen, MenuScreen::Settings);

        // Cancel out of settings with the pause key.
        menu.tick(0.25);
        let cmd = menu.navigate(false, false, false, true, 0.2);
        assert_eq!(cmd, Some(MenuCommand::Back));
        assert_eq!(menu.screen, MenuScreen::Root);
    }

    app.update();
    assert_eq!(mode(&app), GameMode::Paused);
}

/// The level-triggered pause toggle honours its debounce window: the first
/// held sample flips the mode and arms the timer; further samples inside
/// the window do nothing.
#[test]
fn pause_debounce_blocks_rapid_retoggle() {
    let mut app = headless_app();
    app.insert_resource(TuningConfig::default());
    app.init_resource::<DebounceTimers>();

    // Escape held from the first frame on.
    let mut control = ControlState::default();
    control.apply(&RawKeys {
        pause: true,
        ..Default::default()
    });
    app.insert_resource(control);

    // Only the toggle itself — no timer tick, so the debounce stays armed.
    app.add_systems(Update, pause_toggle_system);

    app.update();
    app.update(); // StateTransition applies the request
    assert_eq!(mode(&app), GameMode::Paused);
    let armed = app.world().resource::<DebounceTimers>().pause;
    assert!(
        (armed - TuningConfig::default().pause_input_cooldown).abs() < 1e-6,
        "toggle must arm the debounce, got {armed}"
    );

    // Held key with the window still open: no re-toggle.
    for _ in 0..5 {
        app.update();
    }
    assert_eq!(mode(&app), GameMode::Paused);

    // Window elapsed: the held key re-toggles back to Running.
    app.world_mut().resource_mut::<DebounceTimers>().pause = 0.0;
    app.update();
    app.update();
    assert_eq!(mode(&app), GameMode::Running);
}

/// Selecting "Resume" from the root menu yields the command the frame loop
/// turns into a `Running` transition.
#[test]
fn resume_selection_yields_resume_command() {
    let mut app = headless_app();
    app.update();
    request(&mut app, GameMode::Paused);
    app.update();

    let cmd = {
        let mut menu = app.world_mut().resource_mut::<MenuState>();
        menu.navigate(false, false, true, false, 0.2)
    };
    assert_eq!(cmd, Some(MenuCommand::Resume));

    request(&mut app, GameMode::Running);
    app.update();
    assert_eq!(mode(&app), GameMode::Running);
}
