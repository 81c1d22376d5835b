//! Pause / settings menus — `GameMode` states, the keyboard-driven menu
//! machine, and the overlay UI.
//!
//! ## States
//!
//! | State     | Description                                        |
//! |-----------|----------------------------------------------------|
//! | `Running` | Simulation active; flight/combat systems run       |
//! | `Paused`  | Simulation frozen; menu overlay visible            |
//!
//! Within `Paused`, [`MenuState`] tracks which screen is shown (root pause
//! menu or settings) with an independent cursor — selected index plus its
//! own input-repeat cooldown — per screen.
//!
//! ## Systems (registered by `PauseMenuPlugin`)
//!
//! | System                   | Schedule                  | Purpose                      |
//! |--------------------------|---------------------------|------------------------------|
//! | `pause_toggle_system`    | `Update / Toggles`        | Level-triggered pause toggle |
//! | `tick_menu_cooldowns`    | `Update / Timers`         | Per-screen repeat countdown  |
//! | `menu_navigation_system` | `Update / Menu (Paused)`  | Up/Down/Select/Cancel        |
//! | `menu_display_system`    | `Update / Menu (Paused)`  | Highlight + screen swap      |
//! | `setup_pause_menu`       | `OnEnter(Paused)`         | Spawn overlay UI             |
//! | `cleanup_pause_menu`     | `OnExit(Paused)`          | Despawn overlay UI           |

use crate::config::TuningConfig;
use crate::graphics::GameFont;
use crate::input::ControlState;
use crate::simulation::{DebounceTimers, FrameSet};
use bevy::app::AppExit;
use bevy::prelude::*;
use bevy::window::{MonitorSelection, PrimaryWindow, VideoModeSelection, WindowMode};

// ── Game mode ─────────────────────────────────────────────────────────────────

/// Top-level application state machine.
///
/// Every flight/combat/telemetry system runs under
/// `.run_if(in_state(GameMode::Running))`, so the simulation is fully
/// inactive while the menu is displayed.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    /// Active simulation.
    #[default]
    Running,
    /// Simulation frozen; pause-menu overlay visible.
    Paused,
}

// ── Menu machine ──────────────────────────────────────────────────────────────

/// Which menu screen is showing while paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuScreen {
    Root,
    Settings,
}

/// Labels of the root pause menu, in display order.
pub const ROOT_ITEMS: [&str; 3] = ["Resume", "Settings", "Exit"];

/// Labels of the settings menu, in display order.
pub const SETTINGS_ITEMS: [&str; 3] = ["Fullscreen", "Windowed Fullscreen", "Back"];

/// A side effect requested by a menu selection, handled by
/// [`menu_navigation_system`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Resume,
    OpenSettings,
    Exit,
    EnterFullscreen,
    EnterBorderless,
    Back,
}

/// Selected index plus input-repeat cooldown for one menu screen.
#[derive(Debug, Clone, Default)]
pub struct MenuCursor {
    pub index: usize,
    pub cooldown: f32,
}

/// The keyboard-driven menu machine. Pure logic — no Bevy types beyond
/// `Resource` — so wrap-around, cooldown gating, and screen transitions are
/// unit tested directly.
#[derive(Resource, Debug, Clone)]
pub struct MenuState {
    pub screen: MenuScreen,
    pub root: MenuCursor,
    pub settings: MenuCursor,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            screen: MenuScreen::Root,
            root: MenuCursor::default(),
            settings: MenuCursor::default(),
        }
    }
}

impl MenuState {
    /// Item labels of the active screen.
    pub fn active_items(&self) -> &'static [&'static str] {
        match self.screen {
            MenuScreen::Root => &ROOT_ITEMS,
            MenuScreen::Settings => &SETTINGS_ITEMS,
        }
    }

    /// Selected index of the active screen.
    pub fn active_index(&self) -> usize {
        match self.screen {
            MenuScreen::Root => self.root.index,
            MenuScreen::Settings => self.settings.index,
        }
    }

    fn active_cursor_mut(&mut self) -> &mut MenuCursor {
        match self.screen {
            MenuScreen::Root => &mut self.root,
            MenuScreen::Settings => &mut self.settings,
        }
    }

    /// Count down both repeat cooldowns, floored at zero.
    pub fn tick(&mut self, dt: f32) {
        self.root.cooldown = (self.root.cooldown - dt).max(0.0);
        self.settings.cooldown = (self.settings.cooldown - dt).max(0.0);
    }

    /// Process one frame of held navigation keys.
    ///
    /// All inputs are level-triggered and gated by the active screen's
    /// repeat cooldown: up/down wrap the selection, select fires the item
    /// under the cursor, cancel (pause key) backs out of the settings
    /// screen. Returns the side effect the caller must carry out, if any.
    pub fn navigate(
        &mut self,
        up: bool,
        down: bool,
        select: bool,
        cancel: bool,
        repeat_cooldown: f32,
    ) -> Option<MenuCommand> {
        let len = self.active_items().len();
        let screen = self.screen;
        let cursor = self.active_cursor_mut();
        if cursor.cooldown > 0.0 {
            return None;
        }

        if up {
            cursor.index = (cursor.index + len - 1) % len;
            cursor.cooldown = repeat_cooldown;
            return None;
        }
        if down {
            cursor.index = (cursor.index + 1) % len;
            cursor.cooldown = repeat_cooldown;
            return None;
        }
        if select {
            let index = cursor.index;
            cursor.cooldown = repeat_cooldown;
            let command = match (screen, index) {
                (MenuScreen::Root, 0) => MenuCommand::Resume,
                (MenuScreen::Root, 1) => MenuCommand::OpenSettings,
                (MenuScreen::Root, _) => MenuCommand::Exit,
                (MenuScreen::Settings, 0) => MenuCommand::EnterFullscreen,
                (MenuScreen::Settings, 1) => MenuCommand::EnterBorderless,
                (MenuScreen::Settings, _) => MenuCommand::Back,
            };
            match command {
                MenuCommand::OpenSettings => {
                    self.screen = MenuScreen::Settings;
                    self.settings.index = 0;
                }
                MenuCommand::Back => {
                    self.screen = MenuScreen::Root;
                    self.settings.index = 0;
                }
                _ => {}
            }
            return Some(command);
        }
        if cancel && screen == MenuScreen::Settings {
            cursor.cooldown = repeat_cooldown;
            self.screen = MenuScreen::Root;
            self.settings.index = 0;
            return Some(MenuCommand::Back);
        }
        None
    }
}

// ── Component markers ─────────────────────────────────────────────────────────

/// Root node of the pause overlay; the entire tree is despawned on
/// `OnExit(Paused)`.
#[derive(Component)]
pub struct PauseMenuRoot;

/// Tags the menu title text ("PAUSED" / "SETTINGS").
#[derive(Component)]
pub struct MenuTitleText;

/// Tags the item column of one menu screen.
#[derive(Component)]
pub struct MenuScreenSection(pub MenuScreen);

/// Tags one selectable item label.
#[derive(Component)]
pub struct MenuItemLabel {
    pub screen: MenuScreen,
    pub index: usize,
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn menu_bg() -> Color {
    Color::srgba(0.12, 0.12, 0.12, 0.86)
}
fn item_color() -> Color {
    Color::srgb(0.78, 0.78, 0.78)
}
fn item_selected_color() -> Color {
    Color::srgb(1.0, 0.95, 0.2)
}
fn title_color() -> Color {
    Color::WHITE
}

// ── Toggles: pause key ────────────────────────────────────────────────────────

/// Level-triggered pause toggle with a debounce window.
///
/// Holding Escape re-toggles every debounce interval — a coarse but
/// intentional behaviour; the long window makes it unobtrusive. While the
/// settings screen is open the key is left for the menu's cancel handling
/// instead.
pub fn pause_toggle_system(
    control: Res<ControlState>,
    config: Res<TuningConfig>,
    mut timers: ResMut<DebounceTimers>,
    mode: Res<State<GameMode>>,
    mut next_mode: ResMut<NextState<GameMode>>,
    mut menu: ResMut<MenuState>,
) {
    if !control.pause_held || timers.pause > 0.0 {
        return;
    }
    match mode.get() {
        GameMode::Running => {
            menu.screen = MenuScreen::Root;
            next_mode.set(GameMode::Paused);
        }
        GameMode::Paused => {
            if menu.screen != MenuScreen::Root {
                return;
            }
            next_mode.set(GameMode::Running);
        }
    }
    timers.pause = config.pause_input_cooldown;
}

// ── Timers ────────────────────────────────────────────────────────────────────

/// Count down the per-screen menu repeat cooldowns.
pub fn tick_menu_cooldowns_system(mut menu: ResMut<MenuState>, time: Res<Time>) {
    menu.tick(time.delta_secs());
}

// ── Menu: navigation ──────────────────────────────────────────────────────────

/// Drive the menu machine from the held navigation keys and carry out the
/// resulting command.
#[allow(clippy::too_many_arguments)]
pub fn menu_navigation_system(
    control: Res<ControlState>,
    config: Res<TuningConfig>,
    mut menu: ResMut<MenuState>,
    mut timers: ResMut<DebounceTimers>,
    mut next_mode: ResMut<NextState<GameMode>>,
    mut exit: MessageWriter<AppExit>,
    mut q_window: Query<&mut Window, With<PrimaryWindow>>,
) {
    let command = menu.navigate(
        control.menu_up,
        control.menu_down,
        control.menu_select,
        control.pause_held,
        config.menu_input_cooldown,
    );

    match command {
        Some(MenuCommand::Resume) => {
            next_mode.set(GameMode::Running);
            // Prevent the still-held select/pause keys from instantly re-pausing.
            timers.pause = config.pause_input_cooldown;
        }
        Some(MenuCommand::Exit) => {
            exit.write(AppExit::Success);
        }
        Some(MenuCommand::Back) => {
            // Re-arm the pause debounce so a held Escape that backed out of
            // settings cannot fall through to an unpause next frame.
            timers.pause = config.pause_input_cooldown;
        }
        Some(MenuCommand::EnterFullscreen) => {
            if let Ok(mut window) = q_window.single_mut() {
                window.mode =
                    WindowMode::Fullscreen(MonitorSelection::Current, VideoModeSelection::Current);
                info!("[window] Switching to exclusive fullscreen");
            }
        }
        Some(MenuCommand::EnterBorderless) => {
            if let Ok(mut window) = q_window.single_mut() {
                window.mode = WindowMode::BorderlessFullscreen(MonitorSelection::Current);
                info!("[window] Switching to borderless fullscreen");
            }
        }
        Some(MenuCommand::OpenSettings) | None => {}
    }
}

// ── Menu: display ─────────────────────────────────────────────────────────────

/// Refresh the overlay to match the menu machine: title text, which screen's
/// item column is visible, and the selected-item highlight.
pub fn menu_display_system(
    menu: Res<MenuState>,
    mut q_title: Query<&mut Text, With<MenuTitleText>>,
    mut q_sections: Query<(&MenuScreenSection, &mut Visibility)>,
    mut q_items: Query<(&MenuItemLabel, &mut TextColor)>,
) {
    if let Ok(mut title) = q_title.single_mut() {
        *title = Text::new(match menu.screen {
            MenuScreen::Root => "PAUSED",
            MenuScreen::Settings => "SETTINGS",
        });
    }

    for (section, mut visibility) in q_sections.iter_mut() {
        *visibility = if section.0 == menu.screen {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }

    for (item, mut color) in q_items.iter_mut() {
        let selected = item.screen == menu.screen && item.index == menu.active_index();
        *color = TextColor(if selected {
            item_selected_color()
        } else {
            item_color()
        });
    }
}

// ── OnEnter(Paused): spawn UI ─────────────────────────────────────────────────

/// Spawn the pause overlay.
///
/// Layout (over the frozen game world):
/// ```text
/// ┌─────────────────────────────────────────────┐
/// │ ░░░░░░░░ translucent full-screen dim ░░░░░░ │
/// │      PAUSED                                 │
/// │        Resume        ← selected (yellow)    │
/// │        Settings                             │
/// │        Exit                                 │
/// └─────────────────────────────────────────────┘
/// ```
/// Both screens' item columns are spawned up front; `menu_display_system`
/// swaps their visibility so screen changes never rebuild the tree.
pub fn setup_pause_menu(mut commands: Commands, font: Res<GameFont>, menu: Res<MenuState>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                row_gap: Val::Px(28.0),
                ..default()
            },
            BackgroundColor(menu_bg()),
            ZIndex(100),
            PauseMenuRoot,
        ))
        .with_children(|overlay| {
            overlay.spawn((
                Text::new("PAUSED"),
                TextFont {
                    font: font.0.clone(),
                    font_size: 64.0,
                    ..default()
                },
                TextColor(title_color()),
                MenuTitleText,
            ));

            for (screen, items) in [
                (MenuScreen::Root, ROOT_ITEMS.as_slice()),
                (MenuScreen::Settings, SETTINGS_ITEMS.as_slice()),
            ] {
                overlay
                    .spawn((
                        Node {
                            flex_direction: FlexDirection::Column,
                            align_items: AlignItems::Center,
                            row_gap: Val::Px(18.0),
                            ..default()
                        },
                        if screen == menu.screen {
                            Visibility::Visible
                        } else {
                            Visibility::Hidden
                        },
                        MenuScreenSection(screen),
                    ))
                    .with_children(|column| {
                        for (index, label) in items.iter().enumerate() {
                            column.spawn((
                                Text::new(*label),
                                TextFont {
                                    font: font.0.clone(),
                                    font_size: 36.0,
                                    ..default()
                                },
                                TextColor(item_color()),
                                MenuItemLabel { screen, index },
                            ));
                        }
                    });
            }
        });
}

// ── OnExit(Paused): despawn UI ────────────────────────────────────────────────

/// Recursively despawn the pause overlay.
pub fn cleanup_pause_menu(mut commands: Commands, query: Query<Entity, With<PauseMenuRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers `GameMode`, the menu machine, and the overlay UI.
///
/// Must be added before any plugin that calls
/// `.run_if(in_state(GameMode::Running))`, so the state is registered first.
pub struct PauseMenuPlugin;

impl Plugin for PauseMenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameMode>()
            .init_resource::<MenuState>()
            .add_systems(OnEnter(GameMode::Paused), setup_pause_menu)
            .add_systems(OnExit(GameMode::Paused), cleanup_pause_menu)
            .add_systems(
                Update,
                (
                    tick_menu_cooldowns_system.in_set(FrameSet::Timers),
                    pause_toggle_system.in_set(FrameSet::Toggles),
                    (menu_navigation_system, menu_display_system)
                        .chain()
                        .in_set(FrameSet::Menu)
                        .run_if(in_state(GameMode::Paused)),
                ),
            );
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
