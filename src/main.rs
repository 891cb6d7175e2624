//! PokeGuess - guess the creature from its sprite

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokeguess::action::Action;
use pokeguess::api::{self, PokeApi};
use pokeguess::components::{Component, GameView, GameViewProps};
use pokeguess::config::{
    GameConfig, ProviderConfig, DEFAULT_API_BASE, DEFAULT_LANGUAGE, DEFAULT_MAX_ID,
    DEFAULT_TIMEOUT_SECS,
};
use pokeguess::effect::Effect;
use pokeguess::logging;
use pokeguess::reducer::reducer;
use pokeguess::state::{AppState, TICK_MS};

/// PokeGuess - name the Pokemon from its sprite
#[derive(Parser, Debug)]
#[command(name = "pokeguess")]
#[command(about = "Guess-the-Pokemon terminal game backed by PokeAPI")]
struct Args {
    /// Base URL of the PokeAPI-compatible service
    #[arg(long, env = "POKEGUESS_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Highest identifier a round may draw (inclusive)
    #[arg(long, default_value_t = DEFAULT_MAX_ID, value_parser = clap::value_parser!(u16).range(1..))]
    max_id: u16,

    /// Language code for localized names
    #[arg(long, default_value = DEFAULT_LANGUAGE)]
    language: String,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,

    /// Seed for round selection (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,

    /// Show the sprite as a silhouette until it is guessed
    #[arg(long)]
    silhouette: bool,

    /// Directory for the log file
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum GameComponentId {
    Game,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum GameContext {
    Main,
}

impl EventRoutingState<GameComponentId, GameContext> for AppState {
    fn focused(&self) -> Option<GameComponentId> {
        Some(GameComponentId::Game)
    }

    fn modal(&self) -> Option<GameComponentId> {
        None
    }

    fn binding_context(&self, _id: GameComponentId) -> GameContext {
        GameContext::Main
    }

    fn default_context(&self) -> GameContext {
        GameContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        api_base,
        max_id,
        language,
        timeout_secs,
        seed,
        silhouette,
        log_dir,
        debug: debug_args,
    } = Args::parse();

    let _log_guard = logging::init(log_dir)?;

    let provider = PokeApi::new(ProviderConfig {
        base_url: api_base,
        language,
        timeout: Duration::from_secs(timeout_secs),
    })
    .map_err(io::Error::other)?;
    tracing::info!(base = %provider.config().base_url, "provider configured");
    api::install(provider);

    let game = GameConfig {
        max_id,
        silhouette,
        seed: seed.unwrap_or_else(clock_seed),
    };
    tracing::info!(?game, "starting");

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(game))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

struct GameUi {
    view: GameView,
}

impl GameUi {
    fn new() -> Self {
        Self {
            view: GameView::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<GameComponentId>,
    ) {
        event_ctx.set_component_area(GameComponentId::Game, area);
        let props = GameViewProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.view.render(frame, area, props);
    }

    fn handle_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = GameViewProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.view.handle_event(event, props).into_iter().collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(GameUi::new()));
    let mut bus: EventBus<AppState, Action, GameComponentId, GameContext> = EventBus::new();
    let keybindings: Keybindings<GameContext> = Keybindings::new();

    let ui_game = Rc::clone(&ui);
    bus.register(GameComponentId::Game, move |event, state| {
        ui_game.borrow_mut().handle_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks. Each kind of request shares one task
/// key, so a new round aborts whatever the previous one still had in flight.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadCreature { round, id } => {
            tracing::debug!(round, id, "fetching creature");
            ctx.tasks().spawn("creature", async move {
                match api::provider().fetch_creature(id).await {
                    Ok(creature) => Action::CreatureDidLoad { round, creature },
                    Err(e) => Action::CreatureDidError {
                        round,
                        error: e.to_string(),
                    },
                }
            });
        }
        Effect::LoadSpecies { round, id } => {
            tracing::debug!(round, id, "fetching species");
            ctx.tasks().spawn("species", async move {
                match api::provider().fetch_localized_name(id).await {
                    Ok(localized_name) => Action::SpeciesDidLoad {
                        round,
                        localized_name,
                    },
                    Err(e) => Action::SpeciesDidError {
                        round,
                        error: e.to_string(),
                    },
                }
            });
        }
        Effect::LoadSprite { round, url } => {
            tracing::debug!(round, %url, "fetching sprite");
            ctx.tasks().spawn("sprite", async move {
                match api::provider().fetch_sprite(&url).await {
                    Ok(sprite) => Action::SpriteDidLoad { round, sprite },
                    Err(e) => Action::SpriteDidError {
                        round,
                        error: e.to_string(),
                    },
                }
            });
        }
        Effect::LoadNameIndex { limit } => {
            tracing::debug!(limit, "fetching name index");
            ctx.tasks().spawn("name_index", async move {
                match api::provider().fetch_name_index(limit).await {
                    Ok(names) => Action::NameIndexDidLoad(names),
                    Err(e) => Action::NameIndexDidError(e.to_string()),
                }
            });
        }
    }
}
