//! Air quality dashboard - terminal entry point

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use air_quality::action::Action;
use air_quality::api::{self, AirQualitySource};
use air_quality::components::{Component, Dashboard, DashboardProps};
use air_quality::config::Config;
use air_quality::effect::Effect;
use air_quality::logging;
use air_quality::reducer::reducer;
use air_quality::state::{AppState, SPINNER_TICK_MS};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Latest OpenAQ readings for a region, one card per monitoring location
#[derive(Parser, Debug)]
#[command(name = "air-quality-dashboard")]
#[command(about = "Terminal dashboard for OpenAQ air quality readings")]
struct Args {
    #[command(flatten)]
    config: Config,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum DashboardComponentId {
    Readings,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum DashboardContext {
    Main,
}

impl EventRoutingState<DashboardComponentId, DashboardContext> for AppState {
    fn focused(&self) -> Option<DashboardComponentId> {
        Some(DashboardComponentId::Readings)
    }

    fn modal(&self) -> Option<DashboardComponentId> {
        None
    }

    fn binding_context(&self, _id: DashboardComponentId) -> DashboardContext {
        DashboardContext::Main
    }

    fn default_context(&self) -> DashboardContext {
        DashboardContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    // A missing .env is fine; the environment and flags still apply.
    let _ = dotenvy::dotenv();

    let Args {
        config,
        debug: debug_args,
    } = Args::parse();

    logging::init(config.log_file.as_deref())?;
    tracing::info!(region = %config.region, bbox = %config.bbox, "starting dashboard");

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let region = config.region();
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(region))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);
    let source: Arc<dyn AirQualitySource> = Arc::new(config.client());

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, source, replay_actions).await;

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

    tracing::info!("dashboard closed");
    Ok(())
}

struct DashboardUi {
    dashboard: Dashboard,
}

impl DashboardUi {
    fn new() -> Self {
        Self {
            dashboard: Dashboard::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<DashboardComponentId>,
    ) {
        event_ctx.set_component_area(DashboardComponentId::Readings, area);

        let props = DashboardProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.dashboard.render(frame, area, props);
    }

    fn handle_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = DashboardProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .dashboard
            .handle_event(event, props)
            .into_iter()
            .collect();
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
    source: Arc<dyn AirQualitySource>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(DashboardUi::new()));
    let mut bus: EventBus<AppState, Action, DashboardComponentId, DashboardContext> =
        EventBus::new();
    let keybindings: Keybindings<DashboardContext> = Keybindings::new();

    let ui_readings = Rc::clone(&ui);
    bus.register(DashboardComponentId::Readings, move |event, state| {
        ui_readings.borrow_mut().handle_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    // The load runs once, as the initial action; nothing polls.
    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::ReadingsFetch),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
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
            move |effect, ctx| handle_effect(effect, ctx, &source),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(
    effect: Effect,
    ctx: &mut EffectContext<Action>,
    source: &Arc<dyn AirQualitySource>,
) {
    match effect {
        Effect::FetchReadings => {
            let source = Arc::clone(source);
            // Same key: a reload replaces any load still in flight.
            ctx.tasks().spawn("readings", async move {
                api::fetch_readings(source.as_ref()).await
            });
        }
    }
}
