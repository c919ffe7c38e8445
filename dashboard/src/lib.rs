use crate::{
    app::{Action, App},
    registry::store::spawn_event_pump,
    rest::client::RestClient,
    socket::connect::PushSocket,
};
use common::server::config::DashboardConfig;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, warn, LevelFilter};
use ratatui::{backend::CrosstermBackend, Terminal};
use simplelog::{Config, WriteLogger};
use std::{fs::File, io, sync::Arc, time::Duration};
use tokio::sync::{mpsc, Mutex};

pub mod app;
pub mod editor;
pub mod filesystem;
pub mod registry;
pub mod rest;
pub mod session;
pub mod socket;
pub mod ui;

#[tokio::main]
pub async fn start(config_path: Option<&str>, server: Option<&str>) {
    let config_result = filesystem::config::load_config(config_path, server).await;
    let config = match config_result {
        Ok(result) => result,
        Err(err) => {
            eprintln!("[vigil] Could not load dashboard config: {err}");
            return;
        }
    };
    setup_logging(&config);

    let rest_result = RestClient::new(&config);
    let rest = match rest_result {
        Ok(result) => result,
        Err(err) => {
            eprintln!("[vigil] Could not create monitor server client: {err}");
            return;
        }
    };

    if enable_raw_mode().is_err() {
        eprintln!("[vigil] Could not enable raw terminal mode");
        return;
    }
    let mut stdout = io::stdout();
    if execute!(stdout, EnterAlternateScreen).is_err() {
        let _ = disable_raw_mode();
        eprintln!("[vigil] Could not enter alternate screen");
        return;
    }
    let backend = CrosstermBackend::new(stdout);
    let terminal_result = Terminal::new(backend);
    let mut terminal = match terminal_result {
        Ok(result) => result,
        Err(err) => {
            let _ = disable_raw_mode();
            eprintln!("[vigil] Could not create terminal: {err:?}");
            return;
        }
    };

    let result = run(&mut terminal, Arc::new(config), rest).await;

    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    if let Err(err) = result {
        eprintln!("[vigil] Dashboard exited with error: {err:?}");
    }
}

/// Logs go to a file so the terminal stays owned by the UI.
fn setup_logging(config: &DashboardConfig) {
    let log_level = match config.log_level.as_str() {
        "error" => LevelFilter::Error,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        _ => LevelFilter::Warn,
    };

    match File::create(&config.log_path) {
        Ok(log_file) => {
            let _ = WriteLogger::init(log_level, Config::default(), log_file);
        }
        Err(err) => {
            eprintln!(
                "[vigil] Could not create log file at {}: {err:?}",
                config.log_path
            );
        }
    }
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: Arc<DashboardConfig>,
    rest: RestClient,
) -> io::Result<()> {
    let app = Arc::new(Mutex::new(App::new(config.capabilities)));
    let mut push: Option<PushSocket> = None;
    let mut pump = None;

    loop {
        {
            let app_guard = app.lock().await;
            terminal.draw(|frame| ui::render(frame, &app_guard))?;
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let action = app.lock().await.handle_key(key.code);
                    if let Some(action) = action {
                        dispatch(action, &config, &rest, &app);
                    }
                }
            }
        }

        // The push channel and the one-time seed pull start once the
        // session gate has been passed; both are torn down on exit.
        let authenticated = app.lock().await.is_authenticated();
        if authenticated && push.is_none() {
            let (events, rx) = mpsc::channel(16);
            let mut socket = PushSocket::new(&config);
            socket.connect(events);
            push = Some(socket);
            pump = Some(spawn_event_pump(app.clone(), rx));
            spawn_seed_pull(&rest, &app);
        }

        if app.lock().await.should_quit {
            break;
        }
    }

    if let Some(mut socket) = push {
        socket.disconnect();
    }
    if let Some(task) = pump {
        task.abort();
    }
    Ok(())
}

/// One-time pull so the table is not empty until the first push lands.
/// Failure degrades to the loading state, it does not block the view.
fn spawn_seed_pull(rest: &RestClient, app: &Arc<Mutex<App>>) {
    let rest = rest.clone();
    let app = app.clone();
    tokio::spawn(async move {
        match rest.fetch_clients().await {
            Ok(snapshot) => app.lock().await.seed_registry(snapshot),
            Err(err) => {
                warn!("[dashboard] Initial registry pull failed: {err}");
            }
        }
    });
}

fn dispatch(
    action: Action,
    config: &Arc<DashboardConfig>,
    rest: &RestClient,
    app: &Arc<Mutex<App>>,
) {
    let config = config.clone();
    let rest = rest.clone();
    let app = app.clone();
    tokio::spawn(perform(action, config, rest, app));
}

/// Execute one user action against the monitor server and fold the outcome
/// back into the shared state. Runs as its own task so the view stays
/// interactive while the call is in flight; nothing is retried.
pub(crate) async fn perform(
    action: Action,
    config: Arc<DashboardConfig>,
    rest: RestClient,
    app: Arc<Mutex<App>>,
) {
    match action {
        Action::SubmitLogin { account, password } => {
            let result = session::login::login(&config, &account, &password).await;
            let mut app = app.lock().await;
            match result {
                Ok(token) => app.finish_login(token),
                Err(err) => {
                    error!("[dashboard] Login failed: {err}");
                    app.fail_login();
                }
            }
        }
        Action::SaveRow(id) => {
            let record = app.lock().await.store.registry().get(&id).cloned();
            let Some(record) = record else {
                return;
            };
            if let Err(err) = rest.save_client(&id, &record).await {
                error!("[dashboard] Save failed for {id}: {err}");
                app.lock().await.raise_alert(format!("Save failed: {err}"));
            }
        }
        Action::UpdateRow { id, buffer } => match rest.update_client(&id, &buffer).await {
            Ok(()) => app.lock().await.editor.finish(&id),
            Err(err) => {
                error!("[dashboard] Update failed for {id}: {err}");
                app.lock().await.raise_alert(format!("Update failed: {err}"));
            }
        },
        Action::DeleteRow(id) => {
            if let Err(err) = rest.delete_client(&id).await {
                error!("[dashboard] Delete failed for {id}: {err}");
                app.lock().await.raise_alert(format!("Delete failed: {err}"));
            }
        }
    }
}
