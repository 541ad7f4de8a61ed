//! # photo-feed
//!
//! Terminal front end for the photo feed client. It wires adapters into the
//! orchestrator according to `configs::AppConfig`, renders every published
//! snapshot, and turns typed commands into intents.

mod commands;
mod demo;
mod render;

use std::sync::Arc;

use anyhow::Context;
use configs::{AppConfig, Backend, LogConfig, LogFormat};
use services::{
    ChannelReporter, CloseTrigger, Collaborators, Failure, IntentError, KeyEvent, KeyEventBus,
    ModalKind, Orchestrator, OrchestratorOptions, RouteDecision,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::commands::{Command, HELP};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load(None).context("loading configuration")?;
    init_tracing(&config.log);

    let collaborators = match config.backend {
        Backend::Memory => demo::collaborators().await?,
        Backend::Http => http_collaborators(&config)?,
    };
    let options = OrchestratorOptions {
        bootstrap: config.orchestrator.bootstrap,
        reject_while_pending: config.orchestrator.reject_while_pending,
    };

    let (reporter, notices) = ChannelReporter::new();
    let app = Arc::new(
        Orchestrator::new(collaborators, KeyEventBus::new(), options)
            .with_reporter(Arc::new(reporter)),
    );
    tokio::spawn(show_notices(notices));
    tokio::spawn(render_changes(Arc::clone(&app)));

    info!(backend = ?config.backend, "photo-feed starting");
    if config.backend == Backend::Memory {
        println!("demo account: {} / {}", demo::DEMO_EMAIL, demo::DEMO_PASSWORD);
    }
    app.mount().await;

    repl(&app).await
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match log.format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[cfg(feature = "http")]
fn http_collaborators(config: &AppConfig) -> anyhow::Result<Collaborators> {
    use api_adapters::HttpCardApi;
    use auth_adapters::HttpIdentityApi;
    use secrecy::{ExposeSecret, SecretString};
    use storage_adapters::FileCredentialStore;

    let token = config
        .api
        .token
        .as_ref()
        .map(|token| SecretString::from(token.expose_secret().to_owned()))
        .context("api.token is required for the http backend")?;
    let cards = HttpCardApi::new(&config.api.base_url, token, config.api.timeout())?;
    let identity = HttpIdentityApi::new(&config.identity.base_url, config.api.timeout())?;
    Ok(Collaborators {
        cards: Arc::new(cards),
        identity: Arc::new(identity),
        credentials: Arc::new(FileCredentialStore::new(&config.storage.credential_path)),
    })
}

#[cfg(not(feature = "http"))]
fn http_collaborators(_config: &AppConfig) -> anyhow::Result<Collaborators> {
    anyhow::bail!("this build has no http backend; rebuild with `--features http`")
}

async fn show_notices(mut notices: mpsc::UnboundedReceiver<Failure>) {
    while let Some(failure) = notices.recv().await {
        println!("! {} failed: {}", failure.operation.as_str(), failure.error);
    }
}

async fn render_changes(app: Arc<Orchestrator>) {
    let mut changes = app.subscribe();
    while changes.changed().await.is_ok() {
        let state = changes.borrow_and_update().clone();
        println!("{}", render::summary(&state));
    }
}

async fn repl(app: &Orchestrator) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("type 'help' for commands");
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let command = match commands::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(error) => {
                println!("{error}");
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        if let Err(error) = execute(app, command).await {
            println!("{error}");
        }
    }
    info!("bye");
    Ok(())
}

async fn execute(app: &Orchestrator, command: Command) -> anyhow::Result<()> {
    let state = app.snapshot();
    match command {
        Command::Feed => print!("{}", render::feed(&state)),
        Command::Open(kind) => {
            debug!(?kind, "opening dialog");
            match kind {
                ModalKind::ProfileEditor => app.open_profile_editor(),
                ModalKind::AvatarEditor => app.open_avatar_editor(),
                ModalKind::AddPhoto => app.open_add_photo(),
                other => anyhow::bail!("{other:?} is opened by its own command"),
            }
        }
        Command::View(id) => {
            let card = state.card(&id).cloned().context("no such card")?;
            app.open_photo_viewer(card);
        }
        Command::Key(name) => {
            app.press_key(&KeyEvent::named(&name));
        }
        Command::Close => {
            app.dismiss(CloseTrigger::CloseButton);
        }
        Command::Click(target) => {
            if !app.dismiss(CloseTrigger::Pointer(target)) {
                println!("dialog stays open");
            }
        }
        Command::Like(id) => {
            let card = state.card(&id).cloned().context("no such card")?;
            let updated = app.toggle_like(&card).await.map_err(intent)?;
            println!("{} now has {} likes", updated.caption, updated.like_count());
        }
        Command::Delete(id) => app.delete_photo(&id).await.map_err(intent)?,
        Command::Profile { name, bio } => {
            app.update_profile(&name, &bio).await.map_err(intent)?;
        }
        Command::Avatar(url) => {
            app.update_avatar(&url).await.map_err(intent)?;
        }
        Command::Add { caption, url } => {
            let card = app.add_photo(&caption, &url).await.map_err(intent)?;
            println!("added {}", card.id);
        }
        Command::Login { email, password } => {
            let identity = app.login(&email, &password).await.map_err(intent)?;
            println!("signed in as {}", identity.email);
        }
        Command::Register { email, password } => {
            app.register(&email, &password).await.map_err(intent)?;
            println!("registered {email}, now sign in");
        }
        Command::Go(path) => match app.navigate(&path) {
            RouteDecision::Render(route) => println!("showing {}", route.path()),
            RouteDecision::Redirect(route) => println!("redirected to {}", route.path()),
        },
        Command::State => println!("{}", serde_json::to_string_pretty(&*state)?),
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
    Ok(())
}

/// Busy is the only intent error the notice channel does not already show.
fn intent(error: IntentError) -> anyhow::Error {
    match error {
        IntentError::Busy => anyhow::anyhow!("another save is still in progress"),
        IntentError::Api(_) => anyhow::anyhow!("request failed"),
    }
}
