use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use evhub_auth::DirectoryVerifier;
use evhub_core::events::{EventCategory, EventStatus};
use evhub_core::ids::EventId;
use evhub_store::{
    AdminStats, EventPatch, EventQuery, EventStore, RegistrationLedger, SessionSlot,
    SessionStore, UserStats,
};

/// Campus event hub demo shell.
///
/// Each invocation owns an independent in-memory copy of the event
/// collection; only the session survives across runs, via the durable slot.
#[derive(Parser)]
#[command(name = "evhub", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and persist the session.
    Login {
        email: String,
        #[arg(long)]
        password: String,
        /// Portal tab: "user" or "admin".
        #[arg(long, default_value = "user")]
        role: String,
    },
    /// Clear the session.
    Logout,
    /// Show the current identity.
    Whoami,
    /// List events, optionally filtered.
    Events {
        /// Case-insensitive substring over title, description, organizer.
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Register the signed-in user for an event.
    Register { event_id: String },
    /// Summarize the portal state.
    Dashboard,
}

struct App {
    session: SessionStore,
    events: EventStore,
    ledger: RegistrationLedger,
}

impl App {
    fn open(settings: &evhub_settings::EvhubSettings) -> Self {
        let verifier = Arc::new(
            DirectoryVerifier::seeded()
                .with_lookup_latency(Duration::from_millis(settings.login_latency_ms)),
        );
        let session = SessionStore::open(SessionSlot::new(settings.session_slot_path()), verifier);

        let events = EventStore::new();
        if settings.seed_demo_data {
            events.seed_demo();
        }

        Self {
            session,
            events,
            ledger: RegistrationLedger::new(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = evhub_settings::load_settings().context("failed to load settings")?;

    let telemetry = evhub_telemetry::TelemetryConfig {
        json_output: settings.log_json,
        ..Default::default()
    };
    if let Err(e) = evhub_telemetry::init_telemetry(&telemetry) {
        eprintln!("evhub: telemetry init failed: {e}");
    }

    tracing::info!("Starting KEC Event Hub");

    let app = App::open(&settings);
    tracing::info!(
        slot = %settings.session_slot_path().display(),
        events = app.events.len(),
        authenticated = app.session.is_authenticated(),
        "stores ready"
    );

    match cli.command {
        Command::Login {
            email,
            password,
            role,
        } => {
            let role = role.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            if app.session.login(&email, &password, role).await {
                let user = app.session.current_user().expect("just logged in");
                println!("Welcome to KEC Event Hub, {}!", user.name);
            } else {
                bail!("invalid credentials");
            }
        }
        Command::Logout => {
            app.session.logout();
            println!("Signed out.");
        }
        Command::Whoami => match app.session.current_user() {
            Some(user) => println!("{} <{}> ({})", user.name, user.email, user.role),
            None => println!("Not signed in."),
        },
        Command::Events {
            search,
            status,
            category,
        } => {
            let status = status
                .map(|s| s.parse::<EventStatus>())
                .transpose()
                .map_err(|e| anyhow::anyhow!(e))?;
            let category = category
                .map(|c| c.parse::<EventCategory>())
                .transpose()
                .map_err(|e| anyhow::anyhow!(e))?;
            let query = EventQuery {
                text: search,
                status,
                category,
            };
            for event in app.events.search(&query) {
                let gate = if event.is_full() { " [FULL]" } else { "" };
                println!(
                    "{}  {}  {} @ {}  {}/{}{}  ({})",
                    event.id,
                    event.title,
                    event.date,
                    event.location,
                    event.registrations,
                    event.max_registrations,
                    gate,
                    event.status
                );
            }
        }
        Command::Register { event_id } => {
            let Some(user) = app.session.current_user() else {
                bail!("sign in first");
            };
            let id = EventId::from_raw(event_id);
            let Some(event) = app.events.get(&id) else {
                bail!("no such event");
            };
            if event.is_full() {
                bail!("{} is full ({}/{})", event.title, event.registrations, event.max_registrations);
            }
            app.ledger.register(&user.id, &id);
            app.events.update(
                &id,
                EventPatch {
                    registrations: Some(event.registrations + 1),
                    ..Default::default()
                },
            );
            println!("Registered for {}.", event.title);
        }
        Command::Dashboard => {
            let admin = AdminStats::collect(&app.events);
            println!(
                "{} events ({} published, {} draft) — {}/{} seats taken",
                admin.total_events,
                admin.published,
                admin.draft,
                admin.total_registrations,
                admin.total_capacity
            );
            if let Some(user) = app.session.current_user() {
                let stats = UserStats::collect(&app.ledger, &app.events, &user.id);
                println!(
                    "{}: {} registered, {} attended, {} upcoming",
                    user.name, stats.events_registered, stats.events_attended, stats.upcoming_events
                );
            }
        }
    }

    Ok(())
}
