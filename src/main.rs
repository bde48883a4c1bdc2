//! Binary entry point: load configuration, bring up logging and the SQLite
//! store, then run the menu until the operator exits or the process is told
//! to stop. Configuration and connection failures are the only fatal ones.
use std::io;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use tracing::{error, info, warn};

use photoshoot_manager::config::Config;
use photoshoot_manager::{
    logging, ClientService, Database, Prompter, Shell, ShootService, SqliteClientStore,
    SqliteShootStore,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "fatal error");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = Config::from_env().context("configuration error")?;
    logging::init(&config.log)?;

    let db = Database::open(&config.database).context("failed to connect to database")?;
    info!(path = %config.database.path.display(), "database connected");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;

    let outcome = runtime.block_on(async move {
        let menu = tokio::task::spawn_blocking(move || run_menu(&db));
        tokio::select! {
            joined = menu => joined
                .map_err(|err| anyhow!("menu task failed: {err}"))
                .and_then(|menu_result| menu_result),
            () = shutdown_signal() => {
                info!("termination signal received");
                println!();
                println!("Goodbye!");
                Ok(())
            }
        }
    });

    // The menu thread may still be parked on stdin; do not wait for it.
    runtime.shutdown_background();
    outcome
}

fn run_menu(db: &Database) -> Result<()> {
    let clients = SqliteClientStore::new(db);
    let shoots = SqliteShootStore::new(db);

    let stdin = io::stdin();
    let prompter = Prompter::new(stdin.lock(), io::stdout());
    let mut shell = Shell::new(
        prompter,
        ClientService::new(clients),
        ShootService::new(shoots, clients),
    );
    shell.run()
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(err) => {
                warn!(%err, "failed to register SIGTERM handler, using ctrl-c only");
                let _ = ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(err) = ctrl_c.await {
            error!(%err, "ctrl-c signal handler failed");
        }
    }
}
