use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use timeboard::action::Action;
use timeboard::clock::SystemClock;
use timeboard::config::{Config, VERSION};
use timeboard::controller::{Controller, Flow};
use timeboard::database::db_connect;

/// The application's entry-point.
///
/// Renders the screen, then waits for one line of input, and handles it
/// as an action, until the user quits or the input is closed.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Read environment variables from an '.env' file in the working directory.
    // We use these env vars:
    //  - RUST_LOG
    //  - TIMEBOARD_CONFIG
    //  - TIMEBOARD_DATABASE
    let using_env_file = dotenv().is_ok();

    env_logger::init(); // Use log::* to write to stderr

    if using_env_file {
        log::info!("using .env file")
    }
    log::debug!("using timeboard version '{}'", VERSION);

    let config = Config::load()?;

    let db = db_connect(&config)
        .await
        .context("failed to open rankings database")?;

    let mut controller = Controller::new(config, db, Arc::new(SystemClock));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        let screen = controller.render().await;
        stdout.write_all(screen.as_bytes()).await?;
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };

        let flow = match line.parse::<Action>() {
            Ok(action) => controller.on_action(action).await,
            Err(err) => {
                controller.notify(format!("{}; try s, a, d, name <username>, r, or q", err));
                Flow::Continue
            }
        };
        if flow == Flow::Quit {
            break;
        }
        stdout.write_all(b"\n").await?;
    }

    log::info!("exiting");
    Ok(())
}
