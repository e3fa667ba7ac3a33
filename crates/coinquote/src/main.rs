use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, TraceLevel};
use coinquote_app::prelude::*;
use coinquote_client::prelude::*;
use dotenv::dotenv;
use std::sync::Arc;
use tokio::task::block_in_place;
use tracing::{debug, subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;
use ui::{MenuItem, TerminalSurface};

mod cli;
mod ui;

type Coinquote = App<CryptoCompare, TerminalSurface>;

fn preprocess(trace_level: Level) {
    dotenv().ok();
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .with_writer(std::io::stderr)
        .finish();
    subscriber::set_global_default(my_subscriber).expect("Set subscriber");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.trace {
        TraceLevel::DEBUG => Level::DEBUG,
        TraceLevel::INFO => Level::INFO,
        TraceLevel::WARN => Level::WARN,
        TraceLevel::ERROR => Level::ERROR,
    };

    preprocess(log_level);
    trace!("Command line input recorded: {cli:#?}");

    let mut config = Config::from_env()?;
    cli.apply(&mut config);
    debug!("Configuration: {config:?}");

    let http_client = build_client(&config.user_agent)?;
    let api = CryptoCompare::new(http_client, &config.api_url)?;
    let surface = Arc::new(TerminalSurface::default());
    let app = App::new(api, surface.clone(), &config);

    // cli framework:
    // "> coinquote <COMMAND>"
    match cli.command.unwrap_or(Commands::Interactive) {
        // "> coinquote [interactive]"
        // menus for both selectors, quote on demand
        Commands::Interactive => interactive(&app, &surface).await?,

        // "> coinquote list"
        // print the catalog the crypto selector would offer
        Commands::List => {
            let entries = match app.start().await {
                Ok(entries) => entries,
                Err(failure) => {
                    app.notifier().settled().await;
                    return Err(failure.into());
                }
            };
            for entry in &entries {
                println!("{}", ui::catalog_line(entry));
            }
        }

        // "> coinquote currencies"
        Commands::Currencies => {
            for fiat in FIAT_CURRENCIES {
                println!("{:>8} | {}", fiat.code, fiat.name);
            }
        }

        // "> coinquote quote --fiat USD --crypto BTC"
        // one submission, then exit
        Commands::Quote { fiat, crypto } => {
            app.change(Control::FiatCurrency, fiat);
            app.change(Control::CryptoSymbol, crypto);

            if let Outcome::Failed(failure) = app.submit().await.outcome {
                app.notifier().settled().await;
                return Err(failure.into());
            }
        }
    }

    Ok(())
}

/// The event loop: page load, then one menu event at a time until the user quits.
///
/// A visible notification is allowed to expire before the next prompt is drawn, so spinners
/// and prompts never share the terminal.
async fn interactive(app: &Coinquote, surface: &TerminalSurface) -> Result<()> {
    // failures are already notified
    let _ = app.start().await;
    app.notifier().settled().await;

    loop {
        let selection = app.selection();
        match block_in_place(|| ui::menu(&selection))? {
            MenuItem::Currency => {
                if let Some(code) = block_in_place(ui::choose_fiat)? {
                    app.change(Control::FiatCurrency, code);
                }
            }
            MenuItem::Crypto => {
                let options = surface.options();
                if let Some(symbol) = block_in_place(|| ui::choose_crypto(&options))? {
                    app.change(Control::CryptoSymbol, symbol);
                }
            }
            MenuItem::Quote => {
                let submission = app.submit().await;
                trace!("Submission finished: {:?}", submission.trail);
                app.notifier().settled().await;
            }
            MenuItem::Quit => break,
        }
    }

    Ok(())
}
