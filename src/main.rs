use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use country_explorer::{
    api::{CountryApi, CountryClient},
    cli::{format_detail, format_page, Cli, Commands},
    config::Config,
    controller::Route,
    country_tui::App,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env()?;
    // The TUI owns the terminal, so it only logs to the file
    init_logging(&config, cli.cli);
    config.validate()?;

    info!(
        "Using country API at {} ({:?} revision)",
        config.api_base_url_str(),
        config.api_revision
    );
    let client = CountryClient::new(&config).context("Failed to build the HTTP client")?;

    // Handle CLI mode - print output and exit without TUI
    if cli.cli {
        let Some(command) = cli.command else {
            bail!("CLI mode requires a command (list or show)");
        };
        return handle_cli_command(&client, &config, command).await;
    }

    let mut app = App::new(config.clone(), Arc::new(client));
    let route = match &cli.command {
        Some(command) => {
            if let Some(request) = command.page_request(config.page_size) {
                app.preset_list(command.filter(), &request);
            }
            command.route()
        }
        None => Route::Countries,
    };

    // Setup terminal for TUI mode
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal, route).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match result {
        Ok(()) => info!("Country explorer exited successfully"),
        Err(e) => {
            error!("Country explorer encountered an error: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn init_logging(config: &Config, to_stderr: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "country_explorer=info");
    }

    let directory = config
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = config
        .log_file
        .file_name()
        .unwrap_or(OsStr::new("country_explorer.log"));
    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(io::stderr)
            .with_filter(EnvFilter::from_default_env())
    });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env()),
        )
        .init();
}

/// Handle CLI mode commands - print output and exit
async fn handle_cli_command(
    client: &CountryClient,
    config: &Config,
    command: Commands,
) -> Result<()> {
    match &command {
        Commands::List { .. } => {
            let filter = command.filter();
            let request = command
                .page_request(config.page_size)
                .context("list always carries a page request")?;

            let page = client
                .search_page(&filter, &request)
                .await
                .context("Country search failed")?;
            println!("{}", format_page(&page));
        }
        Commands::Show { .. } => {
            let Route::Country { iso3 } = command.route() else {
                bail!("show did not resolve to a country route");
            };

            match client.country_detail(&iso3).await {
                Ok(detail) => println!("{}", format_detail(&detail)),
                Err(e) if e.is_not_found() => {
                    println!("No data found for {}", iso3);
                    std::process::exit(1);
                }
                Err(e) => return Err(e).with_context(|| format!("Lookup of {} failed", iso3)),
            }
        }
    }

    Ok(())
}
