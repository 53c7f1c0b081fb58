use std::fs::File;
use std::sync::Arc;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use certctl::Mode;
use certctl::core::config;
use certctl::dispatch::{ActionDispatcher, ActionRoute, BodyRoute, TableRoute};
use certctl::surface::StdoutSurface;

#[derive(Parser)]
#[command(name = "certctl", about = "Control-panel client for the certificate backend")]
struct Args {
    /// Action to trigger on the server
    action: Option<String>,

    /// Base URL of the control server
    #[arg(short, long)]
    server: Option<String>,

    /// How the action is shaped into a request
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// List the configured actions instead of dispatching one
    #[arg(short, long)]
    list: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to certctl.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("certctl.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let config = config::load_config().unwrap_or_else(|e| {
        eprintln!("Ignoring unusable config: {e}");
        config::CertctlConfig::default()
    });
    let resolved = config::resolve(&config, args.mode, args.server.as_deref());

    log::info!(
        "Certctl starting up: mode={:?}, server={}",
        resolved.mode,
        resolved.server_url
    );

    if args.list {
        list_actions(&resolved);
        return Ok(());
    }

    let Some(action) = args.action else {
        eprintln!("No action given. Try `certctl <action>` or `certctl --list`.");
        std::process::exit(2);
    };

    let route: Arc<dyn ActionRoute> = match resolved.mode {
        Mode::Body => Arc::new(BodyRoute::new(
            &resolved.server_url,
            &resolved.body_endpoint,
            &resolved.action_field,
        )),
        Mode::Table => Arc::new(TableRoute::from_entries(
            &resolved.server_url,
            resolved
                .actions
                .iter()
                .map(|a| (a.name.as_str(), a.endpoint.as_str())),
        )),
    };

    let dispatcher =
        ActionDispatcher::new(route, resolved.fields.clone(), Arc::new(StdoutSurface));
    dispatcher.dispatch(&action).await;

    Ok(())
}

/// Prints the action catalog the current configuration routes.
fn list_actions(resolved: &config::ResolvedConfig) {
    if resolved.mode == Mode::Body {
        println!(
            "body mode: any action name is accepted, POSTed to {}{} as {{\"{}\": ...}}",
            resolved.server_url, resolved.body_endpoint, resolved.action_field
        );
        return;
    }
    if resolved.actions.is_empty() {
        println!("No actions configured. Add [[actions]] entries to the config file.");
        return;
    }
    for entry in &resolved.actions {
        match &entry.description {
            Some(desc) => println!("{:<26} {}  ({})", entry.name, entry.endpoint, desc),
            None => println!("{:<26} {}", entry.name, entry.endpoint),
        }
    }
}
