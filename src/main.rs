use anyhow::Result;
use clap::{Parser, Subcommand};

use fundadmin::cli;

#[derive(Debug, Parser)]
#[command(name = "fundadmin")]
#[command(about = "Fund administration demo dashboard")]
#[command(version)]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the dashboard web server
    Serve {
        /// Listen address, host:port (overrides [server] addr)
        #[arg(long)]
        addr: Option<String>,
        /// Do not open a browser on start
        #[arg(long)]
        no_browser: bool,
        /// Fixed seed for the sample performance data
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List navigable pages
    Pages,
    /// Render one page to stdout
    Render {
        /// Page slug, title or sidebar key, e.g. `aml-kyc` or "Fund Onboarding"
        page: String,
        /// Output format: text (default), json, html
        #[arg(long, default_value = "text")]
        format: String,
        /// Fixed seed for the sample performance data
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Evaluate a form submission without starting the server
    Submit {
        /// Form page slug or title
        form: String,
        /// Field assignment, key=value (repeatable)
        #[arg(long = "field", short = 'f')]
        fields: Vec<String>,
    },
    /// Print one draw of the dashboard sample data
    Sample {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        /// Fixed seed for the sample performance data
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Summarize logged dashboard requests
    Activity {
        /// Only include the last N days of data
        #[arg(long)]
        days: Option<u32>,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Write a default config to ~/.fundadmin/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a value, e.g. `server.addr 0.0.0.0:8080`
    Set { key: String, value: String },
    /// Reset the global config to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Serve {
            addr,
            no_browser,
            seed,
        } => cli::run_serve(addr, no_browser, seed),
        Commands::Pages => cli::run_pages(),
        Commands::Render { page, format, seed } => {
            let fmt = cli::RenderFormat::from_str_opt(Some(&format));
            cli::run_render(&page, fmt, seed)
        }
        Commands::Submit { form, fields } => cli::run_submit(&form, &fields),
        Commands::Sample { format, seed } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_sample(fmt, seed)
        }
        Commands::Activity { days, format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_activity(fmt, days)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
