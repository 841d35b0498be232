use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::process;

mod cli;

use cli::categories::CategoriesCommands;
use cli::tasks::TasksCommands;
use taskflow_cli::Config;
use taskflow_client::{AppContext, Backend};

#[derive(Parser)]
#[command(name = "taskflow")]
#[command(about = "TaskFlow - task and category management")]
#[command(version)]
struct Cli {
    /// Storage backend for client commands (http or memory)
    #[arg(long, global = true)]
    backend: Option<Backend>,

    /// Base URL of the TaskFlow API
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
        /// SQLite database file
        #[arg(long)]
        database: Option<PathBuf>,
    },
    /// Manage tasks
    #[command(subcommand)]
    Tasks(TasksCommands),
    /// Manage categories
    #[command(subcommand)]
    Categories(CategoriesCommands),
    /// Show task statistics
    Dashboard,
    /// Sign in
    Login {
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    taskflow_cli::init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }

    match cli.command {
        Commands::Serve { port, database } => {
            if let Some(port) = port {
                config.port = port;
            }
            if database.is_some() {
                config.database_path = database;
            }
            taskflow_cli::run_server(config).await
        }
        Commands::Tasks(cmd) => cli::tasks::handle_tasks_command(&context(&config)?, cmd).await,
        Commands::Categories(cmd) => {
            cli::categories::handle_categories_command(&context(&config)?, cmd).await
        }
        Commands::Dashboard => cli::dashboard::show_dashboard(&context(&config)?).await,
        Commands::Login { email, password } => {
            cli::session::login(&context(&config)?, email, password)
        }
        Commands::Register {
            name,
            email,
            password,
        } => cli::session::register(&context(&config)?, name, email, password),
        Commands::Logout => cli::session::logout(&context(&config)?),
        Commands::Whoami => cli::session::whoami(&context(&config)?),
    }
}

fn context(config: &Config) -> anyhow::Result<AppContext> {
    Ok(AppContext::new(&config.client_config())?)
}
