use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use vitae_cli::{commands, session::SessionManager, CliExportFormat};
use vitae_client::{default_http_client, ApiClient};
use vitae_core::{ProfileForm, ResumeForm, SignupForm};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    /// API base URL (overrides VITAE_API_BASE_URL)
    #[arg(long, global = true, env = "VITAE_API_BASE_URL")]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    /// Show the server-side view of the current session
    Whoami,
    /// Manage the account profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Create, list, inspect, delete, and export resumes
    Resume {
        #[command(subcommand)]
        command: ResumeCommands,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    Setup {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        linkedin: Option<String>,
        #[arg(long)]
        github: Option<String>,
    },
    Show,
}

#[derive(Subcommand)]
enum ResumeCommands {
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, help = "Defaults to the signed-in user's name")]
        name: Option<String>,
        #[arg(long, help = "Defaults to the signed-in user's email")]
        email: Option<String>,
        #[arg(long)]
        summary: Option<String>,
        #[arg(long)]
        skills: String,
        #[arg(long)]
        experience: String,
        #[arg(long)]
        projects: Option<String>,
        #[arg(long)]
        education: String,
        #[arg(long)]
        certifications: Option<String>,
    },
    List {
        #[arg(short, long, help = "Filter by title, name, or email")]
        search: Option<String>,
    },
    Show {
        id: String,
    },
    Delete {
        id: String,
    },
    Export {
        id: String,
        #[arg(long, value_enum, default_value_t = CliExportFormat::Pdf)]
        format: CliExportFormat,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("default subscriber");

    let base_url = vitae_config::resolve_base_url(cli.api_url.as_deref());
    let client = default_http_client().context("Failed to build HTTP client")?;
    let api = ApiClient::new(client, &base_url)?;
    let sessions = SessionManager::new();
    sessions.attach(&api)?;

    match cli.command {
        Commands::Register {
            name,
            email,
            password,
            confirm_password,
        } => {
            commands::cmd_register(
                &api,
                &sessions,
                SignupForm {
                    name,
                    email,
                    password,
                    confirm_password,
                },
            )
            .await?;
        }
        Commands::Login { email, password } => {
            commands::cmd_login(&api, &sessions, email, password).await?;
        }
        Commands::Logout => commands::cmd_logout(&api, &sessions).await?,
        Commands::Whoami => {
            commands::cmd_whoami(&api).await?;
        }
        Commands::Profile { command } => match command {
            ProfileCommands::Setup {
                name,
                email,
                role,
                bio,
                phone,
                address,
                linkedin,
                github,
            } => {
                // Unspecified identity fields fall back to the stored echo.
                let echo = sessions.current()?;
                let form = ProfileForm {
                    name: name.unwrap_or_else(|| echo.user.name.clone()),
                    email: email.unwrap_or_else(|| echo.user.email.clone()),
                    role,
                    bio,
                    phone,
                    address,
                    linkedin,
                    github,
                };
                commands::cmd_profile_setup(&api, form).await?;
            }
            ProfileCommands::Show => {
                commands::cmd_profile_show(&api).await?;
            }
        },
        Commands::Resume { command } => match command {
            ResumeCommands::Create {
                title,
                name,
                email,
                summary,
                skills,
                experience,
                projects,
                education,
                certifications,
            } => {
                let echo = sessions.current()?;
                let form = ResumeForm {
                    title,
                    name: name.unwrap_or_else(|| echo.user.name.clone()),
                    email: email.unwrap_or_else(|| echo.user.email.clone()),
                    professional_summary: summary,
                    skills,
                    work_experience: experience,
                    projects,
                    education,
                    certifications,
                };
                commands::cmd_resume_create(&api, form).await?;
            }
            ResumeCommands::List { search } => {
                commands::cmd_resume_list(&api, search).await?;
            }
            ResumeCommands::Show { id } => {
                commands::cmd_resume_show(&api, id).await?;
            }
            ResumeCommands::Delete { id } => commands::cmd_resume_delete(&api, id).await?,
            ResumeCommands::Export { id, format } => {
                commands::cmd_resume_export(&api, id, format.into()).await?;
            }
        },
    }

    Ok(())
}
