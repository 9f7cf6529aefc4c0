use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_studio::config::Config;
use resume_studio::errors::AppError;
use resume_studio::flow::Destination;
use resume_studio::models::{
    Education, Experience, PersonalInfo, Project, Skills, Step, TemplateCatalog,
};
use resume_studio::state::AppState;
use resume_studio::upload::{accept_files, ResumeFile};
use resume_studio::validation::{
    validate_education, validate_experience, validate_project, ValidationReport,
};
use resume_studio::workflows;

#[derive(Parser)]
#[command(name = "studio")]
#[command(author, version, about = "Build, reformat and tailor resumes from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List available templates
    Templates,
    /// Pick a template and open the editor
    Select { template_id: String },
    /// Print the current resume and where the wizard stands
    Show,
    /// Edit personal info and submit the step
    Personal(PersonalArgs),
    /// Advance to the next step
    Next,
    /// Go back one step
    Back,
    /// Replace the professional summary
    Summary { text: String },
    /// Replace skill lists (comma separated)
    Skills {
        #[arg(long, value_delimiter = ',')]
        technical: Option<Vec<String>>,
        #[arg(long, value_delimiter = ',')]
        soft: Option<Vec<String>>,
    },
    /// Append a work experience entry
    AddExperience(ExperienceArgs),
    /// Append an education entry
    AddEducation(EducationArgs),
    /// Append a project
    AddProject(ProjectArgs),
    /// Remove an entry by position (0-based)
    Remove { section: Section, index: usize },
    /// Generate a resume from the current session
    Generate,
    /// Upload an existing resume and reformat it
    Upload {
        file: PathBuf,
        #[arg(short, long)]
        template: Option<String>,
    },
    /// Tailor an existing resume to a job description
    Tailor {
        file: PathBuf,
        /// Job description text, or @path to read it from a file
        #[arg(short, long)]
        job: String,
        #[arg(short, long)]
        template: Option<String>,
    },
    /// Clear the session and start over
    Reset,
    /// Sign in with an email address
    Login {
        email: String,
        /// Avatar URL supplied by an identity provider
        #[arg(long)]
        avatar: Option<String>,
    },
    /// Create an account
    Signup { email: String, name: String },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
}

#[derive(Args)]
struct PersonalArgs {
    #[arg(long)]
    full_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    linked_in: Option<String>,
    #[arg(long)]
    website: Option<String>,
}

#[derive(Args)]
struct ExperienceArgs {
    #[arg(long)]
    company: String,
    #[arg(long)]
    position: String,
    #[arg(long)]
    start_date: String,
    #[arg(long)]
    end_date: Option<String>,
    #[arg(long)]
    current: bool,
    #[arg(long)]
    description: String,
}

#[derive(Args)]
struct EducationArgs {
    #[arg(long)]
    institution: String,
    #[arg(long)]
    degree: String,
    #[arg(long)]
    field: String,
    #[arg(long)]
    graduation_date: String,
    #[arg(long)]
    gpa: Option<String>,
}

#[derive(Args)]
struct ProjectArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    #[arg(long, value_delimiter = ',')]
    technologies: Vec<String>,
    #[arg(long)]
    link: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Section {
    Experience,
    Education,
    Project,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "resume_studio={level},studio={level}",
                level = &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting resume studio v{}", env!("CARGO_PKG_VERSION"));

    let mut state = AppState::from_config(config)?;
    run(&mut state, cli.command).await
}

async fn run(state: &mut AppState, command: Command) -> Result<()> {
    match command {
        Command::Templates => {
            let catalog = fetch_catalog(state).await;
            for t in catalog.iter() {
                let star = if t.popular { " *" } else { "" };
                println!("{:<10} {}{star}\n           {}", t.id, t.name, t.description);
            }
        }
        Command::Select { template_id } => {
            let catalog = fetch_catalog(state).await;
            if !catalog.contains(&template_id) {
                bail!("Unknown template '{template_id}'; run `studio templates` to list them");
            }
            let dest = workflows::choose_template(&mut state.resume, &template_id);
            report_destination(dest);
        }
        Command::Show => {
            let doc = state.resume.snapshot();
            println!("{}", serde_json::to_string_pretty(&*doc)?);
            report_destination(state.flow.enter(&state.resume));
        }
        Command::Personal(args) => {
            let patch = PersonalInfo {
                full_name: args.full_name,
                email: args.email,
                phone: args.phone,
                location: args.location,
                linked_in: args.linked_in,
                website: args.website,
            };
            let dest = state
                .flow
                .submit_personal_info(&mut state.resume, patch, state.gateway.notifier())
                .map_err(AppError::from)?;
            report_destination(dest);
        }
        Command::Next => {
            let dest = state
                .flow
                .advance(&mut state.resume)
                .map_err(AppError::from)?;
            report_destination(dest);
        }
        Command::Back => report_destination(state.flow.retreat(&mut state.resume)),
        Command::Summary { text } => state.resume.set_summary(text),
        Command::Skills { technical, soft } => {
            state.resume.set_skills(Skills { technical, soft });
        }
        Command::AddExperience(args) => {
            let entry = Experience {
                company: args.company,
                position: args.position,
                start_date: args.start_date,
                end_date: args.end_date,
                current: args.current.then_some(true),
                description: args.description,
            };
            advise(validate_experience(&entry));
            state.resume.add_experience(entry);
        }
        Command::AddEducation(args) => {
            let entry = Education {
                institution: args.institution,
                degree: args.degree,
                field: args.field,
                graduation_date: args.graduation_date,
                gpa: args.gpa,
            };
            advise(validate_education(&entry));
            state.resume.add_education(entry);
        }
        Command::AddProject(args) => {
            let entry = Project {
                title: args.title,
                description: args.description,
                technologies: args.technologies,
                link: args.link,
            };
            advise(validate_project(&entry));
            state.resume.add_project(entry);
        }
        Command::Remove { section, index } => {
            let removed = match section {
                Section::Experience => state.resume.remove_experience(index),
                Section::Education => state.resume.remove_education(index),
                Section::Project => state.resume.remove_project(index),
            };
            if !removed {
                warn!("No entry at position {index}; nothing removed");
            }
        }
        Command::Generate => {
            let done = workflows::generate_from_session(&state.resume, &state.gateway).await?;
            println!("{}", serde_json::to_string_pretty(&done.result)?);
            report_destination(done.destination);
        }
        Command::Upload { file, template } => {
            let template = template_or_selected(state, template)?;
            let file = pick_file(state, &file).await?;
            let done =
                workflows::upload_and_reformat(&mut state.resume, &state.gateway, &file, &template)
                    .await?;
            println!("{}", serde_json::to_string_pretty(&done.result)?);
            report_destination(done.destination);
        }
        Command::Tailor {
            file,
            job,
            template,
        } => {
            let template = template_or_selected(state, template)?;
            let job_description = read_job_description(&job).await?;
            let file = pick_file(state, &file).await?;
            let done = workflows::tailor_to_job(
                &mut state.resume,
                &state.gateway,
                &file,
                &job_description,
                &template,
            )
            .await?;
            println!("{}", serde_json::to_string_pretty(&done.result)?);
            report_destination(done.destination);
        }
        Command::Reset => report_destination(workflows::start_over(&mut state.resume)),
        Command::Login { email, avatar } => {
            let user = match avatar {
                Some(avatar) => {
                    let name = email.split('@').next().unwrap_or(&email).to_string();
                    state.auth.login_with_provider(&email, &name, &avatar)
                }
                None => state.auth.login(&email),
            };
            println!("Signed in as {} <{}>", user.display_name, user.email);
        }
        Command::Signup { email, name } => {
            let user = state.auth.signup(&email, &name);
            println!("Welcome, {}", user.display_name);
        }
        Command::Logout => state.auth.logout(),
        Command::Whoami => match state.auth.identity() {
            Some(user) => println!("{} <{}> (id {})", user.display_name, user.email, user.id),
            None => println!("Not signed in"),
        },
    }
    Ok(())
}

/// The service's template list, or the built-in one when it cannot be fetched.
async fn fetch_catalog(state: &AppState) -> TemplateCatalog {
    match state.gateway.get_templates().await {
        Ok(catalog) if !catalog.is_empty() => catalog,
        _ => state.catalog.clone(),
    }
}

fn template_or_selected(state: &AppState, template: Option<String>) -> Result<String, AppError> {
    template
        .or_else(|| state.resume.selected_template().map(str::to_string))
        .ok_or(AppError::NoTemplateSelected)
}

async fn pick_file(state: &AppState, path: &Path) -> Result<ResumeFile> {
    let file = ResumeFile::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(accept_files(vec![file], state.gateway.notifier()).map_err(AppError::from)?)
}

async fn read_job_description(arg: &str) -> Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read job description from {path}")),
        None => Ok(arg.to_string()),
    }
}

/// Entry validation is advisory: warn and keep going.
fn advise(report: ValidationReport) {
    if !report.passed() {
        warn!("Saved with validation issues: {report}");
    }
}

fn report_destination(dest: Destination) {
    match dest {
        Destination::TemplateSelection => println!("Next: choose a template (`studio templates`)"),
        Destination::Editor(step) => {
            println!(
                "Step {} of {}: {} ({:.0}%)",
                step.position(),
                Step::COUNT,
                step.title(),
                step.progress() * 100.0
            )
        }
        Destination::Preview => println!("Next: preview (`studio generate`)"),
    }
}
