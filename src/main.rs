use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use studydesk::{AskError, Client, ClientConfig, Config, FollowUp, Node};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "studydesk", version)]
#[command(about = "Ask a subject tutor and read the answer as headings, lists and tables")]
struct Cli {
    /// Config file (bundled defaults are used if it does not exist)
    #[arg(long, global = true, default_value = "studydesk.toml")]
    config: PathBuf,

    /// Log requests and parsing details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable bold styling in terminal output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available subjects
    Subjects,

    /// Ask a question and render the answer
    Ask {
        /// Subject id (see `subjects`)
        #[arg(short, long, default_value_t = 1)]
        subject: u32,

        /// Ask for a strict 5-mark or 10-mark answer structure
        #[arg(long)]
        exam: bool,

        /// Ask about the question in a different way
        #[arg(long, value_enum)]
        follow_up: Option<FollowUp>,

        #[command(flatten)]
        output: OutputArgs,

        /// The question
        question: String,
    },

    /// Render a saved answer without contacting the service
    Render {
        /// Text file holding the answer
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Also write the answer as a PDF
    #[arg(long)]
    pdf: Option<PathBuf>,

    /// Print Typst markup instead of terminal text
    #[arg(long)]
    typst: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        if e.downcast_ref::<AskError>().is_some_and(AskError::is_retryable) {
            eprintln!("The service may be busy. Please try again.");
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "studydesk=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(&cli.config)?;
    if cli.no_color {
        config.terminal.color = false;
    }

    match cli.command {
        Command::Subjects => {
            list_subjects(&config);
            Ok(())
        }
        Command::Ask {
            subject,
            exam,
            follow_up,
            output,
            question,
        } => {
            let subject = config.subject(subject)?;
            let question = match follow_up {
                Some(action) => action.question(&question),
                None => question,
            };
            let prompt = studydesk::compose(subject, &question, exam)?;

            // Fails on a missing key before anything goes over the network
            let client = Client::new(ClientConfig::from_env(&config.api)?)?;
            let answer = client.generate(&prompt).await?;
            if answer.trim().is_empty() {
                tracing::warn!("service returned an empty answer");
            }

            let title = format!("{}: {}", subject.title, question.trim());
            emit(&answer, &config, &output, Some(&title))
        }
        Command::Render { input, output } => {
            let answer = fs::read_to_string(&input)
                .with_context(|| format!("Error reading {}", input.display()))?;
            emit(&answer, &config, &output, None)
        }
    }
}

fn list_subjects(config: &Config) {
    for subject in &config.subjects {
        println!("{:>3}  [{}] {}", subject.id, subject.category, subject.title);
        println!("     {}", subject.summary());
    }
}

fn emit(answer: &str, config: &Config, output: &OutputArgs, title: Option<&str>) -> Result<()> {
    let nodes = studydesk::render(answer);
    tracing::debug!(nodes = nodes.len(), "rendering answer");

    if output.typst {
        print!("{}", studydesk::nodes_to_typst(&nodes, &config.pdf, title));
    } else {
        print!("{}", studydesk::nodes_to_terminal(&nodes, &config.terminal));
    }

    if let Some(path) = &output.pdf {
        write_pdf(&nodes, config, title, path)?;
    }
    Ok(())
}

fn write_pdf(nodes: &[Node], config: &Config, title: Option<&str>, path: &Path) -> Result<()> {
    let pdf_bytes =
        studydesk::nodes_to_pdf(nodes, &config.pdf, title).map_err(anyhow::Error::msg)?;

    fs::write(path, pdf_bytes).with_context(|| format!("Error writing {}", path.display()))?;

    tracing::info!(path = %path.display(), "wrote pdf");
    eprintln!("Created {}", path.display());
    Ok(())
}
