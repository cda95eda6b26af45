mod clipboard;
mod config;
mod history;
mod repl;
mod service;
mod session;
mod templates;

use clap::{Parser, Subcommand};
use config::AppConfig;
use history::{History, HistoryEntry};
use service::ServiceClient;
use session::{ExecutionOutcome, OutputFormat, Session};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{Level, debug, warn};
use tracing_subscriber::fmt;

/// How long a one-shot `run` lingers for the visit ping before exiting
const VISIT_WAIT: Duration = Duration::from_millis(500);

/// CLI arguments
#[derive(Debug, Parser)]
#[command(name = "javacoder", version)]
#[command(about = "Run Java programs on a remote execution service")]
struct Args {
    /// Execution service base URL (e.g., http://localhost:8080)
    #[arg(short, long, global = true)]
    endpoint: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Run history file path
    #[arg(long, global = true)]
    history_file: Option<PathBuf>,

    /// Output rendering: both, raw or tostring
    #[arg(short, long, global = true, default_value = "both")]
    format: OutputFormat,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compile and run a Java source file ("-" reads stdin)
    Run {
        file: PathBuf,

        /// Class holding main (defaults to the first public class)
        #[arg(short, long)]
        class: Option<String>,

        /// Text fed to the program's stdin
        #[arg(short, long, conflicts_with = "input_file")]
        input: Option<String>,

        /// File fed to the program's stdin
        #[arg(long)]
        input_file: Option<PathBuf>,

        /// Copy the result to the clipboard (raw or tostring)
        #[arg(long)]
        copy: Option<OutputFormat>,
    },
    /// Built-in code templates
    Templates {
        #[command(subcommand)]
        action: Option<TemplateAction>,
    },
    /// Locally saved successful runs
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
    /// Check that the execution service is up
    Health,
    /// Languages the execution service supports
    Languages,
    /// Execution statistics reported by the service
    Stats,
    /// Interactive session (default)
    Repl,
}

#[derive(Debug, Subcommand)]
enum TemplateAction {
    /// List templates
    List,
    /// Print a template's source
    Show { number: usize },
    /// Run a template
    Run { number: usize },
}

#[derive(Debug, Subcommand)]
enum HistoryAction {
    /// List saved runs, newest first
    List,
    /// Show a saved run with its output
    Show { number: usize },
    /// Run a saved program again
    Rerun { number: usize },
    /// Delete all saved runs
    Clear,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(io::stderr)
        .with_target(args.verbose)
        .init();

    let config_path = args.config.clone().unwrap_or_else(config::default_config_path);
    let mut app_config = AppConfig::load(&config_path)?;
    if let Some(endpoint) = &args.endpoint {
        app_config.service.endpoint = endpoint.clone();
    }
    if let Some(path) = &args.history_file {
        app_config.history.path = path.clone();
    }

    let client = ServiceClient::new(app_config.service.clone())?;
    let mut history = load_history(&app_config);

    match args.command.unwrap_or(Command::Repl) {
        Command::Run {
            file,
            class,
            input,
            input_file,
            copy,
        } => {
            let source = read_source(&file)?;
            let mut session = run_session(source, class, input, input_file.as_deref())?;

            let visit = client.record_visit();
            let outcome = session.execute(&client, &mut history).await;
            print!("{}", session.render(args.format));

            if let Some(format) = copy {
                copy_result(&session, format)?;
            }
            wait_for_visit(visit, VISIT_WAIT).await;

            exit_on_failure(&outcome);
        }
        Command::Templates { action } => match action.unwrap_or(TemplateAction::List) {
            TemplateAction::List => {
                for (i, template) in templates::TEMPLATES.iter().enumerate() {
                    println!("{:>2}. {} ({})", i + 1, template.name, template.class_name);
                }
            }
            TemplateAction::Show { number } => {
                let template = template_at(number)?;
                println!("{}", template.code);
            }
            TemplateAction::Run { number } => {
                let template = template_at(number)?;
                let mut session = Session::new();
                session.load_template(template);

                let outcome = session.execute(&client, &mut history).await;
                print!("{}", session.render(args.format));
                exit_on_failure(&outcome);
            }
        },
        Command::History { action } => match action.unwrap_or(HistoryAction::List) {
            HistoryAction::List => print_history(&history),
            HistoryAction::Show { number } => {
                let entry = history_at(&history, number)?;
                let mut session = Session::new();
                session.load_from_history(entry);

                println!("{}", entry);
                println!("{}", session.source_code);
                if !session.input.is_empty() {
                    println!("--- Input ---\n{}", session.input);
                }
                print!("{}", session.render(args.format));
            }
            HistoryAction::Rerun { number } => {
                let entry = history_at(&history, number)?.clone();
                let mut session = Session::new();
                session.load_from_history(&entry);

                let outcome = session.execute(&client, &mut history).await;
                print!("{}", session.render(args.format));
                exit_on_failure(&outcome);
            }
            HistoryAction::Clear => {
                history.clear()?;
                println!("History cleared.");
            }
        },
        Command::Health => println!("{}", client.health().await?),
        Command::Languages => {
            for language in client.languages().await? {
                println!("{}", language);
            }
        }
        Command::Stats => {
            let stats = client.stats().await?;
            println!("Total executions:      {}", stats.total_executions);
            println!("Successful:            {}", stats.successful_executions);
            println!("Failed:                {}", stats.failed_executions);
            println!("Success rate:          {:.1}%", stats.success_rate);
            println!("Average time:          {:.1}ms", stats.average_execution_time);
        }
        Command::Repl => {
            let _ = client.record_visit();
            repl::run(client, history, args.format, repl::default_line_history()).await?;
        }
    }

    Ok(())
}

/// A broken history file should not block running code
fn load_history(config: &AppConfig) -> History {
    match History::load(config.history.clone()) {
        Ok(history) => history,
        Err(e) => {
            warn!(error = %e, "ignoring unreadable history file");
            eprintln!("[warning] {}", e);
            History::new(config.history.clone())
        }
    }
}

fn read_source(file: &Path) -> io::Result<String> {
    if file.as_os_str() == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        std::fs::read_to_string(file)
    }
}

/// Form for `run`: explicit `--class` wins over the first public class
fn run_session(
    source: String,
    class: Option<String>,
    input: Option<String>,
    input_file: Option<&Path>,
) -> Result<Session, Box<dyn std::error::Error>> {
    let class_name = class
        .or_else(|| session::infer_class_name(&source))
        .ok_or("no public class found, pass --class")?;
    let input = match (input, input_file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => String::new(),
    };

    let mut session = Session::new();
    session.source_code = source;
    session.class_name = class_name;
    session.input = input;
    Ok(session)
}

/// Give the visit ping up to `limit` to land; true if it finished
async fn wait_for_visit(visit: JoinHandle<()>, limit: Duration) -> bool {
    let finished = tokio::time::timeout(limit, visit).await.is_ok();
    if !finished {
        debug!(limit_ms = limit.as_millis() as u64, "visit ping still pending, exiting");
    }
    finished
}

fn template_at(number: usize) -> Result<&'static templates::Template, String> {
    number
        .checked_sub(1)
        .and_then(templates::get)
        .ok_or_else(|| {
            format!(
                "no template #{}, choose 1-{}",
                number,
                templates::TEMPLATES.len()
            )
        })
}

fn history_at(history: &History, number: usize) -> Result<&HistoryEntry, String> {
    number
        .checked_sub(1)
        .and_then(|i| history.get(i))
        .ok_or_else(|| format!("no history entry #{} ({} saved)", number, history.len()))
}

pub(crate) fn print_history(history: &History) {
    if history.is_empty() {
        println!("No runs saved yet.");
        return;
    }
    for (i, entry) in history.entries().enumerate() {
        println!("{:>2}. {}", i + 1, entry);
        println!("    {}", entry.preview().replace('\n', " "));
    }
}

pub(crate) fn copy_result(session: &Session, format: OutputFormat) -> io::Result<()> {
    let text = match format {
        OutputFormat::ToString => session.to_string_output(),
        _ => session.output().to_string(),
    };
    if text.is_empty() {
        eprintln!("[warning] nothing to copy");
        return Ok(());
    }
    clipboard::copy(&text)?;
    debug!(format = %format, "result copied");
    Ok(())
}

fn exit_on_failure(outcome: &ExecutionOutcome) {
    if !matches!(outcome, ExecutionOutcome::Succeeded { .. }) {
        let _ = io::stdout().flush();
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREETER: &str = "public class Greeter {\n    public static void main(String[] a) {}\n}\n";

    #[test]
    fn test_run_infers_class_from_source() {
        let session = run_session(GREETER.into(), None, None, None).unwrap();

        assert_eq!(session.class_name, "Greeter");
        assert_eq!(session.source_code, GREETER);
        assert!(session.input.is_empty());
    }

    #[test]
    fn test_run_class_flag_overrides_inference() {
        let session = run_session(GREETER.into(), Some("Other".into()), None, None).unwrap();
        assert_eq!(session.class_name, "Other");
    }

    #[test]
    fn test_run_without_public_class_needs_flag() {
        let err = run_session("class Hidden {}".into(), None, None, None).unwrap_err();
        assert!(err.to_string().contains("--class"));
    }

    #[test]
    fn test_run_reads_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stdin.txt");
        std::fs::write(&path, "3\n4\n").unwrap();

        let session = run_session(GREETER.into(), None, None, Some(&path)).unwrap();
        assert_eq!(session.input, "3\n4\n");

        let inline = run_session(GREETER.into(), None, Some("7".into()), None).unwrap();
        assert_eq!(inline.input, "7");
    }

    #[test]
    fn test_run_missing_input_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.txt");
        assert!(run_session(GREETER.into(), None, None, Some(&missing)).is_err());
    }

    #[test]
    fn test_read_source_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Greeter.java");
        std::fs::write(&path, GREETER).unwrap();

        assert_eq!(read_source(&path).unwrap(), GREETER);
        assert!(read_source(&dir.path().join("nope.java")).is_err());
    }

    #[tokio::test]
    async fn test_wait_for_visit_returns_when_done() {
        let visit = tokio::spawn(async {});
        assert!(wait_for_visit(visit, VISIT_WAIT).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_visit_gives_up_after_limit() {
        let visit = tokio::spawn(tokio::time::sleep(Duration::from_secs(60)));
        let start = tokio::time::Instant::now();

        assert!(!wait_for_visit(visit, VISIT_WAIT).await);
        assert!(start.elapsed() >= VISIT_WAIT);
    }

    #[test]
    fn test_template_and_history_numbers_are_one_based() {
        assert_eq!(template_at(1).unwrap().class_name, "HelloWorld");
        assert!(template_at(0).is_err());
        assert!(template_at(templates::TEMPLATES.len() + 1).is_err());

        let dir = tempfile::tempdir().unwrap();
        let history = History::new(history::HistoryConfig {
            path: dir.path().join("history.json"),
            capacity: 10,
        });
        let err = history_at(&history, 1).unwrap_err();
        assert!(err.contains("0 saved"));
    }
}
