//! Interactive session
//!
//! Line-oriented editor around a [`Session`]: the form is edited with
//! `:`-commands and submitted with `:run`. Uses rustyline for
//! readline-style editing and history.

use crate::history::History;
use crate::service::ServiceClient;
use crate::session::{ExecutionOutcome, OutputFormat, Session};
use crate::templates;
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::Editor;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

const HELP: &str = "\
Commands:
  :run                 submit the current form
  :edit                replace the source (finish with a line containing only '.')
  :class NAME          set the class name
  :input               replace stdin (finish with '.')
  :show                print the form and the last result
  :templates           list templates
  :template N          load template N
  :history             list saved runs
  :load N              load saved run N
  :clear-history       delete all saved runs
  :clear               reset the form
  :format F            both, raw or tostring
  :copy [raw|tostring] copy the last output to the clipboard
  :help                this text
  :quit                exit (Ctrl+D also works)";

/// One parsed REPL line
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Run,
    Edit,
    Class(String),
    Input,
    Show,
    Templates,
    Template(usize),
    History,
    Load(usize),
    ClearHistory,
    Clear,
    Format(OutputFormat),
    Copy(Option<OutputFormat>),
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<ReplCommand, String> {
    let line = line.trim();
    let (name, arg) = match line.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (line, ""),
    };

    let number = |arg: &str| {
        arg.parse::<usize>()
            .map_err(|_| format!("{} needs a number", name))
    };

    match name {
        ":run" | ":r" => Ok(ReplCommand::Run),
        ":edit" | ":e" => Ok(ReplCommand::Edit),
        ":class" if !arg.is_empty() => Ok(ReplCommand::Class(arg.to_string())),
        ":class" => Err(":class needs a name".into()),
        ":input" => Ok(ReplCommand::Input),
        ":show" => Ok(ReplCommand::Show),
        ":templates" => Ok(ReplCommand::Templates),
        ":template" => number(arg).map(ReplCommand::Template),
        ":history" => Ok(ReplCommand::History),
        ":load" => number(arg).map(ReplCommand::Load),
        ":clear-history" => Ok(ReplCommand::ClearHistory),
        ":clear" => Ok(ReplCommand::Clear),
        ":format" => arg.parse().map(ReplCommand::Format),
        ":copy" if arg.is_empty() => Ok(ReplCommand::Copy(None)),
        ":copy" => arg.parse().map(|f| ReplCommand::Copy(Some(f))),
        ":help" | ":h" | "?" => Ok(ReplCommand::Help),
        ":quit" | ":q" | ":exit" => Ok(ReplCommand::Quit),
        _ => Err(format!("unknown command '{}', try :help", name)),
    }
}

/// `~/.javacoder/repl_history`
pub fn default_line_history() -> PathBuf {
    dirs::home_dir()
        .map(|p| p.join(".javacoder").join("repl_history"))
        .unwrap_or_else(|| PathBuf::from(".javacoder_repl_history"))
}

struct Repl {
    client: ServiceClient,
    history: History,
    session: Session,
    rl: Editor<(), FileHistory>,
}

pub async fn run(
    client: ServiceClient,
    history: History,
    format: OutputFormat,
    line_history: PathBuf,
) -> io::Result<()> {
    let mut rl: Editor<(), FileHistory> = Editor::new().map_err(io::Error::other)?;

    if line_history.exists()
        && let Err(e) = rl.load_history(&line_history)
    {
        eprintln!("[warning] Failed to load line history: {}", e);
    }

    let mut session = Session::new();
    session.output_format = format;

    let mut repl = Repl {
        client,
        history,
        session,
        rl,
    };

    println!("javacoder v{}", env!("CARGO_PKG_VERSION"));
    println!("Service: {}", repl.client.endpoint());
    println!("Type :help for commands, :run to execute. Ctrl+D to quit.");
    println!();

    loop {
        match repl.rl.readline("> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = repl.rl.add_history_entry(line);

                match parse_command(line) {
                    Ok(ReplCommand::Quit) => break,
                    Ok(command) => repl.dispatch(command).await?,
                    Err(msg) => println!("[error] {}", msg),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("[error] Readline error: {}", e);
                break;
            }
        }
    }

    if let Some(parent) = line_history.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = repl.rl.save_history(&line_history) {
        eprintln!("[warning] Failed to save line history: {}", e);
    }

    println!("\nGoodbye!");
    Ok(())
}

impl Repl {
    async fn dispatch(&mut self, command: ReplCommand) -> io::Result<()> {
        debug!(?command, "repl command");

        match command {
            ReplCommand::Run => {
                print!("[running...]");
                io::stdout().flush()?;

                let outcome = self.session.execute(&self.client, &mut self.history).await;
                print!("\r");
                if outcome == ExecutionOutcome::Failed {
                    println!("[failed]");
                }
                print!("{}", self.session.render(self.session.output_format));
            }
            ReplCommand::Edit => {
                if let Some(source) = self.read_block("source")? {
                    if let Some(name) = crate::session::infer_class_name(&source) {
                        self.session.class_name = name;
                    }
                    self.session.source_code = source;
                    println!("Source updated (class {}).", self.session.class_name);
                }
            }
            ReplCommand::Class(name) => self.session.class_name = name,
            ReplCommand::Input => {
                if let Some(input) = self.read_block("input")? {
                    self.session.input = input;
                }
            }
            ReplCommand::Show => {
                println!("Class: {}", self.session.class_name);
                println!("{}", self.session.source_code);
                if !self.session.input.is_empty() {
                    println!("--- Input ---\n{}", self.session.input);
                }
                print!("{}", self.session.render(self.session.output_format));
            }
            ReplCommand::Templates => {
                for (i, template) in templates::TEMPLATES.iter().enumerate() {
                    println!("{:>2}. {} ({})", i + 1, template.name, template.class_name);
                }
            }
            ReplCommand::Template(number) => {
                match number.checked_sub(1).and_then(templates::get) {
                    Some(template) => {
                        self.session.load_template(template);
                        println!("Loaded template '{}'.", template.name);
                    }
                    None => println!("[error] no template #{}", number),
                }
            }
            ReplCommand::History => crate::print_history(&self.history),
            ReplCommand::Load(number) => {
                match number.checked_sub(1).and_then(|i| self.history.get(i)) {
                    Some(entry) => {
                        self.session.load_from_history(entry);
                        println!("Loaded {}.", entry);
                    }
                    None => println!("[error] no history entry #{}", number),
                }
            }
            ReplCommand::ClearHistory => match self.history.clear() {
                Ok(()) => println!("History cleared."),
                Err(e) => println!("[error] {}", e),
            },
            ReplCommand::Clear => self.session.clear_all(),
            ReplCommand::Format(format) => self.session.output_format = format,
            ReplCommand::Copy(format) => {
                let format = format.unwrap_or(OutputFormat::Raw);
                crate::copy_result(&self.session, format)?;
            }
            ReplCommand::Help => println!("{}", HELP),
            ReplCommand::Quit => {}
        }

        Ok(())
    }

    /// Read lines until a lone `.`; `None` when cancelled with Ctrl+C
    fn read_block(&mut self, what: &str) -> io::Result<Option<String>> {
        println!("Enter {}, end with a line containing only '.':", what);

        let mut lines = Vec::new();
        loop {
            match self.rl.readline("... ") {
                Ok(line) if line.trim_end() == "." => break,
                Ok(line) => lines.push(line),
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    return Ok(None);
                }
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(io::Error::other(e)),
            }
        }

        Ok(Some(lines.join("\n")))
    }
}
