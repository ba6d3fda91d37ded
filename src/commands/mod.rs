use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::adapters::LineTextSource;
use crate::app::{AppController, ControllerOptions, EndpointChange};
use crate::domain::{DomainError, HostStatus, Mode, Outcome};

/// Drive a JARVIS host from the terminal.
#[derive(Parser, Debug)]
#[command(name = "jarvis-mobile", version, about)]
pub struct Cli {
    /// Directory holding config.toml and logs (default: OS data directory).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// How `send`, `listen` and the shell interpret text.
    #[arg(long, global = true, value_enum, default_value_t = ModeArg::Control)]
    pub mode: ModeArg,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Control,
    Type,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Control => Mode::Control,
            ModeArg::Type => Mode::Type,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send text according to --mode.
    Send {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Send a command such as "open chrome".
    Command {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Type text into the host's active window.
    Type {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Ask the host's assistant a question.
    Ask {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Check whether the host is reachable.
    Status,
    /// Show or change the host address.
    Endpoint {
        #[command(subcommand)]
        action: Option<EndpointAction>,
    },
    /// Show how the selected mode presents itself.
    Mode,
    /// Print where data, configuration and logs are kept.
    Paths,
    /// Read one utterance from stdin and send it like voice input.
    Listen,
    /// Interactive session.
    Shell,
}

#[derive(Subcommand, Debug)]
pub enum EndpointAction {
    /// Print the current address.
    Show,
    /// Save a new address and check the host.
    Set { url: String },
}

impl Cli {
    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            data_dir: self.data_dir.clone(),
            log_level: self.log_level.clone(),
            mode: self.mode.into(),
        }
    }
}

/// Run one command. Returns whether it succeeded.
pub async fn execute(controller: Arc<AppController>, command: Command) -> Result<bool, DomainError> {
    let ok = match command {
        Command::Send { text } => report(controller.send(&text.join(" ")).await),
        Command::Command { text } => report(controller.send_command(&text.join(" ")).await),
        Command::Type { text } => report(controller.send_type_text(&text.join(" ")).await),
        Command::Ask { text } => report(controller.ask(&text.join(" ")).await),
        Command::Status => {
            let status = controller.host_status().await;
            println!("{}", describe_status(&controller.endpoint().to_string(), status.as_ref()));
            status.is_some_and(|s| s.is_online())
        }
        Command::Endpoint { action } => match action {
            None | Some(EndpointAction::Show) => {
                println!("{}", controller.endpoint());
                true
            }
            Some(EndpointAction::Set { url }) => {
                let change = controller.set_endpoint(&url).await?;
                println!("{}", describe_change(&change));
                change.reachable
            }
        },
        Command::Mode => {
            let profile = controller.mode().profile();
            println!("{} [{}]", profile.label, profile.action_label);
            println!("  input: {}", profile.input_hint);
            println!("  voice: {}", profile.voice_prompt);
            true
        }
        Command::Paths => {
            println!("data:   {}", controller.data_dir());
            println!("config: {}", controller.config_path());
            println!("logs:   {}", controller.logs_dir());
            true
        }
        Command::Listen => {
            let source = LineTextSource::stdin();
            match controller.listen(&source).await {
                Some(outcome) => report(Some(outcome)),
                None => {
                    eprintln!("Nothing recognized.");
                    false
                }
            }
        }
        Command::Shell => {
            shell(controller).await?;
            true
        }
    };
    Ok(ok)
}

/// Interactive loop. Plain lines are sent per the current mode.
async fn shell(controller: Arc<AppController>) -> Result<(), DomainError> {
    print_banner(&controller);
    spawn_status_check(controller.clone());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line.split_once(' ').unwrap_or((line, "")) {
            ("", _) => continue,
            (":q" | ":quit" | ":exit", _) => break,
            (":help", _) => print_help(),
            (":mode", _) => {
                controller.toggle_mode();
                print_banner(&controller);
            }
            (":status", _) => spawn_status_check(controller.clone()),
            (":endpoint", "") => println!("{}", controller.endpoint()),
            (":endpoint", url) => match controller.set_endpoint(url).await {
                Ok(change) => println!("{}", describe_change(&change)),
                Err(e) => println!("error: {}", e),
            },
            (cmd, _) if cmd.starts_with(':') => println!("Unknown command {}, try :help", cmd),
            _ => {
                report(controller.send(line).await);
            }
        }
    }

    debug!("Shell finished");
    Ok(())
}

/// Status checks run beside the prompt; their result is printed when ready.
fn spawn_status_check(controller: Arc<AppController>) {
    tokio::spawn(async move {
        let online = controller.resume().await;
        println!("{}", connection_label(online));
    });
}

fn print_banner(controller: &AppController) {
    let profile = controller.mode().profile();
    println!("{} -> {}", profile.label, controller.endpoint());
    println!("{}", profile.input_hint);
}

fn print_help() {
    println!(":mode             toggle between Control PC and Type on PC");
    println!(":status           check whether the host is reachable");
    println!(":endpoint [url]   show or change the host address");
    println!(":quit             leave");
}

/// Print an outcome. Returns whether it was a success.
fn report(outcome: Option<Outcome>) -> bool {
    match outcome {
        Some(Outcome::Success(message)) => {
            println!("{}", message);
            true
        }
        Some(Outcome::Error(message)) => {
            println!("error: {}", message);
            false
        }
        None => {
            println!("Nothing to send.");
            false
        }
    }
}

pub fn connection_label(online: bool) -> &'static str {
    if online {
        "Connected"
    } else {
        "Disconnected"
    }
}

fn describe_change(change: &EndpointChange) -> String {
    format!(
        "Saved {} ({})",
        change.endpoint,
        connection_label(change.reachable)
    )
}

fn describe_status(endpoint: &str, status: Option<&HostStatus>) -> String {
    let Some(status) = status else {
        return format!("{} {}", connection_label(false), endpoint);
    };

    let mut lines = vec![format!("{} {}", connection_label(status.is_online()), endpoint)];
    if let Some(name) = &status.jarvis_name {
        let version = status.version.as_deref().unwrap_or("unknown");
        lines.push(format!("  host: {} {}", name, version));
    }
    if !status.is_online() {
        lines.push(format!("  status: {}", status.status));
    }
    let enabled: Vec<&str> = status
        .features
        .iter()
        .filter(|(_, on)| **on)
        .map(|(name, _)| name.as_str())
        .collect();
    if !enabled.is_empty() {
        lines.push(format!("  features: {}", enabled.join(", ")));
    }
    lines.join("\n")
}
