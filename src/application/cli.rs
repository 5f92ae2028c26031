#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::io::Write;
use std::path;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use owo_colors::OwoColorize;
use owo_colors::Stream;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::render::paint_notice;
use super::render::Transcript;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::format_training_program;
use crate::domain::models::Gateway;
use crate::domain::models::Message;
use crate::domain::services::actions::help_text;
use crate::domain::services::format_timer;
use crate::domain::services::ConversationStore;
use crate::domain::services::CredentialStore;
use crate::domain::services::Notice;
use crate::domain::services::RestTimer;
use crate::domain::services::SetProgress;
use crate::domain::services::DEFAULT_REST_SECONDS;
use crate::domain::services::DEFAULT_TOTAL_SETS;
use crate::domain::services::HISTORY_ALERT;
use crate::domain::services::TRAINING_PROGRAM_ALERT;
use crate::infrastructure::gateway::HttpGateway;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

fn print_transcript(store: &ConversationStore) {
    if store.is_empty() {
        return;
    }

    let mut transcript = Transcript::default();
    for line in transcript.update(store.messages()) {
        println!("{}", line.paint());
    }
}

fn print_notice(notice: Option<Notice>) {
    if let Some(notice) = notice {
        eprintln!("{}", paint_notice(&notice));
    }
}

/// Loads the conversation like the chat does. A failed load falls back to the welcome
/// message and is reported as an alert instead of an error.
async fn open_conversation(gateway: &dyn Gateway) -> (ConversationStore, Option<Notice>) {
    let mut store = ConversationStore::default();
    let notice = store
        .initialize(gateway)
        .await
        .err()
        .map(|_| return Notice::Alert(HISTORY_ALERT.to_string()));

    return (store, notice);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

async fn ask(gateway: &dyn Gateway, text: &str) -> Result<(Option<Notice>, Message)> {
    if text.trim().is_empty() {
        bail!("Message can not be empty");
    }

    let (mut store, notice) = open_conversation(gateway).await;
    let reply = store
        .request_assistant_reply(gateway, text.trim())
        .await
        .clone();

    return Ok((notice, reply));
}

async fn training_program(gateway: &dyn Gateway) -> (Option<Notice>, String) {
    match gateway.training_program().await {
        Ok(program) => return (None, format_training_program(program.as_ref())),
        Err(err) => {
            tracing::error!(error = ?err, "Error getting training program");
            return (
                Some(Notice::Alert(TRAINING_PROGRAM_ALERT.to_string())),
                "".to_string(),
            );
        }
    }
}

async fn rest(matches: &ArgMatches) -> Result<()> {
    let seconds = matches
        .get_one::<u64>("seconds")
        .copied()
        .unwrap_or(DEFAULT_REST_SECONDS);
    let total = matches
        .get_one::<u32>("total-sets")
        .copied()
        .unwrap_or(DEFAULT_TOTAL_SETS);
    let current = matches.get_one::<u32>("set").copied().unwrap_or(1);
    let progress = SetProgress::new(current, total);

    println!(
        "세트 {} ({}%)",
        progress.label(),
        progress.percent()
    );

    let mut timer = RestTimer::new(seconds);
    timer
        .run(Duration::from_secs(1), |remaining| {
            print!("\r휴식 {}", format_timer(remaining));
            let _ = io::stdout().flush();
        })
        .await;

    println!(
        "\n{}",
        "휴식 끝! 다음 세트를 시작하세요."
            .if_supports_color(Stream::Stdout, |e| return e.bright_green())
    );

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_login() -> Command {
    return Command::new("login")
        .about("Saves a bearer token used to talk to your coach.")
        .arg(
            Arg::new("token")
                .short('t')
                .long("token")
                .help("Bearer token issued by the coaching service.")
                .num_args(1)
                .required(true),
        );
}

fn subcommand_rest() -> Command {
    return Command::new("rest")
        .about("Counts down the rest between two sets.")
        .arg(
            Arg::new("seconds")
                .short('s')
                .long("seconds")
                .help(format!("Rest duration in seconds. [default: {DEFAULT_REST_SECONDS}]"))
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .help("The set you just finished. [default: 1]")
                .value_parser(value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new("total-sets")
                .long("total-sets")
                .help(format!("Number of sets in the exercise. [default: {DEFAULT_TOTAL_SETS}]"))
                .value_parser(value_parser!(u32).range(1..)),
        );
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") {
                return format!("CHAT {line}").bold().underline().to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("coachbot")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(Command::new("chat").about("Start chatting with your coach."))
        .subcommand(
            Command::new("ask")
                .about("Sends a single message and prints the reply.")
                .arg(Arg::new("text").help("Message to send.").required(true)),
        )
        .subcommand(Command::new("history").about("Prints the conversation history."))
        .subcommand(Command::new("program").about("Prints your training program."))
        .subcommand(subcommand_login())
        .subcommand(Command::new("logout").about("Removes the saved bearer token."))
        .subcommand(subcommand_rest())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .arg(
            Arg::new(ConfigKey::ApiBaseURL.to_string())
                .long(ConfigKey::ApiBaseURL.to_string())
                .env("COACHBOT_API_BASE_URL")
                .num_args(1)
                .help(format!(
                    "Base URL of the coaching assistant service. [default: {}]",
                    Config::default(ConfigKey::ApiBaseURL)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::AuthToken.to_string())
                .long(ConfigKey::AuthToken.to_string())
                .env("COACHBOT_AUTH_TOKEN")
                .num_args(1)
                .help("Bearer token sent with every request. Overrides the token saved with `coachbot login`.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("COACHBOT_CONFIG_FILE")
                .num_args(1)
                .help(format!(
                    "Path to configuration file [default: {}]",
                    Config::default(ConfigKey::ConfigFile)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Username.to_string())
                .short('u')
                .long(ConfigKey::Username.to_string())
                .env("COACHBOT_USERNAME")
                .num_args(1)
                .help("Your name shown next to your messages in the transcript.")
                .global(true),
        );
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("login", subcmd_matches)) => {
            let token = subcmd_matches
                .get_one::<String>("token")
                .map(|e| return e.trim().to_string())
                .unwrap_or_default();
            if token.is_empty() {
                bail!("Token can not be empty");
            }

            let credentials = CredentialStore::default();
            credentials.save(&token).await?;
            println!("Saved token to {}", credentials.file_path().to_string_lossy());
            return Ok(false);
        }
        Some(("logout", _)) => {
            CredentialStore::default().delete().await?;
            println!("Removed saved token");
            return Ok(false);
        }
        Some(("rest", subcmd_matches)) => {
            rest(subcmd_matches).await?;
            return Ok(false);
        }
        Some(("ask", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            let text = subcmd_matches
                .get_one::<String>("text")
                .cloned()
                .unwrap_or_default();
            let (notice, reply) = ask(&HttpGateway::default(), &text).await?;
            print_notice(notice);
            println!("{}", reply.content);
            return Ok(false);
        }
        Some(("history", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            let (store, notice) = open_conversation(&HttpGateway::default()).await;
            print_notice(notice);
            print_transcript(&store);
            return Ok(false);
        }
        Some(("program", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            let (notice, text) = training_program(&HttpGateway::default()).await;
            print_notice(notice);
            if !text.is_empty() {
                println!("{text}");
            }
            return Ok(false);
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
