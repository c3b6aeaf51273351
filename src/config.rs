use anyhow::Result;
use clap::{builder::NonEmptyStringValueParser, ArgAction};
use clap_complete::Shell;
use std::sync::OnceLock;

#[derive(Debug)]
pub struct ConfigInner {
    pub log_level: tracing::Level,
    pub target: String,
    pub wait: bool,
    pub background: bool,
    pub url: bool,
    pub app: Option<String>,
    pub app_args: Vec<String>,
}

const fn const_unwrap_or(opt: Option<&'static str>, default: &'static str) -> &'static str {
    match opt {
        Some(x) => x,
        None => default,
    }
}

fn wrap_at(s: &str, at: usize) -> String {
    let words = s.split(&[' ', '\t']).filter(|l| !l.is_empty());
    let mut wrapped = vec![];
    let mut line = String::new();
    for w in words {
        if !line.is_empty() && line.len() + w.len() >= at {
            wrapped.push(line);
            line = "".into()
        }
        line = line + w + " ";
    }
    wrapped.push(line);
    wrapped.join("\n")
}

fn wrap_help(s: &str) -> String {
    wrap_at(s, 70)
}

pub type Config = std::sync::Arc<ConfigInner>;

pub(crate) const VERSION: &str = clap::crate_version!();
pub(crate) const COMMIT_HASH: &str = const_unwrap_or(option_env!("COMMIT_HASH"), "deadbeef");
pub(crate) const FULL_VERSION: &str = const_format::formatcp!("{} {}", VERSION, COMMIT_HASH);

fn cli() -> clap::Command {
    clap::command!()
        .version(FULL_VERSION)
        .args(&[
            clap::Arg::new("target")
                .help(wrap_help("File path or URL to open"))
                .required_unless_present("print-completions")
                .value_parser(NonEmptyStringValueParser::new()),
            clap::Arg::new("log")
                .long("log")
                .help(wrap_help("Log level"))
                .value_parser(clap::value_parser!(tracing::Level))
                .default_value(tracing::Level::ERROR.as_str()),
            clap::Arg::new("wait")
                .long("wait")
                .help(wrap_help(
                    "Wait for the opened application to exit and report its failure",
                ))
                .action(ArgAction::SetTrue),
            clap::Arg::new("background")
                .long("background")
                .help(wrap_help(
                    "Do not bring the opened application to the foreground (macOS only)",
                ))
                .action(ArgAction::SetTrue),
            clap::Arg::new("url")
                .long("url")
                .help(wrap_help(
                    "Percent-encode the target as a URI before opening it",
                ))
                .action(ArgAction::SetTrue),
            clap::Arg::new("app")
                .long("app")
                .help(wrap_help(
                    "Open the target with this application instead of the default handler",
                ))
                .value_parser(NonEmptyStringValueParser::new()),
            clap::Arg::new("app-arg")
                .long("app-arg")
                .value_name("ARG")
                .help(wrap_help(
                    "Extra argument forwarded to the application given with --app",
                ))
                .requires("app")
                .action(ArgAction::Append)
                .num_args(1),
            clap::Arg::new("print-completions")
                .long("print-completions")
                .value_name("SHELL")
                .help("Print shell completions.")
                .value_parser(clap::value_parser!(clap_complete::Shell)),
        ])
}

fn new() -> Result<Config> {
    let args = cli().get_matches();

    if let Some(shell) = args.get_one::<Shell>("print-completions").copied() {
        let mut cmd = cli();
        eprintln!("Generating completion file for {shell}...");
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        std::process::exit(0);
    }

    let config = ConfigInner {
        log_level: *args.get_one("log").unwrap_or(&tracing::Level::INFO),
        target: args.get_one::<String>("target").unwrap().clone(),
        wait: args.get_flag("wait"),
        background: args.get_flag("background"),
        url: args.get_flag("url"),
        app: args.get_one::<String>("app").cloned(),
        app_args: args
            .get_many::<String>("app-arg")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
    };
    Ok(std::sync::Arc::new(config))
}

pub(crate) fn app_config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(|| self::new().unwrap())
}

pub(crate) fn parse_args() -> &'static Config {
    app_config()
}
