//! slackdown - Markdown to Slack mrkdwn converter

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::{debug, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

use slackdown::{Options, convert_with, decode_text};

#[derive(Parser)]
#[command(name = "slackdown")]
#[command(version, about = "Convert Markdown to Slack mrkdwn", long_about = None)]
#[command(after_help = "EXAMPLES:
    slackdown notes.md                 Print notes.md as mrkdwn
    cat notes.md | slackdown           Read Markdown from stdin
    slackdown --mentions --json in.md  Emit a Slack message payload")]
struct Cli {
    /// Input Markdown file (stdin when omitted or `-`)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Write output to this file instead of stdout
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Translate @here, @channel and @everyone into Slack mentions
    #[arg(short, long, env = "SLACKDOWN_MENTIONS")]
    mentions: bool,

    /// Custom mention pattern with a `mention` capture group
    #[arg(long, value_name = "REGEX", requires = "mentions")]
    mention_pattern: Option<String>,

    /// Encoding to try when the input is not valid UTF-8
    #[arg(long, value_name = "LABEL")]
    encoding: Option<String>,

    /// Wrap the output in a Slack message payload (`{"text": ...}`)
    #[arg(long)]
    json: bool,

    /// Log rendering details to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct MessagePayload<'a> {
    text: &'a str,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();

    // A second subscriber can only come from tests; ignore that case.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: &Cli) -> Result<(), String> {
    let raw = read_input(cli.input.as_ref()).map_err(|e| format!("reading input: {e}"))?;
    let markdown = decode_text(&raw, cli.encoding.as_deref());
    debug!(bytes = raw.len(), "read input");

    let mut options = Options::new();
    if let Some(pattern) = &cli.mention_pattern {
        options = options.with_mention_pattern(pattern).map_err(|e| e.to_string())?;
    }
    options.mention_translation(cli.mentions);

    let mrkdwn = convert_with(&markdown, &options).map_err(|e| e.to_string())?;

    let rendered = if cli.json {
        let mut json = serde_json::to_string(&MessagePayload { text: &mrkdwn })
            .map_err(|e| format!("encoding payload: {e}"))?;
        json.push('\n');
        json
    } else {
        mrkdwn
    };

    write_output(cli.output.as_ref(), rendered.as_bytes())
        .map_err(|e| format!("writing output: {e}"))
}

fn read_input(path: Option<&PathBuf>) -> io::Result<Vec<u8>> {
    match path {
        Some(path) if path.as_os_str() != "-" => fs::read(path),
        _ => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&PathBuf>, bytes: &[u8]) -> io::Result<()> {
    match path {
        Some(path) => fs::write(path, bytes),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.md");
        let output = dir.path().join("out.txt");
        fs::write(&input, "# Release\n\n@here **v2** is out\n").unwrap();

        let cli = Cli::parse_from([
            "slackdown",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--mentions",
            "--json",
        ]);
        run(&cli).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        let payload: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(payload["text"], "*Release*\n<!here> *v2* is out\n\n");
    }

    #[test]
    fn test_bad_mention_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.md");
        fs::write(&input, "hi").unwrap();

        let cli = Cli::parse_from([
            "slackdown",
            input.to_str().unwrap(),
            "--mentions",
            "--mention-pattern",
            r"@(\w+)",
        ]);
        let err = run(&cli).unwrap_err();
        assert!(err.contains("mention"));
    }
}
