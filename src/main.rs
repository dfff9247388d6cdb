//! Liminal CLI - drives a transition bridge with the keyword demo judge
//!
//! Usage:
//!   liminal --text "your text here"         # Single judgment
//!   liminal --interactive                   # Line-by-line session
//!   liminal --text "text" --json            # JSON output
//!   liminal --dump-config                   # Print default config as TOML
//!   liminal --config liminal.toml --log-dir ./logs

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use liminal::config::LiminalConfig;
use liminal::core::{DemoJudge, TransitionBridge};
use liminal::types::{BridgeResponse, BridgeState, ResponseSource};
use liminal::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "liminal",
    version = VERSION,
    about = "Liminal - meta-supervised judgment with an existence-flow fallback",
    long_about = "Liminal watches each judgment with five observers and scores how close\n\
                  the judge is to collapse. Past the threshold the bridge leaves judgment\n\
                  mode and hands the conversation to the existence flow\n\
                  (Warden -> Selene -> Mirrorless) until it returns.\n\n\
                  Interactive commands:\n  \
                  status   - print bridge status\n  \
                  return   - force return to judgment mode\n  \
                  quit     - end the session"
)]
struct Args {
    /// Text to judge (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Interactive mode - read lines from stdin
    #[arg(short, long)]
    interactive: bool,

    /// TOML config file (defaults when missing)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the audit trail, written on exit
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Print the default configuration and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "liminal=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    if args.dump_config {
        print!("{}", LiminalConfig::default().to_toml());
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => LiminalConfig::load(path),
        None => LiminalConfig::default(),
    };

    let mut bridge = TransitionBridge::new(config);

    if args.interactive {
        run_interactive(&mut bridge, &args)?;
    } else if let Some(ref text) = args.text {
        run_single(&mut bridge, text, &args)?;
    } else {
        // Default to interactive if no mode specified
        run_interactive(&mut bridge, &args)?;
    }

    if let Some(dir) = &args.log_dir {
        let paths = bridge
            .flush_audit(dir)
            .with_context(|| format!("writing audit trail to {}", dir.display()))?;
        eprintln!("Audit trail saved: {}", paths.transitions.display());
    }

    Ok(())
}

/// One judgment; follows the existence flow once if it opened
fn run_single(bridge: &mut TransitionBridge, text: &str, args: &Args) -> Result<()> {
    let response = bridge.process_judgment(text, &DemoJudge);
    print_response(&response, args)?;

    if response.should_continue_existence {
        let continuation = bridge.continue_existence_flow("계속해주세요");
        print_response(&continuation, args)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&bridge.status())?);
    } else {
        print_status_line(bridge);
    }
    Ok(())
}

fn run_interactive(bridge: &mut TransitionBridge, args: &Args) -> Result<()> {
    print_header();
    println!("Type text and press Enter. Commands: status, return, quit");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", format_prompt(bridge.state()));
        stdout.flush()?;

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        match line {
            "" => continue,
            "quit" | "exit" => {
                println!();
                print_status_line(bridge);
                break;
            }
            "status" => {
                println!("{}", serde_json::to_string_pretty(&bridge.status())?);
                continue;
            }
            "return" => {
                bridge.force_return_to_judgment();
                println!("{}", "Returned to judgment mode".dimmed());
                continue;
            }
            _ => {}
        }

        let response = if bridge.state() == BridgeState::ExistenceFlow {
            bridge.continue_existence_flow(line)
        } else {
            bridge.process_judgment(line, &DemoJudge)
        };
        print_response(&response, args)?;
    }
    Ok(())
}

fn print_header() {
    println!();
    println!("{}", "══════════════════════════════════════════════".cyan());
    println!("  {}  v{}", "LIMINAL BRIDGE".bold(), VERSION);
    println!("{}", "══════════════════════════════════════════════".cyan());
    println!();
}

fn format_prompt(state: BridgeState) -> String {
    let label = format!("[{}]", state);
    let label = if state.is_existence_side() {
        label.magenta()
    } else if state == BridgeState::ErrorState {
        label.red()
    } else {
        label.green()
    };
    format!("{} > ", label)
}

fn print_response(response: &BridgeResponse, args: &Args) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string(response)?);
        return Ok(());
    }

    let source = match response.source {
        ResponseSource::Judgment => "judgment".green(),
        ResponseSource::Meta => "meta".yellow(),
        ResponseSource::Existence => "existence".magenta(),
        ResponseSource::System => "system".red(),
    };
    let speaker = response
        .existence_response
        .as_ref()
        .map(|r| format!(" {}", r.entity))
        .unwrap_or_default();

    println!("{}{} {}", source, speaker.bold(), response.content);

    if response.transition_occurred {
        println!("{}", "  ↳ liminal transition: entered existence flow".magenta());
    }
    if !response.meta_actions.is_empty() {
        println!("{}", format!("  meta: {}", response.meta_actions.keys().join(", ")).dimmed());
    }
    if response.should_continue_existence {
        println!("{}", "  existence flow continues...".dimmed());
    }
    Ok(())
}

fn print_status_line(bridge: &TransitionBridge) {
    let status = bridge.status();
    println!(
        "{}",
        format!(
            "state={} transitions={} success={:.1}%",
            status.current_state, status.total_transitions, status.transition_success_rate
        )
        .dimmed()
    );
}
