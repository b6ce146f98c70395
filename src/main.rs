// Inherit lint configuration from lib.rs for consistency
#![allow(clippy::missing_errors_doc, clippy::needless_pass_by_value)]

use std::path::Path;

use clap::Parser;

use edunarrator::cli::commands::{Cli, Command};
use edunarrator::cli::output::{self, ExtractOutput, NarrateOutput, VoiceEntry, VoicesOutput};
use edunarrator::config::Config;
use edunarrator::ingest::clean::clean_text;
use edunarrator::ingest::Dispatcher;
use edunarrator::pipeline::Pipeline;
use edunarrator::server;
use edunarrator::speech::VoiceTones;

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays machine-readable JSON.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::fmt::Display>> {
    let config = Config::resolve(cli.config.as_deref()).map_err(map_err)?;
    match cli.command {
        Command::Serve { host, port } => cmd_serve(config, host, port),
        Command::Process { path, tone } => cmd_process(&config, &path, tone.as_deref()),
        Command::Extract { path, clean } => cmd_extract(&path, clean),
        Command::Narrate { path, tone } => cmd_narrate(&config, &path, tone.as_deref()),
        Command::Voices => cmd_voices(&config),
        Command::InitConfig { force } => cmd_init_config(&config, force),
    }
}

type CmdResult = Result<(), Box<dyn std::fmt::Display>>;

fn map_err(e: impl std::fmt::Display + 'static) -> Box<dyn std::fmt::Display> {
    Box::new(e.to_string())
}

fn runtime() -> Result<tokio::runtime::Runtime, Box<dyn std::fmt::Display>> {
    tokio::runtime::Runtime::new().map_err(map_err)
}

fn resolve_tone<'a>(config: &'a Config, tone: Option<&'a str>) -> &'a str {
    tone.unwrap_or(&config.settings.speech.default_tone)
}

fn cmd_serve(mut config: Config, host: Option<String>, port: Option<u16>) -> CmdResult {
    if let Some(host) = host {
        config.settings.server.host = host;
    }
    if let Some(port) = port {
        config.settings.server.port = port;
    }
    runtime()?
        .block_on(server::serve(config))
        .map_err(map_err)
}

fn cmd_process(config: &Config, path: &Path, tone: Option<&str>) -> CmdResult {
    let pipeline = Pipeline::from_config(config).map_err(map_err)?;
    let tone = resolve_tone(config, tone);
    let pack = runtime()?
        .block_on(pipeline.process_file(path, tone))
        .map_err(map_err)?;
    println!("{}", output::format_json(&pack));
    Ok(())
}

fn cmd_extract(path: &Path, clean: bool) -> CmdResult {
    let text = Dispatcher::new().extract(path).map_err(map_err)?;
    let text = if clean { clean_text(&text) } else { text };
    let out = ExtractOutput {
        path: path.to_string_lossy().into_owned(),
        chars: text.chars().count(),
        text,
    };
    println!("{}", output::format_json(&out));
    Ok(())
}

fn cmd_narrate(config: &Config, path: &Path, tone: Option<&str>) -> CmdResult {
    let pipeline = Pipeline::from_config(config).map_err(map_err)?;
    let tone = resolve_tone(config, tone);
    let audio = runtime()?
        .block_on(pipeline.narrate_file(path, tone))
        .map_err(map_err)?;
    let out = NarrateOutput {
        chunks: audio.len(),
        audio,
    };
    println!("{}", output::format_json(&out));
    Ok(())
}

fn cmd_voices(config: &Config) -> CmdResult {
    let tones = VoiceTones::from_settings(&config.settings.voices, &config.settings.speech);
    let out = VoicesOutput {
        voices: tones
            .labels()
            .into_iter()
            .map(|tone| VoiceEntry {
                tone: tone.to_string(),
                voice_id: tones.voice_id(tone).to_string(),
            })
            .collect(),
        default: tones.default_tone().to_string(),
    };
    println!("{}", output::format_json(&out));
    Ok(())
}

fn cmd_init_config(config: &Config, force: bool) -> CmdResult {
    if config.config_path.exists() && !force {
        return Err(map_err(format!(
            "{} already exists (use --force to overwrite)",
            config.config_path.display()
        )));
    }
    config.save_settings().map_err(map_err)?;
    println!(
        "{}",
        output::format_json(&serde_json::json!({ "written": config.config_path }))
    );
    Ok(())
}
