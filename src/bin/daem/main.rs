//! daem - live effects on the default input device
//!
//! Run with: cargo run -- --mode hall --time 11025

mod args;
mod audio;
mod ui;

use std::path::Path;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use daem::{
    engine::{status::STATUS_RING_CAPACITY, status_channel},
    command_channel, EngineConfig, RenderEngine,
};

use args::{Args, USAGE};
use ui::ControlPanel;

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    // Set RUST_LOG=info for stream details; the TUI owns the screen otherwise.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse(std::env::args().skip(1))?;
    if args.help {
        print!("{}", USAGE);
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    args.apply(&mut config);
    config.validate().wrap_err("invalid engine configuration")?;

    let (mut commands, command_rx) = command_channel(config.command_capacity);
    let (status_tx, status_rx) = status_channel(STATUS_RING_CAPACITY);
    let engine = RenderEngine::new(&config, command_rx)?.with_status(status_tx);

    let streams = audio::start(&config, engine)?;

    let mut terminal = ratatui::init();
    let mut panel = ControlPanel::new(&mut commands, status_rx, streams.xruns(), &config);
    let res = panel.run(&mut terminal);
    ratatui::restore();

    streams.stop()?;
    res
}

fn load_config(path: &Path) -> EyreResult<EngineConfig> {
    log::info!("loading config from {:?}", path);
    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config file {:?}", path))?;
    let config: EngineConfig = serde_yaml::from_str(&contents)
        .wrap_err_with(|| format!("failed to parse config file {:?}", path))?;
    Ok(config)
}
