//! Command line flags.

use std::path::PathBuf;

use color_eyre::eyre::{bail, eyre, Result as EyreResult, WrapErr};
use daem::engine::{EffectFlags, EngineConfig};

pub const USAGE: &str = "\
daem - live input effects: filter bank, delay and hall feedback

USAGE:
    daem [OPTIONS]

OPTIONS:
    --mode <delay|hall>   Feedback mode enabled at start (default: delay)
    --time <samples>      Delay length in samples (default: 22050)
    --filter              Start with the filter bank enabled
    --config <file>       Load engine settings from a YAML file
    --help                Print this help
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Delay,
    Hall,
}

#[derive(Debug, Default, PartialEq)]
pub struct Args {
    pub mode: Option<Mode>,
    pub time: Option<usize>,
    pub filter: bool,
    pub config: Option<PathBuf>,
    pub help: bool,
}

impl Args {
    pub fn parse<I>(args: I) -> EyreResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Args::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" | "-h" => parsed.help = true,
                "--filter" => parsed.filter = true,
                "--mode" => {
                    let value = args.next().ok_or_else(|| eyre!("--mode needs a value"))?;
                    parsed.mode = Some(parse_mode(&value)?);
                }
                "--time" => {
                    let value = args.next().ok_or_else(|| eyre!("--time needs a value"))?;
                    let samples = value
                        .parse::<usize>()
                        .wrap_err_with(|| format!("invalid --time value {:?}", value))?;
                    parsed.time = Some(samples);
                }
                "--config" => {
                    let value = args.next().ok_or_else(|| eyre!("--config needs a path"))?;
                    parsed.config = Some(PathBuf::from(value));
                }
                other => bail!("unknown argument {:?}\n\n{}", other, USAGE),
            }
        }

        Ok(parsed)
    }

    /// Flags given on the command line win over the config file.
    pub fn apply(&self, config: &mut EngineConfig) {
        if let Some(mode) = self.mode {
            let filter = config.effects.filter;
            config.effects = EffectFlags {
                filter,
                delay: mode == Mode::Delay,
                hall: mode == Mode::Hall,
            };
        }
        if let Some(time) = self.time {
            config.delay_samples = time;
        }
        if self.filter {
            config.effects.filter = true;
        }
    }
}

fn parse_mode(value: &str) -> EyreResult<Mode> {
    match value.to_ascii_lowercase().as_str() {
        "delay" => Ok(Mode::Delay),
        "hall" => Ok(Mode::Hall),
        _ => bail!("unknown mode {:?}, expected delay or hall", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daem::engine::ConfigError;

    fn parse(args: &[&str]) -> EyreResult<Args> {
        Args::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_mode_time_and_filter() {
        let args = parse(&["--mode", "HALL", "--time", "4800", "--filter"]).unwrap();
        assert_eq!(args.mode, Some(Mode::Hall));
        assert_eq!(args.time, Some(4800));
        assert!(args.filter);

        let mut config = EngineConfig::default();
        args.apply(&mut config);
        assert!(config.effects.hall);
        assert!(!config.effects.delay);
        assert!(config.effects.filter);
        assert_eq!(config.delay_samples, 4800);
    }

    #[test]
    fn no_flags_keep_config() {
        let args = parse(&[]).unwrap();
        let mut config = EngineConfig::default();
        args.apply(&mut config);
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn oversized_delay_fails_validation() {
        let args = parse(&["--time", "99999999999"]).unwrap();
        let mut config = EngineConfig::default();
        args.apply(&mut config);
        assert!(matches!(config.validate(), Err(ConfigError::DelayTooLong { .. })));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&["--mode", "echo"]).is_err());
        assert!(parse(&["--time", "soon"]).is_err());
        assert!(parse(&["--time"]).is_err());
        assert!(parse(&["--loud"]).is_err());
    }
}
