//! printparts command line: list the parts, build them and export the results.

use printparts::config::{ConfigError, DEFAULT_CONFIG_FILE, PartsConfig};
use printparts::io::{ExportFormat, export_model};
use printparts::parts::{self, Part, Quality};
use printparts::{Error, ModelError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

const USAGE: &str = "\
usage: printparts list
       printparts build <part>... [options]
       printparts build-all [options]

options:
  --out DIR         output directory (default from config, else ./out)
  --config FILE     RON config file (default ./printparts.ron)
  --format F        step, stl, stl-ascii or 3mf; repeat for several
  --segments N      segments per full circle";

#[derive(Debug, PartialEq)]
enum Command {
    List,
    Build(Vec<String>),
    BuildAll,
}

#[derive(Debug, Default, PartialEq)]
struct Options {
    out: Option<PathBuf>,
    config: Option<PathBuf>,
    formats: Vec<ExportFormat>,
    segments: Option<usize>,
}

fn parse_args<I>(args: I) -> Result<(Command, Options), String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let command = args.next().ok_or("missing command")?;
    let mut names = Vec::new();
    let mut options = Options::default();

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| args.next().ok_or(format!("{flag} needs a value"));
        match arg.as_str() {
            "--out" => options.out = Some(PathBuf::from(value("--out")?)),
            "--config" => options.config = Some(PathBuf::from(value("--config")?)),
            "--format" => {
                let format = value("--format")?;
                options.formats.push(format.parse().map_err(|e| format!("{e}"))?);
            },
            "--segments" => {
                let segments = value("--segments")?;
                let segments = segments
                    .parse()
                    .map_err(|_| format!("--segments expects a whole number, got {segments}"))?;
                options.segments = Some(segments);
            },
            flag if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
            _ => names.push(arg),
        }
    }

    let command = match command.as_str() {
        "list" | "build-all" if !names.is_empty() => {
            return Err(format!("{command} takes no part names"));
        },
        "list" => Command::List,
        "build-all" => Command::BuildAll,
        "build" if names.is_empty() => return Err("build needs at least one part name".into()),
        "build" => Command::Build(names),
        other => return Err(format!("unknown command {other}")),
    };
    Ok((command, options))
}

fn load_config(options: &Options) -> Result<PartsConfig, ConfigError> {
    let mut config = match &options.config {
        Some(path) => PartsConfig::load(path)?,
        None => PartsConfig::load_or_default(DEFAULT_CONFIG_FILE)?,
    };
    if let Some(out) = &options.out {
        config.output_dir = out.clone();
    }
    if !options.formats.is_empty() {
        config.formats = options.formats.clone();
    }
    if let Some(segments) = options.segments {
        config.segments = segments;
    }
    Ok(config)
}

fn build_and_export(part: &dyn Part, config: &PartsConfig, quality: &Quality) -> Result<(), Error> {
    info!(part = part.name(), segments = quality.segments, "building");
    let mesh = part.build(quality)?;
    info!(part = part.name(), triangles = mesh.triangle_count(), volume = mesh.volume(), "built");
    export_model(&mesh, part.name(), &config.output_dir, &config.formats)?;
    Ok(())
}

fn run(command: Command, options: &Options) -> Result<(), Error> {
    if command == Command::List {
        for part in parts::catalog() {
            println!("{:<24} {}", part.name(), part.description());
        }
        return Ok(());
    }

    let config = load_config(options)?;
    let quality = config.quality();
    let catalog = parts::catalog_with(&config)?;

    match command {
        Command::Build(names) => {
            for name in &names {
                let part = parts::find(&catalog, name).ok_or_else(|| ConfigError::UnknownPart(name.clone()))?;
                build_and_export(part, &config, &quality)?;
            }
        },
        Command::BuildAll => {
            for part in &catalog {
                match build_and_export(part.as_ref(), &config, &quality) {
                    Err(Error::Model(ModelError::MissingInput(reason))) => {
                        warn!(part = part.name(), %reason, "skipped");
                    },
                    other => other?,
                }
            }
        },
        Command::List => {},
    }
    Ok(())
}

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let (command, options) = match parse_args(std::env::args().skip(1)) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{message}\n\n{USAGE}");
            return ExitCode::from(2);
        },
    };

    match run(command, &options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn parses_build_with_options() {
        let (command, options) =
            parse_args(args("build gear_slotter wl_1865 --out parts --format stl --format 3mf --segments 32")).unwrap();
        assert_eq!(command, Command::Build(vec!["gear_slotter".into(), "wl_1865".into()]));
        assert_eq!(options.out, Some(PathBuf::from("parts")));
        assert_eq!(options.formats, vec![ExportFormat::Stl, ExportFormat::ThreeMf]);
        assert_eq!(options.segments, Some(32));
    }

    #[test]
    fn rejects_bad_invocations() {
        assert!(parse_args(args("")).is_err());
        assert!(parse_args(args("build")).is_err());
        assert!(parse_args(args("list extra")).is_err());
        assert!(parse_args(args("build-all --segments many")).is_err());
        assert!(parse_args(args("build x --colour red")).is_err());
        assert!(parse_args(args("build x --format obj")).is_err());
    }
}
