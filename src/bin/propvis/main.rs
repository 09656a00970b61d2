//! propvis CLI - Walk demo objects through property visitors.

mod demo;
mod dump;
mod settings;
mod text;

use std::env;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use propvis::Reflect;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use demo::{Demo, Point, Pointf, SimpleClass};
use settings::Settings;

/// Environment variable holding a log filter
const LOG_ENV: &str = "PROPVIS_LOG";

const SEPARATOR: &str = "<------------------------------------->";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Trace,
}

impl Verbosity {
    fn filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Flags win, then `PROPVIS_LOG`, then the `log_filter` setting.
fn init_tracing(verbosity: Verbosity, settings: &Settings) {
    let fallback = || EnvFilter::new(verbosity.filter());
    let filter = if verbosity != Verbosity::Normal {
        fallback()
    } else if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        filter
    } else if let Some(directives) = settings.log_filter.as_deref() {
        EnvFilter::try_new(directives).unwrap_or_else(|_| fallback())
    } else {
        fallback()
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    // Parse global flags
    let mut verbosity = Verbosity::Normal;
    let mut config_path: Option<PathBuf> = None;
    let mut filtered_args: Vec<&str> = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-v" | "--verbose" => verbosity = Verbosity::Verbose,
            "-vv" | "--trace" => verbosity = Verbosity::Trace,
            "-q" | "--quiet" => verbosity = Verbosity::Quiet,
            "-V" | "--version" => {
                print_version();
                return;
            }
            "--config" => match iter.next() {
                Some(path) => config_path = Some(PathBuf::from(path)),
                None => {
                    eprintln!("Error: --config needs a path");
                    process::exit(1);
                }
            },
            _ => filtered_args.push(arg),
        }
    }

    let settings_path = config_path.or_else(Settings::default_path);
    let (settings, load_error) = match settings_path.as_deref().map(Settings::load_from) {
        Some(Ok(settings)) => (settings, None),
        Some(Err(e)) => (Settings::default(), Some(e)),
        None => (Settings::default(), None),
    };
    init_tracing(verbosity, &settings);
    if let Some(e) = load_error {
        warn!("using default settings: {e:#}");
    }

    if filtered_args.is_empty() {
        print_help();
        return;
    }

    let rest = &filtered_args[1..];
    let result = match filtered_args[0] {
        "dump" | "d" => cmd_dump(rest, &settings),
        "write" | "w" => cmd_write(&settings),
        "text" | "t" => cmd_text(rest),
        "parse" | "p" => cmd_parse(rest),
        "config" | "c" => cmd_config(rest, settings_path.as_deref(), &settings),
        "help" | "h" | "-h" | "--help" => {
            print_help();
            Ok(())
        }
        other => {
            eprintln!("Error: unknown command '{}'", other);
            eprintln!("Run 'propvis help' for usage");
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn print_version() {
    println!(
        "propvis {} (built {} {})",
        env!("CARGO_PKG_VERSION"),
        env!("PROPVIS_BUILD_DATE"),
        env!("PROPVIS_BUILD_TIME")
    );
}

fn print_help() {
    println!("propvis - Property reflection demo");
    println!();
    println!("USAGE:");
    println!("    propvis [OPTIONS] <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    d, dump   [object] [--json]     Dump readable properties of a demo object");
    println!("    w, write                        Overwrite every writable property of SimpleClass");
    println!("    t, text   [point|pointf] [x y]  Print text form and parse it back");
    println!("    p, parse  <point|pointf> <text> Parse text into a fresh object");
    println!("    c, config [--init]              Show settings, or write the defaults");
    println!("    h, help                         Show this help");
    println!();
    println!("OBJECTS:");
    println!("    simple, point, pointf");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose      Show debug output");
    println!("    -vv, --trace       Show trace output (every visited property)");
    println!("    -q, --quiet        Only show errors");
    println!("    --config <path>    Use this settings file");
    println!("    -V, --version      Show version and build date");
    println!();
    println!("EXAMPLES:");
    println!("    propvis dump simple                          # Categories and values");
    println!("    propvis dump point --json                    # Values as JSON");
    println!("    propvis text pointf 5 4                      # Text round trip");
    println!("    propvis parse point \"ClassName: Point, x: 1, y: 2, \"");
    println!();
    println!("NOTES:");
    println!("    - {} overrides the log filter when no -v/-q flag is given", LOG_ENV);
}

fn demo_by_name(name: &str) -> Result<Demo> {
    Demo::by_name(name).with_context(|| {
        format!(
            "unknown object '{}' (expected one of: {})",
            name,
            Demo::NAMES.join(", ")
        )
    })
}

fn cmd_dump(args: &[&str], settings: &Settings) -> Result<()> {
    let json_mode = args.iter().any(|&s| s == "--json" || s == "-j");
    let name = args
        .iter()
        .copied()
        .find(|s| !s.starts_with('-'))
        .unwrap_or(settings.default_object.as_str());
    let demo = demo_by_name(name)?;

    if json_mode {
        let json = dump::dump_json(demo.as_reflect());
        let out = if settings.json_pretty {
            serde_json::to_string_pretty(&json)?
        } else {
            serde_json::to_string(&json)?
        };
        println!("{}", out);
    } else {
        for line in dump::dump_lines(demo.as_reflect(), settings.hex_i16) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_write(settings: &Settings) -> Result<()> {
    let mut simple = SimpleClass::default();
    for line in dump::dump_lines(&simple, settings.hex_i16) {
        println!("{}", line);
    }
    println!("\n{}\n", SEPARATOR);

    for name in dump::write_demo(&mut simple) {
        println!("Writing new value to: [{}]", name);
    }
    println!("\n{}\n", SEPARATOR);

    for line in dump::dump_lines(&simple, settings.hex_i16) {
        println!("{}", line);
    }
    Ok(())
}

fn coords<T>(args: &[&str], default: (T, T)) -> Result<(T, T)>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match args {
        [] => Ok(default),
        [x, y] => Ok((
            x.parse().with_context(|| format!("bad x: {}", x))?,
            y.parse().with_context(|| format!("bad y: {}", y))?,
        )),
        _ => bail!("expected two coordinates, got {}", args.len()),
    }
}

fn round_trip<T: Reflect + Default + PartialEq + Debug>(source: T) -> Result<()> {
    let line = text::to_text(&source);
    println!("{}", line);

    let mut parsed = T::default();
    text::from_text(&mut parsed, &line)?;
    println!("{}", text::to_text(&parsed));
    if parsed != source {
        bail!("round trip changed the object: {:?} != {:?}", parsed, source);
    }
    Ok(())
}

fn cmd_text(args: &[&str]) -> Result<()> {
    let (kind, coord_args) = match args.split_first() {
        Some((kind, rest)) => (*kind, rest),
        None => ("point", args),
    };
    match kind {
        "point" | "p" => {
            let (x, y) = coords(coord_args, (5, 4))?;
            round_trip(Point::new(x, y))
        }
        "pointf" | "pf" => {
            let (x, y) = coords(coord_args, (5.0, 4.0))?;
            round_trip(Pointf::new(x, y))
        }
        other => bail!("text form is only defined for point and pointf, not '{}'", other),
    }
}

fn cmd_parse(args: &[&str]) -> Result<()> {
    let [kind, words @ ..] = args else {
        bail!("usage: propvis parse <point|pointf> <text>");
    };
    if words.is_empty() {
        bail!("missing text to parse");
    }
    let mut demo = demo_by_name(kind)?;
    if !demo.has_text_form() {
        bail!("text form is only defined for point and pointf, not '{}'", kind);
    }
    text::from_text(demo.as_reflect_mut(), &words.join(" "))?;
    println!("{}", text::to_text(demo.as_reflect()));
    Ok(())
}

fn cmd_config(args: &[&str], path: Option<&Path>, settings: &Settings) -> Result<()> {
    let path = path.context("no configuration directory on this platform")?;
    if args.iter().any(|&s| s == "--init") {
        Settings::default().save_to(path)?;
        println!("Wrote default settings to {}", path.display());
        return Ok(());
    }
    println!("{}", path.display());
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}
