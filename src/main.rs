use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use itertools::Itertools;
use log::{debug, info};
use rayon::prelude::*;

use sfrand::{config::GeneratorConfig, pool, PoolKind, Randomizer, Randomness};

fn cli() -> Command {
    Command::new("sfrand")
        .about("Secure-first random values with a seeded fallback")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file")
                .action(ArgAction::Set)
                .global(true),
        )
        .arg(
            Arg::new("count")
                .short('n')
                .long("count")
                .value_name("N")
                .help("How many values to generate")
                .value_parser(value_parser!(usize))
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enables debug logging")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("int")
                .about("Uniform integers in [min, max]")
                .arg(
                    Arg::new("min")
                        .long("min")
                        .value_parser(value_parser!(i64))
                        .allow_negative_numbers(true),
                )
                .arg(
                    Arg::new("max")
                        .long("max")
                        .value_parser(value_parser!(i64))
                        .allow_negative_numbers(true),
                ),
        )
        .subcommand(
            Command::new("bytes").about("Random bytes as hex").arg(
                Arg::new("len")
                    .long("len")
                    .value_parser(value_parser!(usize)),
            ),
        )
        .subcommand(Command::new("bool").about("Random booleans"))
        .subcommand(
            Command::new("string")
                .about("Strings sampled from a character pool")
                .arg(
                    Arg::new("length")
                        .long("length")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("pool")
                        .long("pool")
                        .value_name("NAME")
                        .value_parser(|s: &str| s.parse::<PoolKind>()),
                ),
        )
        .subcommand(Command::new("pools").about("Lists the available character pools"))
}

fn load_config(args: &ArgMatches) -> Result<GeneratorConfig> {
    let mut config = match args.get_one::<String>("config") {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };

    if let Some(count) = args.get_one::<usize>("count") {
        config.count = *count;
    }

    Ok(config)
}

/// Draws `count` values in parallel, one per line.
fn generate<F>(count: usize, draw: F) -> String
where
    F: Fn() -> String + Sync + Send,
{
    let values: Vec<String> = (0..count).into_par_iter().map(|_| draw()).collect();
    values.iter().join("\n")
}

fn list_pools() -> String {
    PoolKind::ALL
        .iter()
        .map(|kind| {
            let chars = kind.chars();
            format!("{:<24}{:>4}  {}", kind, chars.len(), chars.iter().collect::<String>())
        })
        .join("\n")
}

fn main() -> Result<()> {
    let args = cli().get_matches();
    let (command, sub_args) = args
        .subcommand()
        .ok_or_else(|| anyhow::anyhow!("a subcommand is required"))?;

    env_logger::Builder::from_default_env()
        .filter_level(if sub_args.get_flag("verbose") {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let config = load_config(sub_args)?;
    debug!("{:?}", config);

    let randomizer = Randomizer::new();

    let output = match command {
        "int" => {
            let min = sub_args.get_one::<i64>("min").copied().unwrap_or(config.min);
            let max = sub_args.get_one::<i64>("max").copied().unwrap_or(config.max);
            randomizer.try_int(min, max)?;
            generate(config.count, || randomizer.int(min, max).to_string())
        }
        "bytes" => {
            let len = sub_args.get_one::<usize>("len").copied().unwrap_or(config.bytes);
            generate(config.count, || {
                randomizer
                    .bytes(len)
                    .iter()
                    .map(|b| format!("{:02x}", b))
                    .join("")
            })
        }
        "bool" => generate(config.count, || randomizer.bool().to_string()),
        "string" => {
            let length = sub_args
                .get_one::<usize>("length")
                .copied()
                .unwrap_or(config.length);
            let kind = sub_args
                .get_one::<PoolKind>("pool")
                .copied()
                .unwrap_or(config.pool);
            let chars = kind.chars();
            debug!(
                "{} chars from `{}` pool carry {:.1} bits",
                length,
                kind,
                pool::entropy_bits(chars.len(), length)
            );
            generate(config.count, || randomizer.string(length, &chars))
        }
        "pools" => list_pools(),
        other => anyhow::bail!("unknown subcommand `{}`", other),
    };

    println!("{}", output);
    info!("generated {} value(s) with `{}`", config.count, command);

    Ok(())
}
