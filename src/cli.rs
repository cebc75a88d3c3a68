//! Command line options and logging setup for the `lweight` binary.

use crate::model::definition::NetworkDefinition;
use crate::model::directed::BayesianNetwork;
use crate::scenarios;
use crate::trials::run_trials;
use crate::util::{LwError, Result};
use crate::variable::{Assignment, Evidence};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use env_logger::{Builder, Env};
use itertools::Itertools;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use std::io::{self, Write};
use std::path::PathBuf;

/// The sample counts used by `--sweep`
pub const SWEEP: [usize; 4] = [10, 100, 500, 1000];

/// These options define the inputs from the user.
#[derive(Clone, Debug, PartialEq)]
pub struct CommandLineOptions {

    /// The sample counts to run, one report each
    pub sample_counts: Vec<usize>,

    /// Independent estimates per sample count
    pub trials: usize,

    /// Seed for the random number generator. Unseeded runs use entropy from the OS.
    pub seed: Option<u64>,

    /// Decimal places used when printing the average posterior
    pub precision: usize,

    /// A JSON network definition. `None` selects the built-in sprinkler network.
    pub network: Option<PathBuf>,

    /// The query variable
    pub query: String,

    /// The observed values. `None` selects the default evidence of the built-in network.
    pub evidence: Option<Evidence>

}

fn command() -> Command {
    Command::new("lweight")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Estimates P(query | evidence) in a Bayesian network by likelihood weighting.")
        .arg(
            Arg::new("samples")
                .value_name("SAMPLES")
                .help("Weighted samples per estimate")
                .value_parser(value_parser!(usize))
                .default_value("10"),
        )
        .arg(
            Arg::new("sweep")
                .long("sweep")
                .help("Run with 10, 100, 500 and 1000 samples per estimate")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("trials")
                .long("trials")
                .value_name("NUMBER")
                .help("Independent estimates per sample count")
                .value_parser(value_parser!(usize))
                .default_value("1000"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("NUMBER")
                .help("Seed for the random number generator")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("precision")
                .long("precision")
                .value_name("PLACES")
                .help("Decimal places of the reported average")
                .value_parser(value_parser!(usize))
                .default_value("4"),
        )
        .arg(
            Arg::new("network")
                .long("network")
                .value_name("PATH")
                .help("JSON network definition (default: the sprinkler network)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("query")
                .long("query")
                .value_name("NAME")
                .help("The query variable")
                .default_value("cloudy"),
        )
        .arg(
            Arg::new("evidence")
                .long("evidence")
                .value_name("NAME=BOOL")
                .help("An observed value; may be repeated")
                .action(ArgAction::Append),
        )
}

/// Parse a single `name=true` / `name=false` observation
pub fn parse_observation(s: &str) -> Result<(String, bool)> {
    let invalid = || LwError::InvalidArgument(format!("expected NAME=true or NAME=false, got `{}`", s));

    let (name, value) = s.split_once('=').ok_or_else(invalid)?;
    let value = value.trim().parse::<bool>().map_err(|_| invalid())?;
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid());
    }

    Ok((String::from(name), value))
}

/// Turn parsed arguments into `CommandLineOptions`
pub fn options_from_matches(matches: &ArgMatches) -> Result<CommandLineOptions> {
    let sample_counts = if matches.get_flag("sweep") {
        SWEEP.to_vec()
    } else {
        vec![*matches.get_one::<usize>("samples").unwrap_or(&10)]
    };

    let evidence = match matches.get_many::<String>("evidence") {
        Some(values) => Some(values.map(|s| parse_observation(s)).collect::<Result<Assignment>>()?),
        None => None
    };

    Ok(CommandLineOptions {
        sample_counts,
        trials: *matches.get_one::<usize>("trials").unwrap_or(&1000),
        seed: matches.get_one::<u64>("seed").cloned(),
        precision: *matches.get_one::<usize>("precision").unwrap_or(&4),
        network: matches.get_one::<PathBuf>("network").cloned(),
        query: matches.get_one::<String>("query").cloned().unwrap_or_else(|| String::from("cloudy")),
        evidence
    })
}

/// Initialize logging and parse the process arguments. Exits with a usage message on invalid
/// arguments.
pub fn parse_configuration_options() -> CommandLineOptions {
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            let file = record.file().unwrap_or("unknown");
            let line = record.line().unwrap_or(0);
            writeln!(buf, "{} [{}:{}] {}", record.level(), file, line, record.args())
        })
        .init();

    let mut cmd = command();
    let matches = cmd.get_matches_mut();

    match options_from_matches(&matches) {
        Ok(options) => options,
        Err(e) => cmd.error(clap::error::ErrorKind::InvalidValue, e.to_string()).exit()
    }
}

/// The network and evidence selected by `options`
fn load_network(options: &CommandLineOptions) -> Result<(BayesianNetwork, Evidence)> {
    match options.network {
        Some(ref path) => {
            let model = NetworkDefinition::from_path(path)?.build()?;
            info!("loaded network with {} nodes from {}", model.nodes().count(), path.display());
            Ok((model, options.evidence.clone().unwrap_or_default()))
        },
        None => {
            let evidence = options.evidence.clone().unwrap_or_else(scenarios::sprinkler_evidence);
            Ok((scenarios::sprinkler()?, evidence))
        }
    }
}

fn report_error(e: io::Error) -> LwError {
    LwError::Report(e.to_string())
}

/// Run every configured sample count and write the report to `out`.
///
/// For each sample count the report holds the count, a progress dot every 10 trials, and the
/// mean and variance of the estimated ```P(query | evidence)```.
///
/// # Errors
/// * any error from loading the network or running the trials
/// * `LwError::Report` if `out` cannot be written
pub fn run<W: Write>(options: &CommandLineOptions, out: &mut W) -> Result<()> {
    let (model, evidence) = load_network(options)?;

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy()
    };

    let given = evidence.iter().map(|(name, value)| format!("{} = {}", name, value)).join(", ");
    let header = if given.is_empty() {
        format!("P ( {} )", options.query)
    } else {
        format!("P ( {} | {} )", options.query, given)
    };

    for &n in options.sample_counts.iter() {
        writeln!(out, "n = {}", n).map_err(report_error)?;

        let mut written = Ok(());
        let summary = run_trials(&model, &options.query, &evidence, n, options.trials, &mut rng, |i| {
            if (i - 1) % 10 == 0 && written.is_ok() {
                written = write!(out, ".").and_then(|_| out.flush());
            }
        })?;
        written.map_err(report_error)?;

        writeln!(out).map_err(report_error)?;
        writeln!(out, "{}", header).map_err(report_error)?;
        writeln!(out, "{}", "=".repeat(header.len())).map_err(report_error)?;
        writeln!(out, "Average (true, false): {:.*}", options.precision, summary.mean).map_err(report_error)?;
        writeln!(out, "Variance (true, false): [{:.6}, {:.6}]", summary.variance[0], summary.variance[1])
            .map_err(report_error)?;
        writeln!(out).map_err(report_error)?;
    }

    Ok(())
}
