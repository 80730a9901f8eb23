use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use random_bst::experiment::Experiment;

fn make_options_parser() -> Command {
    Command::new("random-bst")
        .about("Measures the average height of treaps built from increasing keys")
        .arg(
            Arg::new("size")
                .short('n')
                .long("size")
                .help("Number of keys inserted per trial")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("trials")
                .short('t')
                .long("trials")
                .help("Number of independent treaps to build")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("seed")
                .short('s')
                .long("seed")
                .help("Seed for a reproducible run")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the report as JSON")
                .action(ArgAction::SetTrue),
        )
}

// Unset options fall back to `Experiment::default()`.
fn experiment_from_matches(matches: &ArgMatches) -> Experiment {
    let defaults = Experiment::default();
    Experiment {
        size: matches.get_one::<usize>("size").copied().unwrap_or(defaults.size),
        trials: matches.get_one::<usize>("trials").copied().unwrap_or(defaults.trials),
        seed: matches.get_one::<u64>("seed").copied(),
    }
}

fn main() -> Result<()> {
    let env = env_logger::Env::new()
        .filter("RBST_LOG")
        .write_style("RBST_LOG_STYLE");
    env_logger::init_from_env(env);

    let matches = make_options_parser().get_matches();
    let experiment = experiment_from_matches(&matches);
    log::debug!("experiment options: {:?}", experiment);

    let report = experiment.run().context("invalid experiment")?;
    if matches.get_flag("json") {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{}", json);
    } else {
        println!("Average height: {}", report.average_height);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{experiment_from_matches, make_options_parser};
    use random_bst::experiment::{Experiment, ExperimentError};

    fn parse(args: &[&str]) -> Experiment {
        let matches = make_options_parser()
            .try_get_matches_from(args)
            .unwrap();
        experiment_from_matches(&matches)
    }

    #[test]
    fn test_defaults() {
        assert_eq!(parse(&["random-bst"]), Experiment::default());
        let matches = make_options_parser()
            .try_get_matches_from(&["random-bst"])
            .unwrap();
        assert!(!matches.get_flag("json"));
    }

    #[test]
    fn test_short_options() {
        assert_eq!(
            parse(&["random-bst", "-n", "100", "-t", "5", "-s", "3"]),
            Experiment {
                size: 100,
                trials: 5,
                seed: Some(3),
            },
        );
    }

    #[test]
    fn test_json_flag() {
        let matches = make_options_parser()
            .try_get_matches_from(&["random-bst", "--json", "--trials", "2"])
            .unwrap();
        assert!(matches.get_flag("json"));
        let report = experiment_from_matches(&matches).run().unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["trials"], 2);
        assert_eq!(json["size"], 1000);
        assert_eq!(json.as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_zero_size_fails() {
        let experiment = parse(&["random-bst", "--size", "0"]);
        assert_eq!(experiment.run(), Err(ExperimentError::EmptyTreap));
    }

    #[test]
    fn test_invalid_number_rejected() {
        assert!(make_options_parser()
            .try_get_matches_from(&["random-bst", "--trials", "many"])
            .is_err());
    }
}
