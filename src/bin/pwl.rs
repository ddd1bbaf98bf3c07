//! an executable computing Persistent Weisfeiler-Lehman features of a graph collection and estimating
//! their classification accuracy by repeated (nested) cross validation with a random forest.
//! example usage:
//! pwl -l labels.txt -n 3 -f sublevel -d MUTAG data/MUTAG/*.gml
//! pwl -l labels.txt -n 3 -g --repetitions 5 --output mutag data/MUTAG/*.gml
//!
//! Graph files with extension gml are read as GML, other files as edge lists.
//! The labels file has one class label per line, line i being the class of the i-th graph file.
//! With -d the log goes to file dataset_numiterations.log, otherwise to stderr. RUST_LOG sets the log level,
//! default is info.

use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Context};
use clap::{arg, Arg, ArgMatches, Command};
use env_logger::{Builder, Env, Target};

use pwlkernel::prelude::*;

// decode an optional argument, returning default if absent
fn parse_value<T>(matches: &ArgMatches, name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
{
    match matches.value_of(name) {
        Some(str) => str
            .parse::<T>()
            .map_err(|_| anyhow!("could not parse {} value : {}", name, str)),
        None => Ok(default),
    }
} // end of parse_value

fn init_log(dataset: Option<&str>, nb_iter: usize) -> anyhow::Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    if let Some(dataset) = dataset {
        let logname = format!("{}_{}.log", dataset, nb_iter);
        let file = std::fs::File::create(&logname).with_context(|| format!("could not create log file {}", logname))?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.try_init()?;
    Ok(())
} // end of init_log

fn run(matches: &ArgMatches, nb_iter: usize) -> anyhow::Result<()> {
    let filtration = parse_value(matches, "filtration", FiltrationKind::Sublevel)?;
    let nb_repeat = parse_value(matches, "repetitions", 10usize)?;
    let nb_folds = parse_value(matches, "folds", 10usize)?;
    let nb_inner_folds = parse_value(matches, "inner_folds", 10usize)?;
    let seed = parse_value(matches, "seed", 42u64)?;
    let grid_search = matches.is_present("grid_search");
    let empty_policy = if matches.is_present("zero_fill") {
        EmptyGraphPolicy::ZeroFill
    } else {
        EmptyGraphPolicy::Fail
    };
    //
    let pwl_params = PwlParams::new(nb_iter, filtration, 0., empty_policy, true);
    let validation_params = ValidationParams::new(nb_repeat, nb_folds, nb_inner_folds, grid_search, seed, true);
    validation_params.check()?;
    log::info!("pwl parameters : {:?}", pwl_params);
    log::info!("validation parameters : {:?}", validation_params);
    //
    let labels_name = matches.value_of("labels").ok_or_else(|| anyhow!("labels file is required"))?;
    let labels = read_labels(Path::new(labels_name))?;
    let files: Vec<&str> = matches.values_of("FILES").map(|v| v.collect()).unwrap_or_default();
    log::info!("reading {} graph files", files.len());
    let graphs = load_graphs(&files)?;
    //
    let extractor = PersistenceSummary::default();
    let builder = RandomForestBuilder::new(ForestParams::default(), NB_TREES_GRID.to_vec());
    let experiment = Experiment::new(pwl_params, validation_params, &extractor, &builder);
    let result = experiment.run(&graphs, &labels)?;
    //
    let validation = result.get_validation();
    for repetition in validation.get_repetitions() {
        println!("  - Mean {}-fold accuracy: {:2.2}", nb_folds, 100. * repetition.get_accuracy());
    }
    for failure in validation.get_failures() {
        println!("  - aborted : {}", failure);
    }
    println!("Accuracy: {:2.2} +- {:2.2}", 100. * validation.get_mean(), 100. * validation.get_std());
    //
    if let Some(stem) = matches.value_of("output") {
        let output = Output::new(stem);
        output.dump_features(&result.get_features().view(), result.get_column_counts())?;
        output.dump_accuracies(validation)?;
    }
    Ok(())
} // end of run

pub fn main() {
    //
    let matches = Command::new("pwl")
        .about("Persistent Weisfeiler-Lehman graph classification")
        .arg_required_else_help(true)
        .arg(
            Arg::new("FILES")
                .required(true)
                .multiple_values(true)
                .help("input graphs, gml or edge list"),
        )
        .arg(
            Arg::new("labels")
                .short('l')
                .long("labels")
                .takes_value(true)
                .required(true)
                .help("labels file, one label per line"),
        )
        .arg(
            Arg::new("num_iterations")
                .short('n')
                .long("num-iterations")
                .takes_value(true)
                .help("number of Weisfeiler-Lehman iterations, default 3"),
        )
        .arg(
            Arg::new("filtration")
                .short('f')
                .long("filtration")
                .takes_value(true)
                .help("sublevel (default) or superlevel"),
        )
        .arg(
            Arg::new("grid_search")
                .short('g')
                .long("grid-search")
                .help("search number of iterations and number of trees in each fold"),
        )
        .arg(
            Arg::new("dataset")
                .short('d')
                .long("dataset")
                .takes_value(true)
                .help("name of data set, log goes to dataset_numiterations.log"),
        )
        .args(&[
            arg!(--repetitions <repetitions> "number of repetitions of cross validation, default 10").required(false),
            arg!(--folds <folds> "number of folds, default 10").required(false),
            arg!(--inner_folds <inner_folds> "number of folds of grid search, default 10")
                .long("inner-folds")
                .required(false),
            arg!(--seed <seed> "seed of random generators, default 42").required(false),
            arg!(--output <output> "dump features in output_features.csv and accuracies in output_accuracies.csv")
                .required(false),
        ])
        .arg(
            Arg::new("zero_fill")
                .long("zero-fill-empty")
                .help("give zero features to graphs without node instead of failing"),
        )
        .get_matches();
    //
    let nb_iter = match parse_value(&matches, "num_iterations", 3usize) {
        Ok(nb_iter) => nb_iter,
        Err(e) => {
            eprintln!("error : {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = init_log(matches.value_of("dataset"), nb_iter) {
        eprintln!("error : could not initialize log : {:#}", e);
        std::process::exit(1);
    }
    log::info!("logger initialized, nb threads : {}", num_cpus::get());
    //
    if let Err(e) = run(&matches, nb_iter) {
        log::error!("pwl failed : {:#}", e);
        eprintln!("error : {:#}", e);
        std::process::exit(1);
    }
} // end of main
