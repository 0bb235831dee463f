use std::{env, fs, path::PathBuf, process};

use feasibility_core::{
    config::{ConfigManager, EngineConfig},
    core::services::FeasibilityService,
    domain::FeasibilityRequest,
    init,
    utils::build_info,
    FeasibilityError,
};

const USAGE: &str = "usage: feasibility_cli [--config <config.json>] [--record] <request.json>";

struct Options {
    request: PathBuf,
    config: Option<PathBuf>,
    record_only: bool,
}

fn main() {
    init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|arg| arg == "--version") {
        println!("{}", build_info::current().summary());
        return;
    }

    let options = match parse_args(&args) {
        Some(options) => options,
        None => {
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    if let Err(err) = run(&options) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Option<Options> {
    let mut request = None;
    let mut config = None;
    let mut record_only = false;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => config = Some(PathBuf::from(iter.next()?)),
            "--record" => record_only = true,
            other if other.starts_with("--") => return None,
            other => request = Some(PathBuf::from(other)),
        }
    }
    Some(Options {
        request: request?,
        config,
        record_only,
    })
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig, FeasibilityError> {
    match path {
        Some(path) => {
            let config: EngineConfig = serde_json::from_str(&fs::read_to_string(path)?)?;
            config.validate()?;
            Ok(config)
        }
        None => ConfigManager::new()?.load(),
    }
}

fn run(options: &Options) -> Result<(), FeasibilityError> {
    let config = load_config(options.config.as_ref())?;
    let data = fs::read_to_string(&options.request)?;
    let request: FeasibilityRequest = serde_json::from_str(&data)?;
    let report = FeasibilityService::analyze(&request, &config)?;

    let output = if options.record_only {
        serde_json::to_string_pretty(&report.project_record(&request))?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{output}");
    Ok(())
}
