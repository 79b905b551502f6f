use clap::{Arg, ArgAction, ArgMatches, Command};
use minic_core::{MinicErrorExt, PipelineConfig, generate_error_report, run_pipeline, script::Script};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod output;

use output::{ConsoleSink, FormatStyle, JsonSink};

fn main() -> ExitCode {
    install_tracing();

    let cli = Command::new("minic")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse, optimize, lower and run minic programs");

    let cli = setup_cli(cli);
    let matches = cli.get_matches();
    dispatch_commands(&matches)
}

/// Log records from the core go through the `log` facade and are picked up
/// here. `MINIC_LOG` takes the usual filter directives.
fn install_tracing() {
    let filter = EnvFilter::try_from_env("MINIC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Arguments shared by `run` and `build`.
fn pipeline_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("file")
            .help("The script file")
            .required(true)
            .index(1),
    )
    .arg(
        Arg::new("no-opt")
            .help("Skip constant folding and dead-assignment elimination")
            .long("no-opt")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("ast")
            .help("Print the syntax tree")
            .long("ast")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("ir")
            .help("Print the intermediate code")
            .long("ir")
            .action(ArgAction::SetTrue)
            .conflicts_with("no-ir"),
    )
    .arg(
        Arg::new("no-ir")
            .help("Do not print the intermediate code")
            .long("no-ir")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("symbols")
            .help("Print the global symbol table after running")
            .long("symbols")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("config")
            .help("Read pipeline settings from a JSON file; flags take precedence")
            .short('c')
            .long("config")
            .value_parser(clap::value_parser!(PathBuf))
            .value_name("FILE"),
    )
    .arg(
        Arg::new("format")
            .help("Output format")
            .short('f')
            .long("format")
            .value_parser(["text", "json"])
            .default_value("text")
            .value_name("FORMAT"),
    )
}

/// Sets up the CLI with subcommands and arguments.
fn setup_cli(cli: Command) -> Command {
    cli.subcommand_required(true)
        .subcommand(pipeline_args(
            Command::new("run").about("Optimize and run a script file"),
        ))
        .subcommand(pipeline_args(
            Command::new("build").about("Optimize a script file and list its intermediate code without running it"),
        ))
}

/// Start from the config file (or defaults) and apply the flags on top.
fn resolve_config(sub_m: &ArgMatches, run: bool) -> Result<PipelineConfig, Box<dyn MinicErrorExt>> {
    let mut config = match sub_m.get_one::<PathBuf>("config") {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };

    config.run = run;
    if sub_m.get_flag("no-opt") {
        config.optimize = false;
    }
    if sub_m.get_flag("ast") {
        config.print_ast = true;
    }
    if sub_m.get_flag("ir") {
        config.emit_ir = true;
    }
    if sub_m.get_flag("no-ir") {
        config.emit_ir = false;
    }
    if sub_m.get_flag("symbols") {
        config.dump_globals = true;
    }
    log::debug!("resolved pipeline config: {:?}", config);
    Ok(config)
}

fn execute(sub_m: &ArgMatches, run: bool) -> Result<(), Box<dyn MinicErrorExt>> {
    let config = resolve_config(sub_m, run)?;
    let file = sub_m
        .get_one::<String>("file")
        .map(PathBuf::from)
        .unwrap_or_default();
    let script = Script::new(file)?;

    let stdout = std::io::stdout();
    match sub_m.get_one::<String>("format").map(String::as_str) {
        Some("json") => {
            let mut sink = JsonSink::new();
            let summary = run_pipeline(&script, &config, &mut sink)?;
            let mut out = stdout.lock();
            sink.finish(&script.name, &summary, &mut out)
                .map_err(|e| Box::new(output::OutputError::from(e)) as Box<dyn MinicErrorExt>)
        }
        _ => {
            let mut sink = ConsoleSink::new(stdout.lock(), FormatStyle::default());
            run_pipeline(&script, &config, &mut sink)?;
            Ok(())
        }
    }
}

/// Dispatches the command based on the parsed arguments.
fn dispatch_commands(matches: &ArgMatches) -> ExitCode {
    let result = match matches.subcommand() {
        Some(("run", sub_m)) => execute(sub_m, true),
        Some(("build", sub_m)) => execute(sub_m, false),
        _ => {
            eprintln!("No valid subcommand was used. Use --help for more information.");
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let style = FormatStyle::default();
            eprintln!("{}", style.error.apply_to(generate_error_report(e.as_ref())));
            ExitCode::FAILURE
        }
    }
}
