//! Onoma Core - name-origin posterior calculator
//!
//! The main entry point for onoma-core, handling:
//! - Posterior computation from presets or explicit priors
//! - The pooled sensitivity grid
//! - Reproduction of the published scenarios
//! - Preset table inspection and validation

use clap::{Args, Parser, Subcommand};
use onoma_common::{Error, HypothesisScores, OutputFormat, SCHEMA_VERSION};
use onoma_config::{check_ranges, find_scenario, hash_content, Scenario, ARTICLE_SCENARIOS};
use onoma_core::config::{load_config, read_table, ConfigOptions, ResolvedConfig};
use onoma_core::exit_codes::ExitCode;
use onoma_core::inference::{
    compute_posterior, compute_sensitivity, to_error, PosteriorInput, DEFAULT_LIKELIHOOD_AXIS,
    DEFAULT_PRIOR_AXIS,
};
use onoma_core::log_event;
use onoma_core::logging::{
    event_names, generate_run_id, init_logging, LogConfig, LogContext, LogFormat, LogLevel, Stage,
};
use onoma_core::output::{render, render_error, ConfigView, PresetListing, ValidationView};
use onoma_core::scenarios::{reproduce, reproduce_scenarios};
use onoma_core::schema::{available_schemas, format_schema, generate_all_schemas, generate_schema, SchemaFormat};
use onoma_math::POOLED_ALT_LIKELIHOOD;
use std::path::PathBuf;

/// Onoma Core - Bayesian posterior over four name-origin hypotheses
#[derive(Parser)]
#[command(name = "onoma-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format on stderr: human or jsonl
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Preset table file (JSON or TOML); must exist.
    /// ONOMA_PRESETS is consulted when this is absent.
    #[arg(long, global = true, value_name = "PATH")]
    presets: Option<PathBuf>,

    /// Directory holding presets.json or presets.toml.
    /// ONOMA_CONFIG_DIR is consulted when this is absent.
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,
}

impl GlobalOpts {
    fn config_options(&self) -> ConfigOptions {
        ConfigOptions {
            presets_path: self.presets.clone(),
            config_dir: self.config_dir.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compute posteriors for Mg, O, Sp and R
    Calc(CalcArgs),

    /// Pooled sensitivity grid of P(Mg|D) over prior and likelihood
    Sensitivity(SensitivityArgs),

    /// Recompute the published scenarios (exit 1 on mismatch)
    Scenarios(ScenariosArgs),

    /// List available prior presets
    Presets,

    /// Configuration management
    Config(ConfigArgs),

    /// Print JSON Schema for output types
    Schema(SchemaArgs),

    /// Print version information
    Version,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Calc(_) => "calc",
            Commands::Sensitivity(_) => "sensitivity",
            Commands::Scenarios(_) => "scenarios",
            Commands::Presets => "presets",
            Commands::Config(args) => match args.command {
                ConfigCommands::Show => "config show",
                ConfigCommands::Validate { .. } => "config validate",
            },
            Commands::Schema(_) => "schema",
            Commands::Version => "version",
        }
    }
}

// ============================================================================
// Command argument structs
// ============================================================================

#[derive(Args, Debug)]
struct CalcArgs {
    /// Prior preset by name or alias (default: the table's default preset)
    #[arg(long, short = 'p')]
    preset: Option<String>,

    /// Explicit prior weights Mg,O,Sp,R
    #[arg(long, value_name = "MG,O,SP,R", allow_hyphen_values = true, conflicts_with = "preset")]
    priors: Option<String>,

    /// Likelihoods P(D|H) as Mg,O,Sp,R (default: the table's defaults)
    #[arg(long, value_name = "MG,O,SP,R", allow_hyphen_values = true)]
    likelihoods: Option<String>,
}

#[derive(Args, Debug)]
struct SensitivityArgs {
    /// Prior(Mg) values for the rows, comma-separated
    #[arg(long, value_name = "P1,P2,..", allow_hyphen_values = true)]
    priors_axis: Option<String>,

    /// P(D|Mg) values for the columns, comma-separated
    #[arg(long, value_name = "L1,L2,..", allow_hyphen_values = true)]
    likelihood_axis: Option<String>,

    /// Likelihood shared by the pooled alternatives
    #[arg(long, default_value_t = POOLED_ALT_LIKELIHOOD, allow_hyphen_values = true)]
    alt_likelihood: f64,
}

#[derive(Args, Debug)]
struct ScenariosArgs {
    /// Only these scenarios (A, LOO, Xw, H); repeatable, default all
    #[arg(long = "id", value_name = "ID", value_parser = parse_scenario_id)]
    ids: Vec<&'static Scenario>,
}

fn parse_scenario_id(value: &str) -> Result<&'static Scenario, String> {
    find_scenario(value).ok_or_else(|| {
        let known: Vec<&str> = ARTICLE_SCENARIOS.iter().map(|s| s.id).collect();
        format!("unknown scenario '{}' (known: {})", value, known.join(", "))
    })
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the resolved preset table and where it came from
    Show,
    /// Validate a preset table file (default: the resolved one)
    Validate {
        /// Preset table file to validate
        path: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct SchemaArgs {
    /// Type name to print (see --list)
    #[arg(value_name = "TYPE")]
    type_name: Option<String>,

    /// List available schema types
    #[arg(long, conflicts_with = "all")]
    list: bool,

    /// Print every schema as one object keyed by type name
    #[arg(long, conflicts_with = "type_name")]
    all: bool,

    /// Compact single-line JSON
    #[arg(long)]
    compact: bool,
}

// ============================================================================
// Main entry point
// ============================================================================

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and --version also arrive here and are not failures.
            let code = if err.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            let _ = err.print();
            std::process::exit(code.as_i32());
        }
    };

    let log_level = LogLevel::from_verbosity(cli.global.verbose, cli.global.quiet);
    init_logging(&LogConfig::from_env(log_level, cli.global.log_format));

    let ctx = LogContext::new(generate_run_id()).with_command(cli.command.name());
    log_event!(
        ctx,
        DEBUG,
        event_names::RUN_STARTED,
        Stage::Init,
        "starting",
        version = env!("CARGO_PKG_VERSION")
    );

    let global = &cli.global;
    let result = match &cli.command {
        Commands::Calc(args) => run_calc(global, &ctx, args),
        Commands::Sensitivity(args) => run_sensitivity(global, &ctx, args),
        Commands::Scenarios(args) => run_scenarios(global, &ctx, args),
        Commands::Presets => run_presets(global, &ctx),
        Commands::Config(args) => match &args.command {
            ConfigCommands::Show => run_config_show(global, &ctx),
            ConfigCommands::Validate { path } => run_config_validate(global, &ctx, path.as_ref()),
        },
        Commands::Schema(args) => run_schema(global, args),
        Commands::Version => print_version(global),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(err) => {
            emit_error(global, &err);
            ExitCode::from(&err)
        }
    };

    log_event!(
        ctx,
        DEBUG,
        event_names::RUN_FINISHED,
        Stage::Report,
        "finished",
        exit_code = exit_code.as_i32()
    );
    std::process::exit(exit_code.as_i32());
}

type CommandResult = Result<ExitCode, Error>;

fn emit(text: &str) {
    if !text.is_empty() {
        println!("{}", text);
    }
}

fn emit_error(global: &GlobalOpts, err: &Error) {
    let text = render_error(err, global.format);
    if !text.is_empty() {
        eprintln!("{}", text);
    }
}

/// Parse comma-separated numbers for a flag.
fn parse_numbers(flag: &str, value: &str) -> Result<Vec<f64>, Error> {
    value
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<f64>()
                .map_err(|_| Error::InvalidInput(format!("{}: not a number: '{}'", flag, part)))
        })
        .collect()
}

fn parse_scores(flag: &str, value: &str) -> Result<HypothesisScores, Error> {
    HypothesisScores::parse_csv(value).map_err(|e| Error::InvalidInput(format!("{}: {}", flag, e)))
}

fn load(global: &GlobalOpts, ctx: &LogContext) -> Result<ResolvedConfig, Error> {
    match load_config(&global.config_options()) {
        Ok(config) => {
            match &config.path {
                Some(path) => {
                    let path = path.display().to_string();
                    log_event!(
                        ctx,
                        INFO,
                        event_names::CONFIG_LOADED,
                        Stage::Config,
                        "preset table loaded",
                        path = path.as_str(),
                        presets = config.table.presets.len()
                    );
                }
                None => log_event!(
                    ctx,
                    DEBUG,
                    event_names::CONFIG_DEFAULT_USED,
                    Stage::Config,
                    "no preset file found; using built-in presets"
                ),
            }
            Ok(config)
        }
        Err(err) => {
            let message = err.to_string();
            log_event!(
                ctx,
                ERROR,
                event_names::CONFIG_ERROR,
                Stage::Config,
                message.as_str()
            );
            Err(err.into())
        }
    }
}

// ============================================================================
// Command implementations
// ============================================================================

fn run_calc(global: &GlobalOpts, ctx: &LogContext, args: &CalcArgs) -> CommandResult {
    let config = load(global, ctx)?;
    let table = &config.table;

    let (priors, preset) = match &args.priors {
        Some(raw) => (parse_scores("--priors", raw)?, None),
        None => {
            let name = args.preset.as_deref().unwrap_or_else(|| table.default_preset_name());
            let entry = table.resolve(name)?;
            (entry.priors, Some(entry.name.clone()))
        }
    };
    let likelihoods = match &args.likelihoods {
        Some(raw) => parse_scores("--likelihoods", raw)?,
        None => table.default_likelihoods(),
    };

    for warning in check_ranges(&priors, &likelihoods) {
        let message = warning.to_string();
        log_event!(
            ctx,
            WARN,
            event_names::INFER_INPUT_OUT_OF_RANGE,
            Stage::Infer,
            message.as_str(),
            field = warning.field.as_str(),
            value = warning.value
        );
    }

    let report = match compute_posterior(&PosteriorInput::new(priors, likelihoods)) {
        Ok(report) => report,
        Err(err) => {
            let message = err.to_string();
            log_event!(ctx, WARN, event_names::INFER_FAILED, Stage::Infer, message.as_str());
            return Err(to_error(err));
        }
    };
    let report = match preset {
        Some(name) => report.with_preset(name),
        None => report,
    };

    log_event!(
        ctx,
        INFO,
        event_names::INFER_FINISHED,
        Stage::Infer,
        "posterior computed",
        map = report.map.code(),
        posterior_mg = report.posteriors.mg
    );

    emit(&render(&report, global.format)?);
    Ok(ExitCode::Clean)
}

fn run_sensitivity(global: &GlobalOpts, ctx: &LogContext, args: &SensitivityArgs) -> CommandResult {
    let prior_axis = match &args.priors_axis {
        Some(raw) => parse_numbers("--priors-axis", raw)?,
        None => DEFAULT_PRIOR_AXIS.to_vec(),
    };
    let likelihood_axis = match &args.likelihood_axis {
        Some(raw) => parse_numbers("--likelihood-axis", raw)?,
        None => DEFAULT_LIKELIHOOD_AXIS.to_vec(),
    };

    let matrix = compute_sensitivity(&prior_axis, &likelihood_axis, args.alt_likelihood).map_err(to_error)?;
    log_event!(
        ctx,
        INFO,
        event_names::SENSITIVITY_FINISHED,
        Stage::Analyze,
        "sensitivity grid computed",
        rows = matrix.prior_axis.len(),
        cols = matrix.likelihood_axis.len()
    );

    emit(&render(&matrix, global.format)?);
    Ok(ExitCode::Clean)
}

fn run_scenarios(global: &GlobalOpts, ctx: &LogContext, args: &ScenariosArgs) -> CommandResult {
    let config = load(global, ctx)?;
    let report = if args.ids.is_empty() {
        reproduce(&config.table)?
    } else {
        reproduce_scenarios(&config.table, args.ids.iter().copied())?
    };

    for check in report.mismatches() {
        let message = format!(
            "scenario {} computed {:.1}% but {:.0}% was reported",
            check.id, check.computed_pct, check.reported_pct
        );
        log_event!(
            ctx,
            WARN,
            event_names::SCENARIO_MISMATCH,
            Stage::Analyze,
            message.as_str(),
            id = check.id.as_str()
        );
    }
    log_event!(
        ctx,
        INFO,
        event_names::SCENARIO_CHECKED,
        Stage::Analyze,
        "scenarios checked",
        all_match = report.all_match
    );

    emit(&render(&report, global.format)?);
    Ok(if report.all_match {
        ExitCode::Clean
    } else {
        ExitCode::ScenarioMismatch
    })
}

fn run_presets(global: &GlobalOpts, ctx: &LogContext) -> CommandResult {
    let config = load(global, ctx)?;
    emit(&render(&PresetListing::new(&config), global.format)?);
    Ok(ExitCode::Clean)
}

/// Display the resolved preset table (built-ins if no file is present).
fn run_config_show(global: &GlobalOpts, ctx: &LogContext) -> CommandResult {
    let config = load(global, ctx)?;
    emit(&render(&ConfigView::new(&config), global.format)?);
    Ok(ExitCode::Clean)
}

/// Validate one preset table file, or the resolved one.
fn run_config_validate(global: &GlobalOpts, ctx: &LogContext, path: Option<&PathBuf>) -> CommandResult {
    let view = match path {
        Some(path) => {
            let (table, content) = read_table(path).map_err(|err| {
                let message = err.to_string();
                log_event!(
                    ctx,
                    ERROR,
                    event_names::CONFIG_ERROR,
                    Stage::Config,
                    message.as_str()
                );
                Error::from(err)
            })?;
            ValidationView::new(
                Some(path.display().to_string()),
                "CLI argument".to_string(),
                table.merged_with_builtin().presets.len(),
                hash_content(&content),
            )
        }
        None => {
            let config = load(global, ctx)?;
            ValidationView::new(
                config.path.as_ref().map(|p| p.display().to_string()),
                config.source.to_string(),
                config.snapshot.preset_count,
                config.snapshot.presets_hash.clone(),
            )
        }
    };

    emit(&render(&view, global.format)?);
    Ok(ExitCode::Clean)
}

fn run_schema(global: &GlobalOpts, args: &SchemaArgs) -> CommandResult {
    let format = if args.compact {
        SchemaFormat::JsonCompact
    } else {
        SchemaFormat::Json
    };

    if args.all {
        if global.format != OutputFormat::Exitcode {
            let all = serde_json::to_value(generate_all_schemas())?;
            println!("{}", format_schema(&all, format)?);
        }
        return Ok(ExitCode::Clean);
    }

    let type_name = match (&args.type_name, args.list) {
        (Some(name), false) => name,
        _ => {
            print_schema_list(global)?;
            return Ok(ExitCode::Clean);
        }
    };

    let Some(schema) = generate_schema(type_name) else {
        let available: Vec<&str> = available_schemas().into_iter().map(|(name, _)| name).collect();
        match global.format {
            OutputFormat::Json => {
                let payload = serde_json::json!({
                    "error": "unknown schema type",
                    "type": type_name,
                    "available": available,
                });
                eprintln!("{}", serde_json::to_string_pretty(&payload)?);
            }
            OutputFormat::Exitcode => {}
            _ => eprintln!(
                "unknown schema type '{}'; available: {}",
                type_name,
                available.join(", ")
            ),
        }
        return Ok(ExitCode::ArgsError);
    };

    if global.format != OutputFormat::Exitcode {
        println!("{}", format_schema(&schema, format)?);
    }
    Ok(ExitCode::Clean)
}

fn print_schema_list(global: &GlobalOpts) -> Result<(), Error> {
    let schemas = available_schemas();
    match global.format {
        OutputFormat::Json => {
            let list: Vec<_> = schemas
                .iter()
                .map(|(name, description)| serde_json::json!({"name": name, "description": description}))
                .collect();
            let payload = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "schemas": list,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Md => {
            println!("# Available schemas");
            println!();
            println!("| Type | Description |");
            println!("|---|---|");
            for (name, description) in &schemas {
                println!("| {} | {} |", name, description);
            }
        }
        OutputFormat::Summary => {
            let names: Vec<&str> = schemas.iter().map(|(name, _)| *name).collect();
            println!("{}", names.join(" "));
        }
        OutputFormat::Exitcode => {}
    }
    Ok(())
}

fn print_version(global: &GlobalOpts) -> CommandResult {
    let version_info = serde_json::json!({
        "schema_version": SCHEMA_VERSION,
        "onoma_core_version": env!("CARGO_PKG_VERSION"),
        "rust_version": env!("CARGO_PKG_RUST_VERSION"),
    });

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&version_info)?);
        }
        OutputFormat::Exitcode => {}
        _ => {
            println!("onoma-core {}", env!("CARGO_PKG_VERSION"));
            println!("schema version: {}", SCHEMA_VERSION);
        }
    }
    Ok(ExitCode::Clean)
}
