use clap::{Parser, Subcommand};
use mx_analysis::{LimitedRow, Mechanism};
use mx_app::{AnalysisContext, AppError, AppResult, case_service, list_reactors};
use mx_bourne::{Event, Stage, StageRecord, parse_kpi};
use mx_results::{KlaReference, ResultTable};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mx-cli")]
#[command(about = "mixsense CLI - stirred-tank mixing sensitivity tool", long_about = None)]
struct Cli {
    /// Verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate case file syntax and structure
    Validate {
        /// Path to the case YAML file
        case_path: PathBuf,
    },
    /// Mixing summary at the case operating point
    Summary {
        /// Path to the case YAML file
        case_path: PathBuf,
        /// Reactor ID (defaults to the operating point's reactor)
        #[arg(long)]
        reactor: Option<String>,
        /// Historical kLa measurements to list next to the computed kLa
        #[arg(long)]
        kla_reference: Option<PathBuf>,
    },
    /// Damköhler sensitivity grid over the agitation range at Vmin and Vmax
    Sensitivity {
        /// Path to the case YAML file
        case_path: PathBuf,
        /// Reactor ID
        #[arg(long)]
        reactor: Option<String>,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Volume x agitation sweep over several reactors
    Scale {
        /// Path to the case YAML file
        case_path: PathBuf,
        /// Comma-separated reactor IDs
        #[arg(long, value_delimiter = ',', required = true)]
        reactors: Vec<String>,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Bourne protocol: design the stages and decide from measured KPIs
    Bourne {
        /// Path to the case YAML file
        case_path: PathBuf,
        /// Stage 1 KPIs in table order (low, center, high)
        #[arg(long, value_delimiter = ',')]
        stage1: Option<Vec<String>>,
        /// Stage 2 KPIs in table order (low, center, high)
        #[arg(long, value_delimiter = ',')]
        stage2: Option<Vec<String>>,
        /// Stage 3 KPIs in table order (surface, sub-surface, impeller zone)
        #[arg(long, value_delimiter = ',')]
        stage3: Option<Vec<String>>,
        /// Stage 2 centerpoint feed rate [kg/h]
        #[arg(long)]
        feed_rate: Option<f64>,
        /// Stage 1 centerpoint agitation [rpm]
        #[arg(long)]
        agitation: Option<f64>,
        /// Stage 1 centerpoint volume [L]
        #[arg(long)]
        volume: Option<f64>,
    },
    /// Write the mixing report for every reactor at the case operating point
    Report {
        /// Path to the case YAML file
        case_path: PathBuf,
        /// Output CSV file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::Summary {
            case_path,
            reactor,
            kla_reference,
        } => cmd_summary(&case_path, reactor.as_deref(), kla_reference.as_deref()),
        Commands::Sensitivity {
            case_path,
            reactor,
            output,
        } => cmd_sensitivity(&case_path, reactor.as_deref(), output.as_deref()),
        Commands::Scale {
            case_path,
            reactors,
            output,
        } => cmd_scale(&case_path, &reactors, output.as_deref()),
        Commands::Bourne {
            case_path,
            stage1,
            stage2,
            stage3,
            feed_rate,
            agitation,
            volume,
        } => cmd_bourne(
            &case_path,
            [stage1, stage2, stage3],
            feed_rate,
            agitation,
            volume,
        ),
        Commands::Report { case_path, output } => cmd_report(&case_path, &output),
    }
}

fn open_session(case_path: &Path, reactor: Option<&str>) -> AppResult<AnalysisContext> {
    let case = case_service::load_case(case_path)?;
    tracing::debug!(path = %case_path.display(), reactors = case.reactors.len(), "case loaded");
    let mut ctx = AnalysisContext::from_case(case)?;
    if let Some(id) = reactor {
        ctx.select_reactor(id)?;
    }
    Ok(ctx)
}

fn cmd_validate(case_path: &Path) -> AppResult<()> {
    println!("Validating case: {}", case_path.display());
    let case = case_service::load_case(case_path)?;
    case_service::validate_case(&case)?;
    println!("✓ Case is valid");
    for r in list_reactors(&case) {
        println!(
            "  {} - {} ({} impellers, {}-{} rpm, {}-{} L)",
            r.id,
            r.owner,
            r.impeller_count,
            r.agitation_range_rpm.0,
            r.agitation_range_rpm.1,
            r.volume_range_l.0,
            r.volume_range_l.1
        );
    }
    Ok(())
}

fn cmd_summary(
    case_path: &Path,
    reactor: Option<&str>,
    kla_reference: Option<&Path>,
) -> AppResult<()> {
    let ctx = open_session(case_path, reactor)?;
    let reactor = ctx.reactor()?;
    let s = ctx.summary()?;
    let st = &s.state;

    println!("Mixing summary: {}", reactor.display_name());
    println!(
        "  Operating point: {:.1} rpm, {:.2} L",
        s.operating_point.n_rpm(),
        s.operating_point.v_l()
    );
    println!("  Re: {} ({})", s.reynolds_label, st.regime);
    println!("  Power: {:.3} W ({:.4} W/kg, {:.2} W/m3)", st.power_w, st.p_per_m, st.p_per_v);
    println!("  Headroom to capacity: {:.0} %", s.agitation_headroom_pct);
    println!("  Tip speed: {:.3} m/s", s.tip_speed_m_s);
    println!("  Micromixing time: {:.4} s", st.t_micro);
    match st.t_macro {
        Some(t) => println!("  Bulk mixing time: {:.2} s", t),
        None => println!("  Bulk mixing time: undefined (laminar)"),
    }
    println!("  kLa: {:.5} 1/s", st.kla);
    if let Some(da) = &s.da_ii {
        println!("  Da II: {:.3} ({})", da.value, da.verdict);
    }
    if let Some(q) = s.heat_generation_kw {
        println!("  Heat generation: {:.3} kW", q);
    }
    for njs in &s.suspension {
        println!(
            "  Njs ({}): {:.1} rpm, N/Njs = {:.2} ({})",
            njs.correlation, njs.njs_rpm, njs.ratio, njs.quality
        );
    }
    if let Some(d) = &s.drawdown {
        println!(
            "  Gas drawdown: min {:.1} rpm, N/Nmin = {:.2} ({}), headroom {:.0} %",
            d.min_speed_rpm, d.ratio, d.condition, d.headroom_pct
        );
    }
    for w in &s.warnings {
        println!("  ! {}", w);
    }

    if let Some(path) = kla_reference {
        let reference = KlaReference::from_path(path)?;
        let matches = reference.filter(&reactor.owner, &reactor.name);
        println!("Historical kLa ({} points):", matches.len());
        for m in matches {
            println!(
                "  {:.0} rpm, {:.1} L: {:.5} 1/s",
                m.stir_speed_rpm, m.volume_fill_l, m.kla_per_sec
            );
        }
    }
    Ok(())
}

fn write_table(table: &ResultTable, output: Option<&Path>) -> AppResult<()> {
    if let Some(path) = output {
        table.save_csv(path)?;
        println!("✓ Exported {} rows to {}", table.len(), path.display());
    } else {
        print!("{}", table.to_csv_string()?);
    }
    Ok(())
}

fn report_limits<R: LimitedRow>(rows: &[R], mechanisms: &[Mechanism]) {
    for &m in mechanisms {
        let n = rows.iter().filter(|r| r.is_limited_by(m)).count();
        if n > 0 {
            tracing::warn!(mechanism = %m, limited = n, points = rows.len(), "Da > 1");
        }
    }
}

fn cmd_sensitivity(case_path: &Path, reactor: Option<&str>, output: Option<&Path>) -> AppResult<()> {
    let mut ctx = open_session(case_path, reactor)?;
    let result = ctx.run_sensitivity()?;
    report_limits(&result.rows, &Mechanism::ALL);
    write_table(&ResultTable::from_sensitivity(&result.rows), output)
}

fn cmd_scale(case_path: &Path, reactors: &[String], output: Option<&Path>) -> AppResult<()> {
    let mut ctx = open_session(case_path, None)?;
    let ids: Vec<&str> = reactors.iter().map(String::as_str).collect();
    let result = ctx.run_scale(&ids)?;
    report_limits(&result.rows, &[Mechanism::MassTransfer]);
    write_table(&ResultTable::from_scale(&result.rows), output)
}

fn parse_kpis(stage: Stage, cells: &[String]) -> AppResult<[f64; 3]> {
    let values = cells
        .iter()
        .map(|c| parse_kpi(c))
        .collect::<Result<Vec<_>, _>>()?;
    values.try_into().map_err(|_| {
        AppError::InvalidInput(format!("Stage {} needs exactly three KPI values", stage))
    })
}

fn print_stage(record: &StageRecord) -> AppResult<()> {
    println!("Stage {}: {}", record.table.stage, record.table.stage.title());
    print!("{}", ResultTable::from_conditions(&record.table).to_csv_string()?);
    if let Some(outcome) = &record.outcome {
        println!(
            "  {} (low {:.1} %, high {:.1} %)",
            outcome.verdict(),
            outcome.low_deviation * 100.0,
            outcome.high_deviation * 100.0
        );
        println!("  {}", outcome.recommendation());
    }
    Ok(())
}

fn cmd_bourne(
    case_path: &Path,
    kpis: [Option<Vec<String>>; 3],
    feed_rate: Option<f64>,
    agitation: Option<f64>,
    volume: Option<f64>,
) -> AppResult<()> {
    let mut ctx = open_session(case_path, None)?;
    let centerpoint = ctx.default_centerpoint(agitation, volume)?;

    for (stage, cells) in Stage::ALL.into_iter().zip(kpis) {
        let event = match stage {
            Stage::StirSpeed => Event::BeginStirSpeed { centerpoint },
            Stage::FeedRate => Event::BeginFeedRate {
                feed_rate_kg_h: feed_rate,
                centerpoint: None,
            },
            Stage::FeedLocation => Event::BeginFeedLocation { centerpoint: None },
        };
        ctx.apply_bourne(event)?;

        let Some(cells) = cells else {
            // design only: show the table to fill in and stop here
            if let Some(record) = ctx.bourne().stage(stage) {
                print_stage(record)?;
            }
            break;
        };
        let values = parse_kpis(stage, &cells)?;
        let record = ctx.complete_stage(stage, values)?;
        print_stage(record)?;
    }
    Ok(())
}

fn cmd_report(case_path: &Path, output: &Path) -> AppResult<()> {
    let mut ctx = open_session(case_path, None)?;
    let ids: Vec<String> = ctx.case().reactors.iter().map(|r| r.id.clone()).collect();
    for id in &ids {
        ctx.select_reactor(id)?;
        ctx.add_to_report()?;
    }
    write_table(&ctx.report().to_table(), Some(output))
}
