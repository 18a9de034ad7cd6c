mod graph_file;
mod result;
mod vbp;

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use arcflow_solver::core::statistics::configure_statistic_logging;
use arcflow_solver::core::statistics::log_statistic_postfix;
use arcflow_solver::core::statistics::should_log_statistics;
use arcflow_solver::core::statistics::Statistic;
use arcflow_solver::core::statistics::StatisticLogger;
use arcflow_solver::core::ArcFlowBuilder;
use arcflow_solver::core::ArcFlowOptions;
use arcflow_solver::core::ItemOrdering;
use clap::Parser;
use graph_file::GraphWriter;
use itertools::Itertools;
use log::error;
use log::info;
use log::LevelFilter;
use result::ArcFlowSolverError;
use result::ArcFlowSolverResult;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
Authors: {author}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    author,
    version,
    about,
    arg_required_else_help = true
)]
struct Args {
    /// The instance to build the arc-flow graph for. The file should have the extension '*.vbp'
    /// and contain a vector bin-packing instance in the VBP format.
    #[clap(verbatim_doc_comment)]
    instance_path: PathBuf,

    /// The output path for the graph file.
    ///
    /// If the file extension ends with `.gz`, a gzipped graph will be produced. If this option
    /// is not provided, the graph is only built and summarised.
    #[arg(long, verbatim_doc_comment)]
    output_path: Option<PathBuf>,

    /// The order in which the item types are considered while building the graph.
    ///
    /// The ordering influences the size of the intermediate state space, but never the set of
    /// packings which the graph represents.
    #[arg(long, value_enum, default_value_t)]
    item_ordering: ItemOrdering,

    /// Prints every packing represented by the graph which respects the demands, as the number
    /// of copies of each item type in the order of the instance file.
    ///
    /// The number of packings can be exponential in the size of the instance.
    ///
    /// Possible values: bool
    #[arg(long = "print-packings", verbatim_doc_comment)]
    print_packings: bool,

    /// Enables log message output from the builder.
    ///
    /// Possible values: bool
    #[arg(short = 'v', long = "verbose", verbatim_doc_comment)]
    verbose: bool,

    /// Enables logging of statistics from the builder.
    ///
    /// Possible values: bool
    #[arg(short = 's', long = "log-statistics", verbatim_doc_comment)]
    log_statistics: bool,
}

fn configure_logging(verbose: bool, log_statistics: bool) -> std::io::Result<()> {
    if log_statistics {
        configure_statistic_logging("c", None, None, None);
    }

    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "c ")?;

            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");
    Ok(())
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> ArcFlowSolverResult<()> {
    let args = Args::parse();

    configure_logging(args.verbose, args.log_statistics)?;

    match args.instance_path.extension().and_then(|ext| ext.to_str()) {
        Some("vbp") => {}
        _ => {
            return Err(ArcFlowSolverError::invalid_instance_file(
                args.instance_path.display(),
            ))
        }
    }

    let instance = vbp::parse_vbp(File::open(&args.instance_path)?)?;
    info!(
        "Read an instance with {} dimensions and {} item types",
        instance.bin_dimensions.len(),
        instance.item_dimensions_by_type.len()
    );

    let graph = ArcFlowBuilder::new(
        &instance.bin_dimensions,
        &instance.item_dimensions_by_type,
        &instance.demand_by_type,
    )?
    .with_options(ArcFlowOptions {
        item_ordering: args.item_ordering,
    })
    .build();

    if let Some(output_path) = args.output_path.as_ref() {
        let mut writer = GraphWriter::create(output_path)?;
        let comment = format!("arc-flow graph of {}", args.instance_path.display());
        graph_file::write_graph(&graph, &comment, &mut writer)?;
        writer.finish()?;
        info!("Wrote the graph to {}", output_path.display());
    }

    if args.print_packings {
        for packing in graph.enumerate_packings() {
            println!("packing {}", packing.iter().join(" "));
        }
    }

    if should_log_statistics() {
        graph.statistics().log(StatisticLogger::new(["arcflow"]));
        log_statistic_postfix();
    }

    println!(
        "nodes={} arcs={} dp_states={}",
        graph.num_nodes(),
        graph.arcs().len(),
        graph.num_dp_states()
    );

    Ok(())
}
