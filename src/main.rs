use clap::Parser;
use osdtrace::utils::Logger;
use osdtrace::{log_error, run_osdtrace, AnalyzeError, AnalyzeOptions};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

const EPILOGUE_HELP: &str = r#"EXAMPLES:
  # Statistics of the final op latencies of every OSD
  analyze-osdtrace osdtrace.out

  # The flags --show-in-ms, --osd, --field and --threshold apply to all modes.

  # Statistics of kv_commit latencies
  analyze-osdtrace osdtrace.out -f kv_commit

  # Statistics of recv_lat latencies of osd 22, in milliseconds
  analyze-osdtrace osdtrace.out -f recv_lat -o 22 -m

  # Trace lines sorted by kv_commit latency
  analyze-osdtrace osdtrace.out -f kv_commit -s

  # Which latency fields dominate ops slower than 100ms
  analyze-osdtrace osdtrace.out -i
"#;

/// Statistical analysis of osdtrace op latencies
#[derive(Parser)]
#[command(name = "analyze-osdtrace")]
#[command(about = "Print fio-style latency statistics of osdtrace output per OSD and op type")]
#[command(version)]
#[command(after_long_help = EPILOGUE_HELP)]
struct Args {
    /// Path to osdtrace output file
    osdtrace_file: PathBuf,

    /// ID of a single OSD to analyze (default: all OSDs)
    #[arg(short, long)]
    osd: Option<u32>,

    /// Use milliseconds for analysis output (default is microseconds)
    #[arg(short = 'm', long)]
    show_in_ms: bool,

    /// Sort osdtrace log lines by the latency value selected with --field
    #[arg(short, long)]
    sort: bool,

    /// Latency field to analyze for each op type
    #[arg(short, long, default_value = "lat")]
    field: String,

    /// Infer the percentage contribution of each latency field to the op latency
    #[arg(short, long)]
    infer: bool,

    /// Only include ops whose final latency is at least this many microseconds
    /// (default: 100000 with --infer, 0 otherwise)
    #[arg(short, long, allow_negative_numbers = true)]
    threshold: Option<i64>,

    /// Print the statistics or inference report as JSON (not with --sort)
    #[arg(short, long, conflicts_with = "sort")]
    json: bool,

    /// Print parsing diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Also write diagnostics to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl From<Args> for AnalyzeOptions {
    fn from(args: Args) -> Self {
        AnalyzeOptions {
            osdtrace_file: args.osdtrace_file,
            osd: args.osd,
            show_in_ms: args.show_in_ms,
            sort: args.sort,
            field: args.field,
            infer: args.infer,
            threshold: args.threshold,
            json: args.json,
        }
    }
}

fn main() {
    let args = Args::parse();
    Logger::init(args.log_file.as_deref(), args.verbose);

    let options = AnalyzeOptions::from(args);
    let mut out = BufWriter::new(io::stdout().lock());

    let result = run_osdtrace(&options, &mut out)
        .and_then(|()| out.flush().map_err(AnalyzeError::from));

    if let Err(e) = result {
        log_error!("{e}");
        let _ = Logger::flush();
        process::exit(e.exit_code());
    }
    let _ = Logger::flush();
}
