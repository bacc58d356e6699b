//! Find the OSDs behind high-latency client operations recorded by
//! radostrace.

use clap::Parser;
use osdtrace::utils::constants::DEFAULT_RADOSTRACE_THRESHOLD_US;
use osdtrace::utils::Logger;
use osdtrace::{log_error, run_radostrace, AnalyzeError, RadostraceOptions};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

/// Identify problematic OSDs involved in high-latency operations
#[derive(Parser)]
#[command(name = "analyze-radostrace")]
#[command(about = "Iteratively rank the OSDs most involved in slow radostrace operations")]
#[command(version)]
struct Args {
    /// radostrace output file
    log_file: PathBuf,

    /// Output of `ceph osd tree`, used to map OSDs to hosts
    osd_tree_file: PathBuf,

    /// Latency threshold in microseconds
    #[arg(default_value_t = DEFAULT_RADOSTRACE_THRESHOLD_US)]
    latency_threshold: u64,

    /// Print parsing diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    Logger::init(None, args.verbose);

    let options = RadostraceOptions {
        log_file: args.log_file,
        osd_tree_file: args.osd_tree_file,
        threshold: args.latency_threshold,
    };
    let mut out = BufWriter::new(io::stdout().lock());

    let result = run_radostrace(&options, &mut out)
        .and_then(|()| out.flush().map_err(AnalyzeError::from));

    if let Err(e) = result {
        // 이미 출력한 헤더는 남김
        let _ = out.flush();
        log_error!("{e}");
        process::exit(e.exit_code());
    }
}
