use anyhow::Result;
use clap::Parser;
use log::{error, info};
use loudgain_scanner::{Loudgain, ScanOptions, scan_library};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// root directory to scan; each album is expected in its own folder
    directory: PathBuf,
}

fn main() -> Result<()> {
    _ = pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_secs()
        .parse_default_env()
        .try_init();

    let parsed = Cli::try_parse();
    // --help and --version
    if let Err(e) = &parsed {
        if !e.use_stderr() {
            e.exit();
        }
    }

    // the tool is located before the argument is checked
    let loudgain = Loudgain::resolve()?;
    info!("Using loudgain: {}", loudgain);

    let cli = match parsed {
        Ok(cli) => cli,
        // usage errors exit with 1 like every other setup failure
        Err(e) => {
            _ = e.print();
            std::process::exit(1);
        }
    };

    let options = ScanOptions {
        root_dir: cli.directory,
    };

    match scan_library(&options, &loudgain) {
        Ok(report) => {
            report.log_summary();
            Ok(())
        }
        Err(e) => {
            error!("Scan failed: {}", e);
            Err(e)?
        }
    }
}
