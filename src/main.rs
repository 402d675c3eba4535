use clap::{Parser, Subcommand};

mod log;
mod render;
mod report;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "pono-time-compare")]
#[command(about = "Pono solver wall clock comparison plots", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pair solver logs from two directories and render a scatter plot.
    Plot {
        /// Directory of baseline `*_log.txt` solver logs.
        #[arg(long)]
        baseline: String,

        /// Directory of treatment `*_log.txt` solver logs.
        #[arg(long)]
        treatment: String,

        #[arg(short = 'o', long, default_value = "time_comparison_plot.png")]
        out: String,

        /// Also write the paired runs as pretty-printed JSON.
        #[arg(long)]
        dump_json: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Plot {
            baseline,
            treatment,
            out,
            dump_json,
        } => {
            // 1) Scan both experiment directories. Either failing is fatal
            //    before any output is written.
            let baseline_times = log::scan_log_dir(&baseline)?;
            let treatment_times = log::scan_log_dir(&treatment)?;

            // 2) Join on the filename intersection.
            let sample = report::pair_tables(&baseline_times, &treatment_times);
            if sample.is_empty() {
                eprintln!(
                    "WARN: no shared log files between {} and {}",
                    baseline, treatment
                );
            }
            println!("Number of common files: {}", sample.len());
            println!(
                "Treatment faster on {} of {} shared runs",
                sample.improved(),
                sample.len()
            );

            if let Some(path) = dump_json {
                std::fs::write(&path, serde_json::to_string_pretty(&sample)?)?;
                println!("Wrote {}", path);
            }

            // 3) Render the scatter.
            render::render_scatter(&sample, &out)?;
            println!("Wrote {}", out);
            println!("Number of test cases plotted: {}", sample.len());
        }
    }

    Ok(())
}
