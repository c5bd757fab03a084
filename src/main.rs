// Entry point and high-level CLI flow.
//
// - With file arguments, each file is treated as one upload and its
//   dashboard is printed in turn.
// - Without arguments, a small menu lets the user upload files and show the
//   dashboard for the latest upload, until they exit.
use clap::Parser;
use media_insights::config::{Args, DashboardConfig};
use media_insights::{output, Dashboard, Session, Upload};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// Read a single line of input after printing `prompt`.
///
/// Returns `None` once stdin is closed.
fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

/// Print (and optionally export) one dashboard.
fn present(cfg: &DashboardConfig, dashboard: &Dashboard) -> anyhow::Result<()> {
    if cfg.json {
        println!("{}", serde_json::to_string_pretty(dashboard)?);
    } else {
        println!("{}", output::render_markdown(dashboard, cfg.preview_rows));
    }
    if let Some(dir) = &cfg.output_dir {
        let written = output::export(dir, dashboard)?;
        eprintln!("Exported {} files to {}", written.len(), dir.display());
    }
    Ok(())
}

/// Process every file given on the command line. Returns `false` if any
/// upload was rejected.
fn run_batch(cfg: &DashboardConfig, session: &mut Session) -> anyhow::Result<bool> {
    let mut all_ok = true;
    for path in &cfg.files {
        let result = Upload::from_path(path).and_then(|upload| session.process(&upload));
        match result {
            Ok(dashboard) => present(cfg, &dashboard)?,
            Err(e) => {
                eprintln!("{}: {}\n", path.display(), e);
                all_ok = false;
            }
        }
    }
    Ok(all_ok)
}

/// Menu loop. The session keeps cleaned uploads so showing the same
/// upload again does not re-parse it.
fn run_interactive(cfg: &DashboardConfig, session: &mut Session) -> anyhow::Result<()> {
    let mut current: Option<Upload> = None;
    println!("Media Intelligence Dashboard");
    println!(
        "Required CSV columns: Date, Platform, Sentiment, Location, Engagements, Media Type\n"
    );
    loop {
        println!("Select an option:");
        println!("[1] Upload a CSV file");
        println!("[2] Show dashboard");
        println!("[3] Exit\n");
        let Some(choice) = read_line("Enter choice: ") else {
            break;
        };
        match choice.as_str() {
            "1" => {
                let Some(path) = read_line("Path to CSV file: ") else {
                    break;
                };
                match Upload::from_path(&path) {
                    Ok(upload) => match session.clean(&upload) {
                        Ok(dataset) => {
                            println!(
                                "Successfully loaded and cleaned {} data entries.\n",
                                media_insights::util::format_int(dataset.len())
                            );
                            current = Some(upload);
                        }
                        Err(e) => println!("{}\n", e),
                    },
                    Err(e) => println!("{}\n", e),
                }
            }
            "2" => match &current {
                Some(upload) => match session.process(upload) {
                    Ok(dashboard) => present(cfg, &dashboard)?,
                    Err(e) => println!("{}\n", e),
                },
                None => println!("Awaiting a CSV file. Please upload one first (option 1).\n"),
            },
            "3" => {
                println!("Exiting the program.");
                break;
            }
            _ => println!("Invalid choice. Please enter 1, 2 or 3.\n"),
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cfg = Args::parse().into_config();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut session = Session::new();
    if cfg.interactive() {
        run_interactive(&cfg, &mut session)?;
    } else if !run_batch(&cfg, &mut session)? {
        std::process::exit(1);
    }
    Ok(())
}
