//! CLI: extract palm lines from a cropped palm ROI and landmark JSON,
//! optionally apply a correction document, and write the analysis JSON.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use palm_lines::correct::{apply_corrections, CorrectedLines};
use palm_lines::detect::{analyze_palm, load_rgb};
use palm_lines::features::extract_features;
use palm_lines::reading::reading_from_features;
use palm_lines::{ExtractorParams, Landmarks};

#[derive(Parser, Debug)]
#[command(name = "palm-lines", version, about = "Palm-line extraction from a cropped palm image")]
struct Cli {
    /// Palm ROI image (any format the `image` crate decodes).
    image: PathBuf,

    /// Landmarks JSON: an array of [x, y] pixel pairs in ROI coordinates.
    #[arg(long)]
    landmarks: PathBuf,

    /// Optional pipeline params JSON (partial overrides are fine).
    #[arg(long)]
    params: Option<PathBuf>,

    /// Optional correction document applied after extraction.
    #[arg(long)]
    corrections: Option<PathBuf>,

    /// Output JSON path; stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = palm_lines::core::init_with_level(level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let params: ExtractorParams = match &cli.params {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => ExtractorParams::default(),
    };

    let pairs: Vec<[i32; 2]> = serde_json::from_str(&fs::read_to_string(&cli.landmarks)?)?;
    let landmarks = Landmarks::from_pairs(
        &pairs.iter().map(|&[x, y]| (x, y)).collect::<Vec<_>>(),
    );
    if !landmarks.is_complete() {
        log::warn!(
            "only {} of {} landmarks supplied; affected zones degrade to empty",
            landmarks.len(),
            Landmarks::COUNT
        );
    }

    let img = load_rgb(&cli.image)?;
    let mut analysis = analyze_palm(&img, &landmarks, params.clone())?;

    if let Some(path) = &cli.corrections {
        let corrections: CorrectedLines = serde_json::from_str(&fs::read_to_string(path)?)?;
        apply_corrections(&mut analysis.lines, &corrections, &params.confidence);
        analysis.features = extract_features(&analysis.lines);
        analysis.reading = reading_from_features(&analysis.features);
    }

    let json = serde_json::to_string_pretty(&analysis)?;
    match &cli.output {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}
