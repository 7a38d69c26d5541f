use clap::Parser;
use csv_json_service::utils::error::ErrorSeverity;
use csv_json_service::utils::{logger, validation::validate_delimiter};
use csv_json_service::{to_json, to_json_pretty, CsvConverter, Result};

#[derive(Parser)]
#[command(name = "csv2json")]
#[command(about = "Convert a CSV file with a header row to a JSON array of objects")]
struct Args {
    /// CSV file to convert
    input: String,

    /// Write the JSON here instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Field delimiter, a single ASCII character
    #[arg(short, long, default_value = ",")]
    delimiter: String,

    /// Trim whitespace around fields
    #[arg(long)]
    trim: bool,

    /// Fail on input without a header row instead of printing []
    #[arg(long)]
    require_header: bool,

    /// Only convert the first N rows
    #[arg(long)]
    preview: Option<usize>,

    /// Emit compact JSON instead of indented JSON
    #[arg(long)]
    compact: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    if let Err(e) = run(&args).await {
        tracing::error!(
            "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());

        let exit_code = match e.severity() {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(args: &Args) -> Result<()> {
    let delimiter = validate_delimiter("delimiter", &args.delimiter)?;
    let converter = CsvConverter::new()
        .with_delimiter(delimiter)
        .with_trim(args.trim)
        .with_require_header(args.require_header);

    tracing::info!("📁 Reading {}", args.input);
    let bytes = tokio::fs::read(&args.input).await?;

    let mut dataset = converter.parse_bytes(&bytes)?;
    if let Some(n) = args.preview {
        dataset = dataset.preview(n);
    }

    let json = if args.compact {
        to_json(&dataset)?
    } else {
        to_json_pretty(&dataset)?
    };

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, json.as_bytes()).await?;
            tracing::info!("✅ Wrote {} records to {}", dataset.len(), path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
