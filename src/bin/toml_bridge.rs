use anyhow::Context;
use clap::Parser;
use uart_bridge::utils::{logger, validation::Validate};
use uart_bridge::{BridgeEngine, LocalStorage, SerialPortOpener, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-bridge")]
#[command(about = "uart-bridge driven by a TOML profile")]
struct Args {
    /// Path to TOML profile
    #[arg(short, long, default_value = "uart-bridge.toml")]
    config: String,

    /// Override files.input from the profile
    #[arg(long)]
    input: Option<String>,

    /// Override files.output from the profile
    #[arg(long)]
    output: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Print the plan without opening any port
    #[arg(long)]
    dry_run: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    summary_json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load profile '{}': {}", args.config, e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    // 初始化日誌
    let verbose = args.verbose || config.verbose();
    if config.json_logs() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }
    tracing::info!("Loaded profile from {}", args.config);

    let cwd = std::env::current_dir().context("cannot determine the current directory")?;
    config.apply_overrides(args.input.as_deref(), args.output.as_deref(), &cwd);

    if let Err(e) = config.validate() {
        tracing::error!("Profile validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    let base = TomlConfig::base_dir(&args.config);

    if args.dry_run {
        println!("{}", config.plan(&base));
        return Ok(());
    }

    let output_path = config.resolved_output(&base).display().to_string();
    let engine = BridgeEngine::new(SerialPortOpener, LocalStorage::new(base), config);
    match engine.run().await {
        Ok(mut summary) => {
            summary.output_path = output_path;
            if args.summary_json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "✅ Sent {} character(s), captured {} byte(s)",
                    summary.transmit.chars_sent, summary.receive.bytes_read
                );
                println!("📁 Output saved to: {}", summary.output_path);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "Bridge run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}
