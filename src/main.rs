use clap::Parser;
use uart_bridge::utils::{logger, validation::Validate};
use uart_bridge::{BridgeEngine, BridgeSummary, CliConfig, LocalStorage, SerialPortOpener};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting uart-bridge");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    let summary_json = config.summary_json;
    let engine = BridgeEngine::new(SerialPortOpener, LocalStorage::default(), config);

    match engine.run().await {
        Ok(summary) => report_success(&summary, summary_json)?,
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

    Ok(())
}

fn report_success(summary: &BridgeSummary, as_json: bool) -> Result<(), serde_json::Error> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!(
        "✅ Sent {} character(s) on {}, captured {} byte(s) from {}",
        summary.transmit.chars_sent, summary.uart0, summary.receive.bytes_read, summary.uart1
    );
    println!("📁 Output saved to: {}", summary.output_path);
    Ok(())
}
