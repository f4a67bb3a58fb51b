use crate::config::{defaults, timing_from_millis, validate_timing, ReceiveModeArg};
use crate::core::ConfigProvider;
use crate::domain::model::{ReceiveMode, Timing};
use crate::utils::error::{BridgeError, Result};
use crate::utils::validation::{
    validate_path, validate_port_name, validate_positive_number, validate_required_field, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A bridge run described as a TOML profile.
///
/// ```toml
/// [ports]
/// uart0 = "/dev/ttyUSB0"
/// uart1 = "/dev/ttyUSB1"
/// baud = 9600
///
/// [files]
/// input = "commands.txt"
/// output = "capture.txt"
///
/// [timing]
/// char_delay_ms = 20
///
/// [receive]
/// mode = "quiet"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub ports: PortsConfig,
    pub files: FilesConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub receive: ReceiveConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortsConfig {
    pub uart0: String,
    pub uart1: String,
    pub baud: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    pub input: String,
    pub output: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimingConfig {
    pub settle_ms: Option<u64>,
    pub char_delay_ms: Option<u64>,
    pub drain_ms: Option<u64>,
    pub read_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReceiveConfig {
    #[serde(default)]
    pub mode: ReceiveModeArg,
    pub quiet_ms: Option<u64>,
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BridgeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${SERIAL_TX})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| BridgeError::config(format!("invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    /// Directory that relative paths inside a profile are resolved against.
    pub fn base_dir<P: AsRef<Path>>(config_path: P) -> PathBuf {
        config_path
            .as_ref()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    /// 命令列覆蓋設定：路徑相對於 `cwd`，不是設定檔所在目錄
    pub fn apply_overrides(&mut self, input: Option<&str>, output: Option<&str>, cwd: &Path) {
        if let Some(input) = input {
            self.files.input = cwd.join(input).display().to_string();
        }
        if let Some(output) = output {
            self.files.output = cwd.join(output).display().to_string();
        }
    }

    pub fn resolved_input(&self, base: &Path) -> PathBuf {
        base.join(&self.files.input)
    }

    pub fn resolved_output(&self, base: &Path) -> PathBuf {
        base.join(&self.files.output)
    }

    /// Human-readable description of what a run would do. Touches no device.
    pub fn plan(&self, base: &Path) -> String {
        let timing = self.timing();
        let mut lines = vec![
            "🔍 Dry run, no port will be opened".to_string(),
            format!("  TX port: {} @ {} baud", self.uart0(), self.baud()),
            format!("  RX port: {} @ {} baud", self.uart1(), self.baud()),
            format!("  Input:   {}", self.resolved_input(base).display()),
            format!("  Output:  {}", self.resolved_output(base).display()),
            format!(
                "  Timing:  settle {:?}, per char {:?}, drain {:?}, read timeout {:?}",
                timing.settle, timing.char_delay, timing.drain, timing.read_timeout
            ),
        ];
        lines.push(match self.receive_mode() {
            ReceiveMode::Snapshot => "  Receive: snapshot of bytes available after drain".to_string(),
            ReceiveMode::Quiet { quiet, max } => {
                format!("  Receive: until {:?} of silence, at most {:?}", quiet, max)
            }
        });
        lines.join("\n")
    }
}

impl ConfigProvider for TomlConfig {
    fn uart0(&self) -> &str {
        &self.ports.uart0
    }

    fn uart1(&self) -> &str {
        &self.ports.uart1
    }

    // Validation rejects a missing baud before the engine ever asks for it.
    fn baud(&self) -> u32 {
        self.ports.baud.unwrap_or_default()
    }

    fn input_path(&self) -> &str {
        &self.files.input
    }

    fn output_path(&self) -> &str {
        &self.files.output
    }

    fn timing(&self) -> Timing {
        let t = &self.timing;
        timing_from_millis(
            t.settle_ms.unwrap_or(defaults::SETTLE_MS),
            t.char_delay_ms.unwrap_or(defaults::CHAR_DELAY_MS),
            t.drain_ms.unwrap_or(defaults::DRAIN_MS),
            t.read_timeout_ms.unwrap_or(defaults::READ_TIMEOUT_MS),
        )
    }

    fn receive_mode(&self) -> ReceiveMode {
        self.receive.mode.resolve(
            self.receive.quiet_ms.unwrap_or(defaults::QUIET_MS),
            self.receive.timeout_ms.unwrap_or(defaults::RECEIVE_TIMEOUT_MS),
        )
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_port_name("ports.uart0", &self.ports.uart0)?;
        validate_port_name("ports.uart1", &self.ports.uart1)?;
        let baud = validate_required_field("ports.baud", &self.ports.baud)?;
        validate_positive_number("ports.baud", u64::from(*baud), 1)?;
        validate_path("files.input", &self.files.input)?;
        validate_path("files.output", &self.files.output)?;
        validate_timing(&self.timing(), &self.receive_mode())
    }
}
