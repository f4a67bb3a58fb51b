use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("TOML parsing error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Failed to open serial port {port}: {source}")]
    PortOpenError {
        port: String,
        #[source]
        source: serialport::Error,
    },

    #[error("Serial port {port} error: {source}")]
    SerialError {
        port: String,
        #[source]
        source: serialport::Error,
    },

    #[error("I/O error on serial port {port}: {source}")]
    PortIoError {
        port: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Input file not found: {path}")]
    InputNotFoundError { path: String },

    #[error("Input file {path} is not valid UTF-8 text: {source}")]
    DecodeError {
        path: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Port,
    File,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl BridgeError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::TomlParseError(_) => ErrorCategory::Configuration,
            Self::PortOpenError { .. } | Self::SerialError { .. } | Self::PortIoError { .. } => {
                ErrorCategory::Port
            }
            Self::InputNotFoundError { .. } | Self::DecodeError { .. } => ErrorCategory::File,
            Self::IoError(_) => ErrorCategory::Io,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::File => ErrorSeverity::High,
            ErrorCategory::Port => ErrorSeverity::Critical,
            ErrorCategory::Io => ErrorSeverity::Medium,
        }
    }

    /// Process exit status for this error. 2 matches clap's status for usage errors.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 2,
            ErrorCategory::Port => 3,
            ErrorCategory::File => 4,
            ErrorCategory::Io => 1,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::PortOpenError { port, .. } => format!("Could not open serial port {}", port),
            Self::SerialError { port, .. } | Self::PortIoError { port, .. } => {
                format!("Communication with serial port {} failed", port)
            }
            Self::InputNotFoundError { path } => format!("Input file {} does not exist", path),
            Self::DecodeError { path, .. } => format!("Input file {} is not UTF-8 text", path),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Check the command-line flags with --help",
            Self::TomlParseError(_) => "Make sure the profile is valid TOML",
            Self::PortOpenError { .. } => {
                "Check that the device exists, is not in use, and that you have permission to open it"
            }
            Self::SerialError { .. } | Self::PortIoError { .. } => {
                "Check the cable and that the device is still connected"
            }
            Self::InputNotFoundError { .. } => "Check the --input path",
            Self::DecodeError { .. } => "Convert the input file to UTF-8",
            Self::IoError(_) => "Check that the output location is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
