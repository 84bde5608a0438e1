#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    path::PathBuf,
    sync::{Arc, OnceLock},
    time::Duration,
};

/// Default model identifier for chat completions.
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default base URL for the OpenAI-compatible API endpoint.
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Default cap on combined submission content sent per student.
const DEFAULT_MAX_PROMPT_CHARS: usize = 60_000;

/// Folder created under the results directory root.
const RESULTS_DIR_NAME: &str = "Grading Results";

/// OpenAI credentials and optional tuning parameters sourced from the
/// environment.
#[derive(Clone)]
pub struct OpenAiEnv {
    /// Base URL for the OpenAI-compatible API endpoint.
    api_base:    String,
    /// API key used to authenticate requests.
    api_key:     String,
    /// Model identifier for chat completions.
    model:       String,
    /// Optional temperature override, if provided.
    temperature: Option<f32>,
    /// Optional top-p override, if provided.
    top_p:       Option<f32>,
}

impl OpenAiEnv {
    /// Construct an `OpenAiEnv` from environment variables; returns `None`
    /// if the API key is missing.
    fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").ok()?.trim().to_owned();
        if api_key.is_empty() {
            return None;
        }

        let api_base = std::env::var("OPENAI_ENDPOINT")
            .map(|value| value.trim().to_owned())
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let model = std::env::var("GRADEBOT_MODEL")
            .map(|value| value.trim().to_owned())
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let temperature = std::env::var("OPENAI_TEMPERATURE")
            .ok()
            .and_then(|s| s.parse::<f32>().ok());
        let top_p = std::env::var("OPENAI_TOP_P")
            .ok()
            .and_then(|s| s.parse::<f32>().ok());

        Some(Self {
            api_base,
            api_key,
            model,
            temperature,
            top_p,
        })
    }

    /// Returns the API base URL used for completion requests.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Returns the API key used for completion requests.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the configured temperature, if any.
    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    /// Returns the configured top_p, if any.
    pub fn top_p(&self) -> Option<f32> {
        self.top_p
    }
}

/// SMTP credentials and report-delivery settings sourced from the
/// environment.
#[derive(Clone)]
pub struct SmtpEnv {
    /// SMTP relay host.
    server:     String,
    /// SMTP relay port.
    port:       u16,
    /// Sender address, also used for authentication.
    sender:     String,
    /// Sender password or app password.
    password:   String,
    /// Instructor address that receives the report.
    recipient:  String,
    /// Instructor's first name, used in the subject line.
    first_name: String,
}

impl SmtpEnv {
    /// Construct an `SmtpEnv` from environment variables; returns `None`
    /// if any required field is missing.
    fn from_env() -> Option<Self> {
        let server = std::env::var("SMTP_SERVER").ok()?.trim().to_owned();
        let sender = std::env::var("SENDER_EMAIL").ok()?.trim().to_owned();
        let password = std::env::var("SENDER_EMAIL_PASSWORD").ok()?;
        let recipient = std::env::var("RESULTS_EMAIL").ok()?.trim().to_owned();

        if server.is_empty() || sender.is_empty() || recipient.is_empty() {
            return None;
        }

        let port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(587);
        let first_name = std::env::var("GRADEBOT_FIRST_NAME")
            .map(|value| value.trim().to_owned())
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| "Instructor".to_string());

        Some(Self {
            server,
            port,
            sender,
            password,
            recipient,
            first_name,
        })
    }

    /// Returns the SMTP relay host.
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Returns the SMTP relay port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the sender address.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the sender password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the instructor address that receives the report.
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Returns the instructor's first name.
    pub fn first_name(&self) -> &str {
        &self.first_name
    }
}

/// Runtime configuration shared across the crate.
pub struct ConfigState {
    /// Cached OpenAI configuration, if available.
    openai:             Option<OpenAiEnv>,
    /// Cached SMTP configuration, if available.
    smtp:               Option<SmtpEnv>,
    /// Directory holding the report artifact.
    results_dir:        PathBuf,
    /// Cap on combined submission content per student.
    max_prompt_chars:   usize,
    /// Deadline for a single completion request.
    completion_timeout: Duration,
}

impl ConfigState {
    /// Construct a new configuration instance from the environment.
    fn new() -> Self {
        let results_dir = std::env::var("GRADEBOT_RESULTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_results_dir());
        let max_prompt_chars = std::env::var("GRADEBOT_MAX_PROMPT_CHARS")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_PROMPT_CHARS);
        let completion_timeout = read_timeout_secs("GRADEBOT_COMPLETION_TIMEOUT_SECS", 30);

        Self {
            openai: OpenAiEnv::from_env(),
            smtp: SmtpEnv::from_env(),
            results_dir,
            max_prompt_chars,
            completion_timeout,
        }
    }

    /// Returns the OpenAI configuration, if the required environment
    /// variables are present.
    pub fn openai(&self) -> Option<&OpenAiEnv> {
        self.openai.as_ref()
    }

    /// Returns the SMTP configuration, if the required environment
    /// variables are present.
    pub fn smtp(&self) -> Option<&SmtpEnv> {
        self.smtp.as_ref()
    }

    /// Returns the directory holding the report artifact.
    pub fn results_dir(&self) -> &PathBuf {
        &self.results_dir
    }

    /// Returns the cap on combined submission content per student.
    pub fn max_prompt_chars(&self) -> usize {
        self.max_prompt_chars
    }

    /// Returns the deadline for a single completion request.
    pub fn completion_timeout(&self) -> Duration {
        self.completion_timeout
    }
}

/// Shared configuration handle used throughout the crate.
#[derive(Clone)]
pub struct ConfigHandle(Arc<ConfigState>);

impl std::ops::Deref for ConfigHandle {
    type Target = ConfigState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Global storage for the lazily constructed configuration state.
static CONFIG_SLOT: OnceLock<Arc<ConfigState>> = OnceLock::new();

/// Returns the active configuration, initializing it on demand.
pub fn get() -> ConfigHandle {
    ConfigHandle(Arc::clone(
        CONFIG_SLOT.get_or_init(|| Arc::new(ConfigState::new())),
    ))
}

/// Returns the configured OpenAI environment, if set.
pub fn openai_config() -> Option<OpenAiEnv> {
    get().openai().cloned()
}

/// Returns the configured SMTP environment, if set.
pub fn smtp_config() -> Option<SmtpEnv> {
    get().smtp().cloned()
}

/// Returns the directory holding the report artifact.
pub fn results_dir() -> PathBuf {
    get().results_dir().clone()
}

/// Returns the cap on combined submission content per student.
pub fn max_prompt_chars() -> usize {
    get().max_prompt_chars()
}

/// Returns the deadline for a single completion request.
pub fn completion_timeout() -> Duration {
    get().completion_timeout()
}

/// Resolves the default report location: the user's download directory,
/// falling back to the home directory, then the working directory.
fn default_results_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(RESULTS_DIR_NAME)
}

/// Parses an environment variable into a `Duration`, falling back to
/// `default_secs` when parsing fails or the variable is missing.
fn read_timeout_secs(env: &str, default_secs: u64) -> Duration {
    std::env::var(env)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default_secs))
}
