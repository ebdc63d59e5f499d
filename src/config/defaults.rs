//! Default configuration constants.

/// Default Doppler API base URL.
pub const DEFAULT_ENDPOINT: &str = "https://api.doppler.com";

/// Path of the secrets download route, appended to the endpoint.
pub const SECRETS_DOWNLOAD_PATH: &str = "/v3/configs/config/secrets/download";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Config file names searched in the working directory, in order.
pub const CONFIG_FILE_CANDIDATES: &[&str] = &[
    "doppler-substitute.json",
    "doppler-substitute.yaml",
    "doppler-substitute.yml",
    "doppler-substitute.toml",
];
