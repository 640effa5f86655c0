use std::env;
use std::path::PathBuf;

/// Configuration loaded from environment variables
#[derive(Debug)]
pub struct Config {
    pub api_key: String,
    pub api_host: String,
    pub requests_per_minute: f64,
    pub output_path: PathBuf,
}

fn parse_output_from_args() -> Option<PathBuf> {
    let args: Vec<String> = env::args().collect();
    if let Some(idx) = args.iter().position(|x| x == "--output") {
        return args.get(idx + 1).map(PathBuf::from);
    }
    None
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// CMC_API_KEY is required. CMC_API_HOST defaults to the sandbox API,
    /// REQUESTS_PER_MINUTE to 30, OUTPUT_PATH to tokens.json. A
    /// `--output <path>` argument overrides OUTPUT_PATH.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let api_key = env::var("CMC_API_KEY")
            .map_err(|_| "CMC_API_KEY must be set in the environment or .env file")?;

        let api_host = env::var("CMC_API_HOST")
            .unwrap_or_else(|_| "sandbox-api.coinmarketcap.com".to_string());

        let requests_per_minute: f64 = match env::var("REQUESTS_PER_MINUTE") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| format!("REQUESTS_PER_MINUTE is not a number: {}", raw))?,
            Err(_) => 30.0,
        };

        if requests_per_minute <= 0.0 {
            return Err("REQUESTS_PER_MINUTE must be positive".into());
        }

        let output_path = parse_output_from_args()
            .or_else(|| env::var("OUTPUT_PATH").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("tokens.json"));

        Ok(Self {
            api_key,
            api_host,
            requests_per_minute,
            output_path,
        })
    }
}
