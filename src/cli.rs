use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Path to config TOML
    #[arg(long, default_value = "chainprobe.toml")]
    pub config: String,

    /// Chart output path (overrides config)
    #[arg(long, short = 'o', value_name = "PNG_PATH")]
    pub output: Option<String>,

    /// Write every sequence to a CSV file
    #[arg(long, value_name = "CSV_PATH")]
    pub csv: Option<String>,

    /// Write the sweep as JSON
    #[arg(long, value_name = "JSON_PATH")]
    pub json: Option<String>,

    /// Skip chart rendering
    #[arg(long, default_value_t = false)]
    pub no_plot: bool,

    /// Check the model against simulated fills (overrides config)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub simulate: Option<bool>,

    /// Write a commented default config to --config and exit
    #[arg(long, default_value_t = false)]
    pub write_config: bool,

    /// Log level filter (overrides config; RUST_LOG takes precedence)
    #[arg(long)]
    pub log_level: Option<String>,
}
