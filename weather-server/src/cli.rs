use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::Password;
use std::path::PathBuf;
use weather_tools::Config;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Weather tool router")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve tool calls over HTTP.
    Serve {
        /// Listen address, e.g. "0.0.0.0:8787". Overrides config and environment.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Store the OpenWeather API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };

        match self.command {
            Command::Serve { bind } => {
                let mut config = Config::load_from(&path)?.with_env_overrides();
                if let Some(bind) = bind {
                    config.bind = bind;
                }
                crate::server::serve(&config).await
            }
            Command::Configure => {
                let mut config = Config::load_from(&path)?;

                let api_key = Password::new("OpenWeather API key:")
                    .without_confirmation()
                    .prompt()
                    .context("Failed to read API key")?;
                config.set_api_key(api_key.trim().to_string());
                config.api_key()?;

                config.save_to(&path)?;
                println!("Saved configuration to {}", path.display());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_accepts_bind_override() {
        let cli = Cli::try_parse_from(["weather-server", "serve", "--bind", "0.0.0.0:9000"])
            .expect("valid args");

        assert!(matches!(cli.command, Command::Serve { bind: Some(ref b) } if b == "0.0.0.0:9000"));
        assert!(cli.config.is_none());
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["weather-server", "configure", "--config", "/tmp/w.toml"])
            .expect("valid args");

        assert!(matches!(cli.command, Command::Configure));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/w.toml")));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["weather-server"]).is_err());
    }
}
