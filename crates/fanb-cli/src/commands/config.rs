use clap::Subcommand;
use fanb_core::storage::data_dir;
use fanb_core::{Config, ConfigError};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value by dotted key, e.g. timer.focus_duration
    Get { key: String },
    /// Change one value and save the file
    Set { key: String, value: String },
    /// Print the whole configuration as JSON
    List,
    /// Overwrite the file with the defaults
    Reset,
    /// Print where the configuration file lives
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    if let ConfigAction::Reset = action {
        Config::default().save()?;
        println!("config reset to defaults");
        return Ok(());
    }
    if let ConfigAction::Path = action {
        println!("{}", data_dir()?.join("config.toml").display());
        return Ok(());
    }

    let mut config = Config::load()?;
    match action {
        ConfigAction::Get { key } => {
            let value = config.get(&key).ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            config.set(&key, &value)?;
            config.save()?;
            println!("{key} = {}", config.get(&key).unwrap_or(value));
        }
        ConfigAction::List => println!("{}", serde_json::to_string_pretty(&config)?),
        ConfigAction::Reset | ConfigAction::Path => {}
    }
    Ok(())
}
