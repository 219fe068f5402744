use clap::Subcommand;
use fanb_core::{Config, Theme};

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Set the theme explicitly
    Set {
        /// "light" or "dark"
        theme: Theme,
    },
}

pub fn run(action: ThemeAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    let theme = match action {
        ThemeAction::Show => {
            println!("{}", config.theme());
            return Ok(());
        }
        ThemeAction::Toggle => config.theme().toggle(),
        ThemeAction::Set { theme } => theme,
    };
    config.set_theme(theme);
    config.save()?;
    println!("{theme}");
    Ok(())
}
