use clap::Subcommand;
use pomodoro_core::storage::{load_settings, save_settings, FileStore};
use pomodoro_core::PomodoroSettings;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a setting
    Get {
        /// Setting key (e.g. "workTime", "autoStartBreak")
        key: String,
    },
    /// Set a setting
    Set {
        /// Setting key
        key: String,
        /// New value
        value: String,
    },
    /// List all settings
    List,
    /// Reset settings to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::open()?;

    match action {
        ConfigAction::Get { key } => {
            let settings = load_settings(&store);
            match settings.get(&key) {
                Some(value) => println!("{value}"),
                None => {
                    eprintln!("unknown key: {key}");
                    eprintln!("known keys: {}", PomodoroSettings::keys().join(", "));
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut settings = load_settings(&store);
            settings.set(&key, &value)?;
            save_settings(&store, &settings)?;
            println!("ok");
        }
        ConfigAction::List => {
            let settings = load_settings(&store);
            let json = serde_json::to_string_pretty(&settings)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            save_settings(&store, &PomodoroSettings::default())?;
            println!("settings reset to defaults");
        }
    }
    Ok(())
}
