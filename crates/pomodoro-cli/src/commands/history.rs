use chrono::Utc;
use clap::Subcommand;
use pomodoro_core::storage::{load_history, save_history, FileStore};
use pomodoro_core::History;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Print all recorded focus sessions as JSON
    List,
    /// Today's completed focus sessions
    Today,
    /// Delete all records
    Clear,
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::open()?;

    match action {
        HistoryAction::List => {
            let history = load_history(&store);
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
        HistoryAction::Today => {
            let history = load_history(&store);
            let today = Utc::now().date_naive();
            let summary = serde_json::json!({
                "date": today.to_string(),
                "completed": history.today_completed_count(today),
                "totalCompleted": history.completed_count(),
                "totalRecords": history.len(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        HistoryAction::Clear => {
            save_history(&store, &History::new())?;
            println!("history cleared");
        }
    }
    Ok(())
}
