//! History command handler.

use clap::Args;
use postcraft_agent::{HistoryRecord, HistoryStore};
use postcraft_core::{config::AppConfig, AppResult};

/// List saved posts, newest first
#[derive(Args, Debug)]
pub struct HistoryCommand {
    /// Show at most this many posts
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl HistoryCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing history command");

        let store = HistoryStore::new(config.history_path());
        let records = newest_first(store.load_all(), self.limit);
        tracing::debug!("Showing {} saved posts from {:?}", records.len(), store.path());

        if self.json {
            return super::print_json(&records);
        }

        if records.is_empty() {
            println!("No saved posts yet.");
            return Ok(());
        }

        for record in &records {
            print_record(record);
        }
        Ok(())
    }
}

fn newest_first(mut records: Vec<HistoryRecord>, limit: Option<usize>) -> Vec<HistoryRecord> {
    records.reverse();
    if let Some(limit) = limit {
        records.truncate(limit);
    }
    records
}

fn print_record(record: &HistoryRecord) {
    println!(
        "[{}] {}",
        record.timestamp,
        record.headline.as_deref().unwrap_or("(no headline)")
    );
    if let Some(topic) = &record.topic {
        println!("  Topic: {}", topic);
    }
    if let Some(tone) = &record.tone {
        println!("  Tone: {}", tone);
    }
    if let Some(engagement) = &record.predicted_engagement {
        println!("  Engagement: {}", engagement);
    }
    if !record.hashtags.is_empty() {
        println!("  {}", record.hashtags.join(" "));
    }
    println!();
}
