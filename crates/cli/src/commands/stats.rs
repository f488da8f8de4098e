//! Stats command handler.
//!
//! Handles post analytics display.

use clap::Args;
use postcraft_agent::{Analytics, HistoryStore};
use postcraft_core::{config::AppConfig, AppResult};

/// Show post analytics
#[derive(Args, Debug)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatsCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing stats command");

        let analytics = HistoryStore::new(config.history_path()).compute_analytics();

        if self.json {
            return super::print_json(&analytics);
        }

        print!("{}", render(&analytics));
        Ok(())
    }
}

fn render(analytics: &Analytics) -> String {
    let mut out = format!(
        "Total posts: {}\nAverage engagement: {:.1}\n",
        analytics.total_posts, analytics.average_engagement
    );

    if !analytics.tone_distribution.is_empty() {
        out.push_str("Tone distribution:\n");
        for (tone, count) in &analytics.tone_distribution {
            out.push_str(&format!("  {}: {}\n", tone, count));
        }
    }
    out
}
