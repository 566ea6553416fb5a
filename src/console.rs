use serde_json::Value;
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior};

use crate::messages::QueueActionRequest;

/// One line typed into the console
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Join(String),
    Queue(Vec<QueueActionRequest>),
    Clear,
    Messages,
    Quit,
}

impl Command {
    /// Blank lines parse to `None`. Anything that isn't a keyword must be a
    /// JSON action or a JSON array of actions.
    pub fn parse(line: &str) -> Result<Option<Self>, serde_json::Error> {
        let line = line.trim();
        let command = match line {
            "" => return Ok(None),
            "clear" => Command::Clear,
            "messages" => Command::Messages,
            "quit" | "exit" => Command::Quit,
            _ => match line.strip_prefix("join ") {
                Some(name) if !name.trim().is_empty() => Command::Join(name.trim().to_string()),
                _ => Command::Queue(parse_actions(line)?),
            },
        };
        Ok(Some(command))
    }
}

/// Ticker for the background message drain. A slow drain pushes the next
/// tick back instead of triggering a burst of catch-up drains.
pub fn poll_timer(period: Duration) -> Interval {
    // interval() panics on a zero period
    let mut interval = tokio::time::interval(period.max(Duration::from_millis(10)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

fn parse_actions(line: &str) -> Result<Vec<QueueActionRequest>, serde_json::Error> {
    let actions = match serde_json::from_str::<Value>(line)? {
        Value::Array(items) => items.into_iter().map(QueueActionRequest::from).collect(),
        single => vec![QueueActionRequest::from(single)],
    };
    Ok(actions)
}
