// src/logging.rs

use crate::config::get_config;
use crate::models::WebhookCallLog;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Appends a webhook call record to the configured call log file.
pub fn log_webhook_call(log: &WebhookCallLog) {
    append_call_log(get_config().call_log_path, log);
}

fn append_call_log(path: impl AsRef<Path>, log: &WebhookCallLog) {
    let log_entry = format!(
        "[{}] {} - {} - Status: {} - Time: {}ms\n",
        log.timestamp.to_rfc3339(),
        log.endpoint,
        log.request_summary,
        log.response_status,
        log.response_time_ms
    );

    let file = OpenOptions::new().append(true).create(true).open(path);

    match file {
        Ok(mut file) => {
            if let Err(e) = file.write_all(log_entry.as_bytes()) {
                eprintln!("Failed to write to call log: {}", e);
            }
        }
        Err(e) => eprintln!("Failed to open call log: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_append_call_log_writes_one_line_per_call() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("calls.log");

        let log = WebhookCallLog {
            timestamp: Utc::now(),
            endpoint: "http://localhost:5678/webhook/ai-chat".to_string(),
            request_summary: "hello".to_string(),
            response_status: 200,
            response_time_ms: 42,
        };

        append_call_log(&path, &log);
        append_call_log(&path, &log);

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.contains("http://localhost:5678/webhook/ai-chat"));
        assert!(contents.contains("Status: 200"));
        assert!(contents.contains("Time: 42ms"));
    }
}
