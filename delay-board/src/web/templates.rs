//! Askama templates for the web frontend.

use askama::Template;

use crate::cache::{Notice, SnapshotView};
use crate::classify::DelayedTrain;

/// Delay board page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub trains: Vec<DelayedTrain>,
    pub vehicle_count: usize,
    pub update_time: String,
    pub notice: Option<Notice>,
}

impl IndexTemplate {
    pub fn from_view(view: &SnapshotView) -> Self {
        Self {
            trains: view.snapshot.records.clone(),
            vehicle_count: view.snapshot.vehicle_count,
            update_time: view.update_time.clone(),
            notice: view.notice.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Severity;

    fn train(name: &str, delay_sec: i64) -> DelayedTrain {
        DelayedTrain {
            delay_min: delay_sec / 60,
            delay_sec,
            name: name.to_string(),
            destination: "Győr".to_string(),
            next_stop: "Tata".to_string(),
            speed: "81 km/h".to_string(),
        }
    }

    #[test]
    fn renders_trains_and_notice() {
        let template = IndexTemplate {
            trains: vec![train("S12 (S12)", 420), train("Budapest–Hegyeshalom", 90)],
            vehicle_count: 431,
            update_time: "2026-01-15 13:00:00 CET".to_string(),
            notice: Some(Notice {
                message: "Data refreshed.",
                severity: Severity::Info,
            }),
        };

        let html = template.render().unwrap();
        assert!(html.contains("S12 (S12)"));
        assert!(html.contains("Budapest–Hegyeshalom"));
        assert!(html.contains("7 min"));
        assert!(html.contains("431"));
        assert!(html.contains("2026-01-15 13:00:00 CET"));
        assert!(html.contains("notice info"));
        assert!(html.contains("Data refreshed."));
    }

    #[test]
    fn renders_empty_state_without_notice() {
        let template = IndexTemplate {
            trains: vec![],
            vehicle_count: 0,
            update_time: "2026-01-15 13:00:00 CET".to_string(),
            notice: None,
        };

        let html = template.render().unwrap();
        assert!(html.contains("No delayed trains"));
        assert!(!html.contains("class=\"notice"));
    }

    #[test]
    fn escapes_feed_text() {
        let template = IndexTemplate {
            trains: vec![train("<script>x</script>", 120)],
            vehicle_count: 150,
            update_time: String::new(),
            notice: None,
        };

        let html = template.render().unwrap();
        assert!(!html.contains("<script>x</script>"));
    }
}
