//! Text derived from the countdown for rendering.

/// Title shown while nothing is counting down.
pub const IDLE_TITLE: &str = "Pomodoro Timer";

/// `MM:SS`, zero padded. Minutes are not folded into hours.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Window/tab title: the live countdown while running, a fixed title otherwise.
pub fn window_title(remaining_secs: u64, label: &str, running: bool) -> String {
    if running {
        format!("{} • {}", format_clock(remaining_secs), label)
    } else {
        IDLE_TITLE.to_string()
    }
}

/// 0.0 .. 1.0 fraction of the run already elapsed.
pub fn progress(remaining_secs: u64, total_secs: u64) -> f64 {
    if total_secs == 0 {
        return 0.0;
    }
    (1.0 - remaining_secs as f64 / total_secs as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(6000), "100:00");
    }

    #[test]
    fn title_tracks_running_state() {
        assert_eq!(window_title(299, "Short Break (5m)", true), "04:59 • Short Break (5m)");
        assert_eq!(window_title(299, "Short Break (5m)", false), "Pomodoro Timer");
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(progress(300, 300), 0.0);
        assert_eq!(progress(0, 300), 1.0);
        assert_eq!(progress(150, 300), 0.5);
        assert_eq!(progress(500, 300), 0.0);
        assert_eq!(progress(10, 0), 0.0);
    }
}
