//! Timestamp formatting for the two subtitle grammars.
//!
//! Pure functions from seconds to the exact timestamp text the artifacts
//! carry. Negative inputs clamp to zero.

/// Format seconds as a numbered-block timestamp (`HH:MM:SS,mmm`).
pub fn format_srt_time(secs: f64) -> String {
    let total_ms = (secs.max(0.0) * 1000.0).round() as u64;

    let millis = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let s = total_secs % 60;
    let total_mins = total_secs / 60;
    let m = total_mins % 60;
    let h = total_mins / 60;

    format!("{:02}:{:02}:{:02},{:03}", h, m, s, millis)
}

/// Format seconds as a styled-events timestamp (`H:MM:SS.cc`, centiseconds).
pub fn format_ass_time(secs: f64) -> String {
    let total_cs = (secs.max(0.0) * 100.0).round() as u64;

    let cs = total_cs % 100;
    let total_secs = total_cs / 100;
    let s = total_secs % 60;
    let total_mins = total_secs / 60;
    let m = total_mins % 60;
    let h = total_mins / 60;

    format!("{}:{:02}:{:02}.{:02}", h, m, s, cs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srt_time_formats() {
        assert_eq!(format_srt_time(0.0), "00:00:00,000");
        assert_eq!(format_srt_time(1.5), "00:00:01,500");
        assert_eq!(format_srt_time(61.042), "00:01:01,042");
        assert_eq!(format_srt_time(3601.5), "01:00:01,500");
        assert_eq!(format_srt_time(-3.0), "00:00:00,000");
    }

    #[test]
    fn ass_time_formats() {
        assert_eq!(format_ass_time(0.0), "0:00:00.00");
        assert_eq!(format_ass_time(61.25), "0:01:01.25");
        assert_eq!(format_ass_time(3600.0), "1:00:00.00");
        assert_eq!(format_ass_time(7325.678), "2:02:05.68");
    }

    #[test]
    fn ass_time_rounds_to_centiseconds() {
        assert_eq!(format_ass_time(1.006), "0:00:01.01");
        assert_eq!(format_ass_time(1.004), "0:00:01.00");
    }
}
