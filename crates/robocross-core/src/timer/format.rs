/// Format whole seconds as `HH:MM:SS`.
pub fn format_hms(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Human-friendly duration, e.g. `"1 hour 2 minutes 5 seconds"`.
///
/// Zero-valued units are left out; zero itself reads `"0 seconds"`.
pub fn time_nice(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    let parts: Vec<String> = [(hours, "hour"), (minutes, "minute"), (seconds, "second")]
        .into_iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| {
            let plural = if value == 1 { "" } else { "s" };
            format!("{value} {unit}{plural}")
        })
        .collect();

    if parts.is_empty() {
        "0 seconds".to_string()
    } else {
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hms_pads_each_field() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(65), "00:01:05");
        assert_eq!(format_hms(3600 + 120 + 9), "01:02:09");
    }

    #[test]
    fn nice_handles_plurals() {
        assert_eq!(time_nice(65), "1 minute 5 seconds");
        assert_eq!(time_nice(300), "5 minutes");
        assert_eq!(time_nice(3601), "1 hour 1 second");
        assert_eq!(time_nice(7322), "2 hours 2 minutes 2 seconds");
        assert_eq!(time_nice(0), "0 seconds");
    }
}
