/// Human-friendly duration: `850ms`, `12.4s`, `3m 05s`, `1h 02m`.
pub fn format_duration(ms: u64) -> String {
    match ms {
        0..=999 => format!("{}ms", ms),
        // Truncated so 59.95s never renders as 60.0s
        1_000..=59_999 => format!("{}.{}s", ms / 1000, (ms % 1000) / 100),
        60_000..=3_599_999 => format!("{}m {:02}s", ms / 60_000, (ms % 60_000) / 1000),
        _ => format!("{}h {:02}m", ms / 3_600_000, (ms % 3_600_000) / 60_000),
    }
}
