//! Small UI helpers: human-readable sizes, truncation, icons.

const UNITS: [&str; 6] = ["B", "K", "M", "G", "T", "P"];

/// Bytes with binary prefixes, one decimal once past the first unit.
pub fn human(b: f64) -> String {
    human_f64(b.max(0.0))
}

pub fn human_rate(bytes_per_sec: f64) -> String {
    format!("{}/s", human_f64(bytes_per_sec.max(0.0)))
}

fn human_f64(mut v: f64) -> String {
    let mut i = 0;
    while v > 1024.0 && i < UNITS.len() - 1 {
        v /= 1024.0;
        i += 1;
    }
    if i == 0 {
        format!("{v:.0}{}", UNITS[i])
    } else {
        format!("{v:.1}{}", UNITS[i])
    }
}

pub fn truncate_middle(s: &str, max: usize) -> String {
    let n = s.chars().count();
    if n <= max {
        return s.to_string();
    }
    if max <= 3 {
        return "...".into();
    }
    let keep = max - 3;
    let left = keep / 2;
    let right = keep - left;
    let head: String = s.chars().take(left).collect();
    let tail: String = s.chars().skip(n - right).collect();
    format!("{head}...{tail}")
}

pub fn disk_icon(filesystem: &str) -> &'static str {
    let fs = filesystem.to_ascii_lowercase();
    if fs.contains("nvme") {
        "⚡"
    } else if fs.contains("mmcblk") {
        "💾"
    } else if fs.starts_with("/dev/sd") {
        "💽"
    } else if fs.contains("overlay") || fs.contains("tmpfs") {
        "📦"
    } else {
        "🖴"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_picks_unit() {
        assert_eq!(human(512.0), "512B");
        assert_eq!(human(1024.0), "1024B");
        assert_eq!(human(1536.0), "1.5K");
        assert_eq!(human(3.0 * 1024.0 * 1024.0 * 1024.0), "3.0G");
        assert_eq!(human_rate(2048.0 + 512.0), "2.5K/s");
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate_middle("short", 10), "short");
        assert_eq!(truncate_middle("/mnt/ünïcödé/disk", 9), "/mn...isk");
    }
}
