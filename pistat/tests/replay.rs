//! Headless replay through the binary: frames in, summary out.
use assert_cmd::Command;
use std::io::Write;

const NET: &str = r#"{"host": {"hostname": "pi", "uptime": 7200}, "temp": 47.6, "net_stats": [
  {"interface": {"interface_path": "/sys/class/net/eth0", "interface_name": "eth0"},
   "upload_total": 10, "download_total": 300, "upload_speed": 1.5, "download_speed": 20.0, "timestamp": 1},
  {"interface": {"interface_path": "/sys/class/net/wlan0", "interface_name": "wlan0"},
   "upload_total": 40, "download_total": 900, "upload_speed": 2.0, "download_speed": 4.0, "timestamp": 1}
]}"#;

const PROCS: &str = r#"{"cpu_usage": [{"user": 30, "nice": 0, "system": 20, "idle": 50, "iowait": 0, "irq": 0, "softirq": 0, "steal": 0, "guest": 0, "guest_nice": 0}], "proc": [{"pid": 7, "threads": 3, "name": "sshd", "mem": 2048, "cpu_usage": 10, "start_time": 0}, {"pid": 99, "threads": 1, "name": "top", "mem": 512, "cpu_usage": 1, "start_time": 0}]}"#;

fn frames_file(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().expect("tempfile");
    for l in lines {
        // one frame per line
        writeln!(f, "{}", l.replace('\n', " ")).expect("write frame");
    }
    f
}

#[test]
fn replay_prints_summary() {
    let f = frames_file(&[NET, "", PROCS]);
    let out = Command::cargo_bin("pistat")
        .unwrap()
        .arg("--no-persist")
        .arg("--replay")
        .arg(f.path())
        .output()
        .unwrap();
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(out.status.success(), "{text}");
    assert!(text.contains("frames: 2 applied, 0 discarded"), "{text}");
    assert!(text.contains("host: pi (up 2 hours)"), "{text}");
    assert!(text.contains("temp: 48°C"), "{text}");
    assert!(text.contains("net: wlan0 samples=1"), "{text}");
    assert!(text.contains("down_total=900 up_total=40"), "{text}");
    assert!(text.contains("processes: 2"), "{text}");
    let sshd = text.find("sshd").expect("sshd listed");
    let top = text.find(" top ").expect("top listed");
    assert!(sshd < top, "memory order expected\n{text}");
}

#[test]
fn replay_exits_nonzero_when_latched() {
    let f = frames_file(&[NET, r#"{"ram": {"total": "lots"}}"#, PROCS]);
    let out = Command::cargo_bin("pistat")
        .unwrap()
        .args(["--no-persist", "--replay"])
        .arg(f.path())
        .output()
        .unwrap();
    let text = String::from_utf8_lossy(&out.stdout);
    assert_eq!(out.status.code(), Some(1), "{text}");
    assert!(text.contains("frames: 1 applied, 1 discarded"), "{text}");
    assert!(text.contains("error (line 2): Fatal error, malformed message"), "{text}");
}

#[test]
fn missing_replay_file_fails() {
    Command::cargo_bin("pistat")
        .unwrap()
        .args(["--no-persist", "--replay", "/definitely/not/here.jsonl"])
        .assert()
        .failure();
}
