use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn unique_dir(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "chainprobe_run_{}_{}",
        name,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::create_dir_all(&path).unwrap();
    path
}

fn entries(dir: &PathBuf) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect()
}

#[test]
fn default_run_leaves_no_config_behind() {
    let exe = env!("CARGO_BIN_EXE_chainprobe");
    let dir = unique_dir("default");

    let output = Command::new(exe)
        .current_dir(&dir)
        .env_remove("RUST_LOG")
        .arg("--no-plot")
        .output()
        .unwrap_or_else(|e| panic!("failed to run chainprobe: {e}"));

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("chainprobe failed: status={} stderr={stderr}", output.status);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("find_miss =  [1.0, "), "stdout: {stdout}");
    assert!(stdout.contains("coll =  [0.0, "), "stdout: {stdout}");
    assert!(stdout.contains("main =  [0.0, "), "stdout: {stdout}");
    assert!(
        entries(&dir).is_empty(),
        "default run wrote files: {:?}",
        entries(&dir)
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn write_config_creates_the_requested_file_only() {
    let exe = env!("CARGO_BIN_EXE_chainprobe");
    let dir = unique_dir("write_config");

    let output = Command::new(exe)
        .current_dir(&dir)
        .env_remove("RUST_LOG")
        .args(["--config", "custom.toml", "--write-config"])
        .output()
        .unwrap_or_else(|e| panic!("failed to run chainprobe: {e}"));
    assert!(output.status.success(), "status={}", output.status);

    assert_eq!(entries(&dir), vec!["custom.toml".to_string()]);
    let text = fs::read_to_string(dir.join("custom.toml")).unwrap();
    assert!(text.contains("[logging]"));
    assert!(output.stdout.is_empty(), "no sweep output on --write-config");

    let _ = fs::remove_dir_all(&dir);
}
