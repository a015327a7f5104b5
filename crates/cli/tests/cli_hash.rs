use std::fs;
use std::process::Command;
use tempfile::tempdir;
use tiny_keccak::{Hasher, Keccak};

const BIN: &str = env!("CARGO_BIN_EXE_xmrhash");

fn run(args: &[&str]) -> std::process::Output {
    Command::new(BIN)
        .args(args)
        .env(
            "XMRHASH_PROFILES_DIR",
            concat!(env!("CARGO_MANIFEST_DIR"), "/tests/profiles"),
        )
        .output()
        .expect("run xmrhash")
}

fn stdout_line(out: &std::process::Output) -> String {
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8(out.stdout.clone()).unwrap().trim().to_owned()
}

#[test]
fn keccak_abc_vector() {
    let out = run(&["keccak", "--hex", "616263"]);
    assert_eq!(
        stdout_line(&out),
        "4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45"
    );
}

#[test]
fn keccak_file_with_profile_matches_oracle() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("input.bin");
    let data: Vec<u8> = (0..777u32).map(|i| (i % 253) as u8).collect();
    fs::write(&path, &data).unwrap();

    let mut k = Keccak::v512();
    k.update(&data);
    let mut exp = [0u8; 64];
    k.finalize(&mut exp);

    let out = run(&["keccak", "-f", path.to_str().unwrap(), "--profile", "keccak512"]);
    assert_eq!(stdout_line(&out), hex::encode(exp));
}

#[test]
fn keccak_raw_output_has_requested_length() {
    let out = run(&["keccak", "--hex", "00", "--len", "200", "--raw"]);
    assert!(out.status.success());
    assert_eq!(out.stdout.len(), 200);
}

#[test]
fn misaligned_length_aborts_process() {
    let out = run(&["keccak", "--hex", "616263", "--len", "33"]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Bad keccak use"));
}

#[test]
fn zero_and_oversized_lengths_abort_process() {
    for len in ["0", "101"] {
        let out = run(&["keccak", "--hex", "", "--len", len]);
        assert!(!out.status.success(), "len {len} must abort");
        assert!(String::from_utf8_lossy(&out.stderr).contains("Bad keccak use"));
    }
}

#[test]
fn unknown_profile_is_an_error_not_an_abort() {
    let out = run(&["keccak", "--hex", "00", "--profile", "sha3-256"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("not found"));
}

#[test]
fn scalar_vector() {
    let out = run(&["scalar", "--hex", "616263"]);
    assert_eq!(
        stdout_line(&out),
        "9ab38d0681b95fef6d619d1cace05a14c0d1e6e33a64a036ec44f58fa12d6c05"
    );
}

#[test]
fn point_vector_and_length_check() {
    let input = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";
    let out = run(&["point", "--hex", input]);
    assert_eq!(
        stdout_line(&out),
        "0691eee3cf70a0056df6bfa03120635636581b5c4ea571dfc680f78c7e0b4137"
    );

    let bad = run(&["point", "--hex", input, "--len", "33"]);
    assert!(!bad.status.success());
}

#[test]
fn permute_zero_state() {
    let out = run(&["permute"]);
    let line = stdout_line(&out);
    assert_eq!(line.len(), 400);
    assert!(line.starts_with("e7dde140798f25f1"));
}

#[test]
fn profile_ls_json_lists_builtins() {
    let out = run(&["profile-ls", "--json"]);
    let v: serde_json::Value = serde_json::from_str(&stdout_line(&out)).expect("json");
    let ids: Vec<_> = v
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_owned())
        .collect();
    assert!(ids.contains(&"keccak256".to_owned()));
    assert!(ids.contains(&"keccak-state".to_owned()));
    assert!(ids.contains(&"keccak-wide".to_owned()));
}

#[test]
fn profile_from_directory_sets_length() {
    let out = run(&["keccak", "--hex", "", "--profile", "keccak-wide"]);
    assert_eq!(stdout_line(&out).len(), 96 * 2);
}
