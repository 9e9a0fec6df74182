#![cfg(feature = "cli")]

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn mcu_disasm(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_mcu-disasm"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(stdin).unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> &str {
    std::str::from_utf8(&output.stdout).unwrap()
}

#[test]
fn detects_intel_hex_on_stdin() {
    let output = mcu_disasm(&["-a", "8051", "-"], b":03000000020100FA\n:00000001FF\n");
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout(&output), "   0:\t00 01 02\tljmp\t00100h\n");
}

#[test]
fn explicit_file_type_and_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("firmware.bin");
    let listing = dir.path().join("firmware.s");
    std::fs::write(&input, [0x0e_u8, 0x94, 0x07, 0xf8, 0xfd, 0xcf]).unwrap();

    let output = mcu_disasm(
        &[
            "-a",
            "avr",
            "-t",
            "binary",
            "--assembly",
            "--no-opcodes",
            "-o",
            listing.to_str().unwrap(),
            input.to_str().unwrap(),
        ],
        b"",
    );
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout(&output), "");
    assert_eq!(
        std::fs::read_to_string(&listing).unwrap(),
        "\t.org\t0x0000\nA_0000:\tcall\tA_1f00e\nA_0004:\trjmp\tA_0000\t; 0x0\n\t.exit\t\n"
    );
}

#[test]
fn column_switches_and_data_base() {
    let output = mcu_disasm(
        &[
            "-a",
            "pic-enhanced",
            "-t",
            "ascii",
            "--no-addresses",
            "--no-opcodes",
            "--no-destination-comments",
            "--data-base",
            "dec",
            "-",
        ],
        b"fe 39 ff 33\n",
    );
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout(&output), "andlw\t254\nbra\t.-2\n");
}

#[test]
fn separate_data_base_flags() {
    let output = mcu_disasm(
        &[
            "-a",
            "pic-enhanced",
            "-t",
            "ascii",
            "--no-addresses",
            "--no-opcodes",
            "--data-base-bin",
            "-",
        ],
        b"fe 39\n",
    );
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout(&output), "andlw\tb'11111110'\n");
}

#[test]
fn reports_bad_input_and_fails() {
    let output = mcu_disasm(&["-a", "avr", "-"], b":02000000FDCF33\n");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("checksum mismatch"), "{stderr}");
}

#[test]
fn rejects_unknown_architecture() {
    let output = mcu_disasm(&["-a", "z80", "-"], b"");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown architecture 'z80'"), "{stderr}");
}

#[test]
fn missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.hex");
    let output = mcu_disasm(&["-a", "8051", missing.to_str().unwrap()], b"");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to open"), "{stderr}");
}
