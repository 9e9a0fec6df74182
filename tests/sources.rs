use std::io::{BufReader, Write};

use mcu_disasm::{ByteRecord, ByteSource, FileType, IntelHex, RecordError, SourceError};
use rstest::rstest;

fn drain(mut source: impl ByteSource) -> Vec<ByteRecord> {
    std::iter::from_fn(|| source.read())
        .collect::<Result<_, _>>()
        .unwrap()
}

#[rstest]
#[case(b':', FileType::IntelHex)]
#[case(b'S', FileType::SRecord)]
#[case(b'0', FileType::Generic)]
#[case(b'a', FileType::Generic)]
#[case(b'F', FileType::Generic)]
fn detects_text_containers(#[case] first: u8, #[case] expected: FileType) {
    assert_eq!(FileType::detect(first).unwrap(), expected);
}

#[test]
fn rejects_unknown_leading_byte() {
    assert!(matches!(
        FileType::detect(b'#'),
        Err(SourceError::UnknownFileType(b'#'))
    ));
}

#[test]
fn rejects_empty_input() {
    let result = FileType::open_detected(&b""[..]);
    assert!(matches!(result, Err(SourceError::EmptyInput)));
}

#[rstest]
#[case("generic", FileType::Generic)]
#[case("ihex", FileType::IntelHex)]
#[case("srec", FileType::SRecord)]
#[case("binary", FileType::Binary)]
#[case("ascii", FileType::Ascii)]
fn parses_file_type_names(#[case] name: &str, #[case] expected: FileType) {
    assert_eq!(name.parse::<FileType>().unwrap(), expected);
}

#[test]
fn unknown_file_type_name() {
    assert!("coff".parse::<FileType>().is_err());
}

#[test]
fn detected_intel_hex_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, ":040000000E9407F85B").unwrap();
    writeln!(file, ":02010000FDCF31").unwrap();
    writeln!(file, ":00000001FF").unwrap();

    let reader = BufReader::new(file.reopen().unwrap());
    let records = drain(FileType::open_detected(reader).unwrap());

    let values: Vec<_> = records.iter().map(|r| (r.value, r.address)).collect();
    assert_eq!(
        values,
        [
            (0x0e, 0),
            (0x94, 1),
            (0x07, 2),
            (0xf8, 3),
            (0xfd, 0x100),
            (0xcf, 0x101)
        ]
    );
}

#[test]
fn detected_s_record_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "S107001074AA40FC8E").unwrap();
    writeln!(file, "S9030000FC").unwrap();

    let reader = BufReader::new(file.reopen().unwrap());
    let records = drain(FileType::open_detected(reader).unwrap());

    assert_eq!(records.len(), 4);
    assert_eq!(records[0], ByteRecord::new(0x74, 0x10));
    assert_eq!(records[3], ByteRecord::new(0xfc, 0x13));
}

#[test]
fn detected_generic_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "000010:cffd").unwrap();

    let reader = BufReader::new(file.reopen().unwrap());
    let records = drain(FileType::open_detected(reader).unwrap());

    assert_eq!(
        records,
        [ByteRecord::new(0xfd, 0x20), ByteRecord::new(0xcf, 0x21)]
    );
}

#[test]
fn binary_and_ascii_are_loaded_at_zero() {
    let binary = drain(FileType::Binary.open(&[0x0e_u8, 0x94][..]).unwrap());
    let ascii = drain(FileType::Ascii.open(&b"0e 94\n"[..]).unwrap());

    let expected = [ByteRecord::new(0x0e, 0), ByteRecord::new(0x94, 1)];
    assert_eq!(binary, expected);
    assert_eq!(ascii, expected);
}

#[test]
fn record_errors_carry_line_numbers() {
    let mut source = IntelHex::new(&b":040000000E9407F85B\n:02010000FDCF32\n"[..]);
    for _ in 0..4 {
        assert!(source.read().unwrap().is_ok());
    }
    match source.read() {
        Some(Err(SourceError::Record { line, kind })) => {
            assert_eq!(line, 2);
            assert_eq!(
                kind,
                RecordError::Checksum {
                    expected: 0x31,
                    found: 0x32
                }
            );
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[cfg(feature = "avr")]
#[test]
fn source_errors_do_not_end_the_stream() {
    use mcu_disasm::{avr::Avr8, DecodedValue, Disassembler, Error};

    let hex = ":02000000FDCF33\n:02000200FFCF2E\n:00000001FF\n";
    let mut disassembler = Disassembler::<Avr8, _>::new(IntelHex::new(hex.as_bytes()));

    assert!(matches!(
        disassembler.read(),
        Some(Err(Error::Source(SourceError::Record { line: 1, .. })))
    ));

    let rest: Vec<_> = std::iter::from_fn(|| disassembler.read())
        .collect::<Result<_, _>>()
        .unwrap();
    let mnemonics: Vec<_> = rest.iter().map(DecodedValue::mnemonic).collect();
    assert_eq!(mnemonics, [".org", "rjmp", ".exit"]);
    assert_eq!(rest[1].instruction().unwrap().address(), 2);
}

#[cfg(feature = "elf")]
#[test]
fn elf_is_detected_by_magic() {
    assert_eq!(FileType::detect(0x7f).unwrap(), FileType::Elf);
    assert_eq!("elf".parse::<FileType>().unwrap(), FileType::Elf);
}
