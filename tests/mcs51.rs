#![cfg(feature = "8051")]

use mcu_disasm::{
    ByteRecords, DecodedValue, Directive, Disassembler, Radix, RenderOptions, _8051::Mcs51,
};
use rstest::rstest;

fn disassemble(source: ByteRecords) -> Vec<DecodedValue<Mcs51>> {
    let mut disassembler = Disassembler::<Mcs51, _>::new(source);
    let mut values = Vec::new();
    while let Some(value) = disassembler.read() {
        values.push(value.unwrap());
    }
    values
}

fn instructions(values: &[DecodedValue<Mcs51>]) -> Vec<(u32, &'static str, Vec<String>)> {
    values
        .iter()
        .filter_map(DecodedValue::instruction)
        .map(|i| {
            (
                i.address(),
                i.mnemonic(),
                i.rendered_operands(RenderOptions::default()),
            )
        })
        .collect()
}

#[test]
fn sample_program() {
    #[rustfmt::skip]
    let bytes = [
        0x85, 0x25, 0x23,       // mov 023h, 025h
        0xa1, 0x01,             // ajmp 00501h
        0x12, 0x05, 0x01,       // lcall 00501h
        0x74, 0xaa,             // mov A, #0aah
        0xe8,                   // mov A, R0
        0xf6,                   // mov @R0, A
        0x90, 0x12, 0x34,       // mov DPTR, #01234h
        0xb2, 0x91,             // cpl 091h
        0xb0, 0x92,             // anl C, /092h
        0x73,                   // jmp @A+DPTR
    ];
    let values = disassemble(ByteRecords::contiguous(0, &bytes));

    assert_eq!(values.first().and_then(|v| v.directive()), Some(Directive::Origin(0)));
    assert_eq!(values.last().and_then(|v| v.directive()), Some(Directive::End));

    let s = |s: &str| s.to_owned();
    assert_eq!(
        instructions(&values),
        [
            (0x00, "mov", vec![s("023h"), s("025h")]),
            (0x03, "ajmp", vec![s("00501h")]),
            (0x05, "lcall", vec![s("00501h")]),
            (0x08, "mov", vec![s("A"), s("#0aah")]),
            (0x0a, "mov", vec![s("A"), s("R0")]),
            (0x0b, "mov", vec![s("@R0"), s("A")]),
            (0x0c, "mov", vec![s("DPTR"), s("#01234h")]),
            (0x0f, "cpl", vec![s("091h")]),
            (0x11, "anl", vec![s("C"), s("/092h")]),
            (0x13, "jmp", vec![s("@A+DPTR")]),
        ]
    );
}

#[test]
fn relative_jump_destination() {
    let mut bytes = vec![0u8; 0x2b];
    bytes.extend([0x40, 0xda]);
    let values = disassemble(ByteRecords::contiguous(0, &bytes));

    let jc = values
        .iter()
        .filter_map(DecodedValue::instruction)
        .find(|i| i.mnemonic() == "jc")
        .unwrap();
    assert_eq!(jc.address(), 0x2b);
    assert_eq!(jc.operands(), [-0x26]);
    assert_eq!(jc.destination(), Some(0x07));
    assert_eq!(jc.comment().as_deref(), Some("; 07h"));
    assert_eq!(jc.operand(0, RenderOptions::default()).as_deref(), Some(".-38"));
    assert_eq!(
        jc.operand(
            0,
            RenderOptions {
                assembly: true,
                ..Default::default()
            }
        )
        .as_deref(),
        Some("A_0007")
    );
}

#[rstest]
#[case(Radix::Hex, "#0aah")]
#[case(Radix::Binary, "#10101010b")]
#[case(Radix::Decimal, "#170")]
fn immediate_radix(#[case] radix: Radix, #[case] expected: &str) {
    let values = disassemble(ByteRecords::contiguous(0, &[0x74, 0xaa]));
    let mov = values[1].instruction().unwrap();
    let options = RenderOptions {
        radix,
        ..Default::default()
    };
    assert_eq!(mov.operand(1, options).as_deref(), Some(expected));
}

#[test]
fn truncated_instruction_at_end_of_input() {
    let values = disassemble(ByteRecords::contiguous(0x40, &[0x74]));

    assert_eq!(values.len(), 3);
    assert_eq!(values[0].directive(), Some(Directive::Origin(0x40)));
    let raw = values[1].instruction().unwrap();
    assert_eq!(raw.mnemonic(), ".db");
    assert_eq!(raw.address(), 0x40);
    assert_eq!(raw.rendered_operands(RenderOptions::default()), ["074h"]);
    assert_eq!(values[2].directive(), Some(Directive::End));
}

#[test]
fn truncated_instruction_at_address_gap() {
    let source: ByteRecords = [(0x43, 0x100), (0x45, 0x101), (0xaa, 0x500)]
        .into_iter()
        .collect();
    let values = disassemble(source);

    let summary: Vec<_> = values
        .iter()
        .map(|value| match value {
            DecodedValue::Directive(directive) => (directive.name::<Mcs51>(), directive.value()),
            DecodedValue::Instruction(i) => (i.mnemonic(), Some(i.address())),
        })
        .collect();
    assert_eq!(
        summary,
        [
            (".org", Some(0x100)),
            (".db", Some(0x100)),
            (".db", Some(0x101)),
            (".org", Some(0x500)),
            (".db", Some(0x500)),
            ("end", None),
        ]
    );
}

#[test]
fn reserved_opcode_is_data() {
    let values = disassemble(ByteRecords::contiguous(0, &[0xa5, 0x00]));
    let raw = values[1].instruction().unwrap();
    assert_eq!(raw.mnemonic(), ".db");
    assert_eq!(raw.width(), 1);
    assert_eq!(values[2].instruction().unwrap().mnemonic(), "nop");
}

#[test]
fn empty_input_only_ends() {
    let values = disassemble(ByteRecords::contiguous(0, &[]));
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].directive(), Some(Directive::End));
    assert_eq!(values[0].mnemonic(), "end");
    assert_eq!(values[0].operand_count(), 0);
}

#[test]
fn decoder_iterator() {
    use mcu_disasm::Decoder;

    let disassembler = Disassembler::<Mcs51, _>::new(ByteRecords::contiguous(0, &[0x00, 0x04]));
    let mnemonics: Vec<_> = disassembler
        .into_iter()
        .map(|value| value.unwrap().mnemonic())
        .collect();
    assert_eq!(mnemonics, [".org", "nop", "inc", "end"]);
}

#[test]
fn single_nop() {
    let values = disassemble(ByteRecords::contiguous(0, &[0x00]));
    let mnemonics: Vec<_> = values.iter().map(DecodedValue::mnemonic).collect();
    assert_eq!(mnemonics, [".org", "nop", "end"]);
}

#[test]
fn back_to_back_truncations() {
    // ljmp cut by a gap, then mov A,#imm cut by the end of input
    let source: ByteRecords = [(0x02, 0x00), (0x01, 0x01), (0x74, 0x10)]
        .into_iter()
        .collect();
    let values = disassemble(source);

    let summary: Vec<_> = values
        .iter()
        .map(|value| (value.mnemonic(), value.operand(0, RenderOptions::default())))
        .collect();
    let some = |s: &str| Some(s.to_owned());
    assert_eq!(
        summary,
        [
            (".org", some("00000h")),
            (".db", some("002h")),
            (".db", some("001h")),
            (".org", some("00010h")),
            (".db", some("074h")),
            ("end", None),
        ]
    );
}
