#![cfg(feature = "avr")]

use mcu_disasm::{
    avr::Avr8, ByteRecords, DecodedValue, Directive, Disassembler, Radix, RenderOptions,
};
use rstest::rstest;

fn disassemble(source: ByteRecords) -> Vec<DecodedValue<Avr8>> {
    let mut disassembler = Disassembler::<Avr8, _>::new(source);
    let mut values = Vec::new();
    while let Some(value) = disassembler.read() {
        values.push(value.unwrap());
    }
    values
}

fn single(bytes: &[u8]) -> mcu_disasm::Instruction<Avr8> {
    let values = disassemble(ByteRecords::contiguous(0, bytes));
    assert_eq!(values.len(), 3, "{values:?}");
    *values[1].instruction().unwrap()
}

#[rstest]
#[case(&[0x00, 0xc0], "rjmp", &[0])]
#[case(&[0xfd, 0xcf], "rjmp", &[-6])]
#[case(&[0x0f, 0xef], "ser", &[16])]
#[case(&[0x07, 0xbb], "out", &[0x17, 16])]
#[case(&[0x0a, 0x95], "dec", &[16])]
#[case(&[0x12, 0x33], "cpi", &[17, 0x32])]
#[case(&[0xad, 0x94, 0x5a, 0x5d], "jmp", &[0x2abab4])]
#[case(&[0x0e, 0x94, 0x07, 0xf8], "call", &[0x1f00e])]
#[case(&[0x20, 0x92, 0x34, 0x12], "sts", &[0x1234, 2])]
#[case(&[0x30, 0x90, 0x80, 0x67], "lds", &[3, 0x6780])]
fn decodes_operands(#[case] bytes: &[u8], #[case] mnemonic: &str, #[case] operands: &[i32]) {
    let instruction = single(bytes);
    assert_eq!(instruction.mnemonic(), mnemonic);
    assert_eq!(instruction.width(), bytes.len());
    assert_eq!(instruction.operands(), operands);
}

#[test]
fn renders_operands() {
    let options = RenderOptions::default();
    assert_eq!(single(&[0x07, 0xbb]).rendered_operands(options), ["$17", "R16"]);
    assert_eq!(single(&[0x12, 0x33]).rendered_operands(options), ["R17", "0x32"]);
    assert_eq!(
        single(&[0xad, 0x94, 0x5a, 0x5d]).rendered_operands(options),
        ["0x155d5a"]
    );
    assert_eq!(
        single(&[0x20, 0x92, 0x34, 0x12]).rendered_operands(options),
        ["0x1234", "R2"]
    );
    assert_eq!(single(&[0xfd, 0xcf]).rendered_operands(options), [".-6"]);
}

#[rstest]
#[case(Radix::Hex, "0x32")]
#[case(Radix::Binary, "0b00110010")]
#[case(Radix::Decimal, "50")]
fn data_radix(#[case] radix: Radix, #[case] expected: &str) {
    let cpi = single(&[0x12, 0x33]);
    let options = RenderOptions {
        radix,
        ..Default::default()
    };
    assert_eq!(cpi.operand(1, options).as_deref(), Some(expected));
}

#[test]
fn relative_jump_destination() {
    let values = disassemble(ByteRecords::contiguous(0x100, &[0x00, 0x00, 0xfd, 0xcf]));
    let rjmp = values[2].instruction().unwrap();

    assert_eq!(rjmp.address(), 0x102);
    assert_eq!(rjmp.destination(), Some(0xfe));
    assert_eq!(rjmp.comment().as_deref(), Some("; 0xfe"));

    let assembly = RenderOptions {
        assembly: true,
        ..Default::default()
    };
    assert_eq!(rjmp.operand(0, assembly).as_deref(), Some("A_00fe"));
}

#[test]
fn absolute_jumps_become_labels() {
    let call = single(&[0x0e, 0x94, 0x07, 0xf8]);
    let assembly = RenderOptions {
        assembly: true,
        ..Default::default()
    };
    assert_eq!(call.operand(0, assembly).as_deref(), Some("A_1f00e"));
    assert_eq!(
        call.operand(0, RenderOptions::default()).as_deref(),
        Some("0xf807")
    );
    assert_eq!(call.destination(), None);
    assert_eq!(call.opcodes(), [0x0e, 0x94, 0x07, 0xf8]);
    assert_eq!(call.opcode_text(), "f8 07 94 0e");
}

#[test]
fn unassigned_word_is_data() {
    let raw = single(&[0xb8, 0x95]);
    assert_eq!(raw.mnemonic(), ".dw");
    assert_eq!(raw.rendered_operands(RenderOptions::default()), ["0x95b8"]);
}

#[test]
fn truncated_long_instruction_at_end_of_input() {
    let values = disassemble(ByteRecords::contiguous(0, &[0xae, 0x94, 0xab]));

    assert_eq!(values.len(), 4);
    assert_eq!(values[0].directive(), Some(Directive::Origin(0)));

    let word = values[1].instruction().unwrap();
    assert_eq!((word.mnemonic(), word.address()), (".dw", 0));
    assert_eq!(word.operands(), [0x94ae]);

    let byte = values[2].instruction().unwrap();
    assert_eq!((byte.mnemonic(), byte.address()), (".db", 2));
    assert_eq!(byte.operands(), [0xab]);

    assert_eq!(values[3].directive(), Some(Directive::End));
    assert_eq!(values[3].mnemonic(), ".exit");
}

#[test]
fn truncated_long_instruction_at_address_gap() {
    let source: ByteRecords = [(0xae, 0x500), (0x94, 0x501), (0xab, 0x504), (0xcd, 0x505)]
        .into_iter()
        .collect();
    let values = disassemble(source);

    assert_eq!(values.len(), 5);
    assert_eq!(values[0].directive(), Some(Directive::Origin(0x500)));
    assert_eq!(values[1].instruction().unwrap().mnemonic(), ".dw");
    assert_eq!(values[2].directive(), Some(Directive::Origin(0x504)));

    let rjmp = values[3].instruction().unwrap();
    assert_eq!(rjmp.mnemonic(), "rjmp");
    assert_eq!(rjmp.operands(), [-0x4aa]);
    assert_eq!(values[4].directive(), Some(Directive::End));
}

#[test]
fn origin_directive_renders_address() {
    let values = disassemble(ByteRecords::contiguous(0x1234, &[0x00, 0x00]));
    assert_eq!(values[0].mnemonic(), ".org");
    assert_eq!(values[0].operand_count(), 1);
    assert_eq!(
        values[0].operand(0, RenderOptions::default()).as_deref(),
        Some("0x1234")
    );
}

#[test]
fn lone_byte_before_address_gap() {
    let source: ByteRecords = [(0x18, 0x100), (0x12, 0x502), (0x33, 0x503)]
        .into_iter()
        .collect();
    let values = disassemble(source);

    assert_eq!(values.len(), 5);
    assert_eq!(values[0].directive(), Some(Directive::Origin(0x100)));

    let raw = values[1].instruction().unwrap();
    assert_eq!((raw.mnemonic(), raw.address()), (".db", 0x100));
    assert_eq!(raw.operands(), [0x18]);

    assert_eq!(values[2].directive(), Some(Directive::Origin(0x502)));

    let cpi = values[3].instruction().unwrap();
    assert_eq!((cpi.mnemonic(), cpi.address(), cpi.width()), ("cpi", 0x502, 2));
    assert_eq!(values[4].directive(), Some(Directive::End));
}
