//! Baseline PIC10/PIC12/PIC16 cores, 12-bit instruction words.

use super::Descriptor;

implementation! {
    /// The baseline 12-bit PIC instruction set
    Baseline, "pic-baseline", 2
}

/// Baseline encodings; `tris` comes after the fixed encodings it overlaps.
#[rustfmt::skip]
pub static INSTRUCTION_SET: [Descriptor; 34] = [
    inst!("nop", 2, 0x000, 0xf000),
    inst!("option", 2, 0x002, 0xf000),
    inst!("sleep", 2, 0x003, 0xf000),
    inst!("clrwdt", 2, 0x004, 0xf000),
    inst!("tris", 2, 0x000, 0xf000, Register = 0x007),
    inst!("movwf", 2, 0x020, 0xf000, Register = 0x01f),
    inst!("clrw", 2, 0x040, 0xf000),
    inst!("clrf", 2, 0x060, 0xf000, Register = 0x01f),
    inst!("subwf", 2, 0x080, 0xf000, Register = 0x01f, Destination = 0x020),
    inst!("decf", 2, 0x0c0, 0xf000, Register = 0x01f, Destination = 0x020),
    inst!("iorwf", 2, 0x100, 0xf000, Register = 0x01f, Destination = 0x020),
    inst!("andwf", 2, 0x140, 0xf000, Register = 0x01f, Destination = 0x020),
    inst!("xorwf", 2, 0x180, 0xf000, Register = 0x01f, Destination = 0x020),
    inst!("addwf", 2, 0x1c0, 0xf000, Register = 0x01f, Destination = 0x020),
    inst!("movf", 2, 0x200, 0xf000, Register = 0x01f, Destination = 0x020),
    inst!("comf", 2, 0x240, 0xf000, Register = 0x01f, Destination = 0x020),
    inst!("incf", 2, 0x280, 0xf000, Register = 0x01f, Destination = 0x020),
    inst!("decfsz", 2, 0x2c0, 0xf000, Register = 0x01f, Destination = 0x020),
    inst!("rrf", 2, 0x300, 0xf000, Register = 0x01f, Destination = 0x020),
    inst!("rlf", 2, 0x340, 0xf000, Register = 0x01f, Destination = 0x020),
    inst!("swapf", 2, 0x380, 0xf000, Register = 0x01f, Destination = 0x020),
    inst!("incfsz", 2, 0x3c0, 0xf000, Register = 0x01f, Destination = 0x020),
    inst!("bcf", 2, 0x400, 0xf000, Register = 0x01f, Bit = 0x0e0),
    inst!("bsf", 2, 0x500, 0xf000, Register = 0x01f, Bit = 0x0e0),
    inst!("btfsc", 2, 0x600, 0xf000, Register = 0x01f, Bit = 0x0e0),
    inst!("btfss", 2, 0x700, 0xf000, Register = 0x01f, Bit = 0x0e0),
    inst!("retlw", 2, 0x800, 0xf000, Literal = 0x0ff),
    inst!("call", 2, 0x900, 0xf000, ProgramAddress = 0x0ff),
    inst!("goto", 2, 0xa00, 0xf000, ProgramAddress = 0x1ff),
    inst!("movlw", 2, 0xc00, 0xf000, Literal = 0x0ff),
    inst!("iorlw", 2, 0xd00, 0xf000, Literal = 0x0ff),
    inst!("andlw", 2, 0xe00, 0xf000, Literal = 0x0ff),
    inst!("xorlw", 2, 0xf00, 0xf000, Literal = 0x0ff),
    inst!("movlb", 2, 0x010, 0xf000, Literal = 0x007),
];
