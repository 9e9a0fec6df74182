//! Midrange PIC12/PIC16 cores, 14-bit instruction words.

use super::Descriptor;

implementation! {
    /// The midrange 14-bit PIC instruction set
    Midrange, "pic-midrange", 2
}

/// Midrange encodings; `tris` comes after the fixed encodings it overlaps.
#[rustfmt::skip]
pub static INSTRUCTION_SET: [Descriptor; 37] = [
    inst!("nop", 2, 0x0000, 0xc060),
    inst!("return", 2, 0x0008, 0xc000),
    inst!("retfie", 2, 0x0009, 0xc000),
    inst!("option", 2, 0x0062, 0xc000),
    inst!("sleep", 2, 0x0063, 0xc000),
    inst!("clrwdt", 2, 0x0064, 0xc000),
    inst!("tris", 2, 0x0060, 0xc000, Register = 0x0007),
    inst!("movwf", 2, 0x0080, 0xc000, Register = 0x007f),
    inst!("clrw", 2, 0x0100, 0xc07f),
    inst!("clrf", 2, 0x0180, 0xc000, Register = 0x007f),
    inst!("subwf", 2, 0x0200, 0xc000, Register = 0x007f, Destination = 0x0080),
    inst!("decf", 2, 0x0300, 0xc000, Register = 0x007f, Destination = 0x0080),
    inst!("iorwf", 2, 0x0400, 0xc000, Register = 0x007f, Destination = 0x0080),
    inst!("andwf", 2, 0x0500, 0xc000, Register = 0x007f, Destination = 0x0080),
    inst!("xorwf", 2, 0x0600, 0xc000, Register = 0x007f, Destination = 0x0080),
    inst!("addwf", 2, 0x0700, 0xc000, Register = 0x007f, Destination = 0x0080),
    inst!("movf", 2, 0x0800, 0xc000, Register = 0x007f, Destination = 0x0080),
    inst!("comf", 2, 0x0900, 0xc000, Register = 0x007f, Destination = 0x0080),
    inst!("incf", 2, 0x0a00, 0xc000, Register = 0x007f, Destination = 0x0080),
    inst!("decfsz", 2, 0x0b00, 0xc000, Register = 0x007f, Destination = 0x0080),
    inst!("rrf", 2, 0x0c00, 0xc000, Register = 0x007f, Destination = 0x0080),
    inst!("rlf", 2, 0x0d00, 0xc000, Register = 0x007f, Destination = 0x0080),
    inst!("swapf", 2, 0x0e00, 0xc000, Register = 0x007f, Destination = 0x0080),
    inst!("incfsz", 2, 0x0f00, 0xc000, Register = 0x007f, Destination = 0x0080),
    inst!("bcf", 2, 0x1000, 0xc000, Register = 0x007f, Bit = 0x0380),
    inst!("bsf", 2, 0x1400, 0xc000, Register = 0x007f, Bit = 0x0380),
    inst!("btfsc", 2, 0x1800, 0xc000, Register = 0x007f, Bit = 0x0380),
    inst!("btfss", 2, 0x1c00, 0xc000, Register = 0x007f, Bit = 0x0380),
    inst!("call", 2, 0x2000, 0xc000, ProgramAddress = 0x07ff),
    inst!("goto", 2, 0x2800, 0xc000, ProgramAddress = 0x07ff),
    inst!("movlw", 2, 0x3000, 0xc300, Literal = 0x00ff),
    inst!("retlw", 2, 0x3400, 0xc300, Literal = 0x00ff),
    inst!("iorlw", 2, 0x3800, 0xc000, Literal = 0x00ff),
    inst!("andlw", 2, 0x3900, 0xc000, Literal = 0x00ff),
    inst!("xorlw", 2, 0x3a00, 0xc000, Literal = 0x00ff),
    inst!("sublw", 2, 0x3c00, 0xc100, Literal = 0x00ff),
    inst!("addlw", 2, 0x3e00, 0xc100, Literal = 0x00ff),
];
