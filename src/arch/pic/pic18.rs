//! PIC18 cores, 16-bit instruction words.
//!
//! `movff`, `lfsr`, `call` and `goto` take a second word whose top nibble
//! is `1111`; on its own such a word executes as `nop`.

use super::Descriptor;

implementation! {
    /// The PIC18 instruction set
    Pic18, "pic-18", 4
}

/// PIC18 encodings.
#[rustfmt::skip]
pub static INSTRUCTION_SET: [Descriptor; 76] = [
    inst!("nop", 2, 0x0000, 0x0000),
    inst!("sleep", 2, 0x0003, 0x0000),
    inst!("clrwdt", 2, 0x0004, 0x0000),
    inst!("push", 2, 0x0005, 0x0000),
    inst!("pop", 2, 0x0006, 0x0000),
    inst!("daw", 2, 0x0007, 0x0000),
    inst!("tblrd*", 2, 0x0008, 0x0000),
    inst!("tblrd*+", 2, 0x0009, 0x0000),
    inst!("tblrd*-", 2, 0x000a, 0x0000),
    inst!("tblrd+*", 2, 0x000b, 0x0000),
    inst!("tblwt*", 2, 0x000c, 0x0000),
    inst!("tblwt*+", 2, 0x000d, 0x0000),
    inst!("tblwt*-", 2, 0x000e, 0x0000),
    inst!("tblwt+*", 2, 0x000f, 0x0000),
    inst!("retfie", 2, 0x0010, 0x0000, Fast = 0x0001),
    inst!("return", 2, 0x0012, 0x0000, Fast = 0x0001),
    inst!("reset", 2, 0x00ff, 0x0000),
    inst!("movlb", 2, 0x0100, 0x0000, Literal = 0x000f),
    inst!("mulwf", 2, 0x0200, 0x0000, Register = 0x00ff, Access = 0x0100),
    inst!("decf", 2, 0x0400, 0x0000, Register = 0x00ff, Destination = 0x0200, Access = 0x0100),
    inst!("sublw", 2, 0x0800, 0x0000, Literal = 0x00ff),
    inst!("iorlw", 2, 0x0900, 0x0000, Literal = 0x00ff),
    inst!("xorlw", 2, 0x0a00, 0x0000, Literal = 0x00ff),
    inst!("andlw", 2, 0x0b00, 0x0000, Literal = 0x00ff),
    inst!("retlw", 2, 0x0c00, 0x0000, Literal = 0x00ff),
    inst!("mullw", 2, 0x0d00, 0x0000, Literal = 0x00ff),
    inst!("movlw", 2, 0x0e00, 0x0000, Literal = 0x00ff),
    inst!("addlw", 2, 0x0f00, 0x0000, Literal = 0x00ff),
    inst!("iorwf", 2, 0x1000, 0x0000, Register = 0x00ff, Destination = 0x0200, Access = 0x0100),
    inst!("andwf", 2, 0x1400, 0x0000, Register = 0x00ff, Destination = 0x0200, Access = 0x0100),
    inst!("xorwf", 2, 0x1800, 0x0000, Register = 0x00ff, Destination = 0x0200, Access = 0x0100),
    inst!("comf", 2, 0x1c00, 0x0000, Register = 0x00ff, Destination = 0x0200, Access = 0x0100),
    inst!("addwfc", 2, 0x2000, 0x0000, Register = 0x00ff, Destination = 0x0200, Access = 0x0100),
    inst!("addwf", 2, 0x2400, 0x0000, Register = 0x00ff, Destination = 0x0200, Access = 0x0100),
    inst!("incf", 2, 0x2800, 0x0000, Register = 0x00ff, Destination = 0x0200, Access = 0x0100),
    inst!("decfsz", 2, 0x2c00, 0x0000, Register = 0x00ff, Destination = 0x0200, Access = 0x0100),
    inst!("rrcf", 2, 0x3000, 0x0000, Register = 0x00ff, Destination = 0x0200, Access = 0x0100),
    inst!("rlcf", 2, 0x3400, 0x0000, Register = 0x00ff, Destination = 0x0200, Access = 0x0100),
    inst!("swapf", 2, 0x3800, 0x0000, Register = 0x00ff, Destination = 0x0200, Access = 0x0100),
    inst!("incfsz", 2, 0x3c00, 0x0000, Register = 0x00ff, Destination = 0x0200, Access = 0x0100),
    inst!("rrncf", 2, 0x4000, 0x0000, Register = 0x00ff, Destination = 0x0200, Access = 0x0100),
    inst!("rlncf", 2, 0x4400, 0x0000, Register = 0x00ff, Destination = 0x0200, Access = 0x0100),
    inst!("infsnz", 2, 0x4800, 0x0000, Register = 0x00ff, Destination = 0x0200, Access = 0x0100),
    inst!("dcfsnz", 2, 0x4c00, 0x0000, Register = 0x00ff, Destination = 0x0200, Access = 0x0100),
    inst!("movf", 2, 0x5000, 0x0000, Register = 0x00ff, Destination = 0x0200, Access = 0x0100),
    inst!("subfwb", 2, 0x5400, 0x0000, Register = 0x00ff, Destination = 0x0200, Access = 0x0100),
    inst!("subwfb", 2, 0x5800, 0x0000, Register = 0x00ff, Destination = 0x0200, Access = 0x0100),
    inst!("subwf", 2, 0x5c00, 0x0000, Register = 0x00ff, Destination = 0x0200, Access = 0x0100),
    inst!("cpfslt", 2, 0x6000, 0x0000, Register = 0x00ff, Access = 0x0100),
    inst!("cpfseq", 2, 0x6200, 0x0000, Register = 0x00ff, Access = 0x0100),
    inst!("cpfsgt", 2, 0x6400, 0x0000, Register = 0x00ff, Access = 0x0100),
    inst!("tstfsz", 2, 0x6600, 0x0000, Register = 0x00ff, Access = 0x0100),
    inst!("setf", 2, 0x6800, 0x0000, Register = 0x00ff, Access = 0x0100),
    inst!("clrf", 2, 0x6a00, 0x0000, Register = 0x00ff, Access = 0x0100),
    inst!("negf", 2, 0x6c00, 0x0000, Register = 0x00ff, Access = 0x0100),
    inst!("movwf", 2, 0x6e00, 0x0000, Register = 0x00ff, Access = 0x0100),
    inst!("btg", 2, 0x7000, 0x0000, Register = 0x00ff, Bit = 0x0e00, Access = 0x0100),
    inst!("bsf", 2, 0x8000, 0x0000, Register = 0x00ff, Bit = 0x0e00, Access = 0x0100),
    inst!("bcf", 2, 0x9000, 0x0000, Register = 0x00ff, Bit = 0x0e00, Access = 0x0100),
    inst!("btfss", 2, 0xa000, 0x0000, Register = 0x00ff, Bit = 0x0e00, Access = 0x0100),
    inst!("btfsc", 2, 0xb000, 0x0000, Register = 0x00ff, Bit = 0x0e00, Access = 0x0100),
    inst!("movff", 4, 0xc000, 0x0000, DataAddress = 0x0fff, LongDataAddress = 0x0000),
    inst!("bra", 2, 0xd000, 0x0000, RelativeAddress = 0x07ff),
    inst!("rcall", 2, 0xd800, 0x0000, RelativeAddress = 0x07ff),
    inst!("bz", 2, 0xe000, 0x0000, RelativeAddress = 0x00ff),
    inst!("bnz", 2, 0xe100, 0x0000, RelativeAddress = 0x00ff),
    inst!("bc", 2, 0xe200, 0x0000, RelativeAddress = 0x00ff),
    inst!("bnc", 2, 0xe300, 0x0000, RelativeAddress = 0x00ff),
    inst!("bov", 2, 0xe400, 0x0000, RelativeAddress = 0x00ff),
    inst!("bnov", 2, 0xe500, 0x0000, RelativeAddress = 0x00ff),
    inst!("bn", 2, 0xe600, 0x0000, RelativeAddress = 0x00ff),
    inst!("bnn", 2, 0xe700, 0x0000, RelativeAddress = 0x00ff),
    inst!("call", 4, 0xec00, 0x0000, LongProgramAddress = 0x00ff, Fast = 0x0100),
    inst!("lfsr", 4, 0xee00, 0x0000, Fsr = 0x0030, LongLiteral = 0x000f),
    inst!("goto", 4, 0xef00, 0x0000, LongProgramAddress = 0x00ff),
    inst!("nop", 2, 0xf000, 0x0fff),
];
