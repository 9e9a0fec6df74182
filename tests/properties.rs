use mcu_disasm::{ByteRecords, DecodedValue, Directive, Disassembler, InstructionSet};
use proptest::prelude::*;

/// Runs the whole stream and checks the invariants every architecture shares.
fn check<A: InstructionSet>(records: &[(u8, u32)]) -> Result<(), TestCaseError> {
    let source: ByteRecords = records.iter().copied().collect();
    let mut disassembler = Disassembler::<A, _>::new(source);

    let mut values = Vec::new();
    // Upper bound: one origin and one instruction per byte, plus the end.
    for _ in 0..=records.len() * 2 + 1 {
        match disassembler.read() {
            Some(value) => values.push(value.map_err(|err| TestCaseError::fail(err.to_string()))?),
            None => break,
        }
    }
    prop_assert!(disassembler.read().is_none(), "stream did not terminate");
    prop_assert!(disassembler.read().is_none(), "stream resumed after ending");

    prop_assert_eq!(values.last().and_then(DecodedValue::directive), Some(Directive::End));
    let ends = values
        .iter()
        .filter(|value| value.directive() == Some(Directive::End))
        .count();
    prop_assert_eq!(ends, 1);

    let mut covered = Vec::new();
    let mut expected_address = None;
    for value in &values {
        match value {
            DecodedValue::Directive(Directive::Origin(address)) => {
                expected_address = Some(*address);
            }
            DecodedValue::Directive(Directive::End) => {}
            DecodedValue::Instruction(instruction) => {
                prop_assert_eq!(Some(instruction.address()), expected_address);
                prop_assert!(instruction.width() >= 1 && instruction.width() <= A::MAX_WIDTH);
                for (offset, byte) in instruction.opcodes().iter().enumerate() {
                    covered.push((*byte, instruction.address() + offset as u32));
                }
                let relative = (0..instruction.operand_count())
                    .find(|&index| A::is_relative(instruction.descriptor(), index));
                if let Some(index) = relative {
                    let base = instruction.address() + A::branch_base(instruction.width());
                    prop_assert_eq!(
                        instruction.destination(),
                        Some(base.wrapping_add(instruction.operands()[index] as u32))
                    );
                }
                expected_address = Some(instruction.address() + instruction.width() as u32);
            }
        }
    }
    prop_assert_eq!(covered, records.to_vec());
    Ok(())
}

/// Every value accounts for exactly its own bytes of the engine state.
fn check_widths<A: InstructionSet>(records: &[(u8, u32)]) -> Result<(), TestCaseError> {
    let source: ByteRecords = records.iter().copied().collect();
    let mut disassembler = Disassembler::<A, _>::new(source);
    let consumed = |disassembler: &Disassembler<A, ByteRecords>| {
        records.len() - disassembler.source().remaining() - disassembler.pending()
    };

    for _ in 0..=records.len() * 2 + 1 {
        let before = consumed(&disassembler);
        let value = match disassembler.read() {
            Some(value) => value.map_err(|err| TestCaseError::fail(err.to_string()))?,
            None => return Ok(()),
        };
        match value {
            DecodedValue::Instruction(instruction) => {
                let width = instruction.width();
                prop_assert_eq!(
                    disassembler.next_address(),
                    instruction.address().wrapping_add(width as u32)
                );
                prop_assert_eq!(consumed(&disassembler), before + width);
            }
            DecodedValue::Directive(_) => {
                prop_assert_eq!(consumed(&disassembler), before);
            }
        }
    }
    Err(TestCaseError::fail("stream did not terminate"))
}

/// Byte records at increasing addresses, with occasional gaps.
fn records() -> impl Strategy<Value = Vec<(u8, u32)>> {
    prop::collection::vec((any::<u8>(), 0u32..4), 0..64).prop_map(|bytes| {
        let mut address = 0x100;
        bytes
            .into_iter()
            .map(|(value, gap)| {
                // One record in four starts a new run.
                address += if gap == 3 { 7 } else { 1 };
                (value, address)
            })
            .collect()
    })
}

proptest! {
    #[cfg(feature = "8051")]
    #[test]
    fn mcs51_stream_invariants(records in records()) {
        check::<mcu_disasm::_8051::Mcs51>(&records)?;
    }

    #[cfg(feature = "avr")]
    #[test]
    fn avr_stream_invariants(records in records()) {
        check::<mcu_disasm::avr::Avr8>(&records)?;
    }

    #[cfg(feature = "pic")]
    #[test]
    fn pic_baseline_stream_invariants(records in records()) {
        check::<mcu_disasm::pic::Baseline>(&records)?;
    }

    #[cfg(feature = "pic")]
    #[test]
    fn pic_midrange_stream_invariants(records in records()) {
        check::<mcu_disasm::pic::Midrange>(&records)?;
    }

    #[cfg(feature = "pic")]
    #[test]
    fn pic_enhanced_stream_invariants(records in records()) {
        check::<mcu_disasm::pic::Enhanced>(&records)?;
    }

    #[cfg(feature = "pic")]
    #[test]
    fn pic18_stream_invariants(records in records()) {
        check::<mcu_disasm::pic::Pic18>(&records)?;
    }

    #[cfg(feature = "8051")]
    #[test]
    fn mcs51_width_conservation(records in records()) {
        check_widths::<mcu_disasm::_8051::Mcs51>(&records)?;
    }

    #[cfg(feature = "avr")]
    #[test]
    fn avr_width_conservation(records in records()) {
        check_widths::<mcu_disasm::avr::Avr8>(&records)?;
    }

    #[cfg(feature = "pic")]
    #[test]
    fn pic_width_conservation(records in records()) {
        check_widths::<mcu_disasm::pic::Enhanced>(&records)?;
        check_widths::<mcu_disasm::pic::Pic18>(&records)?;
    }

    #[cfg(feature = "avr")]
    #[test]
    fn every_avr_word_decodes(word in any::<u16>()) {
        let values = {
            let mut disassembler = Disassembler::<mcu_disasm::avr::Avr8, _>::new(
                ByteRecords::contiguous(0, &word.to_le_bytes()),
            );
            std::iter::from_fn(|| disassembler.read())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|err| TestCaseError::fail(err.to_string()))?
        };
        prop_assert_eq!(values.len(), 3);
        let instruction = values[1].instruction().unwrap();
        prop_assert!(instruction.width() <= 2);
    }
}
