#![no_main]

use calculation::DecompositionService;
use calculation_sdk::OperandToken;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Larger inputs only exercise the length limit
    if data.len() > 1024 {
        return;
    }
    if let Ok(s) = std::str::from_utf8(data) {
        let service = DecompositionService::default();
        // Errors are expected; any emitted reference must point backwards
        if let Ok(decomposition) = service.decompose_with_result(s) {
            for (index, op) in decomposition.operations.iter().enumerate() {
                for reference in op.references() {
                    assert!(
                        decomposition.operations[..index]
                            .iter()
                            .any(|earlier| earlier.id == reference)
                    );
                }
            }
            if let OperandToken::Reference(id) = decomposition.result {
                assert_eq!(decomposition.operations.last().map(|op| op.id), Some(id));
            }
        }
    }
});
