#![no_main]

use libfuzzer_sys::fuzz_target;

mod utils;

fuzz_target!(|data: &[u8]| {
    let Some(line) = utils::truncate_utf8(data) else {
        return;
    };

    if let Ok(sig) = jitsig_resolve::split_log_signature(line) {
        let _ = jitsig_descriptor::parse_descriptor_list(&sig.params);
        let _ = jitsig_descriptor::expand_descriptor(&sig.return_type);
    }
    let _ = jitsig_resolve::SignatureParts::from_log_compilation_signature(line);
    let _ = jitsig_resolve::SignatureParts::from_bytecode_signature("Fuzz", line);
    let _ = jitsig_resolve::SignatureParts::from_bytecode_comment(line);
});
