#![no_main]

use jitsig_descriptor::{
    expand_descriptor, parse_descriptor_list, parse_field_descriptor, parse_method_descriptor,
    TypeDescriptor,
};
use libfuzzer_sys::fuzz_target;

mod utils;

fuzz_target!(|data: &[u8]| {
    let Some(text) = utils::truncate_utf8(data) else {
        return;
    };

    let _ = expand_descriptor(text);
    let _ = parse_method_descriptor(text);
    let _ = parse_descriptor_list(text);
    let _ = TypeDescriptor::parse_name(text);
    if let Ok(descriptor) = parse_field_descriptor(text) {
        let _ = descriptor.to_binary_name();
        let _ = descriptor.to_string();
    }
});
