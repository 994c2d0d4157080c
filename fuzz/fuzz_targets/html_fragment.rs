#![no_main]

use html::Document;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let (mut doc, root) = Document::parse_fragment(input);
    let serialized = doc.inner_html(root);
    let _ = Document::parse_fragment(&serialized);
    doc.set_inner_html(root, input);
    let _ = doc.text_content(root);
});
