#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(list) = css::parse_selector_list(input) else {
        return;
    };
    let (doc, root) = html::Document::parse_fragment(
        "<div class=\"a b\" data-hook=\"x y\"><p id=\"p\"><span></span></p></div>",
    );
    for id in css::query_all(&doc, root, &list) {
        assert!(list.matches(&doc, id));
    }
});
