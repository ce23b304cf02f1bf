#![no_main]

use arbitrary::Arbitrary;
use folio::query::{group_offsets, merge_tolerance, Highlight, SnippetFormatter};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    text: &'a [u8],
    offsets: Vec<u16>,
    query_len: u8,
    lookaround: u8,
}

fuzz_target!(|input: Input| {
    // Offsets past the end of the text are clamped, not trusted
    let formatter = SnippetFormatter::new(input.lookaround as usize, Highlight::strong());
    let offsets = input.offsets.iter().map(|&o| o as usize).collect();
    let tolerance = merge_tolerance(input.lookaround as usize, input.query_len as usize);

    for group in group_offsets(offsets, tolerance) {
        let _ = formatter.format(input.text, group.offsets(), input.query_len as usize);
    }
});
