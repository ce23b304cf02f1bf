#![no_main]

use arbitrary::Arbitrary;
use folio::index::Corpus;
use folio::query::{SearchOptions, Searcher};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    corpus: &'a [u8],
    query: &'a str,
    lookaround: u8,
}

fuzz_target!(|input: Input| {
    // Arbitrary bytes, including invalid UTF-8, must never panic
    let searcher = Searcher::new(
        Corpus::from_bytes(input.corpus),
        SearchOptions {
            lookaround: input.lookaround as usize,
            ..Default::default()
        },
    );

    let snippets = searcher.search(input.query);
    assert_eq!(snippets.len(), searcher.groups(input.query).len());
});
