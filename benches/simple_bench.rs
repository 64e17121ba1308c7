use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kwsearch::{to_dictionary, Trie};

fn cracklib_words() -> Vec<String> {
    use std::fs::File;
    use std::io::{BufRead, BufReader};

    let f = match File::open("/usr/share/dict/cracklib-small") {
        Ok(f) => f,
        Err(_) => {
            return (0..2000).map(|i| format!("word{i}")).collect();
        }
    };
    BufReader::new(f)
        .lines()
        .map(|l| l.expect("readable line"))
        .filter(|l| !l.is_empty())
        .collect()
}

fn bench_cracklib(c: &mut Criterion) {
    let words = cracklib_words();
    let trie = Trie::build(to_dictionary(words)).expect("valid dictionary");

    c.bench_function("cracklib_search", |b| {
        b.iter(|| trie.search(black_box("cafécafé café café")));
    });
}

criterion_group!(benches, bench_cracklib);
criterion_main!(benches);
