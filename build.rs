fn main() {
    // Validate embedded tables at compile time.
    validate_tsv("src/tables/hbo.tsv", include_str!("src/tables/hbo.tsv"));
    validate_tsv("src/tables/grc.tsv", include_str!("src/tables/grc.tsv"));
}

fn validate_tsv(path: &str, content: &str) {
    for (i, line) in content.lines().enumerate() {
        let fields = line.split('\t').count();
        if fields != 2 {
            panic!("{path}:{}: expected 2 tab-separated fields, found {fields}", i + 1);
        }
        if line.starts_with('\t') {
            panic!("{path}:{}: empty source grapheme", i + 1);
        }
    }
}
