const SECTIONS: [&str; 3] = ["table", "transliterate", "audit"];

fn main() {
    // The settings singleton panics on invalid embedded defaults, so catch
    // that at compile time instead.
    let path = "src/default_settings.toml";
    let content = include_str!("src/default_settings.toml");
    let table: toml::Table = match toml::from_str(content) {
        Ok(t) => t,
        Err(e) => panic!("{path} contains invalid TOML: {e}"),
    };
    for section in SECTIONS {
        if !table.get(section).is_some_and(toml::Value::is_table) {
            panic!("{path} is missing the [{section}] section");
        }
    }
}
