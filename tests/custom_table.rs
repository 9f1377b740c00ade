//! Runs in its own process so the global registry starts uninitialized.

use bible_translit::{RegistryError, TableRegistry};

#[test]
fn custom_table_overrides_builtin_before_first_use() {
    TableRegistry::init_custom("el", "φ\tph\nι\ti\nλ\tl\nο\to\nς\ts\n".to_string()).unwrap();
    TableRegistry::init_custom("x-test", "ש\tš\n".to_string()).unwrap();

    let result = bible_translit::transliterate("grc", "φιλος").unwrap();
    assert_eq!(result.output, "philos");
    assert_eq!(
        bible_translit::transliterate("x-test", "ש").unwrap().output,
        "š"
    );
    // Hebrew keeps its built-in table.
    assert!(TableRegistry::global().get("hbo").unwrap().len() > 300);
    assert_eq!(TableRegistry::global().tags(), vec!["grc", "hbo", "x-test"]);

    let err = TableRegistry::init_custom("syc", "ܐ\tʼ\n".to_string()).unwrap_err();
    assert!(matches!(err, RegistryError::AlreadyInitialized));
}
