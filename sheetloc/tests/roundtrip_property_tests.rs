use proptest::prelude::*;
use std::path::Path;
use std::str::FromStr;

use sheetloc::{LocaleTable, TranslateOptions, VecGrid, Window, policy, transcode};

fn text_strategy() -> impl Strategy<Value = String> {
    // Arbitrary-ish text, excluding the CDATA wrapper markers and the
    // line-break marker the wrapper itself introduces.
    proptest::string::string_regex("[A-Za-z0-9 _\\-\\.,!\\?\n]{0,40}").expect("valid text regex")
}

proptest! {
    #[test]
    fn cdata_wrap_strip_round_trip(text in text_strategy()) {
        let stripped = policy::strip_cdata(&policy::wrap_cdata(&text));
        prop_assert_eq!(stripped, text);
    }

    #[test]
    fn format_specifier_stripping_is_idempotent(text in text_strategy()) {
        let once = policy::strip_format_specifiers(&text);
        let twice = policy::strip_format_specifiers(&once);
        prop_assert_eq!(once, twice);
    }
}

// Transcoding a column to XML and re-reading it through the reverse path
// must surface the same key set as the direct JSON path for that column.
#[test]
fn xml_and_json_paths_agree_on_keys() {
    let grid = VecGrid::from_rows(&[
        &["", "", "", "en", "fr"],
        &["", "", "", "English", "French"],
        &["greeting", "", "", "Hello", "Bonjour"],
        &["farewell", "", "", "Goodbye", "Au revoir"],
        &["note", "yes", "", "A\nnote", "Une\nnote"],
    ]);
    let options = TranslateOptions {
        start_row: 3,
        start_col: 4,
        key_col: 1,
        cdata_col: 2,
        trans_col: 3,
        default_col: 4,
        json_lang_row: 1,
        xml_lang_row: 2,
        ..TranslateOptions::default()
    };
    let window = Window::resolve(&grid, options.start_row, 0, options.start_col, 0).unwrap();
    let locales = LocaleTable::from_str(
        r#"[{"code": "en", "name": "English"}, {"code": "fr", "name": "French"}]"#,
    )
    .unwrap();

    let xml_record = transcode::android_xml::transcode(&grid, 5, &options, &window).unwrap();
    let mut serialized = Vec::new();
    xml_record.to_writer(&mut serialized).unwrap();
    let reversed = transcode::xml_to_json::transcode(
        Path::new("values-fr/strings.xml"),
        &String::from_utf8(serialized).unwrap(),
        &locales,
    )
    .unwrap();

    let json_record =
        transcode::ios_json::transcode(&grid, 5, &options, &window, &locales).unwrap();

    let reversed_keys: Vec<&String> = reversed.entries.keys().collect();
    let json_keys: Vec<&String> = json_record.entries.keys().collect();
    assert_eq!(reversed_keys, json_keys);

    // The CDATA-flagged entry's text survives the round trip with its
    // newline restored.
    assert_eq!(
        reversed.entries.get("note").unwrap().as_str(),
        Some("Une\nnote")
    );
}
