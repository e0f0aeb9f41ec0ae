use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;

use tempfile::TempDir;
use translator::{DataFormat, FormatData, LoadErrorKind, Translator};

fn write(dir: &Path, locale: &str, file: &str, content: &str) {
    let locale_dir = dir.join(locale);
    fs::create_dir_all(&locale_dir).unwrap();
    fs::write(locale_dir.join(file), content).unwrap();
}

fn language_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "zh_CN",
        "all.json",
        r#"{
            "user_not_exists": "用户 {name} 不存在。",
            "errors": {"not_found": "{item} 未找到", "depth": {"deep": "很深"}},
            "greeting": "你好"
        }"#,
    );
    write(
        dir.path(),
        "en_US",
        "all.json",
        r#"{
            "user_not_exists": "user {name} not exists.",
            "errors": {"not_found": "{item} not found"},
            "a": {"b": "pattern {x}"}
        }"#,
    );
    dir
}

#[test]
fn switching_locale_does_not_bleed() {
    let dir = language_dir();
    let mut translator = Translator::new(dir.path(), "zh_CN").unwrap();
    assert_eq!(translator.trans("greeting", FormatData::new()).unwrap(), "你好");

    translator.set_locale("en_US").unwrap();
    assert_eq!(translator.locale(), "en_US");
    assert_eq!(translator.trans("greeting", FormatData::new()).unwrap(), "greeting");
    assert_eq!(
        translator.trans("errors.not_found", [("item", "file")]).unwrap(),
        "file not found"
    );

    let mut loaded: Vec<&str> = translator.loaded_locales().collect();
    loaded.sort();
    assert_eq!(loaded, ["en_US", "zh_CN"]);
}

#[test]
fn nested_lookup_with_data() {
    let dir = language_dir();
    let mut translator = Translator::new(dir.path(), "en_US").unwrap();
    assert_eq!(translator.get_line("a.b", [("x", "V")], None).unwrap(), "pattern V");
    assert_eq!(translator.get_line("a.b.c", [("x", "V")], None).unwrap(), "a.b.c");
}

#[test]
fn trans_map_matches_individual_lines() {
    let dir = language_dir();
    let mut translator = Translator::new(dir.path(), "zh_CN").unwrap();

    let d1 = FormatData::new().arg("name", "张三");
    let d2 = FormatData::new().arg("item", "文件");
    let mut request = HashMap::new();
    request.insert("user_not_exists", d1.clone());
    request.insert("errors.not_found", d2.clone());

    let lines = translator.trans_map(request).unwrap();
    let keys: Vec<&str> = lines.keys().map(String::as_str).collect();
    assert_eq!(keys, ["errors.not_found", "user_not_exists"]);
    assert_eq!(lines["user_not_exists"], translator.get_line("user_not_exists", d1, None).unwrap());
    assert_eq!(lines["errors.not_found"], translator.get_line("errors.not_found", d2, None).unwrap());
}

#[test]
fn accept_language_accessor_selects_locale() {
    let dir = language_dir();
    let translator = Translator::builder(dir.path())
        .accept_language_from(|| Some("en-US,zh-CN;q=0.9".to_string()))
        .build()
        .unwrap();
    assert_eq!(translator.locale(), "en_US");

    let translator = Translator::builder(dir.path())
        .accept_language_from(|| None)
        .build()
        .unwrap();
    assert_eq!(translator.locale(), "zh_CN");
}

#[test]
fn unknown_initial_locale_fails_to_build() {
    let dir = language_dir();
    let err = Translator::new(dir.path(), "ko_KR").unwrap_err();
    assert_eq!(err.load_kind(), Some(LoadErrorKind::Io));
}

#[test]
fn yaml_language_dir() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "en_US", "all.yaml", "menu:\n  open: \"Open {file}\"\n");

    let mut translator = Translator::builder(dir.path())
        .locale("en_US")
        .data_format(DataFormat::Yaml)
        .build()
        .unwrap();
    assert_eq!(translator.data_format(), DataFormat::Yaml);
    assert_eq!(translator.trans("menu.open", [("file", "a.txt")]).unwrap(), "Open a.txt");
}

#[test]
fn shared_behind_mutex() {
    let dir = language_dir();
    let translator = Arc::new(Mutex::new(Translator::new(dir.path(), "en_US").unwrap()));

    let handles: Vec<_> = ["en_US", "zh_CN"]
        .into_iter()
        .map(|locale| {
            let translator = Arc::clone(&translator);
            thread::spawn(move || {
                let mut translator = translator.lock().unwrap();
                translator
                    .get_line("user_not_exists", [("name", "x")], Some(locale))
                    .unwrap()
            })
        })
        .collect();

    let mut lines: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    lines.sort();
    assert_eq!(lines, ["user x not exists.", "用户 x 不存在。"]);
}
