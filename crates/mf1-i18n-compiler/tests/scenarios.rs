use std::sync::Arc;

use mf1_i18n_compiler::{Assembled, CompileError, Locales, MessageFormat, MessageSource, escape};
use mf1_i18n_core::{Args, CoreError, PluralKind, Value};
use mf1_i18n_runtime::{
    BasicFormatBackend, BasicPluralRules, Bindings, ExportTarget, args_from_json_str, load_module,
};
use proptest::prelude::*;

fn mf() -> MessageFormat {
    MessageFormat::new(Arc::new(BasicPluralRules)).expect("build")
}

fn render(mf: &MessageFormat, pattern: &str, args: &Args) -> String {
    mf.compile(pattern)
        .expect("compile")
        .format(args)
        .expect("format")
}

#[test]
fn plural_with_exact_and_category_cases() {
    let message = mf()
        .compile_for("{X, plural, =0{no items} one{one item} other{# items}}", "en")
        .expect("compile");
    let cases = [(0, "no items"), (1, "one item"), (5, "5 items")];
    for (value, expected) in cases {
        let args = Args::new().with("X", value);
        assert_eq!(message.format(&args).expect("format"), expected);
    }
}

#[test]
fn select_falls_back_to_other() {
    let message = mf()
        .compile("{G, select, male{He} female{She} other{They}} liked this.")
        .expect("compile");
    let female = Args::new().with("G", "female");
    let unknown = Args::new().with("G", "other-value");
    assert_eq!(message.format(&female).expect("format"), "She liked this.");
    assert_eq!(message.format(&unknown).expect("format"), "They liked this.");
}

#[test]
fn disabled_key_checks_accept_foreign_categories() {
    let pattern = "{n, plural, zero{none} other{some}}";
    assert!(matches!(
        mf().compile(pattern),
        Err(CompileError::InvalidPluralKey { .. })
    ));
    let relaxed = MessageFormat::builder(Arc::new(BasicPluralRules))
        .plural_key_checks(false)
        .build()
        .expect("build");
    let message = relaxed.compile(pattern).expect("compile");
    assert_eq!(message.format(&Args::new().with("n", 0)).expect("format"), "some");
}

#[test]
fn exact_match_wins_over_category_with_offset() {
    let message = mf()
        .compile("{n, plural, offset:1 =0{just you} one{you and one other} other{you and # others}}")
        .expect("compile");
    assert_eq!(message.format(&Args::new().with("n", 1)).expect("format"), "just you");
    assert_eq!(
        message.format(&Args::new().with("n", 2)).expect("format"),
        "you and one other"
    );
    assert_eq!(
        message.format(&Args::new().with("n", 4)).expect("format"),
        "you and 3 others"
    );
}

#[test]
fn regional_locale_behaves_like_its_language() {
    let mf = mf();
    let pattern = "{n, plural, one{one} other{other}}";
    let regional = mf.compile_for(pattern, "en-US").expect("en-US");
    let base = mf.compile_for(pattern, "en").expect("en");
    for n in [0, 1, 2, 21] {
        let args = Args::new().with("n", n);
        assert_eq!(
            regional.format(&args).expect("format"),
            base.format(&args).expect("format")
        );
    }
    let rule = mf.resolve_locale("en-GB").expect("rule");
    assert_eq!(rule.locale(), "en");
    assert!(matches!(
        mf.resolve_locale("xx-YY"),
        Err(CompileError::LocaleNotFound(_))
    ));
}

#[test]
fn selectordinal_uses_ordinal_categories() {
    let message = mf()
        .compile("{p, selectordinal, one{#st} two{#nd} few{#rd} other{#th}}")
        .expect("compile");
    let rendered: Vec<String> = [1, 2, 3, 4, 11, 22]
        .into_iter()
        .map(|p| message.format(&Args::new().with("p", p)).expect("format"))
        .collect();
    assert_eq!(rendered, ["1st", "2nd", "3rd", "4th", "11th", "22nd"]);
    assert_eq!(
        mf().resolve_locale("en")
            .expect("en")
            .categories(PluralKind::Ordinal)
            .len(),
        4
    );
}

#[test]
fn absent_arguments_render_empty() {
    assert_eq!(render(&mf(), "[{missing}]", &Args::new()), "[]");
}

#[test]
fn positional_arguments_from_sequences() {
    let args = Args::from_sequence([Value::from("Ada"), Value::from(3)]);
    assert_eq!(
        render(&mf(), "{0} has {1, plural, one{# cat} other{# cats}}", &args),
        "Ada has 3 cats"
    );
    let json = args_from_json_str(r#"["Ada", 1]"#).expect("args");
    assert_eq!(
        render(&mf(), "{0} has {1, plural, one{# cat} other{# cats}}", &json),
        "Ada has 1 cat"
    );
}

#[test]
fn strict_number_sign_fails_at_evaluation_only() {
    let strict = MessageFormat::builder(Arc::new(BasicPluralRules))
        .strict_number_sign(true)
        .build()
        .expect("build");
    let message = strict.compile("{n, plural, other{# things}}").expect("compile");
    assert_eq!(
        message.format(&Args::new().with("n", "12")).expect("numeric string"),
        "12 things"
    );
    for value in ["many", "inf", "infinity"] {
        let error = message
            .format(&Args::new().with("n", value))
            .expect_err("non-numeric");
        assert!(matches!(error, CoreError::NonNumericNumberSign { .. }));
    }
}

#[test]
fn offsets_are_whole_numbers_and_survive_modules() {
    assert!(matches!(
        mf().compile("{n, plural, offset:0.5 other{#}}"),
        Err(CompileError::Parse(_))
    ));
    let source =
        MessageSource::from("{n, plural, offset:2 =0{only you two} other{you two and # more}}");
    let Assembled::Module(text) = mf()
        .compile_module(&source, None, Some(&ExportTarget::Default))
        .expect("module")
    else {
        panic!("expected module");
    };
    let bindings = Bindings::new(Arc::new(BasicPluralRules));
    let loaded = load_module(&text, &bindings).expect("load");
    assert_eq!(
        loaded.format(&Args::new().with("n", 2)).expect("format"),
        "only you two"
    );
    assert_eq!(
        loaded.format(&Args::new().with("n", 5)).expect("format"),
        "you two and 3 more"
    );
}

#[test]
fn builtin_formatters_require_opt_in() {
    let pattern = "{share, number, percent}";
    assert!(matches!(
        mf().compile(pattern),
        Err(CompileError::UnknownFormatter { .. })
    ));
    let with_builtins = MessageFormat::builder(Arc::new(BasicPluralRules))
        .builtin_formatters(true)
        .build()
        .expect("build");
    assert_eq!(
        render(&with_builtins, pattern, &Args::new().with("share", 0.42)),
        "42%"
    );
}

#[test]
fn custom_formatters_receive_opaque_values() {
    let mf = MessageFormat::builder(Arc::new(BasicPluralRules))
        .formatter("prop", |value, _, style| {
            let Value::Map(map) = value else {
                return String::new();
            };
            style
                .and_then(|style| style.first())
                .and_then(|key| map.get(key))
                .map(Value::render)
                .unwrap_or_default()
        })
        .build()
        .expect("build");
    let args = args_from_json_str(r#"{"obj": {"a": "deep"}}"#).expect("args");
    assert_eq!(render(&mf, "{obj, prop, a}", &args), "deep");
}

#[test]
fn bidi_support_isolates_arguments() {
    let mf = MessageFormat::builder(Arc::new(BasicPluralRules))
        .bidi_support(true)
        .build()
        .expect("build");
    let args = Args::new().with("user", "مريم");
    assert_eq!(
        render(&mf, "{user} liked this", &args),
        "\u{2068}مريم\u{2069} liked this"
    );
}

#[test]
fn multi_locale_sets_survive_portable_modules() {
    let mf = MessageFormat::builder(Arc::new(BasicPluralRules))
        .locales(Locales::Multiple(vec!["en".to_string(), "ru".to_string()]))
        .builtin_formatters(true)
        .build()
        .expect("build");
    let source = MessageSource::from_json_str(
        r#"{
            "en": {"files": "{n, plural, one{# file} other{# files}}"},
            "ru": {"files": "{n, plural, one{# файл} few{# файла} many{# файлов} other{# файла}}"},
            "total": "Total: {t, number, integer}"
        }"#,
    )
    .expect("source");

    let live = mf.compile_set(&source, None).expect("compile");
    let target = ExportTarget::Universal {
        path: Some("i18n.messages".to_string()),
    };
    let Assembled::Module(text) = mf
        .compile_module(&source, None, Some(&target))
        .expect("module")
    else {
        panic!("expected module");
    };
    let bindings =
        Bindings::new(Arc::new(BasicPluralRules)).with_backend(Arc::new(BasicFormatBackend));
    let loaded = load_module(&text, &bindings).expect("load");

    let live_set = live.as_set().expect("set");
    let loaded_set = loaded.as_set().expect("set");
    for n in [1, 3, 5, 21] {
        let args = Args::new().with("n", n).with("t", 9.6);
        for path in [&["en", "files"][..], &["ru", "files"][..], &["total"][..]] {
            assert_eq!(
                live_set.format(path, &args).expect("live"),
                loaded_set.format(path, &args).expect("loaded")
            );
        }
    }
    assert_eq!(
        loaded_set
            .format(&["ru", "files"], &Args::new().with("n", 3))
            .expect("ru"),
        "3 файла"
    );
    assert_eq!(
        loaded_set
            .format(&["total"], &Args::new().with("t", 9.6))
            .expect("total"),
        "Total: 10"
    );
}

proptest! {
    #[test]
    fn escaped_literals_render_verbatim(text in "[ -~]{0,40}") {
        let message = mf().compile(&escape(&text)).expect("compile");
        prop_assert_eq!(message.format(&Args::new()).expect("format"), text);
    }

    #[test]
    fn unknown_select_values_never_fail(value in "[a-z]{0,8}") {
        let message = mf()
            .compile("{v, select, known{k} other{o}}")
            .expect("compile");
        let rendered = message.format(&Args::new().with("v", value.as_str())).expect("format");
        prop_assert!(rendered == "k" || rendered == "o");
    }
}
