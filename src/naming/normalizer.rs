//! # 名称规范化
//!
//! 将原始文件/目录名转换为规范显示名称，同时作为冲突检测的比较键。
//!
//! ## 规则（按顺序）
//! 1. 拆出最后一个 `.` 之后的扩展名（小写）
//! 2. 删除 `[...]` 与 `(...)` 注释
//! 3. 合并空白、去除首尾空白
//! 4. 小写后按空白分词首字母大写（`.` 视作分隔符）
//! 5. 编号规范化：`<n> de <m>` / `<n> of <m>` 或结尾数字前补 `- `
//! 6. 重新拼接扩展名
//!
//! ## 依赖关系
//! - 被 `naming/validator.rs`、`packer/` 调用
//! - 使用 `regex` crate

use regex::Regex;
use std::sync::LazyLock;

static SQUARE_BRACKETS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\]]*\]").unwrap());
static ROUND_BRACKETS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());

/// 有限集合编号：`1 De 54`、`34 of 545`
static BOUNDED_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+) (?:de|of) (\d+)$").unwrap());
static BOUNDED_DE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) [Dd][Ee] (\d+)$").unwrap());
static BOUNDED_OF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) [Oo][Ff] (\d+)$").unwrap());
static BOUNDED_DE_TAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+ de \d+)$").unwrap());
static BOUNDED_OF_TAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+ of \d+)$").unwrap());
static BOUNDED_DE_UNSEPARATED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^-] \d+ de \d+$").unwrap());
static BOUNDED_OF_UNSEPARATED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^-] \d+ of \d+$").unwrap());

/// 单一编号：结尾数字
static NUMBER_SIGN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#(\d+)$").unwrap());
static NUMBER_TAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)$").unwrap());
static NUMBER_UNSEPARATED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^-] \d+$").unwrap());

/// 规范化文件或目录名
///
/// 纯函数，对已规范化的名称幂等。
///
/// ```text
/// "Some comic 1 dE 54"          -> "Some Comic - 1 de 54"
/// "Foo [by X] 01"               -> "Foo - 01"
/// "Another test 456.CBR"        -> "Another Test - 456.cbr"
/// ```
pub fn normalize_name(raw: &str) -> String {
    let (base, extension) = split_extension(raw);
    format!("{}{}", normalize_stem(base), extension)
}

/// 规范化不带扩展名的名称（目录名中的 `.` 不视作扩展名分隔符）
pub fn normalize_stem(base: &str) -> String {
    // 删除 [] 与 () 中的注释
    let base = SQUARE_BRACKETS.replace_all(base, "");
    let base = ROUND_BRACKETS.replace_all(&base, "");

    // 大小写与空白
    let base = base.to_lowercase().replace('.', " ");
    let base = base
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    normalize_numbering(base)
}

/// 以 `stem + "." + extension` 的形式规范化，用于预测输出文件名
pub fn normalize_with_extension(stem: &str, extension: &str) -> String {
    normalize_name(&format!("{}.{}", stem, extension))
}

/// 拆分基础名与扩展名（扩展名包含前导 `.` 并小写）
fn split_extension(raw: &str) -> (&str, String) {
    match raw.rfind('.') {
        Some(idx) => (
            raw[..idx].trim(),
            format!(".{}", raw[idx + 1..].trim().to_lowercase()),
        ),
        None => (raw, String::new()),
    }
}

/// 首字母大写，其余字符保持不变
///
/// 大写形式不止一个字符时（`ß` -> `SS`）保留原字符，否则结果不再幂等。
fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => {
            let mut upper = first.to_uppercase();
            let head = match (upper.next(), upper.next()) {
                (Some(single), None) => single,
                _ => first,
            };
            std::iter::once(head).chain(chars).collect()
        }
        None => String::new(),
    }
}

fn normalize_numbering(name: String) -> String {
    if BOUNDED_SUFFIX.is_match(&name) {
        let name = BOUNDED_DE.replacen(&name, 1, "${1} de ${2}").into_owned();
        let name = BOUNDED_OF.replacen(&name, 1, "${1} of ${2}").into_owned();
        let name = ensure_hyphen(name, &BOUNDED_DE_UNSEPARATED, &BOUNDED_DE_TAIL);
        ensure_hyphen(name, &BOUNDED_OF_UNSEPARATED, &BOUNDED_OF_TAIL)
    } else {
        let name = NUMBER_SIGN.replacen(&name, 1, "${1}").into_owned();
        ensure_hyphen(name, &NUMBER_UNSEPARATED, &NUMBER_TAIL)
    }
}

/// 若编号前不是 `-`，在编号前插入 `- `
fn ensure_hyphen(name: String, unseparated: &Regex, tail: &Regex) -> String {
    if unseparated.is_match(&name) {
        tail.replacen(&name, 1, "- ${1}").into_owned()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(cases: &[(&str, &str)]) {
        for (raw, expected) in cases {
            assert_eq!(normalize_name(raw), *expected, "normalizing {:?}", raw);
        }
    }

    #[test]
    fn test_dotted_names() {
        check(&[(
            "Some.COMIC.-.for.WhatEver.reaSON.I.DID.NOT.WANT.TO.USE.blanks.3434.cbr",
            "Some Comic - For Whatever Reason I Did Not Want To Use Blanks - 3434.cbr",
        )]);
    }

    #[test]
    fn test_bounded_collections() {
        check(&[
            ("Some comic 1 dE 54", "Some Comic - 1 de 54"),
            ("Some cOMIC - 34 of 545", "Some Comic - 34 of 545"),
            ("Some CoMIC 35 de 435  ", "Some Comic - 35 de 435"),
            ("Some comic 2 OF 3.CBZ", "Some Comic - 2 of 3.cbz"),
        ]);
    }

    #[test]
    fn test_brackets_in_names() {
        check(&[
            (
                "Some comic - Random title With caps 06 [TM][por someGuy y Another guy][Some guys together].cbr",
                "Some Comic - Random Title With Caps - 06.cbr",
            ),
            (
                "Some comic - Random title With caps 07a [TM][por someGuy y Another guy][Some guys together].cbz",
                "Some Comic - Random Title With Caps 07a.cbz",
            ),
            (
                "SOME comic - Random title  With CAPS 11 [TM][por  someGuy y Another guy][Some guys together].cbz",
                "Some Comic - Random Title With Caps - 11.cbz",
            ),
            (
                " Some comic - Random TITLE With caps 13 [TM][Whatever Comics].cbr",
                "Some Comic - Random Title With Caps - 13.cbr",
            ),
            (
                "Some comic - Random title With caps 78 [TM[Whatever Comics].cbz",
                "Some Comic - Random Title With Caps - 78.cbz",
            ),
            (
                "Some comic - Random One Shot [Blah].cbr",
                "Some Comic - Random One Shot.cbr",
            ),
            (
                "SOME  COMIC 84 #001 (1994) -  some Title.cbz",
                "Some Comic 84 #001 - Some Title.cbz",
            ),
            ("Foo [by X] 01", "Foo - 01"),
            ("Foo [bar]", "Foo"),
        ]);
    }

    #[test]
    fn test_diacritics_are_kept() {
        check(&[(
            "Some comic - Blàh bláh BlÂh - Subseries 01 (Never mind 08)    [José y Pàco].cbz",
            "Some Comic - Blàh Bláh Blâh - Subseries - 01.cbz",
        )]);
    }

    #[test]
    fn test_number_sign_is_stripped() {
        check(&[
            ("Batman #12", "Batman - 12"),
            ("Batman - #12", "Batman - 12"),
        ]);
    }

    #[test]
    fn test_no_trailing_number() {
        check(&[
            ("the walking DEAD", "The Walking Dead"),
            ("dir", "Dir"),
            ("", ""),
        ]);
    }

    #[test]
    fn test_idempotence() {
        let names = [
            "Some comic 1 dE 54",
            "Some cOMIC - 34 of 545",
            "Foo [by X] 01",
            "dir 1 [by some guy]",
            "Another test 456.cbr",
            "Some.COMIC.-.for.WhatEver.reaSON.3434.cbr",
            "SOME  COMIC 84 #001 (1994) -  some Title.cbz",
            "Blàh bláh 7",
            "ßtraße 1",
            "ﬁsh tales 2",
        ];
        for name in names {
            let once = normalize_name(name);
            assert_eq!(normalize_name(&once), once, "not idempotent for {:?}", name);
        }
    }

    #[test]
    fn test_multi_char_uppercase_keeps_first_letter() {
        assert_eq!(normalize_name("ßtraße 1"), "ßtraße - 1");
        assert_eq!(normalize_name("ﬁsh tales 2"), "ﬁsh Tales - 2");
        assert_eq!(normalize_name("ßtraße 1.CBZ"), "ßtraße - 1.cbz");
    }

    #[test]
    fn test_normalize_with_extension() {
        assert_eq!(normalize_with_extension("some comic", "cbz"), "Some Comic.cbz");
        assert_eq!(normalize_with_extension("test 1", "cbz"), "Test - 1.cbz");
        assert_eq!(
            normalize_with_extension("other.comic.2 [scan]", "CBZ"),
            "Other Comic - 2.cbz"
        );
    }

    #[test]
    fn test_stem_keeps_dots_as_separators() {
        assert_eq!(normalize_stem("some.comic.2"), "Some Comic - 2");
        assert_eq!(normalize_name("some.comic.2"), "Some Comic.2");
    }
}
