//! Immutable reference data: postal codes and name-component tables.
//!
//! Loaded once behind a [`std::sync::OnceLock`] and shared by reference
//! across every worker; nothing here is mutated after first access.

use std::sync::OnceLock;

/// One real Japanese postal code, down to town level. The chōme and
/// building are always synthesized on top of this, never stored here.
#[derive(Debug, Clone, Copy)]
pub struct PostalCodeEntry {
    pub code: &'static str,
    pub prefecture: &'static str,
    pub city: &'static str,
    pub town: &'static str,
}

const POSTAL_CODES: &[PostalCodeEntry] = &[
    PostalCodeEntry { code: "1000001", prefecture: "東京都", city: "千代田区", town: "千代田" },
    PostalCodeEntry { code: "5300001", prefecture: "大阪府", city: "大阪市北区", town: "梅田" },
    PostalCodeEntry { code: "4600001", prefecture: "愛知県", city: "名古屋市中区", town: "三の丸" },
    PostalCodeEntry { code: "8120011", prefecture: "福岡県", city: "福岡市博多区", town: "博多駅前" },
    PostalCodeEntry { code: "0600001", prefecture: "北海道", city: "札幌市中央区", town: "北一条西" },
    PostalCodeEntry { code: "2310001", prefecture: "神奈川県", city: "横浜市中区", town: "新港" },
];

const FAMILY_NAMES_KANJI: &[&str] = &["山田", "佐藤", "鈴木", "田中", "高橋", "渡辺", "伊藤", "中村"];
const GIVEN_NAMES_KANJI: &[&str] = &["太郎", "花子", "次郎", "美咲", "健一", "由美", "和夫", "春子"];
const FAMILY_NAMES_KANA: &[&str] = &["ヤマダ", "サトウ", "スズキ", "タナカ", "タカハシ", "ワタナベ", "イトウ", "ナカムラ"];
const GIVEN_NAMES_KANA: &[&str] = &["タロウ", "ハナコ", "ジロウ", "ミサキ", "ケンイチ", "ユミ", "カズオ", "ハルコ"];

static POSTAL_TABLE: OnceLock<&'static [PostalCodeEntry]> = OnceLock::new();

pub fn postal_codes() -> &'static [PostalCodeEntry] {
    POSTAL_TABLE.get_or_init(|| POSTAL_CODES)
}

pub fn pick_postal_code(index: usize) -> &'static PostalCodeEntry {
    let table = postal_codes();
    &table[index % table.len()]
}

pub fn pick_family_kanji(index: usize) -> &'static str {
    FAMILY_NAMES_KANJI[index % FAMILY_NAMES_KANJI.len()]
}

pub fn pick_given_kanji(index: usize) -> &'static str {
    GIVEN_NAMES_KANJI[index % GIVEN_NAMES_KANJI.len()]
}

pub fn pick_family_kana(index: usize) -> &'static str {
    FAMILY_NAMES_KANA[index % FAMILY_NAMES_KANA.len()]
}

pub fn pick_given_kana(index: usize) -> &'static str {
    GIVEN_NAMES_KANA[index % GIVEN_NAMES_KANA.len()]
}
