use std::{fs, io::Write};

use libyure::prelude::*;

const SYNONYMS: &str = include_str!("fixtures/synonyms.csv");

fn normalizer(custom: Option<CustomDictionary>) -> Normalizer<ScriptTokenizer> {
  Normalizer::new(ScriptTokenizer)
    .synonyms(SynonymDictionary::from_reader(SYNONYMS.as_bytes()).unwrap())
    .maybe_custom(custom)
    .build()
    .unwrap()
}

fn custom() -> CustomDictionary {
  CustomDictionary::from_path(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/custom.json")).unwrap()
}

/// A morphological normalizer over the lexicon in `fixtures/lindera`, with
/// the custom dictionary loaded. Keep the directory alive while it is used.
fn analyzer() -> (tempfile::TempDir, Normalizer<LinderaTokenizer>) {
  let directory = tempfile::tempdir().unwrap();

  LinderaTokenizer::compile(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/lindera"), directory.path()).unwrap();

  let normalizer = Normalizer::new(LinderaTokenizer::from_path(directory.path()).unwrap())
    .synonyms(SynonymDictionary::from_reader(SYNONYMS.as_bytes()).unwrap())
    .custom(custom())
    .build()
    .unwrap();

  (directory, normalizer)
}

#[test]
fn variants_collapse_to_the_same_representative() {
  let result = normalizer(None).normalize_detailed("「パソコン」は「パーソナルコンピュータ」と表記する", &NormalizerConfig::default());

  assert_eq!(result.text, "「パーソナルコンピューター」は「パーソナルコンピューター」と表記する");
  assert_eq!(result.replacements.len(), 2);
  assert!(result.replacements.iter().all(|replacement| replacement.replacement == "パーソナルコンピューター"));
}

#[test]
fn abbreviation_without_alphabet_variants() {
  let config = NormalizerConfig::builder().alphabetic_abbreviation(true).alphabet(false).build();
  let result = normalizer(None).normalize_detailed("PCとWi-Fi", &config);

  assert_eq!(result.text, "パーソナルコンピューターとWi-Fi");
  assert_eq!(result.replacements.len(), 1);
  assert_eq!(result.replacements[0].category, Some(Category::AlphabeticAbbreviation));

  let result = normalizer(None).normalize("PCとWi-Fi", &NormalizerConfig::default());

  assert_eq!(result, "パーソナルコンピューターとワイファイ");
}

#[test]
fn custom_mapping_without_builtin_entries() {
  let normalizer = normalizer(Some(custom()));
  let result = normalizer.normalize_detailed("幽白、ゆうはく、幽遊白書。", &NormalizerConfig::default());

  assert_eq!(result.text, "幽遊白書、幽遊白書、幽遊白書。");
  assert_eq!(result.replacements.len(), 2);
  assert!(result.replacements.iter().all(|replacement| replacement.source == Source::Custom));

  let config = NormalizerConfig::builder().custom_synonym(false).build();

  assert_eq!(normalizer.normalize("幽白、ゆうはく。", &config), "幽白、ゆうはく。");
}

#[test]
fn longest_overlapping_match_wins() {
  let synonyms = SynonymDictionary::build([
    ["1", "1", "0", "1", "0", "0", "0", "", "アルファベット"],
    ["1", "1", "0", "1", "0", "0", "2", "", "A-B-C"],
    ["2", "1", "0", "1", "0", "0", "0", "", "エービー"],
    ["2", "1", "0", "1", "0", "0", "2", "", "A-B"],
  ])
  .unwrap();

  let normalizer = Normalizer::new(ScriptTokenizer).synonyms(synonyms).build().unwrap();
  let result = normalizer.normalize_detailed("A-B-C!", &NormalizerConfig::default());

  assert_eq!(result.text, "アルファベット!");
  assert_eq!(result.replacements.len(), 1);
  assert_eq!(result.replacements[0].original, "A-B-C");

  assert_eq!(normalizer.normalize("A-B!", &NormalizerConfig::default()), "エービー!");
}

#[test]
fn normalization_is_idempotent() {
  let normalizer = normalizer(Some(custom()));
  let config = NormalizerConfig::builder().expansion(Expansion::Any).build();

  for text in ["「パソコン」は「パーソナルコンピュータ」と表記する", "USAとアメリカ、江戸とチェック", "幽白とノートPCとラップトップ", "ジェネラティブなAI"] {
    let once = normalizer.normalize(text, &config);
    let twice = normalizer.normalize(&once, &config);

    assert_eq!(once, twice, "{text}");
  }
}

#[test]
fn unmatched_text_is_preserved() {
  let normalizer = normalizer(Some(custom()));
  let text = "  「江戸」、 USA\tと\nパソコン!! ";
  let result = normalizer.normalize_detailed(text, &NormalizerConfig::builder().expansion(Expansion::Any).build());

  let mut rebuilt = String::new();
  let mut cursor = 0;

  for replacement in &result.replacements {
    assert_eq!(&text[replacement.start..replacement.end], replacement.original);

    rebuilt.push_str(&text[cursor..replacement.start]);
    rebuilt.push_str(&replacement.replacement);
    cursor = replacement.end;
  }

  rebuilt.push_str(&text[cursor..]);

  assert_eq!(rebuilt, result.text);
  assert_eq!(result.text, "  「東京」、 アメリカ合衆国\tと\nノートPC!! ");
}

#[test]
fn custom_wins_over_disabled_builtin_categories() {
  let normalizer = normalizer(Some(custom()));
  let config = NormalizerConfig::builder().non_alphabetic_abbreviation(false).build();

  assert_eq!(normalizer.normalize("パソコン", &config), "ノートPC");
  assert_eq!(normalizer.normalize("パソコン", &NormalizerConfig::builder().custom_synonym(false).build()), "パーソナルコンピューター");
}

#[test]
fn disabled_categories_are_never_replaced() {
  let normalizer = normalizer(None);
  let text = "ジェネラティブな蹴球と江戸のパーソナルコンピュータ";

  let categories = [
    (NormalizerConfig::builder().misspelling(false).build(), Category::Misspelling),
    (NormalizerConfig::builder().alias(false).build(), Category::Alias),
    (NormalizerConfig::builder().old_name(false).build(), Category::OldName),
    (NormalizerConfig::builder().orthographic_variation(false).build(), Category::OrthographicVariation),
  ];

  let all = normalizer.normalize_detailed(text, &NormalizerConfig::default());

  assert_eq!(all.replacements.len(), 4);

  for (config, disabled) in categories {
    let result = normalizer.normalize_detailed(text, &config);

    assert_eq!(result.replacements.len(), 3, "{disabled}");
    assert!(result.replacements.iter().all(|replacement| replacement.category != Some(disabled)), "{disabled}");
  }
}

#[test]
fn coarser_levels_normalize_more() {
  let normalizer = normalizer(None);
  let text = "パソコンとPCとパーソナルコンピュータ、アメリカと米国、江戸";

  let spans = |level: UnifyLevel| {
    normalizer
      .normalize_detailed(text, &NormalizerConfig::builder().unify_level(level).build())
      .replacements
      .into_iter()
      .map(|replacement| (replacement.start, replacement.end))
      .collect::<Vec<_>>()
  };

  let lexeme = spans(UnifyLevel::Lexeme);
  let word_form = spans(UnifyLevel::WordForm);
  let abbreviation = spans(UnifyLevel::Abbreviation);

  assert!(abbreviation.iter().all(|span| word_form.contains(span)));
  assert!(word_form.iter().all(|span| lexeme.contains(span)));
  assert!(lexeme.len() > abbreviation.len());
}

#[test]
fn expansion_policy() {
  let normalizer = normalizer(None);

  assert_eq!(normalizer.normalize("チェックとUSA", &NormalizerConfig::default()), "チェックとUSA");
  assert_eq!(normalizer.normalize("チェックとUSA", &NormalizerConfig::builder().expansion(Expansion::Any).build()), "確認とアメリカ合衆国");
  assert_eq!(normalizer.normalize("人工智能", &NormalizerConfig::builder().expansion(Expansion::Any).build()), "人工智能");
}

#[test]
fn load_from_files() {
  let directory = tempfile::tempdir().unwrap();
  let synonyms = directory.path().join("synonyms.txt");
  let custom = directory.path().join("custom.tsv");

  fs::write(&synonyms, SYNONYMS).unwrap();
  fs::File::create(&custom).unwrap().write_all("ノートPC\tパソコン\n".as_bytes()).unwrap();

  let normalizer = Normalizer::new(ScriptTokenizer)
    .synonyms(SynonymDictionary::from_path(&synonyms).unwrap())
    .custom(CustomDictionary::from_path(&custom).unwrap())
    .build()
    .unwrap();

  assert_eq!(normalizer.normalize("パソコンとPC", &NormalizerConfig::default()), "ノートPCとパーソナルコンピューター");

  assert!(SynonymDictionary::from_path(directory.path().join("missing.txt")).is_err());
  assert!(matches!(CustomDictionary::from_path(directory.path().join("custom.ini")), Err(YureError::MalformedCustomDictionary(_))));
}

#[test]
fn variants_next_to_particles() {
  let (_directory, normalizer) = analyzer();
  let config = NormalizerConfig::default();

  assert_eq!(normalizer.normalize("ゆうはくが好き", &config), "幽遊白書が好き");
  assert_eq!(normalizer.normalize("幽白とゆうはく", &config), "幽遊白書と幽遊白書");
  assert_eq!(normalizer.normalize("パソコンショップで読んだ本", &config), "ノートPCショップで読んだ本");

  assert_eq!(self::normalizer(Some(custom())).normalize("ゆうはくが好き", &config), "ゆうはくが好き");
}

#[test]
fn variants_inside_longer_words() {
  let (_directory, normalizer) = analyzer();
  let result = normalizer.normalize_detailed("昨日幽白を読んだ", &NormalizerConfig::default());

  assert_eq!(result.text, "昨日幽遊白書を読んだ");
  assert_eq!(result.replacements.len(), 1);
  assert_eq!((result.replacements[0].start, result.replacements[0].end), (6, 12));
  assert_eq!(result.replacements[0].source, Source::Custom);

  assert_eq!(normalizer.normalize("江戸時代の本", &NormalizerConfig::default()), "東京時代の本");
  assert_eq!(normalizer.normalize("江戸時代の本", &NormalizerConfig::builder().old_name(false).build()), "江戸時代の本");
}

#[test]
fn predicates_from_text() {
  let (_directory, normalizer) = analyzer();
  let yougen = NormalizerConfig::builder().yougen(true).build();

  assert_eq!(normalizer.normalize("データを確める", &yougen), "データを確かめる");
  assert_eq!(normalizer.normalize("データを確める", &NormalizerConfig::default()), "データを確める");

  let result = normalizer.normalize_detailed("データを確めた", &yougen);

  assert_eq!(result.replacements.len(), 1);
  assert_eq!(result.replacements[0].original, "確め");
  assert_eq!(result.replacements[0].replacement, "確かめる");
}
