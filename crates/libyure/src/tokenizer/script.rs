use compact_str::CompactString;

use crate::model::PartOfSpeech;

use super::{Morpheme, Tokenizer};

/// Dictionary-less segmenter splitting text on script changes.
///
/// Runs of kanji, katakana, hiragana or alphanumerics each form one
/// morpheme, whitespace separates morphemes without being part of any, and
/// every other symbol stands alone. It knows nothing about inflection, so
/// lemmas are the surfaces themselves.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScriptTokenizer;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Script {
  Kanji,
  Hiragana,
  Katakana,
  Alphanumeric,
  Space,
  Symbol,
}

impl Script {
  fn of(c: char) -> Script {
    match c {
      '々' | '〆' | '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{F900}'..='\u{FAFF}' | '\u{20000}'..='\u{2FA1F}' => Script::Kanji,
      '\u{3041}'..='\u{309F}' => Script::Hiragana,
      '・' => Script::Symbol,
      '\u{30A0}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}' | '\u{FF66}'..='\u{FF9F}' => Script::Katakana,
      c if c.is_whitespace() => Script::Space,
      c if c.is_alphanumeric() => Script::Alphanumeric,
      _ => Script::Symbol,
    }
  }

  fn pos(&self) -> PartOfSpeech {
    match self {
      Script::Kanji | Script::Katakana | Script::Alphanumeric => PartOfSpeech::Taigen,
      Script::Hiragana | Script::Space | Script::Symbol => PartOfSpeech::Other,
    }
  }
}

impl Tokenizer for ScriptTokenizer {
  fn tokenize(&self, text: &str) -> Vec<Morpheme> {
    let mut morphemes = Vec::new();
    let mut run: Option<(Script, usize)> = None;

    for (offset, c) in text.char_indices() {
      let script = Script::of(c);

      if let Some((current, start)) = run {
        if current == script && script != Script::Symbol {
          continue;
        }

        push(&mut morphemes, text, current, start, offset);
      }

      run = Some((script, offset));
    }

    if let Some((current, start)) = run {
      push(&mut morphemes, text, current, start, text.len());
    }

    morphemes
  }

  fn name(&self) -> &'static str {
    "script"
  }

  fn provides_lemmas(&self) -> bool {
    false
  }
}

fn push(morphemes: &mut Vec<Morpheme>, text: &str, script: Script, start: usize, end: usize) {
  if script == Script::Space {
    return;
  }

  let surface = CompactString::from(&text[start..end]);

  morphemes.push(Morpheme {
    lemma: surface.clone(),
    surface,
    pos: script.pos(),
    start,
    end,
  });
}
