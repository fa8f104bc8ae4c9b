use std::borrow::Cow;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

/// Tried in order when detection is unsure or wrong. Labels go through the
/// WHATWG registry, so `gb2312` lands on GBK and `latin1`/`cp1252` on
/// windows-1252; repeats are skipped.
pub const FALLBACK_LABELS: &[&str] = &["utf-8", "gbk", "gb2312", "big5", "latin1", "cp1252"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    pub encoding: &'static Encoding,
    /// Malformed sequences were replaced with U+FFFD.
    pub lossy: bool,
}

/// Decode raw file bytes to text. Never fails; an empty `text` means there
/// was nothing to decode.
pub fn decode(bytes: &[u8]) -> Decoded {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        let (text, lossy) = encoding.decode_with_bom_removal(bytes);
        return Decoded {
            text: text.into_owned(),
            encoding,
            lossy,
        };
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let (guess, confident) = detector.guess_assess(None, true);
    decode_guessed(bytes, confident.then_some(guess))
}

/// Try `guess` strictly, then the fallback chain, then lossy UTF-8.
fn decode_guessed(bytes: &[u8], guess: Option<&'static Encoding>) -> Decoded {
    if let Some(guess) = guess {
        if let Some(text) = strict(guess, bytes) {
            return Decoded {
                text,
                encoding: guess,
                lossy: false,
            };
        }
        tracing::debug!(encoding = guess.name(), "detected encoding rejected the input");
    }

    let mut tried: Vec<&'static Encoding> = Vec::new();
    for label in FALLBACK_LABELS {
        let Some(encoding) = Encoding::for_label(label.as_bytes()) else {
            continue;
        };
        if tried.contains(&encoding) {
            continue;
        }
        tried.push(encoding);
        if let Some(text) = strict(encoding, bytes) {
            return Decoded {
                text,
                encoding,
                lossy: false,
            };
        }
    }

    Decoded {
        text: String::from_utf8_lossy(bytes).into_owned(),
        encoding: UTF_8,
        lossy: true,
    }
}

fn strict(encoding: &'static Encoding, bytes: &[u8]) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(Cow::into_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{BIG5, GBK, UTF_16LE, WINDOWS_1252};

    const SAMPLE: &str = "第一章 开始\n\n天色渐渐暗了下来，山路上的行人越来越少。\
        他背着包袱，一步一步向城里走去，心里想着明天要做的事情。\n";

    #[test]
    fn utf8_passes_through() {
        let decoded = decode(SAMPLE.as_bytes());
        assert_eq!(decoded.text, SAMPLE);
        assert_eq!(decoded.encoding, UTF_8);
        assert!(!decoded.lossy);
    }

    #[test]
    fn gbk_bytes_decode_to_readable_text() {
        let sample = SAMPLE.repeat(4);
        let (bytes, _, had_errors) = GBK.encode(&sample);
        assert!(!had_errors);
        assert!(std::str::from_utf8(&bytes).is_err());

        let decoded = decode(&bytes);
        assert!(decoded.text.starts_with("第一章 开始"));
        assert!(!decoded.text.contains('\u{FFFD}'));
        assert!(!decoded.lossy);
    }

    #[test]
    fn rejected_guess_falls_through_to_chain() {
        let (bytes, _, _) = GBK.encode(SAMPLE);
        let decoded = decode_guessed(&bytes, Some(UTF_8));
        assert_eq!(decoded.encoding, GBK);
        assert_eq!(decoded.text, SAMPLE);
        assert!(!decoded.lossy);
    }

    #[test]
    fn accepted_guess_wins_over_chain() {
        let (bytes, _, _) = BIG5.encode("第一章 風起雲湧");
        let decoded = decode_guessed(&bytes, Some(BIG5));
        assert_eq!(decoded.encoding, BIG5);
        assert_eq!(decoded.text, "第一章 風起雲湧");
    }

    #[test]
    fn bom_decides_encoding() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "第1章 风起".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let decoded = decode(&bytes);
        assert_eq!(decoded.encoding, UTF_16LE);
        assert_eq!(decoded.text, "第1章 风起");
    }

    #[test]
    fn fallback_labels_resolve_to_distinct_decoders() {
        let mut seen = Vec::new();
        for label in FALLBACK_LABELS {
            let encoding = Encoding::for_label(label.as_bytes()).unwrap();
            if !seen.contains(&encoding) {
                seen.push(encoding);
            }
        }
        assert_eq!(seen, vec![UTF_8, GBK, BIG5, WINDOWS_1252]);
    }

    #[test]
    fn empty_input_yields_empty_text() {
        assert!(decode(b"").text.is_empty());
    }
}
