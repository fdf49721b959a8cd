use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use percent_encoding::percent_decode_str;
use serde_json::Value;
use tracing::{debug, trace};

use super::{DecodeError, MAX_TOKEN_LEN};
use crate::config::PageConfig;

const ANY_PADDING: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

/// Canonical alphabet (`-`/`_`), padding optional.
const URL_SAFE_ANY_PAD: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, ANY_PADDING);

/// Legacy alphabet (`+`/`/`), padding optional.
const STANDARD_ANY_PAD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, ANY_PADDING);

/// Alphabets tried for every text candidate, in order.
static ENGINES: [(&str, &GeneralPurpose); 2] = [
    ("url_safe", &URL_SAFE_ANY_PAD),
    ("standard", &STANDARD_ANY_PAD),
];

/// Decode a share token into a page.
///
/// The token is tried in these shapes, first success wins:
/// 1. as given (canonical tokens always succeed here)
/// 2. with spaces turned back into `+` (a legacy `+` that went through form decoding)
/// 3. percent-decoded once
/// 4. percent-decoded twice
///
/// Each shape is decoded with the URL-safe alphabet, then the standard one,
/// both accepting padded and unpadded input. On failure the error of the
/// canonical attempt is returned.
pub fn decode(token: &str) -> Result<PageConfig, DecodeError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(DecodeError::Empty);
    }
    if token.len() > MAX_TOKEN_LEN {
        return Err(DecodeError::TooLong { len: token.len() });
    }

    let mut first_err: Option<DecodeError> = None;
    for (idx, candidate) in candidates(token).iter().enumerate() {
        for (name, engine) in &ENGINES {
            match decode_with(candidate, engine) {
                Ok(page) => {
                    trace!(
                        target: "linkbio::codec",
                        candidate = idx, alphabet = %name,
                        "Decoded page from token"
                    );
                    return Ok(page);
                }
                Err(err) => {
                    debug!(
                        target: "linkbio::codec",
                        candidate = idx, alphabet = %name, error = %err,
                        "Token candidate rejected"
                    );
                    first_err.get_or_insert(err);
                }
            }
        }
    }

    Err(first_err.unwrap_or(DecodeError::Empty))
}

/// Decode a share token, collapsing every failure into `None`.
pub fn decode_or_none(token: &str) -> Option<PageConfig> {
    decode(token).ok()
}

/// Turn a parsed JSON value into a page, filling absent fields with defaults.
///
/// The root must be an object. Unknown keys are ignored and unknown enum tags
/// fall back to their default variant; a present field of the wrong JSON type
/// is a shape error.
pub fn normalize(value: Value) -> Result<PageConfig, DecodeError> {
    if !value.is_object() {
        return Err(DecodeError::Shape(format!(
            "expected a JSON object at the root, found {}",
            json_kind(&value)
        )));
    }
    serde_json::from_value(value).map_err(|err| DecodeError::Shape(err.to_string()))
}

fn decode_with(candidate: &str, engine: &GeneralPurpose) -> Result<PageConfig, DecodeError> {
    let bytes = engine.decode(candidate)?;
    let text = String::from_utf8(bytes)?;
    let value: Value = serde_json::from_str(&text).map_err(DecodeError::Json)?;
    normalize(value)
}

/// Build the ordered, de-duplicated list of text shapes to try.
fn candidates(token: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(4);
    push_unique(&mut out, token.to_owned());

    if token.contains(' ') {
        push_unique(&mut out, token.replace(' ', "+"));
    }

    if let Some(once) = percent_decode(token) {
        let twice = percent_decode(&once);
        push_unique(&mut out, once);
        if let Some(twice) = twice {
            push_unique(&mut out, twice);
        }
    }

    out
}

fn push_unique(out: &mut Vec<String>, candidate: String) {
    if !candidate.is_empty() && !out.contains(&candidate) {
        out.push(candidate);
    }
}

fn percent_decode(s: &str) -> Option<String> {
    if !s.contains('%') {
        return None;
    }
    percent_decode_str(s)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.trim().to_owned())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{encode, is_canonical_token};
    use crate::config::*;
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
    use rand::Rng;
    use serde_json::json;

    /// What the first editor produced: standard base64 (padded) then `encodeURIComponent`.
    fn legacy_token(page: &PageConfig) -> String {
        let b64 = STANDARD.encode(serde_json::to_vec(page).unwrap());
        utf8_percent_encode(&b64, NON_ALPHANUMERIC).to_string()
    }

    fn token_for(value: Value) -> String {
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(value.to_string())
    }

    fn scenario_page() -> PageConfig {
        PageConfig {
            slug: "ana".into(),
            title: "Ana".into(),
            bio: Some("Olá!".into()),
            avatar: None,
            theme: ThemeConfig::default(),
            socials: vec![],
            top_links: vec![],
            categories: vec![Category {
                id: "c1".into(),
                title: "Links".into(),
                limit: None,
                items: vec![LinkItem {
                    id: "i1".into(),
                    label: "Site".into(),
                    url: "https://x.test".into(),
                    icon: None,
                }],
            }],
        }
    }

    fn rich_page() -> PageConfig {
        PageConfig {
            slug: "zoë".into(),
            title: "Zoë 🎸 Müller".into(),
            bio: Some("Música, café ☕ e código — sempre.".into()),
            avatar: Some(Avatar {
                src: Some("https://cdn.test/a.png?size=128&fit=crop".into()),
            }),
            theme: ThemeConfig {
                background: Background {
                    kind: BackgroundKind::Gradient,
                    value: "linear-gradient(135deg, #22d3ee, #a78bfa)".into(),
                },
                palette: Palette::default(),
                button: ButtonStyle {
                    variant: ButtonVariant::Ghost,
                    radius: 0,
                    shadow: ShadowLevel::None,
                },
            },
            socials: vec![SocialLink {
                id: "s1".into(),
                kind: SocialKind::Instagram,
                url: "https://instagram.test/zoe".into(),
            }],
            top_links: vec![TopLink {
                id: "t1".into(),
                label: "Agenda".into(),
                url: "https://cal.test".into(),
            }],
            categories: vec![Category {
                id: "c1".into(),
                title: "日本語".into(),
                limit: Some(3),
                items: vec![LinkItem {
                    id: "i1".into(),
                    label: "WhatsApp".into(),
                    url: "https://wa.test/?text=oi%20tudo%20bem".into(),
                    icon: Some("whatsapp".into()),
                }],
            }],
        }
    }

    #[test]
    fn round_trip_preserves_unicode_and_optionals() {
        for page in [PageConfig::default(), scenario_page(), rich_page()] {
            let token = encode(&page);
            assert_eq!(decode(&token).unwrap(), page);
        }
    }

    #[test]
    fn end_to_end_scenario() {
        let page = scenario_page();
        let token = encode(&page);
        assert!(is_canonical_token(&token));
        assert_eq!(decode(&token).unwrap(), page);

        let truncated = &token[..token.len() - 1];
        assert!(decode_or_none(truncated).is_none());
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let token = token_for(json!({ "slug": "ana", "title": "Ana" }));
        let page = decode(&token).unwrap();
        assert!(page.socials.is_empty());
        assert!(page.top_links.is_empty());
        assert!(page.categories.is_empty());
        assert_eq!(page.theme, ThemeConfig::default());
    }

    #[test]
    fn partial_theme_is_completed() {
        let token = token_for(json!({
            "title": "Ana",
            "theme": { "palette": { "accent": "#ff0000" } }
        }));
        let page = decode(&token).unwrap();
        assert_eq!(page.theme.palette.accent, "#ff0000");
        assert_eq!(page.theme.palette.text, Palette::default().text);
        assert_eq!(page.theme.button, ButtonStyle::default());
    }

    #[test]
    fn standard_alphabet_with_padding_matches_url_safe() {
        // Chosen so the raw base64 contains both `+` and `/`.
        let page = PageConfig {
            title: "~~~???>>>".into(),
            bio: Some("ÿ¿".into()),
            ..Default::default()
        };
        let json = serde_json::to_vec(&page).unwrap();
        let standard = STANDARD.encode(&json);
        assert!(standard.contains('+') || standard.contains('/'));

        let canonical = encode(&page);
        assert_eq!(decode(&standard).unwrap(), decode(&canonical).unwrap());
        assert_eq!(decode(standard.trim_end_matches('=')).unwrap(), page);
    }

    #[test]
    fn legacy_percent_encoded_tokens_decode() {
        let page = rich_page();
        let once = legacy_token(&page);
        assert_eq!(decode(&once).unwrap(), page);

        let twice = utf8_percent_encode(&once, NON_ALPHANUMERIC).to_string();
        assert_eq!(decode(&twice).unwrap(), page);
    }

    #[test]
    fn plus_turned_into_space_is_recovered() {
        let page = PageConfig {
            title: "~~~???>>>".into(),
            ..Default::default()
        };
        let standard = STANDARD.encode(serde_json::to_vec(&page).unwrap());
        let mangled = standard.replace('+', " ");
        if mangled != standard {
            assert_eq!(decode(&mangled).unwrap(), page);
        }
    }

    #[test]
    fn unknown_fields_and_tags_are_tolerated() {
        let token = token_for(json!({
            "title": "Ana",
            "version": 7,
            "theme": { "button": { "variant": "glass", "radius": 8, "shadow": "xl" } },
            "socials": [{ "id": "s1", "type": "mastodon", "url": "https://m.test" }]
        }));
        let page = decode(&token).unwrap();
        assert_eq!(page.theme.button.variant, ButtonVariant::Solid);
        assert_eq!(page.theme.button.shadow, ShadowLevel::Soft);
        assert_eq!(page.theme.button.radius, 8);
        assert_eq!(page.socials[0].kind, SocialKind::Website);
    }

    #[test]
    fn non_object_roots_are_shape_errors() {
        for value in [json!(null), json!([1, 2]), json!("page"), json!(3)] {
            let err = decode(&token_for(value)).unwrap_err();
            assert!(matches!(err, DecodeError::Shape(_)), "{err}");
        }
    }

    #[test]
    fn wrong_field_types_are_shape_errors() {
        let err = decode(&token_for(json!({ "categories": "nope" }))).unwrap_err();
        assert!(matches!(err, DecodeError::Shape(_)));
    }

    #[test]
    fn reports_step_specific_errors() {
        assert!(matches!(decode(""), Err(DecodeError::Empty)));
        assert!(matches!(decode("   "), Err(DecodeError::Empty)));
        assert!(matches!(decode("!!!!"), Err(DecodeError::Base64(_))));
        // 0xff 0xfe is not UTF-8.
        assert!(matches!(decode("__4"), Err(DecodeError::Utf8(_))));
        assert!(matches!(
            decode(&URL_SAFE_ANY_PAD.encode("{not json")),
            Err(DecodeError::Json(_))
        ));
        let huge = "A".repeat(MAX_TOKEN_LEN + 1);
        assert!(matches!(decode(&huge), Err(DecodeError::TooLong { .. })));
    }

    #[test]
    fn truncated_tokens_are_rejected() {
        let token = encode(&rich_page());
        let mut rng = rand::rng();
        for _ in 0..200 {
            let cut = rng.random_range(0..token.len());
            assert!(decode_or_none(&token[..cut]).is_none(), "cut at {cut}");
        }
    }

    #[test]
    fn corrupted_tokens_never_panic() {
        let token = encode(&rich_page());
        let mut rng = rand::rng();
        for _ in 0..500 {
            let mut bytes = token.clone().into_bytes();
            let flips = rng.random_range(1..4);
            for _ in 0..flips {
                let at = rng.random_range(0..bytes.len());
                bytes[at] = rng.random_range(0x20u8..0x7f);
            }
            let corrupted = String::from_utf8(bytes).unwrap();
            // Any outcome is fine as long as it is a value, not a panic.
            let _ = decode_or_none(&corrupted);
        }
    }

    #[test]
    fn candidates_are_deduplicated() {
        assert_eq!(candidates("abc"), vec!["abc".to_string()]);
        assert_eq!(
            candidates("a%252Bb"),
            vec!["a%252Bb".to_string(), "a%2Bb".to_string(), "a+b".to_string()]
        );
    }
}
