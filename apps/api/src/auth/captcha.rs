use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Challenge lifetime. Entries are removed on first verification attempt,
/// on expiry checks, and by the periodic sweep.
pub const CAPTCHA_TTL: Duration = Duration::from_secs(5 * 60);

const CODE_LEN: usize = 4;
const ID_LEN: usize = 26;
/// Excludes characters that render ambiguously: 0/o, 1/i/l.
const CODE_CHARSET: &[u8] = b"23456789abcdefghjkmnpqrstuvwxyzABCDEFGHJKMNPQRSTUVWXYZ";

const SVG_WIDTH: u32 = 120;
const SVG_HEIGHT: u32 = 40;
const GLYPH_COLORS: &[&str] = &["#2b6cb0", "#c05621", "#2f855a", "#b83280", "#6b46c1"];

/// An issued challenge: the opaque id the client echoes back, and the
/// rendered SVG it displays. The expected answer never leaves the store.
#[derive(Debug, Clone)]
pub struct CaptchaChallenge {
    pub id: String,
    pub svg: String,
}

struct StoredCaptcha {
    answer: String,
    expires_at: Instant,
}

/// Time-boxed, single-use challenge store held in process memory.
///
/// A second server instance would not see challenges issued by the first;
/// acceptable only for the small single-process deployment target.
#[derive(Clone)]
pub struct CaptchaStore {
    inner: Arc<Mutex<HashMap<String, StoredCaptcha>>>,
    ttl: Duration,
}

impl Default for CaptchaStore {
    fn default() -> Self {
        Self::new(CAPTCHA_TTL)
    }
}

impl CaptchaStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Generates a fresh challenge, stores its lowercased answer, and sweeps
    /// any entries that expired in the meantime.
    pub fn issue(&self) -> CaptchaChallenge {
        let mut rng = rand::thread_rng();

        let code: String = (0..CODE_LEN)
            .map(|_| CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())] as char)
            .collect();
        let id: String = (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(ID_LEN)
            .map(char::from)
            .collect();
        let svg = render_svg(&code, &mut rng);

        let now = Instant::now();
        let mut map = self.inner.lock().expect("captcha store poisoned");
        map.retain(|_, c| c.expires_at > now);
        map.insert(
            id.clone(),
            StoredCaptcha {
                answer: code.to_lowercase(),
                expires_at: now + self.ttl,
            },
        );

        CaptchaChallenge { id, svg }
    }

    /// Checks an answer, case-insensitively. The challenge is consumed on the
    /// first attempt regardless of outcome; expired challenges never match.
    pub fn verify(&self, id: &str, answer: &str) -> bool {
        let stored = {
            let mut map = self.inner.lock().expect("captcha store poisoned");
            map.remove(id)
        };

        match stored {
            Some(c) if c.expires_at > Instant::now() => {
                c.answer == answer.trim().to_lowercase()
            }
            _ => false,
        }
    }

    /// Drops expired entries. Called from the background interval task.
    pub fn sweep(&self) {
        let now = Instant::now();
        self.inner
            .lock()
            .expect("captcha store poisoned")
            .retain(|_, c| c.expires_at > now);
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }
}

/// Renders the challenge as a small SVG: jittered, rotated glyphs over a
/// light background with a couple of noise strokes.
fn render_svg(code: &str, rng: &mut impl Rng) -> String {
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{SVG_WIDTH}\" height=\"{SVG_HEIGHT}\" \
         viewBox=\"0 0 {SVG_WIDTH} {SVG_HEIGHT}\">\
         <rect width=\"100%\" height=\"100%\" fill=\"#f0f0f0\"/>"
    );

    for _ in 0..2 {
        let (x1, y1) = (rng.gen_range(0..SVG_WIDTH), rng.gen_range(0..SVG_HEIGHT));
        let (x2, y2) = (rng.gen_range(0..SVG_WIDTH), rng.gen_range(0..SVG_HEIGHT));
        let color = GLYPH_COLORS[rng.gen_range(0..GLYPH_COLORS.len())];
        svg.push_str(&format!(
            "<line x1=\"{x1}\" y1=\"{y1}\" x2=\"{x2}\" y2=\"{y2}\" \
             stroke=\"{color}\" stroke-width=\"1\" opacity=\"0.6\"/>"
        ));
    }

    let slot = SVG_WIDTH as f32 / (code.len() as f32 + 1.0);
    for (i, ch) in code.chars().enumerate() {
        let x = slot * (i as f32 + 1.0) + rng.gen_range(-3.0..3.0);
        let y = SVG_HEIGHT as f32 / 2.0 + rng.gen_range(-4.0..8.0);
        let rotate = rng.gen_range(-25.0..25.0);
        let color = GLYPH_COLORS[rng.gen_range(0..GLYPH_COLORS.len())];
        svg.push_str(&format!(
            "<text x=\"{x:.1}\" y=\"{y:.1}\" font-size=\"26\" font-family=\"monospace\" \
             fill=\"{color}\" transform=\"rotate({rotate:.1} {x:.1} {y:.1})\">{ch}</text>"
        ));
    }

    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test hook: issue a challenge and read back its stored answer.
    fn issue_with_answer(store: &CaptchaStore) -> (String, String) {
        let challenge = store.issue();
        let answer = store
            .inner
            .lock()
            .unwrap()
            .get(&challenge.id)
            .unwrap()
            .answer
            .clone();
        (challenge.id, answer)
    }

    #[test]
    fn correct_answer_accepted_once() {
        let store = CaptchaStore::default();
        let (id, answer) = issue_with_answer(&store);
        assert!(store.verify(&id, &answer));
        // Second attempt with the same id fails even with the right answer.
        assert!(!store.verify(&id, &answer));
    }

    #[test]
    fn wrong_answer_consumes_challenge() {
        let store = CaptchaStore::default();
        let (id, answer) = issue_with_answer(&store);
        assert!(!store.verify(&id, "nope"));
        assert!(!store.verify(&id, &answer));
    }

    #[test]
    fn answer_is_case_insensitive_and_trimmed() {
        let store = CaptchaStore::default();
        let (id, answer) = issue_with_answer(&store);
        assert!(store.verify(&id, &format!("  {}  ", answer.to_uppercase())));
    }

    #[test]
    fn expired_challenge_rejected() {
        let store = CaptchaStore::new(Duration::ZERO);
        let (id, answer) = issue_with_answer(&store);
        assert!(!store.verify(&id, &answer));
    }

    #[test]
    fn unknown_id_rejected() {
        let store = CaptchaStore::default();
        assert!(!store.verify("no-such-id", "anything"));
    }

    #[test]
    fn sweep_drops_expired_entries() {
        let store = CaptchaStore::new(Duration::ZERO);
        store.issue();
        store.sweep();
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn code_avoids_confusable_characters() {
        let store = CaptchaStore::default();
        for _ in 0..32 {
            let (_, answer) = issue_with_answer(&store);
            assert!(answer.chars().all(|c| !"0o1il".contains(c)), "{answer}");
        }
    }

    #[test]
    fn svg_is_well_formed_enough() {
        let challenge = CaptchaStore::default().issue();
        assert!(challenge.svg.starts_with("<svg"));
        assert!(challenge.svg.ends_with("</svg>"));
        assert_eq!(challenge.id.len(), ID_LEN);
    }
}
