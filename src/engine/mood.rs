//! Mood and personalization phrasing.
//!
//! The bot carries a process-wide mood. Each incoming turn has a 15% chance
//! of re-rolling it with a single cumulative draw: the first 10% of the range
//! lands on tired, the next 20% on cheerful, the rest on neutral. While the
//! mood is non-neutral, every reply gets a mood suffix picked from a small
//! fixed set.
//!
//! Personalization is independent of mood and applies to every reply: a 20%
//! chance to prefix the user's name (de-capitalizing the reply's first
//! letter) and, when a favorite color is known, a 10% chance to append a
//! remark naming it. All draws go through the engine's seeded RNG so tests
//! can pin the behavior; the name draw always happens before the color draw.

use crate::Mood;
use crate::engine::session::UserProfile;
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

const REROLL_CHANCE: f64 = 0.15;
const TIRED_BAND: f64 = 0.10;
const CHEERFUL_BAND: f64 = 0.30;

const NAME_PREFIX_CHANCE: f64 = 0.20;
const COLOR_REMARK_CHANCE: f64 = 0.10;

const CHEERFUL_SUFFIXES: [&str; 2] =
    [" Hari ini rasanya menyenangkan sekali!", " Senang banget bisa ngobrol!"];
const TIRED_SUFFIXES: [&str; 2] =
    [" Maaf kalau saya terdengar agak lelah...", " *menguap* maaf, agak ngantuk..."];

/// Possibly re-roll `mood` for this turn. Evaluated once, at turn start.
pub(crate) fn maybe_reroll(mood: &mut Mood, rng: &mut StdRng) {
    if !rng.gen_bool(REROLL_CHANCE) {
        return;
    }
    let draw: f64 = rng.gen_range(0.0..1.0);
    *mood = if draw < TIRED_BAND {
        Mood::Tired
    } else if draw < CHEERFUL_BAND {
        Mood::Cheerful
    } else {
        Mood::Neutral
    };
}

/// Append the mood suffix when the mood is non-neutral.
pub(crate) fn apply_mood(reply: &mut String, mood: Mood, rng: &mut StdRng) {
    let pool: &[&str] = match mood {
        Mood::Neutral => return,
        Mood::Cheerful => &CHEERFUL_SUFFIXES,
        Mood::Tired => &TIRED_SUFFIXES,
    };
    if let Some(suffix) = pool.choose(rng) {
        reply.push_str(suffix);
    }
}

/// Maybe prefix the user's name and append a favorite-color remark.
/// The two draws are independent of each other and of the mood.
pub(crate) fn personalize(reply: &mut String, profile: &UserProfile, rng: &mut StdRng) {
    if let Some(name) = profile.name.as_deref() {
        if rng.gen_bool(NAME_PREFIX_CHANCE) {
            *reply = format!("{name}, {}", decapitalize(reply));
        }
    }
    if let Some(color) = profile.favorite_color.as_deref() {
        if rng.gen_bool(COLOR_REMARK_CHANCE) {
            reply.push_str(&format!(" Ngomong-ngomong, warna {color} memang bagus."));
        }
    }
}

fn decapitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn neutral_mood_leaves_replies_untouched() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut reply = "Halo!".to_string();
        apply_mood(&mut reply, Mood::Neutral, &mut rng);
        assert_eq!(reply, "Halo!");
    }

    #[test]
    fn non_neutral_mood_appends_a_known_suffix() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut reply = "Halo!".to_string();
        apply_mood(&mut reply, Mood::Tired, &mut rng);
        assert!(TIRED_SUFFIXES.iter().any(|s| reply.ends_with(s)));
        assert!(reply.starts_with("Halo!"));
    }

    #[test]
    fn reroll_respects_the_cumulative_bands() {
        // Over many seeded turns the three moods must all appear, and the
        // re-roll must fire far less often than every turn.
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 3];
        let mut changes = 0usize;
        for _ in 0..2000 {
            let mut mood = Mood::Neutral;
            maybe_reroll(&mut mood, &mut rng);
            match mood {
                Mood::Neutral => seen[0] = true,
                Mood::Cheerful => {
                    seen[1] = true;
                    changes += 1;
                }
                Mood::Tired => {
                    seen[2] = true;
                    changes += 1;
                }
            }
        }
        assert!(seen.iter().all(|&s| s));
        // 15% reroll * 30% non-neutral band ≈ 4.5% of turns.
        assert!(changes > 20 && changes < 300, "changes = {changes}");
    }

    #[test]
    fn name_prefix_decapitalizes_the_reply() {
        let profile = UserProfile { name: Some("Budi".to_string()), favorite_color: None };
        // Find a seed where the 20% name draw fires on the first call.
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut reply = "Selamat pagi!".to_string();
            personalize(&mut reply, &profile, &mut rng);
            if reply != "Selamat pagi!" {
                assert_eq!(reply, "Budi, selamat pagi!");
                return;
            }
        }
        panic!("no seed in 0..64 triggered the name prefix");
    }

    #[test]
    fn color_remark_names_the_color() {
        let profile = UserProfile {
            name: None,
            favorite_color: Some("biru".to_string()),
        };
        for seed in 0..128 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut reply = "Oke.".to_string();
            personalize(&mut reply, &profile, &mut rng);
            if reply != "Oke." {
                assert!(reply.contains("warna biru"));
                return;
            }
        }
        panic!("no seed in 0..128 triggered the color remark");
    }

    #[test]
    fn unknown_profile_is_never_personalized() {
        let profile = UserProfile::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut reply = "Oke.".to_string();
        for _ in 0..100 {
            personalize(&mut reply, &profile, &mut rng);
        }
        assert_eq!(reply, "Oke.");
    }
}
