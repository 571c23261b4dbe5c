//! Closed vocabularies offered by the generation form.
//!
//! Requests are not validated against these lists; free strings pass through.

pub const NICHES: &[&str] = &[
    "Love & Relationships",
    "Career & Business",
    "College Life",
    "Money & Finance",
    "Health & Fitness",
    "Comedy & Memes",
    "Life Hacks",
    "Family",
    "Technology",
    "Food",
];

pub const TONES: &[&str] = &[
    "Comedic",
    "Sarcastic",
    "Heartfelt",
    "Dramatic",
    "Casual",
    "Troll",
    "Edgy",
    "Deadpan",
    "Motivational",
    "Controversial",
    "Educational",
    "Storytelling",
];

pub const AUDIENCES: &[&str] = &[
    "College Students",
    "Young Professionals",
    "Gen Z",
    "Millennials",
    "Content Creators",
    "Entrepreneurs",
    "Tamil Audience",
    "Urban Youth",
    "Working Class",
    "Students",
];

pub const FORMATS: &[&str] = &[
    "Instagram Reel",
    "YouTube Shorts",
    "TikTok",
    "Voiceover",
    "Podcast Snippet",
    "Story",
];

pub const LANGUAGES: &[&str] = &["Tamil", "English", "Thanglish"];

pub const LENGTHS: &[&str] = &["short", "medium", "long"];

/// True when `value` is one of `vocabulary`'s entries (case-insensitive).
pub fn is_known(vocabulary: &[&str], value: &str) -> bool {
    vocabulary.iter().any(|v| v.eq_ignore_ascii_case(value.trim()))
}
