/// Compile-time defaults for the gift page
///
/// Everything here can be overridden at runtime through the Personalize
/// card (name, sender, date) or the gallery folder picker; these are just
/// the values shown before the viewer has saved anything.

/// Who the page is for, before the viewer personalizes it
pub const RECIPIENT_NAME: &str = "My Love";

/// Who the page is from
pub const SENDER_NAME: &str = "From Me";

/// Age the recipient is turning (used in the hero and letter copy)
pub const AGE_TURNING: u32 = 19;

/// Birthday date/time in the viewer's local zone, `YYYY-MM-DDTHH:mm:ss`
pub const BIRTHDAY_AT: &str = "2025-09-12T00:00:00";

pub const HERO_TEXT: &str = "Happy 19th Birthday!";
pub const SUB_TEXT: &str = "May your day be filled with little sparks of joy.";

/// Seeded guestbook note, written once on first launch
pub const SEED_NOTE: &str = "Thank you for being you. I'm so proud of you!";

/// Paragraphs of the full letter; `{name}` and `{from}` are substituted
pub const LETTER_PARAGRAPHS: &[&str] = &[
    "Hi {name},",
    "I'm endlessly grateful for your light, the way you make ordinary days \
     feel like soft sunsets and warm tea. On your birthday, I wish you ease \
     in your steps, courage for your dreams, and a hundred little reasons to \
     smile.",
    "Thank you for the patience, the laughter, and the way you understand \
     even my quiet. I'll keep cheering for you in every season.",
    "With love,\n{from}",
];

/// Optional song file, looked up in the app data directory.
/// Leave the file out and the play button is a silent no-op.
pub const SONG_FILE: &str = "song.mp3";

/// How many confetti pieces fall over the hero banner
pub const CONFETTI_COUNT: usize = 120;

/// Height of the confetti band in logical pixels; fixed by design, the
/// effect is decorative and bounded to the banner region
pub const BANNER_HEIGHT: f32 = 320.0;
