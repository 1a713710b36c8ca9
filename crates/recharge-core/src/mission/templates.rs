//! Built-in mission template pool.
//!
//! Static reference data: 60 templates, 6 categories x 3 difficulties.
//! Easy rewards 8-12 exp, Normal 18-25, Challenge 32-40. The pool is
//! read-only; the engine never mutates it.

use serde::Serialize;

use super::{MissionCategory, MissionDifficulty};

/// A mission blueprint in the static pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MissionTemplate {
    /// Stable id, used by the anti-repetition lookback
    pub id: &'static str,
    pub category: MissionCategory,
    pub difficulty: MissionDifficulty,
    pub title: &'static str,
    pub description: &'static str,
    pub emoji: &'static str,
    /// Experience awarded on completion, before streak bonus
    pub exp_reward: u32,
}

/// The full built-in pool.
pub fn builtin_templates() -> &'static [MissionTemplate] {
    TEMPLATES
}

/// Find a built-in template by id.
pub fn find_template(id: &str) -> Option<&'static MissionTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}

const fn template(
    id: &'static str,
    category: MissionCategory,
    difficulty: MissionDifficulty,
    title: &'static str,
    description: &'static str,
    emoji: &'static str,
    exp_reward: u32,
) -> MissionTemplate {
    MissionTemplate {
        id,
        category,
        difficulty,
        title,
        description,
        emoji,
        exp_reward,
    }
}

use super::MissionCategory::{Mindfulness, Movement, Outdoor, Rest, SleepHygiene, Social};
use super::MissionDifficulty::{Challenge, Easy, Normal};

static TEMPLATES: &[MissionTemplate] = &[
    // ── Rest ─────────────────────────────────────────────────────────
    template("rest-easy-1", Rest, Easy, "Five-minute pause", "Sit back and do nothing for five minutes.", "🛋️", 8),
    template("rest-easy-2", Rest, Easy, "Eyes off", "Close your eyes for two minutes away from any screen.", "🫧", 9),
    template("rest-easy-3", Rest, Easy, "Warm drink break", "Make a warm drink and finish it away from your desk.", "🍵", 10),
    template("rest-easy-4", Rest, Easy, "Lie down", "Lie down flat for ten minutes, no phone in reach.", "🛏️", 12),
    template("rest-normal-1", Rest, Normal, "Power nap", "Take a 20-minute nap before 3 pm.", "😴", 20),
    template("rest-normal-2", Rest, Normal, "Unplugged lunch", "Eat a full meal with every screen out of sight.", "🍽️", 18),
    template("rest-normal-3", Rest, Normal, "Slow evening", "Keep the hour after dinner completely unscheduled.", "🕯️", 22),
    template("rest-challenge-1", Rest, Challenge, "Half-day off", "Block out a free half day and defend it.", "🏖️", 35),
    template("rest-challenge-2", Rest, Challenge, "Notification amnesty", "Silence every non-human notification until tomorrow.", "🔕", 32),
    template("rest-challenge-3", Rest, Challenge, "Do-nothing hour", "Spend a full hour without input: no screen, no book, no podcast.", "⏳", 38),
    // ── Movement ─────────────────────────────────────────────────────
    template("move-easy-1", Movement, Easy, "Stretch break", "Stand up and stretch for three minutes.", "🙆", 8),
    template("move-easy-2", Movement, Easy, "Stair case", "Take the stairs instead of the elevator once today.", "🪜", 9),
    template("move-easy-3", Movement, Easy, "Desk reset", "Roll your shoulders and neck for two minutes every few hours.", "💆", 10),
    template("move-easy-4", Movement, Easy, "Hourly stand", "Stand up at least once an hour this afternoon.", "⏰", 11),
    template("move-normal-1", Movement, Normal, "Quick workout", "Do a 15-minute bodyweight routine.", "🏋️", 22),
    template("move-normal-2", Movement, Normal, "Lunchtime walk", "Walk for 20 minutes around midday.", "🚶", 20),
    template("move-normal-3", Movement, Normal, "Bike errand", "Run one errand by bike or on foot instead of driving.", "🚲", 24),
    template("move-challenge-1", Movement, Challenge, "10k steps", "Hit 10,000 steps before the day ends.", "👟", 36),
    template("move-challenge-2", Movement, Challenge, "Full workout", "Complete a 45-minute training session.", "💪", 40),
    template("move-challenge-3", Movement, Challenge, "Morning run", "Run 5 km before breakfast.", "🏃", 38),
    // ── Mindfulness ──────────────────────────────────────────────────
    template("mind-easy-1", Mindfulness, Easy, "Three breaths", "Take three slow, deep breaths right now.", "🌬️", 8),
    template("mind-easy-2", Mindfulness, Easy, "Gratitude note", "Write down one thing that went well today.", "📝", 10),
    template("mind-easy-3", Mindfulness, Easy, "Single-task snack", "Eat one snack with zero multitasking.", "🍎", 9),
    template("mind-easy-4", Mindfulness, Easy, "One-minute scan", "Do a one-minute head-to-toe body scan.", "🧍", 11),
    template("mind-normal-1", Mindfulness, Normal, "Ten-minute sit", "Meditate for ten minutes.", "🧘", 22),
    template("mind-normal-2", Mindfulness, Normal, "Journal page", "Fill one page about how today actually felt.", "📓", 20),
    template("mind-normal-3", Mindfulness, Normal, "Worry dump", "List every open worry, then pick the single next step for one.", "🗒️", 23),
    template("mind-challenge-1", Mindfulness, Challenge, "Silent morning", "Keep the first hour after waking input-free and silent.", "🌅", 34),
    template("mind-challenge-2", Mindfulness, Challenge, "Twenty-minute sit", "Meditate for twenty minutes without a guide.", "🪷", 36),
    template("mind-challenge-3", Mindfulness, Challenge, "Digital sabbath", "Stay off social media until tomorrow morning.", "📵", 40),
    // ── Outdoor ──────────────────────────────────────────────────────
    template("out-easy-1", Outdoor, Easy, "Daylight dose", "Step outside for five minutes of daylight.", "☀️", 8),
    template("out-easy-2", Outdoor, Easy, "Window air", "Open a window and take ten breaths of fresh air.", "🪟", 8),
    template("out-easy-3", Outdoor, Easy, "Sky check", "Go outside and actually look at the sky for a minute.", "☁️", 9),
    template("out-easy-4", Outdoor, Easy, "Green minute", "Find one tree or plant and stand near it for a minute.", "🌳", 10),
    template("out-normal-1", Outdoor, Normal, "Park visit", "Spend 20 minutes in a park or green space.", "🏞️", 21),
    template("out-normal-2", Outdoor, Normal, "Sunset walk", "Be outside when the sun goes down.", "🌇", 20),
    template("out-normal-3", Outdoor, Normal, "New route", "Walk a street you have never walked before.", "🗺️", 23),
    template("out-challenge-1", Outdoor, Challenge, "Hour outside", "Spend one full hour outdoors in one stretch.", "🌲", 34),
    template("out-challenge-2", Outdoor, Challenge, "Dawn patrol", "Watch the sunrise from outside your home.", "🌄", 38),
    template("out-challenge-3", Outdoor, Challenge, "Car-free day", "Get everywhere today without a car.", "🚶‍♂️", 36),
    // ── Social ───────────────────────────────────────────────────────
    template("social-easy-1", Social, Easy, "Check-in text", "Send a how-are-you message to someone you like.", "💬", 8),
    template("social-easy-2", Social, Easy, "Real thanks", "Thank one person, specifically, for something concrete.", "🙏", 9),
    template("social-easy-3", Social, Easy, "Small talk", "Have one unhurried conversation that isn't about work.", "🗣️", 10),
    template("social-easy-4", Social, Easy, "Share a laugh", "Send a friend something that made you laugh today.", "😄", 9),
    template("social-normal-1", Social, Normal, "Voice call", "Call a friend or family member for at least ten minutes.", "📞", 20),
    template("social-normal-2", Social, Normal, "Shared meal", "Eat one meal together with someone, screens away.", "🍲", 22),
    template("social-normal-3", Social, Normal, "Reach back", "Reply to the message you have been putting off.", "✉️", 19),
    template("social-challenge-1", Social, Challenge, "Plan a meetup", "Put a concrete date in the calendar with a friend.", "📅", 33),
    template("social-challenge-2", Social, Challenge, "Evening together", "Spend a full evening with people, phone in another room.", "🎲", 38),
    template("social-challenge-3", Social, Challenge, "Reconnect", "Call someone you haven't spoken to in over a month.", "🤝", 36),
    // ── Sleep hygiene ────────────────────────────────────────────────
    template("sleep-easy-1", SleepHygiene, Easy, "Caffeine cutoff", "No caffeine after 2 pm today.", "☕", 10),
    template("sleep-easy-2", SleepHygiene, Easy, "Charger exile", "Charge your phone outside the bedroom tonight.", "🔌", 11),
    template("sleep-easy-3", SleepHygiene, Easy, "Dim the lights", "Switch to dim, warm lighting an hour before bed.", "💡", 9),
    template("sleep-easy-4", SleepHygiene, Easy, "Cool room", "Air out the bedroom before going to sleep.", "❄️", 8),
    template("sleep-normal-1", SleepHygiene, Normal, "Screen sunset", "No screens in the last 30 minutes before bed.", "🌙", 22),
    template("sleep-normal-2", SleepHygiene, Normal, "Fixed bedtime", "Be in bed within 15 minutes of your target bedtime.", "🛌", 24),
    template("sleep-normal-3", SleepHygiene, Normal, "Wind-down ritual", "Do the same calm 15-minute routine before bed tonight.", "🧴", 20),
    template("sleep-challenge-1", SleepHygiene, Challenge, "Eight in bed", "Give yourself a full eight-hour sleep window tonight.", "🛏️", 36),
    template("sleep-challenge-2", SleepHygiene, Challenge, "No-alarm morning", "Arrange tomorrow so you can wake without an alarm.", "⏰", 40),
    template("sleep-challenge-3", SleepHygiene, Challenge, "Screen-free evening", "No screens at all after 9 pm tonight.", "🕘", 35),
];
