//! Static motivational content: training tips and quotes.

use rand_core::{OsRng, RngCore};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct FitnessTip {
    pub title: &'static str,
    pub content: &'static str,
}

pub const FITNESS_TIPS: &[FitnessTip] = &[
    FitnessTip {
        title: "Warm up before you lift",
        content: "Spend 5-10 minutes on a dynamic warm-up. Warmer muscles and looser joints lower the risk of injury.",
    },
    FitnessTip {
        title: "Progressive overload",
        content: "Muscles grow when the load keeps rising. Add a little weight, a rep or a set each week.",
    },
    FitnessTip {
        title: "Compound lifts first",
        content: "Squats, deadlifts and presses train several muscle groups at once. Do them while you are fresh.",
    },
    FitnessTip {
        title: "Plan your rest",
        content: "Muscles grow while you recover. Large muscle groups usually need 48-72 hours before the next hard session.",
    },
    FitnessTip {
        title: "Eat enough protein",
        content: "Aim for 1.6-2.2 g of protein per kg of body weight, spread across the day's meals.",
    },
    FitnessTip {
        title: "Form before weight",
        content: "Clean technique matters more than a heavier bar. Bad form costs progress and invites injury.",
    },
    FitnessTip {
        title: "Keep a training log",
        content: "Recording weight, sets and how each session felt shows your progress and keeps you honest.",
    },
    FitnessTip {
        title: "Train your core",
        content: "A strong core stabilises every big lift and protects your lower back.",
    },
    FitnessTip {
        title: "Stay hydrated",
        content: "Drink before, during and after training to hold performance and recover faster.",
    },
    FitnessTip {
        title: "Sleep is recovery",
        content: "Seven to nine hours a night is when most repair happens. Short sleep shows up on the bar.",
    },
];

pub const MOTIVATIONAL_QUOTES: &[&str] = &[
    "The only bad workout is the one that didn't happen.",
    "Strength doesn't come from what you can do. It comes from overcoming what you once couldn't.",
    "Discipline is choosing what you want most over what you want now.",
    "Small plates add up.",
    "Show up. Lift. Log it. Repeat.",
    "You don't have to be extreme, just consistent.",
    "The bar doesn't care about your excuses.",
    "Progress, not perfection.",
];

/// Shown once the training streak reaches `STREAK_QUOTE_MIN_DAYS`.
pub const STREAK_QUOTE: &str = "I think I'm starting to actually like this...";
pub const STREAK_QUOTE_MIN_DAYS: u32 = 3;

fn random_index(len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    OsRng.next_u32() as usize % len
}

pub fn random_tip() -> &'static FitnessTip {
    &FITNESS_TIPS[random_index(FITNESS_TIPS.len())]
}

pub fn random_quote() -> &'static str {
    MOTIVATIONAL_QUOTES[random_index(MOTIVATIONAL_QUOTES.len())]
}

pub fn streak_quote(consecutive_days: u32) -> Option<&'static str> {
    (consecutive_days >= STREAK_QUOTE_MIN_DAYS).then_some(STREAK_QUOTE)
}
