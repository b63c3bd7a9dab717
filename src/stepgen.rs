//! Rule-based step generation.
//!
//! Produces the actionable text for a task from a fixed
//! (mood x keyword-substring) table: one small first step for regular
//! tasks, or five sequential steps for a big-task breakdown. Matching is
//! a case-insensitive substring check over the task text.
//!
//! Pure functions, no I/O. The tables are fixed text; the same task and
//! mood always produce the same suggestion.

use crate::model::Mood;

/// Generate the single actionable first step for a task.
///
/// Never returns an empty string; every mood has a default when no
/// keyword matches.
#[must_use]
pub fn first_step(task: &str, mood: Mood) -> &'static str {
    let lower = task.to_lowercase();

    match mood {
        Mood::LowEnergy => {
            if lower.contains("write") {
                "Just open your doc and give it a name."
            } else if lower.contains("email") {
                "Open your inbox. That's it for now."
            } else {
                "Take one minute to gather your tools."
            }
        }
        Mood::Stressed => "Take a deep breath. Then just outline the task.",
        Mood::Focused => {
            if lower.contains("write") {
                "Open your doc and write the first sentence."
            } else if lower.contains("email") {
                "Write a quick draft — don't worry about perfect."
            } else {
                "Start a 5-minute timer and begin the first obvious step."
            }
        }
    }
}

/// Generate the five-step breakdown for a big task.
///
/// Always returns exactly five steps.
#[must_use]
pub fn breakdown_steps(task: &str, mood: Mood) -> Vec<String> {
    let lower = task.to_lowercase();
    let writing = lower.contains("write") || lower.contains("essay") || lower.contains("report");

    let steps: [&str; 5] = match mood {
        Mood::LowEnergy => {
            if writing {
                [
                    "Gather all your materials and create a workspace",
                    "Write down 3-5 main points you want to cover",
                    "Choose one point and write just one paragraph about it",
                    "Take a break, then write one more paragraph",
                    "Connect your paragraphs with simple transitions",
                ]
            } else if lower.contains("clean") || lower.contains("organize") {
                [
                    "Set a timer for 10 minutes and pick one small area",
                    "Sort items into 'keep', 'donate', and 'trash' piles",
                    "Put away the 'keep' items in their proper places",
                    "Take out trash and set aside donations",
                    "Wipe down the surfaces in your cleaned area",
                ]
            } else {
                [
                    "Spend 5 minutes understanding what needs to be done",
                    "Gather any tools or materials you'll need",
                    "Do the easiest part first to build momentum",
                    "Take a short break and tackle the next easiest part",
                    "Finish up with any final touches or cleanup",
                ]
            }
        }
        Mood::Stressed => [
            "Take 3 deep breaths and write down what's stressing you",
            "Break the task into the smallest possible first action",
            "Do just that one small action - nothing more",
            "Acknowledge your progress and plan the next small step",
            "Complete one more small step at your own pace",
        ],
        Mood::Focused => {
            if writing {
                [
                    "Create a detailed outline with main sections",
                    "Write the introduction and thesis statement",
                    "Complete the first main section with supporting details",
                    "Write the remaining sections, one at a time",
                    "Write conclusion and proofread the entire piece",
                ]
            } else if lower.contains("study") || lower.contains("learn") {
                [
                    "Create a study schedule and gather all materials",
                    "Read through the material once for overview",
                    "Take detailed notes on key concepts",
                    "Create practice questions or flashcards",
                    "Test yourself and review any weak areas",
                ]
            } else {
                [
                    "Plan out all the steps and gather resources",
                    "Start with the most important/challenging part",
                    "Work through the middle sections systematically",
                    "Complete any remaining smaller tasks",
                    "Review your work and make final improvements",
                ]
            }
        }
    };

    steps.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_step_keyword_match() {
        assert_eq!(
            first_step("Write my thesis", Mood::LowEnergy),
            "Just open your doc and give it a name."
        );
        assert_eq!(
            first_step("Answer emails", Mood::LowEnergy),
            "Open your inbox. That's it for now."
        );
        assert_eq!(
            first_step("Do taxes", Mood::LowEnergy),
            "Take one minute to gather your tools."
        );
    }

    #[test]
    fn test_first_step_case_insensitive() {
        assert_eq!(
            first_step("WRITE THE REPORT", Mood::Focused),
            "Open your doc and write the first sentence."
        );
    }

    #[test]
    fn test_stressed_ignores_keywords() {
        let expected = "Take a deep breath. Then just outline the task.";
        assert_eq!(first_step("write essay", Mood::Stressed), expected);
        assert_eq!(first_step("email boss", Mood::Stressed), expected);
        assert_eq!(first_step("anything", Mood::Stressed), expected);
    }

    #[test]
    fn test_first_step_never_empty() {
        for mood in [Mood::LowEnergy, Mood::Stressed, Mood::Focused] {
            assert!(!first_step("", mood).is_empty());
            assert!(!first_step("xyzzy", mood).is_empty());
        }
    }

    #[test]
    fn test_breakdown_always_five_steps() {
        for mood in [Mood::LowEnergy, Mood::Stressed, Mood::Focused] {
            for task in ["write a report", "clean the garage", "study biology", "misc"] {
                assert_eq!(breakdown_steps(task, mood).len(), 5);
            }
        }
    }

    #[test]
    fn test_breakdown_keyword_classes() {
        let steps = breakdown_steps("Write my essay", Mood::Focused);
        assert_eq!(steps[0], "Create a detailed outline with main sections");

        let steps = breakdown_steps("Organize the closet", Mood::LowEnergy);
        assert_eq!(steps[0], "Set a timer for 10 minutes and pick one small area");

        let steps = breakdown_steps("Learn Spanish", Mood::Focused);
        assert_eq!(steps[0], "Create a study schedule and gather all materials");
    }

    #[test]
    fn test_breakdown_stressed_single_table() {
        let a = breakdown_steps("write essay", Mood::Stressed);
        let b = breakdown_steps("clean room", Mood::Stressed);
        assert_eq!(a, b);
        assert_eq!(a[2], "Do just that one small action - nothing more");
    }
}
