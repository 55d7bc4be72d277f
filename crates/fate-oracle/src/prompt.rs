//! Prompt construction.

use fate_core::DieKind;

/// Build the fortune prompt for a roll. Same inputs, same text.
pub fn build_prompt(value: u32, die: DieKind) -> String {
    let faces = die.faces();
    format!(
        "The user rolled a {value} on a {faces}-sided die in a game of chance.\n\
         Act as a mystical Dungeon Master or Fortune Teller.\n\
         Give a very short, witty or dramatic interpretation of this result (max 15 words).\n\
         \n\
         Return ONLY a JSON object with this structure (no markdown):\n\
         {{\"text\": \"your interpretation\", \"tone\": \"lucky\" | \"neutral\" | \"ominous\"}}\n\
         \n\
         Examples:\n\
         Roll 1 on D6: {{\"text\": \"A critical failure! Stumble and fall.\", \"tone\": \"ominous\"}}\n\
         Roll 6 on D6: {{\"text\": \"Perfection! The gods smile upon you.\", \"tone\": \"lucky\"}}\n\
         Roll 21 on D21: {{\"text\": \"Unimaginable power courses through your veins!\", \"tone\": \"lucky\"}}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_value_and_faces() {
        let p = build_prompt(17, DieKind::TwentyOne);
        assert!(p.starts_with("The user rolled a 17 on a 21-sided die"));
        assert!(p.contains("max 15 words"));
        assert!(p.contains(r#""lucky" | "neutral" | "ominous""#));
    }

    #[test]
    fn deterministic() {
        assert_eq!(build_prompt(3, DieKind::Six), build_prompt(3, DieKind::Six));
        assert_ne!(build_prompt(3, DieKind::Six), build_prompt(4, DieKind::Six));
    }

    #[test]
    fn examples_are_valid_json() {
        let p = build_prompt(1, DieKind::Six);
        let examples: Vec<&str> = p
            .lines()
            .filter(|l| l.starts_with("Roll "))
            .filter_map(|l| l.split_once(": ").map(|(_, json)| json))
            .collect();
        assert_eq!(examples.len(), 3);
        for json in examples {
            let v: serde_json::Value = serde_json::from_str(json).unwrap();
            assert!(v["text"].is_string());
            assert!(v["tone"].is_string());
        }
    }
}
