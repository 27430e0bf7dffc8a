//! Prompt text sent alongside the photo
//!
//! The output template is a hint to the model. Verdicts are displayed as
//! returned and never checked against it.

use crate::state::mode::Mode;

const INSTRUCTION: &str = "Rate this outfit and provide feedback. Structure your response as:";

const OUTPUT_TEMPLATE: &str = "\
**Overall Rating: X/10** ⭐

**Breakdown:**
- Style: X/10
- Weather Appropriateness: X/10
- Versatility: X/10

**What Works:**
[2-3 specific positive points]

**Suggestions:**
[2-3 specific improvements]";

/// Extra section requested only in roast mode
pub const ROAST_SECTION: &str = "**The Roast:**\n[Your wittiest observation]";

const CLOSING: &str = "Be specific and helpful!";

/// Build the text block for `mode`: persona, template, optional roast, closing line
pub fn build_prompt(mode: Mode) -> String {
    let mut sections = vec![mode.persona(), INSTRUCTION, OUTPUT_TEMPLATE];
    if mode.wants_roast() {
        sections.push(ROAST_SECTION);
    }
    sections.push(CLOSING);
    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_starts_with_persona() {
        for mode in Mode::ALL {
            assert!(build_prompt(mode).starts_with(mode.persona()));
        }
    }

    #[test]
    fn test_roast_section_only_in_roast_mode() {
        for mode in Mode::ALL {
            let prompt = build_prompt(mode);
            assert_eq!(prompt.contains("**The Roast:**"), mode == Mode::Roast, "{:?}", mode);
        }
    }

    #[test]
    fn test_template_lists_all_sub_scores() {
        let prompt = build_prompt(Mode::Balanced);
        assert!(prompt.contains("**Overall Rating: X/10** ⭐"));
        assert!(prompt.contains("- Style: X/10"));
        assert!(prompt.contains("- Weather Appropriateness: X/10"));
        assert!(prompt.contains("- Versatility: X/10"));
        assert!(prompt.contains("**What Works:**"));
        assert!(prompt.contains("**Suggestions:**"));
        assert!(prompt.ends_with("Be specific and helpful!"));
    }
}
