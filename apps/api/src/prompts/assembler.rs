//! Prompt assembler — two pure formatting functions that render the field
//! set and the section catalog into the instruction strings the model
//! receives. Plain template interpolation; no conditionals, no loops beyond
//! one block per section name.

use crate::prompts::sections::{section_overview, PART1_SECTIONS, PART2_SECTIONS};
use crate::prompts::SYSTEM_MESSAGE;
use crate::reducer::PromptFields;

/// Builds the part-1 instruction string: the full field set plus the
/// descriptions of the first two sections.
pub fn build_part1(fields: &PromptFields) -> String {
    let prompt_data_text = format!(
        "\nClient Name: {}\nProject Name: {}\nSolution: {}\nKey Challenges - High Importance: {}\nKey Challenges - Medium Importance: {}\nKey Challenges - Low Importance: {}\nSolution Aspects: {}\nAdditional Information: {}\n",
        fields.client_name,
        fields.project_name,
        fields.solution,
        fields.key_challenges_high,
        fields.key_challenges_medium,
        fields.key_challenges_low,
        fields.solution_aspect,
        fields.additional_info,
    );

    format!(
        "\nUse the following client information to inform your writing:\n{}\n\nPlease generate a comprehensive, detailed, and in-depth proposal with the following sections:\n\n{}\n\nEach section should be extensive and provide substantial information, insights, and analysis. Use professional language, and ensure the proposal is coherent and flows logically from one section to the next. Include relevant examples, data, and references where appropriate to support the content.\n",
        prompt_data_text,
        sections_block(&PART1_SECTIONS),
    )
}

/// Builds the part-2 instruction string: a narrower field subset, the first
/// call's full output for continuity, and the remaining four sections.
pub fn build_part2(fields: &PromptFields, previous_content: &str) -> String {
    format!(
        "\n{}\n\nUse the following client information to inform your writing:\nClient Name: {}\nProject Name: {}\nSolution: {}\nSolution Aspects: {}\n\nPreviously generated content:\n{}\n\nPlease continue generating the proposal with the following sections:\n\n{}\n\nEach section should be extensive and provide substantial information, insights, and analysis. Ensure coherence with the previous sections and maintain a consistent professional tone. Use relevant examples, data, and references where appropriate to support the content.\n",
        SYSTEM_MESSAGE,
        fields.client_name,
        fields.project_name,
        fields.solution,
        fields.solution_aspect,
        previous_content,
        sections_block(&PART2_SECTIONS),
    )
}

/// One `### {name}` block per section, each followed by its overview.
fn sections_block(names: &[&str]) -> String {
    let mut block = String::new();
    for name in names {
        let overview = section_overview(name).unwrap_or_default();
        block.push_str(&format!("### {name}\n{overview}\n\n"));
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> PromptFields {
        PromptFields {
            client_name: "Acme Corp".to_string(),
            project_name: "Data Platform Modernization".to_string(),
            solution: "Information Landscape Assessment".to_string(),
            key_challenges_high: "Data silos: Disconnected ERP and CRM".to_string(),
            key_challenges_medium: "Reporting: Manual monthly packs".to_string(),
            key_challenges_low: "Training: Limited analytics skills".to_string(),
            solution_aspect: "Dashboards: Executive KPI views".to_string(),
            additional_info: "Budget approved for FY25".to_string(),
        }
    }

    #[test]
    fn test_part1_contains_every_field_value() {
        let prompt = build_part1(&sample_fields());
        assert!(prompt.contains("Client Name: Acme Corp"));
        assert!(prompt.contains("Project Name: Data Platform Modernization"));
        assert!(prompt.contains("Solution: Information Landscape Assessment"));
        assert!(prompt.contains("Key Challenges - High Importance: Data silos"));
        assert!(prompt.contains("Key Challenges - Medium Importance: Reporting"));
        assert!(prompt.contains("Key Challenges - Low Importance: Training"));
        assert!(prompt.contains("Solution Aspects: Dashboards"));
        assert!(prompt.contains("Additional Information: Budget approved for FY25"));
    }

    #[test]
    fn test_part1_contains_requested_section_overviews_verbatim() {
        let prompt = build_part1(&sample_fields());
        for name in PART1_SECTIONS {
            assert!(prompt.contains(&format!("### {name}")));
            assert!(prompt.contains(section_overview(name).unwrap()));
        }
        // Part-2 sections must not appear in the first prompt.
        for name in PART2_SECTIONS {
            assert!(!prompt.contains(&format!("### {name}")));
        }
    }

    #[test]
    fn test_part2_embeds_previous_content_verbatim() {
        let previous = "## Executive Summary\nAcme Corp stands at an inflection point...";
        let prompt = build_part2(&sample_fields(), previous);
        assert!(prompt.contains(previous));
        assert!(prompt.contains("Previously generated content:"));
    }

    #[test]
    fn test_part2_contains_remaining_section_overviews() {
        let prompt = build_part2(&sample_fields(), "previous text");
        for name in PART2_SECTIONS {
            assert!(prompt.contains(&format!("### {name}")));
            assert!(prompt.contains(section_overview(name).unwrap()));
        }
    }

    #[test]
    fn test_part2_uses_narrow_field_subset() {
        let prompt = build_part2(&sample_fields(), "previous text");
        assert!(prompt.contains("Client Name: Acme Corp"));
        assert!(prompt.contains("Solution Aspects: Dashboards"));
        // Challenge tiers and additional info belong to part 1 only.
        assert!(!prompt.contains("Key Challenges - High Importance"));
        assert!(!prompt.contains("Additional Information:"));
    }

    #[test]
    fn test_empty_fields_still_produce_complete_template() {
        let prompt = build_part1(&PromptFields::default());
        assert!(prompt.contains("Client Name: \n"));
        assert!(prompt.contains("Please generate a comprehensive"));
    }
}
