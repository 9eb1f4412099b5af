//! The static section catalog: six fixed proposal sections, each with its
//! hand-written descriptive instruction, and the two fixed groupings the
//! chained generation calls use. Immutable, defined at process start.

/// Sections generated by the first model call.
pub const PART1_SECTIONS: [&str; 2] = [
    "Executive Summary",
    "Client Background and Problem Statement",
];

/// Sections generated by the second model call.
pub const PART2_SECTIONS: [&str; 4] = [
    "Solution Overview",
    "Scope of Work",
    "Proposed Enabling Technology",
    "Statement of Work",
];

const SECTION_CATALOG: [(&str, &str); 6] = [
    (
        "Executive Summary",
        "Provide a detailed introduction to the client's situation, including their industry, market position, and key challenges. \
         Explain how our solution addresses their needs and the anticipated benefits. \
         Highlight the unique value proposition and why we are the best choice for this project.",
    ),
    (
        "Client Background and Problem Statement",
        "Thoroughly describe the client's background, including their history, mission, and strategic objectives. \
         Detail the specific challenges they are facing, supported by data or examples where possible. \
         Explain how these challenges impact their business operations and strategic goals.",
    ),
    (
        "Solution Overview",
        "Present an in-depth outline of the proposed solution. \
         Explain the methodology, processes, and technologies involved. \
         Illustrate how the solution addresses each of the client's challenges, and include case studies or success stories from similar projects.",
    ),
    (
        "Scope of Work",
        "Detail all tasks, deliverables, and methodologies required to implement the solution. \
         Break down the project phases, timelines, and resource allocations. \
         Include responsibilities, milestones, and key performance indicators (KPIs) to measure success.",
    ),
    (
        "Proposed Enabling Technology",
        "Discuss in detail the technology stack that will support the proposed solution. \
         Explain why these technologies are the best fit for the client's needs. \
         Include technical specifications, integration strategies, and how the technology aligns with the client's existing systems.",
    ),
    (
        "Statement of Work",
        "Summarize the formal terms of the proposal, including all deliverables, detailed timelines, pricing structures, payment schedules, and expected outcomes. \
         Outline the terms and conditions, acceptance criteria, and any assumptions or dependencies. \
         Ensure clarity to avoid any ambiguities regarding project execution.",
    ),
];

/// Looks up the descriptive instruction for a section name.
pub fn section_overview(name: &str) -> Option<&'static str> {
    SECTION_CATALOG
        .iter()
        .find(|(section, _)| *section == name)
        .map(|(_, overview)| *overview)
}
