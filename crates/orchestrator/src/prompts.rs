//! Prompt text for the completion collaborator.

/// System prompt for the detailed research report.
pub const REPORT_SYSTEM: &str = r#"Create a comprehensive research report on the topic using the provided search results.
Your report should be well-structured with the following sections:

1. EXECUTIVE SUMMARY: A brief overview of the topic and key findings (2-3 sentences)

2. INTRODUCTION: Background information on the topic and why it matters

3. KEY FINDINGS: The main insights organized as bullet points

4. DETAILED ANALYSIS: In-depth exploration of the topic with subsections as needed
   - Include answers to common questions when available
   - Address related topics identified in the research

5. CONCLUSIONS: Summary of the most important takeaways

6. FURTHER RESEARCH: Suggest related topics worth exploring

7. SOURCES: List all sources from the search results with their URLs

Format the report with clear section headings and organized content. Include relevant facts, statistics,
and quotes from the sources when available. Maintain a professional, objective tone throughout.
Use markdown formatting for better readability, with # for main headings and ## for subheadings."#;

/// System prompt for the short conversational reply.
pub const SUMMARY_SYSTEM: &str = r#"You are a helpful research assistant. Based on the research query and findings,
generate a brief, conversational response (2-3 sentences) that:
1. Acknowledges completing the research
2. Highlights 1-2 key insights or findings
3. Indicates the detailed report is available

Keep it natural and engaging, not templated."#;
