//! Prompt templates, kept as data so prompt wording can be iterated without
//! touching pipeline logic.

/// Instruction sent to the vision model alongside the image bytes.
pub const VISION_PROMPT: &str = r#"Analyze this medical brain image and describe SPECIFIC VISUAL FEATURES you observe:

1. **Location**: Which brain region/hemisphere shows abnormalities?
2. **Appearance**: Describe the shape, size, borders, density/intensity
3. **Texture**: Is it uniform, heterogeneous, with necrosis, edema?
4. **Surrounding tissue**: Any mass effect, midline shift, edema, compression?
5. **Signal characteristics**: Dark/bright areas, contrast enhancement patterns

Be SPECIFIC and DETAILED about what you visually observe. Focus on measurable, objective features.
Do NOT diagnose - only describe visual characteristics."#;

/// System message framing the synthesis call: educational scope only,
/// mandatory closing disclaimer, no diagnosis.
pub const SYNTHESIS_SYSTEM_PROMPT: &str = r#"You are a medical education AI assistant. Your role is to:
1. Analyze the visual findings from the brain scan
2. Connect these findings with relevant medical knowledge from textbooks
3. Explain what these findings typically indicate in medical literature
4. Provide educational context about the condition

You must:
- Be specific about the observed features
- Reference medical knowledge to explain significance
- Provide educational information about typical presentations
- Suggest what further clinical evaluation might involve
- End with a clear disclaimer

You must NOT:
- Make definitive diagnoses
- Provide treatment recommendations
- Replace professional medical evaluation"#;

/// User message for the synthesis call, binding the visual description and
/// the retrieved textbook context.
pub fn synthesis_user_prompt(description: &str, context: &str) -> String {
    format!(
        r#"**VISUAL ANALYSIS FROM BRAIN SCAN:**

{description}

**RELEVANT MEDICAL TEXTBOOK KNOWLEDGE:**

{context}

**YOUR TASK:**

Based on the visual features described above and the medical knowledge provided, create a comprehensive educational analysis that:

1. **Summarizes the key visual findings** - What specific features are observed?

2. **Medical context** - Based on the textbook knowledge, what do these visual characteristics typically indicate in medical literature? What conditions commonly present with these features?

3. **Clinical significance** - Explain the importance of these findings (edema, mass effect, etc.)

4. **Typical clinical workflow** - What additional imaging or tests are typically performed for such presentations?

5. **Educational summary** - Synthesize the information into a clear educational explanation

**End with this exact disclaimer:**

⚠️ DISCLAIMER: This analysis is for educational purposes only and does not constitute medical advice, diagnosis, or treatment recommendation. Actual diagnosis requires comprehensive clinical evaluation by qualified healthcare professionals, including detailed patient history, physical examination, and correlation with clinical symptoms. If you have medical concerns, please consult a qualified healthcare provider."#
    )
}
