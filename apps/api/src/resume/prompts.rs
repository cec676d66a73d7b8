// Skill & summary extraction prompt templates.

pub const PROFILE_EXTRACT_SYSTEM: &str = "\
You are a meticulous resume analyst. \
You read resume text and extract the candidate's skills and a concise professional summary. \
Only report skills that actually appear in the text; never invent experience.";

/// Replace `{resume_text}` before sending.
pub const PROFILE_EXTRACT_PROMPT: &str = r#"Extract the candidate profile from the resume text below.

RESUME TEXT:
{resume_text}

OUTPUT SCHEMA (return exactly this structure):
{
  "skills": ["string"],
  "summary": "string"
}

RULES:
1. "skills" lists every unique skill mentioned: programming languages, tools, frameworks,
   platforms, domain knowledge and soft skills. Use the spelling found in the resume.
2. "summary" is 2-4 sentences covering the candidate's objective, education and most
   relevant experience.
3. If no skills are mentioned, return an empty list.
4. Return ONLY the JSON object — nothing else, no code fences."#;
