//! Prompt construction for the plan generator.
//!
//! The system prompt pins the model to a strict JSON output contract; the
//! user prompt carries the goal plus whatever context the caller supplied.
//! Pure string assembly, no I/O.

/// JSON schema reference included verbatim in the system prompt.
const SCHEMA_REFERENCE: &str = r#"{
  "tasks": [
    {
      "id": "T1",
      "title": "Task title",
      "description": "What needs to be done",
      "estimateDays": 2
    }
  ],
  "dependencies": [
    {
      "from": "T1",
      "to": "T2"
    }
  ],
  "assumptions": ["Assumption 1", "Assumption 2"],
  "risks": [
    {
      "title": "Risk description",
      "severity": "high|medium|low",
      "mitigation": "How to address it"
    }
  ],
  "reasoning": "Brief explanation of the plan structure"
}"#;

/// Build the system prompt sent with every generation request.
pub fn build_system_prompt() -> String {
    let mut prompt = String::with_capacity(1024);
    prompt.push_str(
        "You are a project planning assistant. Your job is to break down goals \
         into actionable tasks.\n\n\
         You MUST respond with ONLY a valid JSON object. No explanation, no \
         markdown, just pure JSON.\n\n\
         The JSON must have this exact structure:\n",
    );
    prompt.push_str(SCHEMA_REFERENCE);
    prompt.push_str(
        "\n\nRules:\n\
         - Task IDs must be unique (T1, T2, T3, etc.)\n\
         - Dependencies reference task IDs that exist\n\
         - Estimates are in days (can be fractional like 0.5)\n\
         - Keep reasoning brief (1-2 sentences)\n\
         - Be realistic with estimates\n\
         - No cycles in dependencies",
    );
    prompt
}

/// Build the user prompt from the goal and optional context.
pub fn build_user_prompt(goal: &str, deadline: Option<&str>, constraints: &[String]) -> String {
    let mut prompt = format!("Goal: {goal}\n");

    if let Some(deadline) = deadline {
        prompt.push_str(&format!("Deadline/Timebox: {deadline}\n"));
    }

    if !constraints.is_empty() {
        prompt.push_str(&format!("Constraints: {}\n", constraints.join(", ")));
    }

    prompt.push_str("\nBreak this down into actionable tasks with dependencies and timelines.");
    prompt
}
