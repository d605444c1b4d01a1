use owo_colors::OwoColorize as _;

pub fn start_banner() -> String {
  "🚀 Starting Professional Agentic Workspace Initialization..."
    .bold()
    .to_string()
}

pub fn success_banner() -> String {
  "✅ Workspace successfully initialized for Professional Agentic Workflows!"
    .bright_green()
    .bold()
    .to_string()
}

pub fn next_step_hint() -> String {
  format!(
    "Next step: Ask the agent to '{}'",
    "Read Gemini.md and begin the first task.".bright_cyan()
  )
}

pub fn version_control_incomplete(steps: &[&str]) -> String {
  format!(
    "  [!] Version control setup incomplete (failed: {}). The workspace files are in place.",
    steps.join(", ")
  )
}
