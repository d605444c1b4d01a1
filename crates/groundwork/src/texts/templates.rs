//! Documents written into every initialized workspace.

const GITATTRIBUTES: &str =
  include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/gitattributes"));
const GITIGNORE: &str =
  include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/gitignore"));
const README: &str =
  include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/README.md"));
const LICENSE: &str =
  include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/LICENSE.md"));
const AGENT_INSTRUCTIONS: &str =
  include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/Gemini.md"));
const DIRECTIVE_TEMPLATE: &str =
  include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/TEMPLATE.md"));

/// Revision of the agent instruction document.
pub const AGENT_INSTRUCTIONS_VERSION: &str = "v13.1";

/// A generated file, relative to the workspace root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
  pub path: &'static str,
  pub content: String,
  /// Shown after the path in the log line, e.g. "(MIT)".
  pub note: Option<&'static str>,
}

/// All generated documents, in write order.
pub fn documents(repo_name: &str, year: i32) -> Vec<Document> {
  vec![
    doc(".gitattributes", GITATTRIBUTES.to_string(), None),
    doc(".gitignore", GITIGNORE.to_string(), Some("comprehensive")),
    doc("README.md", readme(repo_name), None),
    doc("LICENSE.md", license(year), Some("MIT")),
    doc(
      "Gemini.md",
      AGENT_INSTRUCTIONS.to_string(),
      Some(AGENT_INSTRUCTIONS_VERSION),
    ),
    doc("directives/TEMPLATE.md", DIRECTIVE_TEMPLATE.to_string(), None),
  ]
}

pub fn readme(repo_name: &str) -> String {
  README.replace("{{repo_name}}", repo_name)
}

pub fn license(year: i32) -> String {
  LICENSE.replace("{{year}}", &year.to_string())
}

fn doc(path: &'static str, content: String, note: Option<&'static str>) -> Document {
  Document {
    path,
    content,
    note,
  }
}
