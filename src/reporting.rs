// Report rendering and export
// Markdown layout: one investigation per finding with an attribute table,
// numbered techniques, and optional example payload / recommendations.

use chrono::Local;
use std::fs::File;
use std::io::Write;

use crate::models::Report;

/// Render the full report as Markdown.
pub fn render_markdown(report: &Report) -> String {
    let mut markdown = String::from("# 🛡️ IDOR Heuristics Report\n\n");

    for (idx, finding) in report.vulnerabilities.iter().enumerate() {
        markdown.push_str("---\n\n");
        markdown.push_str(&format!(
            "## 🔍 Investigation #{}: `{}`\n\n",
            idx + 1,
            finding.path
        ));
        markdown.push_str("| **Attribute** | **Value** |\n");
        markdown.push_str("|:------------- |:--------- |\n");
        markdown.push_str(&format!("| **Path**      | `{}` |\n", finding.path));
        markdown.push_str(&format!("| **Method**    | `{}` |\n\n", finding.method));
        markdown.push_str("### 🧰 Attack Techniques\n\n");

        for (j, attack) in finding.attacks.iter().enumerate() {
            markdown.push_str(&format!("{}. {}\n\n", j + 1, attack.technique));
            markdown.push_str("**Description:**\n\n");
            markdown.push_str(&format!("> {}\n\n", attack.description));
            if let Some(example) = attack.example.as_deref().filter(|e| !e.is_empty()) {
                markdown.push_str("**Example Payload:**\n");
                markdown.push_str(&format!("```http\n{}\n```\n\n", example));
            }
        }

        if let Some(recommendations) = finding
            .recommendations
            .as_ref()
            .filter(|recs| !recs.is_empty())
        {
            markdown.push_str("### 🛠️ Recommendations\n\n");
            for recommendation in recommendations {
                markdown.push_str(&format!("- {}\n", recommendation));
            }
            markdown.push('\n');
        }
    }

    markdown
}

/// Write the Markdown report to a timestamped file and return its name.
pub fn export_markdown(report: &Report) -> Result<String, std::io::Error> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!("endor_report_{}.md", timestamp);
    let mut file = File::create(&filename)?;
    file.write_all(render_markdown(report).as_bytes())?;
    Ok(filename)
}
