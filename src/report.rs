//! Console rendering of a finished run.

use crate::probe::RunReport;

pub fn print_plain(report: &RunReport) {
    print!("{}", render_plain(report));
}

/// Same aggregate as the plain listing, as pretty-printed JSON on stdout
pub fn print_json(report: &RunReport) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn render_plain(report: &RunReport) -> String {
    let mut out = String::new();

    out.push_str("\n--- Results ---\n");
    if report.connections.is_empty() {
        out.push_str("No successful connections found.\n");
    } else {
        out.push_str(&format!(
            "Successful connections found: {}\n\n",
            report.connections.len()
        ));
        for connection in &report.connections {
            match &connection.credential {
                Some(credential) => out.push_str(&format!(
                    "[URL]: {} (login: {}, password: {})\n",
                    connection.url, credential.username, credential.password
                )),
                None => out.push_str(&format!("[URL]: {}\n", connection.url)),
            }
        }
    }
    out.push_str(&format!(
        "total: {}/{}\n",
        report.stats.targets_found, report.stats.candidate_lines
    ));

    out
}
